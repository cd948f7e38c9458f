use crate::description::normalize_intent_name;
use crate::error::TransformError;
use crate::graph::{DialogueGraph, Node, QuestionNode, ResponseNode};
use crate::output::OutputRow;
use crate::utterance::{Utterance, to_json_array};

/// Flattens a dialogue graph into template rows, one per node, in scan order.
pub(super) fn emit_rows(
    graph: &DialogueGraph,
    question_max_loop: u32,
) -> Result<Vec<OutputRow>, TransformError> {
    graph
        .nodes()
        .map(|node| match node {
            Node::Question(question) => question_row(question, question_max_loop),
            Node::Response(response) => response_row(graph, response),
        })
        .collect()
}

fn question_row(question: &QuestionNode, max_loop: u32) -> Result<OutputRow, TransformError> {
    Ok(OutputRow {
        question: Some(serialize(&question.utterances)?),
        button: question.button.clone(),
        max_loop: Some(max_loop),
        image_listening: question.image_listening.clone(),
        audio_listening: question.audio_listening.clone(),
        ..Default::default()
    })
}

fn response_row(
    graph: &DialogueGraph,
    response: &ResponseNode,
) -> Result<OutputRow, TransformError> {
    Ok(OutputRow {
        intent_name: response.intent.as_deref().map(normalize_intent_name),
        intent_description: response.description.clone(),
        button: response.button.clone(),
        loop_count: response.loop_count,
        response_1: Some(serialize(&graph.response_utterances(response))?),
        image_listening: response.image_listening.clone(),
        audio_listening: response.audio_listening.clone(),
        ..Default::default()
    })
}

fn serialize(utterances: &[Utterance]) -> Result<String, TransformError> {
    to_json_array(utterances).map_err(|e| TransformError::Serialization(e.to_string()))
}
