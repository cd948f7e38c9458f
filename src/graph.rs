//! The dialogue graph implied by a PRD QC table.
//!
//! A table only encodes its graph through row adjacency: a question block is followed by
//! the responses to it, and the last loop of each response leads into the next question
//! block. The engine materializes that structure here before anything is serialized.

use crate::analysis::{QuestionBlock, Turn};
use crate::utterance::Utterance;

/// A question block with its utterances and first-wins listening attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionNode {
    pub block: QuestionBlock,
    pub utterances: Vec<Utterance>,
    pub button: Option<String>,
    pub image_listening: Option<String>,
    pub audio_listening: Option<String>,
}

/// The responses for one `(intent, loop)` pair inside a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseNode {
    pub intent: Option<String>,
    pub loop_count: Option<u32>,
    /// Source rows, in table order.
    pub rows: Vec<usize>,
    /// The node's own utterances, without any stitched question.
    pub utterances: Vec<Utterance>,
    pub description: Option<String>,
    pub button: Option<String>,
    pub user_examples: Option<String>,
    pub image_listening: Option<String>,
    pub audio_listening: Option<String>,
    pub turn: Option<Turn>,
    /// Maximum loop of this intent within `turn`.
    pub turn_max_loop: Option<u32>,
    /// Ordinal of the first question block after this node's intent run.
    pub next_question: Option<usize>,
}

impl ResponseNode {
    /// Whether this node is its intent's terminal loop in the turn and so continues
    /// into the next question. Loop 0 never continues.
    pub fn is_terminal(&self) -> bool {
        match (self.loop_count, self.turn_max_loop) {
            (Some(loop_count), Some(max)) => loop_count == max && max > 0,
            _ => false,
        }
    }

    /// The question ordinal this response leads into, if it is stitched.
    pub fn leads_to(&self) -> Option<usize> {
        self.next_question.filter(|_| self.is_terminal())
    }
}

/// Reference to a node in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Question(usize),
    Response(usize),
}

/// A borrowed node, yielded in scan order.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Question(&'a QuestionNode),
    Response(&'a ResponseNode),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogueGraph {
    /// One node per question block, indexed by block ordinal.
    pub questions: Vec<QuestionNode>,
    pub responses: Vec<ResponseNode>,
    /// Nodes in the order the scan met them.
    pub order: Vec<NodeRef>,
}

impl DialogueGraph {
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        self.order.iter().map(|node| match *node {
            NodeRef::Question(ordinal) => Node::Question(&self.questions[ordinal]),
            NodeRef::Response(index) => Node::Response(&self.responses[index]),
        })
    }

    pub fn successor(&self, response: &ResponseNode) -> Option<&QuestionNode> {
        self.questions.get(response.leads_to()?)
    }

    /// The utterances a response row carries: its own, then the stitched question's.
    pub fn response_utterances(&self, response: &ResponseNode) -> Vec<Utterance> {
        let mut utterances = response.utterances.clone();
        if let Some(question) = self.successor(response) {
            utterances.extend(question.utterances.iter().cloned());
        }
        utterances
    }

    /// All `(response, question)` edges of the graph.
    pub fn edges(&self) -> impl Iterator<Item = (&ResponseNode, &QuestionNode)> + '_ {
        self.responses
            .iter()
            .filter_map(|r| self.successor(r).map(|q| (r, q)))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
