use crate::analysis::{QuestionBlock, QuestionBlocks, TurnLoopTable};
use crate::description::describe_intent;
use crate::graph::{DialogueGraph, NodeRef, QuestionNode, ResponseNode};
use crate::table::{InputRow, RowTable, Section};
use crate::utterance::Utterance;
use tracing::debug;

/// What the scan is looking at, decided by the section of the current row.
enum ScanState {
    Scanning,
    InQuestionBlock,
    InIntentRun,
}

impl ScanState {
    fn at(row: &InputRow) -> Self {
        match row.section {
            Section::Question => ScanState::InQuestionBlock,
            Section::IntentResponse => ScanState::InIntentRun,
            Section::Other(_) => ScanState::Scanning,
        }
    }
}

/// Walks a row table once, left to right, and builds its [`DialogueGraph`].
pub(super) struct GraphBuilder<'a> {
    table: &'a RowTable,
    blocks: &'a QuestionBlocks,
    turns: &'a TurnLoopTable,
}

impl<'a> GraphBuilder<'a> {
    pub(super) fn new(
        table: &'a RowTable,
        blocks: &'a QuestionBlocks,
        turns: &'a TurnLoopTable,
    ) -> Self {
        Self {
            table,
            blocks,
            turns,
        }
    }

    pub(super) fn build(&self) -> DialogueGraph {
        let mut graph = DialogueGraph {
            questions: self.blocks.iter().map(|b| self.question_node(b)).collect(),
            ..Default::default()
        };

        let mut index = 0;
        while index < self.table.len() {
            index = match ScanState::at(&self.table[index]) {
                ScanState::InQuestionBlock => match self.blocks.position_containing(index) {
                    Some(ordinal) => {
                        graph.order.push(NodeRef::Question(ordinal));
                        self.blocks[ordinal].end + 1
                    }
                    None => index + 1,
                },
                ScanState::InIntentRun => {
                    let end = self.intent_run_end(index);
                    for node in self.response_nodes(index, end) {
                        graph.order.push(NodeRef::Response(graph.responses.len()));
                        graph.responses.push(node);
                    }
                    end
                }
                ScanState::Scanning => index + 1,
            };
        }

        graph
    }

    fn question_node(&self, block: &QuestionBlock) -> QuestionNode {
        let rows: Vec<&InputRow> = block.indices.iter().map(|&i| &self.table[i]).collect();
        QuestionNode {
            block: block.clone(),
            utterances: rows.iter().map(|row| Utterance::from_row(row)).collect(),
            button: first_present(&rows, |r| r.button.as_deref()),
            image_listening: first_present(&rows, |r| r.image_listening.as_deref()),
            audio_listening: first_present(&rows, |r| r.audio_listening.as_deref()),
        }
    }

    /// Exclusive end of the run of `Intent_Response` rows sharing the intent at `start`.
    fn intent_run_end(&self, start: usize) -> usize {
        let intent = &self.table[start].intent;
        self.table.rows()[start..]
            .iter()
            .position(|row| !row.section.is_intent_response() || &row.intent != intent)
            .map_or(self.table.len(), |offset| start + offset)
    }

    /// One node per distinct loop value of the run `[start, end)`, in first-seen order.
    fn response_nodes(&self, start: usize, end: usize) -> Vec<ResponseNode> {
        let intent = self.table[start].intent.clone();
        let turn = self.turns.turn_containing(start);
        let turn_max_loop = match (turn, intent.as_deref()) {
            (Some(turn), Some(intent)) => self.turns.max_loop(turn, intent),
            _ => None,
        };
        let next_question = self.blocks.position_after(end - 1);

        let mut loops: Vec<(Option<u32>, Vec<usize>)> = Vec::new();
        for index in start..end {
            let loop_count = self.table[index].loop_count;
            match loops.iter_mut().find(|(l, _)| *l == loop_count) {
                Some((_, rows)) => rows.push(index),
                None => loops.push((loop_count, vec![index])),
            }
        }

        loops
            .into_iter()
            .map(|(loop_count, indices)| {
                let rows: Vec<&InputRow> = indices.iter().map(|&i| &self.table[i]).collect();
                let user_examples = first_present(&rows, |r| r.user_examples.as_deref());
                let node = ResponseNode {
                    description: intent
                        .as_deref()
                        .and_then(|i| describe_intent(i, user_examples.as_deref(), loop_count)),
                    intent: intent.clone(),
                    loop_count,
                    utterances: rows.iter().map(|row| Utterance::from_row(row)).collect(),
                    button: first_present(&rows, |r| r.button.as_deref()),
                    user_examples,
                    image_listening: first_present(&rows, |r| r.image_listening.as_deref()),
                    audio_listening: first_present(&rows, |r| r.audio_listening.as_deref()),
                    rows: indices,
                    turn,
                    turn_max_loop,
                    next_question,
                };
                debug!(
                    intent = ?node.intent,
                    loop_count = ?node.loop_count,
                    turn_max_loop = ?node.turn_max_loop,
                    next_question = ?node.next_question,
                    stitched = node.leads_to().is_some(),
                    "Built response node"
                );
                node
            })
            .collect()
    }
}

/// First non-empty value of a field across `rows`.
fn first_present<F>(rows: &[&InputRow], field: F) -> Option<String>
where
    F: Fn(&InputRow) -> Option<&str>,
{
    rows.iter()
        .filter_map(|row| field(*row))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
