use super::scanner::QuestionBlocks;
use crate::table::RowTable;
use ahash::AHashMap;
use tracing::debug;

/// The inclusive span of rows between two question blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub start: usize,
    pub end: usize,
}

impl Turn {
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Maximum loop reached by each intent, scoped to the turn it appears in.
#[derive(Debug, Clone, Default)]
pub struct TurnLoopTable {
    turns: Vec<Turn>,
    max_loops: AHashMap<Turn, AHashMap<String, u32>>,
}

impl TurnLoopTable {
    pub fn analyze(table: &RowTable, blocks: &QuestionBlocks) -> Self {
        let turns = turn_spans(table, blocks);
        let mut max_loops: AHashMap<Turn, AHashMap<String, u32>> = AHashMap::new();

        for turn in &turns {
            for row in &table.rows()[turn.start..=turn.end] {
                if !row.section.is_intent_response() {
                    continue;
                }
                let Some((intent, loop_count)) = row.intent_loop() else {
                    continue;
                };
                let max = max_loops
                    .entry(*turn)
                    .or_default()
                    .entry(intent.to_string())
                    .or_insert(loop_count);
                *max = (*max).max(loop_count);
            }
            debug!(
                turn_start = turn.start,
                turn_end = turn.end,
                max_loops = ?max_loops.get(turn),
                "Analyzed turn"
            );
        }

        Self { turns, max_loops }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_containing(&self, index: usize) -> Option<Turn> {
        self.turns.iter().copied().find(|t| t.contains(index))
    }

    /// The turn-scoped maximum loop for `intent`, or `None` if the intent never
    /// appears with a loop number in that turn.
    pub fn max_loop(&self, turn: Turn, intent: &str) -> Option<u32> {
        self.max_loops.get(&turn)?.get(intent).copied()
    }

    pub fn intents(&self, turn: Turn) -> Option<&AHashMap<String, u32>> {
        self.max_loops.get(&turn)
    }
}

/// Computes the non-empty spans between question blocks, including the rows before
/// the first block and after the last one.
fn turn_spans(table: &RowTable, blocks: &QuestionBlocks) -> Vec<Turn> {
    let Some(last) = table.last_index() else {
        return Vec::new();
    };

    let mut bounds = Vec::with_capacity(blocks.len() + 1);
    match blocks.as_slice().first() {
        None => bounds.push((0, Some(last))),
        Some(first) => bounds.push((0, first.start.checked_sub(1))),
    }
    for (ordinal, block) in blocks.iter().enumerate() {
        let end = match blocks.as_slice().get(ordinal + 1) {
            Some(next) => next.start.checked_sub(1),
            None => Some(last),
        };
        bounds.push((block.end + 1, end));
    }

    bounds
        .into_iter()
        .filter_map(|(start, end)| end.filter(|end| start <= *end).map(|end| Turn { start, end }))
        .collect()
}
