use crate::table::RowTable;
use std::ops::Index;
use tracing::debug;

/// A maximal run of consecutive `Question` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    pub start: usize,
    /// Inclusive.
    pub end: usize,
    pub indices: Vec<usize>,
}

impl QuestionBlock {
    fn from_indices(indices: Vec<usize>) -> Option<Self> {
        Some(Self {
            start: *indices.first()?,
            end: *indices.last()?,
            indices,
        })
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// The ordered question blocks of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBlocks {
    blocks: Vec<QuestionBlock>,
}

impl QuestionBlocks {
    /// Partitions `table` into its question blocks with a single forward scan.
    pub fn scan(table: &RowTable) -> Self {
        let mut blocks = Vec::new();
        let mut current: Vec<usize> = Vec::new();

        for (index, row) in table.iter().enumerate() {
            if row.section.is_question() {
                current.push(index);
            } else if let Some(block) = QuestionBlock::from_indices(std::mem::take(&mut current)) {
                blocks.push(block);
            }
        }
        if let Some(block) = QuestionBlock::from_indices(current) {
            blocks.push(block);
        }

        debug!(
            blocks = ?blocks.iter().map(|b| (b.start, b.end)).collect::<Vec<_>>(),
            "Scanned question blocks"
        );
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionBlock> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[QuestionBlock] {
        &self.blocks
    }

    /// Ordinal of the block containing row `index`.
    pub fn position_containing(&self, index: usize) -> Option<usize> {
        self.blocks.iter().position(|b| b.contains(index))
    }

    /// Ordinal of the first block starting strictly after row `index`.
    pub fn position_after(&self, index: usize) -> Option<usize> {
        self.blocks.iter().position(|b| b.start > index)
    }
}

impl Index<usize> for QuestionBlocks {
    type Output = QuestionBlock;

    fn index(&self, ordinal: usize) -> &QuestionBlock {
        &self.blocks[ordinal]
    }
}

impl<'a> IntoIterator for &'a QuestionBlocks {
    type Item = &'a QuestionBlock;
    type IntoIter = std::slice::Iter<'a, QuestionBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
