//! Structural analysis of a row table: question blocks and the turns between them.

pub mod scanner;
pub mod turns;

pub use scanner::{QuestionBlock, QuestionBlocks};
pub use turns::{Turn, TurnLoopTable};
