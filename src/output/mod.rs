pub mod row;
pub mod summary;
pub mod writer;

pub use row::*;
pub use summary::*;
pub use writer::*;
