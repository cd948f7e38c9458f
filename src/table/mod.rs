pub mod conversion;
pub mod definition;
pub mod loader;
pub mod raw;
#[cfg(feature = "xlsx")]
pub mod xlsx;

pub use conversion::*;
pub use definition::*;
pub use loader::*;
pub use raw::*;
#[cfg(feature = "xlsx")]
pub use xlsx::*;
