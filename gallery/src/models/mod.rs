pub mod catalog;
pub mod macros;
pub mod sky;

pub use catalog::*;
pub use sky::*;
