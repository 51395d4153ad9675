pub mod types;
pub mod classifier;
pub mod keyword;

pub use types::*;
pub use classifier::*;
pub use keyword::*;
