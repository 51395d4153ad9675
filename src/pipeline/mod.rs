pub mod canned;
pub mod fallback;
pub mod guard;
pub mod input;
pub mod responder;
pub mod sanitizer;

pub use canned::*;
pub use fallback::*;
pub use guard::*;
pub use input::*;
pub use sanitizer::*;
