//! Reddit model types.

mod comment;
mod sort;
mod submission;
pub mod thing;

pub use comment::*;
pub use sort::*;
pub use submission::*;
pub use thing::{MoreStub, Thing};
