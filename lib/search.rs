mod control;
mod limits;
mod tree;

pub use control::*;
pub use limits::*;
pub use tree::*;
