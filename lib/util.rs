mod counter;
mod timer;
mod trigger;

pub use counter::*;
pub use timer::*;
pub use trigger::*;
