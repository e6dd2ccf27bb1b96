mod action;
mod board;
mod castle;
mod castles;
mod color;
mod diagram;
mod file;
mod game;
mod r#move;
mod notation;
mod outcome;
mod piece;
mod rank;
mod role;
mod square;

pub use action::*;
pub use board::*;
pub use castle::*;
pub use castles::*;
pub use color::*;
pub use diagram::*;
pub use file::*;
pub use game::*;
pub use notation::*;
pub use outcome::*;
pub use piece::*;
pub use r#move::*;
pub use rank::*;
pub use role::*;
pub use square::*;
