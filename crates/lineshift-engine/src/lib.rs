pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("line index {index} is outside the board")]
pub struct LineIndexOutOfRange {
    pub index: usize,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum TurnRejected {
    #[display("game is over")]
    GameOver,
    #[display("cannot shift {line} {direction}")]
    DirectionMismatch {
        line: LineSelector,
        direction: Direction,
    },
}
