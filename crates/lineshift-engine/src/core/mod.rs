pub use self::{board::*, merge::*, shift::*};

pub(crate) mod board;
pub(crate) mod merge;
pub(crate) mod shift;
