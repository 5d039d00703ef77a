pub use self::{bubble::*, color::*, grid::*};

pub(crate) mod bubble;
pub(crate) mod color;
pub(crate) mod grid;
