pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CannonConfigError {
    #[display("chance range must be greater than zero")]
    ZeroChanceRange,
    #[display("luck rating {luck_rating} exceeds chance range {chance_range}")]
    LuckRatingOutOfRange { luck_rating: u32, chance_range: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridParseError {
    #[display("invalid bubble character {ch:?} at row {row}, column {column}")]
    InvalidBubble { ch: char, row: usize, column: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {input} ({source})")]
    InvalidDigit {
        input: String,
        source: std::num::ParseIntError,
    },
}
