use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SeedParseError;

/// Seed for the cannon's random number generator.
///
/// This is a 128-bit (16-byte) seed for the [`Pcg32`](rand_pcg::Pcg32) generator
/// a [`BubbleCannon`](crate::BubbleCannon) draws from. Two cannons built with
/// the same seed, config and board contents load the same bubbles, which makes
/// sessions reproducible and tests deterministic.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use bubblast_engine::CannonSeed;
/// use rand::Rng as _;
///
/// let seed: CannonSeed = rand::rng().random();
/// let json = serde_json::to_string(&seed).unwrap();
/// assert_eq!(json.len(), 34);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CannonSeed([u8; 16]);

impl CannonSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a small integer into a full seed.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self((value as u128).to_be_bytes())
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for CannonSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for CannonSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::InvalidLength { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|source| SeedParseError::InvalidDigit {
            input: s.to_owned(),
            source,
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for CannonSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CannonSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `CannonSeed` values with `rng.random()`.
impl Distribution<CannonSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CannonSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        CannonSeed(seed)
    }
}
