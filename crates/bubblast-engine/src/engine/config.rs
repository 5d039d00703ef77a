use serde::{Deserialize, Serialize};

use crate::CannonConfigError;

/// Tuning constants of the cannon's selection policy.
///
/// Each generation first draws a number in `[0, chance_range)`. Draws below
/// `luck_rating` are lucky and produce the most common color on the board;
/// the rest produce a uniformly random color. The lucky branch is therefore
/// taken with probability `luck_rating / chance_range`.
///
/// Invariants: `chance_range > 0` and `luck_rating <= chance_range`. Both
/// [`CannonConfig::new`] and deserialization enforce them.
///
/// # Example
///
/// ```
/// use bubblast_engine::CannonConfig;
///
/// let config = CannonConfig::new(100, 30).unwrap();
/// assert_eq!(config, CannonConfig::DEFAULT);
/// assert!((config.luck_probability() - 0.3).abs() < f64::EPSILON);
///
/// assert!(CannonConfig::new(100, 101).is_err());
/// assert!(CannonConfig::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CannonConfig {
    chance_range: u32,
    luck_rating: u32,
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CannonConfig {
    pub const DEFAULT_CHANCE_RANGE: u32 = 100;
    pub const DEFAULT_LUCK_RATING: u32 = 30;

    pub const DEFAULT: Self = Self {
        chance_range: Self::DEFAULT_CHANCE_RANGE,
        luck_rating: Self::DEFAULT_LUCK_RATING,
    };

    pub const fn new(chance_range: u32, luck_rating: u32) -> Result<Self, CannonConfigError> {
        if chance_range == 0 {
            return Err(CannonConfigError::ZeroChanceRange);
        }
        if luck_rating > chance_range {
            return Err(CannonConfigError::LuckRatingOutOfRange {
                luck_rating,
                chance_range,
            });
        }
        Ok(Self {
            chance_range,
            luck_rating,
        })
    }

    /// Every draw is lucky (the most-common-color branch, unless the board has no colored bubble).
    pub const fn always_lucky(chance_range: u32) -> Result<Self, CannonConfigError> {
        Self::new(chance_range, chance_range)
    }

    /// Every draw is unlucky (uniformly random color).
    pub const fn never_lucky(chance_range: u32) -> Result<Self, CannonConfigError> {
        Self::new(chance_range, 0)
    }

    #[must_use]
    pub const fn chance_range(&self) -> u32 {
        self.chance_range
    }

    #[must_use]
    pub const fn luck_rating(&self) -> u32 {
        self.luck_rating
    }

    /// Probability that a single draw takes the lucky branch.
    #[must_use]
    pub fn luck_probability(&self) -> f64 {
        f64::from(self.luck_rating) / f64::from(self.chance_range)
    }
}

impl<'de> Deserialize<'de> for CannonConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            #[serde(default = "default_chance_range")]
            chance_range: u32,
            #[serde(default = "default_luck_rating")]
            luck_rating: u32,
        }

        fn default_chance_range() -> u32 {
            CannonConfig::DEFAULT_CHANCE_RANGE
        }

        fn default_luck_rating() -> u32 {
            CannonConfig::DEFAULT_LUCK_RATING
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.chance_range, raw.luck_rating).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_accepted() {
        let never = CannonConfig::never_lucky(100).unwrap();
        assert_eq!(never.luck_rating(), 0);
        assert!(never.luck_probability().abs() < f64::EPSILON);

        let always = CannonConfig::always_lucky(100).unwrap();
        assert_eq!(always.luck_rating(), 100);
        assert!((always.luck_probability() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert_eq!(
            CannonConfig::new(0, 0),
            Err(CannonConfigError::ZeroChanceRange)
        );
        assert_eq!(
            CannonConfig::new(10, 11),
            Err(CannonConfigError::LuckRatingOutOfRange {
                luck_rating: 11,
                chance_range: 10,
            })
        );
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize_fields() {
            let json = serde_json::to_string(&CannonConfig::DEFAULT).unwrap();
            assert_eq!(json, r#"{"chance_range":100,"luck_rating":30}"#);
        }

        #[test]
        fn test_missing_fields_use_defaults() {
            let config: CannonConfig = serde_json::from_str(r#"{"luck_rating":50}"#).unwrap();
            assert_eq!(config.chance_range(), 100);
            assert_eq!(config.luck_rating(), 50);

            let config: CannonConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(config, CannonConfig::DEFAULT);
        }

        #[test]
        fn test_deserialize_validates() {
            let result: Result<CannonConfig, _> =
                serde_json::from_str(r#"{"chance_range":10,"luck_rating":20}"#);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("exceeds chance range"));

            let result: Result<CannonConfig, _> = serde_json::from_str(r#"{"chance_range":0}"#);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("greater than zero"));
        }

        #[test]
        fn test_deserialize_rejects_unknown_fields() {
            let result: Result<CannonConfig, _> = serde_json::from_str(r#"{"luck":1}"#);
            assert!(result.is_err());
        }
    }
}
