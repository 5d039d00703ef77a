use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Color of a colored bubble.
///
/// The declaration order is significant: [`BubbleColor::ALL`] lists the colors
/// in this order, and that list is used both to map a uniform random index to a
/// color and to break ties when looking for the most common color on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BubbleColor {
    Red = 0,
    Blue = 1,
    Orange = 2,
    Green = 3,
}

/// Draws a color uniformly: an index in `[0, LEN)` mapped through [`BubbleColor::ALL`].
impl Distribution<BubbleColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BubbleColor {
        BubbleColor::ALL[rng.random_range(0..BubbleColor::LEN)]
    }
}

impl BubbleColor {
    /// Number of colors (4).
    pub const LEN: usize = 4;

    /// All colors in index order.
    pub const ALL: [Self; Self::LEN] = [Self::Red, Self::Blue, Self::Orange, Self::Green];

    /// Returns the position of this color in [`BubbleColor::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the color at `index` in [`BubbleColor::ALL`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bubblast_engine::BubbleColor;
    ///
    /// assert_eq!(BubbleColor::from_index(0), Some(BubbleColor::Red));
    /// assert_eq!(BubbleColor::from_index(3), Some(BubbleColor::Green));
    /// assert_eq!(BubbleColor::from_index(4), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            BubbleColor::Red => 'R',
            BubbleColor::Blue => 'B',
            BubbleColor::Orange => 'O',
            BubbleColor::Green => 'G',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(BubbleColor::Red),
            'B' => Some(BubbleColor::Blue),
            'O' => Some(BubbleColor::Orange),
            'G' => Some(BubbleColor::Green),
            _ => None,
        }
    }
}

impl Serialize for BubbleColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.as_char())
    }
}

impl<'de> Deserialize<'de> for BubbleColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = char::deserialize(deserializer)?;
        Self::from_char(c)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid bubble color: {c}")))
    }
}
