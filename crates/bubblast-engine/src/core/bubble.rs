use serde::{Deserialize, Serialize};

use super::color::BubbleColor;

/// Capabilities the cannon needs from whatever piece type the game uses.
///
/// The selection policy only ever asks whether a piece is colored and, if so,
/// which color it has. It creates new pieces through [`CannonPiece::colored`].
pub trait CannonPiece: Clone {
    /// Returns the color of this piece, or `None` for non-colored pieces.
    fn color(&self) -> Option<BubbleColor>;

    /// Creates a new colored piece.
    fn colored(color: BubbleColor) -> Self;

    fn is_colored(&self) -> bool {
        self.color().is_some()
    }
}

/// Non-colored bubble variants.
///
/// These never match by color and are ignored when counting colors on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialBubble {
    /// Cannot be popped by matching.
    Indestructible,
    /// Clears the whole row it sits in.
    Lightning,
    /// Clears its neighbors.
    Bomb,
    /// Clears every bubble of the color that hits it.
    Star,
}

impl SpecialBubble {
    pub const ALL: [Self; 4] = [Self::Indestructible, Self::Lightning, Self::Bomb, Self::Star];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            SpecialBubble::Indestructible => '#',
            SpecialBubble::Lightning => '!',
            SpecialBubble::Bomb => '*',
            SpecialBubble::Star => '$',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(SpecialBubble::Indestructible),
            '!' => Some(SpecialBubble::Lightning),
            '*' => Some(SpecialBubble::Bomb),
            '$' => Some(SpecialBubble::Star),
            _ => None,
        }
    }
}

/// A bubble placed on the board or loaded into the cannon.
///
/// # Example
///
/// ```
/// use bubblast_engine::{Bubble, BubbleColor, CannonPiece as _, SpecialBubble};
///
/// let red = Bubble::colored(BubbleColor::Red);
/// assert!(red.is_colored());
/// assert_eq!(red.color(), Some(BubbleColor::Red));
///
/// let bomb = Bubble::Special(SpecialBubble::Bomb);
/// assert!(!bomb.is_colored());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bubble {
    Colored(BubbleColor),
    Special(SpecialBubble),
}

impl CannonPiece for Bubble {
    fn color(&self) -> Option<BubbleColor> {
        match self {
            Bubble::Colored(color) => Some(*color),
            Bubble::Special(_) => None,
        }
    }

    fn colored(color: BubbleColor) -> Self {
        Bubble::Colored(color)
    }
}

impl Bubble {
    /// Returns the single character representation of this bubble.
    ///
    /// Colored bubbles use their color character; special bubbles use a symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use bubblast_engine::{Bubble, BubbleColor, SpecialBubble};
    ///
    /// assert_eq!(Bubble::Colored(BubbleColor::Blue).as_char(), 'B');
    /// assert_eq!(Bubble::Special(SpecialBubble::Star).as_char(), '$');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Bubble::Colored(color) => color.as_char(),
            Bubble::Special(special) => special.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if let Some(color) = BubbleColor::from_char(c) {
            return Some(Bubble::Colored(color));
        }
        match SpecialBubble::from_char(c) {
            Some(special) => Some(Bubble::Special(special)),
            None => None,
        }
    }
}

impl Serialize for Bubble {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.as_char())
    }
}

impl<'de> Deserialize<'de> for Bubble {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let c = char::deserialize(deserializer)?;
        Self::from_char(c).ok_or_else(|| serde::de::Error::custom(format!("invalid bubble: {c}")))
    }
}
