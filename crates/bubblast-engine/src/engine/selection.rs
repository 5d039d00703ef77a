use rand::Rng;
use serde::Serialize;

use crate::core::{bubble::CannonPiece, color::BubbleColor, grid::BoardQuery};

use super::config::CannonConfig;

/// How a generated piece was chosen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    /// Unlucky draw: uniformly random color.
    Random,
    /// Lucky draw: most common color on the board.
    MostCommon,
    /// Lucky draw on a board without any colored piece: uniformly random color.
    EmptyBoardFallback,
}

/// A freshly generated piece together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<P> {
    pub piece: P,
    pub source: SelectionSource,
}

/// Number of colored pieces of each color on a board.
///
/// # Example
///
/// ```
/// use bubblast_engine::{BubbleColor, BubbleGrid, ColorFrequencies};
///
/// let grid: BubbleGrid = "RRB\nBB*".parse().unwrap();
/// let freq = ColorFrequencies::count(&grid);
/// assert_eq!(freq.get(BubbleColor::Red), 2);
/// assert_eq!(freq.get(BubbleColor::Blue), 3);
/// assert_eq!(freq.total(), 5);
/// assert_eq!(freq.most_common(), Some(BubbleColor::Blue));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorFrequencies {
    counts: [usize; BubbleColor::LEN],
}

impl ColorFrequencies {
    /// Counts the colored pieces on `board`.
    ///
    /// Positions that turn out to be empty and pieces without a color are skipped.
    #[must_use]
    pub fn count<B>(board: &B) -> Self
    where
        B: BoardQuery + ?Sized,
    {
        let mut this = Self::default();
        for pos in board.occupied_positions() {
            let Some(color) = board.piece_at(&pos).and_then(|piece| piece.color()) else {
                continue;
            };
            this.counts[color.index()] += 1;
        }
        this
    }

    #[must_use]
    pub fn get(&self, color: BubbleColor) -> usize {
        self.counts[color.index()]
    }

    /// Total number of colored pieces counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BubbleColor, usize)> + '_ {
        BubbleColor::ALL.into_iter().map(|color| (color, self.get(color)))
    }

    /// Returns the color with the highest count.
    ///
    /// Ties go to the color listed first in [`BubbleColor::ALL`]. Returns `None`
    /// when no colored piece was counted at all.
    #[must_use]
    pub fn most_common(&self) -> Option<BubbleColor> {
        let mut best: Option<(BubbleColor, usize)> = None;
        for (color, count) in self.iter() {
            if count == 0 {
                continue;
            }
            if best.is_none_or(|(_, max)| count > max) {
                best = Some((color, count));
            }
        }
        best.map(|(color, _)| color)
    }
}

/// Serialized as a map from color character to count, e.g. `{"R":5,"B":2,"O":0,"G":0}`.
impl Serialize for ColorFrequencies {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Decides which piece the cannon loads next.
///
/// The policy is stateless: every call draws from the given generator and
/// reads the board, nothing is remembered between calls.
///
/// 1. Draw `n` in `[0, chance_range)`. `n < luck_rating` is a lucky draw.
/// 2. Unlucky: draw a color uniformly.
/// 3. Lucky: count colors on the board and take the most common one, falling
///    back to a uniform color when the board holds no colored piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    config: CannonConfig,
}

impl SelectionPolicy {
    #[must_use]
    pub const fn new(config: CannonConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CannonConfig {
        &self.config
    }

    /// Runs the luck check alone.
    pub fn is_lucky<R>(&self, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        rng.random_range(0..self.config.chance_range()) < self.config.luck_rating()
    }

    /// Generates a new piece for `board`.
    pub fn generate<B, R>(&self, board: &B, rng: &mut R) -> Selection<B::Piece>
    where
        B: BoardQuery + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.is_lucky(rng) {
            let color = random_color(rng);
            tracing::trace!(?color, "unlucky draw, random color");
            return Selection {
                piece: B::Piece::colored(color),
                source: SelectionSource::Random,
            };
        }

        let frequencies = ColorFrequencies::count(board);
        if let Some(color) = frequencies.most_common() {
            tracing::trace!(?color, ?frequencies, "lucky draw, most common color");
            return Selection {
                piece: B::Piece::colored(color),
                source: SelectionSource::MostCommon,
            };
        }

        let color = random_color(rng);
        tracing::trace!(?color, "lucky draw on a board without colored pieces");
        Selection {
            piece: B::Piece::colored(color),
            source: SelectionSource::EmptyBoardFallback,
        }
    }
}

/// Draws a color uniformly from [`BubbleColor::ALL`].
pub fn random_color<R>(rng: &mut R) -> BubbleColor
where
    R: Rng + ?Sized,
{
    rng.random()
}
