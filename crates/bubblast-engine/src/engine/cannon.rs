use std::mem;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::grid::BoardQuery;

use super::{
    config::CannonConfig,
    seed::CannonSeed,
    selection::{SelectionPolicy, SelectionSource},
};

/// The bubble cannon: holds the bubble about to be fired and the one after it.
///
/// Both slots are filled as soon as the cannon is built and are never empty
/// afterwards. Every new bubble comes from the [`SelectionPolicy`], which looks
/// at the board the cannon is bound to.
///
/// The cannon only reads the board. To keep it bound to a board the game is
/// still changing, hand it a shared handle such as `Rc<RefCell<BubbleGrid>>`
/// (see [`BoardQuery`]). The board must not be mutably borrowed while
/// [`BubbleCannon::reload`] runs.
///
/// # Example
///
/// ```
/// use bubblast_engine::{Bubble, BubbleCannon, BubbleColor, BubbleGrid, CannonConfig, CannonSeed};
///
/// let grid: BubbleGrid = "RRRR\nG".parse().unwrap();
/// let config = CannonConfig::always_lucky(100).unwrap();
/// let mut cannon = BubbleCannon::with_seed(&grid, config, CannonSeed::from_u64(42));
///
/// let next = *cannon.next();
/// let fired = cannon.reload();
/// assert_eq!(*cannon.current(), next);
/// assert_eq!(*cannon.next(), Bubble::Colored(BubbleColor::Red));
/// # let _ = fired;
/// ```
#[derive(Debug, Clone)]
pub struct BubbleCannon<B, R = Pcg32>
where
    B: BoardQuery,
{
    board: B,
    rng: R,
    policy: SelectionPolicy,
    current: B::Piece,
    next: B::Piece,
    last_source: SelectionSource,
}

impl<B> BubbleCannon<B>
where
    B: BoardQuery,
{
    /// Creates a cannon with the default config and a random seed.
    ///
    /// For reproducible bubbles, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(board: B) -> Self {
        Self::with_seed(board, CannonConfig::DEFAULT, rand::rng().random())
    }

    /// Like [`Self::new`], but with an explicit config and seed.
    #[must_use]
    pub fn with_seed(board: B, config: CannonConfig, seed: CannonSeed) -> Self {
        Self::with_rng(board, config, Pcg32::from_seed(seed.to_bytes()))
    }
}

impl<B, R> BubbleCannon<B, R>
where
    B: BoardQuery,
    R: Rng,
{
    /// Creates a cannon drawing from the given generator.
    ///
    /// The current bubble is generated first, then the next one.
    #[must_use]
    pub fn with_rng(board: B, config: CannonConfig, mut rng: R) -> Self {
        let policy = SelectionPolicy::new(config);
        let current = policy.generate(&board, &mut rng);
        let next = policy.generate(&board, &mut rng);
        tracing::debug!(
            chance_range = config.chance_range(),
            luck_rating = config.luck_rating(),
            current = ?current.source,
            next = ?next.source,
            "cannon loaded"
        );
        Self {
            board,
            rng,
            policy,
            current: current.piece,
            next: next.piece,
            last_source: next.source,
        }
    }

    /// The bubble that will be fired.
    #[must_use]
    pub fn current(&self) -> &B::Piece {
        &self.current
    }

    /// The bubble loaded after [`Self::current`].
    #[must_use]
    pub fn next(&self) -> &B::Piece {
        &self.next
    }

    /// Exchanges the current and next bubbles. No bubble is generated.
    pub fn swap(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
        tracing::debug!("swapped current and next bubble");
    }

    /// Moves the next bubble into the current slot and generates a new next bubble.
    ///
    /// Returns the bubble that was current before the reload, i.e. the one the
    /// caller just fired.
    pub fn reload(&mut self) -> B::Piece {
        let selection = self.policy.generate(&self.board, &mut self.rng);
        self.last_source = selection.source;
        tracing::debug!(source = ?selection.source, "cannon reloaded");
        let promoted = mem::replace(&mut self.next, selection.piece);
        mem::replace(&mut self.current, promoted)
    }

    #[must_use]
    pub fn board(&self) -> &B {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &CannonConfig {
        self.policy.config()
    }

    /// How the most recently generated bubble was chosen.
    #[must_use]
    pub fn last_source(&self) -> SelectionSource {
        self.last_source
    }
}
