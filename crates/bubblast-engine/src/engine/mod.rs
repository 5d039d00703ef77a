//! Cannon logic: which bubbles get loaded and in what order.
//!
//! - [`BubbleCannon`] - Holds the current and next bubble, swaps and reloads them
//! - [`SelectionPolicy`] - Biased random choice of each newly loaded bubble
//! - [`ColorFrequencies`] - Per-color bubble count of a board
//! - [`CannonConfig`] - Luck rating and chance range of the policy
//! - [`CannonSeed`] - Seed for deterministic bubble generation
//!
//! # Game Flow
//!
//! 1. Bind a [`BubbleCannon`] to the board when the session starts
//! 2. Show [`BubbleCannon::current`] and [`BubbleCannon::next`] to the player
//! 3. Optionally [`BubbleCannon::swap`] them
//! 4. Fire the current bubble, place it on the board, then [`BubbleCannon::reload`]
//!
//! # Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use bubblast_engine::{BubbleCannon, BubbleGrid, CannonConfig, CannonSeed, GridPosition};
//!
//! let board = Rc::new(RefCell::new(BubbleGrid::new()));
//! let mut cannon = BubbleCannon::with_seed(
//!     Rc::clone(&board),
//!     CannonConfig::DEFAULT,
//!     CannonSeed::from_u64(7),
//! );
//!
//! for column in 0..3 {
//!     let fired = cannon.reload();
//!     board.borrow_mut().insert(GridPosition::new(0, column), fired);
//! }
//! assert_eq!(board.borrow().len(), 3);
//! ```

pub use self::{cannon::*, config::*, seed::*, selection::*};

mod cannon;
mod config;
mod seed;
mod selection;
