use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::GridParseError;

use super::bubble::{Bubble, CannonPiece};

/// Read-only view of a board, as seen by the cannon.
///
/// The cannon calls [`BoardQuery::occupied_positions`] once per lucky draw and
/// then [`BoardQuery::piece_at`] for every returned position. It never mutates
/// the board.
///
/// Implementations are provided for shared handles (`&T`, `Rc<T>`, `Arc<T>`,
/// `RefCell<T>`) so a cannon can stay bound to a board that the game keeps
/// updating between reloads.
pub trait BoardQuery {
    type Position;
    type Piece: CannonPiece;

    /// Returns every position that currently holds a piece, in no particular order.
    fn occupied_positions(&self) -> Vec<Self::Position>;

    /// Returns the piece at `position`, or `None` if the position is empty.
    fn piece_at(&self, position: &Self::Position) -> Option<Self::Piece>;
}

impl<T> BoardQuery for &T
where
    T: BoardQuery + ?Sized,
{
    type Position = T::Position;
    type Piece = T::Piece;

    fn occupied_positions(&self) -> Vec<Self::Position> {
        (**self).occupied_positions()
    }

    fn piece_at(&self, position: &Self::Position) -> Option<Self::Piece> {
        (**self).piece_at(position)
    }
}

impl<T> BoardQuery for Rc<T>
where
    T: BoardQuery + ?Sized,
{
    type Position = T::Position;
    type Piece = T::Piece;

    fn occupied_positions(&self) -> Vec<Self::Position> {
        (**self).occupied_positions()
    }

    fn piece_at(&self, position: &Self::Position) -> Option<Self::Piece> {
        (**self).piece_at(position)
    }
}

impl<T> BoardQuery for Arc<T>
where
    T: BoardQuery + ?Sized,
{
    type Position = T::Position;
    type Piece = T::Piece;

    fn occupied_positions(&self) -> Vec<Self::Position> {
        (**self).occupied_positions()
    }

    fn piece_at(&self, position: &Self::Position) -> Option<Self::Piece> {
        (**self).piece_at(position)
    }
}

/// Panics if the board is mutably borrowed while the cannon reads it.
impl<T> BoardQuery for RefCell<T>
where
    T: BoardQuery,
{
    type Position = T::Position;
    type Piece = T::Piece;

    fn occupied_positions(&self) -> Vec<Self::Position> {
        self.borrow().occupied_positions()
    }

    fn piece_at(&self, position: &Self::Position) -> Option<Self::Piece> {
        self.borrow().piece_at(position)
    }
}

/// Cell coordinate on a [`BubbleGrid`], row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    row: usize,
    column: usize,
}

impl GridPosition {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }
}

/// Simple in-memory board of placed bubbles.
///
/// Only stores occupied cells; the grid has no fixed size. It is enough to
/// drive a [`BubbleCannon`](crate::BubbleCannon) in tests and in the CLI.
///
/// # Text form
///
/// One line per row, one character per cell. `.` is an empty cell, colored
/// bubbles use `R`, `B`, `O`, `G`, and special bubbles use `#`, `!`, `*`, `$`.
///
/// # Example
///
/// ```
/// use bubblast_engine::{Bubble, BubbleColor, BubbleGrid, GridPosition};
///
/// let grid: BubbleGrid = "RRB\n.G*".parse().unwrap();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(
///     grid.get(GridPosition::new(1, 1)),
///     Some(Bubble::Colored(BubbleColor::Green))
/// );
/// assert_eq!(grid.get(GridPosition::new(1, 0)), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BubbleGrid {
    bubbles: BTreeMap<GridPosition, Bubble>,
}

impl BubbleGrid {
    const EMPTY_CELL: char = '.';

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a bubble, returning the one it replaced.
    pub fn insert(&mut self, position: GridPosition, bubble: Bubble) -> Option<Bubble> {
        self.bubbles.insert(position, bubble)
    }

    pub fn remove(&mut self, position: GridPosition) -> Option<Bubble> {
        self.bubbles.remove(&position)
    }

    #[must_use]
    pub fn get(&self, position: GridPosition) -> Option<Bubble> {
        self.bubbles.get(&position).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, Bubble)> + '_ {
        self.bubbles.iter().map(|(&pos, &bubble)| (pos, bubble))
    }

    /// Parses a grid from row strings.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, GridParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut grid = Self::new();
        for (row, line) in rows.into_iter().enumerate() {
            for (column, ch) in line.as_ref().chars().enumerate() {
                if ch == Self::EMPTY_CELL {
                    continue;
                }
                let bubble =
                    Bubble::from_char(ch).ok_or(GridParseError::InvalidBubble { ch, row, column })?;
                grid.insert(GridPosition::new(row, column), bubble);
            }
        }
        Ok(grid)
    }

    /// Returns the grid as row strings, trimmed after the last bubble of each row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        let mut rows: Vec<String> = vec![];
        for (pos, bubble) in self.iter() {
            if rows.len() <= pos.row {
                rows.resize(pos.row + 1, String::new());
            }
            let line = &mut rows[pos.row];
            let width = line.chars().count();
            line.extend(std::iter::repeat_n(Self::EMPTY_CELL, pos.column - width));
            line.push(bubble.as_char());
        }
        rows
    }
}

impl BoardQuery for BubbleGrid {
    type Position = GridPosition;
    type Piece = Bubble;

    fn occupied_positions(&self) -> Vec<GridPosition> {
        self.bubbles.keys().copied().collect()
    }

    fn piece_at(&self, position: &GridPosition) -> Option<Bubble> {
        self.get(*position)
    }
}

impl FromStr for BubbleGrid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s.lines())
    }
}

impl fmt::Display for BubbleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct GridRows {
    rows: Vec<String>,
}

impl Serialize for BubbleGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        GridRows {
            rows: self.to_rows(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BubbleGrid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let GridRows { rows } = GridRows::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BubbleColor, SpecialBubble};

    use super::*;

    #[test]
    fn test_parse_skips_empty_cells() {
        let grid: BubbleGrid = "R.B\n...\n..$".parse().unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(
            grid.get(GridPosition::new(0, 2)),
            Some(Bubble::Colored(BubbleColor::Blue))
        );
        assert_eq!(
            grid.get(GridPosition::new(2, 2)),
            Some(Bubble::Special(SpecialBubble::Star))
        );
    }

    #[test]
    fn test_parse_reports_position_of_invalid_char() {
        let err = "RR\nRx".parse::<BubbleGrid>().unwrap_err();
        assert_eq!(
            err,
            GridParseError::InvalidBubble {
                ch: 'x',
                row: 1,
                column: 1
            }
        );
    }

    #[test]
    fn test_to_rows_pads_and_trims() {
        let mut grid = BubbleGrid::new();
        grid.insert(GridPosition::new(0, 3), Bubble::Colored(BubbleColor::Red));
        grid.insert(GridPosition::new(2, 0), Bubble::Special(SpecialBubble::Bomb));
        assert_eq!(grid.to_rows(), vec!["...R", "", "*"]);
        assert_eq!(grid.to_string(), "...R\n\n*");
    }

    #[test]
    fn test_board_query_lists_every_occupied_position() {
        let grid: BubbleGrid = "RG\n.O".parse().unwrap();
        let positions = grid.occupied_positions();
        assert_eq!(
            positions,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(0, 1),
                GridPosition::new(1, 1),
            ]
        );
        for pos in &positions {
            assert!(grid.piece_at(pos).is_some());
        }
        assert_eq!(grid.piece_at(&GridPosition::new(1, 0)), None);
    }

    #[test]
    fn test_shared_handles_see_updates() {
        let grid = Rc::new(RefCell::new(BubbleGrid::new()));
        let handle = Rc::clone(&grid);
        assert!(handle.occupied_positions().is_empty());

        grid.borrow_mut()
            .insert(GridPosition::new(0, 0), Bubble::Colored(BubbleColor::Green));
        assert_eq!(handle.occupied_positions().len(), 1);
        assert_eq!(
            handle.piece_at(&GridPosition::new(0, 0)),
            Some(Bubble::Colored(BubbleColor::Green))
        );
    }

    #[test]
    fn test_insert_and_remove() {
        let mut grid = BubbleGrid::new();
        let pos = GridPosition::new(4, 2);
        assert_eq!(grid.insert(pos, Bubble::Colored(BubbleColor::Red)), None);
        assert_eq!(
            grid.insert(pos, Bubble::Colored(BubbleColor::Blue)),
            Some(Bubble::Colored(BubbleColor::Red))
        );
        assert_eq!(grid.remove(pos), Some(Bubble::Colored(BubbleColor::Blue)));
        assert!(grid.is_empty());
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize_as_rows() {
            let grid: BubbleGrid = "RB\n.#".parse().unwrap();
            let json = serde_json::to_string(&grid).unwrap();
            assert_eq!(json, r#"{"rows":["RB",".#"]}"#);
        }

        #[test]
        fn test_deserialize_rows() {
            let grid: BubbleGrid = serde_json::from_str(r#"{"rows":["OO","..G"]}"#).unwrap();
            assert_eq!(grid.len(), 3);
            assert_eq!(
                grid.get(GridPosition::new(1, 2)),
                Some(Bubble::Colored(BubbleColor::Green))
            );
        }

        #[test]
        fn test_deserialize_invalid_char() {
            let result: Result<BubbleGrid, _> = serde_json::from_str(r#"{"rows":["R?"]}"#);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid bubble character"));
        }
    }
}
