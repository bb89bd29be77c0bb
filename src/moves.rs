use core::fmt;
use std::str::FromStr;

use crate::search_grid::Cell;
use crate::{C, D};

/// One of the six moves available on the grid. The declaration order is the order in which
/// successors are generated and therefore decides tie-breaking for every search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Right,
    Bottom,
    BottomRight,
    Left,
    TopLeft,
}

impl Move {
    /// All moves in successor generation order.
    pub const ALL: [Move; 6] = [
        Move::Up,
        Move::Right,
        Move::Bottom,
        Move::BottomRight,
        Move::Left,
        Move::TopLeft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "Up",
            Move::Right => "Right",
            Move::Bottom => "Bottom",
            Move::BottomRight => "Bottom-Right",
            Move::Left => "Left",
            Move::TopLeft => "Top-Left",
        }
    }

    /// Offset as `(Δrow, Δcol)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Bottom => (1, 0),
            Move::BottomRight => (1, 1),
            Move::Left => (0, -1),
            Move::TopLeft => (-1, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(self, Move::BottomRight | Move::TopLeft)
    }

    /// Integer cost of the move, C for orthogonal and D for diagonal moves.
    pub fn cost(self) -> i32 {
        if self.is_diagonal() {
            D
        } else {
            C
        }
    }

    /// The move that undoes this one.
    pub fn inverse(self) -> Move {
        match self {
            Move::Up => Move::Bottom,
            Move::Bottom => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
            Move::TopLeft => Move::BottomRight,
            Move::BottomRight => Move::TopLeft,
        }
    }

    /// The cell reached by taking this move from `cell`, without any bounds check.
    pub fn apply(self, cell: Cell) -> Cell {
        let (d_row, d_col) = self.delta();
        Cell::new(cell.x + d_col, cell.y + d_row)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string is not the name of a [Move].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseMoveError(pub String);

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown move: {}", self.0)
    }
}

impl std::error::Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ParseMoveError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_grid::cell;

    #[test]
    fn inverse_is_involution() {
        for m in Move::ALL {
            assert_eq!(m.inverse().inverse(), m);
            assert_ne!(m.inverse(), m);
        }
    }

    #[test]
    fn inverse_undoes_move() {
        let start = cell(2, 2);
        for m in Move::ALL {
            assert_eq!(m.inverse().apply(m.apply(start)), start);
        }
    }

    #[test]
    fn diagonal_moves_cost_more() {
        assert_eq!(Move::Up.cost(), C);
        assert_eq!(Move::TopLeft.cost(), D);
        assert!(Move::BottomRight.cost() > Move::Right.cost());
    }

    #[test]
    fn names_round_trip() {
        assert_eq!("Bottom-Right".parse::<Move>(), Ok(Move::BottomRight));
        assert_eq!(Move::TopLeft.to_string(), "Top-Left");
        assert!("Down".parse::<Move>().is_err());
    }

    #[test]
    fn apply_uses_row_and_column() {
        assert_eq!(Move::Up.apply(cell(3, 1)), cell(2, 1));
        assert_eq!(Move::Right.apply(cell(3, 1)), cell(3, 2));
        assert_eq!(Move::BottomRight.apply(cell(0, 0)), cell(1, 1));
    }
}
