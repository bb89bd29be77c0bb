use core::fmt;
use std::rc::Rc;

use itertools::Itertools;

use crate::moves::Move;
use crate::search_grid::{Cell, SearchGrid, Successor};
use crate::convert_cost_to_unit_cost_float;

/// A node of a search tree. Nodes are immutable once created; children share their parent
/// through an [Rc], so a node lives as long as some frontier or explored structure of the run
/// still reaches it.
#[derive(Debug)]
pub struct SearchNode {
    pub state: Cell,
    pub parent: Option<Rc<SearchNode>>,
    pub action: Option<Move>,
    /// Cumulative cost from the root in integer units, see [crate::C] and [crate::D].
    pub cost: i32,
    pub depth: usize,
}

impl SearchNode {
    pub fn root(state: Cell) -> Rc<SearchNode> {
        Rc::new(SearchNode {
            state,
            parent: None,
            action: None,
            cost: 0,
            depth: 0,
        })
    }

    /// Creates the node reached from `parent` through `successor`.
    pub fn child(parent: &Rc<SearchNode>, successor: &Successor) -> Rc<SearchNode> {
        Rc::new(SearchNode {
            state: successor.cell,
            parent: Some(Rc::clone(parent)),
            action: Some(successor.action),
            cost: parent.cost + successor.cost,
            depth: parent.depth + 1,
        })
    }

    /// Iterates from this node up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &SearchNode> {
        std::iter::successors(Some(self), |n| n.parent.as_deref())
    }
}

/// Follows the parent links of `node` back to the root and returns the actions in start to goal
/// order. The root itself yields the empty path.
pub fn reconstruct_path(node: &SearchNode) -> Path {
    let mut moves: Vec<Move> = node.ancestors().filter_map(|n| n.action).collect();
    moves.reverse();
    Path(moves)
}

/// Sequence of moves leading from the start to the goal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(pub Vec<Move>);

impl Path {
    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Total integer cost of the path.
    pub fn cost(&self) -> i32 {
        self.0.iter().map(|m| m.cost()).sum()
    }

    /// Total cost where orthogonal moves cost 1.0.
    pub fn cost_float(&self) -> f64 {
        convert_cost_to_unit_cost_float(self.cost())
    }

    /// The cells visited when following the path from `start`, including `start` itself.
    pub fn cells(&self, start: Cell) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.0.len() + 1);
        cells.push(start);
        let mut current = start;
        for m in &self.0 {
            current = m.apply(current);
            cells.push(current);
        }
        cells
    }

    /// Follows the path from `start` on `grid`. Returns the final cell, or [None] if some move
    /// leaves the grid or enters a blocked cell.
    pub fn replay(&self, start: Cell, grid: &SearchGrid) -> Option<Cell> {
        self.0.iter().try_fold(start, |current, m| {
            let next = m.apply(current);
            grid.can_move_to(next).then_some(next)
        })
    }
}

impl FromIterator<Move> for Path {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}
