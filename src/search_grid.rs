use core::fmt;

use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::moves::Move;
use crate::N_SMALLVEC_SIZE;

/// A cell on the grid. `y` holds the row and `x` the column.
pub type Cell = Point;

/// Builds the [Cell] at `(row, col)`.
pub fn cell(row: i32, col: i32) -> Cell {
    Point::new(col, row)
}

/// A neighbouring cell together with the move that reaches it and the cost of that move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Successor {
    pub cell: Cell,
    pub action: Move,
    pub cost: i32,
}

/// [SearchGrid] describes the space searched: a `rows` × `cols` rectangle in which some cells may
/// be blocked. Blocked cells are `true` in the underlying [BoolGrid], whose width is the number of
/// columns. It also maintains connected components using a [UnionFind] structure so that
/// reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct SearchGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl SearchGrid {
    /// An empty grid without blocked cells.
    pub fn new(rows: usize, cols: usize) -> SearchGrid {
        let mut grid = SearchGrid {
            grid: BoolGrid::new(cols, rows, false),
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Builder variant of [set_blocked](Self::set_blocked) for a batch of cells. Components are
    /// regenerated once at the end.
    pub fn with_blocked<I>(mut self, cells: I) -> SearchGrid
    where
        I: IntoIterator<Item = Cell>,
    {
        for c in cells {
            if self.in_bounds(c) {
                self.grid.set(c.x, c.y, true);
            }
        }
        self.generate_components();
        self
    }

    pub fn rows(&self) -> usize {
        self.grid.height()
    }

    pub fn cols(&self) -> usize {
        self.grid.width()
    }

    /// `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn in_bounds(&self, c: Cell) -> bool {
        self.grid.point_in_bounds(c)
    }

    /// Whether `c` is a wall. Cells off the grid are not blocked, merely out of bounds.
    pub fn is_blocked(&self, c: Cell) -> bool {
        self.in_bounds(c) && self.grid.get_point(c)
    }

    pub fn can_move_to(&self, c: Cell) -> bool {
        self.in_bounds(c) && !self.grid.get_point(c)
    }

    /// Generates the successors of `c` in the fixed [Move::ALL] order, skipping targets that are
    /// out of bounds or blocked.
    pub fn successors(&self, c: Cell) -> SmallVec<[Successor; N_SMALLVEC_SIZE]> {
        Move::ALL
            .into_iter()
            .map(|action| Successor {
                cell: action.apply(c),
                action,
                cost: action.cost(),
            })
            .filter(|s| self.can_move_to(s.cell))
            .collect()
    }

    /// Row-major index of an in-bounds cell.
    pub fn get_ix_point(&self, c: &Cell) -> usize {
        self.grid.get_ix_point(c)
    }

    /// Blocks or unblocks a cell. Joins newly connected components and flags the components
    /// as dirty if components are (potentially) broken apart into multiple.
    pub fn set_blocked(&mut self, c: Cell, blocked: bool) {
        if !self.in_bounds(c) {
            return;
        }
        let was_blocked = self.grid.get_point(c);
        self.grid.set(c.x, c.y, blocked);
        if blocked && !was_blocked {
            self.components_dirty = true;
        } else if !blocked && was_blocked {
            let c_ix = self.get_ix_point(&c);
            for s in self.successors(c) {
                let n_ix = self.get_ix_point(&s.cell);
                self.components.union(c_ix, n_ix);
            }
        }
    }

    /// Checks if start and goal are on the same component. Assumes the components are up to
    /// date, see [update](Self::update).
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, c: &Cell) -> usize {
        self.components.find(self.get_ix_point(c))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open cells that a single move connects.
    /// Every move has its inverse in the move set, so the components are undirected.
    pub fn generate_components(&mut self) {
        let (rows, cols) = self.size();
        self.components = UnionFind::new(rows * cols);
        self.components_dirty = false;
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                let c = cell(row, col);
                if self.grid.get_point(c) {
                    continue;
                }
                let c_ix = self.get_ix_point(&c);
                for s in self.successors(c) {
                    let n_ix = self.get_ix_point(&s.cell);
                    self.components.union(c_ix, n_ix);
                }
            }
        }
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height as i32 {
            let line: String = (0..self.grid.width as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
