//! # grid_search
//!
//! Classical uninformed search on a grid: breadth-first, depth-first, uniform-cost,
//! depth-limited, iterative-deepening and bidirectional search. Cells are connected by six moves,
//! the four orthogonal ones and the two diagonals Bottom-Right and Top-Left, where a diagonal
//! costs 1.5 times an orthogonal move.
//!
//! Every search is a [SearchStrategy] that can be suspended after each visible step, which makes
//! it easy to animate: wrap it in a [Stepper] (or start it through [Algorithm::start] or
//! [make_search]) and pull [SearchEvent]s one at a time. Running the same strategy to completion
//! gives the batch result, so both forms always agree.
//!
//! ```
//! use grid_search::{cell, Algorithm, SearchEvent, SearchGrid};
//!
//! let grid = SearchGrid::new(5, 5);
//! let mut process = Algorithm::Bfs.start(cell(0, 0), cell(4, 4), &grid);
//! while let Some(event) = process.advance() {
//!     if let SearchEvent::Path(outcome) = event {
//!         assert_eq!(outcome.path().unwrap().len(), 4);
//!     }
//! }
//! ```
use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

pub mod algorithm;
pub mod event;
pub mod moves;
pub mod node;
pub mod search_grid;
pub mod solver;

pub use algorithm::{make_search, search, Algorithm, AnySearch, SearchError, SearchProcess};
pub use event::{Outcome, SearchEvent};
pub use moves::Move;
pub use node::{reconstruct_path, Path, SearchNode};
pub use search_grid::{cell, Cell, SearchGrid, Successor};
pub use solver::bfs::bfs;
pub use solver::bidirectional::bidirectional;
pub use solver::dfs::dfs;
pub use solver::dls::dls;
pub use solver::iddfs::iddfs;
pub use solver::ucs::ucs;
pub use solver::{Progress, SearchStrategy, Stepper};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Cost of an orthogonal move. Costs are kept integral, a diagonal move costs D = 1.5 * C.
pub const C: i32 = 2;
/// Cost of a diagonal move.
pub const D: i32 = 3;
/// Capacity of the inline successor buffer, one slot per move.
pub const N_SMALLVEC_SIZE: usize = 6;
/// Depth ceiling of iterative deepening when none is given.
pub const DEFAULT_MAX_DEPTH: usize = 1000;
/// Depth limit the demos use for depth-limited search.
pub const DEFAULT_DEPTH_LIMIT: usize = 50;

/// Converts the integer cost to the floating point equivalent where orthogonal moves have cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}
