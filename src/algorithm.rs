use core::fmt;

use log::info;

use crate::event::Outcome;
use crate::search_grid::{Cell, SearchGrid};
use crate::solver::bfs::BreadthFirst;
use crate::solver::bidirectional::Bidirectional;
use crate::solver::dfs::DepthFirst;
use crate::solver::dls::DepthLimited;
use crate::solver::iddfs::IterativeDeepening;
use crate::solver::ucs::UniformCost;
use crate::solver::{Progress, SearchStrategy, Stepper};
use crate::DEFAULT_MAX_DEPTH;

/// Failure to turn an algorithm name into an [Algorithm].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The name matches none of the supported algorithms.
    UnknownAlgorithm { name: String },
    /// Depth-limited search was requested without a limit.
    MissingLimit,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm { name } => write!(
                f,
                "unknown search algorithm {name:?}, expected one of {}",
                Algorithm::NAMES.join(", ")
            ),
            Self::MissingLimit => write!(f, "depth-limited search requires a depth limit"),
        }
    }
}

impl std::error::Error for SearchError {}

/// The available searches together with their parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Ucs,
    Dls { limit: usize },
    Iddfs { max_depth: usize },
    Bidirectional,
}

impl Algorithm {
    pub const NAMES: [&'static str; 6] = ["BFS", "DFS", "UCS", "DLS", "IDDFS", "Bidirectional"];

    /// Looks an algorithm up by name, ignoring case. `limit` is required for `DLS` and ignored by
    /// the others; `IDDFS` uses [DEFAULT_MAX_DEPTH] as its ceiling.
    pub fn from_name(name: &str, limit: Option<usize>) -> Result<Algorithm, SearchError> {
        let algorithm = match name.to_ascii_uppercase().as_str() {
            "BFS" => Algorithm::Bfs,
            "DFS" => Algorithm::Dfs,
            "UCS" => Algorithm::Ucs,
            "DLS" => Algorithm::Dls {
                limit: limit.ok_or(SearchError::MissingLimit)?,
            },
            "IDDFS" => Algorithm::Iddfs {
                max_depth: DEFAULT_MAX_DEPTH,
            },
            "BIDIRECTIONAL" => Algorithm::Bidirectional,
            _ => {
                return Err(SearchError::UnknownAlgorithm {
                    name: name.to_owned(),
                })
            }
        };
        Ok(algorithm)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Ucs => "UCS",
            Algorithm::Dls { .. } => "DLS",
            Algorithm::Iddfs { .. } => "IDDFS",
            Algorithm::Bidirectional => "Bidirectional",
        }
    }

    /// Creates the suspended search; nothing is expanded until the first event is pulled.
    pub fn start<'a>(&self, start: Cell, goal: Cell, grid: &'a SearchGrid) -> SearchProcess<'a> {
        info!("Starting {} from {:?} to {:?}", self, start, goal);
        let search = match *self {
            Algorithm::Bfs => AnySearch::Bfs(BreadthFirst::new(start, goal, grid)),
            Algorithm::Dfs => AnySearch::Dfs(DepthFirst::new(start, goal, grid)),
            Algorithm::Ucs => AnySearch::Ucs(UniformCost::new(start, goal, grid)),
            Algorithm::Dls { limit } => {
                AnySearch::Dls(DepthLimited::new(start, goal, grid, limit))
            }
            Algorithm::Iddfs { max_depth } => {
                AnySearch::Iddfs(IterativeDeepening::new(start, goal, grid, max_depth))
            }
            Algorithm::Bidirectional => {
                AnySearch::Bidirectional(Bidirectional::new(start, goal, grid))
            }
        };
        Stepper::new(search)
    }

    /// Runs the search to completion without producing events.
    pub fn solve(&self, start: Cell, goal: Cell, grid: &SearchGrid) -> Outcome {
        match self.start(start, goal, grid).finish() {
            Some(outcome) => outcome,
            None => Outcome::NotFound,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Dls { limit } => write!(f, "DLS (limit={limit})"),
            _ => f.write_str(self.name()),
        }
    }
}

/// Any of the six searches behind one type.
#[derive(Clone, Debug)]
pub enum AnySearch<'a> {
    Bfs(BreadthFirst<'a>),
    Dfs(DepthFirst<'a>),
    Ucs(UniformCost<'a>),
    Dls(DepthLimited<'a>),
    Iddfs(IterativeDeepening<'a>),
    Bidirectional(Bidirectional<'a>),
}

impl AnySearch<'_> {
    fn inner(&self) -> &dyn SearchStrategy {
        match self {
            AnySearch::Bfs(s) => s,
            AnySearch::Dfs(s) => s,
            AnySearch::Ucs(s) => s,
            AnySearch::Dls(s) => s,
            AnySearch::Iddfs(s) => s,
            AnySearch::Bidirectional(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SearchStrategy {
        match self {
            AnySearch::Bfs(s) => s,
            AnySearch::Dfs(s) => s,
            AnySearch::Ucs(s) => s,
            AnySearch::Dls(s) => s,
            AnySearch::Iddfs(s) => s,
            AnySearch::Bidirectional(s) => s,
        }
    }
}

impl SearchStrategy for AnySearch<'_> {
    fn expand(&mut self) -> Progress {
        self.inner_mut().expand()
    }

    fn frontier(&self) -> Vec<Cell> {
        self.inner().frontier()
    }

    fn explored(&self) -> Vec<Cell> {
        self.inner().explored()
    }
}

/// A running search, pulled one [SearchEvent](crate::SearchEvent) at a time.
pub type SearchProcess<'a> = Stepper<AnySearch<'a>>;

/// Constructs a search process from an algorithm name, see [Algorithm::from_name].
pub fn make_search<'a>(
    name: &str,
    start: Cell,
    goal: Cell,
    grid: &'a SearchGrid,
    limit: Option<usize>,
) -> Result<SearchProcess<'a>, SearchError> {
    Ok(Algorithm::from_name(name, limit)?.start(start, goal, grid))
}

/// Runs the named search to completion and returns its outcome.
pub fn search(
    name: &str,
    start: Cell,
    goal: Cell,
    grid: &SearchGrid,
    limit: Option<usize>,
) -> Result<Outcome, SearchError> {
    Ok(Algorithm::from_name(name, limit)?.solve(start, goal, grid))
}
