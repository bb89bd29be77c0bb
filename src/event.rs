use crate::node::Path;
use crate::search_grid::Cell;

/// Result of a search. [Outcome::Cutoff] is only produced by depth-limited search and means that
/// the limit was hit somewhere, so a deeper search might still succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Path),
    Cutoff,
    NotFound,
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn is_cutoff(&self) -> bool {
        matches!(self, Outcome::Cutoff)
    }
}

impl From<Option<Path>> for Outcome {
    fn from(path: Option<Path>) -> Self {
        path.map_or(Outcome::NotFound, Outcome::Found)
    }
}

/// Observable checkpoint of a step-wise search, consumed by whatever animates the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    /// A node was expanded or visited. Carries snapshots of the frontier and explored states
    /// taken right after the expansion.
    Step {
        current: Option<Cell>,
        frontier: Vec<Cell>,
        explored: Vec<Cell>,
    },
    /// Terminal event, emitted exactly once per run.
    Path(Outcome),
    /// Free-form progress message.
    Log(String),
}

impl SearchEvent {
    pub fn current(&self) -> Option<Cell> {
        match self {
            SearchEvent::Step { current, .. } => *current,
            _ => None,
        }
    }

    pub fn frontier(&self) -> &[Cell] {
        match self {
            SearchEvent::Step { frontier, .. } => frontier.as_slice(),
            _ => &[],
        }
    }

    pub fn explored(&self) -> &[Cell] {
        match self {
            SearchEvent::Step { explored, .. } => explored.as_slice(),
            _ => &[],
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            SearchEvent::Path(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The found path of a terminal event.
    pub fn path(&self) -> Option<&Path> {
        self.outcome().and_then(Outcome::path)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SearchEvent::Log(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchEvent::Path(_))
    }
}
