use log::{debug, info};

use crate::event::Outcome;
use crate::node::Path;
use crate::search_grid::{Cell, SearchGrid};
use crate::solver::dls::DepthLimited;
use crate::solver::{Progress, SearchStrategy};

/// Iterative deepening: depth-limited search with limits `0, 1, ..` below `max_depth`. A level
/// that ends in [Outcome::Cutoff] is retried one level deeper; [Outcome::NotFound] means the
/// reachable space was exhausted without hitting the limit, so deeper levels cannot help.
/// Step-wise runs therefore announce only the levels actually searched, not every depth up to
/// `max_depth`.
#[derive(Clone, Debug)]
pub struct IterativeDeepening<'a> {
    grid: &'a SearchGrid,
    start: Cell,
    goal: Cell,
    max_depth: usize,
    depth: usize,
    level: Option<DepthLimited<'a>>,
    outcome: Option<Outcome>,
}

impl<'a> IterativeDeepening<'a> {
    pub fn new(
        start: Cell,
        goal: Cell,
        grid: &'a SearchGrid,
        max_depth: usize,
    ) -> IterativeDeepening<'a> {
        IterativeDeepening {
            grid,
            start,
            goal,
            max_depth,
            depth: 0,
            level: None,
            outcome: None,
        }
    }

    /// Limit of the level currently being searched.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl SearchStrategy for IterativeDeepening<'_> {
    fn expand(&mut self) -> Progress {
        if let Some(outcome) = &self.outcome {
            return Progress::Finished(outcome.clone());
        }
        let Some(level) = self.level.as_mut() else {
            if self.depth >= self.max_depth {
                info!("Iterative deepening reached the depth ceiling {}", self.max_depth);
                self.outcome = Some(Outcome::NotFound);
                return Progress::Finished(Outcome::NotFound);
            }
            self.level = Some(DepthLimited::new(
                self.start, self.goal, self.grid, self.depth,
            ));
            return Progress::Announce(format!("Starting depth {}", self.depth));
        };
        match level.expand() {
            Progress::Finished(Outcome::Cutoff) => {
                debug!("Depth {} was cut off, deepening", self.depth);
                self.level = None;
                self.depth += 1;
                self.expand()
            }
            Progress::Finished(outcome) => {
                self.outcome = Some(outcome.clone());
                Progress::Finished(outcome)
            }
            progress => progress,
        }
    }

    fn frontier(&self) -> Vec<Cell> {
        self.level.as_ref().map(|l| l.frontier()).unwrap_or_default()
    }

    fn explored(&self) -> Vec<Cell> {
        self.level.as_ref().map(|l| l.explored()).unwrap_or_default()
    }
}

/// Iterative deepening search from `start` to `goal`. Returns a path with the fewest moves.
pub fn iddfs(start: Cell, goal: Cell, grid: &SearchGrid, max_depth: usize) -> Option<Path> {
    IterativeDeepening::new(start, goal, grid, max_depth)
        .run()
        .into_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_grid::cell;
    use crate::solver::bfs::bfs;
    use crate::solver::test_util::{assert_valid, collect_events};
    use crate::DEFAULT_MAX_DEPTH;

    #[test]
    fn equal_start_goal() {
        let grid = SearchGrid::new(3, 3);
        let (events, outcome) =
            collect_events(IterativeDeepening::new(cell(0, 0), cell(0, 0), &grid, DEFAULT_MAX_DEPTH));
        assert_eq!(outcome, Outcome::Found(Path::default()));
        assert_eq!(events[0].message(), Some("Starting depth 0"));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn same_length_as_bfs() {
        let grid = SearchGrid::new(4, 4).with_blocked([cell(1, 1), cell(1, 2)]);
        let start = cell(0, 0);
        for goal in [cell(3, 3), cell(2, 2), cell(0, 3), cell(3, 0)] {
            let path = iddfs(start, goal, &grid, DEFAULT_MAX_DEPTH).unwrap();
            assert_eq!(path.len(), bfs(start, goal, &grid).unwrap().len());
            assert_eq!(path.replay(start, &grid), Some(goal));
        }
    }

    #[test]
    fn announces_each_level() {
        let grid = SearchGrid::new(5, 5);
        let (start, goal) = (cell(0, 0), cell(4, 4));
        let (events, outcome) =
            collect_events(IterativeDeepening::new(start, goal, &grid, DEFAULT_MAX_DEPTH));
        let messages: Vec<&str> = events.iter().filter_map(|e| e.message()).collect();
        assert_eq!(
            messages,
            vec![
                "Starting depth 0",
                "Starting depth 1",
                "Starting depth 2",
                "Starting depth 3",
                "Starting depth 4"
            ]
        );
        assert_valid(&outcome, start, goal, &grid);
        assert_eq!(outcome.path().unwrap().len(), 4);
    }

    #[test]
    fn ceiling_exhausted_is_not_found() {
        let grid = SearchGrid::new(5, 5);
        // Depths 0..=3 are all cut off before the 4 move path fits.
        assert_eq!(iddfs(cell(0, 0), cell(4, 4), &grid, 4), None);
        let (events, outcome) = collect_events(IterativeDeepening::new(cell(0, 0), cell(4, 4), &grid, 4));
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(events.iter().filter(|e| e.message().is_some()).count(), 4);
    }

    #[test]
    fn stops_early_when_exhausted() {
        let grid = SearchGrid::new(2, 3).with_blocked([cell(1, 2)]);
        let mut search = IterativeDeepening::new(cell(0, 0), cell(1, 2), &grid, DEFAULT_MAX_DEPTH);
        assert_eq!(search.run(), Outcome::NotFound);
        assert!(search.depth() < 10);
    }

    /// Five open cells allow paths of at most 4 moves, so depth 5 is the first level that runs
    /// out of states without being cut off. No level after it is announced.
    #[test]
    fn log_sequence_ends_at_first_exhausted_level() {
        let grid = SearchGrid::new(2, 3).with_blocked([cell(1, 2)]);
        let mut stepper =
            IterativeDeepening::new(cell(0, 0), cell(1, 2), &grid, DEFAULT_MAX_DEPTH).steps();
        let mut logs = Vec::new();
        while let Some(event) = stepper.advance() {
            if let Some(message) = event.message() {
                logs.push(message.to_owned());
            }
        }
        assert_eq!(logs.len(), 6);
        assert_eq!(logs.last().map(String::as_str), Some("Starting depth 5"));
        assert_eq!(stepper.search().depth(), 5);
    }
}
