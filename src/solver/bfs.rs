use std::collections::VecDeque;
use std::rc::Rc;

use fxhash::FxHashSet;
use indexmap::IndexSet;
use log::{info, trace};

use crate::event::Outcome;
use crate::node::{reconstruct_path, Path, SearchNode};
use crate::search_grid::{Cell, SearchGrid};
use crate::solver::{Progress, SearchStrategy};
use crate::FxIndexSet;

/// Breadth-first search. The goal test happens when a child is generated, so the search can stop
/// one level earlier than a test at dequeue time would.
#[derive(Clone, Debug)]
pub struct BreadthFirst<'a> {
    grid: &'a SearchGrid,
    goal: Cell,
    frontier: VecDeque<Rc<SearchNode>>,
    in_frontier: FxHashSet<Cell>,
    explored: FxIndexSet<Cell>,
    outcome: Option<Outcome>,
}

impl<'a> BreadthFirst<'a> {
    pub fn new(start: Cell, goal: Cell, grid: &'a SearchGrid) -> BreadthFirst<'a> {
        let mut search = BreadthFirst {
            grid,
            goal,
            frontier: VecDeque::new(),
            in_frontier: FxHashSet::default(),
            explored: IndexSet::default(),
            outcome: None,
        };
        if start == goal {
            search.outcome = Some(Outcome::Found(Path::default()));
        } else {
            search.frontier.push_back(SearchNode::root(start));
            search.in_frontier.insert(start);
        }
        search
    }
}

impl SearchStrategy for BreadthFirst<'_> {
    fn expand(&mut self) -> Progress {
        if let Some(outcome) = &self.outcome {
            return Progress::Finished(outcome.clone());
        }
        let Some(node) = self.frontier.pop_front() else {
            info!("Breadth-first search exhausted the frontier without reaching {:?}", self.goal);
            self.outcome = Some(Outcome::NotFound);
            return Progress::Finished(Outcome::NotFound);
        };
        self.in_frontier.remove(&node.state);
        self.explored.insert(node.state);
        trace!("Expanding {:?}", node.state);

        for successor in self.grid.successors(node.state) {
            if self.explored.contains(&successor.cell) || self.in_frontier.contains(&successor.cell)
            {
                continue;
            }
            let child = SearchNode::child(&node, &successor);
            if child.state == self.goal {
                let path = reconstruct_path(&child);
                info!("Breadth-first search found a path of {} moves", path.len());
                self.outcome = Some(Outcome::Found(path));
                break;
            }
            self.in_frontier.insert(child.state);
            self.frontier.push_back(child);
        }
        Progress::Visited(node.state)
    }

    fn frontier(&self) -> Vec<Cell> {
        self.frontier.iter().map(|n| n.state).collect()
    }

    fn explored(&self) -> Vec<Cell> {
        self.explored.iter().copied().collect()
    }
}

/// Breadth-first search from `start` to `goal`. The path uses the fewest moves possible; among
/// those, the one found first in successor order is returned.
pub fn bfs(start: Cell, goal: Cell, grid: &SearchGrid) -> Option<Path> {
    BreadthFirst::new(start, goal, grid).run().into_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use crate::search_grid::cell;
    use crate::solver::test_util::{assert_valid, collect_events};

    #[test]
    fn equal_start_goal() {
        let grid = SearchGrid::new(3, 3);
        let (events, outcome) = collect_events(BreadthFirst::new(cell(1, 1), cell(1, 1), &grid));
        assert_eq!(outcome, Outcome::Found(Path::default()));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn shortest_path_on_open_grid() {
        let grid = SearchGrid::new(5, 5);
        let path = bfs(cell(0, 0), cell(4, 4), &grid).unwrap();
        assert_eq!(path, Path(vec![Move::BottomRight; 4]));
    }

    /// With several shortest paths the first one in successor order wins.
    #[test]
    fn ties_follow_move_order() {
        let grid = SearchGrid::new(3, 3);
        let path = bfs(cell(2, 0), cell(0, 2), &grid).unwrap();
        assert_eq!(path, Path(vec![Move::Up, Move::Up, Move::Right, Move::Right]));
    }

    #[test]
    fn goal_tested_at_generation() {
        let grid = SearchGrid::new(1, 3);
        let (events, outcome) = collect_events(BreadthFirst::new(cell(0, 0), cell(0, 1), &grid));
        // Only the start is expanded before the goal shows up as its child.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].current(), Some(cell(0, 0)));
        assert_eq!(outcome.path().unwrap().len(), 1);
    }

    #[test]
    fn no_path_through_wall() {
        //  ___
        // |.#.|
        // |.#.|
        //  ___
        let grid = SearchGrid::new(2, 3).with_blocked([cell(0, 1), cell(1, 1)]);
        assert_eq!(bfs(cell(0, 0), cell(0, 2), &grid), None);
        let (_, outcome) = collect_events(BreadthFirst::new(cell(0, 0), cell(0, 2), &grid));
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn steps_match_batch() {
        let grid = SearchGrid::new(4, 6).with_blocked([cell(1, 1), cell(2, 3)]);
        let (start, goal) = (cell(3, 0), cell(0, 5));
        let (events, outcome) = collect_events(BreadthFirst::new(start, goal, &grid));
        assert_eq!(outcome.path(), bfs(start, goal, &grid).as_ref());
        assert_valid(&outcome, start, goal, &grid);
        assert!(events.iter().all(|e| e.is_terminal() || e.current().is_some()));
    }

    #[test]
    fn frontier_has_no_duplicates() {
        let grid = SearchGrid::new(6, 6);
        let search = BreadthFirst::new(cell(0, 0), cell(5, 5), &grid);
        for event in search.steps() {
            let frontier = event.frontier();
            let unique: FxHashSet<_> = frontier.iter().collect();
            assert_eq!(unique.len(), frontier.len());
            assert!(frontier.iter().all(|c| !event.explored().contains(c)));
        }
    }
}
