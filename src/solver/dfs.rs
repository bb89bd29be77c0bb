use std::rc::Rc;

use indexmap::IndexSet;
use log::{info, trace};

use crate::event::Outcome;
use crate::node::{reconstruct_path, Path, SearchNode};
use crate::search_grid::{Cell, SearchGrid};
use crate::solver::{Progress, SearchStrategy};
use crate::FxIndexSet;

/// Depth-first graph search with a LIFO frontier. The goal test happens when a node is popped.
#[derive(Clone, Debug)]
pub struct DepthFirst<'a> {
    grid: &'a SearchGrid,
    goal: Cell,
    frontier: Vec<Rc<SearchNode>>,
    explored: FxIndexSet<Cell>,
    outcome: Option<Outcome>,
}

impl<'a> DepthFirst<'a> {
    pub fn new(start: Cell, goal: Cell, grid: &'a SearchGrid) -> DepthFirst<'a> {
        DepthFirst {
            grid,
            goal,
            frontier: vec![SearchNode::root(start)],
            explored: IndexSet::default(),
            outcome: None,
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Progress {
        self.outcome = Some(outcome.clone());
        Progress::Finished(outcome)
    }
}

impl SearchStrategy for DepthFirst<'_> {
    fn expand(&mut self) -> Progress {
        if let Some(outcome) = &self.outcome {
            return Progress::Finished(outcome.clone());
        }
        // Stale entries for states expanded since they were pushed are popped silently.
        while let Some(node) = self.frontier.pop() {
            if node.state == self.goal {
                let path = reconstruct_path(&node);
                info!("Depth-first search found a path of {} moves", path.len());
                return self.finish(Outcome::Found(path));
            }
            if !self.explored.insert(node.state) {
                continue;
            }
            trace!("Expanding {:?}", node.state);
            // Reversed, so that the first successor ends up on top of the stack.
            for successor in self.grid.successors(node.state).iter().rev() {
                if !self.explored.contains(&successor.cell) {
                    self.frontier.push(SearchNode::child(&node, successor));
                }
            }
            return Progress::Visited(node.state);
        }
        info!("Depth-first search exhausted the frontier without reaching {:?}", self.goal);
        self.finish(Outcome::NotFound)
    }

    fn frontier(&self) -> Vec<Cell> {
        self.frontier.iter().map(|n| n.state).collect()
    }

    fn explored(&self) -> Vec<Cell> {
        self.explored.iter().copied().collect()
    }
}

/// Depth-first search from `start` to `goal`. Finds a path whenever one exists, but not
/// necessarily a short one.
pub fn dfs(start: Cell, goal: Cell, grid: &SearchGrid) -> Option<Path> {
    DepthFirst::new(start, goal, grid).run().into_path()
}
