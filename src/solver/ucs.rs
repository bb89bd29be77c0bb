use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use indexmap::IndexSet;
use log::{info, trace};

use crate::event::Outcome;
use crate::node::{reconstruct_path, Path, SearchNode};
use crate::search_grid::{Cell, SearchGrid};
use crate::solver::{Progress, SearchStrategy};
use crate::FxIndexSet;

#[derive(Clone)]
struct SmallestCostHolder {
    cost: i32,
    sequence: u64,
    node: Rc<SearchNode>,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.sequence == other.sequence
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest cost must compare greatest, and among equal
        // costs the earliest pushed entry.
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

impl core::fmt::Debug for SmallestCostHolder {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("SmallestCostHolder")
            .field("cost", &self.cost)
            .field("sequence", &self.sequence)
            .field("state", &self.node.state)
            .finish()
    }
}

/// Uniform-cost search: nodes leave the frontier in order of cumulative cost, equal costs in
/// insertion order. The goal test happens when a node is popped, which makes the returned path
/// a cheapest one.
#[derive(Clone, Debug)]
pub struct UniformCost<'a> {
    grid: &'a SearchGrid,
    goal: Cell,
    frontier: BinaryHeap<SmallestCostHolder>,
    pushed: u64,
    explored: FxIndexSet<Cell>,
    outcome: Option<Outcome>,
}

impl<'a> UniformCost<'a> {
    pub fn new(start: Cell, goal: Cell, grid: &'a SearchGrid) -> UniformCost<'a> {
        let mut search = UniformCost {
            grid,
            goal,
            frontier: BinaryHeap::new(),
            pushed: 0,
            explored: IndexSet::default(),
            outcome: None,
        };
        search.push(SearchNode::root(start));
        search
    }

    fn push(&mut self, node: Rc<SearchNode>) {
        self.frontier.push(SmallestCostHolder {
            cost: node.cost,
            sequence: self.pushed,
            node,
        });
        self.pushed += 1;
    }

    fn finish(&mut self, outcome: Outcome) -> Progress {
        self.outcome = Some(outcome.clone());
        Progress::Finished(outcome)
    }
}

impl SearchStrategy for UniformCost<'_> {
    fn expand(&mut self) -> Progress {
        if let Some(outcome) = &self.outcome {
            return Progress::Finished(outcome.clone());
        }
        while let Some(SmallestCostHolder { node, .. }) = self.frontier.pop() {
            if node.state == self.goal {
                let path = reconstruct_path(&node);
                info!(
                    "Uniform-cost search found a path of {} moves with cost {}",
                    path.len(),
                    path.cost_float()
                );
                return self.finish(Outcome::Found(path));
            }
            // We may have pushed a state several times before expanding it; only the cheapest
            // copy is expanded, the others are discarded here.
            if !self.explored.insert(node.state) {
                continue;
            }
            trace!("Expanding {:?} at cost {}", node.state, node.cost);
            for successor in self.grid.successors(node.state) {
                if !self.explored.contains(&successor.cell) {
                    self.push(SearchNode::child(&node, &successor));
                }
            }
            return Progress::Visited(node.state);
        }
        info!("Uniform-cost search exhausted the frontier without reaching {:?}", self.goal);
        self.finish(Outcome::NotFound)
    }

    /// Frontier states in the order they would be popped.
    fn frontier(&self) -> Vec<Cell> {
        let mut holders: Vec<&SmallestCostHolder> = self.frontier.iter().collect();
        holders.sort_by(|a, b| b.cmp(a));
        holders.into_iter().map(|h| h.node.state).collect()
    }

    fn explored(&self) -> Vec<Cell> {
        self.explored.iter().copied().collect()
    }
}

/// Uniform-cost search from `start` to `goal`; the path has minimal total move cost.
pub fn ucs(start: Cell, goal: Cell, grid: &SearchGrid) -> Option<Path> {
    UniformCost::new(start, goal, grid).run().into_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use crate::search_grid::cell;
    use crate::solver::bfs::bfs;
    use crate::solver::test_util::{assert_valid, collect_events};
    use crate::{C, D};

    #[test]
    fn equal_start_goal() {
        let grid = SearchGrid::new(3, 3);
        let (events, outcome) = collect_events(UniformCost::new(cell(0, 2), cell(0, 2), &grid));
        assert_eq!(outcome, Outcome::Found(Path::default()));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn heap_pops_cheapest_then_oldest() {
        let mut heap = BinaryHeap::new();
        let node = SearchNode::root(cell(0, 0));
        for (cost, sequence) in [(3, 0), (2, 1), (2, 2), (4, 3)] {
            heap.push(SmallestCostHolder {
                cost,
                sequence,
                node: Rc::clone(&node),
            });
        }
        let order: Vec<(i32, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|h| (h.cost, h.sequence))
            .collect();
        assert_eq!(order, vec![(2, 1), (2, 2), (3, 0), (4, 3)]);
    }

    /// One diagonal (1.5) beats the two orthogonal moves (2.0) it replaces.
    #[test]
    fn prefers_cheaper_diagonal() {
        let grid = SearchGrid::new(2, 2);
        let path = ucs(cell(0, 0), cell(1, 1), &grid).unwrap();
        assert_eq!(path, Path(vec![Move::BottomRight]));
        assert_eq!(path.cost(), D);
    }

    /// Going against the diagonal direction, the diagonal-free route is cheaper.
    #[test]
    fn avoids_detour_through_diagonals() {
        let grid = SearchGrid::new(3, 3);
        let path = ucs(cell(0, 2), cell(2, 0), &grid).unwrap();
        assert_eq!(path.cost(), 4 * C);
        assert!(path.iter().all(|m| !m.is_diagonal()));
    }

    #[test]
    fn never_costlier_than_bfs() {
        let grid = SearchGrid::new(5, 5).with_blocked([cell(1, 1), cell(2, 2), cell(3, 1)]);
        for goal in [cell(4, 4), cell(0, 4), cell(4, 0), cell(2, 3)] {
            let start = cell(0, 0);
            let ucs_path = ucs(start, goal, &grid).unwrap();
            let bfs_path = bfs(start, goal, &grid).unwrap();
            assert!(ucs_path.cost() <= bfs_path.cost());
        }
    }

    #[test]
    fn steps_match_batch() {
        let grid = SearchGrid::new(5, 5);
        let (start, goal) = (cell(0, 0), cell(4, 4));
        let (events, outcome) = collect_events(UniformCost::new(start, goal, &grid));
        assert_valid(&outcome, start, goal, &grid);
        assert_eq!(outcome.path(), ucs(start, goal, &grid).as_ref());
        assert_eq!(events[0].current(), Some(start));
    }
}
