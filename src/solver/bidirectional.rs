use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexMap;
use itertools::chain;
use log::{debug, info, trace};

use crate::event::Outcome;
use crate::node::{reconstruct_path, Path, SearchNode};
use crate::search_grid::{Cell, SearchGrid};
use crate::solver::{Progress, SearchStrategy};
use crate::FxIndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// One breadth-first half of the search: its queue and every state it has generated.
#[derive(Clone, Debug)]
struct Half {
    frontier: VecDeque<Rc<SearchNode>>,
    explored: FxIndexMap<Cell, Rc<SearchNode>>,
}

impl Half {
    fn rooted_at(state: Cell) -> Half {
        let root = SearchNode::root(state);
        let mut explored = IndexMap::default();
        explored.insert(state, Rc::clone(&root));
        Half {
            frontier: VecDeque::from([root]),
            explored,
        }
    }
}

/// Bidirectional breadth-first search. Rounds alternate one expansion from the start side and
/// one from the goal side; the search ends as soon as either side generates a state the other
/// side already holds.
#[derive(Clone, Debug)]
pub struct Bidirectional<'a> {
    grid: &'a SearchGrid,
    forward: Half,
    backward: Half,
    turn: Direction,
    outcome: Option<Outcome>,
}

impl<'a> Bidirectional<'a> {
    pub fn new(start: Cell, goal: Cell, grid: &'a SearchGrid) -> Bidirectional<'a> {
        let outcome = (start == goal).then(|| Outcome::Found(Path::default()));
        Bidirectional {
            grid,
            forward: Half::rooted_at(start),
            backward: Half::rooted_at(goal),
            turn: Direction::Forward,
            outcome,
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Progress {
        self.outcome = Some(outcome.clone());
        Progress::Finished(outcome)
    }
}

impl SearchStrategy for Bidirectional<'_> {
    fn expand(&mut self) -> Progress {
        if let Some(outcome) = &self.outcome {
            return Progress::Finished(outcome.clone());
        }
        // A round only starts while both sides can still grow.
        if (self.turn == Direction::Forward && self.forward.frontier.is_empty())
            || self.backward.frontier.is_empty()
        {
            info!("Bidirectional search exhausted a frontier without the halves meeting");
            return self.finish(Outcome::NotFound);
        }
        let turn = self.turn;
        let (this, other) = match turn {
            Direction::Forward => (&mut self.forward, &self.backward),
            Direction::Backward => (&mut self.backward, &self.forward),
        };
        self.turn = match turn {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        };
        let Some(node) = this.frontier.pop_front() else {
            return self.finish(Outcome::NotFound);
        };
        trace!("Expanding {:?} ({:?})", node.state, turn);

        for successor in self.grid.successors(node.state) {
            if this.explored.contains_key(&successor.cell) {
                continue;
            }
            let child = SearchNode::child(&node, &successor);
            this.explored.insert(child.state, Rc::clone(&child));
            this.frontier.push_back(Rc::clone(&child));
            if let Some(met) = other.explored.get(&child.state) {
                debug!("Frontiers met at {:?}", child.state);
                let path = match turn {
                    Direction::Forward => merge_paths(&child, met),
                    Direction::Backward => merge_paths(met, &child),
                };
                info!("Bidirectional search found a path of {} moves", path.len());
                self.outcome = Some(Outcome::Found(path));
                break;
            }
        }
        Progress::Visited(node.state)
    }

    /// Forward frontier followed by the backward frontier.
    fn frontier(&self) -> Vec<Cell> {
        chain(&self.forward.frontier, &self.backward.frontier)
            .map(|n| n.state)
            .collect()
    }

    /// States generated from the start followed by those generated from the goal.
    fn explored(&self) -> Vec<Cell> {
        chain(self.forward.explored.keys(), self.backward.explored.keys())
            .copied()
            .collect()
    }
}

/// Joins the halves at a meeting state held by both `forward` and `backward`. The forward part is
/// the ordinary reconstruction. Walking from the meeting node up the backward tree moves towards
/// the goal, and each step of that walk undoes the move that created the node, so the inverse
/// actions are emitted in walk order.
pub fn merge_paths(forward: &SearchNode, backward: &SearchNode) -> Path {
    let mut path = reconstruct_path(forward);
    path.0
        .extend(backward.ancestors().filter_map(|n| n.action).map(|m| m.inverse()));
    path
}

/// Bidirectional search from `start` to `goal`.
pub fn bidirectional(start: Cell, goal: Cell, grid: &SearchGrid) -> Option<Path> {
    Bidirectional::new(start, goal, grid).run().into_path()
}
