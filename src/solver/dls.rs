use std::rc::Rc;

use indexmap::IndexSet;
use log::{debug, info, trace};
use smallvec::SmallVec;

use crate::event::Outcome;
use crate::node::{reconstruct_path, SearchNode};
use crate::search_grid::{Cell, SearchGrid, Successor};
use crate::solver::{Progress, SearchStrategy};
use crate::{FxIndexSet, N_SMALLVEC_SIZE};

/// One level of the depth-first recursion: a node whose successors are being tried in order.
#[derive(Clone, Debug)]
struct Frame {
    node: Rc<SearchNode>,
    successors: SmallVec<[Successor; N_SMALLVEC_SIZE]>,
    next: usize,
    limit: usize,
    cutoff: bool,
}

/// Depth-limited depth-first search. The recursion is kept on an explicit stack of frames so the
/// search can be suspended after every visit. Cycles are avoided by skipping states on the
/// current path only; a state left by backtracking may be visited again through another branch.
#[derive(Clone, Debug)]
pub struct DepthLimited<'a> {
    grid: &'a SearchGrid,
    goal: Cell,
    limit: usize,
    stack: Vec<Frame>,
    pending: Option<(Rc<SearchNode>, usize)>,
    on_path: FxIndexSet<Cell>,
    outcome: Option<Outcome>,
}

impl<'a> DepthLimited<'a> {
    pub fn new(start: Cell, goal: Cell, grid: &'a SearchGrid, limit: usize) -> DepthLimited<'a> {
        DepthLimited {
            grid,
            goal,
            limit,
            stack: Vec::new(),
            pending: Some((SearchNode::root(start), limit)),
            on_path: IndexSet::default(),
            outcome: None,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Visits a node: goal test first, then the limit, then opens a frame for its successors.
    fn visit(&mut self, node: Rc<SearchNode>, limit: usize) -> Progress {
        let state = node.state;
        trace!("Visiting {:?} with {} moves left", state, limit);
        if state == self.goal {
            let path = reconstruct_path(&node);
            info!(
                "Depth-limited search (limit {}) found a path of {} moves",
                self.limit,
                path.len()
            );
            self.outcome = Some(Outcome::Found(path));
        } else if limit == 0 {
            self.report(Outcome::Cutoff);
        } else {
            self.on_path.insert(state);
            self.stack.push(Frame {
                successors: self.grid.successors(state),
                node,
                next: 0,
                limit,
                cutoff: false,
            });
        }
        Progress::Visited(state)
    }

    /// Hands the result of a finished subtree to the frame that spawned it, or ends the search
    /// when the subtree was the whole tree.
    fn report(&mut self, result: Outcome) {
        match self.stack.last_mut() {
            Some(parent) => parent.cutoff |= result.is_cutoff(),
            None => {
                debug!("Depth-limited search (limit {}) ended: {:?}", self.limit, result);
                self.outcome = Some(result);
            }
        }
    }
}

impl SearchStrategy for DepthLimited<'_> {
    fn expand(&mut self) -> Progress {
        loop {
            if let Some(outcome) = &self.outcome {
                return Progress::Finished(outcome.clone());
            }
            if let Some((node, limit)) = self.pending.take() {
                return self.visit(node, limit);
            }
            let Some(frame) = self.stack.last_mut() else {
                self.outcome = Some(Outcome::NotFound);
                continue;
            };
            while let Some(successor) = frame.successors.get(frame.next).copied() {
                frame.next += 1;
                if !self.on_path.contains(&successor.cell) {
                    let child = SearchNode::child(&frame.node, &successor);
                    self.pending = Some((child, frame.limit - 1));
                    break;
                }
            }
            if self.pending.is_none() {
                // Every successor has been tried: backtrack.
                if let Some(frame) = self.stack.pop() {
                    self.on_path.shift_remove(&frame.node.state);
                    let result = if frame.cutoff {
                        Outcome::Cutoff
                    } else {
                        Outcome::NotFound
                    };
                    self.report(result);
                }
            }
        }
    }

    /// Successors still to be tried by the frames on the stack.
    fn frontier(&self) -> Vec<Cell> {
        let untried: FxIndexSet<Cell> = self
            .stack
            .iter()
            .flat_map(|frame| frame.successors[frame.next..].iter().map(|s| s.cell))
            .filter(|c| !self.on_path.contains(c))
            .collect();
        untried.into_iter().collect()
    }

    /// States on the current path.
    fn explored(&self) -> Vec<Cell> {
        self.on_path.iter().copied().collect()
    }
}

/// Depth-limited search from `start` to `goal` using at most `limit` moves. Returns
/// [Outcome::Cutoff] when the limit stopped the search somewhere, and [Outcome::NotFound] only
/// when the goal is unreachable without ever hitting the limit.
pub fn dls(start: Cell, goal: Cell, grid: &SearchGrid, limit: usize) -> Outcome {
    DepthLimited::new(start, goal, grid, limit).run()
}
