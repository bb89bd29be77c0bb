use std::iter::FusedIterator;

use log::debug;

use crate::event::{Outcome, SearchEvent};
use crate::search_grid::Cell;

pub mod bfs;
pub mod bidirectional;
pub mod dfs;
pub mod dls;
pub mod iddfs;
pub mod ucs;

/// What a single call to [SearchStrategy::expand] achieved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// A node holding this cell was expanded or visited.
    Visited(Cell),
    /// A message worth showing, without any change to the search state.
    Announce(String),
    /// The search is over. Every later call returns the same outcome.
    Finished(Outcome),
}

/// A search suspended between visible steps. Implementors keep their whole state (frontier,
/// explored set, recursion frames) in the struct so that [expand](Self::expand) can resume
/// exactly where the previous call stopped.
pub trait SearchStrategy {
    /// Runs the search up to and including the next visible step.
    fn expand(&mut self) -> Progress;

    /// States currently waiting to be expanded.
    fn frontier(&self) -> Vec<Cell>;

    /// States already expanded.
    fn explored(&self) -> Vec<Cell>;

    /// Drives the search to completion without taking any snapshots.
    fn run(&mut self) -> Outcome {
        loop {
            match self.expand() {
                Progress::Visited(_) => {}
                Progress::Announce(message) => debug!("{message}"),
                Progress::Finished(outcome) => return outcome,
            }
        }
    }

    /// Turns the search into a sequence of [SearchEvent]s.
    fn steps(self) -> Stepper<Self>
    where
        Self: Sized,
    {
        Stepper::new(self)
    }
}

/// Step-wise view of a [SearchStrategy]. Every item is one [SearchEvent]; the last one is always
/// [SearchEvent::Path], after which the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct Stepper<S> {
    search: S,
    finished: bool,
}

impl<S: SearchStrategy> Stepper<S> {
    pub fn new(search: S) -> Stepper<S> {
        Stepper {
            search,
            finished: false,
        }
    }

    /// Pulls the next event, [None] once the terminal event has been returned.
    pub fn advance(&mut self) -> Option<SearchEvent> {
        self.next()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Skips the remaining events and returns the outcome, or [None] if it was already returned.
    pub fn finish(mut self) -> Option<Outcome> {
        if self.finished {
            return None;
        }
        self.finished = true;
        Some(self.search.run())
    }
}

impl<S: SearchStrategy> Iterator for Stepper<S> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        if self.finished {
            return None;
        }
        let event = match self.search.expand() {
            Progress::Visited(current) => SearchEvent::Step {
                current: Some(current),
                frontier: self.search.frontier(),
                explored: self.search.explored(),
            },
            Progress::Announce(message) => SearchEvent::Log(message),
            Progress::Finished(outcome) => {
                self.finished = true;
                SearchEvent::Path(outcome)
            }
        };
        Some(event)
    }
}

impl<S: SearchStrategy> FusedIterator for Stepper<S> {}
