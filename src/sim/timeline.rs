//! Scripted step queue
//!
//! A tiny timeline interpreter: an ordered list of waits and actions consumed
//! against the frame clock. Waiting never blocks; a wait just holds back every
//! step behind it until enough simulated time has passed.

use std::collections::VecDeque;

/// Slack for float drift when summing frame deltas against a wait
const WAIT_EPSILON: f32 = 1e-4;

/// One scripted step
#[derive(Debug, Clone, PartialEq)]
pub enum Step<A> {
    /// Hold the queue for this many seconds
    Wait(f32),
    /// Hand this action back to the owner
    Run(A),
}

/// Ordered (delay, action) queue
#[derive(Debug, Clone)]
pub struct Timeline<A> {
    steps: VecDeque<Step<A>>,
    /// Time already spent on the wait at the front
    waited: f32,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            waited: 0.0,
        }
    }

    pub fn from_steps(steps: impl IntoIterator<Item = Step<A>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            waited: 0.0,
        }
    }

    pub fn wait(&mut self, secs: f32) -> &mut Self {
        self.steps.push_back(Step::Wait(secs));
        self
    }

    pub fn run(&mut self, action: A) -> &mut Self {
        self.steps.push_back(Step::Run(action));
        self
    }

    /// Whether any steps remain
    pub fn is_running(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Drop all remaining steps; returns how many were dropped
    pub fn cancel(&mut self) -> usize {
        let dropped = self.steps.len();
        self.steps.clear();
        self.waited = 0.0;
        dropped
    }

    /// Advance by `dt` and return the actions that came due, in order
    pub fn advance(&mut self, dt: f32) -> Vec<A> {
        let mut due = Vec::new();
        let mut budget = self.waited + dt;

        while let Some(step) = self.steps.front() {
            match step {
                Step::Wait(secs) => {
                    if budget + WAIT_EPSILON < *secs {
                        break;
                    }
                    budget = (budget - secs).max(0.0);
                    self.steps.pop_front();
                }
                Step::Run(_) => {
                    if let Some(Step::Run(action)) = self.steps.pop_front() {
                        due.push(action);
                    }
                }
            }
        }

        self.waited = if self.steps.is_empty() { 0.0 } else { budget };
        due
    }
}
