use std::cell::RefCell;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    ConnectionFailed,
}

/// Decides how a simulated submission ends.
pub trait OutcomeProvider {
    fn next_outcome(&self) -> SubmitOutcome;
}

impl<F> OutcomeProvider for F
where
    F: Fn() -> SubmitOutcome,
{
    fn next_outcome(&self) -> SubmitOutcome {
        self()
    }
}

/// Fails with probability `failure_rate`.
pub struct RandomOutcome {
    failure_rate: f64,
    rng: RefCell<SmallRng>,
}

impl RandomOutcome {
    pub fn new(failure_rate: f64) -> Self {
        Self::with_rng(failure_rate, SmallRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(failure_rate: f64, seed: u64) -> Self {
        Self::with_rng(failure_rate, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(failure_rate: f64, rng: SmallRng) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng: RefCell::new(rng),
        }
    }
}

impl OutcomeProvider for RandomOutcome {
    fn next_outcome(&self) -> SubmitOutcome {
        if self.rng.borrow_mut().gen_bool(self.failure_rate) {
            SubmitOutcome::ConnectionFailed
        } else {
            SubmitOutcome::Delivered
        }
    }
}
