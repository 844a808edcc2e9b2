//! The random failure consulted once per compilation, between validation and codegen.

use prolix_session::diagnostics::{Diagnostic, IntoDiagnostic};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One compilation in this many fails.
pub const FAILURE_ODDS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Pass,
    Fail,
}

pub trait FailureGate {
    fn roll(&mut self) -> GateOutcome;
}

impl<G: FailureGate + ?Sized> FailureGate for &mut G {
    fn roll(&mut self) -> GateOutcome {
        (**self).roll()
    }
}

impl<G: FailureGate + ?Sized> FailureGate for Box<G> {
    fn roll(&mut self) -> GateOutcome {
        (**self).roll()
    }
}

#[derive(Debug, Clone)]
pub struct RandomGate<R = ChaCha8Rng> {
    rng: R,
}

impl RandomGate<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomGate<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> FailureGate for RandomGate<R> {
    fn roll(&mut self) -> GateOutcome {
        if self.rng.gen_ratio(1, FAILURE_ODDS) {
            GateOutcome::Fail
        } else {
            GateOutcome::Pass
        }
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPass;

#[cfg(test)]
impl FailureGate for AlwaysPass {
    fn roll(&mut self) -> GateOutcome {
        GateOutcome::Pass
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

#[cfg(test)]
impl FailureGate for AlwaysFail {
    fn roll(&mut self) -> GateOutcome {
        GateOutcome::Fail
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InjectedFailure;

impl IntoDiagnostic<()> for InjectedFailure {
    fn into_diagnostic(self, _cx: &()) -> Diagnostic {
        Diagnostic::error()
            .with_id("injected-failure")
            .with_message("compilation failed by chance")
            .with_note(format!(
                "one compilation in {FAILURE_ODDS} fails on purpose, this says nothing about \
                 the program"
            ))
            .with_note("compiling again will most likely succeed")
    }
}
