use crate::reveal::Reveal;
use crate::rng::RandomSource;
use std::time::Duration;
use suerte_shared::Guarded;

/// How the resolution of a cycle has to be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Call `advance` once after the delay.
    Once(Duration),
    /// Call `advance` every period until it reports `Revealed`.
    Every(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Pending,
    Revealed,
}

/// A randomized-decision panel driven by deferred callbacks.
pub trait Widget {
    type Outcome: Clone;
    type View;

    fn reveal(&self) -> &Reveal<Self::Outcome>;

    /// Starts a cycle. Rejected while one is running or when there is nothing to draw from.
    fn trigger(&mut self, now: Duration, rng: &mut dyn RandomSource) -> Guarded<Cadence>;

    /// Called when the scheduled timer fires. Stale calls (no cycle running) are ignored.
    fn advance(&mut self, rng: &mut dyn RandomSource) -> Progress;

    /// Whether `trigger` would currently be accepted.
    fn can_trigger(&self) -> bool;

    fn view(&self) -> Self::View;
}
