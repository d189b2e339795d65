use std::time::Duration;
use suerte_shared::{Guarded, Rejection, RevealPhase};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    Animating { started_at: Duration, duration: Duration },
    Revealed(T),
}

/// Idle -> Animating -> Revealed lifecycle shared by every widget.
///
/// Only one cycle can be in flight: `start` while animating is rejected, it
/// never restarts or cancels the running one.
#[derive(Debug, Clone)]
pub struct Reveal<T> {
    phase: Phase<T>,
}

impl<T> Default for Reveal<T> {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl<T> Reveal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    pub fn kind(&self) -> RevealPhase {
        match self.phase {
            Phase::Idle => RevealPhase::Idle,
            Phase::Animating { .. } => RevealPhase::Animating,
            Phase::Revealed(_) => RevealPhase::Revealed,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating { .. })
    }

    pub fn result(&self) -> Option<&T> {
        match &self.phase {
            Phase::Revealed(r) => Some(r),
            _ => None,
        }
    }

    pub fn start(&mut self, now: Duration, duration: Duration) -> Guarded {
        if self.is_animating() {
            return Err(Rejection::Busy);
        }
        self.phase = Phase::Animating {
            started_at: now,
            duration,
        };
        Ok(())
    }

    /// Returns false if no cycle was running.
    pub fn finish(&mut self, outcome: T) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.phase = Phase::Revealed(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn second_start_is_rejected_and_state_kept() {
        let mut r: Reveal<u8> = Reveal::new();
        r.start(ms(0), ms(1500)).unwrap();
        let before = r.phase().clone();
        assert_eq!(r.start(ms(10), ms(99)), Err(Rejection::Busy));
        assert_eq!(r.phase(), &before);
    }

    #[test]
    fn restart_clears_result() {
        let mut r = Reveal::new();
        r.start(ms(0), ms(10)).unwrap();
        assert!(r.finish("first"));
        assert_eq!(r.result(), Some(&"first"));
        r.start(ms(20), ms(10)).unwrap();
        assert_eq!(r.result(), None);
        assert_eq!(r.kind(), RevealPhase::Animating);
    }

    #[test]
    fn finish_requires_animating() {
        let mut r = Reveal::new();
        assert!(!r.finish(1));
        assert_eq!(r.kind(), RevealPhase::Idle);
    }
}
