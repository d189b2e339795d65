use crate::config::PickerSettings;
use crate::labels::LabelList;
use crate::reveal::Reveal;
use crate::rng::RandomSource;
use crate::select::select;
use crate::widget::{Cadence, Progress, Widget};
use std::time::Duration;
use suerte_shared::{Guarded, PickerView, Rejection};
use tracing::{debug, trace};

/// Lucky draw. While drawing, a highlight hops between participants on every
/// tick; the winner is drawn separately once the tick budget is spent.
#[derive(Debug, Clone)]
pub struct Picker {
    settings: PickerSettings,
    participants: LabelList,
    highlight: Option<String>,
    ticks: u32,
    reveal: Reveal<String>,
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(PickerSettings::default())
    }
}

impl Picker {
    pub fn new(settings: PickerSettings) -> Self {
        Self {
            participants: LabelList::new(settings.bounds()),
            settings,
            highlight: None,
            ticks: 0,
            reveal: Reveal::new(),
        }
    }

    pub fn participants(&self) -> &[String] {
        self.participants.items()
    }

    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.reveal.result().map(String::as_str)
    }

    pub fn ticks_elapsed(&self) -> u32 {
        self.ticks
    }

    pub fn add(&mut self, label: &str) -> Guarded<usize> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        self.participants.add(label)
    }

    pub fn remove(&mut self, index: usize) -> Guarded<String> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        self.participants.remove(index)
    }

    pub fn clear(&mut self) -> Guarded {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        self.participants.clear()
    }
}

impl Widget for Picker {
    type Outcome = String;
    type View = PickerView;

    fn reveal(&self) -> &Reveal<String> {
        &self.reveal
    }

    fn trigger(&mut self, now: Duration, _rng: &mut dyn RandomSource) -> Guarded<Cadence> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        if self.participants.is_empty() {
            return Err(Rejection::NotEnoughItems {
                required: 1,
                have: 0,
            });
        }
        let tick = self.settings.tick();
        self.reveal.start(now, tick * self.settings.ticks)?;
        self.ticks = 0;
        self.highlight = None;
        debug!(participants = self.participants.len(), "draw started");
        Ok(Cadence::Every(tick))
    }

    fn advance(&mut self, rng: &mut dyn RandomSource) -> Progress {
        if !self.reveal.is_animating() {
            return Progress::Revealed;
        }
        let items = self.participants.items();
        // non-empty: checked at trigger and frozen while animating
        let Ok(hop) = select(items, rng) else {
            return Progress::Revealed;
        };
        self.highlight = Some(hop.clone());
        self.ticks += 1;
        trace!(tick = self.ticks, highlight = %hop, "draw tick");
        if self.ticks < self.settings.ticks {
            return Progress::Pending;
        }
        let Ok(winner) = select(items, rng).cloned() else {
            return Progress::Revealed;
        };
        debug!(%winner, "draw finished");
        self.highlight = None;
        self.reveal.finish(winner);
        Progress::Revealed
    }

    fn can_trigger(&self) -> bool {
        !self.reveal.is_animating() && !self.participants.is_empty()
    }

    fn view(&self) -> PickerView {
        PickerView {
            phase: self.reveal.kind(),
            participants: self.participants.items().to_vec(),
            highlight: self.highlight.clone(),
            winner: self.winner().map(str::to_string),
            ticks_elapsed: self.ticks,
            can_trigger: self.can_trigger(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;
    use suerte_shared::RevealPhase;

    #[test]
    fn empty_picker_cannot_draw() {
        let mut picker = Picker::default();
        let mut rng = || 0.5;
        assert_eq!(
            picker.trigger(Duration::ZERO, &mut rng),
            Err(Rejection::NotEnoughItems { required: 1, have: 0 })
        );
        assert!(!picker.view().can_trigger);
    }

    #[test]
    fn twenty_ticks_then_reveal() {
        let mut picker = Picker::default();
        picker.add("A").unwrap();
        picker.add("B").unwrap();
        let mut rng = SeededSource::new("draw", "picker");
        assert_eq!(
            picker.trigger(Duration::ZERO, &mut rng),
            Ok(Cadence::Every(Duration::from_millis(100)))
        );
        for tick in 1..20 {
            assert_eq!(picker.advance(&mut rng), Progress::Pending);
            assert_eq!(picker.ticks_elapsed(), tick);
            assert!(picker.highlight().is_some());
            assert_eq!(picker.winner(), None);
        }
        assert_eq!(picker.advance(&mut rng), Progress::Revealed);
        let view = picker.view();
        assert_eq!(view.phase, RevealPhase::Revealed);
        assert!(matches!(view.winner.as_deref(), Some("A" | "B")));
        assert_eq!(view.highlight, None);
        assert_eq!(view.ticks_elapsed, 20);
    }

    #[test]
    fn edits_rejected_mid_draw() {
        let mut picker = Picker::default();
        picker.add("solo").unwrap();
        let mut rng = || 0.1;
        picker.trigger(Duration::ZERO, &mut rng).unwrap();
        assert_eq!(picker.remove(0), Err(Rejection::Busy));
        assert_eq!(picker.add("late"), Err(Rejection::Busy));
        assert_eq!(picker.trigger(Duration::ZERO, &mut rng), Err(Rejection::Busy));
    }

    #[test]
    fn last_participant_can_be_removed() {
        let mut picker = Picker::default();
        picker.add("Alice").unwrap();
        assert_eq!(picker.remove(0).as_deref(), Ok("Alice"));
        assert!(picker.participants().is_empty());
    }
}
