use crate::config::WheelSettings;
use crate::geometry::{spin_target, winner_index};
use crate::labels::LabelList;
use crate::reveal::Reveal;
use crate::rng::RandomSource;
use crate::widget::{Cadence, Progress, Widget};
use std::time::Duration;
use suerte_shared::{Guarded, Rejection, WheelView};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub index: usize,
    pub label: String,
}

/// Roulette wheel. The resting angle is chosen when the spin starts so the
/// renderer can animate toward it; the winner is read off the angle at reveal.
#[derive(Debug, Clone)]
pub struct Wheel {
    settings: WheelSettings,
    options: LabelList,
    rotation: f64,
    reveal: Reveal<Winner>,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(WheelSettings::default())
    }
}

impl Wheel {
    pub fn new(settings: WheelSettings) -> Self {
        let options = LabelList::with_items(settings.bounds(), &settings.options);
        if options.len() < settings.bounds().min {
            warn!(count = options.len(), "wheel starts with too few options to spin");
        }
        Self {
            settings,
            options,
            rotation: 0.0,
            reveal: Reveal::new(),
        }
    }

    pub fn options(&self) -> &[String] {
        self.options.items()
    }

    /// Accumulated rotation in degrees; never reset between spins.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.reveal.result()
    }

    pub fn add(&mut self, label: &str) -> Guarded<usize> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        self.options.add(label)
    }

    pub fn remove(&mut self, index: usize) -> Guarded<String> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        self.options.remove(index)
    }
}

impl Widget for Wheel {
    type Outcome = Winner;
    type View = WheelView;

    fn reveal(&self) -> &Reveal<Winner> {
        &self.reveal
    }

    fn trigger(&mut self, now: Duration, rng: &mut dyn RandomSource) -> Guarded<Cadence> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        let required = self.options.bounds().min;
        if self.options.len() < required {
            return Err(Rejection::NotEnoughItems {
                required,
                have: self.options.len(),
            });
        }
        let duration = self.settings.spin();
        self.reveal.start(now, duration)?;
        self.rotation = spin_target(
            self.rotation,
            self.settings.min_turns,
            self.settings.extra_turns,
            rng,
        );
        debug!(rotation = self.rotation, ?duration, "wheel spinning");
        Ok(Cadence::Once(duration))
    }

    fn advance(&mut self, _rng: &mut dyn RandomSource) -> Progress {
        if !self.reveal.is_animating() {
            return Progress::Revealed;
        }
        let index = winner_index(self.rotation, self.options.len());
        let label = self.options.items()[index].clone();
        debug!(index, %label, "wheel stopped");
        self.reveal.finish(Winner { index, label });
        Progress::Revealed
    }

    fn can_trigger(&self) -> bool {
        !self.reveal.is_animating() && self.options.len() >= self.options.bounds().min
    }

    fn view(&self) -> WheelView {
        let idle = !self.reveal.is_animating();
        WheelView {
            phase: self.reveal.kind(),
            options: self.options.items().to_vec(),
            rotation_deg: self.rotation,
            winner: self.winner().map(|w| w.label.clone()),
            can_trigger: self.can_trigger(),
            can_add: idle && self.options.can_add(),
            can_remove: idle && self.options.can_remove(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededSource;

    #[test]
    fn starts_with_four_options() {
        let wheel = Wheel::default();
        assert_eq!(wheel.options(), ["Option 1", "Option 2", "Option 3", "Option 4"]);
        assert!(wheel.can_trigger());
    }

    #[test]
    fn winner_matches_resting_angle() {
        let mut wheel = Wheel::default();
        // 5 turns + 0 extra, offset 0 -> rests at 1800 degrees
        let mut zero = || 0.0;
        assert_eq!(
            wheel.trigger(Duration::ZERO, &mut zero),
            Ok(Cadence::Once(Duration::from_millis(4000)))
        );
        assert_eq!(wheel.rotation(), 1800.0);
        assert_eq!(wheel.advance(&mut zero), Progress::Revealed);
        assert_eq!(
            wheel.winner(),
            Some(&Winner {
                index: 1,
                label: "Option 2".into()
            })
        );
    }

    #[test]
    fn rotation_accumulates_across_spins() {
        let mut wheel = Wheel::default();
        let mut rng = SeededSource::new("acc", "wheel");
        let mut last = 0.0;
        for i in 0..5 {
            wheel.trigger(Duration::from_secs(i * 10), &mut rng).unwrap();
            assert!(wheel.rotation() >= last + 5.0 * 360.0);
            last = wheel.rotation();
            wheel.advance(&mut rng);
            let w = wheel.winner().unwrap();
            assert_eq!(w.index, winner_index(last, 4));
        }
    }

    #[test]
    fn floor_of_two_options() {
        let settings = WheelSettings {
            options: vec!["a".into(), "b".into()],
            ..WheelSettings::default()
        };
        let mut wheel = Wheel::new(settings);
        assert_eq!(wheel.remove(0), Err(Rejection::AtMinimum { min: 2 }));
        assert_eq!(wheel.options().len(), 2);
        assert!(!wheel.view().can_remove);
    }

    #[test]
    fn too_few_options_cannot_spin() {
        let settings = WheelSettings {
            options: vec!["only".into()],
            ..WheelSettings::default()
        };
        let mut wheel = Wheel::new(settings);
        let mut rng = || 0.3;
        assert_eq!(
            wheel.trigger(Duration::ZERO, &mut rng),
            Err(Rejection::NotEnoughItems { required: 2, have: 1 })
        );
        assert!(!wheel.can_trigger());
    }

    #[test]
    fn list_is_frozen_while_spinning() {
        let mut wheel = Wheel::default();
        let mut rng = || 0.6;
        wheel.trigger(Duration::ZERO, &mut rng).unwrap();
        assert_eq!(wheel.add("late"), Err(Rejection::Busy));
        assert_eq!(wheel.remove(0), Err(Rejection::Busy));
        let view = wheel.view();
        assert!(!view.can_add && !view.can_remove && !view.can_trigger);
        wheel.advance(&mut rng);
        assert_eq!(wheel.add("late"), Ok(4));
    }
}
