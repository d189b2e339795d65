use crate::config::CoinSettings;
use crate::reveal::Reveal;
use crate::rng::RandomSource;
use crate::select::flip;
use crate::widget::{Cadence, Progress, Widget};
use std::time::Duration;
use suerte_shared::{CoinFace, CoinView, Guarded, Rejection};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CoinFlip {
    settings: CoinSettings,
    reveal: Reveal<CoinFace>,
}

impl CoinFlip {
    pub fn new(settings: CoinSettings) -> Self {
        Self {
            settings,
            reveal: Reveal::new(),
        }
    }

    pub fn face(&self) -> Option<CoinFace> {
        self.reveal.result().copied()
    }
}

impl Widget for CoinFlip {
    type Outcome = CoinFace;
    type View = CoinView;

    fn reveal(&self) -> &Reveal<CoinFace> {
        &self.reveal
    }

    fn trigger(&mut self, now: Duration, _rng: &mut dyn RandomSource) -> Guarded<Cadence> {
        if self.reveal.is_animating() {
            return Err(Rejection::Busy);
        }
        let duration = self.settings.flip();
        self.reveal.start(now, duration)?;
        debug!(?duration, "coin flip started");
        Ok(Cadence::Once(duration))
    }

    fn advance(&mut self, rng: &mut dyn RandomSource) -> Progress {
        if !self.reveal.is_animating() {
            return Progress::Revealed;
        }
        let face = flip(rng);
        self.reveal.finish(face);
        debug!(%face, "coin landed");
        Progress::Revealed
    }

    fn can_trigger(&self) -> bool {
        !self.reveal.is_animating()
    }

    fn view(&self) -> CoinView {
        CoinView {
            phase: self.reveal.kind(),
            face: self.face(),
            can_trigger: self.can_trigger(),
        }
    }
}
