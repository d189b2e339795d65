use crate::coin::CoinFlip;
use crate::config::Settings;
use crate::picker::Picker;
use crate::rng::RandomSource;
use crate::schedule::Scheduler;
use crate::session::Mounted;
use crate::wheel::Wheel;
use suerte_shared::{Guarded, Tab};
use tracing::debug;

/// Produces the random source for a freshly mounted panel.
pub type SourceFactory = Box<dyn FnMut(Tab) -> Box<dyn RandomSource>>;

pub enum Panel<S: Scheduler> {
    Coin(Mounted<CoinFlip, S>),
    Wheel(Mounted<Wheel, S>),
    Picker(Mounted<Picker, S>),
}

impl<S: Scheduler> Panel<S> {
    pub fn tab(&self) -> Tab {
        match self {
            Panel::Coin(_) => Tab::Coin,
            Panel::Wheel(_) => Tab::Wheel,
            Panel::Picker(_) => Tab::Picker,
        }
    }

    pub fn trigger(&mut self) -> Guarded {
        match self {
            Panel::Coin(m) => m.trigger(),
            Panel::Wheel(m) => m.trigger(),
            Panel::Picker(m) => m.trigger(),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        match self {
            Panel::Coin(m) => m.is_scheduled(),
            Panel::Wheel(m) => m.is_scheduled(),
            Panel::Picker(m) => m.is_scheduled(),
        }
    }
}

/// Tab navigation. Exactly one panel is mounted; switching tabs tears the
/// current one down (cancelling its timer) and mounts a fresh one.
pub struct Shell<S: Scheduler + Clone> {
    settings: Settings,
    scheduler: S,
    sources: SourceFactory,
    panel: Panel<S>,
}

impl<S: Scheduler + Clone> Shell<S> {
    pub fn new(settings: Settings, scheduler: S, mut sources: SourceFactory) -> Self {
        let panel = mount(Tab::default(), &settings, &scheduler, &mut sources);
        Self {
            settings,
            scheduler,
            sources,
            panel,
        }
    }

    pub fn active(&self) -> Tab {
        self.panel.tab()
    }

    /// Returns false if `tab` was already showing.
    pub fn select(&mut self, tab: Tab) -> bool {
        if tab == self.active() {
            return false;
        }
        debug!(from = %self.active(), to = %tab, "switching panel");
        self.panel = mount(tab, &self.settings, &self.scheduler, &mut self.sources);
        true
    }

    pub fn panel(&self) -> &Panel<S> {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel<S> {
        &mut self.panel
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn mount<S: Scheduler + Clone>(
    tab: Tab,
    settings: &Settings,
    scheduler: &S,
    sources: &mut SourceFactory,
) -> Panel<S> {
    let rng = sources(tab);
    match tab {
        Tab::Coin => Panel::Coin(Mounted::new(
            CoinFlip::new(settings.coin.clone()),
            rng,
            scheduler.clone(),
        )),
        Tab::Wheel => Panel::Wheel(Mounted::new(
            Wheel::new(settings.wheel.clone()),
            rng,
            scheduler.clone(),
        )),
        Tab::Picker => Panel::Picker(Mounted::new(
            Picker::new(settings.picker.clone()),
            rng,
            scheduler.clone(),
        )),
    }
}
