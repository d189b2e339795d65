use crate::config::StarfieldSettings;
use crate::rng::RandomSource;
use crate::schedule::{Repeat, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
    pub twinkle: f64,
}

/// Twinkling background particles. Purely decorative.
#[derive(Debug, Clone)]
pub struct Starfield {
    settings: StarfieldSettings,
    width: f64,
    height: f64,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(settings: StarfieldSettings, width: f64, height: f64, rng: &mut dyn RandomSource) -> Self {
        let stars = (0..settings.stars)
            .map(|_| Star {
                x: rng.next_f64() * width,
                y: rng.next_f64() * height,
                radius: rng.next_f64() * settings.max_radius,
                opacity: rng.next_f64(),
                twinkle: rng.next_f64() * settings.twinkle_spread + settings.min_twinkle,
            })
            .collect();
        Self {
            settings,
            width,
            height,
            stars,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn background(&self) -> &str {
        &self.settings.background
    }

    /// Tracks the viewport; stars keep their positions.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// One frame of twinkling.
    pub fn step(&mut self) {
        let (lo, hi) = (self.settings.min_opacity, self.settings.max_opacity);
        for star in &mut self.stars {
            star.opacity += star.twinkle;
            if star.opacity > hi || star.opacity < lo {
                star.twinkle = -star.twinkle;
            }
        }
    }
}

/// Runs a [`Starfield`] on the scheduler's frame loop, handing each frame to
/// `paint`. The loop stops when the backdrop is dropped.
pub struct Backdrop<S: Scheduler> {
    field: Rc<RefCell<Starfield>>,
    _frames: S::Handle,
}

impl<S: Scheduler> Backdrop<S> {
    pub fn start(field: Starfield, scheduler: &S, mut paint: impl FnMut(&Starfield) + 'static) -> Self {
        let field = Rc::new(RefCell::new(field));
        let weak = Rc::downgrade(&field);
        paint(&field.borrow());
        let frames = scheduler.frames(Box::new(move || {
            let Some(field) = weak.upgrade() else {
                return Repeat::Stop;
            };
            field.borrow_mut().step();
            paint(&field.borrow());
            Repeat::Continue
        }));
        debug!(stars = field.borrow().stars().len(), "backdrop started");
        Self {
            field,
            _frames: frames,
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.field.borrow_mut().resize(width, height);
    }

    pub fn with<R>(&self, f: impl FnOnce(&Starfield) -> R) -> R {
        f(&self.field.borrow())
    }
}
