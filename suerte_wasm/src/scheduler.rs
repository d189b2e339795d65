use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use suerte_core::schedule::{OnceTask, RepeatTask};
use suerte_core::{RandomSource, Repeat, Scheduler};

/// Timers backed by the browser event loop. Every gloo handle cancels its
/// timer on drop, so dropping a [`BrowserHandle`] is the teardown path.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

// Variants are only held for their Drop.
#[allow(dead_code)]
pub enum BrowserHandle {
    Timeout(Timeout),
    Interval(Rc<RefCell<Option<Interval>>>),
    Frames(Rc<RefCell<Option<AnimationFrame>>>),
}

fn millis(d: Duration) -> u32 {
    u32::try_from(d.as_millis()).unwrap_or(u32::MAX)
}

fn request_frame(slot: Weak<RefCell<Option<AnimationFrame>>>, mut task: RepeatTask) {
    let Some(strong) = slot.upgrade() else {
        return;
    };
    let next = slot.clone();
    let frame = request_animation_frame(move |_ts| {
        if task() == Repeat::Continue {
            request_frame(next, task);
        }
    });
    *strong.borrow_mut() = Some(frame);
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserHandle;

    fn now(&self) -> Duration {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| Duration::from_secs_f64(p.now() / 1000.0))
            .unwrap_or_default()
    }

    fn once(&self, delay: Duration, task: OnceTask) -> BrowserHandle {
        BrowserHandle::Timeout(Timeout::new(millis(delay), task))
    }

    fn every(&self, period: Duration, mut task: RepeatTask) -> BrowserHandle {
        let slot: Rc<RefCell<Option<Interval>>> = Rc::default();
        let weak = Rc::downgrade(&slot);
        let interval = Interval::new(millis(period), move || {
            if task() == Repeat::Stop {
                if let Some(slot) = weak.upgrade() {
                    slot.borrow_mut().take();
                }
            }
        });
        *slot.borrow_mut() = Some(interval);
        BrowserHandle::Interval(slot)
    }

    fn frames(&self, task: RepeatTask) -> BrowserHandle {
        let slot: Rc<RefCell<Option<AnimationFrame>>> = Rc::default();
        request_frame(Rc::downgrade(&slot), task);
        BrowserHandle::Frames(slot)
    }
}

pub fn browser_source() -> Box<dyn RandomSource> {
    Box::new(js_sys::Math::random)
}
