use crate::rng::RandomSource;
use crate::schedule::{Repeat, Scheduler};
use crate::widget::{Cadence, Progress, Widget};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use suerte_shared::Guarded;
use tracing::{debug, trace};

type Observer<W> = Box<dyn Fn(&W)>;

struct Shared<W> {
    widget: RefCell<W>,
    rng: RefCell<Box<dyn RandomSource>>,
    observers: RefCell<Vec<Observer<W>>>,
}

impl<W: Widget> Shared<W> {
    fn advance(&self) -> Progress {
        let progress = {
            let mut widget = self.widget.borrow_mut();
            let mut rng = self.rng.borrow_mut();
            widget.advance(&mut **rng)
        };
        self.notify();
        progress
    }

    fn notify(&self) {
        let widget = self.widget.borrow();
        for observer in self.observers.borrow().iter() {
            observer(&widget);
        }
    }
}

/// A widget instance that is on screen: it owns the widget state, its random
/// source, its change observers and the timer for the cycle in flight.
///
/// Timer callbacks only hold a weak reference. Dropping the `Mounted` drops the
/// timer handle, which cancels the pending callback, and any callback that
/// still runs finds the state gone.
pub struct Mounted<W: Widget + 'static, S: Scheduler> {
    shared: Rc<Shared<W>>,
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<W: Widget + 'static, S: Scheduler> Mounted<W, S> {
    pub fn new(widget: W, rng: Box<dyn RandomSource>, scheduler: S) -> Self {
        Self {
            shared: Rc::new(Shared {
                widget: RefCell::new(widget),
                rng: RefCell::new(rng),
                observers: RefCell::new(Vec::new()),
            }),
            scheduler,
            pending: None,
        }
    }

    /// Called after every state change with the new state.
    pub fn subscribe(&self, observer: impl Fn(&W) + 'static) {
        self.shared.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn with<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.shared.widget.borrow())
    }

    pub fn view(&self) -> W::View {
        self.with(|w| w.view())
    }

    /// Mutates the widget outside a cycle (list edits) and notifies observers.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut W) -> R) -> R {
        let out = f(&mut self.shared.widget.borrow_mut());
        self.shared.notify();
        out
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some() && self.with(|w| w.reveal().is_animating())
    }

    pub fn trigger(&mut self) -> Guarded {
        let now = self.scheduler.now();
        let cadence = {
            let mut widget = self.shared.widget.borrow_mut();
            let mut rng = self.shared.rng.borrow_mut();
            widget.trigger(now, &mut **rng).inspect_err(|why| {
                trace!(%why, "trigger rejected");
            })?
        };
        // the previous cycle, if any, has already resolved
        self.pending = None;
        let weak: Weak<Shared<W>> = Rc::downgrade(&self.shared);
        let handle = match cadence {
            Cadence::Once(delay) => self.scheduler.once(
                delay,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.advance();
                    }
                }),
            ),
            Cadence::Every(period) => self.scheduler.every(
                period,
                Box::new(move || match weak.upgrade() {
                    Some(shared) if shared.advance() == Progress::Pending => Repeat::Continue,
                    _ => Repeat::Stop,
                }),
            ),
        };
        self.pending = Some(handle);
        self.shared.notify();
        Ok(())
    }
}

impl<W: Widget + 'static, S: Scheduler> Drop for Mounted<W, S> {
    fn drop(&mut self) {
        let animating = self
            .shared
            .widget
            .try_borrow()
            .is_ok_and(|w| w.reveal().is_animating());
        if self.pending.take().is_some() && animating {
            debug!("widget torn down mid-cycle; pending timer cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::CoinFlip;
    use crate::picker::Picker;
    use crate::rng::SeededSource;
    use crate::schedule::ManualScheduler;
    use std::cell::Cell;
    use std::time::Duration;
    use suerte_shared::{Rejection, RevealPhase};

    fn seeded(stream: &str) -> Box<dyn RandomSource> {
        Box::new(SeededSource::new("session", stream))
    }

    #[test]
    fn coin_reveals_after_delay() {
        let sched = ManualScheduler::new();
        let mut coin = Mounted::new(CoinFlip::default(), seeded("coin"), sched.clone());
        coin.trigger().unwrap();
        assert!(coin.is_scheduled());
        sched.advance(Duration::from_millis(1499));
        assert_eq!(coin.view().phase, RevealPhase::Animating);
        sched.advance(Duration::from_millis(1));
        let view = coin.view();
        assert_eq!(view.phase, RevealPhase::Revealed);
        assert!(view.face.is_some());
        assert!(!coin.is_scheduled());
    }

    #[test]
    fn second_trigger_while_animating_is_rejected() {
        let sched = ManualScheduler::new();
        let mut coin = Mounted::new(CoinFlip::default(), seeded("coin"), sched.clone());
        coin.trigger().unwrap();
        let before = coin.view();
        assert_eq!(coin.trigger(), Err(Rejection::Busy));
        assert_eq!(coin.view(), before);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn teardown_mid_flight_cancels() {
        let sched = ManualScheduler::new();
        let notified = Rc::new(Cell::new(0));
        let mut picker = Mounted::new(Picker::default(), seeded("picker"), sched.clone());
        picker.edit(|p| p.add("A")).unwrap();
        let seen = notified.clone();
        picker.subscribe(move |_| seen.set(seen.get() + 1));
        picker.trigger().unwrap();
        sched.advance(Duration::from_millis(350));
        let before = notified.get();
        drop(picker);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.advance(Duration::from_secs(10)), 0);
        assert_eq!(notified.get(), before);
    }

    #[test]
    fn observers_see_every_tick() {
        let sched = ManualScheduler::new();
        let mut picker = Mounted::new(Picker::default(), seeded("ticks"), sched.clone());
        picker.edit(|p| {
            p.add("A").unwrap();
            p.add("B").unwrap();
        });
        let highlights = Rc::new(RefCell::new(Vec::new()));
        let sink = highlights.clone();
        picker.subscribe(move |p: &Picker| {
            if let Some(h) = p.highlight() {
                sink.borrow_mut().push(h.to_string());
            }
        });
        picker.trigger().unwrap();
        sched.run_until_idle(Duration::from_secs(5));
        assert_eq!(highlights.borrow().len(), 20 - 1);
        let view = picker.view();
        assert_eq!(view.phase, RevealPhase::Revealed);
        assert!(matches!(view.winner.as_deref(), Some("A" | "B")));
        assert_eq!(sched.now(), Duration::from_millis(2000));
    }
}
