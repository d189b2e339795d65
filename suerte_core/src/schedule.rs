//! Deferred work: one-shot delays, repeating intervals and per-frame loops.
//!
//! Every scheduled task is paired with an owned handle. Dropping the handle
//! cancels the task; nothing fires for a task whose handle is gone.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Frame period used where there is no display to sync with.
pub const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Continue,
    Stop,
}

pub type OnceTask = Box<dyn FnOnce()>;
pub type RepeatTask = Box<dyn FnMut() -> Repeat>;

pub trait Scheduler {
    /// Cancels its task when dropped.
    type Handle;

    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
    fn once(&self, delay: Duration, task: OnceTask) -> Self::Handle;
    fn every(&self, period: Duration, task: RepeatTask) -> Self::Handle;
    fn frames(&self, task: RepeatTask) -> Self::Handle;
}

enum Task {
    Once(OnceTask),
    Every { period: Duration, task: RepeatTask },
}

struct Entry {
    due: Duration,
    // None while the task body is running
    task: Option<Task>,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

impl Queue {
    fn next(&self, limit: Duration) -> Option<(u64, Duration)> {
        self.entries
            .iter()
            .filter(|(_, e)| e.task.is_some() && e.due <= limit)
            .min_by_key(|(id, e)| (e.due, **id))
            .map(|(id, e)| (*id, e.due))
    }
}

/// Virtual-time scheduler. Time only moves when the owner advances it, so tests
/// and the terminal front end decide exactly when tasks fire.
///
/// Tasks due at the same instant fire in registration order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<Queue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            // the task being dropped may capture further handles
            let removed = queue.borrow_mut().entries.remove(&self.id);
            drop(removed);
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        let queue = self.queue.borrow();
        queue
            .entries
            .values()
            .filter(|e| e.task.is_some())
            .map(|e| e.due)
            .min()
    }

    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Runs every task due up to `target`, in due order, and returns how many fired.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            let (id, task) = {
                let mut queue = self.queue.borrow_mut();
                let Some((id, due)) = queue.next(target) else {
                    break;
                };
                queue.now = queue.now.max(due);
                let task = queue
                    .entries
                    .get_mut(&id)
                    .and_then(|e| e.task.take());
                (id, task)
            };
            let Some(task) = task else { continue };
            fired += 1;
            // no borrow is held while the task body runs
            match task {
                Task::Once(f) => {
                    f();
                    let removed = self.queue.borrow_mut().entries.remove(&id);
                    drop(removed);
                }
                Task::Every { period, mut task } => {
                    let again = task();
                    let mut queue = self.queue.borrow_mut();
                    let due = queue.now + period.max(Duration::from_millis(1));
                    // a task cancelled from inside its own run is already gone
                    let removed = match (again, queue.entries.get_mut(&id)) {
                        (Repeat::Continue, Some(entry)) => {
                            entry.due = due;
                            entry.task = Some(Task::Every { period, task });
                            None
                        }
                        (Repeat::Stop, Some(_)) => queue.entries.remove(&id),
                        (_, None) => None,
                    };
                    drop(queue);
                    drop(removed);
                }
            }
        }
        let mut queue = self.queue.borrow_mut();
        queue.now = queue.now.max(target);
        fired
    }

    /// Advances until no task is left, bounded by `limit` of virtual time.
    pub fn run_until_idle(&self, limit: Duration) -> usize {
        let deadline = self.now() + limit;
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            if due > deadline {
                break;
            }
            fired += self.advance_to(due);
        }
        fired
    }

    fn insert(&self, delay: Duration, task: Task) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + delay;
        queue.entries.insert(
            id,
            Entry {
                due,
                task: Some(task),
            },
        );
        ManualHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    fn once(&self, delay: Duration, task: OnceTask) -> ManualHandle {
        self.insert(delay, Task::Once(task))
    }

    fn every(&self, period: Duration, task: RepeatTask) -> ManualHandle {
        self.insert(period, Task::Every { period, task })
    }

    fn frames(&self, task: RepeatTask) -> ManualHandle {
        self.every(FRAME, task)
    }
}
