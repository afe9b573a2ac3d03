use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use lapin_anims_core::{Clock, Config};
use log::{debug, trace, warn};

/// Work deferred to a scheduled time. Callbacks may schedule more work.
pub type Callback = Box<dyn FnOnce(&mut Scheduler)>;

struct Scheduled {
    time: f32,
    seq: u64,
    callback: Callback,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // reversed so the max-heap pops the earliest entry, oldest first among equal times
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Time-ordered queue of callbacks.
pub struct Scheduler {
    heap: BinaryHeap<Scheduled>,
    clock: Clock,
    next_seq: u64,
}

impl Scheduler {
    pub fn new(clock: &Clock) -> Self {
        Self::with_capacity(clock, 0)
    }

    pub fn with_config(clock: &Clock, cfg: &Config) -> Self {
        Self::with_capacity(clock, cfg.scheduler_capacity)
    }

    fn with_capacity(clock: &Clock, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            clock: clock.clone(),
            next_seq: 0,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Schedule `callback` to run once a pump reaches `time`.
    ///
    /// Non-finite times could never come due, so such callbacks are dropped.
    pub fn add<F>(&mut self, time: f32, callback: F)
    where
        F: FnOnce(&mut Scheduler) + 'static,
    {
        if !time.is_finite() {
            warn!("dropping callback scheduled at non-finite time {time}");
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            time,
            seq,
            callback: Box::new(callback),
        });
    }

    /// Run every callback scheduled at or before `time` (the clock's time when `None`),
    /// in time order. Callbacks added during the pump run in the same pump if they are
    /// already due. Returns how many callbacks ran.
    pub fn pump(&mut self, time: Option<f32>) -> usize {
        let limit = time.unwrap_or_else(|| self.clock.get_time());
        let mut fired = 0;
        while self.heap.peek().is_some_and(|next| next.time <= limit) {
            let Some(entry) = self.heap.pop() else {
                break;
            };
            trace!("firing callback scheduled for {}", entry.time);
            (entry.callback)(self);
            fired += 1;
        }
        if fired > 0 {
            debug!("pump({limit}) fired {fired} callbacks, {} pending", self.heap.len());
        }
        fired
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Time of the next callback to fire.
    pub fn next_time(&self) -> Option<f32> {
        self.heap.peek().map(|e| e.time)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.heap.len())
            .field("next_time", &self.next_time())
            .finish()
    }
}
