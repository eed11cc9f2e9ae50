//! Scheduling loop: per-tick admission, time-slice expiry, re-queueing.
//!
//! One admission decision is evaluated per tick, against the queue head only
//! (head-of-line blocking). A running gang's time slice is a pending-release
//! entry in a min-heap keyed by (release time, admission order); releases due
//! on a tick are processed before that tick's admission check, matching the
//! event ordering of the modeled system.

use crate::gang::{Gang, GangId, ProcessorId, Time};
use crate::pool::{PoolError, ProcessorPool};
use crate::queue::GangQueue;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Scheduling decision emitted to the reporting sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedEvent {
    GangAdmitted {
        gang_id: GangId,
        at: Time,
        processors: Vec<ProcessorId>,
    },
    GangReleased {
        gang_id: GangId,
        at: Time,
    },
}

/// Consumer of scheduling decisions. The core emits events; formatting and
/// output live with the sink.
pub trait EventSink {
    fn record(&mut self, event: SchedEvent);
}

/// Recording sink, used by tests to assert on the decision stream.
impl EventSink for Vec<SchedEvent> {
    fn record(&mut self, event: SchedEvent) {
        self.push(event);
    }
}

/// A gang mid time-slice: releases its processors at `release_at`.
/// `seq` is the admission order, breaking same-tick ties FIFO.
#[derive(Debug)]
struct PendingRelease {
    release_at: Time,
    seq: u64,
    gang: Gang,
    processors: Vec<ProcessorId>,
}

impl Ord for PendingRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.release_at, self.seq).cmp(&(other.release_at, other.seq))
    }
}

impl PartialOrd for PendingRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PendingRelease {
    fn eq(&self, other: &Self) -> bool {
        self.release_at == other.release_at && self.seq == other.seq
    }
}

impl Eq for PendingRelease {}

/// The scheduler context: owns the pool, the queue, the current time, and
/// the pending releases. All mutation happens inside `step`.
pub struct GangScheduler {
    pool: ProcessorPool,
    queue: GangQueue,
    quantum: Time,
    now: Time,
    running: BinaryHeap<Reverse<PendingRelease>>,
    admissions: u64,
}

impl GangScheduler {
    pub fn new(num_processors: usize, quantum: Time) -> Self {
        Self {
            pool: ProcessorPool::new(num_processors),
            queue: GangQueue::new(),
            quantum,
            now: 0,
            running: BinaryHeap::new(),
            admissions: 0,
        }
    }

    /// Appends a gang at the queue tail. A gang larger than the pool is
    /// accepted here and starves at the head forever; rejection belongs to
    /// workload validation, not the core.
    pub fn enqueue(&mut self, gang: Gang) {
        self.queue.enqueue(gang);
    }

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn free_processors(&self) -> usize {
        self.pool.free_count()
    }

    pub fn running_gangs(&self) -> usize {
        self.running.len()
    }

    pub fn pool(&self) -> &ProcessorPool {
        &self.pool
    }

    /// Removes and returns the head of the pending queue, e.g. to inspect
    /// what a finished run left behind.
    pub fn take_queued(&mut self) -> Option<Gang> {
        self.queue.dequeue_head()
    }

    /// Advances the clock by one tick: releases every gang whose time slice
    /// has expired (in admission order), then evaluates a single admission
    /// check against the queue head.
    pub fn step(&mut self, sink: &mut impl EventSink) -> Result<(), PoolError> {
        self.now += 1;
        self.release_due(sink);
        self.try_admit_head(sink)
    }

    /// Runs ticks until the clock reaches `end`. Gangs mid time-slice at the
    /// end are abandoned, not released.
    pub fn run_until(&mut self, end: Time, sink: &mut impl EventSink) -> Result<(), PoolError> {
        while self.now < end {
            self.step(sink)?;
        }
        Ok(())
    }

    fn release_due(&mut self, sink: &mut impl EventSink) {
        while let Some(Reverse(next)) = self.running.peek() {
            if next.release_at > self.now {
                break;
            }
            let Some(Reverse(done)) = self.running.pop() else {
                break;
            };
            self.pool.release(&done.processors, self.now);
            sink.record(SchedEvent::GangReleased { gang_id: done.gang.id(), at: self.now });
            // Same gang, unchanged, back to the tail for another slice.
            self.queue.enqueue(done.gang);
        }
    }

    fn try_admit_head(&mut self, sink: &mut impl EventSink) -> Result<(), PoolError> {
        let wanted = match self.queue.peek_head() {
            Some(head) => head.size(),
            None => return Ok(()),
        };
        // Head-of-line blocking: an unsatisfiable head waits; nothing behind
        // it is considered this tick.
        if wanted > self.pool.free_count() {
            return Ok(());
        }
        let Some(gang) = self.queue.dequeue_head() else {
            return Ok(());
        };
        let processors = self.pool.allocate(wanted)?;
        let release_at = self.now + self.quantum;
        // Task i is pinned to the i-th allocated processor. Busy time is
        // charged once here, from the task's compute bursts, not from the
        // slice length.
        for (task, id) in gang.tasks().iter().zip(&processors) {
            self.pool.record_busy(*id, task.compute_time());
            self.pool.begin_run(*id, self.now, release_at);
        }
        sink.record(SchedEvent::GangAdmitted {
            gang_id: gang.id(),
            at: self.now,
            processors: processors.clone(),
        });
        self.running.push(Reverse(PendingRelease {
            release_at,
            seq: self.admissions,
            gang,
            processors,
        }));
        self.admissions += 1;
        Ok(())
    }
}
