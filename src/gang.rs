//! Domain model: simulated time, processor/gang/task identities, bursts.

use std::fmt;

/// Global simulated time in discrete units.
pub type Time = u64;

/// Identifies a processor (0..N).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessorId(pub usize);

/// Identifies a gang; stable across every queue/run cycle of that gang.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GangId(pub u32);

/// Identifies a task within its gang.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(pub usize);

/// Kind of execution burst. Only `Compute` durations are charged to a
/// processor's busy-time accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
    Compute,
    Other,
}

/// An abstract unit of execution cost within a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Burst {
    /// Abstract time cost, >= 1.
    pub duration: Time,
    pub kind: BurstKind,
}

/// A task: an ordered list of bursts, pinned to exactly one processor while
/// its gang runs. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub bursts: Vec<Burst>,
}

impl Task {
    pub fn new(id: TaskId, bursts: Vec<Burst>) -> Self {
        Self { id, bursts }
    }

    /// Total duration of `Compute` bursts; the amount charged to busy time
    /// when this task is assigned a processor.
    pub fn compute_time(&self) -> Time {
        self.bursts
            .iter()
            .filter(|b| b.kind == BurstKind::Compute)
            .map(|b| b.duration)
            .sum()
    }
}

/// A gang: tasks that must be allocated processors simultaneously and
/// released simultaneously. Task count == processor requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gang {
    id: GangId,
    tasks: Vec<Task>,
}

impl Gang {
    pub fn new(id: GangId, tasks: Vec<Task>) -> Self {
        Self { id, tasks }
    }

    pub fn id(&self) -> GangId {
        self.id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of processors this gang needs, all at once.
    pub fn size(&self) -> usize {
        self.tasks.len()
    }
}

impl fmt::Display for BurstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BurstKind::Compute => write!(f, "Compute"),
            BurstKind::Other => write!(f, "Other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_compute_time_sums_only_compute_bursts() {
        let task = Task::new(
            TaskId(0),
            vec![
                Burst { duration: 2, kind: BurstKind::Compute },
                Burst { duration: 1, kind: BurstKind::Other },
                Burst { duration: 1, kind: BurstKind::Compute },
            ],
        );
        assert_eq!(task.compute_time(), 3);
    }

    #[test]
    fn task_compute_time_empty_for_other_only() {
        let task = Task::new(TaskId(1), vec![Burst { duration: 2, kind: BurstKind::Other }]);
        assert_eq!(task.compute_time(), 0);
    }

    #[test]
    fn gang_size_is_task_count() {
        let tasks = (0..3)
            .map(|i| Task::new(TaskId(i), vec![Burst { duration: 1, kind: BurstKind::Compute }]))
            .collect();
        let gang = Gang::new(GangId(1), tasks);
        assert_eq!(gang.size(), 3);
        assert_eq!(gang.id(), GangId(1));
    }
}
