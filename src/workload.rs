//! Random workload source: seeded gang/task generation and ingestion checks.

use crate::gang::{Burst, BurstKind, Gang, GangId, Task, TaskId, Time};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    /// The gang can never pass the admission check and would starve at the
    /// head of the queue, blocking everything behind it.
    #[error("gang {gang_id} needs {tasks} processors but the pool only has {processors}")]
    GangTooLarge {
        gang_id: u32,
        tasks: usize,
        processors: usize,
    },
}

/// Workload generation bounds. All ranges are inclusive.
#[derive(Clone, Debug)]
pub struct WorkloadConfig {
    /// Number of gangs to generate.
    pub num_gangs: usize,
    /// Tasks per gang (= processor requirement), min..=max.
    pub tasks_per_gang: (usize, usize),
    /// Bursts per task, min..=max.
    pub bursts_per_task: (usize, usize),
    /// Duration of each burst, min..=max.
    pub burst_duration: (Time, Time),
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_gangs: 8,
            tasks_per_gang: (1, 5),
            bursts_per_task: (1, 2),
            burst_duration: (1, 2),
        }
    }
}

/// Generates `config.num_gangs` gangs with random task counts, burst counts,
/// durations, and kinds, drawn uniformly from the configured ranges. Gang
/// ids start at 1.
pub fn generate_gangs(config: &WorkloadConfig, rng: &mut impl Rng) -> Vec<Gang> {
    (1..=config.num_gangs as u32)
        .map(|gang_id| {
            let num_tasks = rng.gen_range(config.tasks_per_gang.0..=config.tasks_per_gang.1);
            let tasks = (0..num_tasks)
                .map(|task_id| {
                    let num_bursts =
                        rng.gen_range(config.bursts_per_task.0..=config.bursts_per_task.1);
                    let bursts = (0..num_bursts)
                        .map(|_| Burst {
                            duration: rng
                                .gen_range(config.burst_duration.0..=config.burst_duration.1),
                            kind: if rng.gen_bool(0.5) {
                                BurstKind::Compute
                            } else {
                                BurstKind::Other
                            },
                        })
                        .collect();
                    Task::new(TaskId(task_id), bursts)
                })
                .collect();
            Gang::new(GangId(gang_id), tasks)
        })
        .collect()
}

/// Rejects gangs that can never be admitted because they need more
/// processors than the pool holds.
pub fn validate(gangs: &[Gang], num_processors: usize) -> Result<(), WorkloadError> {
    for gang in gangs {
        if gang.size() > num_processors {
            return Err(WorkloadError::GangTooLarge {
                gang_id: gang.id().0,
                tasks: gang.size(),
                processors: num_processors,
            });
        }
    }
    Ok(())
}
