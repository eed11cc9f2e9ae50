//! Reporting: tracing-backed event sink and end-of-run console output.

use crate::gang::{Gang, Task};
use crate::pool::ProcessorStats;
use crate::scheduler::{EventSink, SchedEvent};
use tracing::info;

/// Logs every scheduling decision as a structured tracing event.
pub struct TraceSink;

impl EventSink for TraceSink {
    fn record(&mut self, event: SchedEvent) {
        match event {
            SchedEvent::GangAdmitted { gang_id, at, processors } => {
                info!(gang = gang_id.0, time = at, ?processors, "gang admitted");
            }
            SchedEvent::GangReleased { gang_id, at } => {
                info!(gang = gang_id.0, time = at, "gang released processors");
            }
        }
    }
}

fn format_bursts(task: &Task) -> String {
    let parts: Vec<String> = task
        .bursts
        .iter()
        .map(|b| format!("({}, {})", b.duration, b.kind))
        .collect();
    format!("[{}]", parts.join(", "))
}

/// Lists every gang and its tasks' bursts, as printed before a run starts.
pub fn print_gang_details(gangs: &[Gang]) {
    for gang in gangs {
        println!("Gang {}:", gang.id().0);
        for task in gang.tasks() {
            println!("  Task {}: bursts -> {}", task.id.0, format_bursts(task));
        }
    }
}

/// Final per-processor utilization table.
pub fn print_processor_times(stats: &[ProcessorStats]) {
    for (i, s) in stats.iter().enumerate() {
        println!("Processor {}: idle time: {}, busy time: {}", i, s.idle, s.busy);
    }
}
