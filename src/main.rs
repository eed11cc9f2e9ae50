//! Simulation bootstrap: CLI configuration, workload generation, run, report.

use clap::Parser;
use gang_sim::report::{print_gang_details, print_processor_times, TraceSink};
use gang_sim::scheduler::GangScheduler;
use gang_sim::workload::{generate_gangs, validate, WorkloadConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(
    name = "gang-sim",
    about = "Gang scheduling simulator: gangs of tasks acquire processors as a unit, \
             run for a fixed time slice, and re-queue"
)]
struct Args {
    /// Total number of processors in the pool.
    #[arg(long, default_value_t = 20)]
    processors: usize,

    /// Time slice a gang holds its processors before mandatory release.
    #[arg(long, default_value_t = 5)]
    quantum: u64,

    /// Number of gangs to generate.
    #[arg(long, default_value_t = 8)]
    gangs: usize,

    /// Total simulated run length.
    #[arg(long, default_value_t = 50)]
    run_until: u64,

    /// Largest gang the workload generator may produce.
    #[arg(long, default_value_t = 5)]
    max_gang_size: usize,

    /// RNG seed for reproducible workloads; random if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = WorkloadConfig {
        num_gangs: args.gangs,
        tasks_per_gang: (1, args.max_gang_size),
        ..WorkloadConfig::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let gangs = generate_gangs(&config, &mut rng);
    validate(&gangs, args.processors)?;

    println!("Initial gangs and tasks:");
    print_gang_details(&gangs);

    let mut scheduler = GangScheduler::new(args.processors, args.quantum);
    for gang in gangs {
        scheduler.enqueue(gang);
    }
    scheduler.run_until(args.run_until, &mut TraceSink)?;

    println!("\nProcessor utilization after {} time units:", scheduler.now());
    print_processor_times(&scheduler.pool().snapshot());
    Ok(())
}
