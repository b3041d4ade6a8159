//! Command-line driver: single-run comparison and parameter sweeps on the
//! reference benchmark.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use u_opcount::eval::{ConvergenceSnapshot, Evaluator, W22};
use u_opcount::ga::{GaConfig, GaRunner};
use u_opcount::pso::{PsoConfig, PsoRunner};
use u_opcount::space::Bounds;
use u_opcount::sweep::{self, Algorithm, Sweep, SweepRecord};

#[derive(Parser)]
#[command(name = "opcount", about = "Compare GA and PSO by operation count")]
struct Cli {
    /// Lower bound for both coordinates.
    #[arg(long, default_value_t = -500.0, allow_negative_numbers = true)]
    min: f64,

    /// Upper bound for both coordinates.
    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    max: f64,

    /// Base random seed. Omit for non-reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run GA and PSO once with the reference settings and print a report.
    Compare,

    /// Run the built-in parameter spaces and append rows to a CSV report.
    Sweep {
        /// Report file. The header is written only when the file is new.
        #[arg(long, default_value = "tuning_results.csv")]
        output: PathBuf,

        /// Runs per configuration. Must be at least 1.
        #[arg(long, default_value_t = 2)]
        repeats: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let bounds = Bounds::new(cli.min, cli.max)?;

    match cli.command {
        Command::Compare => compare(bounds, cli.seed),
        Command::Sweep { output, repeats } => run_sweep(bounds, cli.seed, output, repeats),
    }
}

fn compare(bounds: Bounds, seed: Option<u64>) -> Result<()> {
    let mut evaluator = Evaluator::new(W22);

    println!("--- Genetic Algorithm ---");
    let mut ga_config = GaConfig::reference().with_bounds(bounds);
    ga_config.seed = seed;
    evaluator.reset();
    let ga = GaRunner::run(&mut evaluator, &ga_config)?;

    println!("Execution time: {:.4} s", ga.elapsed.as_secs_f64());
    if let Some([x, y]) = ga.best_solution {
        println!("Best solution (x, y): ({x:.4}, {y:.4})");
    }
    println!("Minimum value: {:.4}", ga.best_fitness);
    print_snapshot("a) Convergence reached with", "GA", &ga.convergence_info);
    let ga_min = ga.global_min_info.unwrap_or_default();
    print_snapshot("b) Global minimum found with", "GA", &ga_min);

    println!("\n--- Particle Swarm Optimization ---");
    let mut pso_config = PsoConfig::reference().with_bounds(bounds);
    pso_config.seed = seed;
    evaluator.reset();
    let pso = PsoRunner::run(&mut evaluator, &pso_config)?;

    println!("Execution time: {:.4} s", pso.elapsed.as_secs_f64());
    if let Some([x, y]) = pso.gbest_pos {
        println!("Best solution (x, y): ({x:.4}, {y:.4})");
    }
    println!("Minimum value: {:.4}", pso.gbest_val);
    print_snapshot("a) Convergence reached with", "PSO", &pso.convergence_info);
    let pso_min = pso.global_min_info.unwrap_or_default();
    print_snapshot("b) Global minimum found with", "PSO", &pso_min);

    println!("\n--- Final comparison ---");
    let ga_ops = ga_min.total_operations();
    let pso_ops = pso_min.total_operations();
    println!("Total operations to find the minimum (GA):  {ga_ops}");
    println!("Total operations to find the minimum (PSO): {pso_ops}");

    if pso.gbest_val < ga.best_fitness {
        println!("PSO found the lower minimum.");
    } else {
        println!("GA found the lower minimum.");
    }
    if pso_ops < ga_ops {
        println!("By total operations, PSO was computationally cheaper.");
    } else {
        println!("By total operations, GA was computationally cheaper.");
    }
    Ok(())
}

fn print_snapshot(title: &str, algorithm: &str, snap: &ConvergenceSnapshot) {
    println!("{title}:");
    println!("  - Function evaluations: {}", snap.counters.evaluations);
    println!(
        "  - Function operations: {} mult, {} div",
        snap.counters.multiplications, snap.counters.divisions
    );
    println!(
        "  - {algorithm} internal operations: {} mult, {} div",
        snap.internal_multiplications, snap.internal_divisions
    );
    println!(
        "  - Totals: {} mult, {} div",
        snap.total_multiplications(),
        snap.total_divisions()
    );
}

fn run_sweep(bounds: Bounds, seed: Option<u64>, output: PathBuf, repeats: usize) -> Result<()> {
    let mut evaluator = Evaluator::new(W22);
    let sweep = Sweep::new(repeats, seed)?;

    let mut records = sweep.run_ga(&mut evaluator, &sweep::ga_param_space(bounds))?;
    records.extend(sweep.run_pso(&mut evaluator, &sweep::pso_param_space(bounds))?);

    let is_new = !output.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&output)
        .with_context(|| format!("opening {}", output.display()))?;
    sweep::write_csv(file, &records, is_new)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Results saved to {}", output.display());

    let file = File::open(&output).with_context(|| format!("reading {}", output.display()))?;
    let all = sweep::read_csv(file).context("parsing report")?;
    for algorithm in [Algorithm::Ga, Algorithm::Pso] {
        if let Some(best) = sweep::best_for(&all, algorithm) {
            print_best(best);
        }
    }
    Ok(())
}

fn print_best(record: &SweepRecord) {
    println!("\nBest configuration for {}:", record.algorithm);
    println!("  - Fitness: {:.4}", record.best_fitness);
    match record.algorithm {
        Algorithm::Ga => println!(
            "  - Parameters: pop_size={}, generations={}, crossover_rate={}, mutation_rate={}",
            record.pop_or_swarm_size,
            record.gens_or_iterations,
            record.crossover_rate.unwrap_or_default(),
            record.mutation_rate.unwrap_or_default()
        ),
        Algorithm::Pso => println!(
            "  - Parameters: swarm_size={}, iterations={}, w={}, c1={}, c2={}",
            record.pop_or_swarm_size,
            record.gens_or_iterations,
            record.w.unwrap_or_default(),
            record.c1.unwrap_or_default(),
            record.c2.unwrap_or_default()
        ),
    }
    println!(
        "  - Cost: {} operations in {:.2}s",
        record.total_ops_to_find_min, record.execution_time
    );
}
