use armada::{DEFAULT_NUM_PULLS, DEFAULT_NUM_TRIALS};
use armada::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_curve_summary(label: &str, curve: &[f64]) {
    let checkpoints = [1, 10, 100, 500, curve.len()];
    let points: Vec<String> = checkpoints
        .iter()
        .filter(|&&step| step <= curve.len())
        .map(|&step| format!("step {step}: {:.3}", curve[step - 1]))
        .collect();
    println!("  {label:<40} {}", points.join(", "));
}

fn main() -> armada::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Armada: k-armed bandit strategy comparison\n");
    println!("{}", "=".repeat(60));

    // A single long-running bandit, for diagnostics
    let mut bandit = Bandit::builder()
        .strategy(StrategyConfig::epsilon_greedy(0.1))
        .seed(42)
        .build()?;
    bandit.pull(100_000);

    println!("True means:");
    for (arm, mean) in bandit.true_means().iter().enumerate() {
        println!("  arm {arm}: {mean:+.3}");
    }
    println!("\nEstimates (pulls):");
    for (arm, (estimate, count)) in bandit.estimates().iter().zip(bandit.counts()).enumerate() {
        println!("  arm {arm}: {estimate:+.3} ({count})");
    }
    println!("\nBest arm: {}\n", bandit.best_arm());
    println!("{}", "=".repeat(60));

    let experiments = [
        ("epsilon = 0.1", StrategyConfig::epsilon_greedy(0.1)),
        ("epsilon = 0.01", StrategyConfig::epsilon_greedy(0.01)),
        ("epsilon = 0.0", StrategyConfig::epsilon_greedy(0.0)),
        ("ucb, c = 2", StrategyConfig::ucb(2.0)),
        ("optimistic: epsilon = 0.0, init = 10.0", StrategyConfig::optimistic(10.0, 0.0)),
        ("realistic: epsilon = 0.1, init = 0.0", StrategyConfig::optimistic(0.0, 0.1)),
    ];

    println!("\nAverage reward over 2000 trials:");
    for (label, strategy) in experiments {
        let curve = Simulation::new(strategy, DEFAULT_NUM_TRIALS, DEFAULT_NUM_PULLS)?
            .with_seed(7)
            .run_parallel();
        print_curve_summary(label, &curve);
    }

    Ok(())
}
