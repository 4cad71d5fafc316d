use armada::SimulationConfig;
use armada::prelude::*;
use tracing_subscriber::EnvFilter;

// Constant step vs sample average on random-walk rewards, configured from JSON.
const EXPERIMENTS: [(&str, &str); 2] = [
    (
        "constant alpha",
        r#"{ "strategy": "nonstationary", "constant_alpha": true, "num_pulls": 10000, "seed": 1 }"#,
    ),
    (
        "sample average",
        r#"{ "strategy": "nonstationary", "constant_alpha": false, "num_pulls": 10000, "seed": 1 }"#,
    ),
];

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    for (label, json) in EXPERIMENTS {
        let config: SimulationConfig = serde_json::from_str(json)?;
        let curve = Simulation::from_config(&config)?.run_parallel();

        let back = &curve[curve.len() / 2..];
        let back_mean = back.iter().sum::<f64>() / back.len() as f64;
        println!(
            "{label:<16} final step: {:.3}, back-half mean: {back_mean:.3}",
            curve[curve.len() - 1]
        );
    }

    Ok(())
}
