// In src/main.rs

//! `pixelflow-simd` diagnostics: which registers this build uses and how
//! accurate the approximations are on this machine.
//!
//! Usage: `pixelflow-simd [BOUNDS.json]`

use anyhow::Context;
use log::{error, info};
use serde::Serialize;

use pixelflow_simd::accuracy::{self, AccuracyReport, ErrorBounds};
use pixelflow_simd::capabilities::CapabilityReport;

#[derive(Serialize)]
struct Diagnostics {
    capabilities: CapabilityReport,
    bounds: ErrorBounds,
    accuracy: AccuracyReport,
}

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let bounds = match std::env::args_os().nth(1) {
        Some(path) => {
            let bounds = ErrorBounds::load(&path)
                .with_context(|| format!("Failed to load error bounds from {}", path.to_string_lossy()))?;
            info!("Error bounds loaded from {}", path.to_string_lossy());
            bounds
        }
        None => {
            info!("Using default error bounds");
            ErrorBounds::default()
        }
    };

    let capabilities = CapabilityReport::new();

    info!("Measuring approximation accuracy ({} samples per function)", accuracy::SAMPLES);
    let accuracy = accuracy::measure::<f32>().merge(accuracy::measure::<f64>());

    let diagnostics = Diagnostics {
        capabilities,
        bounds,
        accuracy,
    };
    let json = serde_json::to_string_pretty(&diagnostics).context("Failed to serialize diagnostics")?;
    println!("{json}");

    if let Err(e) = diagnostics.accuracy.check(&diagnostics.bounds) {
        error!("{e}");
        return Err(e).context("Accuracy check failed");
    }

    info!("All measurements within bounds");
    Ok(())
}
