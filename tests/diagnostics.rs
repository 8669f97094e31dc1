use pixelflow_simd::accuracy::{measure, ErrorBounds, Function, TierBounds};
use pixelflow_simd::capabilities::{Capabilities, CapabilityReport, COMPILED};
use pixelflow_simd::error::{AccuracyError, ConfigError};
use std::fs;
use std::path::PathBuf;
use test_log::test; // Captures the report's log lines

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pixelflow-simd-{}-{name}", std::process::id()))
}

#[test]
fn test_capability_report_serializes() {
    let report = CapabilityReport::new();
    assert_eq!(report.compiled, COMPILED);
    assert_eq!(report.selections.len(), 27);

    let json = serde_json::to_value(&report).unwrap();
    let selections = json["selections"].as_array().unwrap();
    assert!(selections.iter().all(|s| s["backend"].is_string()));
    let f64x8 = selections
        .iter()
        .find(|s| s["element"] == "f64" && s["lanes"] == 8)
        .unwrap();
    // No 512-bit registers: eight f64 lanes always use the fallback.
    assert_eq!(f64x8["native"], false);

    if COMPILED.contains(Capabilities::FORCED_SCALAR) {
        assert!(report.selections.iter().all(|s| !s.native));
    }
}

#[test]
fn test_default_contract_passes() {
    let report = measure::<f32>().merge(measure::<f64>());
    report.check(&ErrorBounds::default()).unwrap();
    for m in &report.measurements {
        assert!(m.samples > 0);
        assert!(m.max_error.is_finite(), "{} {}", m.element, m.function);
    }
}

#[test]
fn test_bounds_file_round_trip() {
    let path = temp_path("bounds.json");
    let mut bounds = ErrorBounds::default();
    bounds.f32.log2_fast = 1e-4;
    fs::write(&path, serde_json::to_string_pretty(&bounds).unwrap()).unwrap();

    let loaded = ErrorBounds::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(loaded, bounds);
    assert_eq!(loaded.f64, TierBounds::F64);
}

#[test]
fn test_missing_bounds_file_is_io_error() {
    let path = temp_path("missing.json");
    let err = ErrorBounds::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    let message = err.to_string();
    assert!(message.starts_with("Failed to read error bounds from"), "{message}");
    assert!(message.contains("missing.json"));
}

#[test]
fn test_violation_message_names_function() {
    let mut bounds = ErrorBounds::default();
    bounds.f64.rcp = 0.0;
    bounds.f64.rsqrt = 0.0;
    let report = measure::<f64>();
    let violations = report.violations(&bounds);
    // A zero bound only fails if the estimate is off by at least an ulp somewhere.
    let expected: Vec<Function> = report
        .measurements
        .iter()
        .filter(|m| matches!(m.function, Function::Rcp | Function::Rsqrt) && m.max_error > 0.0)
        .map(|m| m.function)
        .collect();
    assert_eq!(violations.iter().map(|v| v.function).collect::<Vec<_>>(), expected);

    match report.check(&bounds) {
        Ok(()) => assert!(expected.is_empty()),
        Err(AccuracyError::BoundsExceeded { violations }) => {
            let message = AccuracyError::BoundsExceeded { violations }.to_string();
            assert!(message.contains("measurement(s) exceed their bound"));
            assert!(message.contains("f64"));
        }
    }
}
