//! Measured accuracy of the approximated functions and the bounds they must meet.
//!
//! [`measure`] sweeps each function over a deterministic grid on `Pack<T, 4>`
//! and compares against the standard library evaluated in f64. Exponentials,
//! reciprocals and roots use relative error; logarithms use absolute error.
//!
//! [`ErrorBounds`] holds the documented contract and can be overridden from
//! JSON. Tables are replaced whole: a file that mentions `f32` must give all
//! six bounds for it, and an omitted element keeps its defaults.

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::backend::{FloatRegister, Width};
use crate::element::Float;
use crate::error::{AccuracyError, ConfigError};
use crate::pack::Pack;

/// Samples per function and element type. A multiple of the pack width.
pub const SAMPLES: usize = 4096;

// ============================================================================
// Functions under test
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Exp2Fast,
    Exp2Precise,
    Log2Fast,
    Log2Precise,
    Rsqrt,
    Rcp,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::Exp2Fast,
        Function::Exp2Precise,
        Function::Log2Fast,
        Function::Log2Precise,
        Function::Rsqrt,
        Function::Rcp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Exp2Fast => "exp2_fast",
            Function::Exp2Precise => "exp2_precise",
            Function::Log2Fast => "log2_fast",
            Function::Log2Precise => "log2_precise",
            Function::Rsqrt => "rsqrt",
            Function::Rcp => "rcp",
        }
    }

    /// Whether the bound is on relative (rather than absolute) error.
    pub fn is_relative(self) -> bool {
        !matches!(self, Function::Log2Fast | Function::Log2Precise)
    }

    fn eval<T>(self, x: Pack<T, 4>) -> Pack<T, 4>
    where
        T: Float + Width<4>,
        T::Reg: FloatRegister<T, 4>,
    {
        match self {
            Function::Exp2Fast => x.fast_exp2(),
            Function::Exp2Precise => x.exp2(),
            Function::Log2Fast => x.fast_log2(),
            Function::Log2Precise => x.log2(),
            Function::Rsqrt => x.rsqrt(),
            Function::Rcp => x.rcp(),
        }
    }

    fn reference(self, x: f64) -> f64 {
        match self {
            Function::Exp2Fast | Function::Exp2Precise => x.exp2(),
            Function::Log2Fast | Function::Log2Precise => x.log2(),
            Function::Rsqrt => 1.0 / x.sqrt(),
            Function::Rcp => 1.0 / x,
        }
    }

    /// Sample points for `T`: every result stays in the normal range.
    fn grid<T: Float>(self) -> impl Iterator<Item = T> {
        let limit = (T::EXPONENT_BIAS - 7) as f64;
        let (lo, hi) = (T::pow2(1 - T::EXPONENT_BIAS).to_f64(), T::pow2(T::EXPONENT_BIAS - 1).to_f64());
        let exp = matches!(self, Function::Exp2Fast | Function::Exp2Precise);
        let step = 1.0 / (SAMPLES - 1) as f64;
        (0..SAMPLES).map(move |i| {
            let s = i as f64 * step;
            let x = if exp {
                -limit + 2.0 * limit * s
            } else {
                (lo.ln() + (hi.ln() - lo.ln()) * s).exp().clamp(lo, hi)
            };
            T::from_f64(x)
        })
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Maximum errors for one element type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBounds {
    pub exp2_fast: f64,
    pub exp2_precise: f64,
    pub log2_fast: f64,
    pub log2_precise: f64,
    pub rsqrt: f64,
    pub rcp: f64,
}

impl TierBounds {
    pub const F32: Self = Self {
        exp2_fast: 1e-6,
        exp2_precise: 5e-7,
        log2_fast: 5e-5,
        log2_precise: 1e-5,
        rsqrt: 5e-7,
        rcp: 5e-7,
    };

    pub const F64: Self = Self {
        exp2_fast: 5e-7,
        exp2_precise: 1e-14,
        log2_fast: 3e-5,
        log2_precise: 5e-13,
        rsqrt: 1e-15,
        rcp: 1e-15,
    };

    pub fn get(&self, function: Function) -> f64 {
        match function {
            Function::Exp2Fast => self.exp2_fast,
            Function::Exp2Precise => self.exp2_precise,
            Function::Log2Fast => self.log2_fast,
            Function::Log2Precise => self.log2_precise,
            Function::Rsqrt => self.rsqrt,
            Function::Rcp => self.rcp,
        }
    }

    fn validate(&self, element: &'static str) -> Result<(), ConfigError> {
        for function in Function::ALL {
            let value = self.get(function);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidBound {
                    element,
                    field: function.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Accuracy contract for every measured element type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBounds {
    pub f32: TierBounds,
    pub f64: TierBounds,
}

impl Default for ErrorBounds {
    fn default() -> Self {
        Self {
            f32: TierBounds::F32,
            f64: TierBounds::F64,
        }
    }
}

impl ErrorBounds {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let bounds: Self = serde_json::from_str(json)?;
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.f32.validate("f32")?;
        self.f64.validate("f64")
    }

    /// Table for an element type name (`"f32"` or `"f64"`).
    pub fn tier(&self, element: &str) -> Option<&TierBounds> {
        match element {
            "f32" => Some(&self.f32),
            "f64" => Some(&self.f64),
            _ => None,
        }
    }
}

// ============================================================================
// Measurement
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub function: Function,
    pub element: String,
    pub max_error: f64,
    /// Input at which `max_error` occurred.
    pub worst_input: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub function: Function,
    pub element: String,
    pub measured: f64,
    pub bound: f64,
    pub worst_input: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: error {:e} > {:e} at x = {:e}",
            self.element, self.function, self.measured, self.bound, self.worst_input
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub measurements: Vec<Measurement>,
}

impl AccuracyReport {
    /// Combines the measurements of two reports.
    pub fn merge(mut self, other: AccuracyReport) -> Self {
        self.measurements.extend(other.measurements);
        self
    }

    /// Every measurement whose error exceeds its bound.
    pub fn violations(&self, bounds: &ErrorBounds) -> Vec<Violation> {
        self.measurements
            .iter()
            .filter_map(|m| {
                let bound = bounds.tier(&m.element)?.get(m.function);
                // NaN errors fail too.
                (!(m.max_error <= bound)).then(|| Violation {
                    function: m.function,
                    element: m.element.clone(),
                    measured: m.max_error,
                    bound,
                    worst_input: m.worst_input,
                })
            })
            .collect()
    }

    pub fn check(&self, bounds: &ErrorBounds) -> Result<(), AccuracyError> {
        let violations = self.violations(bounds);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AccuracyError::BoundsExceeded { violations })
        }
    }
}

/// Sweeps every [`Function`] for element type `T` on the default 4-lane pack.
pub fn measure<T>() -> AccuracyReport
where
    T: Float + Width<4>,
    T::Reg: FloatRegister<T, 4>,
{
    let measurements = Function::ALL
        .into_iter()
        .map(|function| measure_function::<T>(function))
        .collect();
    AccuracyReport { measurements }
}

fn measure_function<T>(function: Function) -> Measurement
where
    T: Float + Width<4>,
    T::Reg: FloatRegister<T, 4>,
{
    let inputs: Vec<T> = function.grid::<T>().collect();
    let mut max_error = 0.0f64;
    let mut worst_input = f64::NAN;

    for chunk in inputs.chunks_exact(4) {
        let x = Pack::<T, 4>::load(chunk);
        let out = function.eval(x).to_array();
        for (input, got) in chunk.iter().zip(out) {
            let (input, got) = (input.to_f64(), got.to_f64());
            let expected = function.reference(input);
            let diff = (got - expected).abs();
            let error = if got.is_nan() {
                f64::INFINITY
            } else if function.is_relative() {
                diff / expected.abs()
            } else {
                diff
            };
            if error > max_error || worst_input.is_nan() {
                max_error = error;
                worst_input = input;
            }
        }
    }

    debug!(
        "{} {}: max error {:e} at x = {:e} over {} samples ({})",
        T::NAME,
        function,
        max_error,
        worst_input,
        inputs.len(),
        Pack::<T, 4>::BACKEND
    );

    Measurement {
        function,
        element: T::NAME.to_string(),
        max_error,
        worst_input,
        samples: inputs.len(),
    }
}
