//! What the build compiled in, what the host offers, and which register each pack uses.
//!
//! Everything here is informational. Register selection is fixed by the cfg
//! flags from `build.rs`; host detection never changes which code runs.

use bitflags::bitflags;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::backend::{Register, Width};
use crate::element::Element;

bitflags! {
    /// SIMD instruction set extensions relevant to the registers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Capabilities: u32 {
        const SSE2 = 1 << 0;
        const SSE41 = 1 << 1;
        const AVX2 = 1 << 2;
        const FMA = 1 << 3;
        const F16C = 1 << 4;
        const NEON = 1 << 5;
        /// Native registers disabled at build time.
        const FORCED_SCALAR = 1 << 31;
    }
}

/// Capabilities the registers were compiled against.
pub const COMPILED: Capabilities = compiled();

const fn compiled() -> Capabilities {
    let mut bits = 0;
    if cfg!(pixelflow_sse2) {
        bits |= Capabilities::SSE2.bits();
    }
    if cfg!(pixelflow_sse41) {
        bits |= Capabilities::SSE41.bits();
    }
    if cfg!(pixelflow_avx2) {
        bits |= Capabilities::AVX2.bits();
    }
    if cfg!(pixelflow_fma) {
        bits |= Capabilities::FMA.bits();
    }
    if cfg!(pixelflow_f16c) {
        bits |= Capabilities::F16C.bits();
    }
    if cfg!(pixelflow_neon) {
        bits |= Capabilities::NEON.bits();
    }
    if cfg!(pixelflow_force_scalar) {
        bits |= Capabilities::FORCED_SCALAR.bits();
    }
    Capabilities::from_bits_retain(bits)
}

static HOST: Lazy<Capabilities> = Lazy::new(detect_host);

/// Extensions the running CPU supports, detected on first call.
pub fn host() -> Capabilities {
    *HOST
}

#[allow(unused_mut)]
fn detect_host() -> Capabilities {
    let mut caps = Capabilities::empty();

    #[cfg(target_arch = "x86_64")]
    {
        use std::arch::is_x86_feature_detected;
        let table = [
            (is_x86_feature_detected!("sse2"), Capabilities::SSE2),
            (is_x86_feature_detected!("sse4.1"), Capabilities::SSE41),
            (is_x86_feature_detected!("avx2"), Capabilities::AVX2),
            (is_x86_feature_detected!("fma"), Capabilities::FMA),
            (is_x86_feature_detected!("f16c"), Capabilities::F16C),
        ];
        for (present, cap) in table {
            caps.set(cap, present);
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        caps.set(Capabilities::NEON, std::arch::is_aarch64_feature_detected!("neon"));
    }

    caps
}

/// Register chosen for one (element, lane count) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub element: &'static str,
    pub lanes: usize,
    pub backend: &'static str,
    pub native: bool,
}

impl Selection {
    pub fn of<T: Width<N>, const N: usize>() -> Self {
        Self {
            element: T::NAME,
            lanes: N,
            backend: <T::Reg as Register<T, N>>::BACKEND,
            native: <T::Reg as Register<T, N>>::NATIVE,
        }
    }
}

macro_rules! selections {
    ($($t:ty => [$($n:literal),*];)*) => {
        vec![$($(Selection::of::<$t, $n>(),)*)*]
    };
}

/// The full selection table, one entry per supported (element, lane count).
pub fn selections() -> Vec<Selection> {
    selections! {
        f32 => [2, 4, 8];
        f64 => [2, 4, 8];
        i32 => [2, 4, 8];
        u32 => [2, 4, 8];
        i16 => [2, 4, 8];
        u16 => [2, 4, 8];
        u8 => [2, 4, 8];
        i64 => [2, 4, 8];
        u64 => [2, 4, 8];
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    pub compiled: Capabilities,
    pub host: Capabilities,
    /// Supported by the host but not compiled in.
    pub unused: Capabilities,
    pub selections: Vec<Selection>,
}

impl CapabilityReport {
    pub fn new() -> Self {
        let compiled = COMPILED;
        let host = host();
        let unused = host.difference(compiled);
        let selections = selections();

        let native = selections.iter().filter(|s| s.native).count();
        info!(
            "SIMD capabilities: compiled [{:?}], host [{:?}], {native}/{} packs native",
            compiled,
            host,
            selections.len()
        );
        if compiled.contains(Capabilities::FORCED_SCALAR) {
            info!("Native registers disabled by force-scalar");
        }
        if !unused.is_empty() {
            warn!(
                "Host supports {:?} but this build does not use it; rebuild with matching target features",
                unused
            );
        }

        Self {
            compiled,
            host,
            unused,
            selections,
        }
    }
}

impl Default for CapabilityReport {
    fn default() -> Self {
        Self::new()
    }
}
