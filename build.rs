// build.rs

//! Resolves the SIMD capability set once, at build time.
//!
//! Every native register in `src/backend` is gated on one of the `pixelflow_*`
//! cfg flags emitted here. The flags are derived from the *target's* enabled
//! features (`CARGO_CFG_TARGET_FEATURE`), not from the build host, so
//! `-C target-cpu=...` and cross-compilation select the right registers.

use std::env;

/// Every cfg flag this script may emit.
const FLAGS: &[&str] = &[
    "pixelflow_sse2",
    "pixelflow_sse41",
    "pixelflow_avx2",
    "pixelflow_fma",
    "pixelflow_f16c",
    "pixelflow_neon",
    "pixelflow_force_scalar",
];

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-env-changed=PIXELFLOW_SIMD_FORCE_SCALAR");

    for flag in FLAGS {
        println!("cargo::rustc-check-cfg=cfg({flag})");
    }

    let force_scalar = env::var_os("CARGO_FEATURE_FORCE_SCALAR").is_some()
        || env::var("PIXELFLOW_SIMD_FORCE_SCALAR")
            .map(|v| !v.is_empty() && v != "0")
            .unwrap_or(false);

    if force_scalar {
        // Only the fallback registers are compiled.
        println!("cargo::rustc-cfg=pixelflow_force_scalar");
        println!("cargo::warning=pixelflow-simd: native SIMD registers disabled (force-scalar)");
        return;
    }

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let has = |name: &str| features.split(',').any(|f| f == name);

    match arch.as_str() {
        "x86_64" => {
            // SSE2 is part of the x86_64 baseline.
            println!("cargo::rustc-cfg=pixelflow_sse2");
            if has("sse4.1") {
                println!("cargo::rustc-cfg=pixelflow_sse41");
            }
            // The 256-bit registers use integer lanes for bit manipulation, so they need AVX2.
            if has("avx2") {
                println!("cargo::rustc-cfg=pixelflow_avx2");
            }
            if has("fma") {
                println!("cargo::rustc-cfg=pixelflow_fma");
            }
            if has("f16c") {
                println!("cargo::rustc-cfg=pixelflow_f16c");
            }
        }
        "aarch64" => {
            // ARM always has NEON on aarch64
            if has("neon") {
                println!("cargo::rustc-cfg=pixelflow_neon");
            }
        }
        _ => {}
    }
}
