//! # PixelFlow SIMD
//!
//! Portable, compile-time dispatched SIMD packs.
//!
//! ## Design
//!
//! **The (element, width) pair IS the instruction selector.**
//!
//! - `Pack<f32, 4>`: an SSE2 register on x86_64, a NEON register on aarch64
//! - `Pack<f32, 8>`: an AVX2 register when the build enables it
//! - `Pack<u8, 4>`: four scalars everywhere, since no register fits
//!
//! Every pack is backed by a [`Register`](backend::Register). The register
//! traits carry a lane-by-lane default for each method, so native registers
//! only override what their instruction set accelerates and the results are
//! the same on every backend. The third type parameter pins the register,
//! which is how the fallback is tested against the native one:
//!
//! ```
//! use pixelflow_simd::{backend::Lanes, Pack};
//!
//! let native = Pack::<f32, 4>::from_array([1.0, 2.0, 3.0, 4.0]);
//! let scalar = Pack::<f32, 4, Lanes<f32, 4>>::from_array([1.0, 2.0, 3.0, 4.0]);
//! assert_eq!((native * native).to_array(), (scalar * scalar).to_array());
//! ```
//!
//! Instruction sets are chosen at build time (see `build.rs`); dispatch never
//! inspects the CPU at run time. [`capabilities`] reports what was compiled in
//! next to what the host offers.
//!
//! ## Layers
//!
//! - [`backend`]: register traits, native registers, the selection table
//! - [`Pack`]: memory, arithmetic, masks, rounding, conversion, swizzles
//! - [`transcendental`], [`interp`], [`curve`]: compounds built on packs
//! - [`accuracy`], [`capabilities`]: diagnostics for the numeric contract

#![deny(unsafe_op_in_unsafe_fn)]

pub mod accuracy;
pub mod backend;
pub mod bits;
pub mod capabilities;
pub mod convert;
pub mod curve;
pub mod element;
pub mod error;
pub mod half;
pub mod ieee;
pub mod interp;
pub mod mask;
pub mod math;
pub mod pack;
pub mod poly;
pub mod swizzle;
pub mod transcendental;

pub use bits::bit_cast;
pub use element::{Cast, Element, Float, Int};
pub use half::{f32_to_half, half_to_f32, Half};
pub use pack::Pack;
pub use swizzle::Swizzle;

// ============================================================================
// Aliases
// ============================================================================

/// A comparison result: a pack of the operand type holding 0 or 1 per lane.
pub type Mask<T, const N: usize> = Pack<T, N>;

pub type F32x2 = Pack<f32, 2>;
pub type F32x4 = Pack<f32, 4>;
pub type F32x8 = Pack<f32, 8>;
pub type F64x2 = Pack<f64, 2>;
pub type F64x4 = Pack<f64, 4>;
pub type F64x8 = Pack<f64, 8>;
pub type I32x2 = Pack<i32, 2>;
pub type I32x4 = Pack<i32, 4>;
pub type I32x8 = Pack<i32, 8>;
pub type U32x2 = Pack<u32, 2>;
pub type U32x4 = Pack<u32, 4>;
pub type U32x8 = Pack<u32, 8>;
pub type I16x8 = Pack<i16, 8>;
pub type U16x8 = Pack<u16, 8>;
pub type U8x8 = Pack<u8, 8>;
