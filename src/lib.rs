//! # matview
//!
//! Aliasing-safe fixed-size matrix operations over caller-owned storage.
//! no-std compatible, no heap allocation, suitable for firmware control
//! loops and sensor fusion.
//!
//! ## Quick start
//!
//! ```
//! use matview::{MatrixView, Workspace};
//!
//! let mut a = [4.0_f32, 7.0, 2.0, 6.0];
//! let mut b = [0.0_f32; 4];
//! let mut r = [0.0_f32; 4];
//!
//! let mut va = MatrixView::new(&mut a, 2, 2).unwrap();
//! let mut vb = MatrixView::new(&mut b, 2, 2).unwrap();
//! let mut vr = MatrixView::new(&mut r, 2, 2).unwrap();
//!
//! let mut ws = Workspace::new();
//! vb.copy_from(&va).unwrap();
//! ws.invert_in_place(&mut va).unwrap(); // a = a⁻¹, staged through scratch
//! ws.multiply(&mut vr, &va, &vb).unwrap(); // r = a⁻¹ · a
//!
//! assert!((vr.at(0, 0) - 1.0).abs() < 1e-5);
//! assert!(vr.at(0, 1).abs() < 1e-5);
//! ```
//!
//! ## Modules
//!
//! - [`view`] — [`MatrixView`], a `Copy` descriptor of `rows`, `cols` and a
//!   row-major slice of [`Cell`](core::cell::Cell)s. Views never own storage;
//!   several may describe one buffer. Clear, copy, 1-based element access,
//!   diagonal and block moves, and a diagnostic `Display`.
//!
//! - [`workspace`] — [`Workspace`], which owns the [`Scratch`] buffer and a
//!   [`Kernel`]. Add, subtract, scale, multiply, transpose, invert and
//!   `f64` inversion. Validates shapes first, stages any operand the
//!   destination would clobber, then delegates to the kernel.
//!
//! - [`kernel`] — the [`Kernel`] trait for the arithmetic primitives and the
//!   portable [`SoftKernel`].
//!
//! - [`traits`] — element traits: [`Scalar`] (any numeric element) and
//!   [`FloatScalar`] (`f32`/`f64`, needed for inversion).
//!
//! ## Limits
//!
//! A view holds at most [`MAX_ELEMENTS`] elements (a 12×12 matrix). Scratch
//! capacity is [`SCRATCH_LEN`] elements per precision.
//!
//! ## Cargo features
//!
//! | Feature   | Default | Description |
//! |-----------|---------|-------------|
//! | `std`     | yes     | `std::error::Error`, hardware FPU via system libm, thread-local workspace |
//! | `tracing` | no      | `trace!`/`debug!` events for staging and numeric failures |
//! | `all`     | no      | `std` + `tracing` |
//!
//! Without `std`, float math uses the pure-Rust `libm` fallback.

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod trace;

mod error;
pub mod kernel;
pub mod traits;
pub mod view;
pub mod workspace;

pub use error::{MatrixError, Status};
pub use kernel::{Kernel, SoftKernel};
pub use traits::{FloatScalar, Scalar};
pub use view::{cells, MatrixView, ViewInfo};
pub use workspace::{Scratch, Workspace};

/// Largest row or column count of a square view.
pub const MAX_DIMENSION: usize = 12;

/// Largest element count of any view.
pub const MAX_ELEMENTS: usize = MAX_DIMENSION * MAX_DIMENSION;

/// Scratch capacity: two full-size matrices.
pub const SCRATCH_LEN: usize = 2 * MAX_ELEMENTS;
