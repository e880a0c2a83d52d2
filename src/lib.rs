//! bgemm-kernels: batched, cache-blocked f32 matrix multiplication.
//!
//! This crate provides the "matmul" operator kernel for an inference-graph
//! runtime:
//! - **Runtime Kernel Selection**: scalar/AVX2/AVX-512/NEON picked at
//!   startup, with a `BGEMM_KERNEL` environment override
//! - **One Skeleton**: reference and vectorized paths share dispatch,
//!   batching, tiling, and packing; only the innermost compute step differs
//! - **Two Batching Semantics**: per-batch B (rank-3) or one shared B
//!   (rank-2), selected by the rank of B's shape
//! - **Raw Slice APIs**: the engine borrows caller-owned buffers and never
//!   allocates operand storage
//!
//! # Quick Start
//!
//! ```ignore
//! use bgemm_kernels::{init_matmul_kernel, TensorView, TensorViewMut};
//!
//! let kernel = init_matmul_kernel().expect("no usable matmul kernel");
//! kernel.matmul(
//!     &TensorView::new(&a, &[batch, n, m]),
//!     &TensorView::new(&b, &[m, o]),
//!     &mut TensorViewMut::new(&mut c, &[batch, n, o]),
//! );
//! ```

pub mod types;

// CPU microkernels and runtime ISA detection
pub mod cpu_kernels;

// The blocked GEMM core: packing, tiled driver, batch orchestration,
// shape dispatch
pub mod pack;
pub mod gemm;
pub mod batch;
pub mod dispatch;

// Kernel strategy seam and startup-time selection
pub mod kernel;
pub mod selector;

// Naive triple-loop oracle for the test suite
pub mod reference;

pub use types::{DType, TensorView, TensorViewMut};

pub use cpu_kernels::{get_isa_level, IsaLevel, Microkernel, ScalarKernel};

#[cfg(target_arch = "x86_64")]
pub use cpu_kernels::{Avx2Kernel, Avx512Kernel};
#[cfg(target_arch = "aarch64")]
pub use cpu_kernels::NeonKernel;

pub use batch::{matmul_batch_by_batch, matmul_batch_by_single, MatmulDims};
pub use dispatch::{batched_matmul, derive_dims};
pub use gemm::{gemm_blocked, TileConfig};
pub use pack::{pack_b_tile, PackBuffer};

pub use kernel::{BlockedKernel, KernelError, KernelResult, MatmulKernel};
pub use selector::{
    force_matmul_kernel, init_matmul_kernel, matmul_kernel, select_matmul_kernel, KERNEL_ENV,
};

pub use reference::matmul_naive;
