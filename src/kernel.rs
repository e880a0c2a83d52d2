//! Kernel strategy interface shared with the host runtime.
//!
//! The host binds one [`MatmulKernel`] at startup and invokes it per
//! "matmul" node. Reference and vectorized paths are instances of the same
//! [`BlockedKernel`] skeleton with different microkernels, so they share
//! dispatch, batching, tiling, and packing and differ only in the innermost
//! compute step.

use thiserror::Error;

use crate::cpu_kernels::Microkernel;
use crate::dispatch::batched_matmul;
use crate::gemm::TileConfig;
use crate::types::{DType, TensorView, TensorViewMut};

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("invalid kernel override: {0}")]
    InvalidOverride(String),
    #[error("kernel '{0}' is not supported on this cpu")]
    UnsupportedIsa(&'static str),
}

pub type KernelResult<T> = Result<T, KernelError>;

/// A concrete matmul implementation the host binds at startup.
///
/// One operation: compute C = A·B given the three tensor buffers in fixed
/// order A, B, C. The engine trusts the caller's contracts (valid shapes,
/// f32 buffers, C pre-allocated to `batch * n * o`) and returns nothing;
/// success is C being fully populated. A host that cannot resolve a kernel
/// at startup must treat that as fatal (see [`crate::selector`]).
pub trait MatmulKernel: Send + Sync {
    fn name(&self) -> &'static str;

    fn matmul(&self, a: &TensorView<'_>, b: &TensorView<'_>, c: &mut TensorViewMut<'_>);
}

/// The tiling/packing/batching skeleton, parameterized over the innermost
/// compute step.
#[derive(Debug, Clone, Copy)]
pub struct BlockedKernel<M: Microkernel> {
    micro: M,
    tiles: TileConfig,
}

impl<M: Microkernel> BlockedKernel<M> {
    pub fn new(micro: M) -> Self {
        Self {
            micro,
            tiles: TileConfig::default(),
        }
    }

    pub fn with_tiles(micro: M, tiles: TileConfig) -> Self {
        Self { micro, tiles }
    }

    pub fn tiles(&self) -> TileConfig {
        self.tiles
    }
}

impl<M: Microkernel> MatmulKernel for BlockedKernel<M> {
    fn name(&self) -> &'static str {
        self.micro.name()
    }

    fn matmul(&self, a: &TensorView<'_>, b: &TensorView<'_>, c: &mut TensorViewMut<'_>) {
        debug_assert_eq!(a.dtype, DType::F32);
        debug_assert_eq!(b.dtype, DType::F32);
        debug_assert_eq!(c.dtype, DType::F32);

        batched_matmul(&self.micro, a.data, b.data, c.data, a.shape, b.shape, self.tiles);
    }
}
