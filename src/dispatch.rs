//! Shape interpretation and batching-semantics dispatch.
//!
//! The sole place where operand shapes are read. The rank of B (3 or 2)
//! selects per-batch versus shared-B semantics; there is no explicit flag.

use crate::batch::{matmul_batch_by_batch, matmul_batch_by_single, MatmulDims};
use crate::cpu_kernels::Microkernel;
use crate::gemm::TileConfig;
use crate::pack::PackBuffer;

/// Derive extents from the operand shapes.
///
/// A is read as `[batch, n, m]` from its last three extents (leading
/// extents beyond three are ignored); `o` is B's last extent.
pub fn derive_dims(a_shape: &[usize], b_shape: &[usize]) -> MatmulDims {
    debug_assert!(a_shape.len() >= 3);
    debug_assert!(b_shape.len() == 2 || b_shape.len() == 3);

    let a_tail = &a_shape[a_shape.len() - 3..];
    MatmulDims {
        batch: a_tail[0],
        n: a_tail[1],
        m: a_tail[2],
        o: b_shape[b_shape.len() - 1],
    }
}

/// Batched matmul entry: route on the rank of B's shape.
///
/// One pack buffer is allocated here and reused across every K-tile and
/// batch element of the call.
pub fn batched_matmul<M: Microkernel>(
    micro: &M,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    a_shape: &[usize],
    b_shape: &[usize],
    tiles: TileConfig,
) {
    let dims = derive_dims(a_shape, b_shape);
    let mut pack = PackBuffer::new(&tiles);
    if b_shape.len() == 3 {
        matmul_batch_by_batch(micro, a, b, c, dims, tiles, &mut pack);
    } else {
        matmul_batch_by_single(micro, a, b, c, dims, tiles, &mut pack);
    }
}
