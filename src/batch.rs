//! Batch orchestration over flat tensor buffers.
//!
//! Both entry points view the operands as flat row-major buffers and slice
//! them per batch index; they own no data. Iterations are independent. The
//! one shared resource is the pack buffer, which is threaded through
//! explicitly so a parallelizing caller must provide one per task.

use crate::cpu_kernels::Microkernel;
use crate::gemm::{gemm_blocked, TileConfig};
use crate::pack::PackBuffer;

/// Extents of one batched matmul: C[batch,n,o] = A[batch,n,m] · B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatmulDims {
    pub batch: usize,
    pub n: usize,
    pub m: usize,
    pub o: usize,
}

/// One blocked GEMM per batch index, each with its own A, B, and C slice.
pub fn matmul_batch_by_batch<M: Microkernel>(
    micro: &M,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    dims: MatmulDims,
    tiles: TileConfig,
    pack: &mut PackBuffer,
) {
    let MatmulDims { batch, n, m, o } = dims;
    debug_assert!(a.len() >= batch * n * m);
    debug_assert!(b.len() >= batch * m * o);
    debug_assert!(c.len() >= batch * n * o);

    for bidx in 0..batch {
        let ab = &a[bidx * n * m..(bidx + 1) * n * m];
        let bb = &b[bidx * m * o..(bidx + 1) * m * o];
        let cb = &mut c[bidx * n * o..(bidx + 1) * n * o];
        gemm_blocked(micro, ab, bb, cb, n, m, o, tiles, pack);
    }
}

/// Shared right-hand operand: every batch index reuses the same B.
pub fn matmul_batch_by_single<M: Microkernel>(
    micro: &M,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    dims: MatmulDims,
    tiles: TileConfig,
    pack: &mut PackBuffer,
) {
    let MatmulDims { batch, n, m, o } = dims;
    debug_assert!(a.len() >= batch * n * m);
    debug_assert!(b.len() >= m * o);
    debug_assert!(c.len() >= batch * n * o);

    for bidx in 0..batch {
        let ab = &a[bidx * n * m..(bidx + 1) * n * m];
        let cb = &mut c[bidx * n * o..(bidx + 1) * n * o];
        gemm_blocked(micro, ab, b, cb, n, m, o, tiles, pack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_kernels::ScalarKernel;

    fn lcg_data(len: usize, seed: u64) -> Vec<f32> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 33) as f32) / (u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    fn single_call(a: &[f32], b: &[f32], n: usize, m: usize, o: usize) -> Vec<f32> {
        let tiles = TileConfig::new(4, 4, 4);
        let mut pack = PackBuffer::new(&tiles);
        let mut c = vec![0.0; n * o];
        gemm_blocked(&ScalarKernel, a, b, &mut c, n, m, o, tiles, &mut pack);
        c
    }

    #[test]
    fn batch_by_batch_matches_independent_calls() {
        let dims = MatmulDims {
            batch: 3,
            n: 5,
            m: 7,
            o: 6,
        };
        let MatmulDims { batch, n, m, o } = dims;
        let a = lcg_data(batch * n * m, 10);
        let b = lcg_data(batch * m * o, 11);

        let tiles = TileConfig::new(4, 4, 4);
        let mut pack = PackBuffer::new(&tiles);
        let mut c = vec![0.0; batch * n * o];
        matmul_batch_by_batch(&ScalarKernel, &a, &b, &mut c, dims, tiles, &mut pack);

        for bidx in 0..batch {
            let expected = single_call(
                &a[bidx * n * m..(bidx + 1) * n * m],
                &b[bidx * m * o..(bidx + 1) * m * o],
                n,
                m,
                o,
            );
            assert_eq!(&c[bidx * n * o..(bidx + 1) * n * o], &expected[..]);
        }
    }

    #[test]
    fn batch_by_single_matches_independent_calls_with_shared_b() {
        let dims = MatmulDims {
            batch: 3,
            n: 5,
            m: 7,
            o: 6,
        };
        let MatmulDims { batch, n, m, o } = dims;
        let a = lcg_data(batch * n * m, 12);
        let b = lcg_data(m * o, 13);

        let tiles = TileConfig::new(4, 4, 4);
        let mut pack = PackBuffer::new(&tiles);
        let mut c = vec![0.0; batch * n * o];
        matmul_batch_by_single(&ScalarKernel, &a, &b, &mut c, dims, tiles, &mut pack);

        for bidx in 0..batch {
            let expected = single_call(&a[bidx * n * m..(bidx + 1) * n * m], &b, n, m, o);
            assert_eq!(&c[bidx * n * o..(bidx + 1) * n * o], &expected[..]);
        }
    }
}
