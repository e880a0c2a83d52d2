//! Scalar microkernel: the reference innermost step.

use super::Microkernel;

/// Chunk width 1: one output column at a time, with the same k-innermost
/// accumulation order as the vector kernels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl Microkernel for ScalarKernel {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn accumulate(
        &self,
        a: &[f32],
        lda: usize,
        bp: &[f32],
        c: &mut [f32],
        ldc: usize,
        mc: usize,
        kc: usize,
        nc: usize,
    ) {
        for i in 0..mc {
            let a_row = &a[i * lda..i * lda + kc];
            for col in 0..nc {
                let mut acc = c[i * ldc + col];
                for (k, &av) in a_row.iter().enumerate() {
                    acc = av.mul_add(bp[k * nc + col], acc);
                }
                c[i * ldc + col] = acc;
            }
        }
    }
}
