//! NEON microkernel (4 f32 lanes).

use std::arch::aarch64::*;

use super::Microkernel;

const LANES: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct NeonKernel;

impl NeonKernel {
    /// NEON is baseline on aarch64.
    pub fn is_available() -> bool {
        true
    }
}

impl Microkernel for NeonKernel {
    fn name(&self) -> &'static str {
        "neon"
    }

    #[inline(always)]
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
        unsafe {
            accumulate_neon(a.as_ptr(), lda, bp.as_ptr(), c.as_mut_ptr(), ldc, mc, kc, nc);
        }
    }
}

/// # Safety
///
/// Caller must ensure the tile extents fit inside the provided buffers.
#[target_feature(enable = "neon")]
#[allow(clippy::too_many_arguments)]
unsafe fn accumulate_neon(
    a: *const f32,
    lda: usize,
    bp: *const f32,
    c: *mut f32,
    ldc: usize,
    mc: usize,
    kc: usize,
    nc: usize,
) {
    for i in 0..mc {
        let a_row = a.add(i * lda);
        let c_row = c.add(i * ldc);

        let mut col = 0usize;
        while col + LANES <= nc {
            let mut acc = vld1q_f32(c_row.add(col));
            let mut bv = bp.add(col);
            for k in 0..kc {
                acc = vfmaq_n_f32(acc, vld1q_f32(bv), *a_row.add(k));
                bv = bv.add(nc);
            }
            vst1q_f32(c_row.add(col), acc);
            col += LANES;
        }

        // Tail columns narrower than one vector.
        for j in col..nc {
            let mut acc = *c_row.add(j);
            for k in 0..kc {
                acc = (*a_row.add(k)).mul_add(*bp.add(k * nc + j), acc);
            }
            *c_row.add(j) = acc;
        }
    }
}
