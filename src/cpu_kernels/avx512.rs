//! AVX-512 microkernel (16 f32 lanes).

use std::arch::x86_64::*;

use super::Microkernel;

const LANES: usize = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct Avx512Kernel;

impl Avx512Kernel {
    /// Runtime availability probe used by the selector.
    pub fn is_available() -> bool {
        is_x86_feature_detected!("avx512f")
    }
}

impl Microkernel for Avx512Kernel {
    fn name(&self) -> &'static str {
        "avx512"
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
            accumulate_avx512(a.as_ptr(), lda, bp.as_ptr(), c.as_mut_ptr(), ldc, mc, kc, nc);
        }
    }
}

/// # Safety
///
/// Caller must ensure AVX-512F is available and that the tile extents fit
/// inside the provided buffers.
#[target_feature(enable = "avx512f")]
#[allow(clippy::too_many_arguments)]
unsafe fn accumulate_avx512(
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
            let mut acc = _mm512_loadu_ps(c_row.add(col));
            let mut bv = bp.add(col);
            for k in 0..kc {
                let va = _mm512_set1_ps(*a_row.add(k));
                acc = _mm512_fmadd_ps(va, _mm512_loadu_ps(bv), acc);
                bv = bv.add(nc);
            }
            _mm512_storeu_ps(c_row.add(col), acc);
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
