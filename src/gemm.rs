//! Cache-blocked GEMM driver.

use crate::cpu_kernels::Microkernel;
use crate::pack::{pack_b_tile, PackBuffer};

/// Blocking tile sizes.
///
/// `mc` rows of A, `nc` columns of B, and `kc` of the reduction dimension
/// per tile. The pack buffer holds `kc * nc` floats, so [`PackBuffer::new`]
/// sizes itself from the same constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    pub mc: usize,
    pub nc: usize,
    pub kc: usize,
}

impl TileConfig {
    pub fn new(mc: usize, nc: usize, kc: usize) -> Self {
        debug_assert!(mc > 0 && nc > 0 && kc > 0);
        Self { mc, nc, kc }
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            mc: 64,
            nc: 128,
            kc: 128,
        }
    }
}

/// C[n,o] = A[n,m] · B[m,o] for one matrix pair, all row-major.
///
/// Three-level tiling: column tiles of width `nc`, row tiles of height `mc`
/// (the C sub-tile is zeroed exactly once per row/column tile pair, before
/// any K-slice is accumulated), reduction tiles of depth `kc` (pack the B
/// slice, then let the microkernel accumulate). The last tile in each
/// dimension is the remainder; nothing is padded and nothing past n, m, or
/// o is touched.
pub fn gemm_blocked<M: Microkernel>(
    micro: &M,
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    m: usize,
    o: usize,
    tiles: TileConfig,
    pack: &mut PackBuffer,
) {
    debug_assert!(a.len() >= n * m);
    debug_assert!(b.len() >= m * o);
    debug_assert!(c.len() >= n * o);

    let mut jc = 0;
    while jc < o {
        let nc = tiles.nc.min(o - jc);

        let mut ic = 0;
        while ic < n {
            let mc = tiles.mc.min(n - ic);

            for i in 0..mc {
                let row = (ic + i) * o + jc;
                c[row..row + nc].fill(0.0);
            }

            let mut pc = 0;
            while pc < m {
                let kc = tiles.kc.min(m - pc);

                let bp = pack.tile_mut(kc, nc);
                pack_b_tile(b, o, pc, kc, jc, nc, bp);

                micro.accumulate(
                    &a[ic * m + pc..],
                    m,
                    bp,
                    &mut c[ic * o + jc..],
                    o,
                    mc,
                    kc,
                    nc,
                );

                pc += tiles.kc;
            }

            ic += tiles.mc;
        }

        jc += tiles.nc;
    }
}
