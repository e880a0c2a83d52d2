//! B-tile packing: gap removal ahead of the microkernel.
//!
//! B is stored row-major with row stride `o`, so walking one K-slice of a
//! column tile would stride by `o` elements between rows. Packing copies
//! the tile into `kc` contiguous rows of `nc` elements, letting the
//! microkernel issue unit-stride vector loads.

use crate::gemm::TileConfig;

/// Reusable scratch for packed B tiles.
///
/// Capacity is fixed at `kc * nc` of the driving [`TileConfig`]; one
/// instance serves every K-tile and batch element of an engine call. The
/// used region is fully overwritten before each use, and nothing carries
/// over between calls.
#[derive(Debug)]
pub struct PackBuffer {
    buf: Vec<f32>,
}

impl PackBuffer {
    pub fn new(tiles: &TileConfig) -> Self {
        Self {
            buf: vec![0.0; tiles.kc * tiles.nc],
        }
    }

    /// The `kc * nc` prefix used for the current tile.
    pub fn tile_mut(&mut self, kc: usize, nc: usize) -> &mut [f32] {
        debug_assert!(kc * nc <= self.buf.len());
        &mut self.buf[..kc * nc]
    }
}

/// Copy the `kc x nc` rectangle of `b` at row offset `pc`, column offset
/// `jc` into `dst`, laid out as `kc` contiguous rows of `nc` elements.
///
/// `dst` must hold at least `kc * nc` elements; the driver guarantees this
/// through the tile-size constants. Malformed offsets are caller bugs, not
/// runtime-detectable conditions.
pub fn pack_b_tile(
    b: &[f32],
    o: usize,
    pc: usize,
    kc: usize,
    jc: usize,
    nc: usize,
    dst: &mut [f32],
) {
    debug_assert!(dst.len() >= kc * nc);
    for k in 0..kc {
        let src = (pc + k) * o + jc;
        dst[k * nc..(k + 1) * nc].copy_from_slice(&b[src..src + nc]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_removes_row_stride() {
        // B is 4x5; pack the 2x3 tile at row 1, column 2.
        let b: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let mut dst = vec![0.0; 6];
        pack_b_tile(&b, 5, 1, 2, 2, 3, &mut dst);
        assert_eq!(dst, vec![7.0, 8.0, 9.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn pack_full_matrix_is_identity() {
        let b: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let mut dst = vec![0.0; 12];
        pack_b_tile(&b, 4, 0, 3, 0, 4, &mut dst);
        assert_eq!(dst, b);
    }

    #[test]
    fn buffer_sized_from_tile_config() {
        let tiles = TileConfig::new(4, 8, 16);
        let mut pack = PackBuffer::new(&tiles);
        assert_eq!(pack.tile_mut(16, 8).len(), 128);
        assert_eq!(pack.tile_mut(3, 5).len(), 15);
    }
}
