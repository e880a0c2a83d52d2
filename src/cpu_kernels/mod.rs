//! CPU microkernels with runtime ISA selection.
//!
//! One [`Microkernel`] implementation per ISA level. `get_isa_level()`
//! probes the host once and caches the result; the selector uses it to pick
//! the widest kernel the CPU supports.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsaLevel {
    Scalar,
    Avx2,
    Avx512,
    Neon,
}

static ISA_LEVEL: OnceLock<IsaLevel> = OnceLock::new();

pub fn get_isa_level() -> IsaLevel {
    *ISA_LEVEL.get_or_init(detect_isa_features)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect_isa_features() -> IsaLevel {
    if is_x86_feature_detected!("avx512f") {
        IsaLevel::Avx512
    } else if is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma") {
        IsaLevel::Avx2
    } else {
        IsaLevel::Scalar
    }
}

#[cfg(target_arch = "aarch64")]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Neon
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_isa_features() -> IsaLevel {
    IsaLevel::Scalar
}

/// Innermost compute step of the blocked driver.
///
/// Accumulates `A_tile · B_packed` into `C_tile`:
/// - `a` starts at the tile's top-left element of A, row stride `lda`
/// - `bp` is the packed B tile: `kc` contiguous rows of `nc` elements
/// - `c` starts at the tile's top-left element of C, row stride `ldc`
///
/// The kernel always reads-modifies-writes C, so the driver zeroes each C
/// tile before the first K-slice. Per row, columns are processed in chunks
/// of the kernel's vector width with the k-reduction innermost; the final
/// chunk may be narrower and never runs past `nc`. Tile bounds are a caller
/// contract and are not checked here.
pub trait Microkernel: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(clippy::too_many_arguments)]
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
    );
}

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod avx512;
#[cfg(target_arch = "aarch64")]
pub mod neon;

pub use scalar::ScalarKernel;

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2Kernel;
#[cfg(target_arch = "x86_64")]
pub use avx512::Avx512Kernel;
#[cfg(target_arch = "aarch64")]
pub use neon::NeonKernel;
