//! Startup-time kernel selection.
//!
//! The host binds one kernel per process. An explicit override via the
//! `BGEMM_KERNEL` environment variable wins; otherwise the widest kernel
//! for the detected ISA level is chosen. A failed selection (unknown
//! override name, or an override naming an ISA this CPU lacks) is fatal
//! for the host: there is no degraded compute mode.

use std::sync::OnceLock;

use crate::cpu_kernels::{get_isa_level, IsaLevel, ScalarKernel};
use crate::kernel::{BlockedKernel, KernelError, KernelResult, MatmulKernel};

#[cfg(target_arch = "x86_64")]
use crate::cpu_kernels::{Avx2Kernel, Avx512Kernel};
#[cfg(target_arch = "aarch64")]
use crate::cpu_kernels::NeonKernel;

/// Environment variable overriding automatic kernel selection.
///
/// Accepted values: `scalar`, `avx2`, `avx512`, `neon`.
pub const KERNEL_ENV: &str = "BGEMM_KERNEL";

/// Process-wide kernel instance.
static KERNEL: OnceLock<Box<dyn MatmulKernel>> = OnceLock::new();

/// Select a kernel without installing it process-wide.
///
/// Consults `BGEMM_KERNEL` first, then falls back to ISA auto-detection.
pub fn select_matmul_kernel() -> KernelResult<Box<dyn MatmulKernel>> {
    if let Ok(name) = std::env::var(KERNEL_ENV) {
        if !name.is_empty() {
            return kernel_by_name(&name);
        }
    }
    Ok(auto_kernel())
}

/// Resolve and install the process-wide kernel.
///
/// Idempotent; the first successful call decides. The host must treat an
/// error as a fatal startup condition.
pub fn init_matmul_kernel() -> KernelResult<&'static dyn MatmulKernel> {
    if let Some(k) = KERNEL.get() {
        return Ok(k.as_ref());
    }
    let k = select_matmul_kernel()?;
    let k = KERNEL.get_or_init(|| {
        log::info!("selected matmul kernel: {}", k.name());
        k
    });
    Ok(k.as_ref())
}

/// The installed kernel, if [`init_matmul_kernel`] has run.
pub fn matmul_kernel() -> Option<&'static dyn MatmulKernel> {
    KERNEL.get().map(|k| k.as_ref())
}

/// Install a specific kernel, bypassing the override and auto-detection.
///
/// No-op if a kernel is already installed.
pub fn force_matmul_kernel<K: MatmulKernel + 'static>(kernel: K) {
    let _ = KERNEL.set(Box::new(kernel));
}

fn auto_kernel() -> Box<dyn MatmulKernel> {
    match get_isa_level() {
        #[cfg(target_arch = "x86_64")]
        IsaLevel::Avx512 => Box::new(BlockedKernel::new(Avx512Kernel)),
        #[cfg(target_arch = "x86_64")]
        IsaLevel::Avx2 => Box::new(BlockedKernel::new(Avx2Kernel)),
        #[cfg(target_arch = "aarch64")]
        IsaLevel::Neon => Box::new(BlockedKernel::new(NeonKernel)),
        _ => Box::new(BlockedKernel::new(ScalarKernel)),
    }
}

fn kernel_by_name(name: &str) -> KernelResult<Box<dyn MatmulKernel>> {
    match name {
        "scalar" => Ok(Box::new(BlockedKernel::new(ScalarKernel))),
        #[cfg(target_arch = "x86_64")]
        "avx2" => {
            if Avx2Kernel::is_available() {
                Ok(Box::new(BlockedKernel::new(Avx2Kernel)))
            } else {
                log::error!("{} requested avx2 but this cpu lacks avx2/fma", KERNEL_ENV);
                Err(KernelError::UnsupportedIsa("avx2"))
            }
        }
        #[cfg(target_arch = "x86_64")]
        "avx512" => {
            if Avx512Kernel::is_available() {
                Ok(Box::new(BlockedKernel::new(Avx512Kernel)))
            } else {
                log::error!("{} requested avx512 but this cpu lacks avx512f", KERNEL_ENV);
                Err(KernelError::UnsupportedIsa("avx512"))
            }
        }
        #[cfg(target_arch = "aarch64")]
        "neon" => Ok(Box::new(BlockedKernel::new(NeonKernel))),
        other => {
            log::error!("unknown {} value '{}'", KERNEL_ENV, other);
            Err(KernelError::InvalidOverride(other.to_string()))
        }
    }
}
