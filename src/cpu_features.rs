/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use bitflags::bitflags;
use std::sync::atomic::{AtomicU32, Ordering};

bitflags! {
    /// Instruction set extensions the row kernels may be dispatched to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuFlags: u32 {
        const SSE2 = 1 << 0;
        const SSSE3 = 1 << 1;
        const SSE41 = 1 << 2;
        const AVX2 = 1 << 3;
        const AVX512BW = 1 << 4;
        const NEON = 1 << 8;
    }
}

/// Marks the cached word as populated, so an empty flag set is still a valid state.
const INITIALIZED: u32 = 1 << 31;

static CPU_STATE: AtomicU32 = AtomicU32::new(0);

fn detect() -> CpuFlags {
    #[allow(unused_mut)]
    let mut flags = CpuFlags::empty();
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if std::arch::is_x86_feature_detected!("sse2") {
            flags |= CpuFlags::SSE2;
        }
        if std::arch::is_x86_feature_detected!("ssse3") {
            flags |= CpuFlags::SSSE3;
        }
        if std::arch::is_x86_feature_detected!("sse4.1") {
            flags |= CpuFlags::SSE41;
        }
        if std::arch::is_x86_feature_detected!("avx2") {
            flags |= CpuFlags::AVX2;
        }
        if std::arch::is_x86_feature_detected!("avx512bw") {
            flags |= CpuFlags::AVX512BW;
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            flags |= CpuFlags::NEON;
        }
    }
    flags
}

/// Returns the cached capability set, detecting it on first use.
pub fn cpu_flags() -> CpuFlags {
    let state = CPU_STATE.load(Ordering::Acquire);
    if state & INITIALIZED != 0 {
        return CpuFlags::from_bits_truncate(state);
    }
    init_cpu_flags()
}

/// Detects capabilities and stores them. Calling it again re-detects and
/// discards any earlier override.
pub fn init_cpu_flags() -> CpuFlags {
    let flags = detect();
    CPU_STATE.store(flags.bits() | INITIALIZED, Ordering::Release);
    log::debug!("Detected cpu capabilities {:?}", flags);
    flags
}

/// Restricts the detected capabilities to `mask` and returns the effective set.
pub fn mask_cpu_flags(mask: CpuFlags) -> CpuFlags {
    let flags = detect() & mask;
    CPU_STATE.store(flags.bits() | INITIALIZED, Ordering::Release);
    log::debug!("Cpu capabilities masked by {:?}, effective {:?}", mask, flags);
    flags
}

/// Replaces the capability set without detection.
pub fn set_cpu_flags(flags: CpuFlags) {
    CPU_STATE.store(flags.bits() | INITIALIZED, Ordering::Release);
    log::debug!("Cpu capabilities overridden to {:?}", flags);
}

/// Forgets the cached state, the next query detects again.
pub fn reset_cpu_flags() {
    CPU_STATE.store(0, Ordering::Release);
    log::debug!("Cpu capabilities reset");
}

/// Forces the portable kernels when `use_reference` is set, restores detection otherwise.
pub fn set_use_reference_impl(use_reference: bool) {
    if use_reference {
        set_cpu_flags(CpuFlags::empty());
    } else {
        init_cpu_flags();
    }
}

#[allow(dead_code)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum KernelTier {
    Scalar,
    Sse41,
    Avx2,
}

/// Highest kernel instantiation usable with the current flags and compiled features.
#[inline]
pub(crate) fn kernel_tier() -> KernelTier {
    #[allow(unused_variables)]
    let flags = cpu_flags();
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
    {
        if flags.contains(CpuFlags::AVX2) {
            return KernelTier::Avx2;
        }
    }
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        if flags.contains(CpuFlags::SSE41) {
            return KernelTier::Sse41;
        }
    }
    KernelTier::Scalar
}

/// Builds a dispatcher over a generic row kernel.
///
/// Generates `$sse` and `$avx` as `#[target_feature]` instantiations of `$kernel`
/// and a `$make` function returning the best one for [`kernel_tier`].
macro_rules! dispatch_row_kernel {
    (
        $make:ident, $sse:ident, $avx:ident, $kernel:ident,
        <$(const $cg:ident: $ct:ty),*>, ($($arg:ident: $ty:ty),*)
    ) => {
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        #[target_feature(enable = "sse4.1")]
        unsafe fn $sse<$(const $cg: $ct),*>($($arg: $ty),*) {
            $kernel::<$($cg),*>($($arg),*)
        }

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
        #[target_feature(enable = "avx2")]
        unsafe fn $avx<$(const $cg: $ct),*>($($arg: $ty),*) {
            $kernel::<$($cg),*>($($arg),*)
        }

        #[allow(clippy::type_complexity)]
        fn $make<$(const $cg: $ct),*>() -> unsafe fn($($ty),*) {
            match crate::cpu_features::kernel_tier() {
                #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
                crate::cpu_features::KernelTier::Avx2 => $avx::<$($cg),*>,
                #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
                crate::cpu_features::KernelTier::Sse41 => $sse::<$($cg),*>,
                _ => {
                    unsafe fn scalar<$(const $cg: $ct),*>($($arg: $ty),*) {
                        $kernel::<$($cg),*>($($arg),*)
                    }
                    scalar::<$($cg),*>
                }
            }
        }
    };
}

pub(crate) use dispatch_row_kernel;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_are_last_writer_wins() {
        let detected = init_cpu_flags();
        assert_eq!(cpu_flags(), detected);

        set_cpu_flags(CpuFlags::empty());
        assert_eq!(cpu_flags(), CpuFlags::empty());
        assert_eq!(kernel_tier(), KernelTier::Scalar);

        let masked = mask_cpu_flags(CpuFlags::SSE2 | CpuFlags::NEON);
        assert!((CpuFlags::SSE2 | CpuFlags::NEON).contains(masked));
        assert_eq!(cpu_flags(), masked);

        reset_cpu_flags();
        assert_eq!(cpu_flags(), detected);

        set_use_reference_impl(true);
        assert!(cpu_flags().is_empty());
        set_use_reference_impl(false);
        assert_eq!(cpu_flags(), detected);
    }
}
