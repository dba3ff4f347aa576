//! Execution of the `cpuid` instruction.
//!
//! Exactly one `cpuid_count` is compiled in, chosen by the build script and
//! exposed as `cfg(cpuid_strategy = "...")`. Every strategy loads ECX with the
//! sub-leaf, so sub-leaf sensitive leaves behave the same whichever is picked.

/// Name of the strategy compiled into this build.
#[cfg(cpuid_strategy = "intrinsic")]
pub const STRATEGY: &str = "intrinsic";
#[cfg(cpuid_strategy = "native")]
pub const STRATEGY: &str = "native";
#[cfg(cpuid_strategy = "asm")]
pub const STRATEGY: &str = "inline-asm";

#[cfg(cpuid_strategy = "intrinsic")]
#[inline]
pub(crate) fn cpuid_count(leaf: u32, subleaf: u32) -> [u32; 4] {
    #[cfg(target_arch = "x86")]
    use core::arch::x86 as arch;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64 as arch;

    // SAFETY: the build script only selects this strategy on x86 targets
    // outside SGX, where cpuid is always executable.
    #[allow(unused_unsafe)]
    let result = unsafe { arch::__cpuid_count(leaf, subleaf) };
    [result.eax, result.ebx, result.ecx, result.edx]
}

#[cfg(cpuid_strategy = "native")]
#[inline]
pub(crate) fn cpuid_count(leaf: u32, subleaf: u32) -> [u32; 4] {
    use raw_cpuid::{CpuIdReader, CpuIdReaderNative};

    let result = CpuIdReaderNative.cpuid2(leaf, subleaf);
    [result.eax, result.ebx, result.ecx, result.edx]
}

#[cfg(all(cpuid_strategy = "asm", target_arch = "x86_64"))]
#[inline]
pub(crate) fn cpuid_count(leaf: u32, subleaf: u32) -> [u32; 4] {
    use core::arch::asm;

    let eax: u32;
    let ebx: u32;
    let ecx: u32;
    let edx: u32;
    // SAFETY: cpuid touches only the four named registers. rbx is reserved
    // by LLVM, so it is swapped through a scratch register.
    unsafe {
        asm!(
            "mov {0:r}, rbx",
            "cpuid",
            "xchg {0:r}, rbx",
            out(reg) ebx,
            inout("eax") leaf => eax,
            inout("ecx") subleaf => ecx,
            out("edx") edx,
            options(nostack, preserves_flags),
        );
    }
    [eax, ebx, ecx, edx]
}

#[cfg(all(cpuid_strategy = "asm", target_arch = "x86"))]
#[inline]
pub(crate) fn cpuid_count(leaf: u32, subleaf: u32) -> [u32; 4] {
    use core::arch::asm;

    let eax: u32;
    let ebx: u32;
    let ecx: u32;
    let edx: u32;
    // SAFETY: as for x86_64. EDX is cleared on input as well, older 32-bit
    // parts leave it stale on the basic leaves.
    unsafe {
        asm!(
            "mov {0}, ebx",
            "cpuid",
            "xchg {0}, ebx",
            out(reg) ebx,
            inout("eax") leaf => eax,
            inout("ecx") subleaf => ecx,
            inout("edx") 0u32 => edx,
            options(nostack, preserves_flags),
        );
    }
    [eax, ebx, ecx, edx]
}
