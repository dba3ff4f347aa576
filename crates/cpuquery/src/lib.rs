//! Thin wrapper over the x86 `cpuid` instruction.
//!
//! [`CpuidQuery`] runs the instruction for a leaf and keeps the raw EAX, EBX,
//! ECX and EDX values. Nothing is decoded here; [`cpuid`] hands the same
//! registers to `raw-cpuid` for callers that want decoded leaves.
#![cfg_attr(not(test), no_std)]

#[cfg(cpuid_unsupported = "arch")]
compile_error!("cpuquery: the target is not x86 or x86_64 and has no cpuid instruction");
#[cfg(cpuid_unsupported = "sgx")]
compile_error!("cpuquery: cpuid cannot be executed inside an SGX enclave");
#[cfg(cpuid_unsupported = "features")]
compile_error!(
    "cpuquery: no cpuid strategy available, enable one of the `intrinsic`, `native` or \
     `inline-asm` features (`native` on 32-bit x86 also needs the `sse` target feature)"
);

#[cfg(cpuid_supported)]
mod invoke;
#[cfg(cpuid_supported)]
mod query;
#[cfg(cpuid_supported)]
mod reader;

#[cfg(cpuid_supported)]
pub use invoke::STRATEGY;
#[cfg(cpuid_supported)]
pub use query::CpuidQuery;
#[cfg(cpuid_supported)]
pub use reader::{cpuid, QueryReader};
