use crate::query::CpuidQuery;
use log::debug;
use raw_cpuid::{CpuId, CpuIdReader, CpuIdResult};

/// [`CpuIdReader`] that executes through [`CpuidQuery`], so `raw-cpuid`'s
/// decoders see exactly what this crate returns.
#[derive(Clone, Copy, Default, Debug)]
pub struct QueryReader;

impl CpuIdReader for QueryReader {
    fn cpuid2(&self, eax: u32, ecx: u32) -> CpuIdResult {
        CpuidQuery::with_subleaf(eax, ecx).into()
    }
}

pub fn cpuid() -> CpuId<QueryReader> {
    debug!("cpuid reader using {} strategy", crate::invoke::STRATEGY);
    CpuId::with_cpuid_reader(QueryReader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_matches_query() {
        let raw = QueryReader.cpuid1(0);
        let query = CpuidQuery::new(0);
        assert_eq!([raw.eax, raw.ebx, raw.ecx, raw.edx], query.registers());
    }

    #[test]
    fn reader_forwards_subleaf() {
        let raw = QueryReader.cpuid2(0x8000_0000, 5);
        let query = CpuidQuery::with_subleaf(0x8000_0000, 5);
        assert_eq!([raw.eax, raw.ebx, raw.ecx, raw.edx], query.registers());
    }
}
