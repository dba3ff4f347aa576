use crate::invoke;
use log::trace;
use raw_cpuid::CpuIdResult;

/// Register values returned by one execution of `cpuid`.
///
/// Always holds the result of the most recent query: construction runs the
/// instruction, and [`requery`](CpuidQuery::requery) overwrites all four
/// registers at once. Accessors never touch the hardware.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct CpuidQuery {
    leaf: u32,
    subleaf: u32,
    registers: [u32; 4],
}

impl CpuidQuery {
    /// Queries `leaf` with sub-leaf 0.
    ///
    /// Leaf values are not validated; out-of-range leaves return whatever the
    /// processor defines for them.
    pub fn new(leaf: u32) -> CpuidQuery {
        CpuidQuery::with_subleaf(leaf, 0)
    }

    /// Queries `leaf` with `subleaf` loaded into ECX, for leaves such as 0x4,
    /// 0x7, 0xB or 0xD.
    pub fn with_subleaf(leaf: u32, subleaf: u32) -> CpuidQuery {
        CpuidQuery {
            leaf,
            subleaf,
            registers: execute(leaf, subleaf),
        }
    }

    pub fn requery(&mut self, leaf: u32) -> &mut CpuidQuery {
        self.requery_subleaf(leaf, 0)
    }

    pub fn requery_subleaf(&mut self, leaf: u32, subleaf: u32) -> &mut CpuidQuery {
        self.registers = execute(leaf, subleaf);
        self.leaf = leaf;
        self.subleaf = subleaf;
        self
    }

    #[inline]
    pub fn eax(&self) -> u32 {
        self.registers[0]
    }

    #[inline]
    pub fn ebx(&self) -> u32 {
        self.registers[1]
    }

    #[inline]
    pub fn ecx(&self) -> u32 {
        self.registers[2]
    }

    #[inline]
    pub fn edx(&self) -> u32 {
        self.registers[3]
    }

    /// EAX, EBX, ECX and EDX, in that order.
    #[inline]
    pub fn registers(&self) -> [u32; 4] {
        self.registers
    }

    pub fn leaf(&self) -> u32 {
        self.leaf
    }

    pub fn subleaf(&self) -> u32 {
        self.subleaf
    }
}

fn execute(leaf: u32, subleaf: u32) -> [u32; 4] {
    let registers = invoke::cpuid_count(leaf, subleaf);
    trace!(
        "cpuid {:#010x}:{} -> eax={:#010x} ebx={:#010x} ecx={:#010x} edx={:#010x}",
        leaf,
        subleaf,
        registers[0],
        registers[1],
        registers[2],
        registers[3]
    );
    registers
}

impl From<CpuidQuery> for [u32; 4] {
    fn from(query: CpuidQuery) -> Self {
        query.registers
    }
}

impl From<CpuidQuery> for CpuIdResult {
    fn from(query: CpuidQuery) -> Self {
        CpuIdResult {
            eax: query.eax(),
            ebx: query.ebx(),
            ecx: query.ecx(),
            edx: query.edx(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_register_order() {
        let query = CpuidQuery::new(0);
        let [a, b, c, d] = query.registers();
        assert_eq!(query.eax(), a);
        assert_eq!(query.ebx(), b);
        assert_eq!(query.ecx(), c);
        assert_eq!(query.edx(), d);
    }

    #[test]
    fn accessors_do_not_requery() {
        let query = CpuidQuery::new(0);
        let first = (query.edx(), query.ecx(), query.ebx(), query.eax());
        let second = (query.edx(), query.ecx(), query.ebx(), query.eax());
        assert_eq!(first, second);
        assert_eq!(query.registers(), invoke::cpuid_count(0, 0));
    }

    #[test]
    fn new_records_inputs() {
        let query = CpuidQuery::new(0x8000_0000);
        assert_eq!(query.leaf(), 0x8000_0000);
        assert_eq!(query.subleaf(), 0);

        let query = CpuidQuery::with_subleaf(7, 1);
        assert_eq!(query.leaf(), 7);
        assert_eq!(query.subleaf(), 1);
    }

    #[test]
    fn requery_overwrites_every_register() {
        let mut query = CpuidQuery::new(0);
        query.requery(0x8000_0000);
        assert_eq!(query.leaf(), 0x8000_0000);
        assert_eq!(query.registers(), invoke::cpuid_count(0x8000_0000, 0));

        query.requery(0);
        assert_eq!(query, CpuidQuery::new(0));
    }

    #[test]
    fn requery_resets_subleaf() {
        let mut query = CpuidQuery::with_subleaf(0, 3);
        query.requery(0);
        assert_eq!(query.subleaf(), 0);
    }

    #[test]
    fn requery_chains() {
        let mut query = CpuidQuery::new(0x8000_0000);
        let max = query.requery(0).eax();
        assert_eq!(max, CpuidQuery::new(0).eax());
    }

    #[test]
    fn converts_to_raw_result() {
        let query = CpuidQuery::new(0);
        let raw: CpuIdResult = query.into();
        assert_eq!([raw.eax, raw.ebx, raw.ecx, raw.edx], <[u32; 4]>::from(query));
    }
}
