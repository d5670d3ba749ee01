use core::fmt;

/// Harts in the MSS: the E51 monitor core (0) and four U54 application cores.
pub const HART_COUNT: usize = 5;

/// Value of the `mhartid` CSR.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HartId(pub usize);

impl HartId {
    pub const E51: HartId = HartId(0);
}

impl fmt::Display for HartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hart{}", self.0)
    }
}
