//! Core-local interruptor: per-hart machine software interrupt pending bits.

use crate::hart::HartId;
use crate::mmio::RegisterBlock;

pub const CLINT_BASE: usize = 0x0200_0000;

#[inline]
const fn msip(hart: HartId) -> usize {
    hart.0 * 4
}

pub struct Clint<R: RegisterBlock> {
    regs: R,
}

impl<R: RegisterBlock> Clint<R> {
    pub const fn new(regs: R) -> Self {
        Clint { regs }
    }

    pub fn raise_soft(&mut self, hart: HartId) {
        self.regs.write32(msip(hart), 1);
    }

    /// Acknowledge: the interrupt stays asserted until MSIP is cleared.
    pub fn clear_soft(&mut self, hart: HartId) {
        self.regs.write32(msip(hart), 0);
    }

    pub fn soft_pending(&self, hart: HartId) -> bool {
        (self.regs.read32(msip(hart)) & 1) != 0
    }

    #[cfg(test)]
    pub fn regs(&self) -> &R {
        &self.regs
    }
}
