// Machine software interrupt accounting for hart 0.
use core::sync::atomic::{AtomicU32, Ordering};

use crate::clint::Clint;
use crate::hart::HartId;
use crate::mmio::RegisterBlock;

/// Event counter bumped from interrupt context. Wraps on overflow.
pub struct SoftIrqCounter(AtomicU32);

impl SoftIrqCounter {
    pub const fn new() -> Self {
        SoftIrqCounter(AtomicU32::new(0))
    }

    /// Record one event; returns the new count.
    #[inline]
    pub fn record(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for SoftIrqCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub static COUNT_SW_INTS_H0: SoftIrqCounter = SoftIrqCounter::new();

/// Hart 0 software interrupt body. `hart` is the id read at trap entry.
pub fn software_h0<R: RegisterBlock>(clint: &mut Clint<R>, hart: HartId) -> u32 {
    on_machine_soft(clint, &COUNT_SW_INTS_H0, hart)
}

/// Count one machine software interrupt on `counter`, then acknowledge it by
/// clearing the hart's MSIP. Returns the new count.
pub fn on_machine_soft<R: RegisterBlock>(
    clint: &mut Clint<R>,
    counter: &SoftIrqCounter,
    hart: HartId,
) -> u32 {
    let n = record_on(counter, hart);
    clint.clear_soft(hart);
    n
}

#[inline]
fn record_on(counter: &SoftIrqCounter, hart: HartId) -> u32 {
    let n = counter.record();
    crate::ktrace!("msip on {} (#{})", hart, n);
    n
}
