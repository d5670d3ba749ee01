// e51/src/trap.rs
use riscv::register::{mcause, mepc, mhartid, mie, mstatus};

use e51_lib::clint::{Clint, CLINT_BASE};
use e51_lib::hart::HartId;
use e51_lib::mmio::Mmio;
use e51_lib::{kerror, swi};

const IRQ_MACHINE_SOFT: usize = 3;

#[repr(C)]
pub struct TrapFrame {
    pub ra: usize,      // x1
    pub t0: usize,      // x5
    pub t1: usize,      // x6
    pub t2: usize,      // x7
    pub a0: usize,      // x10
    pub a1: usize,      // x11
    pub a2: usize,      // x12
    pub a3: usize,      // x13
    pub a4: usize,      // x14
    pub a5: usize,      // x15
    pub a6: usize,      // x16
    pub a7: usize,      // x17
    pub t3: usize,      // x28
    pub t4: usize,      // x29
    pub t5: usize,      // x30
    pub t6: usize,      // x31
    pub mepc: usize,
    pub mstatus_bits: usize,
}

extern "C" {
    fn __trap_entry();
}

#[inline]
fn clint() -> Clint<Mmio> {
    // SAFETY: CLINT_BASE is the CLINT window; each trap only touches its
    // own hart's MSIP word.
    Clint::new(unsafe { Mmio::new(CLINT_BASE) })
}

/// Point mtvec at the trap entry (direct mode) and take machine software
/// interrupts. Any MSIP left pending from before boot is dropped first.
pub fn init(hart: HartId) {
    clint().clear_soft(hart);
    unsafe {
        core::arch::asm!("csrw mtvec, {0}", in(reg) __trap_entry as usize);
        mie::set_msoft();
        mstatus::set_mie();
    }
}

#[no_mangle]
extern "C" fn rust_trap(_tf: &mut TrapFrame) {
    let cause = mcause::read();
    if cause.is_interrupt() && cause.code() == IRQ_MACHINE_SOFT {
        swi::software_h0(&mut clint(), HartId(mhartid::read()));
        return;
    }

    kerror!(
        "*** TRAP *** mcause={:#x} interrupt={} mepc=0x{:016x}",
        cause.code(),
        cause.is_interrupt(),
        mepc::read(),
    );
    loop {
        unsafe { riscv::asm::wfi(); }
    }
}
