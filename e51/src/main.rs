#![no_std]
#![no_main]

mod entry;
mod trap;
mod trap_entry;

use core::fmt::Write;

use e51_lib::config::BOOT_CONFIG;
use e51_lib::console::{self, UART0};
use e51_lib::hart::HartId;
use e51_lib::mmio::Mmio;
use e51_lib::sysreg::{Sysreg, SYSREG_BASE};
use e51_lib::{boot, kdebug, kerror};

#[no_mangle]
extern "C" fn rust_start() -> ! {
    let hart = HartId(riscv::register::mhartid::read());

    // SAFETY: SYSREG_BASE is the system register window; hart 0 is the only
    // hart running at this point.
    let mut sysreg = Sysreg::new(unsafe { Mmio::new(SYSREG_BASE) });

    let result = {
        let mut uart = UART0.lock();
        boot::e51(hart, &mut sysreg, &mut uart, &BOOT_CONFIG)
    };
    match result {
        Ok(()) => kdebug!("{} up, console at {} baud", hart, BOOT_CONFIG.baud),
        Err(e) => kerror!("boot failed: {}", e),
    }

    trap::init(hart); // set mtvec + enable MSIE/MIE

    loop {
        unsafe { riscv::asm::wfi(); }
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    console::with_console(|uart| {
        let _ = writeln!(uart, "\n*** PANIC ***");
        if let Some(loc) = info.location() {
            let _ = writeln!(uart, "at {}:{}:{}", loc.file(), loc.line(), loc.column());
        }
        let _ = writeln!(uart, "{}", info.message());
    });

    loop {
        unsafe { riscv::asm::wfi(); }
    }
}
