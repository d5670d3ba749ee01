//! The statically allocated MMUART0 handle and its reserved receive buffer.

use spin::Mutex;

use crate::config::{MMUART0_BASE, MSS_APB_AHB_CLK_HZ, RX_BUFF_SIZE};
use crate::mmio::Mmio;
use crate::mss_uart::MssUart;
use crate::sysreg::Peripheral;

pub type ConsoleUart = MssUart<Mmio>;

/// MMUART0, initialised once by the boot routine and never torn down.
// SAFETY: MMUART0_BASE is the MMUART0 register window, always mapped, and
// this static is the only owner of it.
pub static UART0: Mutex<ConsoleUart> =
    Mutex::new(MssUart::new(
        unsafe { Mmio::new(MMUART0_BASE) },
        Peripheral::MmUart0,
        MSS_APB_AHB_CLK_HZ,
    ));

/// Reserved for a console receive path. The boot routine neither fills nor
/// reads it.
pub static RX_BUFF0: Mutex<heapless::Vec<u8, RX_BUFF_SIZE>> = Mutex::new(heapless::Vec::new());

/// Run `f` on the console if it is initialised and not already held.
/// Never spins, so it is safe to call from interrupt context.
pub fn with_console<F: FnOnce(&mut ConsoleUart)>(f: F) -> bool {
    match UART0.try_lock() {
        Some(mut uart) if uart.is_initialised() => {
            f(&mut uart);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_unavailable_before_boot() {
        assert!(!with_console(|_| panic!("console used before init")));
    }

    #[test]
    fn test_console_unavailable_while_locked() {
        let _held = UART0.lock();
        assert!(!with_console(|_| panic!("console re-entered")));
    }

    #[test]
    fn test_console_clocks_its_own_block() {
        assert_eq!(UART0.lock().peripheral(), Peripheral::MmUart0);
    }

    #[test]
    fn test_rx_buffer_capacity() {
        let rx = RX_BUFF0.lock();
        assert_eq!(rx.capacity(), 16);
        assert!(rx.is_empty());
    }
}
