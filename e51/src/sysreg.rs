//! MSS system register block: per-peripheral clock gating and soft reset.

use crate::error::{BootError, BootResult};
use crate::hart::HART_COUNT;
use crate::mmio::RegisterBlock;

pub const SYSREG_BASE: usize = 0x2000_2000;

/* SYSREG offsets */
const SUBBLK_CLOCK_CR: usize = 0x84;
const SOFT_RESET_CR: usize = 0x88;

/// Peripherals sharing the SUBBLK_CLOCK_CR / SOFT_RESET_CR bit layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Peripheral {
    Envm = 0,
    Mac0 = 1,
    Mac1 = 2,
    Mmc = 3,
    Timer = 4,
    MmUart0 = 5,
    MmUart1 = 6,
    MmUart2 = 7,
    MmUart3 = 8,
    MmUart4 = 9,
    Spi0 = 10,
    Spi1 = 11,
    I2c0 = 12,
    I2c1 = 13,
    Can0 = 14,
    Can1 = 15,
    Usb = 16,
    Rtc = 18,
    Qspi = 19,
    Gpio0 = 20,
    Gpio1 = 21,
    Gpio2 = 22,
    Ddrc = 23,
    Fic0 = 24,
    Fic1 = 25,
    Fic2 = 26,
    Fic3 = 27,
    Athena = 28,
    Cfm = 29,
}

impl Peripheral {
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << (self as u8)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PeripheralState {
    On,
    Off,
}

pub struct Sysreg<R: RegisterBlock> {
    regs: R,
}

impl<R: RegisterBlock> Sysreg<R> {
    pub const fn new(regs: R) -> Self {
        Sysreg { regs }
    }

    /// Gate the clock and reset of `peripheral` on behalf of hart `context`.
    ///
    /// Turning on enables the clock before releasing reset so the block
    /// leaves reset with a running clock; turning off is the reverse.
    pub fn config_clk_rst(
        &mut self,
        peripheral: Peripheral,
        context: u8,
        state: PeripheralState,
    ) -> BootResult<()> {
        if context as usize >= HART_COUNT {
            return Err(BootError::InvalidContext(context));
        }
        let mask = peripheral.mask();
        match state {
            PeripheralState::On => {
                self.regs.modify32(SUBBLK_CLOCK_CR, |v| v | mask);
                self.regs.modify32(SOFT_RESET_CR, |v| v & !mask);
            }
            PeripheralState::Off => {
                self.regs.modify32(SOFT_RESET_CR, |v| v | mask);
                self.regs.modify32(SUBBLK_CLOCK_CR, |v| v & !mask);
            }
        }
        Ok(())
    }

    /// Clock running and reset released.
    pub fn is_enabled(&self, peripheral: Peripheral) -> bool {
        let mask = peripheral.mask();
        (self.regs.read32(SUBBLK_CLOCK_CR) & mask) != 0 && (self.regs.read32(SOFT_RESET_CR) & mask) == 0
    }

    #[cfg(test)]
    pub fn regs(&self) -> &R {
        &self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::mock::{Access, MockRegs};

    fn powered_on_sysreg() -> Sysreg<MockRegs> {
        let regs = MockRegs::new();
        // Everything held in reset with clocks gated, as after power-on.
        regs.preset(SOFT_RESET_CR, 0x3FFF_FFFF);
        regs.preset(SUBBLK_CLOCK_CR, 0);
        Sysreg::new(regs)
    }

    #[test]
    fn test_mmuart0_mask() {
        assert_eq!(Peripheral::MmUart0.mask(), 1 << 5);
        assert_eq!(Peripheral::Envm.mask(), 1);
        assert_eq!(Peripheral::Cfm.mask(), 1 << 29);
    }

    #[test]
    fn test_turn_on_enables_clock_then_releases_reset() {
        let mut sys = powered_on_sysreg();
        sys.config_clk_rst(Peripheral::MmUart0, 1, PeripheralState::On).unwrap();

        let writes: Vec<_> = sys
            .regs()
            .log()
            .into_iter()
            .filter(|a| matches!(a, Access::Write(..)))
            .collect();
        assert_eq!(
            writes,
            vec![
                Access::Write(SUBBLK_CLOCK_CR, 1 << 5),
                Access::Write(SOFT_RESET_CR, 0x3FFF_FFFF & !(1 << 5)),
            ]
        );
        assert!(sys.is_enabled(Peripheral::MmUart0));
        assert!(!sys.is_enabled(Peripheral::MmUart1));
    }

    #[test]
    fn test_turn_off_asserts_reset_then_gates_clock() {
        let mut sys = powered_on_sysreg();
        sys.config_clk_rst(Peripheral::MmUart0, 0, PeripheralState::On).unwrap();
        sys.config_clk_rst(Peripheral::MmUart0, 0, PeripheralState::Off).unwrap();

        assert!(!sys.is_enabled(Peripheral::MmUart0));
        assert_eq!(sys.regs().peek(SUBBLK_CLOCK_CR) & (1 << 5), 0);
        assert_ne!(sys.regs().peek(SOFT_RESET_CR) & (1 << 5), 0);
    }

    #[test]
    fn test_other_peripherals_untouched() {
        let mut sys = powered_on_sysreg();
        sys.regs().preset(SUBBLK_CLOCK_CR, Peripheral::Timer.mask());
        sys.config_clk_rst(Peripheral::MmUart0, 1, PeripheralState::On).unwrap();
        assert_eq!(
            sys.regs().peek(SUBBLK_CLOCK_CR),
            Peripheral::Timer.mask() | Peripheral::MmUart0.mask()
        );
    }

    #[test]
    fn test_invalid_context_rejected_without_writes() {
        let mut sys = powered_on_sysreg();
        assert_eq!(
            sys.config_clk_rst(Peripheral::MmUart0, 5, PeripheralState::On),
            Err(BootError::InvalidContext(5))
        );
        assert!(sys.regs().log().is_empty());
    }
}
