//! Polled driver for the PolarFire SoC MSS MMUART (16550-compatible with
//! fractional baud extensions).

use core::fmt;

use crate::error::{BootError, BootResult};
use crate::mmio::RegisterBlock;
use crate::sysreg::Peripheral;

pub const MMUART0_LO_BASE: usize = 0x2000_0000;
pub const MMUART0_HI_BASE: usize = 0x2800_0000;

/* MMUART registers (byte offsets, 32-bit stride) */
const RBR_THR_DLR: usize = 0x00; // Rx Buffer / Tx Holding / Divisor Latch LSB
const IER_DMR: usize = 0x04; // Interrupt Enable / Divisor Latch MSB
const FCR: usize = 0x08; // FIFO Control (write-only, shares IIR)
const LCR: usize = 0x0C; // Line Control
const MCR: usize = 0x10; // Modem Control
const LSR: usize = 0x14; // Line Status
const MM0: usize = 0x30; // Multi-mode Control 0
const MM1: usize = 0x34; // Multi-mode Control 1
const MM2: usize = 0x38; // Multi-mode Control 2
const DFR: usize = 0x3C; // Fractional Divisor
const GFR: usize = 0x44; // Glitch Filter
const TTG: usize = 0x48; // Transmitter Time Guard
const RTO: usize = 0x4C; // Receiver Timeout

/* FCR bits */
const FCR_CLEAR_RX_FIFO: u8 = 1 << 1;
const FCR_CLEAR_TX_FIFO: u8 = 1 << 2;
const FCR_RXRDY_TXRDYN_EN: u8 = 1 << 3;
const FCR_TRIGGER_SINGLE_BYTE: u8 = 0x00;

/* LCR bits */
const LCR_DLAB: u8 = 1 << 7;

/* MCR bits */
const MCR_LOOP: u8 = 1 << 4;
const MCR_RLOOP: u8 = 1 << 5;

/* MM0 bits */
const MM0_ETTG: u8 = 1 << 5;
const MM0_ERTO: u8 = 1 << 6;
const MM0_EFBR: u8 = 1 << 7;

/* MM1 bits */
const MM1_E_MSB_RX: u8 = 1 << 0;
const MM1_E_MSB_TX: u8 = 1 << 1;

/* MM2 bits */
const MM2_EAFM: u8 = 1 << 1;
const MM2_ESWM: u8 = 1 << 3;

/* LSR bits */
const LSR_DR: u8 = 1 << 0; // Data ready
const LSR_THRE: u8 = 1 << 5; // TX FIFO empty
const LSR_TEMT: u8 = 1 << 6; // Shift register and FIFO empty

pub const TX_FIFO_SIZE: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Parity {
    None,
    Odd,
    Even,
    StickZero,
    StickOne,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StopBits {
    One,
    /// 1.5 stop bits for 5-bit frames, 2 otherwise.
    OneHalfOrTwo,
}

/// Frame format as programmed into LCR.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LineConfig {
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl LineConfig {
    /// 8 data bits, no parity, 1 stop bit.
    pub const N81: LineConfig = LineConfig {
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
    };

    pub const fn lcr(self) -> u8 {
        let wls = match self.data_bits {
            DataBits::Five => 0x00,
            DataBits::Six => 0x01,
            DataBits::Seven => 0x02,
            DataBits::Eight => 0x03,
        };
        let stb = match self.stop_bits {
            StopBits::One => 0x00,
            StopBits::OneHalfOrTwo => 0x04,
        };
        // PEN = bit 3, EPS = bit 4, SP = bit 5
        let par = match self.parity {
            Parity::None => 0x00,
            Parity::Odd => 0x08,
            Parity::Even => 0x18,
            Parity::StickOne => 0x28,
            Parity::StickZero => 0x38,
        };
        wls | stb | par
    }
}

/// Integer divisor plus fractional part in 1/64 steps.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BaudDivisors {
    pub integer: u16,
    pub fractional: u8,
}

impl BaudDivisors {
    /// Divisors for `baud` from an APB clock of `pclk_hz`, rounded to the
    /// nearest 1/128 of a step the way the MSS HAL does it. When rounding
    /// carries the fraction to 64/64 it is folded into the integer divisor;
    /// the HAL would program an out-of-range fraction of 64 there.
    pub fn compute(pclk_hz: u32, baud: u32) -> BootResult<Self> {
        if baud == 0 {
            return Err(BootError::InvalidBaud(baud));
        }
        let by_128 = (8 * pclk_hz as u64) / baud as u64;
        let by_64 = by_128 / 2;
        let mut integer = by_64 / 64;
        let mut fractional = by_64 - integer * 64;
        fractional += (by_128 - integer * 128) - fractional * 2;
        if fractional == 64 {
            integer += 1;
            fractional = 0;
        }
        if integer == 0 || integer > u16::MAX as u64 {
            return Err(BootError::InvalidBaud(baud));
        }
        Ok(BaudDivisors {
            integer: integer as u16,
            fractional: fractional as u8,
        })
    }

    /// Fractional divisor is only honoured above an integer divisor of 1.
    #[inline]
    pub fn fractional_enabled(&self) -> bool {
        self.integer > 1
    }
}

/// One MMUART instance. `peripheral` is the clock/reset bit of the block
/// behind `regs`.
pub struct MssUart<R: RegisterBlock> {
    regs: R,
    peripheral: Peripheral,
    pclk_hz: u32,
    line: Option<LineConfig>,
}

impl<R: RegisterBlock> MssUart<R> {
    pub const fn new(regs: R, peripheral: Peripheral, pclk_hz: u32) -> Self {
        MssUart {
            regs,
            peripheral,
            pclk_hz,
            line: None,
        }
    }

    pub fn peripheral(&self) -> Peripheral {
        self.peripheral
    }

    pub fn is_initialised(&self) -> bool {
        self.line.is_some()
    }

    pub fn line_config(&self) -> Option<LineConfig> {
        self.line
    }

    /// Program the UART for polled operation at `baud` with frame `line`.
    /// Interrupts stay disabled and both FIFOs are flushed.
    pub fn init(&mut self, baud: u32, line: LineConfig) -> BootResult<()> {
        let div = BaudDivisors::compute(self.pclk_hz, baud)?;
        let r = &mut self.regs;

        r.write8(IER_DMR, 0);

        r.write8(FCR, FCR_TRIGGER_SINGLE_BYTE);
        r.write8(FCR, FCR_TRIGGER_SINGLE_BYTE | FCR_CLEAR_RX_FIFO);
        r.write8(FCR, FCR_TRIGGER_SINGLE_BYTE | FCR_CLEAR_TX_FIFO);
        r.write8(FCR, FCR_TRIGGER_SINGLE_BYTE | FCR_RXRDY_TXRDYN_EN);

        r.modify8(MCR, |v| v & !(MCR_LOOP | MCR_RLOOP));
        r.modify8(MM1, |v| v & !(MM1_E_MSB_TX | MM1_E_MSB_RX));
        r.modify8(MM2, |v| v & !(MM2_EAFM | MM2_ESWM));
        r.modify8(MM0, |v| v & !(MM0_ETTG | MM0_ERTO | MM0_EFBR));

        r.write8(GFR, 0);
        r.write8(TTG, 0);
        r.write8(RTO, 0);

        r.modify8(LCR, |v| v | LCR_DLAB);
        r.write8(IER_DMR, (div.integer >> 8) as u8);
        r.write8(RBR_THR_DLR, div.integer as u8);
        r.modify8(LCR, |v| v & !LCR_DLAB);

        if div.fractional_enabled() {
            r.modify8(MM0, |v| v | MM0_EFBR);
            r.write8(DFR, div.fractional);
        } else {
            r.modify8(MM0, |v| v & !MM0_EFBR);
        }

        r.write8(LCR, line.lcr());
        self.line = Some(line);
        Ok(())
    }

    /// Blocking transmit: each time the TX FIFO drains, refill it with up to
    /// `TX_FIFO_SIZE` bytes. Returns once the last byte is in the FIFO.
    pub fn polled_tx(&mut self, bytes: &[u8]) -> BootResult<()> {
        if self.line.is_none() {
            return Err(BootError::UartNotInitialised);
        }
        for chunk in bytes.chunks(TX_FIFO_SIZE) {
            while (self.regs.read8(LSR) & LSR_THRE) == 0 {}
            for &b in chunk {
                self.regs.write8(RBR_THR_DLR, b);
            }
        }
        Ok(())
    }

    /// Nothing left in the FIFO or the shift register.
    pub fn tx_complete(&self) -> bool {
        (self.regs.read8(LSR) & LSR_TEMT) != 0
    }

    /// Move whatever the RX FIFO holds into `buf` without blocking.
    /// Stops when the FIFO is empty or `buf` is full; returns bytes moved.
    pub fn get_rx<const N: usize>(&mut self, buf: &mut heapless::Vec<u8, N>) -> usize {
        let mut n = 0;
        while !buf.is_full() && (self.regs.read8(LSR) & LSR_DR) != 0 {
            let byte = self.regs.read8(RBR_THR_DLR);
            if buf.push(byte).is_err() {
                break;
            }
            n += 1;
        }
        n
    }

    #[inline]
    fn put_byte(&mut self, byte: u8) {
        while (self.regs.read8(LSR) & LSR_THRE) == 0 {}
        self.regs.write8(RBR_THR_DLR, byte);
    }

    #[cfg(test)]
    pub fn regs(&self) -> &R {
        &self.regs
    }
}

impl<R: RegisterBlock> fmt::Write for MssUart<R> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.line.is_none() {
            return Err(fmt::Error);
        }
        for b in s.bytes() {
            match b {
                b'\n' => {
                    self.put_byte(b'\r');
                    self.put_byte(b'\n');
                }
                byte => self.put_byte(byte),
            }
        }
        Ok(())
    }
}

/// Bytes that reached the transmit holding register, reconstructed from a
/// mock access log by tracking DLAB.
#[cfg(test)]
pub(crate) fn transmitted(log: &[crate::mmio::mock::Access]) -> Vec<u8> {
    use crate::mmio::mock::Access;

    let mut dlab = false;
    let mut out = Vec::new();
    for a in log {
        match *a {
            Access::Write(LCR, v) => dlab = (v as u8 & LCR_DLAB) != 0,
            Access::Write(RBR_THR_DLR, v) if !dlab => out.push(v as u8),
            _ => {}
        }
    }
    out
}

/// Index in `log` of the final LCR write that leaves DLAB clear, i.e. the
/// point where the frame format is in force.
#[cfg(test)]
pub(crate) fn line_configured_at(log: &[crate::mmio::mock::Access]) -> Option<usize> {
    use crate::mmio::mock::Access;

    log.iter().rposition(|a| matches!(*a, Access::Write(LCR, v) if (v as u8 & LCR_DLAB) == 0))
}

#[cfg(test)]
pub(crate) mod offsets {
    pub const RBR: usize = super::RBR_THR_DLR;
    pub const DMR: usize = super::IER_DMR;
    pub const LCR: usize = super::LCR;
    pub const LSR: usize = super::LSR;
}
