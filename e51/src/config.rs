//! Board settings fixed at build time.

use crate::mss_uart::{self, LineConfig};

/// APB/AHB clock feeding the MSS UARTs (Icicle kit reference design).
pub const MSS_APB_AHB_CLK_HZ: u32 = 150_000_000;

#[cfg(not(feature = "uart0-hi"))]
pub const MMUART0_BASE: usize = mss_uart::MMUART0_LO_BASE;
#[cfg(feature = "uart0-hi")]
pub const MMUART0_BASE: usize = mss_uart::MMUART0_HI_BASE;

/// Bytes reserved for the console receive path.
pub const RX_BUFF_SIZE: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BootConfig {
    /// Context passed with the clock/reset request.
    pub clk_context: u8,
    pub baud: u32,
    pub line: LineConfig,
}

pub const BOOT_CONFIG: BootConfig = BootConfig {
    clk_context: 1,
    baud: 115_200,
    line: LineConfig::N81,
};
