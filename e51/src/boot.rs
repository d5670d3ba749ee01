//! Hart 0 bring-up: console clock, console init, banner.

use crate::banner::BANNER;
use crate::config::BootConfig;
use crate::error::BootResult;
use crate::hart::HartId;
use crate::mmio::RegisterBlock;
use crate::mss_uart::MssUart;
use crate::sysreg::{PeripheralState, Sysreg};

/// Runs once on hart 0. Each step must succeed before the next is tried, so
/// nothing is transmitted unless the UART was configured first.
pub fn e51<S, U>(
    _hart: HartId,
    sysreg: &mut Sysreg<S>,
    uart: &mut MssUart<U>,
    cfg: &BootConfig,
) -> BootResult<()>
where
    S: RegisterBlock,
    U: RegisterBlock,
{
    sysreg.config_clk_rst(uart.peripheral(), cfg.clk_context, PeripheralState::On)?;
    uart.init(cfg.baud, cfg.line)?;
    uart.polled_tx(BANNER)?;
    Ok(())
}
