//! E51 firmware library - drivers and boot sequence
//!
//! Everything that touches hardware goes through `mmio::RegisterBlock`, so the
//! drivers and the boot routine are tested on the host against a mock
//! register block while the firmware binary remains no_std.

#![cfg_attr(not(test), no_std)]

pub mod banner;
pub mod boot;
pub mod clint;
pub mod config;
pub mod console;
pub mod error;
pub mod hart;
pub mod logging;
pub mod mmio;
pub mod mss_uart;
pub mod swi;
pub mod sysreg;

pub use error::{BootError, BootResult};
