//! Boot-mode-1 image packaging for the PolarFire SoC ENVM.
//!
//! The pre-boot firmware starts the E51 from ENVM when the image begins with
//! a 256-byte descriptor. `bind` prepends it, `to_ihex` turns the result into
//! Intel HEX placed at the ENVM base so it can be programmed directly.

use std::fmt::Write;

/// ENVM base address; the descriptor is the first thing there.
pub const ENVM_BASE: u32 = 0x2022_0000;

pub const HEADER_LEN: usize = 256;

/// `jal x0, HEADER_LEN`: hop over the descriptor into the payload.
const JUMP_OVER_HEADER: u32 = 0x1000_006f;
/// Second descriptor word as emitted by the vendor's boot-mode programmer.
const DESCRIPTOR_WORD: u32 = 0x0001_f5f0;
/// Entry address for each of the five harts: first payload byte.
const HART_ENTRY: u32 = ENVM_BASE + HEADER_LEN as u32;
const HART_ENTRIES_AT: usize = 0x08;
const HARTS: usize = 5;

const SBIC_AT: usize = 0xd0;
const SBIC_NAME: &[u8] = b"BOOT MODE 1 DUMMY SBIC";

/// The boot-mode-1 descriptor (dummy SBIC: no secure boot image certificate).
pub fn header() -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];
    put_u32(&mut h, 0x00, JUMP_OVER_HEADER);
    put_u32(&mut h, 0x04, DESCRIPTOR_WORD);
    for hart in 0..HARTS {
        put_u32(&mut h, HART_ENTRIES_AT + hart * 4, HART_ENTRY);
    }
    put_u32(&mut h, SBIC_AT, u32::MAX);
    let name_at = SBIC_AT + 4;
    h[name_at..name_at + SBIC_NAME.len()].copy_from_slice(SBIC_NAME);
    // name is NUL padded to a word boundary
    put_u32(&mut h, (name_at + SBIC_NAME.len() + 3) & !3, u32::MAX);
    h
}

fn put_u32(buf: &mut [u8], at: usize, v: u32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

/// Descriptor followed by `payload`.
pub fn bind(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&header());
    out.extend_from_slice(payload);
    out
}

const IHEX_DATA: u8 = 0x00;
const IHEX_EOF: u8 = 0x01;
const IHEX_EXT_LINEAR: u8 = 0x04;
const IHEX_RECORD_MAX: usize = 16;

/// Intel HEX for `image` loaded at `base`. Uses extended linear address
/// records and never lets a data record straddle a 64 KiB boundary.
pub fn to_ihex(image: &[u8], base: u32) -> String {
    let mut out = String::new();
    let mut upper: Option<u16> = None;
    let mut off = 0usize;

    while off < image.len() {
        let addr = base.wrapping_add(off as u32);
        let hi = (addr >> 16) as u16;
        if upper != Some(hi) {
            record(&mut out, 0, IHEX_EXT_LINEAR, &hi.to_be_bytes());
            upper = Some(hi);
        }
        let to_boundary = 0x1_0000 - (addr & 0xffff) as usize;
        let len = IHEX_RECORD_MAX.min(image.len() - off).min(to_boundary);
        record(&mut out, addr as u16, IHEX_DATA, &image[off..off + len]);
        off += len;
    }

    record(&mut out, 0, IHEX_EOF, &[]);
    out
}

fn record(out: &mut String, addr: u16, kind: u8, data: &[u8]) {
    let [a_hi, a_lo] = addr.to_be_bytes();
    let mut sum = (data.len() as u8).wrapping_add(a_hi).wrapping_add(a_lo).wrapping_add(kind);
    let _ = write!(out, ":{:02X}{:04X}{:02X}", data.len(), addr, kind);
    for &b in data {
        sum = sum.wrapping_add(b);
        let _ = write!(out, "{:02X}", b);
    }
    let _ = writeln!(out, "{:02X}", sum.wrapping_neg());
}
