//! Register access for memory-mapped MSS peripherals.
//!
//! Drivers talk to a [`RegisterBlock`] rather than raw pointers so the same
//! code runs against the silicon ([`Mmio`]) and against the recording mock
//! used by the host tests.

/// Byte-offset addressed register window of one peripheral.
pub trait RegisterBlock {
    fn read8(&self, offset: usize) -> u8;
    fn write8(&mut self, offset: usize, value: u8);
    fn read32(&self, offset: usize) -> u32;
    fn write32(&mut self, offset: usize, value: u32);

    /// Read-modify-write of an 8-bit register.
    #[inline]
    fn modify8(&mut self, offset: usize, f: impl FnOnce(u8) -> u8) {
        let v = self.read8(offset);
        self.write8(offset, f(v));
    }

    /// Read-modify-write of a 32-bit register.
    #[inline]
    fn modify32(&mut self, offset: usize, f: impl FnOnce(u32) -> u32) {
        let v = self.read32(offset);
        self.write32(offset, f(v));
    }
}

/// Volatile access to a physical register window.
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// # Safety
    /// `base` must be the address of a peripheral register window that stays
    /// mapped for the lifetime of the returned value, and nothing else may
    /// drive that window concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Mmio { base }
    }
}

impl RegisterBlock for Mmio {
    #[inline(always)]
    fn read8(&self, offset: usize) -> u8 {
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u8) }
    }

    #[inline(always)]
    fn write8(&mut self, offset: usize, value: u8) {
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u8, value) }
    }

    #[inline(always)]
    fn read32(&self, offset: usize) -> u32 {
        unsafe { core::ptr::read_volatile((self.base + offset) as *const u32) }
    }

    #[inline(always)]
    fn write32(&mut self, offset: usize, value: u32) {
        unsafe { core::ptr::write_volatile((self.base + offset) as *mut u32, value) }
    }
}

/// Recording register block for host tests.
#[cfg(test)]
pub mod mock {
    use super::RegisterBlock;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    pub enum Access {
        Read(usize, u32),
        Write(usize, u32),
    }

    /// Plain memory behind every offset, plus a log of each access in order.
    #[derive(Default)]
    pub struct MockRegs {
        mem: RefCell<BTreeMap<usize, u32>>,
        log: RefCell<Vec<Access>>,
    }

    impl MockRegs {
        pub fn new() -> Self {
            Self::default()
        }

        /// Set a register value without logging it.
        pub fn preset(&self, offset: usize, value: u32) {
            self.mem.borrow_mut().insert(offset, value);
        }

        pub fn peek(&self, offset: usize) -> u32 {
            self.mem.borrow().get(&offset).copied().unwrap_or(0)
        }

        pub fn log(&self) -> Vec<Access> {
            self.log.borrow().clone()
        }

        pub fn writes_to(&self, offset: usize) -> Vec<u32> {
            self.log
                .borrow()
                .iter()
                .filter_map(|a| match *a {
                    Access::Write(o, v) if o == offset => Some(v),
                    _ => None,
                })
                .collect()
        }

        pub fn reads_of(&self, offset: usize) -> usize {
            self.log
                .borrow()
                .iter()
                .filter(|a| matches!(a, Access::Read(o, _) if *o == offset))
                .count()
        }

        fn load(&self, offset: usize) -> u32 {
            let v = self.peek(offset);
            self.log.borrow_mut().push(Access::Read(offset, v));
            v
        }

        fn store(&self, offset: usize, value: u32) {
            self.mem.borrow_mut().insert(offset, value);
            self.log.borrow_mut().push(Access::Write(offset, value));
        }
    }

    impl RegisterBlock for MockRegs {
        fn read8(&self, offset: usize) -> u8 {
            self.load(offset) as u8
        }

        fn write8(&mut self, offset: usize, value: u8) {
            self.store(offset, value as u32);
        }

        fn read32(&self, offset: usize) -> u32 {
            self.load(offset)
        }

        fn write32(&mut self, offset: usize, value: u32) {
            self.store(offset, value);
        }
    }

    mod tests {
        use super::*;

        #[test]
        fn test_modify_preserves_other_bits() {
            let mut regs = MockRegs::new();
            regs.preset(0x84, 0b1010);
            regs.modify32(0x84, |v| v | 0b0001);
            assert_eq!(regs.peek(0x84), 0b1011);
            assert_eq!(regs.log(), vec![Access::Read(0x84, 0b1010), Access::Write(0x84, 0b1011)]);
        }

        #[test]
        fn test_unset_register_reads_zero() {
            let regs = MockRegs::new();
            assert_eq!(regs.read8(0x14), 0);
            assert_eq!(regs.reads_of(0x14), 1);
        }
    }
}
