/// Sent once on MMUART0 when hart 0 comes up. The trailing NUL goes out on
/// the wire too, matching the images this firmware replaces.
pub const BANNER: &[u8] = b" \r\n\r\n\
---------------------------------------------------------------------\r\n\r\n \
BOOTLOADER STARTED \r\n\r\n\
---------------------------------------------------------------------\r\n\0";

#[cfg(test)]
mod tests {
    use super::*;

    const DIVIDER: &str = "---------------------------------------------------------------------";

    #[test]
    fn test_banner_layout() {
        assert_eq!(DIVIDER.len(), 69);
        let expected = format!(" \r\n\r\n{d}\r\n\r\n BOOTLOADER STARTED \r\n\r\n{d}\r\n\0", d = DIVIDER);
        assert_eq!(BANNER, expected.as_bytes());
        assert_eq!(BANNER.len(), 174);
    }

    #[test]
    fn test_banner_ends_with_single_nul() {
        assert_eq!(BANNER.iter().filter(|&&b| b == 0).count(), 1);
        assert_eq!(BANNER.last(), Some(&0));
    }
}
