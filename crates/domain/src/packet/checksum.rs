/// RFC 1071 one's-complement checksum over `header`.
///
/// Words are read big-endian; an odd trailing byte is padded with zero.
/// The checksum field itself must be zeroed by the caller beforehand.
pub fn ipv4_checksum(header: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    let mut words = header.chunks_exact(2);
    for word in &mut words {
        sum += u32::from(u16::from_be_bytes([word[0], word[1]]));
    }
    if let [last] = words.remainder() {
        sum += u32::from(*last) << 8;
    }

    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    !(sum as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_header() {
        let header = [
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8,
            0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
        ];
        assert_eq!(ipv4_checksum(&header), 0xb861);
    }

    #[test]
    fn test_header_with_checksum_sums_to_zero() {
        let mut header = [
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xc0, 0xa8,
            0x00, 0x01, 0xc0, 0xa8, 0x00, 0xc7,
        ];
        header[10..12].copy_from_slice(&0xb861u16.to_be_bytes());
        assert_eq!(ipv4_checksum(&header), 0);
    }

    #[test]
    fn test_only_version_ihl_set() {
        let mut header = [0u8; 20];
        header[0] = 0x45;
        assert_eq!(ipv4_checksum(&header), !0x4500);
    }

    #[test]
    fn test_odd_length_is_zero_padded() {
        assert_eq!(ipv4_checksum(&[0x12, 0x34, 0x56]), ipv4_checksum(&[0x12, 0x34, 0x56, 0x00]));
    }

    #[test]
    fn test_carry_is_folded() {
        // 0xffff + 0x0001 = 0x10000 -> folds to 0x0001 -> complement 0xfffe
        assert_eq!(ipv4_checksum(&[0xff, 0xff, 0x00, 0x01]), 0xfffe);
    }
}
