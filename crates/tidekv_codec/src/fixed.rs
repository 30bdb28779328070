//! Fixed-width big-endian integer encode/decode.
//!
//! Big-endian so that lexicographic comparison of encoded bytes equals
//! numeric comparison; the binlog id scan relies on this.

use crate::error::{CodecError, CodecResult};

/// Appends `value` as 2 big-endian bytes.
pub fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Appends `value` as 4 big-endian bytes.
pub fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Appends `value` as 8 big-endian bytes.
pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Reads a big-endian u16 from the front of `buf`.
pub fn read_u16(buf: &[u8]) -> CodecResult<u16> {
    let head = buf
        .get(..2)
        .ok_or_else(|| CodecError::eof("u16", 2, buf.len()))?;
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(head);
    Ok(u16::from_be_bytes(bytes))
}

/// Reads a big-endian u32 from the front of `buf`.
pub fn read_u32(buf: &[u8]) -> CodecResult<u32> {
    let head = buf
        .get(..4)
        .ok_or_else(|| CodecError::eof("u32", 4, buf.len()))?;
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(head);
    Ok(u32::from_be_bytes(bytes))
}

/// Reads a big-endian u64 from the front of `buf`.
pub fn read_u64(buf: &[u8]) -> CodecResult<u64> {
    let head = buf
        .get(..8)
        .ok_or_else(|| CodecError::eof("u64", 8, buf.len()))?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(head);
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut buf = Vec::new();
        put_u16(&mut buf, 0xBEEF);
        put_u32(&mut buf, 0xDEAD_BEEF);
        put_u64(&mut buf, 0x0102_0304_0506_0708);

        assert_eq!(read_u16(&buf).unwrap(), 0xBEEF);
        assert_eq!(read_u32(&buf[2..]).unwrap(), 0xDEAD_BEEF);
        assert_eq!(read_u64(&buf[6..]).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn short_buffer_fails() {
        assert!(read_u16(&[0x01]).is_err());
        assert!(read_u32(&[0x01, 0x02, 0x03]).is_err());
        assert!(read_u64(&[0u8; 7]).is_err());
    }

    #[test]
    fn big_endian_preserves_order() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        put_u64(&mut a, 255);
        put_u64(&mut b, 256);
        assert!(a < b);
    }
}
