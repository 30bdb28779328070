//! LEB128 variable-length encoding for unsigned 64-bit integers.
//!
//! Small values occupy fewer bytes: each byte carries 7 value bits, the
//! high bit marks continuation. Used throughout the record and binlog
//! formats for lengths and timestamps.

use crate::error::{CodecError, CodecResult};

/// Maximum encoded length of a u64 varint (ceil(64 / 7) bytes).
pub const MAX_ENCODED_LEN: usize = 10;

/// Appends the varint encoding of `value` to `buf`.
///
/// Returns the number of bytes written.
pub fn encode(mut value: u64, buf: &mut Vec<u8>) -> usize {
    let mut written = 0;
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        written += 1;
        if value == 0 {
            buf.push(byte);
            return written;
        }
        buf.push(byte | 0x80);
    }
}

/// Returns the encoded length of `value` without encoding it.
pub fn encoded_len(value: u64) -> usize {
    // 64-bit values need at most ten 7-bit groups; zero still takes one byte.
    (64 - value.leading_zeros() as usize).div_ceil(7).max(1)
}

/// Decodes one varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed so callers can
/// advance a cursor over concatenated fields.
///
/// # Errors
///
/// Fails if the buffer ends mid-varint or the encoding exceeds
/// [`MAX_ENCODED_LEN`] bytes.
pub fn decode_forward(buf: &[u8]) -> CodecResult<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    for (i, &byte) in buf.iter().enumerate() {
        if i >= MAX_ENCODED_LEN {
            return Err(CodecError::VarintOverflow);
        }
        // The tenth byte may only contribute the final value bit.
        if i == MAX_ENCODED_LEN - 1 && byte > 0x01 {
            return Err(CodecError::VarintOverflow);
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    Err(CodecError::eof("varint", buf.len() + 1, buf.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_byte_values() {
        for v in [0u64, 1, 42, 127] {
            let mut buf = Vec::new();
            assert_eq!(encode(v, &mut buf), 1);
            assert_eq!(buf, vec![v as u8]);
            assert_eq!(decode_forward(&buf).unwrap(), (v, 1));
        }
    }

    #[test]
    fn multi_byte_boundaries() {
        let cases: &[(u64, usize)] = &[
            (127, 1),
            (128, 2),
            (16_383, 2),
            (16_384, 3),
            (u64::MAX, 10),
        ];
        for &(v, len) in cases {
            let mut buf = Vec::new();
            assert_eq!(encode(v, &mut buf), len, "encode len for {v}");
            assert_eq!(encoded_len(v), len, "encoded_len for {v}");
            assert_eq!(decode_forward(&buf).unwrap(), (v, len));
        }
    }

    #[test]
    fn decode_stops_at_terminator() {
        // 300 = [0xAC, 0x02], followed by unrelated bytes.
        let buf = [0xAC, 0x02, 0xFF, 0xFF];
        assert_eq!(decode_forward(&buf).unwrap(), (300, 2));
    }

    #[test]
    fn truncated_varint_fails() {
        let buf = [0x80u8];
        assert!(decode_forward(&buf).is_err());
        assert!(decode_forward(&[]).is_err());
    }

    #[test]
    fn oversized_varint_fails() {
        // Eleven continuation bytes can never be a valid u64.
        let buf = [0x80u8; 11];
        assert_eq!(decode_forward(&buf), Err(CodecError::VarintOverflow));
        // Ten bytes whose last byte carries more than the final value bit.
        let mut buf = vec![0xFFu8; 9];
        buf.push(0x02);
        assert_eq!(decode_forward(&buf), Err(CodecError::VarintOverflow));
    }

    proptest! {
        #[test]
        fn roundtrip_any_value(value: u64) {
            let mut buf = Vec::new();
            let written = encode(value, &mut buf);
            prop_assert_eq!(written, buf.len());
            prop_assert_eq!(written, encoded_len(value));
            let (decoded, consumed) = decode_forward(&buf).unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(consumed, written);
        }
    }
}
