//! Bit-level reading utilities for parsing SCTE-35 binary data.
//!
//! This module provides the `BitReader` struct which enables reading arbitrary
//! numbers of bits from a byte buffer, as required by the SCTE-35 specification.

use crate::error::DecodeError;

/// A reader that can extract values at the bit level from a byte buffer.
///
/// SCTE-35 messages contain fields that are not byte-aligned, requiring
/// bit-level parsing. The reader maintains a bit offset and provides methods
/// to read various bit-width values. Byte-granular reads additionally require
/// the cursor to sit on a byte boundary.
///
/// A reader makes a single linear pass over its buffer; create a fresh reader
/// for every decode.
pub(crate) struct BitReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` for the given buffer, starting at bit offset 0.
    pub fn new(buffer: &'a [u8]) -> Self {
        BitReader { buffer, offset: 0 }
    }

    /// The current bit offset in the buffer.
    ///
    /// Callers use the delta between two positions to cross-check declared
    /// byte lengths: bytes consumed = (after - before) / 8.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Reads a single bit, advancing the offset by 1.
    pub fn read_bit(&mut self) -> Result<u8, DecodeError> {
        let byte_index = self.offset / 8;
        if byte_index >= self.buffer.len() {
            return Err(DecodeError::EndOfData {
                position: self.offset,
            });
        }
        let bit = (self.buffer[byte_index] >> (7 - self.offset % 8)) & 1;
        self.offset += 1;
        Ok(bit)
    }

    /// Reads a single bit as a flag.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_bit()? == 1)
    }

    /// Reads `num_bits` bits (1..=32) as a big-endian unsigned integer.
    pub fn read_bits(&mut self, num_bits: usize) -> Result<u32, DecodeError> {
        if num_bits == 0 || num_bits > 32 {
            return Err(DecodeError::InvalidArgument(format!(
                "requested {num_bits} bits, not in 1..=32"
            )));
        }
        Ok(self.accumulate_bits(num_bits)? as u32)
    }

    /// Reads `num_bits` bits (1..=64) as a big-endian unsigned integer.
    pub fn read_bits_wide(&mut self, num_bits: usize) -> Result<u64, DecodeError> {
        if num_bits == 0 || num_bits > 64 {
            return Err(DecodeError::InvalidArgument(format!(
                "requested {num_bits} bits, not in 1..=64"
            )));
        }
        self.accumulate_bits(num_bits)
    }

    /// Reads a single byte. The cursor must be byte-aligned.
    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        self.require_alignment()?;
        Ok(self.accumulate_bits(8)? as u8)
    }

    /// Reads `count` bytes (1..=4) as a big-endian unsigned integer.
    /// The cursor must be byte-aligned.
    pub fn read_bytes(&mut self, count: usize) -> Result<u32, DecodeError> {
        if count == 0 || count > 4 {
            return Err(DecodeError::InvalidArgument(format!(
                "requested {count} bytes, not in 1..=4"
            )));
        }
        self.require_alignment()?;
        Ok(self.accumulate_bits(count * 8)? as u32)
    }

    /// Reads `count` bytes (1..=8) as a big-endian unsigned integer.
    /// The cursor must be byte-aligned.
    pub fn read_bytes_wide(&mut self, count: usize) -> Result<u64, DecodeError> {
        if count == 0 || count > 8 {
            return Err(DecodeError::InvalidArgument(format!(
                "requested {count} bytes, not in 1..=8"
            )));
        }
        self.require_alignment()?;
        self.accumulate_bits(count * 8)
    }

    /// Reads `count` bytes as an opaque slice of the underlying buffer.
    /// The cursor must be byte-aligned; the request is bounds-checked
    /// against the remaining buffer length.
    pub fn read_opaque_bytes(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        self.require_alignment()?;
        let start = self.offset / 8;
        let available = self.buffer.len() - start;
        if count > available {
            return Err(DecodeError::InsufficientData {
                position: self.offset,
                requested: count,
                available,
            });
        }
        self.offset += count * 8;
        Ok(&self.buffer[start..start + count])
    }

    /// Reads `count` bytes as a string of single-byte characters.
    /// The cursor must be byte-aligned.
    pub fn read_ascii_string(&mut self, count: usize) -> Result<String, DecodeError> {
        if count == 0 {
            return Err(DecodeError::InvalidArgument(
                "requested a zero-length string".to_string(),
            ));
        }
        let bytes = self.read_opaque_bytes(count)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    /// Skips `num_bits` bits without materializing a value.
    pub fn skip_bits(&mut self, num_bits: usize) -> Result<(), DecodeError> {
        let new_offset = self.offset + num_bits;
        if new_offset > self.buffer.len() * 8 {
            return Err(DecodeError::EndOfData {
                position: self.offset,
            });
        }
        self.offset = new_offset;
        Ok(())
    }

    fn require_alignment(&self) -> Result<(), DecodeError> {
        if self.offset % 8 != 0 {
            return Err(DecodeError::MisalignedRead {
                position: self.offset,
            });
        }
        Ok(())
    }

    /// Big-endian accumulation of `num_bits` sequential bits. The caller has
    /// already validated `num_bits <= 64`.
    fn accumulate_bits(&mut self, num_bits: usize) -> Result<u64, DecodeError> {
        let mut value: u64 = 0;
        let mut bits_read = 0;

        while bits_read < num_bits {
            let byte_index = self.offset / 8;
            let bit_offset = self.offset % 8;

            if byte_index >= self.buffer.len() {
                return Err(DecodeError::EndOfData {
                    position: self.offset,
                });
            }

            let byte = self.buffer[byte_index];
            let bits_to_read = std::cmp::min(num_bits - bits_read, 8 - bit_offset);
            let mask = if bits_to_read >= 8 {
                0xFF
            } else {
                (1u8 << bits_to_read) - 1
            };
            let bits_value = (byte >> (8 - bit_offset - bits_to_read)) & mask;

            value = (value << bits_to_read) | (bits_value as u64);
            self.offset += bits_to_read;
            bits_read += bits_to_read;
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_reader_basic() {
        let buffer = vec![0b10101010, 0b11110000];
        let mut reader = BitReader::new(&buffer);

        assert_eq!(reader.read_bits(4).unwrap(), 10);
        assert_eq!(reader.read_bits(4).unwrap(), 10);
        assert_eq!(reader.read_bits(8).unwrap(), 240);
    }

    #[test]
    fn test_bit_reader_cross_byte() {
        let buffer = vec![0b10101010, 0b11110000];
        let mut reader = BitReader::new(&buffer);

        assert_eq!(reader.read_bits(6).unwrap(), 42);
        assert_eq!(reader.read_bits(6).unwrap(), 47);
    }

    #[test]
    fn test_bit_reader_skip() {
        let buffer = vec![0b10101010, 0b11110000];
        let mut reader = BitReader::new(&buffer);

        reader.skip_bits(4).unwrap();
        assert_eq!(reader.read_bits(4).unwrap(), 10);
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_bit_reader_overflow() {
        let buffer = vec![0b10101010];
        let mut reader = BitReader::new(&buffer);

        assert!(matches!(
            reader.read_bits(16),
            Err(DecodeError::EndOfData { .. })
        ));
    }

    #[test]
    fn test_bit_width_bounds() {
        let buffer = vec![0xFF; 16];
        let mut reader = BitReader::new(&buffer);

        assert!(matches!(
            reader.read_bits(0),
            Err(DecodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            reader.read_bits(33),
            Err(DecodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            reader.read_bits_wide(65),
            Err(DecodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            reader.read_bytes(5),
            Err(DecodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            reader.read_bytes_wide(9),
            Err(DecodeError::InvalidArgument(_))
        ));
        // Failed validation must not move the cursor.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_byte_reads_are_big_endian() {
        let buffer = vec![0x12, 0x34, 0x56, 0x78, 0x9A];
        let mut reader = BitReader::new(&buffer);

        assert_eq!(reader.read_bytes(4).unwrap(), 0x12345678);
        assert_eq!(reader.read_byte().unwrap(), 0x9A);
    }

    #[test]
    fn test_wide_reads() {
        let buffer = vec![0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        let mut reader = BitReader::new(&buffer);
        assert_eq!(reader.read_bytes_wide(8).unwrap(), 0x0123456789ABCDEF);

        let buffer = vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = BitReader::new(&buffer);
        reader.skip_bits(7).unwrap();
        assert_eq!(reader.read_bits_wide(33).unwrap(), 0x1FFFFFFFF);
    }

    #[test]
    fn test_misaligned_byte_read() {
        let buffer = vec![0xAB, 0xCD];
        let mut reader = BitReader::new(&buffer);

        reader.read_bit().unwrap();
        assert_eq!(
            reader.read_byte(),
            Err(DecodeError::MisalignedRead { position: 1 })
        );
        assert_eq!(
            reader.read_opaque_bytes(1),
            Err(DecodeError::MisalignedRead { position: 1 })
        );
    }

    #[test]
    fn test_opaque_bytes_bounds() {
        let buffer = vec![0x01, 0x02, 0x03];
        let mut reader = BitReader::new(&buffer);

        assert_eq!(reader.read_opaque_bytes(2).unwrap(), &[0x01, 0x02]);
        assert_eq!(
            reader.read_opaque_bytes(2),
            Err(DecodeError::InsufficientData {
                position: 16,
                requested: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_ascii_string() {
        let buffer = b"SCTE".to_vec();
        let mut reader = BitReader::new(&buffer);

        assert_eq!(reader.read_ascii_string(4).unwrap(), "SCTE");
        assert!(matches!(
            BitReader::new(&buffer).read_ascii_string(0),
            Err(DecodeError::InvalidArgument(_))
        ));
    }
}
