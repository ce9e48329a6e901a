//! Error taxonomy for SCTE-35 decoding.
//!
//! Every failure aborts the decode of the enclosing message; there is no
//! partial result and no recovery. Positions are bit offsets from the start
//! of the message buffer.

use thiserror::Error;

/// Errors produced while decoding an SCTE-35 splice information section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The 8-bit splice command type has no defined mapping.
    #[error("unknown splice command type 0x{0:02x}")]
    UnknownCommandType(u8),

    /// The 8-bit splice descriptor tag has no defined mapping.
    #[error("unknown splice descriptor tag 0x{0:02x}")]
    UnknownDescriptorTag(u8),

    /// The encryption algorithm ordinal has no defined mapping.
    #[error("unknown encryption algorithm {0}")]
    UnknownEncryptionAlgorithm(u8),

    /// The 2-bit device restrictions ordinal has no defined mapping.
    #[error("unknown device restrictions value {0}")]
    UnknownDeviceRestrictions(u8),

    /// The segmentation type id is outside the defined table.
    #[error("unknown segmentation type 0x{0:02x}")]
    UnknownSegmentationType(u8),

    /// The 3-bit audio bitstream mode ordinal has no defined mapping.
    #[error("unknown bitstream mode {0}")]
    UnknownBitstreamMode(u8),

    /// A declared length does not match the bytes actually consumed.
    #[error("syntax error at bit {position}: {message}")]
    Syntax { position: usize, message: String },

    /// A byte-granular read was attempted while the cursor sat mid-byte.
    /// Grammar fields always resolve to byte boundaries at the points bytes
    /// are read, so this indicates a decoder bug rather than bad input.
    #[error("misaligned read at bit {position}: cursor is not on a byte boundary")]
    MisalignedRead { position: usize },

    /// The buffer was exhausted before a requested read could complete.
    #[error("unexpected end of data at bit {position}")]
    EndOfData { position: usize },

    /// A byte-range read was requested beyond what remains in the buffer.
    #[error("requested {requested} bytes at bit {position} but only {available} remain")]
    InsufficientData {
        position: usize,
        requested: usize,
        available: usize,
    },

    /// Caller-level misuse of a read primitive, e.g. a zero-width read.
    /// Indicates a defect in the decoder itself, not in the input data.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The stored CRC-32 does not match the computed section checksum.
    #[cfg(feature = "crc-validation")]
    #[error("CRC-32 mismatch: computed 0x{computed:08X}, stored 0x{stored:08X}")]
    CrcMismatch { computed: u32, stored: u32 },
}
