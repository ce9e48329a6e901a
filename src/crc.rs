//! CRC-32 of SCTE-35 sections.
//!
//! SCTE-35 uses the MPEG-2 CRC-32 over the whole section up to the CRC
//! field. This module only exists when the `crc-validation` feature is
//! enabled; without it the stored CRC is captured but never checked.

use crc::{CRC_32_MPEG_2, Crc};

/// MPEG-2 CRC-32 algorithm instance.
pub const MPEG_2: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

/// Computes the MPEG-2 CRC-32 over the given bytes.
pub fn compute_crc(data: &[u8]) -> u32 {
    MPEG_2.checksum(data)
}
