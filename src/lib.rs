//! Decoder for SCTE-35 splice information sections.
//!
//! SCTE-35 messages carry ad-insertion and content-boundary signalling in
//! MPEG transport streams. This crate decodes a complete binary section into
//! a typed [`SpliceInfoSection`]: the header, one of the six splice command
//! variants, and the descriptor loop.
//!
//! Decoding is strict and all-or-nothing. A malformed message, an unknown
//! enumeration value, or a length field that contradicts the actual content
//! fails the whole decode with a [`DecodeError`]; there are no partially
//! decoded results.
//!
//! ```rust
//! use data_encoding::BASE64;
//! use scte35_decode::{parse_splice_info_section, SpliceCommand};
//!
//! let message = "/DAvAAAAAAAA///wFAVIAACPf+/+c2nALv4AUsz1AAAAAAAKAAhDVUVJAAABNWLbowo=";
//! let buffer = BASE64.decode(message.as_bytes()).unwrap();
//!
//! let section = parse_splice_info_section(&buffer).unwrap();
//! let SpliceCommand::Insert { event } = &section.command else {
//!     panic!("expected a splice insert");
//! };
//! assert_eq!(event.id, 0x4800008F);
//! ```
//!
//! # Features
//!
//! - `crc-validation` - verify the trailing CRC-32 against the section bytes
//!   (MPEG-2 CRC-32 via the `crc` crate)
//! - `serde` - derive `Serialize` on all decoded types

use std::time::Duration;

mod bit_reader;
#[cfg(feature = "crc-validation")]
pub mod crc;
pub mod descriptors;
mod error;
mod parser;
pub mod time;
pub mod types;
pub mod upid;


pub use error::DecodeError;
pub use parser::parse_splice_info_section;
pub use types::{SpliceCommand, SpliceInfoSection};

/// The PTS clock rate. SCTE-35 times are counted in these ticks.
pub const PTS_CLOCK_HZ: u64 = 90_000;

/// Converts 90 kHz ticks to seconds, truncated to 6 decimal positions as
/// times are printed in the SCTE-35 standard.
pub fn ticks_to_secs(value: u64) -> f64 {
    (value as f64 / PTS_CLOCK_HZ as f64 * 1_000_000.0).ceil() / 1_000_000.0
}

pub trait ClockTimeExt {
    fn as_90k(&self) -> u64;
}

impl ClockTimeExt for Duration {
    fn as_90k(&self) -> u64 {
        (self.as_secs_f64() * PTS_CLOCK_HZ as f64) as u64
    }
}

#[cfg(test)]
mod clock_tests {
    use super::*;

    #[test]
    fn test_clock_time() {
        let duration = Duration::from_secs(1);
        assert_eq!(duration.as_90k(), 90_000);
    }

    #[test]
    fn test_standard_example_time() {
        let time = Duration::from_secs_f64(21388.766756);
        assert_eq!(time.as_90k(), 0x072bd0050);
    }

    #[test]
    fn test_ticks_to_secs() {
        assert_eq!(ticks_to_secs(90_000), 1.0);
        assert_eq!(ticks_to_secs(0x072bd0050), 21388.766756);
    }
}
