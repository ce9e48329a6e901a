//! Splice descriptor types.
//!
//! Descriptors extend splice commands with additional signalling. They appear
//! in the descriptor loop after the command, each introduced by a one-byte tag
//! and a one-byte length. The segmentation descriptor is by far the richest
//! and carries most of the ad-boundary semantics found in real streams.

use crate::error::DecodeError;
use crate::types::{SegmentationType, SpliceMode};
use crate::upid::{SegmentationUpidType, Upid};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A splice descriptor from the descriptor loop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SpliceDescriptor {
    /// `avail_descriptor` (tag 0x00)
    Avail(AvailDescriptor),
    /// `DTMF_descriptor` (tag 0x01)
    Dtmf(DtmfDescriptor),
    /// `segmentation_descriptor` (tag 0x02)
    Segmentation(SegmentationDescriptor),
    /// `time_descriptor` (tag 0x03)
    Time(TimeDescriptor),
    /// `audio_descriptor` (tag 0x04)
    Audio(AudioDescriptor),
}

/// Provider-defined avail numbering for a splice insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AvailDescriptor {
    /// Descriptor identifier, 0x43554549 ("CUEI")
    pub identifier: u32,
    pub provider_avail_id: u32,
}

/// DTMF tones an analog cue-tone system should emit at the splice point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DtmfDescriptor {
    /// Descriptor identifier, 0x43554549 ("CUEI")
    pub identifier: u32,
    /// Time ahead of the splice to emit the tones, in tenths of a second
    pub preroll: u8,
    /// The DTMF characters to emit, from the set `0-9`, `*`, `#`
    pub chars: String,
}

/// TAI wall-clock time, used to map PTS times to an absolute clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TimeDescriptor {
    /// Descriptor identifier, 0x43554549 ("CUEI")
    pub identifier: u32,
    /// Seconds since the TAI epoch (48 bits)
    pub tai_seconds: u64,
    pub tai_nanoseconds: u32,
    /// Current UTC offset from TAI, in seconds
    pub utc_offset: u16,
}

/// Audio stream composition at a program join point.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AudioDescriptor {
    /// Descriptor identifier, 0x43554549 ("CUEI")
    pub identifier: u32,
    pub components: Vec<AudioComponent>,
}

/// One audio component described by an [`AudioDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AudioComponent {
    pub tag: u8,
    /// ISO 639-2 language code packed as three ASCII bytes (24 bits)
    pub iso_code: u32,
    pub bitstream_mode: BitstreamMode,
    /// Channel count indication (4 bits)
    pub num_channels: u8,
    pub full_service_audio: bool,
}

/// AC-3 bitstream modes, from ATSC A/52.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[non_exhaustive]
pub enum BitstreamMode {
    CompleteMain,
    MusicAndEffects,
    VisuallyImpaired,
    HearingImpaired,
    Dialogue,
    Commentary,
    Emergency,
    VoiceOver,
    Karaoke,
}

impl BitstreamMode {
    /// Maps the 3-bit bsmod field to a variant.
    ///
    /// 7 means voice-over for most channel configurations and karaoke only
    /// when the full acmod context says so; that context is not available
    /// here, so 7 always maps to [`BitstreamMode::VoiceOver`].
    pub fn from_id(id: u8) -> Result<Self, DecodeError> {
        match id {
            0 => Ok(BitstreamMode::CompleteMain),
            1 => Ok(BitstreamMode::MusicAndEffects),
            2 => Ok(BitstreamMode::VisuallyImpaired),
            3 => Ok(BitstreamMode::HearingImpaired),
            4 => Ok(BitstreamMode::Dialogue),
            5 => Ok(BitstreamMode::Commentary),
            6 => Ok(BitstreamMode::Emergency),
            7 => Ok(BitstreamMode::VoiceOver),
            _ => Err(DecodeError::UnknownBitstreamMode(id)),
        }
    }
}

/// A segmentation descriptor, signalling a content boundary.
///
/// `detail` is `None` exactly when the descriptor cancels a previously
/// signalled event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationDescriptor {
    /// Descriptor identifier, 0x43554549 ("CUEI")
    pub identifier: u32,
    pub event_id: u32,
    pub cancel: bool,
    pub detail: Option<SegmentationDetail>,
}

/// The body of a non-cancelled segmentation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationDetail {
    /// The wire program_segmentation_flag
    pub program: bool,
    /// Addressing mode derived from the flag
    pub mode: SpliceMode,
    /// Whether delivery restrictions apply. When false, `restrictions` is
    /// `None` and playback is unrestricted.
    pub delivery_restricted: bool,
    pub restrictions: Option<DeliveryRestrictions>,
    /// Component offsets, empty in program mode
    pub components: Vec<SegmentationComponent>,
    /// Segment length in 90 kHz ticks (40 bits), when signalled
    pub duration: Option<u64>,
    pub upid_type: SegmentationUpidType,
    /// Declared byte length of the UPID field
    pub upid_length: u8,
    /// One entry for plain UPID types, one per inner UPID for MID
    pub upids: Vec<Upid>,
    pub segmentation_type: SegmentationType,
    pub segment_num: u8,
    pub segments_expected: u8,
}

/// Delivery restriction flags of a segmentation descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DeliveryRestrictions {
    pub web_delivery_allowed: bool,
    pub no_regional_blackout: bool,
    pub archive_allowed: bool,
    pub device_restrictions: DeviceRestrictions,
}

/// Device-group restriction values of a segmentation descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DeviceRestrictions {
    RestrictGroup0,
    RestrictGroup1,
    RestrictGroup2,
    None,
}

impl DeviceRestrictions {
    /// Maps the 2-bit device_restrictions field to a variant.
    pub fn from_id(id: u8) -> Result<Self, DecodeError> {
        match id {
            0 => Ok(DeviceRestrictions::RestrictGroup0),
            1 => Ok(DeviceRestrictions::RestrictGroup1),
            2 => Ok(DeviceRestrictions::RestrictGroup2),
            3 => Ok(DeviceRestrictions::None),
            _ => Err(DecodeError::UnknownDeviceRestrictions(id)),
        }
    }
}

/// A component entry of a component-mode segmentation descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SegmentationComponent {
    pub tag: u8,
    /// Offset of the component splice point from the command splice time,
    /// in 90 kHz ticks (33 bits)
    pub pts_offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The wire field is 3 bits, so ordinals above 7 can only reach
    // `from_id` through direct calls, never from a decoded message.
    #[test]
    fn test_bitstream_mode_table() {
        assert_eq!(BitstreamMode::from_id(0).unwrap(), BitstreamMode::CompleteMain);
        assert_eq!(BitstreamMode::from_id(2).unwrap(), BitstreamMode::VisuallyImpaired);
        assert_eq!(BitstreamMode::from_id(7).unwrap(), BitstreamMode::VoiceOver);
        assert_eq!(
            BitstreamMode::from_id(8),
            Err(DecodeError::UnknownBitstreamMode(8))
        );
    }

    // All four values of the 2-bit wire field are defined, so the error
    // arm is only reachable through direct `from_id` calls.
    #[test]
    fn test_device_restrictions_table() {
        assert_eq!(
            DeviceRestrictions::from_id(0).unwrap(),
            DeviceRestrictions::RestrictGroup0
        );
        assert_eq!(
            DeviceRestrictions::from_id(3).unwrap(),
            DeviceRestrictions::None
        );
        assert_eq!(
            DeviceRestrictions::from_id(4),
            Err(DecodeError::UnknownDeviceRestrictions(4))
        );
    }
}
