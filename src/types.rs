//! Core SCTE-35 data structures and types.
//!
//! This module contains the structures representing decoded SCTE-35 messages,
//! splice commands, and splice events. Every type here is an immutable value
//! produced once by the parser; nothing is mutated after construction.

use crate::descriptors::SpliceDescriptor;
use crate::error::DecodeError;
use crate::time::{BreakDuration, SpliceTime};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A complete decoded SCTE-35 splice information section.
///
/// This is the top-level structure produced by
/// [`parse_splice_info_section`](crate::parse_splice_info_section): the header
/// fields, the splice command, the descriptor loop in wire order, and the
/// trailing CRC-32.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceInfoSection {
    /// Table identifier, 0xFC for SCTE-35
    pub table_id: u8,
    /// Section syntax indicator (false for MPEG short sections)
    pub section_syntax_indicator: bool,
    /// Private indicator (false for not private)
    pub private_indicator: bool,
    /// Length of the section in bytes, from the 12-bit header field
    pub section_length: u16,
    /// SCTE-35 protocol version
    pub protocol_version: u8,
    /// Whether the command and descriptor bytes are encrypted. Encrypted
    /// payloads are surfaced as-is; no decryption is performed.
    pub encrypted: bool,
    /// Encryption algorithm in use when `encrypted` is set
    pub encryption_algorithm: EncryptionAlgorithm,
    /// PTS adjustment in 90 kHz ticks (33 bits)
    pub pts_adjustment: u64,
    /// Control word index for encryption
    pub cw_index: u8,
    /// 12-bit tier value for authorization
    pub tier: u16,
    /// The splice command carried by this message
    pub command: SpliceCommand,
    /// Splice descriptors in wire order
    pub descriptors: Vec<SpliceDescriptor>,
    /// Trailing CRC-32, captured verbatim and not interpreted
    pub crc_32: u32,
}

/// The splice command variants defined in SCTE-35.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SpliceCommand {
    /// `splice_null()` (0x00) - no operation
    Null,
    /// `splice_schedule()` (0x04) - pre-scheduled splice events
    Schedule { events: Vec<ScheduleEvent> },
    /// `splice_insert()` (0x05) - ad insertion points
    Insert { event: InsertEvent },
    /// `time_signal()` (0x06) - time synchronization, usually paired with
    /// segmentation descriptors
    TimeSignal { time: SpliceTime },
    /// `bandwidth_reservation()` (0x07)
    BandwidthReservation,
    /// `private_command()` (0xFF) - proprietary payload
    Private { id: u32, bytes: Vec<u8> },
}

/// How a splice event addresses the transport stream.
///
/// Not an explicit wire field; derived from the program/immediate flags.
/// `Immediate` only occurs for insert events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SpliceMode {
    /// The event applies to the whole program
    Program,
    /// The event lists individual elementary-stream components
    Component,
    /// The event applies immediately, with no time given
    Immediate,
}

/// Fields shared by schedule and insert events when the event is not
/// cancelled. Embedded by value in both event kinds; the two only share data
/// shape, not behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceEventCommon {
    /// Whether the splice goes out of (true) or returns to (false) the network
    pub out_of_network: bool,
    /// The wire program_splice_flag
    pub program: bool,
    /// Addressing mode derived from the flags
    pub mode: SpliceMode,
    /// Commercial break length, when the break-duration flag was set
    pub break_duration: Option<BreakDuration>,
    /// Unique identifier for the viewing event within the program
    pub program_id: u16,
    /// Which avail within the break this event is
    pub avail_num: u8,
    /// How many avails the break holds
    pub avails_expected: u8,
}

/// One event of a `splice_schedule()` command.
///
/// `detail` is `None` exactly when the event is cancelled; a cancelled event
/// carries nothing beyond its id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScheduleEvent {
    pub id: u32,
    pub cancel: bool,
    pub detail: Option<ScheduleEventDetail>,
}

/// The body of a non-cancelled schedule event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScheduleEventDetail {
    pub common: SpliceEventCommon,
    pub timing: ScheduleTiming,
}

/// Where a schedule event takes effect. Schedule events carry wall-clock
/// times as 32-bit UTC seconds, not PTS ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ScheduleTiming {
    /// Program-wide splice at the given UTC time
    Program { utc_splice_time: u32 },
    /// Per-component splice times
    Component { components: Vec<ScheduleComponent> },
}

/// A component entry of a component-mode schedule event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScheduleComponent {
    pub tag: u8,
    pub utc_splice_time: u32,
}

/// The event of a `splice_insert()` command.
///
/// `detail` is `None` exactly when the event is cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InsertEvent {
    pub id: u32,
    pub cancel: bool,
    pub detail: Option<InsertEventDetail>,
}

/// The body of a non-cancelled insert event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InsertEventDetail {
    pub common: SpliceEventCommon,
    /// Whether the splice takes effect at the nearest opportunity rather
    /// than at a signalled time
    pub immediate_splice: bool,
    pub timing: InsertTiming,
}

/// Where an insert event takes effect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum InsertTiming {
    /// Program-wide splice; the time is absent for immediate splices
    Program { splice_time: Option<SpliceTime> },
    /// Per-component splice times; times are absent for immediate splices
    Component { components: Vec<InsertComponent> },
}

/// A component entry of a component-mode insert event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InsertComponent {
    pub tag: u8,
    pub splice_time: Option<SpliceTime>,
}

/// SCTE-35 encryption algorithms, from the 6-bit header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[non_exhaustive]
pub enum EncryptionAlgorithm {
    None,
    DesEcb,
    DesCbc,
    TripleDesEde3Ecb,
    Reserved(u8),
    Private(u8),
}

impl EncryptionAlgorithm {
    /// Maps an encryption algorithm ordinal to its variant.
    ///
    /// The 6-bit field covers 0..=63; anything larger has no defined mapping.
    pub fn from_id(id: u8) -> Result<Self, DecodeError> {
        match id {
            0 => Ok(EncryptionAlgorithm::None),
            1 => Ok(EncryptionAlgorithm::DesEcb),
            2 => Ok(EncryptionAlgorithm::DesCbc),
            3 => Ok(EncryptionAlgorithm::TripleDesEde3Ecb),
            4..=31 => Ok(EncryptionAlgorithm::Reserved(id)),
            32..=63 => Ok(EncryptionAlgorithm::Private(id)),
            _ => Err(DecodeError::UnknownEncryptionAlgorithm(id)),
        }
    }
}

/// The segmentation types defined in SCTE-35.
///
/// These values give semantic meaning to segmentation descriptors, indicating
/// what kind of content boundary is being signalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[non_exhaustive]
pub enum SegmentationType {
    /// Not indicated (0x00)
    NotIndicated,
    /// Content identification (0x01)
    ContentIdentification,
    /// Program start (0x10)
    ProgramStart,
    /// Program end (0x11)
    ProgramEnd,
    /// Program early termination (0x12)
    ProgramEarlyTermination,
    /// Program breakaway (0x13)
    ProgramBreakaway,
    /// Program resumption (0x14)
    ProgramResumption,
    /// Program runover planned (0x15)
    ProgramRunoverPlanned,
    /// Program runover unplanned (0x16)
    ProgramRunoverUnplanned,
    /// Program overlap start (0x17)
    ProgramOverlapStart,
    /// Program blackout override (0x18)
    ProgramBlackoutOverride,
    /// Program join (0x19)
    ProgramJoin,
    /// Chapter start (0x20)
    ChapterStart,
    /// Chapter end (0x21)
    ChapterEnd,
    /// Break start (0x22)
    BreakStart,
    /// Break end (0x23)
    BreakEnd,
    /// Opening credit start (0x24) - deprecated
    OpeningCreditStartDeprecated,
    /// Opening credit end (0x25) - deprecated
    OpeningCreditEndDeprecated,
    /// Closing credit start (0x26) - deprecated
    ClosingCreditStartDeprecated,
    /// Closing credit end (0x27) - deprecated
    ClosingCreditEndDeprecated,
    /// Provider advertisement start (0x30)
    ProviderAdvertisementStart,
    /// Provider advertisement end (0x31)
    ProviderAdvertisementEnd,
    /// Distributor advertisement start (0x32)
    DistributorAdvertisementStart,
    /// Distributor advertisement end (0x33)
    DistributorAdvertisementEnd,
    /// Provider placement opportunity start (0x34)
    ProviderPlacementOpportunityStart,
    /// Provider placement opportunity end (0x35)
    ProviderPlacementOpportunityEnd,
    /// Distributor placement opportunity start (0x36)
    DistributorPlacementOpportunityStart,
    /// Distributor placement opportunity end (0x37)
    DistributorPlacementOpportunityEnd,
    /// Provider overlay placement opportunity start (0x38)
    ProviderOverlayPlacementOpportunityStart,
    /// Provider overlay placement opportunity end (0x39)
    ProviderOverlayPlacementOpportunityEnd,
    /// Distributor overlay placement opportunity start (0x3A)
    DistributorOverlayPlacementOpportunityStart,
    /// Distributor overlay placement opportunity end (0x3B)
    DistributorOverlayPlacementOpportunityEnd,
    /// Provider promo start (0x3C)
    ProviderPromoStart,
    /// Provider promo end (0x3D)
    ProviderPromoEnd,
    /// Distributor promo start (0x3E)
    DistributorPromoStart,
    /// Distributor promo end (0x3F)
    DistributorPromoEnd,
    /// Unscheduled event start (0x40)
    UnscheduledEventStart,
    /// Unscheduled event end (0x41)
    UnscheduledEventEnd,
    /// Alternate content opportunity start (0x42)
    AlternateContentOpportunityStart,
    /// Alternate content opportunity end (0x43)
    AlternateContentOpportunityEnd,
    /// Provider ad block start (0x44)
    ProviderAdBlockStart,
    /// Provider ad block end (0x45)
    ProviderAdBlockEnd,
    /// Distributor ad block start (0x46)
    DistributorAdBlockStart,
    /// Distributor ad block end (0x47)
    DistributorAdBlockEnd,
    /// Network start (0x50)
    NetworkStart,
    /// Network end (0x51)
    NetworkEnd,
}

impl SegmentationType {
    /// Returns the numeric identifier for this segmentation type.
    pub fn id(&self) -> u8 {
        use SegmentationType::*;
        match self {
            NotIndicated => 0x00,
            ContentIdentification => 0x01,
            ProgramStart => 0x10,
            ProgramEnd => 0x11,
            ProgramEarlyTermination => 0x12,
            ProgramBreakaway => 0x13,
            ProgramResumption => 0x14,
            ProgramRunoverPlanned => 0x15,
            ProgramRunoverUnplanned => 0x16,
            ProgramOverlapStart => 0x17,
            ProgramBlackoutOverride => 0x18,
            ProgramJoin => 0x19,
            ChapterStart => 0x20,
            ChapterEnd => 0x21,
            BreakStart => 0x22,
            BreakEnd => 0x23,
            OpeningCreditStartDeprecated => 0x24,
            OpeningCreditEndDeprecated => 0x25,
            ClosingCreditStartDeprecated => 0x26,
            ClosingCreditEndDeprecated => 0x27,
            ProviderAdvertisementStart => 0x30,
            ProviderAdvertisementEnd => 0x31,
            DistributorAdvertisementStart => 0x32,
            DistributorAdvertisementEnd => 0x33,
            ProviderPlacementOpportunityStart => 0x34,
            ProviderPlacementOpportunityEnd => 0x35,
            DistributorPlacementOpportunityStart => 0x36,
            DistributorPlacementOpportunityEnd => 0x37,
            ProviderOverlayPlacementOpportunityStart => 0x38,
            ProviderOverlayPlacementOpportunityEnd => 0x39,
            DistributorOverlayPlacementOpportunityStart => 0x3A,
            DistributorOverlayPlacementOpportunityEnd => 0x3B,
            ProviderPromoStart => 0x3C,
            ProviderPromoEnd => 0x3D,
            DistributorPromoStart => 0x3E,
            DistributorPromoEnd => 0x3F,
            UnscheduledEventStart => 0x40,
            UnscheduledEventEnd => 0x41,
            AlternateContentOpportunityStart => 0x42,
            AlternateContentOpportunityEnd => 0x43,
            ProviderAdBlockStart => 0x44,
            ProviderAdBlockEnd => 0x45,
            DistributorAdBlockStart => 0x46,
            DistributorAdBlockEnd => 0x47,
            NetworkStart => 0x50,
            NetworkEnd => 0x51,
        }
    }

    /// Converts a numeric segmentation type id to its enum variant.
    ///
    /// An id outside the defined table is an error; the decode is aborted
    /// rather than mapped to a catch-all value.
    pub fn from_id(id: u8) -> Result<Self, DecodeError> {
        use SegmentationType::*;
        match id {
            0x00 => Ok(NotIndicated),
            0x01 => Ok(ContentIdentification),
            0x10 => Ok(ProgramStart),
            0x11 => Ok(ProgramEnd),
            0x12 => Ok(ProgramEarlyTermination),
            0x13 => Ok(ProgramBreakaway),
            0x14 => Ok(ProgramResumption),
            0x15 => Ok(ProgramRunoverPlanned),
            0x16 => Ok(ProgramRunoverUnplanned),
            0x17 => Ok(ProgramOverlapStart),
            0x18 => Ok(ProgramBlackoutOverride),
            0x19 => Ok(ProgramJoin),
            0x20 => Ok(ChapterStart),
            0x21 => Ok(ChapterEnd),
            0x22 => Ok(BreakStart),
            0x23 => Ok(BreakEnd),
            0x24 => Ok(OpeningCreditStartDeprecated),
            0x25 => Ok(OpeningCreditEndDeprecated),
            0x26 => Ok(ClosingCreditStartDeprecated),
            0x27 => Ok(ClosingCreditEndDeprecated),
            0x30 => Ok(ProviderAdvertisementStart),
            0x31 => Ok(ProviderAdvertisementEnd),
            0x32 => Ok(DistributorAdvertisementStart),
            0x33 => Ok(DistributorAdvertisementEnd),
            0x34 => Ok(ProviderPlacementOpportunityStart),
            0x35 => Ok(ProviderPlacementOpportunityEnd),
            0x36 => Ok(DistributorPlacementOpportunityStart),
            0x37 => Ok(DistributorPlacementOpportunityEnd),
            0x38 => Ok(ProviderOverlayPlacementOpportunityStart),
            0x39 => Ok(ProviderOverlayPlacementOpportunityEnd),
            0x3A => Ok(DistributorOverlayPlacementOpportunityStart),
            0x3B => Ok(DistributorOverlayPlacementOpportunityEnd),
            0x3C => Ok(ProviderPromoStart),
            0x3D => Ok(ProviderPromoEnd),
            0x3E => Ok(DistributorPromoStart),
            0x3F => Ok(DistributorPromoEnd),
            0x40 => Ok(UnscheduledEventStart),
            0x41 => Ok(UnscheduledEventEnd),
            0x42 => Ok(AlternateContentOpportunityStart),
            0x43 => Ok(AlternateContentOpportunityEnd),
            0x44 => Ok(ProviderAdBlockStart),
            0x45 => Ok(ProviderAdBlockEnd),
            0x46 => Ok(DistributorAdBlockStart),
            0x47 => Ok(DistributorAdBlockEnd),
            0x50 => Ok(NetworkStart),
            0x51 => Ok(NetworkEnd),
            _ => Err(DecodeError::UnknownSegmentationType(id)),
        }
    }

    /// Returns a human-readable description of the segmentation type.
    pub fn description(&self) -> &'static str {
        use SegmentationType::*;
        match self {
            NotIndicated => "Not Indicated",
            ContentIdentification => "Content Identification",
            ProgramStart => "Program Start",
            ProgramEnd => "Program End",
            ProgramEarlyTermination => "Program Early Termination",
            ProgramBreakaway => "Program Breakaway",
            ProgramResumption => "Program Resumption",
            ProgramRunoverPlanned => "Program Runover Planned",
            ProgramRunoverUnplanned => "Program Runover Unplanned",
            ProgramOverlapStart => "Program Overlap Start",
            ProgramBlackoutOverride => "Program Blackout Override",
            ProgramJoin => "Program Join",
            ChapterStart => "Chapter Start",
            ChapterEnd => "Chapter End",
            BreakStart => "Break Start",
            BreakEnd => "Break End",
            OpeningCreditStartDeprecated => "Opening Credit Start (Deprecated)",
            OpeningCreditEndDeprecated => "Opening Credit End (Deprecated)",
            ClosingCreditStartDeprecated => "Closing Credit Start (Deprecated)",
            ClosingCreditEndDeprecated => "Closing Credit End (Deprecated)",
            ProviderAdvertisementStart => "Provider Advertisement Start",
            ProviderAdvertisementEnd => "Provider Advertisement End",
            DistributorAdvertisementStart => "Distributor Advertisement Start",
            DistributorAdvertisementEnd => "Distributor Advertisement End",
            ProviderPlacementOpportunityStart => "Provider Placement Opportunity Start",
            ProviderPlacementOpportunityEnd => "Provider Placement Opportunity End",
            DistributorPlacementOpportunityStart => "Distributor Placement Opportunity Start",
            DistributorPlacementOpportunityEnd => "Distributor Placement Opportunity End",
            ProviderOverlayPlacementOpportunityStart => {
                "Provider Overlay Placement Opportunity Start"
            }
            ProviderOverlayPlacementOpportunityEnd => "Provider Overlay Placement Opportunity End",
            DistributorOverlayPlacementOpportunityStart => {
                "Distributor Overlay Placement Opportunity Start"
            }
            DistributorOverlayPlacementOpportunityEnd => {
                "Distributor Overlay Placement Opportunity End"
            }
            ProviderPromoStart => "Provider Promo Start",
            ProviderPromoEnd => "Provider Promo End",
            DistributorPromoStart => "Distributor Promo Start",
            DistributorPromoEnd => "Distributor Promo End",
            UnscheduledEventStart => "Unscheduled Event Start",
            UnscheduledEventEnd => "Unscheduled Event End",
            AlternateContentOpportunityStart => "Alternate Content Opportunity Start",
            AlternateContentOpportunityEnd => "Alternate Content Opportunity End",
            ProviderAdBlockStart => "Provider Ad Block Start",
            ProviderAdBlockEnd => "Provider Ad Block End",
            DistributorAdBlockStart => "Distributor Ad Block Start",
            DistributorAdBlockEnd => "Distributor Ad Block End",
            NetworkStart => "Network Start",
            NetworkEnd => "Network End",
        }
    }
}
