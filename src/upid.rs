//! UPID (Unique Program Identifier) types used in segmentation descriptors.
//!
//! A segmentation descriptor carries one UPID of a declared type, except for
//! the MID container type whose payload is itself a sequence of nested
//! `(type, length, bytes)` UPID triples.

use crate::error::DecodeError;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The different types of UPIDs (Unique Program Identifiers) used in
/// segmentation descriptors.
///
/// The numeric values are the `segmentation_upid_type` field of the
/// descriptor. Every 8-bit value maps to a variant; undefined values land in
/// `Reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[non_exhaustive]
pub enum SegmentationUpidType {
    /// No UPID is used (0x00)
    NotUsed,
    /// User-defined UPID (deprecated) (0x01)
    UserDefinedDeprecated,
    /// ISCI (Industry Standard Commercial Identifier) (0x02)
    ISCI,
    /// Ad Identifier (0x03)
    AdID,
    /// UMID (Unique Material Identifier) (0x04)
    UMID,
    /// ISAN (International Standard Audiovisual Number) - deprecated (0x05)
    ISANDeprecated,
    /// ISAN (International Standard Audiovisual Number) (0x06)
    ISAN,
    /// TID (Turner Identifier) (0x07)
    TID,
    /// Airing ID / Turner Identifier (0x08)
    AiringID,
    /// ADI (Advertising Digital Identification) (0x09)
    ADI,
    /// EIDR (Entertainment Identifier Registry) (0x0A)
    EIDR,
    /// ATSC Content Identifier (0x0B)
    ATSCContentIdentifier,
    /// MPU (Media Processing Unit) (0x0C)
    MPU,
    /// MID multiple-UPID container (0x0D)
    MID,
    /// ADS Information (0x0E)
    ADSInformation,
    /// URI (Uniform Resource Identifier) (0x0F)
    URI,
    /// UUID (Universally Unique Identifier) (0x10)
    UUID,
    /// SCR (Subscriber Company Reporting) (0x11)
    SCR,
    /// Reserved or unknown UPID type
    Reserved(u8),
}

impl Default for SegmentationUpidType {
    fn default() -> Self {
        SegmentationUpidType::NotUsed
    }
}

impl From<SegmentationUpidType> for u8 {
    fn from(s: SegmentationUpidType) -> Self {
        use SegmentationUpidType::*;
        match s {
            NotUsed => 0x00,
            UserDefinedDeprecated => 0x01,
            ISCI => 0x02,
            AdID => 0x03,
            UMID => 0x04,
            ISANDeprecated => 0x05,
            ISAN => 0x06,
            TID => 0x07,
            AiringID => 0x08,
            ADI => 0x09,
            EIDR => 0x0A,
            ATSCContentIdentifier => 0x0B,
            MPU => 0x0C,
            MID => 0x0D,
            ADSInformation => 0x0E,
            URI => 0x0F,
            UUID => 0x10,
            SCR => 0x11,
            Reserved(x) => x,
        }
    }
}

impl From<u8> for SegmentationUpidType {
    fn from(value: u8) -> Self {
        use SegmentationUpidType::*;
        match value {
            0x00 => NotUsed,
            0x01 => UserDefinedDeprecated,
            0x02 => ISCI,
            0x03 => AdID,
            0x04 => UMID,
            0x05 => ISANDeprecated,
            0x06 => ISAN,
            0x07 => TID,
            0x08 => AiringID,
            0x09 => ADI,
            0x0A => EIDR,
            0x0B => ATSCContentIdentifier,
            0x0C => MPU,
            0x0D => MID,
            0x0E => ADSInformation,
            0x0F => URI,
            0x10 => UUID,
            0x11 => SCR,
            x => Reserved(x),
        }
    }
}

impl SegmentationUpidType {
    /// Returns a human-readable description of the UPID type.
    pub fn description(&self) -> &'static str {
        use SegmentationUpidType::*;
        match self {
            NotUsed => "Not Used",
            UserDefinedDeprecated => "User Defined (Deprecated)",
            ISCI => "ISCI (Industry Standard Commercial Identifier)",
            AdID => "Ad Identifier",
            UMID => "UMID (Unique Material Identifier)",
            ISANDeprecated => "ISAN (Deprecated)",
            ISAN => "ISAN (International Standard Audiovisual Number)",
            TID => "TID (Turner Identifier)",
            AiringID => "Airing ID",
            ADI => "ADI (Advertising Digital Identification)",
            EIDR => "EIDR (Entertainment Identifier Registry)",
            ATSCContentIdentifier => "ATSC Content Identifier",
            MPU => "MPU (Media Processing Unit)",
            MID => "MID (Multiple UPID)",
            ADSInformation => "ADS Information",
            URI => "URI (Uniform Resource Identifier)",
            UUID => "UUID (Universally Unique Identifier)",
            SCR => "SCR (Subscriber Company Reporting)",
            Reserved(_) => "Reserved/Unknown",
        }
    }
}

/// A single decoded UPID: its declared type and its opaque payload.
///
/// Equality is structural; two UPIDs are equal when both the type and the
/// bytes match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Upid {
    pub upid_type: SegmentationUpidType,
    pub bytes: Vec<u8>,
}

/// Interprets a segmentation descriptor's UPID byte range.
///
/// A non-MID range yields exactly one UPID of the declared type covering the
/// whole range. A MID range is a sequence of `(type, length, bytes)` triples
/// consumed until the range is exhausted; a triple that overruns the range is
/// a syntax error. `position` is the bit offset of the range within the
/// message, used for diagnostics only.
pub(crate) fn parse_upids(
    upid_type: SegmentationUpidType,
    bytes: &[u8],
    position: usize,
) -> Result<Vec<Upid>, DecodeError> {
    if upid_type != SegmentationUpidType::MID {
        return Ok(vec![Upid {
            upid_type,
            bytes: bytes.to_vec(),
        }]);
    }

    let mut upids = Vec::new();
    let mut start = 0;

    while start < bytes.len() {
        if start + 2 > bytes.len() {
            return Err(DecodeError::Syntax {
                position: position + start * 8,
                message: "MID sub-UPID header overruns the container".to_string(),
            });
        }
        let sub_type = SegmentationUpidType::from(bytes[start]);
        let length = bytes[start + 1] as usize;
        start += 2;

        if start + length > bytes.len() {
            return Err(DecodeError::Syntax {
                position: position + start * 8,
                message: format!(
                    "MID sub-UPID of {} bytes overruns the container",
                    length
                ),
            });
        }
        upids.push(Upid {
            upid_type: sub_type,
            bytes: bytes[start..start + length].to_vec(),
        });
        start += length;
    }

    Ok(upids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upid_type_conversion() {
        assert_eq!(u8::from(SegmentationUpidType::NotUsed), 0x00);
        assert_eq!(u8::from(SegmentationUpidType::AdID), 0x03);
        assert_eq!(u8::from(SegmentationUpidType::UUID), 0x10);
        assert_eq!(u8::from(SegmentationUpidType::Reserved(0xFF)), 0xFF);
    }

    #[test]
    fn test_upid_type_from_u8() {
        for id in 0u8..=0xFF {
            assert_eq!(u8::from(SegmentationUpidType::from(id)), id);
        }
        assert_eq!(
            SegmentationUpidType::from(0x0D),
            SegmentationUpidType::MID
        );
        assert_eq!(
            SegmentationUpidType::from(0xFF),
            SegmentationUpidType::Reserved(0xFF)
        );
    }

    #[test]
    fn test_single_upid_covers_whole_range() {
        let upids = parse_upids(
            SegmentationUpidType::AiringID,
            &[0x00, 0x00, 0x00, 0x00, 0x2C, 0xA0, 0xA1, 0x8A],
            0,
        )
        .unwrap();
        assert_eq!(
            upids,
            vec![Upid {
                upid_type: SegmentationUpidType::AiringID,
                bytes: vec![0x00, 0x00, 0x00, 0x00, 0x2C, 0xA0, 0xA1, 0x8A],
            }]
        );
    }

    #[test]
    fn test_mid_yields_one_upid_per_triple() {
        let range = [0x0C, 2, 0xAA, 0xBB, 0x08, 4, 0x01, 0x02, 0x03, 0x04];
        let upids = parse_upids(SegmentationUpidType::MID, &range, 0).unwrap();
        assert_eq!(
            upids,
            vec![
                Upid {
                    upid_type: SegmentationUpidType::MPU,
                    bytes: vec![0xAA, 0xBB],
                },
                Upid {
                    upid_type: SegmentationUpidType::AiringID,
                    bytes: vec![0x01, 0x02, 0x03, 0x04],
                },
            ]
        );
    }

    #[test]
    fn test_mid_empty_range() {
        assert_eq!(
            parse_upids(SegmentationUpidType::MID, &[], 0).unwrap(),
            vec![]
        );
    }

    #[test]
    fn test_mid_truncated_triple() {
        // Declared sub-UPID length walks past the end of the container.
        let range = [0x0C, 5, 0xAA, 0xBB];
        assert!(matches!(
            parse_upids(SegmentationUpidType::MID, &range, 0),
            Err(DecodeError::Syntax { .. })
        ));

        // A lone type byte with no length byte.
        let range = [0x0C, 2, 0xAA, 0xBB, 0x08];
        assert!(matches!(
            parse_upids(SegmentationUpidType::MID, &range, 0),
            Err(DecodeError::Syntax { .. })
        ));
    }
}
