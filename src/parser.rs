//! Main parsing functions for SCTE-35 messages.
//!
//! This module contains the parsing logic for splice information sections:
//! the section header, the splice command variants, and the descriptor loop.
//! Parsing is strict. Any structural defect, unknown enumeration value, or
//! length contradiction fails the whole decode with a [`DecodeError`] rather
//! than producing a partially filled section.

use crate::bit_reader::BitReader;
use crate::descriptors::{
    AudioComponent, AudioDescriptor, AvailDescriptor, BitstreamMode, DeliveryRestrictions,
    DeviceRestrictions, DtmfDescriptor, SegmentationComponent, SegmentationDescriptor,
    SegmentationDetail, SpliceDescriptor, TimeDescriptor,
};
use crate::error::DecodeError;
use crate::time::{BreakDuration, SpliceTime};
use crate::types::{
    EncryptionAlgorithm, InsertComponent, InsertEvent, InsertEventDetail, InsertTiming,
    ScheduleComponent, ScheduleEvent, ScheduleEventDetail, ScheduleTiming, SegmentationType,
    SpliceCommand, SpliceEventCommon, SpliceInfoSection, SpliceMode,
};
use crate::upid::{self, SegmentationUpidType};

/// Parses a complete SCTE-35 splice information section from binary data.
///
/// This is the main entry point of the crate. It decodes the section header,
/// dispatches on the splice command type, walks the descriptor loop, and
/// captures the trailing CRC-32.
///
/// # Supported Command Types
///
/// - `0x00` - Splice Null
/// - `0x04` - Splice Schedule
/// - `0x05` - Splice Insert
/// - `0x06` - Time Signal
/// - `0x07` - Bandwidth Reservation
/// - `0xFF` - Private Command
///
/// Any other command type fails the decode with
/// [`DecodeError::UnknownCommandType`].
///
/// # Example
///
/// ```rust
/// use data_encoding::BASE64;
/// use scte35_decode::{parse_splice_info_section, SpliceCommand};
///
/// let message = "/DA0AAAAAAAA///wBQb+cr0AUAAeAhxDVUVJSAAAjn/PAAGlmbAICAAAAAAsoKGKNAIAmsnRfg==";
/// let buffer = BASE64.decode(message.as_bytes()).unwrap();
///
/// let section = parse_splice_info_section(&buffer).unwrap();
/// assert!(matches!(section.command, SpliceCommand::TimeSignal { .. }));
/// assert_eq!(section.descriptors.len(), 1);
/// ```
pub fn parse_splice_info_section(buffer: &[u8]) -> Result<SpliceInfoSection, DecodeError> {
    let mut reader = BitReader::new(buffer);

    let table_id = reader.read_byte()?;
    let section_syntax_indicator = reader.read_bool()?;
    let private_indicator = reader.read_bool()?;
    reader.skip_bits(2)?; // reserved
    let section_length = reader.read_bits(12)? as u16;
    let protocol_version = reader.read_byte()?;
    let encrypted = reader.read_bool()?;
    let encryption_algorithm = EncryptionAlgorithm::from_id(reader.read_bits(6)? as u8)?;
    let pts_adjustment = reader.read_bits_wide(33)?;
    let cw_index = reader.read_byte()?;
    let tier = reader.read_bits(12)? as u16;
    let splice_command_length = reader.read_bits(12)? as u16;
    let splice_command_type = reader.read_byte()?;

    let command = parse_splice_command(&mut reader, splice_command_type, splice_command_length)?;

    let descriptor_loop_length = reader.read_bytes(2)? as u16;
    let descriptors = parse_descriptor_loop(&mut reader, descriptor_loop_length)?;

    let crc_32 = reader.read_bytes(4)?;

    #[cfg(feature = "crc-validation")]
    {
        let end = reader.position() / 8;
        let computed = crate::crc::compute_crc(&buffer[..end - 4]);
        if computed != crc_32 {
            return Err(DecodeError::CrcMismatch {
                computed,
                stored: crc_32,
            });
        }
    }

    Ok(SpliceInfoSection {
        table_id,
        section_syntax_indicator,
        private_indicator,
        section_length,
        protocol_version,
        encrypted,
        encryption_algorithm,
        pts_adjustment,
        cw_index,
        tier,
        command,
        descriptors,
        crc_32,
    })
}

/// Dispatches on the splice command type byte.
fn parse_splice_command(
    reader: &mut BitReader,
    command_type: u8,
    command_length: u16,
) -> Result<SpliceCommand, DecodeError> {
    match command_type {
        0x00 => Ok(SpliceCommand::Null),
        0x04 => parse_splice_schedule(reader),
        0x05 => parse_splice_insert(reader),
        0x06 => Ok(SpliceCommand::TimeSignal {
            time: parse_splice_time(reader)?,
        }),
        0x07 => Ok(SpliceCommand::BandwidthReservation),
        0xFF => parse_private_command(reader, command_length),
        other => Err(DecodeError::UnknownCommandType(other)),
    }
}

fn parse_splice_schedule(reader: &mut BitReader) -> Result<SpliceCommand, DecodeError> {
    let splice_count = reader.read_byte()?;
    let mut events = Vec::with_capacity(splice_count as usize);
    for _ in 0..splice_count {
        events.push(parse_schedule_event(reader)?);
    }
    Ok(SpliceCommand::Schedule { events })
}

fn parse_schedule_event(reader: &mut BitReader) -> Result<ScheduleEvent, DecodeError> {
    let id = reader.read_bytes(4)?;
    let cancel = reader.read_bool()?;
    reader.skip_bits(7)?; // reserved

    if cancel {
        return Ok(ScheduleEvent {
            id,
            cancel,
            detail: None,
        });
    }

    let out_of_network = reader.read_bool()?;
    let program = reader.read_bool()?;
    let duration_flag = reader.read_bool()?;
    reader.skip_bits(5)?; // reserved

    let timing = if program {
        ScheduleTiming::Program {
            utc_splice_time: reader.read_bytes(4)?,
        }
    } else {
        let component_count = reader.read_byte()?;
        let mut components = Vec::with_capacity(component_count as usize);
        for _ in 0..component_count {
            components.push(ScheduleComponent {
                tag: reader.read_byte()?,
                utc_splice_time: reader.read_bytes(4)?,
            });
        }
        ScheduleTiming::Component { components }
    };

    let break_duration = if duration_flag {
        Some(parse_break_duration(reader)?)
    } else {
        None
    };

    let program_id = reader.read_bytes(2)? as u16;
    let avail_num = reader.read_byte()?;
    let avails_expected = reader.read_byte()?;

    Ok(ScheduleEvent {
        id,
        cancel,
        detail: Some(ScheduleEventDetail {
            common: SpliceEventCommon {
                out_of_network,
                program,
                mode: if program {
                    SpliceMode::Program
                } else {
                    SpliceMode::Component
                },
                break_duration,
                program_id,
                avail_num,
                avails_expected,
            },
            timing,
        }),
    })
}

fn parse_splice_insert(reader: &mut BitReader) -> Result<SpliceCommand, DecodeError> {
    let id = reader.read_bytes(4)?;
    let cancel = reader.read_bool()?;
    reader.skip_bits(7)?; // reserved

    if cancel {
        return Ok(SpliceCommand::Insert {
            event: InsertEvent {
                id,
                cancel,
                detail: None,
            },
        });
    }

    let out_of_network = reader.read_bool()?;
    let program = reader.read_bool()?;
    let duration_flag = reader.read_bool()?;
    let immediate_splice = reader.read_bool()?;
    reader.skip_bits(4)?; // reserved

    let timing = if program {
        let splice_time = if immediate_splice {
            None
        } else {
            Some(parse_splice_time(reader)?)
        };
        InsertTiming::Program { splice_time }
    } else {
        let component_count = reader.read_byte()?;
        let mut components = Vec::with_capacity(component_count as usize);
        for _ in 0..component_count {
            let tag = reader.read_byte()?;
            let splice_time = if immediate_splice {
                None
            } else {
                Some(parse_splice_time(reader)?)
            };
            components.push(InsertComponent { tag, splice_time });
        }
        InsertTiming::Component { components }
    };

    let break_duration = if duration_flag {
        Some(parse_break_duration(reader)?)
    } else {
        None
    };

    let program_id = reader.read_bytes(2)? as u16;
    let avail_num = reader.read_byte()?;
    let avails_expected = reader.read_byte()?;

    Ok(SpliceCommand::Insert {
        event: InsertEvent {
            id,
            cancel,
            detail: Some(InsertEventDetail {
                common: SpliceEventCommon {
                    out_of_network,
                    program,
                    mode: if immediate_splice {
                        SpliceMode::Immediate
                    } else if program {
                        SpliceMode::Program
                    } else {
                        SpliceMode::Component
                    },
                    break_duration,
                    program_id,
                    avail_num,
                    avails_expected,
                },
                immediate_splice,
                timing,
            }),
        },
    })
}

fn parse_private_command(
    reader: &mut BitReader,
    command_length: u16,
) -> Result<SpliceCommand, DecodeError> {
    // The command length covers the 4-byte identifier and the payload,
    // and the payload must not be empty.
    if command_length <= 4 {
        return Err(DecodeError::InvalidArgument(format!(
            "private command length {command_length} leaves no payload"
        )));
    }
    let id = reader.read_bytes(4)?;
    let bytes = reader
        .read_opaque_bytes(command_length as usize - 4)?
        .to_vec();
    Ok(SpliceCommand::Private { id, bytes })
}

/// Parses a `splice_time()` structure.
fn parse_splice_time(reader: &mut BitReader) -> Result<SpliceTime, DecodeError> {
    let time_specified = reader.read_bool()?;
    let pts_time = if time_specified {
        reader.skip_bits(6)?; // reserved
        Some(reader.read_bits_wide(33)?)
    } else {
        reader.skip_bits(7)?; // reserved
        None
    };
    Ok(SpliceTime { pts_time })
}

/// Parses a `break_duration()` structure.
fn parse_break_duration(reader: &mut BitReader) -> Result<BreakDuration, DecodeError> {
    let auto_return = reader.read_bool()?;
    reader.skip_bits(6)?; // reserved
    let duration = reader.read_bits_wide(33)?;
    Ok(BreakDuration {
        auto_return,
        duration,
    })
}

/// Walks the descriptor loop.
///
/// The loop length is spent as descriptors are consumed. Each iteration
/// charges the tag and length bytes plus the declared body length; a counter
/// going negative means a descriptor claimed more bytes than the loop holds.
fn parse_descriptor_loop(
    reader: &mut BitReader,
    loop_length: u16,
) -> Result<Vec<SpliceDescriptor>, DecodeError> {
    let mut remaining = loop_length as i64;
    let mut descriptors = Vec::new();
    while remaining > 0 {
        let tag = reader.read_byte()?;
        let length = reader.read_byte()?;
        remaining -= 2 + length as i64;
        if remaining < 0 {
            return Err(DecodeError::Syntax {
                position: reader.position(),
                message: format!(
                    "descriptor with tag 0x{tag:02x} overruns the descriptor loop"
                ),
            });
        }
        if let Some(descriptor) = parse_splice_descriptor(reader, tag, length)? {
            descriptors.push(descriptor);
        }
    }
    Ok(descriptors)
}

/// Parses one descriptor body. A zero-length avail descriptor signals an
/// absent descriptor and yields `None`.
fn parse_splice_descriptor(
    reader: &mut BitReader,
    tag: u8,
    length: u8,
) -> Result<Option<SpliceDescriptor>, DecodeError> {
    if tag == 0x00 && length == 0 {
        return Ok(None);
    }
    let start = reader.position();
    let descriptor = match tag {
        0x00 => SpliceDescriptor::Avail(AvailDescriptor {
            identifier: reader.read_bytes(4)?,
            provider_avail_id: reader.read_bytes(4)?,
        }),
        0x01 => SpliceDescriptor::Dtmf(parse_dtmf_descriptor(reader)?),
        0x02 => SpliceDescriptor::Segmentation(parse_segmentation_descriptor(reader)?),
        0x03 => SpliceDescriptor::Time(TimeDescriptor {
            identifier: reader.read_bytes(4)?,
            tai_seconds: reader.read_bits_wide(48)?,
            tai_nanoseconds: reader.read_bytes(4)?,
            utc_offset: reader.read_bytes(2)? as u16,
        }),
        0x04 => SpliceDescriptor::Audio(parse_audio_descriptor(reader)?),
        other => return Err(DecodeError::UnknownDescriptorTag(other)),
    };
    let consumed = (reader.position() - start) / 8;
    if consumed != length as usize {
        return Err(DecodeError::Syntax {
            position: reader.position(),
            message: format!(
                "descriptor with tag 0x{tag:02x} consumed {consumed} bytes, declared {length}"
            ),
        });
    }
    Ok(Some(descriptor))
}

fn parse_dtmf_descriptor(reader: &mut BitReader) -> Result<DtmfDescriptor, DecodeError> {
    let identifier = reader.read_bytes(4)?;
    let preroll = reader.read_byte()?;
    let dtmf_count = reader.read_bits(3)? as usize;
    reader.skip_bits(5)?; // reserved
    let chars = if dtmf_count > 0 {
        reader.read_ascii_string(dtmf_count)?
    } else {
        String::new()
    };
    Ok(DtmfDescriptor {
        identifier,
        preroll,
        chars,
    })
}

fn parse_audio_descriptor(reader: &mut BitReader) -> Result<AudioDescriptor, DecodeError> {
    let identifier = reader.read_bytes(4)?;
    let audio_count = reader.read_bits(4)? as usize;
    reader.skip_bits(4)?; // reserved
    let mut components = Vec::with_capacity(audio_count);
    for _ in 0..audio_count {
        let tag = reader.read_byte()?;
        let iso_code = reader.read_bits(24)?;
        let bitstream_mode = BitstreamMode::from_id(reader.read_bits(3)? as u8)?;
        let num_channels = reader.read_bits(4)? as u8;
        let full_service_audio = reader.read_bool()?;
        components.push(AudioComponent {
            tag,
            iso_code,
            bitstream_mode,
            num_channels,
            full_service_audio,
        });
    }
    Ok(AudioDescriptor {
        identifier,
        components,
    })
}

fn parse_segmentation_descriptor(
    reader: &mut BitReader,
) -> Result<SegmentationDescriptor, DecodeError> {
    let identifier = reader.read_bytes(4)?;
    let event_id = reader.read_bytes(4)?;
    let cancel = reader.read_bool()?;
    reader.skip_bits(7)?; // reserved

    if cancel {
        return Ok(SegmentationDescriptor {
            identifier,
            event_id,
            cancel,
            detail: None,
        });
    }

    let program = reader.read_bool()?;
    let duration_flag = reader.read_bool()?;
    let delivery_not_restricted = reader.read_bool()?;

    let restrictions = if delivery_not_restricted {
        reader.skip_bits(5)?; // reserved
        None
    } else {
        let web_delivery_allowed = reader.read_bool()?;
        let no_regional_blackout = reader.read_bool()?;
        let archive_allowed = reader.read_bool()?;
        let device_restrictions = DeviceRestrictions::from_id(reader.read_bits(2)? as u8)?;
        Some(DeliveryRestrictions {
            web_delivery_allowed,
            no_regional_blackout,
            archive_allowed,
            device_restrictions,
        })
    };

    let mut components = Vec::new();
    if !program {
        let component_count = reader.read_byte()?;
        components.reserve(component_count as usize);
        for _ in 0..component_count {
            let tag = reader.read_byte()?;
            reader.skip_bits(7)?; // reserved
            let pts_offset = reader.read_bits_wide(33)?;
            components.push(SegmentationComponent { tag, pts_offset });
        }
    }

    let duration = if duration_flag {
        Some(reader.read_bits_wide(40)?)
    } else {
        None
    };

    let upid_type = SegmentationUpidType::from(reader.read_byte()?);
    let upid_length = reader.read_byte()?;
    let upid_position = reader.position();
    let upid_bytes = reader.read_opaque_bytes(upid_length as usize)?;
    let upids = upid::parse_upids(upid_type, upid_bytes, upid_position)?;

    let segmentation_type = SegmentationType::from_id(reader.read_byte()?)?;
    let segment_num = reader.read_byte()?;
    let segments_expected = reader.read_byte()?;

    Ok(SegmentationDescriptor {
        identifier,
        event_id,
        cancel,
        detail: Some(SegmentationDetail {
            program,
            mode: if program {
                SpliceMode::Program
            } else {
                SpliceMode::Component
            },
            delivery_restricted: !delivery_not_restricted,
            restrictions,
            components,
            duration,
            upid_type,
            upid_length,
            upids,
            segmentation_type,
            segment_num,
            segments_expected,
        }),
    })
}
