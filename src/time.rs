//! Splice timing value types: PTS-based splice times and break durations.

use crate::PTS_CLOCK_HZ;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A `splice_time()` structure: an optional 33-bit PTS value in 90 kHz ticks.
///
/// `pts_time` is `None` when the message carried no time (the
/// `time_specified_flag` was unset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpliceTime {
    /// Presentation time stamp in 90 kHz clock ticks, when specified.
    pub pts_time: Option<u64>,
}

impl SpliceTime {
    /// The splice time as a `Duration`, when a PTS value is present.
    pub fn to_duration(&self) -> Option<Duration> {
        self.pts_time
            .map(|ticks| Duration::from_secs_f64(ticks as f64 / PTS_CLOCK_HZ as f64))
    }
}

/// A `break_duration()` structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BreakDuration {
    /// Whether the receiver should return to the network feed automatically
    /// when the duration expires.
    pub auto_return: bool,
    /// Break length in 90 kHz clock ticks (33 bits).
    pub duration: u64,
}

impl BreakDuration {
    /// The break length as a `Duration`.
    pub fn to_duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration as f64 / PTS_CLOCK_HZ as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_time_duration() {
        let time = SpliceTime {
            pts_time: Some(90_000),
        };
        assert_eq!(time.to_duration(), Some(Duration::from_secs(1)));
        assert_eq!(SpliceTime::default().to_duration(), None);
    }

    #[test]
    fn test_break_duration() {
        let brk = BreakDuration {
            auto_return: true,
            duration: 0x00052CCF5,
        };
        // 5426421 ticks is a shade over 60 seconds.
        let secs = brk.to_duration().as_secs_f64();
        assert!(secs > 60.0 && secs < 60.5);
    }
}
