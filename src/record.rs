//! Fixed-layout record shared with the kernel matcher.

use std::mem;

use crate::{
    config::{MatchConfig, ResetInterval, ThresholdMode},
    error::{BandwidthError, RecordError},
};

/// Mode code: no threshold selected.
pub const BANDWIDTH_UNSET: u8 = 0;
pub const BANDWIDTH_LT: u8 = 1;
pub const BANDWIDTH_GT: u8 = 2;

pub const BANDWIDTH_MINUTE: u8 = 80;
pub const BANDWIDTH_HOUR: u8 = 81;
pub const BANDWIDTH_DAY: u8 = 82;
pub const BANDWIDTH_WEEK: u8 = 83;
pub const BANDWIDTH_MONTH: u8 = 84;
pub const BANDWIDTH_NEVER: u8 = 85;

/// Match data as the kernel module reads it.
/// Size: 40 bytes (aligned to 8 bytes due to u64 fields).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandwidthInfo {
    /// `BANDWIDTH_LT` or `BANDWIDTH_GT`.
    pub gt_lt: u8,
    pub _pad0: [u8; 7],
    pub bandwidth_cutoff: u64,
    /// Written by the kernel on every match.
    pub current_bandwidth: u64,
    /// One of the `BANDWIDTH_<INTERVAL>` codes.
    pub reset_interval: u8,
    pub _pad1: [u8; 7],
    /// Computed by the kernel on first match. 0 = unset.
    pub next_reset: u64,
}

/// Size the host reserves for the match data.
pub const MATCH_SIZE: usize = align(mem::size_of::<BandwidthInfo>());

const fn align(size: usize) -> usize {
    let a = mem::align_of::<u64>();
    (size + a - 1) & !(a - 1)
}

fn interval_code(interval: ResetInterval) -> u8 {
    match interval {
        ResetInterval::Minute => BANDWIDTH_MINUTE,
        ResetInterval::Hour => BANDWIDTH_HOUR,
        ResetInterval::Day => BANDWIDTH_DAY,
        ResetInterval::Week => BANDWIDTH_WEEK,
        ResetInterval::Month => BANDWIDTH_MONTH,
        ResetInterval::Never => BANDWIDTH_NEVER,
    }
}

fn interval_from_code(code: u8) -> Result<ResetInterval, RecordError> {
    match code {
        BANDWIDTH_MINUTE => Ok(ResetInterval::Minute),
        BANDWIDTH_HOUR => Ok(ResetInterval::Hour),
        BANDWIDTH_DAY => Ok(ResetInterval::Day),
        BANDWIDTH_WEEK => Ok(ResetInterval::Week),
        BANDWIDTH_MONTH => Ok(ResetInterval::Month),
        BANDWIDTH_NEVER => Ok(ResetInterval::Never),
        other => Err(RecordError::UnknownIntervalCode(other)),
    }
}

impl From<&MatchConfig> for BandwidthInfo {
    fn from(config: &MatchConfig) -> Self {
        Self {
            gt_lt: match config.mode {
                Some(ThresholdMode::LessThan) => BANDWIDTH_LT,
                Some(ThresholdMode::GreaterThan) => BANDWIDTH_GT,
                None => BANDWIDTH_UNSET,
            },
            bandwidth_cutoff: config.cutoff,
            current_bandwidth: config.current_bandwidth,
            reset_interval: interval_code(config.reset_interval),
            next_reset: config.next_reset,
            ..Self::default()
        }
    }
}

impl TryFrom<&BandwidthInfo> for MatchConfig {
    type Error = RecordError;

    fn try_from(info: &BandwidthInfo) -> Result<Self, Self::Error> {
        let mode = match info.gt_lt {
            BANDWIDTH_LT => ThresholdMode::LessThan,
            BANDWIDTH_GT => ThresholdMode::GreaterThan,
            BANDWIDTH_UNSET => return Err(BandwidthError::MissingThresholdMode.into()),
            other => return Err(RecordError::UnknownModeCode(other)),
        };
        Ok(MatchConfig {
            mode: Some(mode),
            cutoff: info.bandwidth_cutoff,
            current_bandwidth: info.current_bandwidth,
            reset_interval: interval_from_code(info.reset_interval)?,
            next_reset: info.next_reset,
        })
    }
}

impl BandwidthInfo {
    /// Native-endian bytes, laid out as the `#[repr(C)]` struct.
    pub fn to_bytes(&self) -> [u8; MATCH_SIZE] {
        let mut buf = [0u8; MATCH_SIZE];
        buf[0] = self.gt_lt;
        buf[8..16].copy_from_slice(&self.bandwidth_cutoff.to_ne_bytes());
        buf[16..24].copy_from_slice(&self.current_bandwidth.to_ne_bytes());
        buf[24] = self.reset_interval;
        buf[32..40].copy_from_slice(&self.next_reset.to_ne_bytes());
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < MATCH_SIZE {
            return Err(RecordError::Truncated {
                got: bytes.len(),
                expected: MATCH_SIZE,
            });
        }
        Ok(Self {
            gt_lt: bytes[0],
            bandwidth_cutoff: read_u64(&bytes[8..16]),
            current_bandwidth: read_u64(&bytes[16..24]),
            reset_interval: bytes[24],
            next_reset: read_u64(&bytes[32..40]),
            ..Self::default()
        })
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_ne_bytes(word)
}
