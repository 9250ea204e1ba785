//! Decoding of single `--option value` pairs into typed events.

use crate::{config::ResetInterval, error::BandwidthError};

/// The options owned by the bandwidth match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    LessThan,
    GreaterThan,
    CurrentBandwidth,
    ResetInterval,
}

impl OptionKind {
    pub const ALL: [OptionKind; 4] = [
        OptionKind::GreaterThan,
        OptionKind::LessThan,
        OptionKind::CurrentBandwidth,
        OptionKind::ResetInterval,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptionKind::LessThan => "--less_than",
            OptionKind::GreaterThan => "--greater_than",
            OptionKind::CurrentBandwidth => "--current_bandwidth",
            OptionKind::ResetInterval => "--reset_interval",
        }
    }

    /// Looks up an option by name, with or without the leading `--`.
    pub fn lookup(name: &str) -> Option<OptionKind> {
        let bare = name.strip_prefix("--").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|kind| &kind.name()[2..] == bare)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SetLessThan(u64),
    SetGreaterThan(u64),
    SetCurrentBandwidth(u64),
    SetResetInterval(ResetInterval),
}

impl Event {
    pub fn kind(&self) -> OptionKind {
        match self {
            Event::SetLessThan(_) => OptionKind::LessThan,
            Event::SetGreaterThan(_) => OptionKind::GreaterThan,
            Event::SetCurrentBandwidth(_) => OptionKind::CurrentBandwidth,
            Event::SetResetInterval(_) => OptionKind::ResetInterval,
        }
    }
}

/// Decodes one option and its raw value.
pub fn parse_option(name: &str, value: &str) -> Result<Event, BandwidthError> {
    let kind =
        OptionKind::lookup(name).ok_or_else(|| BandwidthError::UnknownOption(name.to_string()))?;
    decode(kind, value)
}

pub fn decode(kind: OptionKind, value: &str) -> Result<Event, BandwidthError> {
    let event = match kind {
        OptionKind::LessThan => Event::SetLessThan(parse_bytes(kind, value)?),
        OptionKind::GreaterThan => Event::SetGreaterThan(parse_bytes(kind, value)?),
        OptionKind::CurrentBandwidth => Event::SetCurrentBandwidth(parse_bytes(kind, value)?),
        OptionKind::ResetInterval => Event::SetResetInterval(value.parse()?),
    };
    Ok(event)
}

fn parse_bytes(kind: OptionKind, value: &str) -> Result<u64, BandwidthError> {
    value.parse().map_err(|_| BandwidthError::InvalidNumber {
        option: kind.name(),
        value: value.to_string(),
    })
}
