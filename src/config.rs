use std::{fmt, str::FromStr};

use crate::error::BandwidthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdMode {
    GreaterThan,
    LessThan,
}

impl ThresholdMode {
    /// The option that selects this mode.
    pub fn option_name(self) -> &'static str {
        match self {
            ThresholdMode::GreaterThan => "--greater_than",
            ThresholdMode::LessThan => "--less_than",
        }
    }
}

/// Period after which the kernel zeroes the byte counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResetInterval {
    #[default]
    Never,
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl ResetInterval {
    pub const ALL: [ResetInterval; 6] = [
        ResetInterval::Minute,
        ResetInterval::Hour,
        ResetInterval::Day,
        ResetInterval::Week,
        ResetInterval::Month,
        ResetInterval::Never,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResetInterval::Never => "never",
            ResetInterval::Minute => "minute",
            ResetInterval::Hour => "hour",
            ResetInterval::Day => "day",
            ResetInterval::Week => "week",
            ResetInterval::Month => "month",
        }
    }
}

impl fmt::Display for ResetInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetInterval {
    type Err = BandwidthError;

    // Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str() == s)
            .ok_or_else(|| BandwidthError::UnknownInterval(s.to_string()))
    }
}

/// The match configuration installed with a rule.
///
/// `current_bandwidth` and `next_reset` are advanced by the kernel matcher
/// once the rule is live; this side only sets their initial values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchConfig {
    pub mode: Option<ThresholdMode>,
    pub cutoff: u64,
    pub current_bandwidth: u64,
    pub reset_interval: ResetInterval,
    /// Unset sentinel is 0.
    pub next_reset: u64,
}

impl MatchConfig {
    /// Equality ignoring `next_reset`, which re-parsing always zeroes.
    pub fn same_settings(&self, other: &MatchConfig) -> bool {
        self.mode == other.mode
            && self.cutoff == other.cutoff
            && self.current_bandwidth == other.current_bandwidth
            && self.reset_interval == other.reset_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_names_are_exact() {
        assert_eq!("day".parse::<ResetInterval>(), Ok(ResetInterval::Day));
        assert_eq!("never".parse::<ResetInterval>(), Ok(ResetInterval::Never));
        assert_eq!(
            "Day".parse::<ResetInterval>(),
            Err(BandwidthError::UnknownInterval("Day".into()))
        );
        assert!(" day".parse::<ResetInterval>().is_err());
    }

    #[test]
    fn test_interval_display_parses_back() {
        for interval in ResetInterval::ALL {
            assert_eq!(interval.to_string().parse::<ResetInterval>(), Ok(interval));
        }
    }

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.mode, None);
        assert_eq!(config.reset_interval, ResetInterval::Never);
        assert_eq!(config.current_bandwidth, 0);
        assert_eq!(config.next_reset, 0);
    }

    #[test]
    fn test_same_settings_ignores_next_reset() {
        let a = MatchConfig {
            mode: Some(ThresholdMode::LessThan),
            cutoff: 10,
            next_reset: 1_700_000_000,
            ..MatchConfig::default()
        };
        let b = MatchConfig { next_reset: 0, ..a };
        assert!(a.same_settings(&b));
        assert!(!a.same_settings(&MatchConfig { cutoff: 11, ..b }));
    }
}
