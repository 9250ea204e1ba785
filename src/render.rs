//! Rendering a configuration back into option tokens.

use std::fmt::{self, Write};

use crate::{
    config::{MatchConfig, ResetInterval, ThresholdMode},
    option::OptionKind,
};

/// Canonical option tokens for `config`, in the order they are parsed back.
pub fn render_tokens(config: &MatchConfig) -> Vec<String> {
    let mut tokens = Vec::with_capacity(6);

    match config.mode {
        Some(ThresholdMode::GreaterThan) => {
            tokens.push(OptionKind::GreaterThan.name().to_string());
            tokens.push(config.cutoff.to_string());
        }
        Some(ThresholdMode::LessThan) => {
            tokens.push(OptionKind::LessThan.name().to_string());
            tokens.push(config.cutoff.to_string());
        }
        None => {}
    }

    tokens.push(OptionKind::CurrentBandwidth.name().to_string());
    tokens.push(config.current_bandwidth.to_string());

    if config.reset_interval != ResetInterval::Never {
        tokens.push(OptionKind::ResetInterval.name().to_string());
        tokens.push(config.reset_interval.as_str().to_string());
    }

    tokens
}

/// Save form: the options alone, suitable for feeding back to the parser.
pub fn save(config: &MatchConfig, out: &mut impl Write) -> fmt::Result {
    out.write_str(&render_tokens(config).join(" "))
}

/// Print form: the options prefixed by the match name.
pub fn print(name: &str, config: &MatchConfig, out: &mut impl Write) -> fmt::Result {
    write!(out, "{} ", name)?;
    save(config, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(mode: ThresholdMode, cutoff: u64, interval: ResetInterval) -> MatchConfig {
        MatchConfig {
            mode: Some(mode),
            cutoff,
            reset_interval: interval,
            ..MatchConfig::default()
        }
    }

    #[test]
    fn test_greater_than_tokens() {
        assert_eq!(
            render_tokens(&config(ThresholdMode::GreaterThan, 1000, ResetInterval::Never)),
            ["--greater_than", "1000", "--current_bandwidth", "0"]
        );
    }

    #[test]
    fn test_interval_emitted_unless_never() {
        let tokens = render_tokens(&config(ThresholdMode::LessThan, 500, ResetInterval::Day));
        assert_eq!(
            tokens,
            ["--less_than", "500", "--current_bandwidth", "0", "--reset_interval", "day"]
        );
    }

    #[test]
    fn test_print_and_save() {
        let c = MatchConfig {
            current_bandwidth: 123,
            ..config(ThresholdMode::GreaterThan, 9, ResetInterval::Month)
        };

        let mut saved = String::new();
        save(&c, &mut saved).unwrap();
        assert_eq!(
            saved,
            "--greater_than 9 --current_bandwidth 123 --reset_interval month"
        );

        let mut printed = String::new();
        print("bandwidth", &c, &mut printed).unwrap();
        assert_eq!(printed, format!("bandwidth {saved}"));
    }
}
