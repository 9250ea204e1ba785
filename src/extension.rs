//! Host-side match extension registry and argument driver.

use std::fmt;

use ahash::RandomState;
use indexmap::IndexMap;
use log::{debug, info};

use crate::{
    config::{MatchConfig, ResetInterval},
    error::{BandwidthError, RegistryError},
    option::{self, OptionKind},
    record::MATCH_SIZE,
    render,
    state::{ConflictPolicy, ParseState},
};

/// Callbacks a host invokes on a match extension.
pub trait MatchExtension {
    fn name(&self) -> &'static str;

    /// Bytes reserved for the match data.
    fn size(&self) -> usize;

    fn help(&self) -> String;

    /// Long options this extension consumes. Each takes one value.
    fn options(&self) -> &'static [OptionKind];

    /// Folds one option into `state`. On error the option is not consumed.
    fn parse(&self, state: &mut ParseState, kind: OptionKind, value: &str)
        -> Result<(), BandwidthError>;

    fn final_check(&self, state: ParseState) -> Result<MatchConfig, BandwidthError>;

    fn print(&self, config: &MatchConfig, out: &mut dyn fmt::Write) -> fmt::Result;

    fn save(&self, config: &MatchConfig, out: &mut dyn fmt::Write) -> fmt::Result;
}

pub struct BandwidthMatch;

impl MatchExtension for BandwidthMatch {
    fn name(&self) -> &'static str {
        "bandwidth"
    }

    fn size(&self) -> usize {
        MATCH_SIZE
    }

    fn help(&self) -> String {
        let intervals: Vec<&str> = ResetInterval::ALL.iter().map(|i| i.as_str()).collect();
        format!(
            "bandwidth options:\n  --greater_than [BYTES]\n  --less_than [BYTES]\n  --current_bandwidth [BYTES]\n  --reset_interval [{}]\n",
            intervals.join("|")
        )
    }

    fn options(&self) -> &'static [OptionKind] {
        &OptionKind::ALL
    }

    fn parse(
        &self,
        state: &mut ParseState,
        kind: OptionKind,
        value: &str,
    ) -> Result<(), BandwidthError> {
        let event = option::decode(kind, value)?;
        state.apply(event)
    }

    fn final_check(&self, state: ParseState) -> Result<MatchConfig, BandwidthError> {
        state.finish()
    }

    fn print(&self, config: &MatchConfig, mut out: &mut dyn fmt::Write) -> fmt::Result {
        render::print(self.name(), config, &mut out)
    }

    fn save(&self, config: &MatchConfig, mut out: &mut dyn fmt::Write) -> fmt::Result {
        render::save(config, &mut out)
    }
}

type ExtensionMap = IndexMap<&'static str, Box<dyn MatchExtension>, RandomState>;

/// Extensions known to the host, in registration order.
#[derive(Default)]
pub struct MatchRegistry {
    extensions: ExtensionMap,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self {
            extensions: ExtensionMap::with_hasher(RandomState::new()),
        }
    }

    pub fn register(&mut self, ext: Box<dyn MatchExtension>) -> Result<(), RegistryError> {
        let name = ext.name();
        if self.extensions.contains_key(name) {
            return Err(RegistryError::DuplicateExtension(name));
        }
        debug!("registered match extension {}", name);
        self.extensions.insert(name, ext);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn MatchExtension> {
        self.extensions.get(name).map(|ext| &**ext)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Registers the bandwidth match. Called from the host's startup sequence.
pub fn register(registry: &mut MatchRegistry) -> Result<(), RegistryError> {
    registry.register(Box::new(BandwidthMatch))
}

/// Runs `tokens` (`--option value` pairs) through `ext` and validates the result.
pub fn parse_args<S: AsRef<str>>(
    ext: &dyn MatchExtension,
    tokens: &[S],
    policy: ConflictPolicy,
) -> Result<MatchConfig, BandwidthError> {
    let mut state = ParseState::with_policy(policy);
    let mut tokens = tokens.iter().map(|token| AsRef::<str>::as_ref(token));

    while let Some(token) = tokens.next() {
        let kind = token
            .strip_prefix("--")
            .and_then(|_| OptionKind::lookup(token))
            .filter(|kind| ext.options().contains(kind))
            .ok_or_else(|| BandwidthError::UnknownOption(token.to_string()))?;
        let value = tokens
            .next()
            .ok_or_else(|| BandwidthError::MissingValue(kind.name()))?;
        ext.parse(&mut state, kind, value)?;
    }

    let config = ext.final_check(state)?;
    info!("{} match configured: {:?}", ext.name(), config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThresholdMode;

    #[test]
    fn test_register_once() {
        let mut registry = MatchRegistry::new();
        assert!(registry.is_empty());
        register(&mut registry).unwrap();
        assert_eq!(
            register(&mut registry),
            Err(RegistryError::DuplicateExtension("bandwidth"))
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), ["bandwidth"]);
        assert_eq!(registry.get("bandwidth").map(|ext| ext.size()), Some(40));
        assert!(registry.get("string").is_none());
    }

    #[test]
    fn test_parse_args() {
        let config = parse_args(
            &BandwidthMatch,
            &["--less_than", "500", "--reset_interval", "day"],
            ConflictPolicy::Reject,
        )
        .unwrap();
        assert_eq!(config.mode, Some(ThresholdMode::LessThan));
        assert_eq!(config.cutoff, 500);
        assert_eq!(config.reset_interval, ResetInterval::Day);
    }

    #[test]
    fn test_parse_args_errors() {
        let ext = BandwidthMatch;
        assert_eq!(
            parse_args(&ext, &["--greater_than"], ConflictPolicy::Reject),
            Err(BandwidthError::MissingValue("--greater_than"))
        );
        assert_eq!(
            parse_args(&ext, &["greater_than", "5"], ConflictPolicy::Reject),
            Err(BandwidthError::UnknownOption("greater_than".into()))
        );
        assert_eq!(
            parse_args(&ext, &["--contains", "x"], ConflictPolicy::Reject),
            Err(BandwidthError::UnknownOption("--contains".into()))
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            parse_args(&ext, &empty, ConflictPolicy::Reject),
            Err(BandwidthError::MissingThresholdMode)
        );
    }

    #[test]
    fn test_help_lists_options() {
        let help = BandwidthMatch.help();
        for kind in OptionKind::ALL {
            assert!(help.contains(kind.name()), "{} missing from help", kind.name());
        }
        assert!(help.contains("minute|hour|day|week|month|never"));
    }

    #[test]
    fn test_print_prefixes_name() {
        let config = parse_args(&BandwidthMatch, &["--greater_than", "1"], ConflictPolicy::Reject)
            .unwrap();
        let mut out = String::new();
        BandwidthMatch.print(&config, &mut out).unwrap();
        assert_eq!(out, "bandwidth --greater_than 1 --current_bandwidth 0");
    }
}
