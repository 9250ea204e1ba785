use log::{debug, warn};

use crate::{
    config::{MatchConfig, ResetInterval, ThresholdMode},
    error::BandwidthError,
    option::Event,
};

/// What to do when a second threshold option arrives after the mode is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Fail with `ConflictingThresholdMode`.
    #[default]
    Reject,
    /// Keep the first mode and cutoff, drop the later option.
    KeepFirst,
}

/// Which optional fields this invocation has supplied explicitly.
/// The threshold mode is tracked by `MatchConfig::mode` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Supplied {
    pub current_bandwidth: bool,
    pub reset_interval: bool,
}

/// Accumulator for one rule-definition command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseState {
    policy: ConflictPolicy,
    supplied: Supplied,
    config: MatchConfig,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn supplied(&self) -> Supplied {
        self.supplied
    }

    /// The in-progress configuration. Not validated.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Folds one event into the state.
    ///
    /// On error the state is left untouched.
    pub fn apply(&mut self, event: Event) -> Result<(), BandwidthError> {
        let mut next = self.config;

        match event {
            Event::SetLessThan(cutoff) => {
                self.set_mode(&mut next, ThresholdMode::LessThan, cutoff)?
            }
            Event::SetGreaterThan(cutoff) => {
                self.set_mode(&mut next, ThresholdMode::GreaterThan, cutoff)?
            }
            Event::SetCurrentBandwidth(bytes) => {
                next.current_bandwidth = bytes;
                self.supplied.current_bandwidth = true;
            }
            Event::SetResetInterval(interval) => {
                next.reset_interval = interval;
                self.supplied.reset_interval = true;
            }
        }

        if !self.supplied.current_bandwidth {
            next.current_bandwidth = 0;
        }
        if !self.supplied.reset_interval {
            next.reset_interval = ResetInterval::Never;
        }
        next.next_reset = 0;

        debug!("processed {:?}", event);
        self.config = next;
        Ok(())
    }

    // Leaves `next` untouched when the event is dropped under `KeepFirst`.
    fn set_mode(
        &self,
        next: &mut MatchConfig,
        mode: ThresholdMode,
        cutoff: u64,
    ) -> Result<(), BandwidthError> {
        if let Some(established) = self.config.mode {
            return match self.policy {
                ConflictPolicy::Reject => {
                    warn!(
                        "rejecting {} {}: {} already given",
                        mode.option_name(),
                        cutoff,
                        established.option_name()
                    );
                    Err(BandwidthError::ConflictingThresholdMode {
                        established: established.option_name(),
                        attempted: mode.option_name(),
                    })
                }
                ConflictPolicy::KeepFirst => {
                    warn!("ignoring {} {}", mode.option_name(), cutoff);
                    Ok(())
                }
            };
        }

        next.mode = Some(mode);
        next.cutoff = cutoff;
        Ok(())
    }

    /// End-of-parse check, see [`crate::validate::validate`].
    pub fn finish(self) -> Result<MatchConfig, BandwidthError> {
        crate::validate::validate(self)
    }
}
