use crate::{config::MatchConfig, error::BandwidthError, state::ParseState};

/// Accepts the accumulated state, requiring a threshold mode.
pub fn validate(state: ParseState) -> Result<MatchConfig, BandwidthError> {
    let config = *state.config();
    match config.mode {
        Some(_) => Ok(config),
        None => Err(BandwidthError::MissingThresholdMode),
    }
}
