use thiserror::Error;

/// Exit codes used by the `bandwidth` binary.
pub mod codes {
    pub const OTHER_PROBLEM: i32 = 1;
    pub const PARAMETER_PROBLEM: i32 = 2;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandwidthError {
    #[error("invalid byte count for {option}: {value:?}")]
    InvalidNumber { option: &'static str, value: String },

    #[error("unknown reset interval {0:?} (expected minute, hour, day, week, month or never)")]
    UnknownInterval(String),

    #[error("unknown bandwidth option {0:?}")]
    UnknownOption(String),

    #[error("option {0} requires a value")]
    MissingValue(&'static str),

    #[error("'{attempted}' conflicts with '{established}' given earlier")]
    ConflictingThresholdMode {
        established: &'static str,
        attempted: &'static str,
    },

    #[error("You must specify '--greater_than' or '--less_than'")]
    MissingThresholdMode,
}

impl BandwidthError {
    /// Whether the host may treat the option as simply not consumed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BandwidthError::MissingThresholdMode)
    }
}

/// Errors decoding a kernel record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is {got} bytes, expected {expected}")]
    Truncated { got: usize, expected: usize },

    #[error("unknown threshold mode code {0}")]
    UnknownModeCode(u8),

    #[error("unknown reset interval code {0}")]
    UnknownIntervalCode(u8),

    #[error(transparent)]
    Invalid(#[from] BandwidthError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("match extension {0:?} is already registered")]
    DuplicateExtension(&'static str),
}

/// Map a parse error to the exit status of the invoking command.
pub fn exit_code(err: &BandwidthError) -> i32 {
    match err {
        BandwidthError::InvalidNumber { .. }
        | BandwidthError::UnknownInterval(_)
        | BandwidthError::UnknownOption(_)
        | BandwidthError::MissingValue(_)
        | BandwidthError::ConflictingThresholdMode { .. }
        | BandwidthError::MissingThresholdMode => codes::PARAMETER_PROBLEM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mode_message() {
        assert_eq!(
            BandwidthError::MissingThresholdMode.to_string(),
            "You must specify '--greater_than' or '--less_than'"
        );
    }

    #[test]
    fn test_only_missing_mode_is_fatal() {
        assert!(!BandwidthError::MissingThresholdMode.is_recoverable());
        assert!(BandwidthError::UnknownInterval("fortnight".into()).is_recoverable());
        assert!(BandwidthError::InvalidNumber {
            option: "--less_than",
            value: "x".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&BandwidthError::MissingThresholdMode),
            codes::PARAMETER_PROBLEM
        );
        assert_eq!(
            exit_code(&BandwidthError::UnknownOption("--foo".into())),
            codes::PARAMETER_PROBLEM
        );
    }
}
