//! Userspace half of the `bandwidth` packet match: turns match options into
//! the record the kernel matcher reads, and renders that record back.

pub mod config;
pub mod error;
pub mod extension;
pub mod logging;
pub mod option;
pub mod record;
pub mod render;
pub mod state;
pub mod validate;

pub use config::{MatchConfig, ResetInterval, ThresholdMode};
pub use error::{BandwidthError, RecordError, RegistryError};
pub use extension::{parse_args, register, BandwidthMatch, MatchExtension, MatchRegistry};
pub use option::{parse_option, Event, OptionKind};
pub use record::{BandwidthInfo, MATCH_SIZE};
pub use state::{ConflictPolicy, ParseState};
pub use validate::validate;
