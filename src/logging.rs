use log::LevelFilter;

/// Maps the count of `-v` flags to a log level.
pub fn level_from_verbosity(count: u64) -> LevelFilter {
    match count {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize stderr logging. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logging(verbosity: u64) {
    env_logger::builder()
        .filter_level(level_from_verbosity(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1), LevelFilter::Info);
        assert_eq!(level_from_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(7), LevelFilter::Trace);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0);
        init_logging(3);
    }
}
