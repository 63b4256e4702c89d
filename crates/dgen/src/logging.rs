//! Log output to stderr

use log::LevelFilter;

/// Map the number of `-v` flags to a log level
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a [`simplelog::WriteLogger`] on stderr as the global logger
pub fn install(verbosity: u8) -> Result<(), log::SetLoggerError> {
    use LevelFilter::Off;

    simplelog::WriteLogger::init(
        level_for(verbosity),
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_thread_level(Off)
            .set_time_level(Off)
            .build(),
        std::io::stderr(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Info);
        assert_eq!(level_for(1), LevelFilter::Debug);
        assert_eq!(level_for(2), LevelFilter::Trace);
        assert_eq!(level_for(7), LevelFilter::Trace);
    }
}
