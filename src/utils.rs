use anyhow::Result;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

pub const PROJECT_NAME: &str = "fundraise_engine";

/// Dispatcher that writes this crate's records at `level` to stdout and only
/// errors from everything else.
pub fn build_dispatch(level: LevelFilter) -> fern::Dispatch {
    let colors = ColoredLevelConfig {
        trace: Color::Cyan,
        debug: Color::Magenta,
        info: Color::Green,
        warn: Color::Red,
        error: Color::BrightRed,
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                colors.color(record.level()),
                message
            ))
        })
        .chain(std::io::stdout())
        .level(LevelFilter::Error)
        .level_for(PROJECT_NAME, level)
}

pub fn setup_logger(level: LevelFilter) -> Result<()> {
    build_dispatch(level).apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Metadata};

    fn enabled(logger: &dyn log::Log, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn test_dispatch_levels() {
        let (max, logger) = build_dispatch(LevelFilter::Debug).into_log();
        assert_eq!(max, LevelFilter::Debug);

        assert!(enabled(logger.as_ref(), "fundraise_engine::trades", Level::Debug));
        assert!(!enabled(logger.as_ref(), "fundraise_engine::trades", Level::Trace));
        assert!(!enabled(logger.as_ref(), "hyper", Level::Warn));
        assert!(enabled(logger.as_ref(), "hyper", Level::Error));
    }
}
