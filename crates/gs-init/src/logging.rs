//! Tracing setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging settings, built from the CLI and passed to [`init_tracing`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub verbose: u8,
    pub quiet: bool,
}

impl LogConfig {
    /// Filter directive for this configuration
    pub fn directive(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Initialize tracing; log lines go to stdout alongside streamed command output
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::new(config.directive());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stdout),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive() {
        assert_eq!(LogConfig::default().directive(), "info");
        assert_eq!(LogConfig { verbose: 1, quiet: false }.directive(), "debug");
        assert_eq!(LogConfig { verbose: 3, quiet: false }.directive(), "trace");
        assert_eq!(LogConfig { verbose: 2, quiet: true }.directive(), "error");
    }
}
