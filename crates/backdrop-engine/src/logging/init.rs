use std::sync::Once;

use log::LevelFilter;

/// wgpu crates that log per-call detail at info and below.
const WGPU_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Native logger settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit `env_logger` filter; wins over `RUST_LOG` and the levels below.
    pub filter: Option<String>,
    /// Level for everything outside wgpu.
    pub level: LevelFilter,
    /// Level for wgpu internals.
    pub wgpu_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            level: LevelFilter::Info,
            wgpu_level: LevelFilter::Warn,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Filter string in `env_logger` syntax for `config`, given the `RUST_LOG` value.
fn filter_spec(config: &LoggingConfig, rust_log: Option<String>) -> String {
    if let Some(filter) = config.filter.clone().or(rust_log) {
        return filter;
    }

    let level = config.level.to_string().to_lowercase();
    let wgpu = config.wgpu_level.to_string().to_lowercase();

    let mut spec = level;
    for target in WGPU_TARGETS {
        spec.push_str(&format!(",{target}={wgpu}"));
    }
    spec
}

static INIT: Once = Once::new();

/// Installs `env_logger` for the process. Only the first call has an effect.
///
/// A logger installed by someone else (a test harness, an embedding binary) is
/// left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let spec = filter_spec(&config, std::env::var("RUST_LOG").ok());

        let installed = env_logger::Builder::new()
            .parse_filters(&spec)
            .write_style(config.write_style)
            .try_init()
            .is_ok();

        if installed {
            log::debug!("logger filter: {spec}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quiets_wgpu_internals() {
        let spec = filter_spec(&LoggingConfig::default(), None);
        assert_eq!(spec, "info,wgpu_core=warn,wgpu_hal=warn,naga=warn");
    }

    #[test]
    fn rust_log_replaces_levels() {
        let spec = filter_spec(&LoggingConfig::default(), Some("backdrop_engine=trace".into()));
        assert_eq!(spec, "backdrop_engine=trace");
    }

    #[test]
    fn explicit_filter_wins_over_rust_log() {
        let config = LoggingConfig {
            filter: Some("debug".into()),
            ..LoggingConfig::default()
        };
        assert_eq!(filter_spec(&config, Some("error".into())), "debug");
    }

    #[test]
    fn levels_are_lowercased() {
        let config = LoggingConfig {
            level: LevelFilter::Debug,
            wgpu_level: LevelFilter::Error,
            ..LoggingConfig::default()
        };
        assert!(filter_spec(&config, None).starts_with("debug,wgpu_core=error"));
    }
}
