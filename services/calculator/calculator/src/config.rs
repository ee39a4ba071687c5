use std::time::Duration;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::lexer::LexMode;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub lex_mode: LexMode,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    pub dump_on_exit: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SessionsConfig {
    /// Seconds a session may sit unused before the driver drops it. Sessions
    /// are kept for the life of the process when unset.
    pub idle_timeout_secs: Option<u64>,
}

impl SessionsConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
    pub sessions: SessionsConfig,
}

/// Reads `Calculator.toml` overlaid with `APP_` environment variables
///
/// The first `_` after the prefix separates the section from the key, so
/// `APP_ENGINE_LEX_MODE` sets `engine.lex_mode`.
pub fn figment() -> Figment {
    Figment::new()
        .merge(Toml::file("Calculator.toml"))
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_| {
            let config: Config = figment().extract()?;
            assert_eq!(config.engine.lex_mode, LexMode::Permissive);
            assert!(!config.telemetry.dump_on_exit);
            assert_eq!(config.sessions.idle_timeout(), None);
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "Calculator.toml",
                r#"
                [engine]
                lex_mode = "strict"
                "#,
            )?;
            let config: Config = figment().extract()?;
            assert_eq!(config.engine.lex_mode, LexMode::Strict);

            jail.set_env("APP_ENGINE_LEX_MODE", "permissive");
            jail.set_env("APP_TELEMETRY_DUMP_ON_EXIT", "true");
            jail.set_env("APP_SESSIONS_IDLE_TIMEOUT_SECS", "600");
            let config: Config = figment().extract()?;
            assert_eq!(config.engine.lex_mode, LexMode::Permissive);
            assert!(config.telemetry.dump_on_exit);
            assert_eq!(
                config.sessions.idle_timeout(),
                Some(Duration::from_secs(600))
            );
            Ok(())
        });
    }
}
