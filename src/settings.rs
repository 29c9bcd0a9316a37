use std::path::PathBuf;

use config::{
    builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat,
};
use secrecy::SecretString;
use serde::Deserialize;

/// Runtime configuration. Every key has a default suitable for local development and can be
/// overridden from `config.toml` or the environment (`DATABASE_URL`, `JWT_SECRET`, `PORT`, ...).
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: SecretString,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Mounts `/api/dev/*` routes. Turn off in production.
    pub dev_routes: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::defaults()?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite://forum.db")?
            .set_default("jwt_secret", "devsecret")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("static_dir", "static")?
            .set_default("dev_routes", true)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_are_usable_for_local_development() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.database_url, "sqlite://forum.db");
        assert_eq!(settings.jwt_secret.expose_secret(), "devsecret");
        assert_eq!(settings.address(), "0.0.0.0:3000");
        assert_eq!(settings.static_dir, PathBuf::from("static"));
        assert!(settings.dev_routes);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .set_override("port", 8081_i64)
            .unwrap()
            .set_override("dev_routes", false)
            .unwrap()
            .set_override("jwt_secret", "s3cret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.port, 8081);
        assert!(!settings.dev_routes);
        assert_eq!(settings.jwt_secret.expose_secret(), "s3cret");
    }
}
