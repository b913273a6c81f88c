use std::fmt;
use std::sync::Arc;

use crate::config::errors::ConfigError;
use crate::config::EnvironmentProvider;

/// Fallback used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db?mode=rwc";

/// Runtime mode; development exposes error details on the error page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Cloudinary account used for image uploads
#[derive(Clone)]
pub struct MediaCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for MediaCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[redacted]")
            .finish()
    }
}

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    app_env: AppEnvironment,
    media: Option<MediaCredentials>,
}

impl BootstrapSettings {
    /// Load bootstrap settings from the given environment provider
    ///
    /// Missing media credentials are not an error: the server still starts and
    /// uploads fail individually.
    pub fn from_env_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let database_url = env_provider
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::invalid("DATABASE_URL", "must not be empty"));
        }

        let server_host = env_provider
            .get_var("HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());
        if server_host.trim().is_empty() {
            return Err(ConfigError::invalid("HOST", "must not be empty"));
        }

        let server_port = match env_provider.get_var("PORT") {
            Some(value) => Self::parse_port(&value)?,
            None => 3000,
        };

        let app_env = env_provider
            .get_var("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(AppEnvironment::Production);

        let media = match (
            env_provider.get_var("CLOUDINARY_CLOUD_NAME"),
            env_provider.get_var("CLOUDINARY_API_KEY"),
            env_provider.get_var("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret))
                if !cloud_name.is_empty() && !api_key.is_empty() && !api_secret.is_empty() =>
            {
                Some(MediaCredentials {
                    cloud_name,
                    api_key,
                    api_secret,
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            app_env,
            media,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        let port: u16 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::ParseError {
                setting_name: "PORT".to_string(),
                error: e.to_string(),
            }
        })?;
        if port == 0 {
            return Err(ConfigError::invalid("PORT", "must be between 1 and 65535"));
        }
        Ok(port)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn app_env(&self) -> AppEnvironment {
        self.app_env
    }

    pub fn media(&self) -> Option<&MediaCredentials> {
        self.media.as_ref()
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("app_env", &self.app_env)
            .field("media", &self.media)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn settings_from(vars: &[(&str, &str)]) -> Result<BootstrapSettings, ConfigError> {
        BootstrapSettings::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let settings = settings_from(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("APP_ENV", "development"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "123"),
            ("CLOUDINARY_API_SECRET", "shh"),
        ])
        .unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert!(settings.app_env().is_development());
        assert_eq!(settings.media().unwrap().cloud_name, "demo");
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.server_host(), "0.0.0.0");
        assert_eq!(settings.server_port(), 3000);
        assert_eq!(settings.app_env(), AppEnvironment::Production);
        assert!(settings.media().is_none());
    }

    #[test]
    fn test_partial_media_credentials_are_ignored() {
        let settings = settings_from(&[
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "123"),
        ])
        .unwrap();

        assert!(settings.media().is_none());
    }

    #[test]
    fn test_empty_database_url_fails_validation() {
        let result = settings_from(&[("DATABASE_URL", "")]);

        match result.unwrap_err() {
            ConfigError::InvalidSetting { setting_name, .. } => {
                assert_eq!(setting_name, "DATABASE_URL");
            }
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port_fails_parsing() {
        let result = settings_from(&[("PORT", "not-a-port")]);

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let result = settings_from(&[("PORT", "0")]);

        assert!(matches!(result, Err(ConfigError::InvalidSetting { .. })));
    }

    #[test]
    fn test_unknown_app_env_means_production() {
        let settings = settings_from(&[("APP_ENV", "staging")]).unwrap();

        assert!(!settings.app_env().is_development());
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let settings = settings_from(&[
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "123"),
            ("CLOUDINARY_API_SECRET", "top-secret"),
        ])
        .unwrap();

        let output = format!("{:?}", settings);
        assert!(!output.contains("top-secret"));
        assert!(output.contains("[redacted]"));
    }
}
