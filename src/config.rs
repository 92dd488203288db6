use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which SMTP endpoint the mailer talks to.
///
/// `gmail` and `outlook` are hosted-service presets with fixed relay hosts;
/// `smtp` is the generic host/port/credentials configuration.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Gmail,
    Outlook,
    #[default]
    Smtp,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default)]
    pub service: EmailProvider,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_secure: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            service: EmailProvider::default(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_secure: false,
            username: String::new(),
            password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_email() -> String {
    "noreply@byteslide.dev".to_string()
}

fn default_from_name() -> String {
    "ByteSlide".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy environment variables (EMAIL_SERVICE, EMAIL_USER, ...)
    /// 2. Prefixed environment variables (BYTESLIDE__SERVER__PORT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Set defaults
        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        // Load config file if path provided or CONFIG_PATH env var set
        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Try to load config file (optional - ignore if not found)
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Override with environment variables (BYTESLIDE__EMAIL__USERNAME, etc.)
        builder = builder.add_source(
            Environment::with_prefix("BYTESLIDE")
                .separator("__")
                .try_parsing(true),
        );

        // Also support the legacy environment variables the original
        // deployment was configured with
        if let Ok(service) = env::var("EMAIL_SERVICE") {
            // Anything other than a known hosted preset means generic SMTP
            let service = match service.as_str() {
                "gmail" => "gmail",
                "outlook" => "outlook",
                _ => "smtp",
            };
            builder = builder.set_override("email.service", service)?;
        }
        if let Ok(username) = env::var("EMAIL_USER") {
            // The original deployment sent from the authenticating account
            builder = builder.set_override("email.from_email", username.clone())?;
            builder = builder.set_override("email.username", username)?;
        }
        if let Ok(password) = env::var("EMAIL_PASS") {
            builder = builder.set_override("email.password", password)?;
        }
        if let Ok(host) = env::var("SMTP_HOST") {
            builder = builder.set_override("email.smtp_host", host)?;
        }
        if let Ok(port) = env::var("SMTP_PORT") {
            // An unparsable port falls back to the default, matching the
            // original deployment's behavior
            if let Ok(port) = port.parse::<u16>() {
                builder = builder.set_override("email.smtp_port", i64::from(port))?;
            }
        }
        if let Ok(secure) = env::var("SMTP_SECURE") {
            builder = builder.set_override("email.smtp_secure", secure == "true")?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.email.service != EmailProvider::Smtp
            && (self.email.username.is_empty() || self.email.password.is_empty())
        {
            return Err(
                "email.username and email.password are required for hosted email providers"
                    .to_string(),
            );
        }
        if self.email.smtp_host.is_empty() {
            return Err("email.smtp_host must not be empty".to_string());
        }
        if self.email.from_email.is_empty() {
            return Err("email.from_email must not be empty".to_string());
        }
        Ok(())
    }
}
