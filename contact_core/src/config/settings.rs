use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: ApplicationConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub mail: MailConfig,
    pub jobs: JobConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub name: String,
    pub version: String,
    pub debug: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// SMTP transport settings and the addresses the contact workflow mails to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub use_tls: bool,
    pub timeout_seconds: u64,
    /// Where owner notifications are delivered.
    pub contact_recipient: String,
    /// HTML-escape submitted fields before interpolating them into email bodies.
    pub escape_user_input: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub max_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: ApplicationConfig::default(),
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            mail: MailConfig::default(),
            jobs: JobConfig::default(),
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "Contact Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            debug: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8000".to_string(),
            ],
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: String::new(),
            use_tls: true,
            timeout_seconds: 10,
            contact_recipient: String::new(),
            escape_user_input: true,
        }
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self { max_workers: 2 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.app.name.trim().is_empty() {
            return Err(ConfigError::Message(
                "Application name cannot be empty".to_string(),
            ));
        }

        if self.mail.smtp_host.is_empty() {
            return Err(ConfigError::Message("SMTP host cannot be empty".to_string()));
        }

        if self.mail.smtp_port == 0 {
            return Err(ConfigError::Message("SMTP port cannot be 0".to_string()));
        }

        if self.mail.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "SMTP timeout must be greater than 0".to_string(),
            ));
        }

        if self.jobs.max_workers == 0 {
            return Err(ConfigError::Message(
                "Job max workers must be greater than 0".to_string(),
            ));
        }

        if self.mail.from_email.is_empty() {
            tracing::warn!("No sender address configured - outgoing email will fail");
        }

        if self.mail.contact_recipient.is_empty() {
            tracing::warn!("No contact recipient configured - owner notifications will fail");
        }

        if !self.mail.escape_user_input {
            tracing::warn!("Submitted fields are interpolated into email HTML without escaping");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
