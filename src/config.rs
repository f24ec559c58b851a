use std::env;

/// Configuration errors raised during startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Process configuration, built once at startup and passed explicitly
/// into the services that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` and `SECRET_KEY` are required; host and port fall
    /// back to `127.0.0.1:8080`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            env::var("SECRET_KEY").map_err(|_| ConfigError::MissingVar("SECRET_KEY"))?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
        })
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
