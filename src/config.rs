use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Frontend bundle (Vite `dist/` output)
    pub frontend_dist: PathBuf,

    // Application metadata
    pub deployment: Deployment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://database.db?mode=rwc".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 8001,
            frontend_dist: PathBuf::from("./frontend/dist"),
            deployment: Deployment::Local,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// [`Config::default`] for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),

            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_var("API_PORT")?.unwrap_or(defaults.api_port),

            frontend_dist: env::var("FRONTEND_DIST")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dist),

            deployment: env::var("DEPLOYMENT")
                .map(|d| Deployment::from_name(&d))
                .unwrap_or(defaults.deployment),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Read and parse an optional environment variable. Unset is `Ok(None)`.
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_names_are_case_insensitive() {
        assert_eq!(Deployment::from_name("PROD"), Deployment::Prod);
        assert_eq!(Deployment::from_name("staging"), Deployment::Stage);
        assert_eq!(Deployment::from_name("Development"), Deployment::Dev);
        assert_eq!(Deployment::from_name("anything-else"), Deployment::Local);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = Config {
            api_host: "127.0.0.1".to_string(),
            api_port: 9000,
            ..Config::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }
}
