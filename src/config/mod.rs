pub mod cli;

pub use cli::CliConfig;

use crate::domain::ports::Credentials;
use crate::utils::error::{Result, TimetableError};
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_server, Validate,
};
use std::fmt;
use url::Url;

/// Client name sent to WebUntis on login and as the HTTP user agent.
pub const CLIENT_NAME: &str = "WebUntis API";

/// Environment variables that must all be present before the server starts.
pub const REQUIRED_VARS: [&str; 5] = ["USERNAME", "PASSWORD", "SCHOOL", "SERVER", "MYCLASS"];

/// WebUntis access and the class to publish. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct UntisConfig {
    pub username: String,
    pub password: String,
    pub school: String,
    pub server: Url,
    pub class_name: String,
}

impl UntisConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| read(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(TimetableError::MissingConfigError {
                field: missing.join(", "),
            });
        }

        let require = |key: &str| -> Result<String> {
            let value = read(key);
            Ok(validate_required_field(key, &value)?.clone())
        };

        let config = Self {
            username: require("USERNAME")?.trim().to_string(),
            password: require("PASSWORD")?,
            school: require("SCHOOL")?.trim().to_string(),
            server: validate_server("SERVER", &require("SERVER")?)?,
            class_name: require("MYCLASS")?.trim().to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Validate for UntisConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("USERNAME", &self.username)?;
        validate_non_empty_string("SCHOOL", &self.school)?;
        validate_non_empty_string("MYCLASS", &self.class_name)?;
        Ok(())
    }
}

impl fmt::Debug for UntisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UntisConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("school", &self.school)
            .field("server", &self.server.as_str())
            .field("class_name", &self.class_name)
            .finish()
    }
}
