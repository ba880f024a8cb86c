//! Typed view of the `ENVIRONMENT` variable the functions are deployed with

use std::str::FromStr;
use thiserror::Error;

const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The current environment the function is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Environment {
    /// Production environment
    #[strum(serialize = "prod")]
    Production,
    /// Dev and or staging environment
    #[strum(serialize = "dev")]
    Develop,
    /// Running on a developer machine
    #[strum(serialize = "local")]
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
pub enum UnknownEnvironment {
    /// the variable was not set or was not unicode
    #[error("could not read {ENVIRONMENT_VAR}: {0}")]
    Missing(#[from] std::env::VarError),
    /// the variable was set to something we do not recognise
    #[error("could not convert {0} into an environment value")]
    InvalidValue(String),
}

impl Environment {
    /// Attempt to construct a new [Environment] from the environment variables
    pub fn new_from_env() -> Result<Self, UnknownEnvironment> {
        let value = std::env::var(ENVIRONMENT_VAR)?;
        Self::parse(&value)
    }

    /// attempt to create a new [Environment] falling back to production if we fail to construct
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }

    /// parse a raw value such as `prod`, `dev` or `local`
    pub fn parse(value: &str) -> Result<Self, UnknownEnvironment> {
        Environment::from_str(value.trim())
            .map_err(|_| UnknownEnvironment::InvalidValue(value.to_string()))
    }
}
