#![deny(missing_docs)]
//! Typed access to the deployment environment a handler is running in

use orcabus_env_var::VarNameErr;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

mod var {
    orcabus_env_var::env_var!(
        #[derive(Clone)]
        pub struct Environment;
    );
}

/// The environment the handler is deployed to
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production account
    Production,
    /// Development or staging account
    Develop,
    /// Running on a developer machine
    Local,
}

/// An error which can occur when constructing an [Environment]
#[derive(Debug, Error)]
pub enum EnvironmentErr {
    /// the ENVIRONMENT variable could not be read
    #[error("{0}")]
    VarErr(#[from] VarNameErr),
    /// the ENVIRONMENT variable held an unknown value
    #[error("{0}")]
    InvalidValue(#[from] UnknownValue),
}

impl Environment {
    /// Attempt to read the [Environment] from the `ENVIRONMENT` variable
    #[tracing::instrument(err, level = tracing::Level::TRACE)]
    pub fn new_from_env() -> Result<Self, EnvironmentErr> {
        let v = var::Environment::new()?;
        Ok(Self::from_str(&v)?)
    }

    /// read the [Environment], falling back to production when it is absent or unknown
    pub fn new_or_prod() -> Self {
        Self::new_from_env().unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

/// A value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_round_trips_display() {
        for env in [
            Environment::Production,
            Environment::Develop,
            Environment::Local,
        ] {
            assert_eq!(Environment::from_str(&env.to_string()).unwrap(), env);
        }
    }

    #[test]
    fn it_rejects_unknown_values() {
        assert!(Environment::from_str("staging").is_err());
    }
}

/// A value that is read straight from a local environment variable when running
/// locally, or fetched from a remote store (secrets manager, parameter store)
/// using the variable's value as the lookup key when deployed.
#[derive(Clone)]
pub enum LocalOrRemote<T> {
    /// the value is the local environment variable itself
    Local(T),
    /// the value was fetched remotely
    Remote(std::sync::Arc<str>),
}

impl<T> AsRef<str> for LocalOrRemote<T>
where
    T: AsRef<str>,
{
    fn as_ref(&self) -> &str {
        match self {
            LocalOrRemote::Local(s) => s.as_ref(),
            LocalOrRemote::Remote(s) => s,
        }
    }
}

impl<T> std::fmt::Debug for LocalOrRemote<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the value, these are usually credentials
        match self {
            LocalOrRemote::Local(_) => f.write_str("LocalOrRemote::Local(..)"),
            LocalOrRemote::Remote(_) => f.write_str("LocalOrRemote::Remote(..)"),
        }
    }
}
