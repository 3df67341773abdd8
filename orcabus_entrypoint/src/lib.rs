#![deny(missing_docs)]
//! Standard process initialisation shared by every handler binary.
//! Keeps log output consistent between lambdas.

use orcabus_env::Environment;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};
use tracing_tree::HierarchicalLayer;

/// Describes how a handler binary should be initialised
#[derive(Debug)]
pub struct OrcabusEntrypoint {
    env: Environment,
    handler_name: &'static str,
    /// indent width for hierarchical span output when running locally
    tree_tracing: Option<usize>,
}

/// proof that [OrcabusEntrypoint::init] was called
#[derive(Debug)]
pub struct InitializedEntrypoint {
    env: Environment,
}

impl InitializedEntrypoint {
    /// the environment the process was initialised for
    pub fn environment(&self) -> Environment {
        self.env
    }
}

/// The log formatter that will be installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// ansi pretty printing for a terminal
    Pretty,
    /// indented span tree for a terminal
    Tree(usize),
    /// one flattened json object per line for cloudwatch
    Json,
}

impl OrcabusEntrypoint {
    /// initialise the named handler for the environment found in `ENVIRONMENT`
    pub fn for_handler(handler_name: &'static str) -> Self {
        Self::new(handler_name, Environment::new_or_prod())
    }

    /// initialise the named handler for a known [Environment]
    pub fn new(handler_name: &'static str, env: Environment) -> Self {
        Self {
            env,
            handler_name,
            tree_tracing: None,
        }
    }

    /// print spans as an indented tree when running locally
    pub fn with_tree_tracing(mut self, indent: usize) -> Self {
        self.tree_tracing = Some(indent);
        self
    }

    fn log_format(&self) -> LogFormat {
        match (self.env, self.tree_tracing) {
            (Environment::Local, None) => LogFormat::Pretty,
            (Environment::Local, Some(indent)) => LogFormat::Tree(indent),
            (Environment::Production | Environment::Develop, _) => LogFormat::Json,
        }
    }

    /// consume self, load `.env`, install the panic hook and the tracing subscriber
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.log_format() {
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            LogFormat::Tree(indent) => {
                let subscriber = Registry::default()
                    .with(EnvFilter::from_default_env())
                    .with(HierarchicalLayer::new(indent));
                if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
                    eprintln!("tracing subscriber already installed: {e}");
                }
            }
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    // the lambda log stream stamps every line already
                    .without_time()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::info!(handler = self.handler_name, env = %self.env, "initiating lambda");

        InitializedEntrypoint { env: self.env }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_uses_json_outside_local() {
        let entry = OrcabusEntrypoint::new("test", Environment::Develop).with_tree_tracing(2);
        assert_eq!(entry.log_format(), LogFormat::Json);
        let entry = OrcabusEntrypoint::new("test", Environment::Production);
        assert_eq!(entry.log_format(), LogFormat::Json);
    }

    #[test]
    fn it_uses_terminal_formats_locally() {
        let entry = OrcabusEntrypoint::new("test", Environment::Local);
        assert_eq!(entry.log_format(), LogFormat::Pretty);
        let entry = entry.with_tree_tracing(4);
        assert_eq!(entry.log_format(), LogFormat::Tree(4));
    }
}
