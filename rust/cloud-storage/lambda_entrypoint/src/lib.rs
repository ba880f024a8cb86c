#![deny(missing_docs)]
//! This crate provides a standardized initialization process for lambda entrypoints.
//! It keeps tracing output consistent between local runs and deployed functions.

use tracing_subscriber::EnvFilter;

mod environment;

pub use environment::{Environment, UnknownEnvironment};

/// unit struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct LambdaEntrypoint {
    env: Environment,
}

impl Default for LambdaEntrypoint {
    fn default() -> Self {
        LambdaEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [LambdaEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl LambdaEntrypoint {
    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        tracing::trace!(environment=%self.env, "entrypoint initialized");

        InitializedEntrypoint(())
    }
}
