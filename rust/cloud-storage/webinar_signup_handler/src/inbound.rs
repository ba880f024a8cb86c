//! Inbound adapters: the ways the outside world drives the pipeline

pub mod lambda_handler;
