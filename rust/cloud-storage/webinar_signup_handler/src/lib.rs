#![deny(missing_docs)]
//! Lambda which turns a webinar signup record landing in s3 into two staged emails:
//! an internal notification and a user confirmation carrying a calendar invite.
//! The crate follows the hexagonal architecture pattern.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
