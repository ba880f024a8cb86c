//! This module defines concrete implementations of the required outbound ports
//! Outbound ports are things in the outside world that we reach out to

pub mod ics;
pub mod memory;
pub mod render;
pub mod s3;
pub mod staging_key;
pub mod time;
