//! This module defines the members of the signup notification domain

pub mod models;
pub mod ports;
pub mod service;
