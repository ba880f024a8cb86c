//! Data types flowing through the notification pipeline

mod calendar;
mod context;
mod error;
mod message;
mod signup;
mod trigger;

pub use calendar::*;
pub use context::*;
pub use error::*;
pub use message::*;
pub use signup::*;
pub use trigger::*;
