//! Utilities shared by the Madang packages.

pub mod logger;
pub mod time;
