//! Lazy remote-tree mirror for choosing one directory out of a large drive.

pub mod config;
pub mod enumerate;
pub mod mirror;
pub mod model;
pub mod remote;
pub mod resolve;
pub mod session;
