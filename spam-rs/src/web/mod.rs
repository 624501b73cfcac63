//! Web module
//!
//! Interactive form and a small JSON API in front of the detector.

pub mod handlers;
pub mod server;

pub use server::WebServer;
