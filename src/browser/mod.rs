//! Browser session management
//!
//! Launching or connecting to Chrome/Chromium over the DevTools Protocol,
//! capturing page snapshots, and applying/clearing focal annotations on the
//! live page.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
