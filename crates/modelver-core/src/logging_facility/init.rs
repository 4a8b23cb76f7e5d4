//! Subscriber setup
//!
//! Binaries call [`init`] once before doing any work. All output goes to
//! stderr so that command results on stdout stay machine readable.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Plain text, `modelver*` at debug
    Development,
    /// One JSON object per line, `modelver*` at info
    Production,
    /// Bare registry; tests install their own layer via `init_test_capture`
    Test,
}

impl Profile {
    /// Parse a profile name as accepted on the command line
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(Profile::Development),
            "prod" | "production" | "json" => Some(Profile::Production),
            "test" => Some(Profile::Test),
            _ => None,
        }
    }

    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "modelver=debug",
            Profile::Production | Profile::Test => "modelver=info",
        }
    }
}

static INSTALLED: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// `RUST_LOG` overrides the profile's default filter. Only the first call
/// has an effect.
pub fn init(profile: Profile) {
    INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init(),
            Profile::Test => tracing_subscriber::registry().init(),
        }
    });
}
