//! Subscriber installation
//!
//! Events always go to stderr; stdout belongs to the rendered diff.

use tracing_subscriber::EnvFilter;

/// Output style of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, `linediff=debug` unless `RUST_LOG` says otherwise
    Development,
    /// One JSON object per event, `linediff=info` unless `RUST_LOG` says otherwise
    Production,
}

impl Profile {
    fn default_directive(self) -> &'static str {
        match self {
            Profile::Development => "linediff=debug",
            Profile::Production => "linediff=info",
        }
    }
}

/// Error returned when a global subscriber is already in place
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the process-wide subscriber for `profile`.
///
/// Only an application calls this; the engine never installs anything.
///
/// # Errors
///
/// A global subscriber already exists, from an earlier call or from the
/// host application. The existing one stays in place.
///
/// # Example
///
/// ```
/// use linediff_core::logging_facility::{init, Profile};
///
/// if let Err(e) = init(Profile::Development) {
///     eprintln!("logging unavailable: {}", e);
/// }
/// ```
pub fn init(profile: Profile) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    match profile {
        Profile::Development => builder.try_init(),
        Profile::Production => builder.json().try_init(),
    }
}
