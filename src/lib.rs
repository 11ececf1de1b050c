//! Store-asset generators for the Routine Reminder browser extension.
//!
//! The toolbar icon is drawn procedurally; the promotional tiles and the
//! store icon are composited from PNGs the icon generator wrote.

pub mod manifest;
pub mod output;
pub mod palette;
pub mod promo;
pub mod raster;
pub mod store_icon;
pub mod toolbar_icon;

use tracing_subscriber::EnvFilter;

/// Install the stderr diagnostics subscriber. `RUST_LOG` overrides the
/// default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
