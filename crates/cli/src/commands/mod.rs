//! Subcommand handlers. Each one drives a view controller and prints the
//! result; a failed view operation becomes an error carrying the banner text.

pub mod directory;
pub mod processes;
pub mod tasks;
pub mod templates;

use anyhow::anyhow;

use hrportal_core::types::Date;

/// Turn a view's `false` result into an error carrying its banner.
///
/// A succeeded operation can still leave a banner when the reload after
/// it failed; that is reported as a warning.
pub fn check<F>(succeeded: bool, banner: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Option<String>,
{
    let banner = banner();
    if succeeded {
        warn_stale(banner.as_deref());
        Ok(())
    } else {
        Err(failure(banner))
    }
}

pub fn warn_stale(banner: Option<&str>) {
    if let Some(message) = banner {
        tracing::warn!(%message, "Change was saved but the view could not be refreshed");
    }
}

pub fn failure(banner: Option<String>) -> anyhow::Error {
    anyhow!(banner.unwrap_or_else(|| "Another request for this item is still running".to_string()))
}

pub fn today() -> Date {
    chrono::Local::now().date_naive()
}
