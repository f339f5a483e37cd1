//! Failure interception: every failure becomes a redirect.
//!
//! Two transitions exist. A not-found failure sends the client back to the
//! root endpoint; any other status `S` sends it to `/error/{S}`.

use crate::error::Failure;

/// Path of the root endpoint.
pub const ROOT_PATH: &str = "/";

/// Prefix of the error display endpoint.
pub const ERROR_PATH_PREFIX: &str = "/error/";

/// Redirect produced for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
    status: u16,
}

impl Redirect {
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Status of the failure that caused this redirect.
    pub fn failure_status(&self) -> u16 {
        self.status
    }
}

/// Path of the error display endpoint for `status`.
pub fn error_path(status: u16) -> String {
    format!("{ERROR_PATH_PREFIX}{status}")
}

/// Map a failure to its single redirect target.
pub fn intercept(failure: &Failure) -> Redirect {
    let status = failure.status();
    let location = match status {
        404 => ROOT_PATH.to_string(),
        s => error_path(s),
    };

    tracing::debug!(status, location = %location, detail = ?failure.detail(), "failure intercepted");
    Redirect { location, status }
}
