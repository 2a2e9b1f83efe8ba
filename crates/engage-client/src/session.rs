//! Session token lifecycle.

use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, ErrorKind, Result};

/// Holds the session token for one client instance.
///
/// The token is established lazily by the first non-login operation and
/// lives for the rest of the process. There is no refresh or expiry
/// detection: a token invalidated server-side surfaces later as an
/// ordinary server fault.
#[derive(Debug, Default)]
pub struct SessionManager {
    token: Mutex<Option<String>>,
}

impl SessionManager {
    /// Create a manager with no token held.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The currently held token, if any.
    pub fn token(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Whether a login has already produced a token.
    pub fn is_established(&self) -> bool {
        self.lock().is_some()
    }

    /// Store the token produced by a login exchange.
    ///
    /// An empty token means the exchange did not actually authenticate.
    pub fn store(&self, token: String) -> Result<()> {
        if token.is_empty() {
            return Err(Error::new(ErrorKind::Authentication(
                "login response carried an empty session id".into(),
            )));
        }
        *self.lock() = Some(token);
        Ok(())
    }

    /// Decorate a request URL with the session token.
    ///
    /// The login request itself goes to the bare URL; every other request
    /// carries `;jsessionid=<token>` as a matrix parameter. Decorating a
    /// non-login URL with no token held is a sequencing bug upstream.
    pub fn decorate(&self, base_url: &str, is_login: bool) -> Result<String> {
        if is_login {
            return Ok(base_url.to_string());
        }
        match &*self.lock() {
            Some(token) => Ok(format!("{base_url};jsessionid={token}")),
            None => Err(Error::new(ErrorKind::Authentication(
                "no session established before a session-bearing request".into(),
            ))),
        }
    }
}
