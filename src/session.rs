//! Last-sent refrigerant memo for `REFPROPdll`.
//!
//! `REFPROPdll` re-reads the fluid file whenever it is handed a file
//! name, and reuses the loaded fluid when handed an empty string. The
//! session remembers which identity was last *sent* so repeated queries
//! for the same refrigerant send the reuse signal instead.
//!
//! The memo is only correct if it mirrors the exact call order seen by
//! REFPROP. Share a session between threads only behind a mutex that
//! also covers the engine call.

use tracing::debug;

/// What `REFPROPdll` receives in `hFld` to mean "keep the loaded fluid".
pub const REUSE_SIGNAL: &str = "";

#[derive(Debug, Default, Clone)]
pub struct ProtocolSession {
    last_sent: Option<String>,
}

impl ProtocolSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The string to pass to REFPROP for `identity`.
    ///
    /// Returns the reuse signal when `identity` is the one last sent,
    /// otherwise records `identity` as sent and returns it verbatim.
    pub fn resolve<'a>(&mut self, identity: &'a str) -> &'a str {
        if self.last_sent.as_deref() == Some(identity) {
            debug!(identity, "refrigerant already loaded, sending reuse signal");
            REUSE_SIGNAL
        } else {
            debug!(identity, previous = ?self.last_sent, "loading refrigerant");
            self.last_sent = Some(identity.to_owned());
            identity
        }
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    /// Forget the memo, forcing the next query to send its identity.
    pub fn reset(&mut self) {
        self.last_sent = None;
    }
}
