use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::LeaseDuration;

/// Instructions for the client to keep a lock alive.
///
/// The server never renews on its own. The page emits this directive and the
/// browser posts to `endpoint` every `interval_seconds` until it navigates
/// away; the lock then lapses on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalDirective {
    pub document_id: String,
    /// Identifier for the emitted script, unique per document.
    pub script_id: String,
    pub endpoint: String,
    /// Always the lease minus the renewal margin, so at least one second.
    pub interval_seconds: u64,
}

impl RenewalDirective {
    pub fn new(document_id: impl Into<String>, endpoint: impl Into<String>, lease: LeaseDuration) -> Self {
        let document_id = document_id.into();
        Self {
            script_id: format!("lock_updater_for_{}", document_id),
            document_id,
            endpoint: endpoint.into(),
            interval_seconds: lease.renewal_interval().as_secs(),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Raw javascript for the keep-alive loop. Wrap in `<script>` tags to use.
    pub fn to_script(&self) -> String {
        // A JSON string literal is also a valid JS string literal.
        let endpoint = serde_json::to_string(&self.endpoint).unwrap_or_else(|_| "\"\"".into());
        format!(
            "(function ($) {{\n\
             \tvar lockUpdateUrl = {endpoint};\n\
             \tvar timeout = {millis};\n\
             \tsetInterval(function () {{\n\
             \t\t$.post(lockUpdateUrl);\n\
             \t}}, timeout);\n\
             }})(jQuery);",
            endpoint = endpoint,
            millis = self.interval_seconds * 1000,
        )
    }
}
