//! Service configuration
//!
//! Timing knobs for the dialog lifecycle. The host owns the actual
//! entry/exit transitions; these delays only sequence when the service
//! applies the shown state and when it removes a closed dialog's node.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_show_delay_ms() -> u64 {
    10
}

fn default_remove_delay_ms() -> u64 {
    300
}

/// Timing configuration for the dialog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Delay between mounting a dialog and applying its shown state, so the
    /// entry transition plays from a consistent starting point.
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,

    /// Delay between resolving a dialog and removing its node. Must exceed
    /// the host's close-transition duration.
    #[serde(default = "default_remove_delay_ms")]
    pub remove_delay_ms: u64,
}

impl ServiceConfig {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn remove_delay(&self) -> Duration {
        Duration::from_millis(self.remove_delay_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: default_show_delay_ms(),
            remove_delay_ms: default_remove_delay_ms(),
        }
    }
}
