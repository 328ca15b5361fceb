//! Promise-based modal dialogs for markup-rendering hosts
//!
//! Replaces blocking `confirm()` / `alert()` / `prompt()` calls with
//! awaitable dialogs stacked over a shared container. The service is
//! headless: a host implements [`Surface`] to render the markup fragments it
//! produces and feeds document-level input back through
//! [`DialogService::dispatch`]; each open dialog suspends its caller until
//! exactly one resolution trigger fires (confirm, cancel, dismiss, a click
//! on its own backdrop, or Escape).
//!
//! ```no_run
//! # use std::sync::Arc;
//! # async fn demo(surface: Arc<dyn colloquy::Surface>) {
//! use colloquy::{Confirm, DialogService};
//!
//! let dialogs = DialogService::new(surface);
//! let confirmed = dialogs
//!     .confirm(Confirm::new("Delete this record?").with_confirm_label("Delete"))
//!     .await;
//! if confirmed {
//!     // only reached on an explicit confirmation
//! }
//! # }
//! ```

pub mod config;
pub mod dialog;
pub mod events;
pub mod markup;
pub mod surface;

pub use config::ServiceConfig;
pub use dialog::instance::ElementIds;
pub use dialog::service::DialogService;
pub use dialog::types::{
    Alert, Confirm, DialogId, DialogKind, DialogRequest, Outcome, Prompt, Severity,
};
pub use events::{InputEvent, Key, ServiceEvent};
pub use markup::escape_text;
pub use surface::{element_ids, Surface};
