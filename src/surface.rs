//! The document surface the service renders into
//!
//! The service is headless: it produces markup fragments and drives them
//! through this trait, while the host owns the live document tree, its
//! transitions, and text editing inside prompt fields. Input flows back the
//! other way through `DialogService::dispatch`.

use anyhow::Result;
use async_trait::async_trait;

/// Well-known element ids on the host document.
pub mod element_ids {
    /// The shared stacking container every dialog node mounts under.
    /// Created lazily on the first dialog request and never removed; its
    /// visibility tracks whether any dialog node remains.
    pub const CONTAINER: &str = "dialog-service-container";
}

/// The live document tree the dialog service drives.
///
/// Operations on elements that no longer exist must be no-ops or errors; the
/// service treats both the same and never surfaces them to callers.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Insert a markup fragment as the last child of the element `parent`,
    /// or at the document root when `parent` is `None`. The fragment's
    /// element ids become addressable immediately.
    async fn mount(&self, parent: Option<&str>, markup: &str) -> Result<()>;

    /// Remove the element with the given id, and its subtree.
    async fn remove(&self, id: &str) -> Result<()>;

    /// Toggle an element's `hidden` state.
    async fn set_visible(&self, id: &str, visible: bool) -> Result<()>;

    /// Apply or clear an element's shown presentation state, the hook the
    /// host's entry/exit transitions key off.
    async fn set_shown(&self, id: &str, shown: bool) -> Result<()> {
        let _ = (id, shown);
        Ok(())
    }

    /// Current text of an editable field; `None` if the field is missing.
    async fn input_value(&self, id: &str) -> Result<Option<String>>;

    /// Move input focus to an element; missing elements are ignored.
    async fn focus(&self, id: &str) -> Result<()> {
        let _ = id;
        Ok(())
    }
}
