//! Dialog request types and resolution values
//!
//! The three request builders carry the original browser-dialog defaults
//! (`Confirm`/Yes/No, `Alert`/info, `Input` with a single-line field); a
//! request is immutable once submitted to the service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a dialog instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(String);

impl DialogId {
    /// Mint a fresh id. Ids only need to be unique among concurrently open
    /// dialogs.
    pub(crate) fn generate() -> Self {
        Self(format!("dialog-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DialogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DialogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DialogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three dialog kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Confirm,
    Alert,
    Prompt,
}

/// Presentation-only classification selecting an alert's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Parse a severity tag, falling back to `Info` for anything unknown.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn icon_class(&self) -> &'static str {
        match self {
            Self::Info => "dialog-icon-info",
            Self::Success => "dialog-icon-success",
            Self::Warning => "dialog-icon-warning",
            Self::Error => "dialog-icon-error",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}

/// A yes/no confirmation request.
#[derive(Debug, Clone)]
pub struct Confirm {
    pub message: String,
    pub title: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Confirm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: "Confirm".to_string(),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }
}

impl From<&str> for Confirm {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Confirm {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// An acknowledgement-only message.
#[derive(Debug, Clone)]
pub struct Alert {
    pub message: String,
    pub title: String,
    pub severity: Severity,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: "Alert".to_string(),
            severity: Severity::Info,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl From<&str> for Alert {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Alert {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A text-input request.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub message: String,
    pub title: String,
    pub default_value: String,
    pub placeholder: String,
    pub multiline: bool,
}

impl Prompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: "Input".to_string(),
            default_value: String::new(),
            placeholder: String::new(),
            multiline: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Switch the field to a multi-line text area. Enter then inserts a
    /// newline instead of confirming.
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }
}

impl From<&str> for Prompt {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Prompt {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A dialog request of any kind.
#[derive(Debug, Clone)]
pub enum DialogRequest {
    Confirm(Confirm),
    Alert(Alert),
    Prompt(Prompt),
}

impl DialogRequest {
    pub fn kind(&self) -> DialogKind {
        match self {
            Self::Confirm(_) => DialogKind::Confirm,
            Self::Alert(_) => DialogKind::Alert,
            Self::Prompt(_) => DialogKind::Prompt,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Confirm(request) => &request.message,
            Self::Alert(request) => &request.message,
            Self::Prompt(request) => &request.message,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Confirm(request) => &request.title,
            Self::Alert(request) => &request.title,
            Self::Prompt(request) => &request.title,
        }
    }
}

impl From<Confirm> for DialogRequest {
    fn from(request: Confirm) -> Self {
        Self::Confirm(request)
    }
}

impl From<Alert> for DialogRequest {
    fn from(request: Alert) -> Self {
        Self::Alert(request)
    }
}

impl From<Prompt> for DialogRequest {
    fn from(request: Prompt) -> Self {
        Self::Prompt(request)
    }
}

/// The unified resolution value behind the typed operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The confirm control fired. `input` carries the trimmed prompt text
    /// for prompt dialogs and is `None` otherwise.
    Confirmed { input: Option<String> },

    /// Cancel, dismiss, backdrop click, Escape, or empty prompt input.
    Dismissed,
}

impl Outcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    pub fn into_input(self) -> Option<String> {
        match self {
            Self::Confirmed { input } => input,
            Self::Dismissed => None,
        }
    }
}
