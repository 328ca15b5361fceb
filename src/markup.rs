//! Markup construction for dialog nodes
//!
//! Fragments are plain strings the host parses into its document tree. Every
//! caller-supplied string passes through [`escape_text`] before insertion, so
//! displayed text always equals the literal input and never becomes
//! structure.

use crate::dialog::instance::ElementIds;
use crate::dialog::types::{DialogRequest, Prompt};
use crate::surface::element_ids;

/// Escape a string for literal use in markup text or attribute position.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The shared container element. Mounted hidden; the service toggles its
/// visibility as dialogs come and go.
pub(crate) fn container() -> String {
    format!(
        r#"<div id="{}" class="dialog-service-container" hidden></div>"#,
        element_ids::CONTAINER
    )
}

/// One dialog node: an instance-scoped backdrop plus the panel with header,
/// body, and footer. Every interactive element carries a derived id so the
/// host can report click targets precisely.
pub(crate) fn dialog(ids: &ElementIds, request: &DialogRequest) -> String {
    let mut out = String::with_capacity(640);
    out.push_str(&format!(r#"<div id="{}" class="dialog">"#, ids.root));
    out.push_str(&format!(
        r#"<div id="{}" class="dialog-backdrop"></div>"#,
        ids.backdrop
    ));
    out.push_str(&format!(r#"<div id="{}" class="dialog-panel">"#, ids.panel));

    out.push_str(r#"<div class="dialog-header">"#);
    out.push_str(&format!(
        r#"<h2 id="{}" class="dialog-title">{}{}</h2>"#,
        ids.title,
        icon(request),
        escape_text(request.title())
    ));
    out.push_str(&format!(
        r#"<button id="{}" class="dialog-dismiss">&times;</button>"#,
        ids.dismiss
    ));
    out.push_str("</div>");

    out.push_str(r#"<div class="dialog-body">"#);
    out.push_str(&format!(
        r#"<p id="{}" class="dialog-message">{}</p>"#,
        ids.message,
        escape_text(request.message())
    ));
    if let DialogRequest::Prompt(prompt) = request {
        out.push_str(&field(ids, prompt));
    }
    out.push_str("</div>");

    out.push_str(r#"<div class="dialog-footer">"#);
    out.push_str(&buttons(ids, request));
    out.push_str("</div>");

    out.push_str("</div></div>");
    out
}

fn icon(request: &DialogRequest) -> String {
    match request {
        DialogRequest::Alert(alert) => format!(
            r#"<span class="dialog-icon {}"></span> "#,
            alert.severity.icon_class()
        ),
        _ => String::new(),
    }
}

fn field(ids: &ElementIds, prompt: &Prompt) -> String {
    if prompt.multiline {
        format!(
            r#"<textarea id="{}" class="dialog-input" rows="4" placeholder="{}">{}</textarea>"#,
            ids.input,
            escape_text(&prompt.placeholder),
            escape_text(&prompt.default_value)
        )
    } else {
        format!(
            r#"<input id="{}" class="dialog-input" type="text" value="{}" placeholder="{}">"#,
            ids.input,
            escape_text(&prompt.default_value),
            escape_text(&prompt.placeholder)
        )
    }
}

fn buttons(ids: &ElementIds, request: &DialogRequest) -> String {
    match request {
        DialogRequest::Confirm(confirm) => format!(
            r#"<button id="{}" class="dialog-button dialog-cancel">{}</button><button id="{}" class="dialog-button dialog-confirm">{}</button>"#,
            ids.cancel,
            escape_text(&confirm.cancel_label),
            ids.confirm,
            escape_text(&confirm.confirm_label)
        ),
        DialogRequest::Alert(_) => format!(
            r#"<button id="{}" class="dialog-button dialog-confirm">OK</button>"#,
            ids.confirm
        ),
        DialogRequest::Prompt(_) => format!(
            r#"<button id="{}" class="dialog-button dialog-cancel">Cancel</button><button id="{}" class="dialog-button dialog-confirm">OK</button>"#,
            ids.cancel, ids.confirm
        ),
    }
}
