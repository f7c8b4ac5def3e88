//! HTML fragments for editable, locked and read-only fields.

use crate::document::{Document, FieldKind};
use crate::lock::LockState;

/// Wrapper element used when the caller does not pick one.
pub const DEFAULT_TAG: &str = "div";

pub const EDITABLE_CLASS: &str = "__wysiwyg-editable";
pub const LOCKED_CLASS: &str = "__editable_locked";

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A field value ready for element content: HTML as stored, text escaped.
pub fn field_content(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::Html => value.to_string(),
        FieldKind::Text => escape(value),
    }
}

/// A plain element name such as `div`, `span` or `h1`.
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Identifier the editing UI uses to address a field:
/// `{doc_type}-{id}|{id}|{field}`.
pub fn element_id(document: &Document, field: &str) -> String {
    format!(
        "{}-{}|{}|{}",
        document.doc_type, document.id, document.id, field
    )
}

/// `content` must already be prepared with [`field_content`].
pub(crate) fn editable(tag: &str, element_id: &str, content: &str) -> String {
    format!(
        "<{tag} class=\"{class}\" id=\"{id}\">{content}</{tag}>",
        tag = tag,
        class = EDITABLE_CLASS,
        id = escape(element_id),
        content = content,
    )
}

pub(crate) fn locked(content: &str, lock: &LockState) -> String {
    format!(
        "<div class=\"{class}\">{content}<p class=\"lockInfo\">Locked by {editor} until {expires}</p></div>",
        class = LOCKED_CLASS,
        content = content,
        editor = escape(&lock.editor_email),
        expires = lock.expires_display(),
    )
}
