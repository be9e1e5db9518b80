//! Merges page fragments into the shared header shell.
//!
//! Composition is plain string work over runtime-loaded fragments: extract
//! the fragment's body, splice it into the shell's placeholder, and - when a
//! user is logged in - embed their identity as a JSON data block the header
//! widget reads on load instead of making a first-paint auth round trip.
//!
//! Composition never fails outward. A shell without a placeholder is served
//! as-is (fragment dropped, logged); a fragment without body tags is spliced
//! whole.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::session::CurrentUser;
use crate::models::user::UserProfile;

/// Substitution point in the header shell.
pub const CONTENT_PLACEHOLDER: &str = "{{content}}";

/// Element id of the injected identity data block.
pub const IDENTITY_ELEMENT_ID: &str = "xs-identity";

/// Matches a full-document fragment's body content.
static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("Invalid regex"));

/// Compose a page: shell + fragment body + optional identity block.
#[must_use]
pub fn compose(shell: &str, fragment: &str, identity: Option<&CurrentUser>) -> String {
    let body = extract_body(fragment);

    let mut html = if shell.contains(CONTENT_PLACEHOLDER) {
        shell.replacen(CONTENT_PLACEHOLDER, body, 1)
    } else {
        tracing::warn!("Header shell has no content placeholder; page content dropped");
        shell.to_owned()
    };

    if let Some(user) = identity {
        inject_identity(&mut html, user);
    }

    html
}

/// The fragment's body content if it is a full document, the whole fragment
/// otherwise.
fn extract_body(fragment: &str) -> &str {
    BODY_RE
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map_or(fragment, |m| m.as_str())
}

/// Embed the identity payload before the closing body tag (appended when the
/// shell has none).
///
/// The block is `type="application/json"`, so browsers never execute it and
/// the script-src CSP stays strict; the widget reads it with `JSON.parse`.
fn inject_identity(html: &mut String, user: &CurrentUser) {
    let profile = UserProfile {
        id: user.id,
        email: user.email.as_str().to_owned(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    };

    let json = match serde_json::to_string(&profile) {
        Ok(json) => json,
        Err(e) => {
            // Unreachable for this shape; degrade to an anonymous page.
            tracing::error!("Failed to serialize identity payload: {e}");
            return;
        }
    };

    let script = format!(
        r#"<script type="application/json" id="{IDENTITY_ELEMENT_ID}">{}</script>"#,
        escape_for_inline_html(&json)
    );

    match html.rfind("</body>") {
        Some(pos) => html.insert_str(pos, &script),
        None => html.push_str(&script),
    }
}

/// Escape a JSON string for embedding inside an HTML script element.
///
/// `<`, `>`, and `&` become `\uXXXX` escapes. They only occur inside JSON
/// string values here, where the escape form is equivalent, so the payload
/// stays valid JSON while stored names and emails cannot close the element
/// or open a new tag.
fn escape_for_inline_html(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}
