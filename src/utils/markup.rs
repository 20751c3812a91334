// src/utils/markup.rs

//! Fragment envelope handling.
//!
//! Each fragment arrives as a standalone document:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <dataroot generated="2024-03-01T10:00:00">
//!   <record>…</record>
//! </dataroot>
//! ```
//!
//! The declaration and root element are stripped from every fragment and the
//! bodies merged, in order, under a single root.

use std::sync::LazyLock;

use regex::Regex;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<\?xml.*?\?>").expect("static regex")
});

static DOCTYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!DOCTYPE[^>]*>").expect("static regex")
});

static CDATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("static regex")
});

static SELF_CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_][\w.\-]*)(\s[^<>]*?)?\s*/>").expect("static regex")
});

/// Remove the XML declaration, doctype and root element tags from a fragment.
pub fn strip_envelope(fragment: &str, root_tag: &str) -> String {
    let body = DECLARATION.replace_all(fragment, "");
    let body = DOCTYPE.replace_all(&body, "");

    let root = regex::escape(root_tag);
    let root_tags = Regex::new(&format!(r"(?i)<{root}(\s[^>]*)?>|</{root}\s*>|<{root}(\s[^>]*)?/>"));
    match root_tags {
        Ok(re) => re.replace_all(&body, "").trim().to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Rewrite `<Tag/>` and `<Tag attr="x"/>` as empty element pairs.
pub fn expand_self_closing(text: &str) -> String {
    SELF_CLOSING
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            format!("<{name}{attrs}></{name}>")
        })
        .into_owned()
}

/// Replace `<![CDATA[...]]>` sections with their escaped text.
pub fn unwrap_cdata(text: &str) -> String {
    CDATA
        .replace_all(text, |caps: &regex::Captures| {
            caps[1]
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
        })
        .into_owned()
}

/// Merge fragment bodies, in order, into one document under `root_tag`.
pub fn merge_fragments<S: AsRef<str>>(fragments: &[S], root_tag: &str) -> String {
    let mut merged = format!("<{root_tag}>\n");
    for fragment in fragments {
        let body = strip_envelope(fragment.as_ref(), root_tag);
        if !body.is_empty() {
            merged.push_str(&body);
            merged.push('\n');
        }
    }
    merged.push_str(&format!("</{root_tag}>"));
    merged
}

/// Count opening and closing tags of `tag` (case-insensitive).
pub fn count_tags(text: &str, tag: &str) -> (usize, usize) {
    let tag = regex::escape(tag);
    let open = Regex::new(&format!(r"(?i)<{tag}(\s[^>]*)?>"))
        .map(|re| re.find_iter(text).count())
        .unwrap_or(0);
    let close = Regex::new(&format!(r"(?i)</{tag}\s*>"))
        .map(|re| re.find_iter(text).count())
        .unwrap_or(0);
    (open, close)
}
