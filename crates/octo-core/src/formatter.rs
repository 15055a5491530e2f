//! Markdown-ish formatting of assistant output into display markup.
//!
//! Rules, in order:
//! 1. ```` ```code``` ```` → `<pre><code>code</code></pre>`
//! 2. `` `code` `` → `<code>code</code>`
//! 3. `**bold**` → `<strong>bold</strong>`
//! 4. `*italic*` → `<em>italic</em>`
//! 5. newline, or a literal `\n` escape → `<br>`
//!
//! Code spans are matched first and their contents are left alone by the
//! emphasis rules. Existing markup is passed through untouched: the output is
//! only fit for the trusted local surface.

use std::sync::OnceLock;
use regex::{Captures, Regex};
use serde_json::Value;

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Fenced blocks take priority over inline spans (leftmost-first alternation)
    RE.get_or_init(|| Regex::new(r"```([^`]+)```|`([^`]+)`").expect("valid code regex"))
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"))
}

fn italic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"))
}

/// Format a text payload into markup
pub fn format_message(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 16);
    let mut last = 0;

    for caps in code_re().captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&emphasize(&content[last..whole.start()]));
        out.push_str(&code_markup(&caps));
        last = whole.end();
    }
    out.push_str(&emphasize(&content[last..]));

    out.replace("\\n", "<br>").replace('\n', "<br>")
}

/// Format a host payload: strings are formatted, anything else is returned as is
pub fn format_content(content: Value) -> Value {
    match content {
        Value::String(text) => Value::String(format_message(&text)),
        other => other,
    }
}

fn code_markup(caps: &Captures<'_>) -> String {
    if let Some(block) = caps.get(1) {
        format!("<pre><code>{}</code></pre>", block.as_str())
    } else if let Some(inline) = caps.get(2) {
        format!("<code>{}</code>", inline.as_str())
    } else {
        String::new()
    }
}

fn emphasize(text: &str) -> String {
    let bold = bold_re().replace_all(text, "<strong>$1</strong>");
    italic_re().replace_all(&bold, "<em>$1</em>").into_owned()
}
