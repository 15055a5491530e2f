//! Render message markup as egui text.
//!
//! Message content arrives as a small HTML subset: the formatter's
//! `<pre><code>`, `<code>`, `<strong>`, `<em>` and `<br>`, plus the shell's
//! ANSI conversions `<span style="color: #rrggbb">` and
//! `<span style="font-weight: bold">`. Parsing produces styled runs;
//! `layout_job` turns those into a `LayoutJob` for a label.
//! Tags outside the subset are kept as literal text.

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};
use crate::theme::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    /// Inside a `<pre>` block
    pub block: bool,
    pub color: Option<Color32>,
}

/// A stretch of text sharing one style
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SpanStyle {
    Color(Color32),
    Bold,
    Plain,
}

#[derive(Default)]
struct Parser {
    runs: Vec<Run>,
    strong: usize,
    em: usize,
    code: usize,
    pre: usize,
    spans: Vec<SpanStyle>,
    /// A `</pre>` was seen; break the line before any further text
    pending_break: bool,
}

impl Parser {
    fn style(&self) -> RunStyle {
        let mut style = RunStyle {
            bold: self.strong > 0,
            italic: self.em > 0,
            code: self.code > 0,
            block: self.pre > 0,
            color: None,
        };
        for span in &self.spans {
            match span {
                SpanStyle::Color(c) => style.color = Some(*c),
                SpanStyle::Bold => style.bold = true,
                SpanStyle::Plain => {}
            }
        }
        style
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.pending_break {
            self.pending_break = false;
            self.line_break();
        }
        let style = self.style();
        match self.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.runs.push(Run {
                text: text.to_string(),
                style,
            }),
        }
    }

    /// Newline unless output is empty or already ends with one
    fn line_break(&mut self) {
        let at_line_start = self
            .runs
            .last()
            .map_or(true, |r| r.text.ends_with('\n'));
        if !at_line_start {
            self.push_text("\n");
        }
    }

    fn tag(&mut self, raw: &str) {
        let inner = raw[1..raw.len() - 1].trim();
        let lower = inner.to_ascii_lowercase();

        match lower.as_str() {
            "br" | "br/" | "br /" => self.push_text("\n"),
            "strong" | "b" => self.strong += 1,
            "/strong" | "/b" => self.strong = self.strong.saturating_sub(1),
            "em" | "i" => self.em += 1,
            "/em" | "/i" => self.em = self.em.saturating_sub(1),
            "code" => self.code += 1,
            "/code" => self.code = self.code.saturating_sub(1),
            "pre" => {
                self.line_break();
                self.pre += 1;
            }
            "/pre" => {
                self.pre = self.pre.saturating_sub(1);
                self.pending_break = true;
            }
            "/span" => {
                self.spans.pop();
            }
            _ if lower == "span" || lower.starts_with("span ") => {
                self.spans.push(span_style(inner));
            }
            _ => self.push_text(raw),
        }
    }
}

fn span_style(tag: &str) -> SpanStyle {
    let Some(style) = attribute(tag, "style") else {
        return SpanStyle::Plain;
    };
    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        match prop.trim().to_ascii_lowercase().as_str() {
            "color" => {
                if let Ok(color) = Color32::from_hex(value.trim()) {
                    return SpanStyle::Color(color);
                }
            }
            "font-weight" if value.trim().eq_ignore_ascii_case("bold") => {
                return SpanStyle::Bold;
            }
            _ => {}
        }
    }
    SpanStyle::Plain
}

/// Value of `name="..."` inside a tag
fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let start = tag.find(&format!("{}=\"", name))? + name.len() + 2;
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

/// Split markup into styled runs
pub fn parse_markup(markup: &str) -> Vec<Run> {
    let mut parser = Parser::default();
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        parser.push_text(&rest[..open]);
        let after = &rest[open..];
        match after.find('>') {
            Some(close) => {
                parser.tag(&after[..=close]);
                rest = &after[close + 1..];
            }
            None => {
                parser.push_text(after);
                rest = "";
            }
        }
    }
    parser.push_text(rest);

    parser.runs
}

/// Plain text of the markup, tags removed
pub fn plain_text(markup: &str) -> String {
    parse_markup(markup).into_iter().map(|r| r.text).collect()
}

/// Build a layout job for a message body
pub fn layout_job(markup: &str, base_color: Color32) -> LayoutJob {
    let mut job = LayoutJob::default();

    for run in parse_markup(markup) {
        let style = run.style;
        let monospace = style.code || style.block;

        let mut format = TextFormat {
            font_id: if monospace {
                FontId::monospace(CODE_SIZE)
            } else {
                FontId::proportional(BODY_SIZE)
            },
            color: match style.color {
                Some(color) => color,
                None if monospace => CODE_FG,
                None if style.bold => TEXT_STRONG,
                None => base_color,
            },
            italics: style.italic,
            ..Default::default()
        };
        if monospace {
            format.background = BG_CODE;
        }

        job.append(&run.text, 0.0, format);
    }

    job
}
