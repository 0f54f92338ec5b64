//! Color markup for labels.
//!
//! `[magenta]READ    [/]` marks the label span at the start of a record.
//! Only that leading span is markup: the open tag must be one of the eight
//! label color names, and everything after the first `[/]` is message text
//! written as-is.

use nu_ansi_term::Style;

use crate::category::LabelColor;

const CLOSE_TAG: &str = "[/]";

pub fn wrap(color: LabelColor, text: &str) -> String {
    format!("[{}]{}{}", color.name(), text, CLOSE_TAG)
}

/// Paints the leading label span when `ansi` is set, otherwise drops its
/// tags. Text without a leading color tag is returned unchanged.
pub fn render(text: &str, ansi: bool) -> String {
    let Some((color, body)) = open_tag(text) else {
        return text.to_string();
    };
    // unterminated span colors the rest of the text
    let (span, rest) = match body.find(CLOSE_TAG) {
        Some(end) => (&body[..end], &body[end + CLOSE_TAG.len()..]),
        None => (body, ""),
    };

    let mut out = String::with_capacity(text.len() + 16);
    if ansi {
        let style = Style::new().fg(color.as_ansi());
        out.push_str(&format!("{}", style.paint(span)));
    } else {
        out.push_str(span);
    }
    out.push_str(rest);
    out
}

fn open_tag(text: &str) -> Option<(LabelColor, &str)> {
    let inner = text.strip_prefix('[')?;
    let end = inner.find(']')?;
    let color = color_tag(&inner[..end])?;
    Some((color, &inner[end + 1..]))
}

fn color_tag(name: &str) -> Option<LabelColor> {
    LabelColor::ALL.into_iter().find(|color| color.name() == name)
}
