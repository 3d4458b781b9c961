//! Lightweight assistant markup.
//!
//! Replies may carry `**bold**` spans and `[label](href)` links. They
//! are tokenized into a structured segment sequence so rendering and
//! deep-link routing work off typed data instead of ad hoc string
//! splitting.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*|\[([^\]]*)\]\(([^)]*)\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Text(String),
    Bold(String),
    Link { label: String, href: String },
}

impl Segment {
    /// `#`-prefixed link targets are in-app deep links rather than
    /// external navigation.
    pub fn is_deep_link(&self) -> bool {
        matches!(self, Self::Link { href, .. } if href.starts_with('#'))
    }
}

/// Split assistant text into renderable segments. Unmatched markup is
/// left as plain text.
pub fn parse(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for caps in MARKUP.captures_iter(text) {
        let matched = caps.get(0).expect("whole-pattern group always present");
        if matched.start() > cursor {
            segments.push(Segment::Text(text[cursor..matched.start()].to_string()));
        }
        if let Some(bold) = caps.get(1) {
            segments.push(Segment::Bold(bold.as_str().to_string()));
        } else if let (Some(label), Some(href)) = (caps.get(2), caps.get(3)) {
            segments.push(Segment::Link {
                label: label.as_str().to_string(),
                href: href.as_str().to_string(),
            });
        }
        cursor = matched.end();
    }
    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_string()));
    }
    segments
}
