//! Assistant conversation models and reply parsing.

pub mod markup;
pub mod options;

use serde::{Deserialize, Serialize};

pub use markup::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Model,
}

/// A parsed assistant reply: directive-free text, renderable segments
/// and any quick-reply options the directive proposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub segments: Vec<Segment>,
    pub options: Option<Vec<String>>,
}

impl ChatReply {
    /// Parse a raw assistant reply: extract the options directive, then
    /// tokenize the remaining markup.
    pub fn parse(raw: &str) -> Self {
        let (text, options) = options::extract(raw);
        let segments = markup::parse(&text);
        Self {
            text,
            segments,
            options,
        }
    }
}
