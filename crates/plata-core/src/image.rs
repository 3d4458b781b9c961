//! Image generation models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of aspect ratios the image backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Portrait,
    Landscape,
    Story,
    Widescreen,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        Self::Square,
        Self::Portrait,
        Self::Landscape,
        Self::Story,
        Self::Widescreen,
    ];

    /// The wire form the backend expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "3:4",
            Self::Landscape => "4:3",
            Self::Story => "9:16",
            Self::Widescreen => "16:9",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown aspect ratio: {0}")]
pub struct UnknownAspectRatio(pub String);

impl std::str::FromStr for AspectRatio {
    type Err = UnknownAspectRatio;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(Self::Square),
            "3:4" => Ok(Self::Portrait),
            "4:3" => Ok(Self::Landscape),
            "9:16" => Ok(Self::Story),
            "16:9" => Ok(Self::Widescreen),
            other => Err(UnknownAspectRatio(other.to_string())),
        }
    }
}

/// Result of one generation round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// `data:` URI carrying the encoded image bytes.
    pub data_uri: String,
    /// The prompt after the enhancement pass, shown alongside the image.
    pub enhanced_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_round_trips() {
        for ratio in AspectRatio::ALL {
            assert_eq!(ratio.as_str().parse::<AspectRatio>(), Ok(ratio));
        }
    }

    #[test]
    fn test_unknown_ratio_is_rejected() {
        assert_eq!(
            "2:1".parse::<AspectRatio>(),
            Err(UnknownAspectRatio("2:1".to_string()))
        );
    }
}
