//! Comment sort orders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order requested for a comment thread or a "load more" lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    /// Reddit's "best".
    #[default]
    Confidence,
    Top,
    New,
    Controversial,
    Old,
    Random,
    Qa,
    Live,
}

impl CommentSort {
    /// The value sent in the `sort` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confidence => "confidence",
            Self::Top => "top",
            Self::New => "new",
            Self::Controversial => "controversial",
            Self::Old => "old",
            Self::Random => "random",
            Self::Qa => "qa",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for CommentSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "confidence" | "best" => Ok(Self::Confidence),
            "top" => Ok(Self::Top),
            "new" => Ok(Self::New),
            "controversial" => Ok(Self::Controversial),
            "old" => Ok(Self::Old),
            "random" => Ok(Self::Random),
            "qa" => Ok(Self::Qa),
            "live" => Ok(Self::Live),
            other => Err(format!("unknown comment sort '{other}'")),
        }
    }
}
