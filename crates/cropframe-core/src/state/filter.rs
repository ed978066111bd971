use serde::{Deserialize, Serialize};

/// The color filter selected for display and export.
///
/// A single enum field keeps sepia and black-and-white mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    None,
    Sepia,
    BlackAndWhite,
}

impl FilterMode {
    /// Toggle sepia. Turning it on clears black-and-white.
    pub fn toggle_sepia(self) -> Self {
        match self {
            FilterMode::Sepia => FilterMode::None,
            _ => FilterMode::Sepia,
        }
    }

    /// Toggle black-and-white. Turning it on clears sepia.
    pub fn toggle_black_and_white(self) -> Self {
        match self {
            FilterMode::BlackAndWhite => FilterMode::None,
            _ => FilterMode::BlackAndWhite,
        }
    }

    /// Filter-service operation name, `None` when no filter is active.
    pub fn operation(self) -> Option<&'static str> {
        match self {
            FilterMode::None => None,
            FilterMode::Sepia => Some("applySepia"),
            FilterMode::BlackAndWhite => Some("applyBlackAndWhite"),
        }
    }

    /// Equivalent CSS `filter` value for hosts that filter in the browser.
    pub fn css_filter(self) -> &'static str {
        match self {
            FilterMode::None => "none",
            FilterMode::Sepia => "sepia(1)",
            FilterMode::BlackAndWhite => "grayscale(1)",
        }
    }

    pub fn is_sepia(self) -> bool {
        self == FilterMode::Sepia
    }

    pub fn is_black_and_white(self) -> bool {
        self == FilterMode::BlackAndWhite
    }
}
