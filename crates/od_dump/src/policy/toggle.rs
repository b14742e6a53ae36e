use core::fmt;

use serde::{Deserialize, Serialize};

/// A tri-state switch: unset, forced on, or forced off.
///
/// An unset toggle defers to the next level of configuration
/// (member, then class, then [`DumperConfig`](crate::DumperConfig)).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    #[default]
    Default,
    Do,
    Skip,
}

impl Toggle {
    #[inline]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// Returns `self` unless it is unset, otherwise `fallback`.
    #[inline]
    pub const fn or(self, fallback: Toggle) -> Toggle {
        match self {
            Self::Default => fallback,
            _ => self,
        }
    }

    /// Resolves the toggle, treating an unset value as `default`.
    #[inline]
    pub const fn resolve(self, default: bool) -> bool {
        match self {
            Self::Default => default,
            Self::Do => true,
            Self::Skip => false,
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.pad("Default"),
            Self::Do => f.pad("Do"),
            Self::Skip => f.pad("Skip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Toggle;

    #[test]
    fn fallback_chain() {
        assert_eq!(Toggle::Default.or(Toggle::Skip), Toggle::Skip);
        assert_eq!(Toggle::Do.or(Toggle::Skip), Toggle::Do);
        assert!(Toggle::Default.or(Toggle::Default).resolve(true));
        assert!(!Toggle::Skip.resolve(true));
    }
}
