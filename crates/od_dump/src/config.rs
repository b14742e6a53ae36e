use alloc::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Engine-wide defaults of a [`Dumper`](crate::Dumper).
///
/// Every field falls back to its default when missing, so a configuration
/// file only needs the values it changes.
///
/// # Examples
///
/// ```
/// use od_dump::DumperConfig;
///
/// let config: DumperConfig = serde_json::from_str(r#"{ "max_depth": 3 }"#).unwrap();
/// assert_eq!(config.max_depth, 3);
/// assert_eq!(config.max_elements, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumperConfig {
    /// Spaces per indent level.
    pub indent_width: usize,
    /// Composite descents allowed when no policy sets a depth.
    pub max_depth: usize,
    /// Sequence and map items rendered when no policy sets a length.
    pub max_elements: usize,
    /// Characters written before further output is dropped.
    pub max_output_length: Option<usize>,
    pub null_token: Cow<'static, str>,
    pub mask_text: Cow<'static, str>,
    pub label_format: Cow<'static, str>,
}

impl DumperConfig {
    pub const DEFAULT: Self = Self {
        indent_width: 2,
        max_depth: 8,
        max_elements: 10,
        max_output_length: None,
        null_token: Cow::Borrowed("<null>"),
        mask_text: Cow::Borrowed("******"),
        label_format: Cow::Borrowed("{name} = "),
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_elements(mut self, count: usize) -> Self {
        self.max_elements = count;
        self
    }

    pub fn with_max_output_length(mut self, length: usize) -> Self {
        self.max_output_length = Some(length);
        self
    }

    pub fn with_null_token(mut self, token: impl Into<Cow<'static, str>>) -> Self {
        self.null_token = token.into();
        self
    }

    pub fn with_mask_text(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.mask_text = text.into();
        self
    }

    pub fn with_label_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.label_format = format.into();
        self
    }
}

impl Default for DumperConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::DumperConfig;

    #[test]
    fn ron_overrides_selected_fields() {
        let config: DumperConfig =
            ron::from_str("(indent_width: 4, null_token: \"null\", max_output_length: Some(80))")
                .unwrap();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.null_token, "null");
        assert_eq!(config.max_output_length, Some(80));
        assert_eq!(config.mask_text, "******");
        assert_eq!(config.label_format, "{name} = ");
    }

    #[test]
    fn json_round_trip() {
        let config = DumperConfig::new().with_max_depth(2).with_mask_text("#");
        let text = serde_json::to_string(&config).unwrap();
        let back: DumperConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
        assert_eq!(serde_json::from_str::<DumperConfig>("{}").unwrap(), DumperConfig::DEFAULT);
    }
}
