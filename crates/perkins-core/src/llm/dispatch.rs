//! Vendor dispatch rules.
//!
//! Model identifiers are mapped to vendors through an explicit registry of
//! identifier-prefix rules, so adding a third vendor means adding one table
//! row rather than touching call sites.

use std::fmt;

/// A chat-completion vendor Perkins can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    OpenAi,
    Anthropic,
}

impl Vendor {
    /// Display name for UI and error messages (e.g., "OpenAI").
    pub fn display_name(&self) -> &'static str {
        match self {
            Vendor::OpenAi => "OpenAI",
            Vendor::Anthropic => "Anthropic",
        }
    }

    /// Key used for this vendor's section in the config file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Vendor::OpenAi => "openai",
            Vendor::Anthropic => "anthropic",
        }
    }

    /// All known vendors, in display order.
    pub const ALL: &'static [Vendor] = &[Vendor::OpenAi, Vendor::Anthropic];
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identifier-prefix rules, checked in order.
const PREFIX_RULES: &[(&str, Vendor)] = &[("gpt-", Vendor::OpenAi), ("claude-", Vendor::Anthropic)];

/// Resolve the vendor for a model identifier by its prefix.
///
/// Returns `None` when no rule matches; the caller turns that into an
/// `UnsupportedModel` error.
pub fn vendor_for_model(model_id: &str) -> Option<Vendor> {
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| model_id.starts_with(prefix))
        .map(|(_, vendor)| *vendor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt_prefix_maps_to_openai() {
        assert_eq!(vendor_for_model("gpt-4"), Some(Vendor::OpenAi));
        assert_eq!(vendor_for_model("gpt-4-turbo"), Some(Vendor::OpenAi));
        assert_eq!(vendor_for_model("gpt-3.5-turbo"), Some(Vendor::OpenAi));
    }

    #[test]
    fn test_claude_prefix_maps_to_anthropic() {
        assert_eq!(
            vendor_for_model("claude-3-opus-latest"),
            Some(Vendor::Anthropic)
        );
        assert_eq!(
            vendor_for_model("claude-3-5-haiku-latest"),
            Some(Vendor::Anthropic)
        );
    }

    #[test]
    fn test_unknown_prefix_has_no_vendor() {
        assert_eq!(vendor_for_model("mistral-large"), None);
        assert_eq!(vendor_for_model(""), None);
        // Prefix matching is exact, including the trailing dash.
        assert_eq!(vendor_for_model("gpt4"), None);
    }

    #[test]
    fn test_vendor_display() {
        assert_eq!(Vendor::OpenAi.to_string(), "OpenAI");
        assert_eq!(Vendor::Anthropic.to_string(), "Anthropic");
        assert_eq!(Vendor::OpenAi.config_key(), "openai");
        assert_eq!(Vendor::Anthropic.config_key(), "anthropic");
    }
}
