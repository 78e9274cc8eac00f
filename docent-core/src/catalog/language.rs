//! Languages a visitor can pick for an exhibit

use serde::{Deserialize, Serialize};

/// One of the closed set of supported narration languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    En,
    Fr,
    Ar,
}

impl LanguageTag {
    /// All supported languages in presentation order.
    pub const ALL: [LanguageTag; 3] = [LanguageTag::En, LanguageTag::Fr, LanguageTag::Ar];

    /// Route suffix form, e.g. `fr`.
    pub fn code(self) -> &'static str {
        match self {
            LanguageTag::En => "en",
            LanguageTag::Fr => "fr",
            LanguageTag::Ar => "ar",
        }
    }

    /// Name of the language written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            LanguageTag::En => "English",
            LanguageTag::Fr => "Français",
            LanguageTag::Ar => "العربية",
        }
    }

    /// Whether the language is written right to left.
    pub fn is_rtl(self) -> bool {
        matches!(self, LanguageTag::Ar)
    }

    /// Parses a route suffix, returning `None` for anything unrecognized.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.code() == code)
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for LanguageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            format!("Invalid language tag: '{s}'. Valid options are: en, fr, ar")
        })
    }
}
