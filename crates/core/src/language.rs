//! Supported languages (12 Indian locales)

use serde::{Deserialize, Serialize};

/// A supported locale.
///
/// Serialized as the BCP-47 tag (e.g. `hi-IN`). Unknown tags resolve to
/// [`Language::English`], the base language of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en-IN")]
    English,
    #[serde(rename = "hi-IN")]
    Hindi,
    #[serde(rename = "kn-IN")]
    Kannada,
    #[serde(rename = "ta-IN")]
    Tamil,
    #[serde(rename = "te-IN")]
    Telugu,
    #[serde(rename = "mr-IN")]
    Marathi,
    #[serde(rename = "bn-IN")]
    Bengali,
    #[serde(rename = "gu-IN")]
    Gujarati,
    #[serde(rename = "ml-IN")]
    Malayalam,
    #[serde(rename = "pa-IN")]
    Punjabi,
    #[serde(rename = "ur-IN")]
    Urdu,
    #[serde(rename = "or-IN")]
    Odia,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: &'static [Language] = &[
        Language::English,
        Language::Hindi,
        Language::Kannada,
        Language::Tamil,
        Language::Telugu,
        Language::Marathi,
        Language::Bengali,
        Language::Gujarati,
        Language::Malayalam,
        Language::Punjabi,
        Language::Urdu,
        Language::Odia,
    ];

    /// BCP-47 locale tag
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Kannada => "kn-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
            Language::Marathi => "mr-IN",
            Language::Bengali => "bn-IN",
            Language::Gujarati => "gu-IN",
            Language::Malayalam => "ml-IN",
            Language::Punjabi => "pa-IN",
            Language::Urdu => "ur-IN",
            Language::Odia => "or-IN",
        }
    }

    /// English name, as understood by the content-generation provider
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Kannada => "Kannada",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Marathi => "Marathi",
            Language::Bengali => "Bengali",
            Language::Gujarati => "Gujarati",
            Language::Malayalam => "Malayalam",
            Language::Punjabi => "Punjabi",
            Language::Urdu => "Urdu",
            Language::Odia => "Odia",
        }
    }

    /// Native-script name for display
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Tamil => "தமிழ்",
            Language::Telugu => "తెలుగు",
            Language::Marathi => "मराठी",
            Language::Bengali => "বাংলা",
            Language::Gujarati => "ગુજરાતી",
            Language::Malayalam => "മലയാളം",
            Language::Punjabi => "ਪੰਜਾਬੀ",
            Language::Urdu => "اردو",
            Language::Odia => "ଓଡ଼ିଆ",
        }
    }

    /// Resolve a locale tag to a supported language.
    ///
    /// Tries an exact tag match first, then the bare language part
    /// (`hi` resolves to `hi-IN`). Unknown tags default to English.
    pub fn from_tag(tag: &str) -> Self {
        if let Some(lang) = Self::ALL.iter().find(|l| l.tag() == tag) {
            return *lang;
        }
        let base = tag.split('-').next().unwrap_or(tag);
        Self::ALL
            .iter()
            .find(|l| l.tag().starts_with(base) && !base.is_empty())
            .copied()
            .unwrap_or(Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_exact() {
        assert_eq!(Language::from_tag("hi-IN"), Language::Hindi);
        assert_eq!(Language::from_tag("ta-IN"), Language::Tamil);
    }

    #[test]
    fn test_from_tag_partial() {
        assert_eq!(Language::from_tag("hi"), Language::Hindi);
        assert_eq!(Language::from_tag("bn-BD"), Language::Bengali);
    }

    #[test]
    fn test_from_tag_unknown_defaults_to_english() {
        assert_eq!(Language::from_tag("fr-FR"), Language::English);
        assert_eq!(Language::from_tag(""), Language::English);
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&Language::Telugu).unwrap();
        assert_eq!(json, "\"te-IN\"");
        let lang: Language = serde_json::from_str("\"mr-IN\"").unwrap();
        assert_eq!(lang, Language::Marathi);
    }
}
