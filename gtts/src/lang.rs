//! Languages accepted by the TTS endpoint.

/// Language codes and names the endpoint can speak.
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fr-CA", "French (Canada)"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("ha", "Hausa"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi (Gurmukhi)"),
    ("pl", "Polish"),
    ("pt", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("yue", "Cantonese"),
    ("zh", "Chinese (Mandarin)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Mandarin/Taiwan)"),
];

/// Old or regional codes mapped onto codes the endpoint accepts.
const ALIASES: &[(&str, &str)] = &[
    ("he", "iw"),
    ("jv", "jw"),
    ("zh-cn", "zh-CN"),
    ("zh-tw", "zh-TW"),
    ("zh-yue", "yue"),
    ("zh-hans", "zh-CN"),
    ("zh-hant", "zh-TW"),
];

/// Returns `(code, name)` for every supported language.
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    LANGUAGES
}

/// Maps a user-supplied language code onto the canonical code.
///
/// Matching is case-insensitive. An unknown regional code falls back to its
/// primary subtag, so `en-US` resolves to `en`.
pub fn resolve_language(code: &str) -> Option<&'static str> {
    let code = code.trim().replace('_', "-");
    if code.is_empty() {
        return None;
    }

    if let Some((_, canonical)) = ALIASES.iter().find(|(a, _)| a.eq_ignore_ascii_case(&code)) {
        return Some(*canonical);
    }
    if let Some((canonical, _)) = LANGUAGES.iter().find(|(c, _)| c.eq_ignore_ascii_case(&code)) {
        return Some(*canonical);
    }

    let (primary, _) = code.split_once('-')?;
    resolve_language(primary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact() {
        assert_eq!(resolve_language("ko"), Some("ko"));
        assert_eq!(resolve_language("EN"), Some("en"));
        assert_eq!(resolve_language("zh-tw"), Some("zh-TW"));
        assert_eq!(resolve_language("fr-ca"), Some("fr-CA"));
    }

    #[test]
    fn test_resolve_fallbacks() {
        assert_eq!(resolve_language("en-US"), Some("en"));
        assert_eq!(resolve_language("en_GB"), Some("en"));
        assert_eq!(resolve_language("he"), Some("iw"));
        assert_eq!(resolve_language("zh-Hans"), Some("zh-CN"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve_language(""), None);
        assert_eq!(resolve_language("klingon"), None);
        assert_eq!(resolve_language("xx-YY"), None);
    }

    #[test]
    fn test_table_codes_resolve_to_themselves() {
        for (code, _) in supported_languages() {
            assert_eq!(resolve_language(code), Some(*code));
        }
    }
}
