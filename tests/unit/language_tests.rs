/*!
 * Tests for language profiles, code canonicalization and filename inference
 */

use std::sync::Arc;

use subsplit::language::{
    canonical_code, display_name, infer_from_filename, infer_from_filename_or,
    ProfileRegistry, ScriptClass, DEFAULT_MAX_CHARS,
};
use subsplit::segmenter::Tokenizer;

/// CJK family languages share the 16-character width
#[test]
fn test_lookup_withCjkFamilyCodes_shouldUseSixteenCharWidth() {
    let registry = ProfileRegistry::new();

    for code in ["CN", "HK", "JP", "KR"] {
        let profile = registry.lookup(code);
        assert_eq!(profile.script_class, ScriptClass::Cjk, "{}", code);
        assert_eq!(profile.max_chars_per_line, 16, "{}", code);
    }
}

/// Thai is character-segmented with a 20-character width
#[test]
fn test_lookup_withThai_shouldUseTwentyCharWidth() {
    let profile = ProfileRegistry::new().lookup("TH");

    assert_eq!(profile.script_class, ScriptClass::Cjk);
    assert_eq!(profile.max_chars_per_line, 20);
}

/// Arabic uses the RTL strategy with the default width
#[test]
fn test_lookup_withArabic_shouldUseRtlStrategy() {
    let profile = ProfileRegistry::new().lookup("SA");

    assert_eq!(profile.script_class, ScriptClass::Rtl);
    assert_eq!(profile.max_chars_per_line, DEFAULT_MAX_CHARS);
}

/// Lookup is total: unknown codes fall back to a Latin default profile
#[test]
fn test_lookup_withUnknownCode_shouldFallBackToLatinDefault() {
    let profile = ProfileRegistry::new().lookup("xx");

    assert_eq!(profile.code, "XX");
    assert_eq!(profile.script_class, ScriptClass::Latin);
    assert_eq!(profile.max_chars_per_line, DEFAULT_MAX_CHARS);
}

/// ISO and locale forms canonicalize to the same legacy code
#[test]
fn test_canonicalCode_withEquivalentForms_shouldAgree() {
    assert_eq!(canonical_code("JP"), "JP");
    assert_eq!(canonical_code("ja"), "JP");
    assert_eq!(canonical_code("ja-JP"), "JP");
    assert_eq!(canonical_code("zh-CN"), "CN");
    assert_eq!(canonical_code("ar"), "SA");
}

/// Traditional Chinese locales map to the Traditional profile
#[test]
fn test_canonicalCode_withTraditionalChineseLocales_shouldMapToHk() {
    assert_eq!(canonical_code("zh-TW"), "HK");
    assert_eq!(canonical_code("zh-HK"), "HK");
}

/// Empty input canonicalizes to English rather than failing
#[test]
fn test_canonicalCode_withEmptyInput_shouldDefaultToEnglish() {
    assert_eq!(canonical_code(""), "EN");
    assert_eq!(canonical_code("   "), "EN");
}

/// Display names come from the ISO mapping; unmapped codes echo themselves
#[test]
fn test_displayName_withKnownAndUnknownCodes_shouldResolve() {
    assert_eq!(display_name("JP"), "Japanese");
    assert_eq!(display_name("zh-CN"), "Chinese");
    assert_eq!(display_name("QQ"), "QQ");
}

/// A locale token in the filename wins over everything else
#[test]
fn test_inferFromFilename_withLocaleToken_shouldReturnLocale() {
    assert_eq!(infer_from_filename("ad_zh-CN_v2.mp4"), "zh-CN");
    assert_eq!(infer_from_filename("promo_ja-JP_final.srt"), "ja-JP");
}

/// A two-letter uppercase token is a language code, except the literal AI
#[test]
fn test_inferFromFilename_withLegacyToken_shouldReturnCode() {
    assert_eq!(infer_from_filename("ad_FR_v1.srt"), "FR");
    assert_eq!(infer_from_filename("Promo_AI_v1.mp4"), "EN");
}

/// Nothing recognizable falls back to the supplied default
#[test]
fn test_inferFromFilename_withNoToken_shouldUseFallback() {
    assert_eq!(infer_from_filename("subtitles.srt"), "EN");
    assert_eq!(infer_from_filename_or("subtitles.srt", "JP"), "JP");
}

struct NoopTokenizer;

impl Tokenizer for NoopTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }
}

/// A tokenizer attached to one language shows up in that profile only
#[test]
fn test_withTokenizer_shouldAttachCapabilityToOneProfile() {
    let registry = ProfileRegistry::new().with_tokenizer("ja", Arc::new(NoopTokenizer));

    assert!(registry.lookup("JP").tokenizer.is_some());
    assert!(registry.lookup("CN").tokenizer.is_none());
}

/// Attaching a tokenizer to an unknown code is a silent no-op
#[test]
fn test_withTokenizer_withUnknownCode_shouldBeIgnored() {
    let registry = ProfileRegistry::new().with_tokenizer("xx", Arc::new(NoopTokenizer));

    assert!(registry.lookup("xx").tokenizer.is_none());
}
