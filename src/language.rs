use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::segmenter::Tokenizer;

/// Language profiles for subtitle segmentation
///
/// This module maps language codes (legacy two-letter codes like `JP`,
/// ISO 639-1 codes like `ja`, and locale forms like `ja-JP`) to the script
/// class and line-width settings the segmenter needs. Lookup is total:
/// unknown codes fall back to a generic Latin profile so language inference
/// can never block processing.
// @const: Filename language token regexes
static LOCALE_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_([a-z]{2}-[A-Z]{2})_").unwrap()
});

static LEGACY_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_([A-Z]{2})_").unwrap()
});

static TTS_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"GoogleTTS_([a-z]{2}-[A-Z]{2})_").unwrap()
});

/// Default line width for word-segmented scripts
pub const DEFAULT_MAX_CHARS: usize = 24;

/// Script classification that drives the segmentation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptClass {
    /// Character-segmented scripts (Chinese, Japanese, Korean, Thai)
    Cjk,
    /// Right-to-left word-segmented scripts (Arabic)
    Rtl,
    /// Generic left-to-right word-segmented scripts
    Latin,
}

impl ScriptClass {
    /// Punctuation rules for this script class
    pub fn punctuation(&self) -> &'static PunctuationSet {
        match self {
            ScriptClass::Cjk => &CJK_PUNCTUATION,
            ScriptClass::Rtl | ScriptClass::Latin => &ASCII_PUNCTUATION,
        }
    }
}

/// Characters that must not open a subtitle line, plus the sentence
/// terminators that force a natural break
pub struct PunctuationSet {
    no_lead: &'static str,
    terminators: &'static str,
}

impl PunctuationSet {
    /// Whether a line is not allowed to start with this character
    pub fn forbids_leading(&self, c: char) -> bool {
        self.no_lead.contains(c)
    }

    /// Whether this character ends a sentence and forces a line flush
    pub fn is_terminator(&self, c: char) -> bool {
        self.terminators.contains(c)
    }
}

static CJK_PUNCTUATION: PunctuationSet = PunctuationSet {
    no_lead: "，。！？、；：“”‘’「」【】《》（）…~～,.!?;:\"'()[]{}<>…-",
    terminators: "。！？!?",
};

static ASCII_PUNCTUATION: PunctuationSet = PunctuationSet {
    no_lead: ",.!?;:\"'()[]{}<>…-",
    terminators: "。！？!?",
};

/// Segmentation settings for one language
#[derive(Clone)]
pub struct LanguageProfile {
    /// Canonical legacy code (e.g. "JP", "CN", "SA")
    pub code: String,

    /// Script class driving the split strategy
    pub script_class: ScriptClass,

    /// Maximum characters per produced line (Unicode scalar values)
    pub max_chars_per_line: usize,

    /// Optional morphological tokenizer capability. When absent the
    /// character-based strategy is used for CJK scripts.
    pub tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("code", &self.code)
            .field("script_class", &self.script_class)
            .field("max_chars_per_line", &self.max_chars_per_line)
            .field("tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}

impl LanguageProfile {
    /// Profile for an unmapped language: Latin, default width, no tokenizer
    pub fn latin_default(code: &str) -> Self {
        LanguageProfile {
            code: code.to_string(),
            script_class: ScriptClass::Latin,
            max_chars_per_line: DEFAULT_MAX_CHARS,
            tokenizer: None,
        }
    }

    fn new(code: &str, script_class: ScriptClass, max_chars_per_line: usize) -> Self {
        LanguageProfile {
            code: code.to_string(),
            script_class,
            max_chars_per_line,
            tokenizer: None,
        }
    }

    /// Punctuation rules for this profile's script class
    pub fn punctuation(&self) -> &'static PunctuationSet {
        self.script_class.punctuation()
    }
}

/// Read-only table of language profiles, built once at startup and passed
/// by reference into the segmenter and pipeline
pub struct ProfileRegistry {
    profiles: HashMap<String, LanguageProfile>,
}

impl ProfileRegistry {
    /// Build the registry with the built-in profiles
    pub fn new() -> Self {
        let mut profiles = HashMap::new();
        // CJK family shares a 16-character width; HK (Cantonese) uses the
        // same script class as Chinese
        for code in ["CN", "HK", "JP", "KR"] {
            profiles.insert(code.to_string(), LanguageProfile::new(code, ScriptClass::Cjk, 16));
        }
        // Thai is char-segmented with a slightly larger width
        profiles.insert("TH".to_string(), LanguageProfile::new("TH", ScriptClass::Cjk, 20));
        // Arabic is the sole built-in RTL profile
        profiles.insert("SA".to_string(), LanguageProfile::new("SA", ScriptClass::Rtl, DEFAULT_MAX_CHARS));
        ProfileRegistry { profiles }
    }

    /// Attach a tokenizer capability to one language's profile. Unknown
    /// codes are ignored; the capability is optional by design.
    pub fn with_tokenizer(mut self, code: &str, tokenizer: Arc<dyn Tokenizer>) -> Self {
        let canonical = canonical_code(code);
        if let Some(profile) = self.profiles.get_mut(&canonical) {
            profile.tokenizer = Some(tokenizer);
        }
        self
    }

    /// Look up the profile for a language code. Total function: unknown or
    /// unmapped codes get a Latin default instead of an error.
    pub fn lookup(&self, code: &str) -> LanguageProfile {
        let canonical = canonical_code(code);
        self.profiles
            .get(&canonical)
            .cloned()
            .unwrap_or_else(|| LanguageProfile::latin_default(&canonical))
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a legacy two-letter code to its ISO 639-1 code
fn legacy_to_iso(code: &str) -> Option<&'static str> {
    match code {
        "EN" => Some("en"),
        "JP" => Some("ja"),
        "CN" | "HK" => Some("zh"),
        "DE" => Some("de"),
        "IN" => Some("hi"),
        "FR" => Some("fr"),
        "KR" => Some("ko"),
        "BR" => Some("pt"),
        "IT" => Some("it"),
        "ES" => Some("es"),
        "ID" => Some("id"),
        "TR" => Some("tr"),
        "PH" => Some("tl"),
        "PL" => Some("pl"),
        "SA" => Some("ar"),
        "MY" => Some("ms"),
        "VN" => Some("vi"),
        "TH" => Some("th"),
        "NL" => Some("nl"),
        _ => None,
    }
}

/// Map an ISO 639-1 code to the legacy code used by the registry
fn iso_to_legacy(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("EN"),
        "ja" => Some("JP"),
        "zh" => Some("CN"),
        "de" => Some("DE"),
        "hi" => Some("IN"),
        "fr" => Some("FR"),
        "ko" => Some("KR"),
        "pt" => Some("BR"),
        "it" => Some("IT"),
        "es" => Some("ES"),
        "id" => Some("ID"),
        "tr" => Some("TR"),
        "tl" => Some("PH"),
        "pl" => Some("PL"),
        "ar" => Some("SA"),
        "ms" => Some("MY"),
        "vi" => Some("VN"),
        "th" => Some("TH"),
        "nl" => Some("NL"),
        _ => None,
    }
}

/// Map a locale form to the legacy code. Traditional Chinese locales map to
/// the Cantonese/Traditional profile.
fn locale_to_legacy(code: &str) -> Option<&'static str> {
    match code {
        "en-US" => Some("EN"),
        "ja-JP" => Some("JP"),
        "zh-CN" => Some("CN"),
        "zh-TW" | "zh-HK" => Some("HK"),
        "de-DE" => Some("DE"),
        "hi-IN" => Some("IN"),
        "fr-FR" => Some("FR"),
        "ko-KR" => Some("KR"),
        "pt-BR" => Some("BR"),
        "it-IT" => Some("IT"),
        "es-ES" => Some("ES"),
        "tr-TR" => Some("TR"),
        "tl-PH" => Some("PH"),
        "pl-PL" => Some("PL"),
        "ar-SA" => Some("SA"),
        "ms-MY" => Some("MY"),
        "vi-VN" => Some("VN"),
        "th-TH" => Some("TH"),
        _ => None,
    }
}

/// Canonicalize any accepted code form to the registry's legacy code.
/// Never fails; unrecognized input is uppercased and treated as Latin.
pub fn canonical_code(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return "EN".to_string();
    }
    if let Some(legacy) = locale_to_legacy(code) {
        return legacy.to_string();
    }
    if let Some((prefix, _)) = code.split_once('-') {
        if let Some(legacy) = iso_to_legacy(&prefix.to_lowercase()) {
            return legacy.to_string();
        }
        return prefix.to_uppercase();
    }
    let upper = code.to_uppercase();
    if legacy_to_iso(&upper).is_some() {
        return upper;
    }
    if let Some(legacy) = iso_to_legacy(&code.to_lowercase()) {
        return legacy.to_string();
    }
    upper
}

/// Human-readable language name for log output
pub fn display_name(code: &str) -> String {
    let canonical = canonical_code(code);
    legacy_to_iso(&canonical)
        .and_then(isolang::Language::from_639_1)
        .map(|lang| lang.to_name().to_string())
        .unwrap_or_else(|| canonical.clone())
}

/// Extract a language token from a filename.
///
/// Matches the locale form `_xx-XX_` first, then the two-letter form `_XX_`
/// (the literal token `AI` is never a language code), then the TTS export
/// pattern `GoogleTTS_xx-XX_`. Defaults to `EN` when nothing matches.
pub fn infer_from_filename(filename: &str) -> String {
    infer_from_filename_or(filename, "EN")
}

/// Same as [`infer_from_filename`] with a caller-supplied fallback code
pub fn infer_from_filename_or(filename: &str, fallback: &str) -> String {
    if let Some(caps) = LOCALE_TOKEN_REGEX.captures(filename) {
        let locale = &caps[1];
        if locale_to_legacy(locale).is_some() {
            return locale.to_string();
        }
        // Unmapped locale: keep the language part
        if let Some((prefix, _)) = locale.split_once('-') {
            return prefix.to_uppercase();
        }
    }

    if let Some(caps) = LEGACY_TOKEN_REGEX.captures(filename) {
        let code = &caps[1];
        if code != "AI" {
            return code.to_string();
        }
    }

    if let Some(caps) = TTS_TOKEN_REGEX.captures(filename) {
        let locale = &caps[1];
        if locale_to_legacy(locale).is_some() {
            return locale.to_string();
        }
        if let Some((prefix, _)) = locale.split_once('-') {
            return prefix.to_uppercase();
        }
    }

    fallback.to_string()
}
