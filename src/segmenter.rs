use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::{LanguageProfile, PunctuationSet, ScriptClass};

/// Line segmentation for subtitle text
///
/// Pure functions: raw text plus a language profile in, an ordered list of
/// width-bounded lines out. No content is ever truncated; a preserved term
/// that alone exceeds the width limit is emitted as its own oversized line.
// @const: Whitespace run collapsing
static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// @const: Western punctuation glued to a following word character
static TIGHT_PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([,.!?;:])(\w)").unwrap()
});

/// Optional morphological tokenizer capability, injected through the
/// language profile. Absence selects the character-based strategy.
pub trait Tokenizer: Send + Sync {
    /// Split text into surface tokens in order
    fn tokenize(&self, text: &str) -> Vec<String>;
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Collapse whitespace runs and make sure western punctuation is followed
/// by a space when a word character comes next
fn clean_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUN_REGEX.replace_all(text.trim(), " ");
    TIGHT_PUNCTUATION_REGEX
        .replace_all(&collapsed, "${1} ${2}")
        .into_owned()
}

/// Split text into bounded lines according to the profile's script class.
///
/// Widths are measured in Unicode scalar values. Preserved terms are atomic:
/// they are never split across two lines regardless of the width limit.
pub fn split(text: &str, profile: &LanguageProfile, preserved_terms: &[String]) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    match profile.script_class {
        ScriptClass::Cjk => match &profile.tokenizer {
            Some(tokenizer) => split_tokens(
                text,
                profile.max_chars_per_line,
                preserved_terms,
                tokenizer.as_ref(),
            ),
            None => split_chars(
                text,
                profile.max_chars_per_line,
                preserved_terms,
                profile.punctuation(),
            ),
        },
        ScriptClass::Latin => split_words(text, profile.max_chars_per_line),
        ScriptClass::Rtl => split_words_rtl(text, profile.max_chars_per_line),
    }
}

/// Return the preserved term starting at position `i`, if any
fn match_preserved<'a>(chars: &[char], i: usize, terms: &'a [String]) -> Option<&'a str> {
    terms.iter().map(String::as_str).find(|term| {
        let term_chars: Vec<char> = term.chars().collect();
        !term_chars.is_empty() && chars[i..].starts_with(&term_chars)
    })
}

/// Character-based scan for CJK scripts
fn split_chars(
    text: &str,
    max_chars: usize,
    preserved_terms: &[String],
    punctuation: &PunctuationSet,
) -> Vec<String> {
    let cleaned = clean_text(text);
    let chars: Vec<char> = cleaned.chars().collect();

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // A new line must not open with punctuation: reattach the mark to
        // the previous completed line if there is room, else drop it
        if current_len == 0 && punctuation.forbids_leading(c) {
            match lines.last_mut() {
                Some(prev) if char_count(prev) + 1 <= max_chars => prev.push(c),
                _ => debug!("Dropping lone leading punctuation '{}'", c),
            }
            i += 1;
            continue;
        }

        if let Some(term) = match_preserved(&chars, i, preserved_terms) {
            // Preserved terms are atomic; an oversized term overflows its
            // own line rather than being split
            let term_len = char_count(term);
            if current_len + term_len <= max_chars {
                current.push_str(term);
                current_len += term_len;
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.push_str(term);
                current_len = term_len;
            }
            i += term_len;
        } else {
            let lookahead = chars.get(i + 1).copied();
            if current_len + 1 <= max_chars {
                match lookahead {
                    // Keep punctuation glued to its preceding character so
                    // it never opens the next line. When the pair does not
                    // fit, the pair moves to a fresh line together.
                    Some(p) if punctuation.forbids_leading(p) => {
                        if current_len + 2 > max_chars && !current.is_empty() {
                            lines.push(std::mem::take(&mut current));
                            current_len = 0;
                        }
                        current.push(c);
                        current.push(p);
                        current_len += 2;
                        i += 2;
                    }
                    _ => {
                        current.push(c);
                        current_len += 1;
                        i += 1;
                    }
                }
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(c);
                current_len = 1;
                i += 1;
            }
        }

        // Natural break at a sentence end, even under the width limit
        if let Some(last) = current.chars().last() {
            if punctuation.is_terminator(last) {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    let merged = merge_leading_punctuation(lines, max_chars, punctuation);
    merged
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Move a single leading punctuation character from every non-first line
/// onto the end of the previous line when there is room
fn merge_leading_punctuation(
    lines: Vec<String>,
    max_chars: usize,
    punctuation: &PunctuationSet,
) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    for (idx, line) in lines.into_iter().enumerate() {
        if idx > 0 {
            if let Some(first) = line.chars().next() {
                if punctuation.forbids_leading(first) {
                    if let Some(prev) = merged.last_mut() {
                        if char_count(prev) + 1 <= max_chars {
                            prev.push(first);
                            let rest: String = line.chars().skip(1).collect();
                            if !rest.is_empty() {
                                merged.push(rest);
                            }
                            continue;
                        }
                    }
                }
            }
        }
        merged.push(line);
    }
    merged
}

/// Token-based packing when a morphological tokenizer is available.
/// A token containing a preserved term is appended without flushing, so the
/// term never splits; the resulting overflow is accepted.
fn split_tokens(
    text: &str,
    max_chars: usize,
    preserved_terms: &[String],
    tokenizer: &dyn Tokenizer,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for token in tokenizer.tokenize(text) {
        let is_preserved = !token.trim().is_empty()
            && preserved_terms.iter().any(|term| token.contains(term.as_str()));

        if is_preserved || char_count(&current) + char_count(&token) <= max_chars {
            current.push_str(&token);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = token;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Greedy word packing for left-to-right word-segmented scripts
fn split_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = char_count(word);
        let candidate_len = if current.is_empty() {
            word_len
        } else {
            char_count(&current) + 1 + word_len
        };

        if candidate_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Greedy word packing with reversed accumulation for RTL scripts: each
/// accepted word is prepended, so the stored string reads in the script's
/// natural right-to-left order. Visual shaping is a presentation concern.
fn split_words_rtl(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = char_count(word);
        let candidate_len = if current.is_empty() {
            word_len
        } else {
            word_len + 1 + char_count(&current)
        };

        if candidate_len <= max_chars {
            current = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", word, current)
            };
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
