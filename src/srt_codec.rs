use std::fmt;

use anyhow::{anyhow, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @module: SubRip parsing, repair and serialization

// @const: Permissive repair header (optional index line + timecode pair)
static REPAIR_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:(\d+)\s+)?(\d{2}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2}[,.]\d{3})")
        .unwrap()
});

// @const: Embedded newline runs inside repaired body text
static NEWLINE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// One timed subtitle line
#[derive(Debug, Clone)]
pub struct Cue {
    // @field: Sequence number, reassigned on serialization
    pub index: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Single subtitle line
    pub text: String,
}

impl Cue {
    /// Creates a new cue without validation, for callers that already hold
    /// checked values
    pub fn new(index: usize, start_ms: u64, end_ms: u64, text: String) -> Self {
        Cue { index, start_ms, end_ms, text }
    }

    // @creates: Validated cue
    // @validates: Time range and non-empty text
    pub fn new_validated(index: usize, start_ms: u64, end_ms: u64, text: String) -> Result<Self> {
        if end_ms <= start_ms {
            return Err(anyhow!(
                "Invalid time range: end time {} <= start time {}",
                end_ms, start_ms
            ));
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Empty cue text for entry {}", index));
        }

        Ok(Cue {
            index,
            start_ms,
            end_ms,
            text: trimmed.to_string(),
        })
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            format_timecode(self.start_ms),
            format_timecode(self.end_ms)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// One raw entry recovered from an SRT file, before segmentation
#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Normalize CRLF and lone CR line endings to LF
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timecode(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse an SRT timecode to milliseconds, accepting `,` or `.` as the
/// millisecond separator. A full `a --> b` line is tolerated by taking the
/// start time.
pub fn try_parse_timecode(timecode: &str) -> Result<u64, SubtitleError> {
    let timecode = timecode.trim();
    let timecode = timecode
        .split(" --> ")
        .next()
        .unwrap_or(timecode)
        .trim();

    let parts: Vec<&str> = timecode.split(&[':', ',', '.'][..]).collect();
    if parts.len() != 4 {
        return Err(SubtitleError::Timecode(timecode.to_string()));
    }

    let mut values = [0u64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| SubtitleError::Timecode(timecode.to_string()))?;
    }
    let [hours, minutes, seconds, millis] = values;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(SubtitleError::Timecode(timecode.to_string()));
    }

    Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
}

/// Soft-failing timecode parse: a single bad timecode never aborts a
/// whole-file batch, it logs and falls back to 0
pub fn parse_timecode(timecode: &str) -> u64 {
    try_parse_timecode(timecode).unwrap_or_else(|e| {
        warn!("{}, falling back to 0", e);
        0
    })
}

/// Strict block-oriented SRT parse.
///
/// Tolerates CRLF/CR line endings, blocks missing an explicit index line,
/// and blocks whose first non-blank line is the timecode line directly.
/// Malformed or empty entries are skipped with a warning; they are never
/// fatal for the file.
pub fn parse(raw: &str) -> Vec<ParsedEntry> {
    let content = normalize_line_endings(raw);

    let mut entries = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                if let Some(entry) = parse_block(&block, entries.len() + 1) {
                    entries.push(entry);
                }
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        if let Some(entry) = parse_block(&block, entries.len() + 1) {
            entries.push(entry);
        }
    }

    entries
}

fn parse_block(lines: &[&str], fallback_index: usize) -> Option<ParsedEntry> {
    let mut index_line = None;
    let mut timecode_line = None;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if timecode_line.is_none() && trimmed.contains(" --> ") {
            timecode_line = Some(i);
            break;
        }
        if index_line.is_none() && !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            index_line = Some(i);
        }
    }

    let timecode_line = match timecode_line {
        Some(i) => i,
        None => {
            warn!("Skipping block without a timecode line: {:?}", lines.first());
            return None;
        }
    };

    let index = index_line
        .and_then(|i| lines[i].trim().parse::<usize>().ok())
        .unwrap_or(fallback_index);

    let timecode = lines[timecode_line].trim();
    let (start_str, end_str) = timecode.split_once(" --> ")?;
    let start_ms = parse_timecode(start_str);
    let end_ms = parse_timecode(end_str);

    let text = lines[timecode_line + 1..]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        warn!("Skipping entry {} with empty text", index);
        return None;
    }

    Some(ParsedEntry { index, start_ms, end_ms, text })
}

/// Best-effort whole-blob recovery for files that failed strict parsing.
///
/// Locates every repeating header (optional index plus a timecode pair,
/// `,` or `.` millisecond separator) and takes the body text up to the next
/// header. Embedded newline runs collapse to single breaks and indices are
/// renumbered from 1. An empty result is an explicit repair failure; the
/// caller must leave the original input untouched.
pub fn repair(raw: &str) -> Vec<ParsedEntry> {
    let content = normalize_line_endings(raw);

    struct Header {
        body_start: usize,
        match_start: usize,
        start_ms: u64,
        end_ms: u64,
    }

    let mut headers: Vec<Header> = Vec::new();
    for caps in REPAIR_HEADER_REGEX.captures_iter(&content) {
        let whole = caps.get(0).expect("capture group 0 always exists");
        headers.push(Header {
            body_start: whole.end(),
            match_start: whole.start(),
            start_ms: parse_timecode(&caps[2]),
            end_ms: parse_timecode(&caps[3]),
        });
    }

    if headers.is_empty() {
        warn!("Repair found no recoverable subtitle entries");
        return Vec::new();
    }

    let mut entries = Vec::new();
    for i in 0..headers.len() {
        let body_end = headers
            .get(i + 1)
            .map(|next| next.match_start)
            .unwrap_or(content.len());
        let body = content[headers[i].body_start..body_end].trim();
        let text = NEWLINE_RUN_REGEX.replace_all(body, "\n").into_owned();

        if text.trim().is_empty() {
            warn!("Skipping repaired entry with empty text");
            continue;
        }

        entries.push(ParsedEntry {
            index: entries.len() + 1,
            start_ms: headers[i].start_ms,
            end_ms: headers[i].end_ms,
            text,
        });
    }

    entries
}

/// Serialize cues to SRT text, renumbering sequentially from 1 regardless
/// of the indices the cues arrived with
pub fn serialize(cues: &[Cue]) -> String {
    let blocks: Vec<String> = cues
        .iter()
        .enumerate()
        .map(|(i, cue)| {
            format!(
                "{}\n{} --> {}\n{}",
                i + 1,
                format_timecode(cue.start_ms),
                format_timecode(cue.end_ms),
                cue.text
            )
        })
        .collect();

    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}
