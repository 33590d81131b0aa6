use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::Config;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::language::{self, ProfileRegistry};
use crate::segmenter;
use crate::srt_codec::{self, Cue};
use crate::timing;

/// File-level subtitle pipeline
///
/// Composes the core stages per source: normalize line endings, strict
/// parse (repair fallback on failure), per-entry segmentation, timing
/// allocation and serialization. The pipeline fails for a file only when
/// zero entries survive both parse attempts; in that case the original
/// input is left untouched.
// @const: Single trailing sentence punctuation mark on an entry's text
static TRAILING_PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.,。!?！？]$").unwrap()
});

/// Characters that end a sentence-like chunk in raw transcript text
const SENTENCE_TERMINATORS: &str = ".!?。！？";

/// Marker suffix carried by already-processed files
const SPLIT_SUFFIX: &str = "_split";

/// One raw transcript segment from the ASR collaborator
#[derive(Debug, Clone)]
pub struct TranscriptSegment {
    /// Start time in ms, shifted to the file origin later
    pub start_ms: u64,

    /// End time in ms; floored to a usable duration on entry
    pub end_ms: u64,

    /// Raw spoken text, may carry trailing sentence punctuation
    pub text: String,
}

impl TranscriptSegment {
    /// Create a segment, flooring the end time so the segment always has a
    /// usable duration
    pub fn new(start_ms: u64, end_ms: u64, text: String) -> Self {
        TranscriptSegment {
            start_ms,
            end_ms: timing::enforce_min_duration(start_ms, end_ms),
            text,
        }
    }

    /// Create a segment from the ASR collaborator's float-second interval
    pub fn from_seconds(start_s: f64, end_s: f64, text: &str) -> Self {
        let start_ms = (start_s.max(0.0) * 1000.0).round() as u64;
        let end_ms = (end_s.max(0.0) * 1000.0).round() as u64;
        Self::new(start_ms, end_ms, text.trim().to_string())
    }
}

/// Composes segmentation, timing and the SRT codec for one file at a time.
/// Holds only read-only state, so independent workers can each own one.
pub struct Pipeline {
    config: Config,
    registry: ProfileRegistry,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration and a profile
    /// registry built at process start
    pub fn new(config: Config, registry: ProfileRegistry) -> Self {
        Pipeline { config, registry }
    }

    /// Pipeline with default configuration and built-in profiles
    pub fn with_defaults() -> Self {
        Self::new(Config::default(), ProfileRegistry::new())
    }

    /// Turn raw ASR segments into sentence-level cues.
    ///
    /// Timestamps are shifted so output starts at the file origin. A segment
    /// whose text breaks into several sentence-like chunks gets an equal
    /// share of its interval per chunk; chunk character length is
    /// deliberately not weighted.
    pub fn transcript_to_cues(&self, segments: &[TranscriptSegment]) -> Vec<Cue> {
        let earliest = segments.iter().map(|s| s.start_ms).min().unwrap_or(0);

        let mut cues = Vec::new();
        for segment in segments {
            let text = segment.text.trim();
            if text.is_empty() {
                continue;
            }

            let start = timing::shift_origin(segment.start_ms, earliest);
            let end = timing::enforce_min_duration(start, timing::shift_origin(segment.end_ms, earliest));

            let chunks = sentence_chunks(text);
            if chunks.len() > 1 {
                let spans = timing::proportional_split(start, end, chunks.len());
                for (chunk, (span_start, span_end)) in chunks.into_iter().zip(spans) {
                    push_cue(&mut cues, span_start, span_end, chunk);
                }
            } else if let Some(chunk) = chunks.into_iter().next() {
                push_cue(&mut cues, start, end, chunk);
            }
        }

        cues
    }

    /// Serialize raw ASR segments straight to SRT text
    pub fn transcript_to_srt(&self, segments: &[TranscriptSegment]) -> String {
        srt_codec::serialize(&self.transcript_to_cues(segments))
    }

    /// Re-segment the content of one SRT file into width-bounded, retimed
    /// cues and serialize the result.
    ///
    /// Strict parsing runs first; when it yields nothing usable the repair
    /// fallback is attempted. Only zero surviving entries is fatal.
    pub fn split_srt_content(&self, raw: &str, language: &str) -> Result<String, SubtitleError> {
        let content = srt_codec::normalize_line_endings(raw);

        let mut entries = srt_codec::parse(&content);
        if entries.is_empty() {
            debug!("Strict parse yielded nothing, attempting repair");
            entries = srt_codec::repair(&content);
        }
        if entries.is_empty() {
            return Err(SubtitleError::EmptyResult(
                "zero entries after parse and repair".to_string(),
            ));
        }

        let profile = self.registry.lookup(language);
        debug!(
            "Splitting {} entries with profile {:?}",
            entries.len(),
            profile
        );

        let earliest = entries.iter().map(|e| e.start_ms).min().unwrap_or(0);
        entries.sort_by_key(|e| e.start_ms);

        let mut cues: Vec<Cue> = Vec::new();
        for entry in entries {
            let start = timing::shift_origin(entry.start_ms, earliest);
            let end = timing::shift_origin(entry.end_ms, earliest);
            if start == 0 && end == 0 {
                warn!("Skipping entry {} with no usable timing", entry.index);
                continue;
            }

            let text = entry.text.replace('\n', " ");
            let text = TRAILING_PUNCTUATION_REGEX.replace(text.trim(), "");
            if text.trim().is_empty() {
                continue;
            }

            let lines = segmenter::split(&text, &profile, &self.config.preserved_terms);
            if lines.is_empty() {
                continue;
            }

            let spans = timing::even_split(start, end, lines.len());
            for (line, (span_start, span_end)) in lines.into_iter().zip(spans) {
                push_cue(&mut cues, span_start, span_end, line);
            }
        }

        if cues.is_empty() {
            return Err(SubtitleError::EmptyResult(
                "all entries were dropped during segmentation".to_string(),
            ));
        }

        Ok(srt_codec::serialize(&cues))
    }

    /// Process one SRT file on disk: infer the language from the filename
    /// (unless overridden), split, optionally back up the original, write
    /// the `_split` output and remove the source. On any failure the
    /// original file is left untouched.
    pub fn process_file(&self, path: &Path, language: Option<&str>) -> Result<PathBuf> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| anyhow!("Input path has no filename: {:?}", path))?;

        let language = match language {
            Some(code) => code.to_string(),
            None => language::infer_from_filename_or(&filename, &self.config.default_language),
        };
        info!(
            "Processing subtitles for {} ({})",
            language::display_name(&language),
            language
        );

        let raw = FileManager::read_to_string(path)?;
        let split = self
            .split_srt_content(&raw, &language)
            .with_context(|| format!("Failed to split subtitle file: {:?}", path))?;

        if self.config.backup_original {
            let backup = PathBuf::from(format!("{}.original", path.display()));
            FileManager::copy_file(path, &backup)?;
            debug!("Backed up original to {:?}", backup);
        }

        let output = split_output_path(path)?;
        FileManager::write_to_file(&output, &split)?;
        FileManager::remove_file(path)?;

        Ok(output)
    }

    /// Process every `*.srt` file under a directory. Files already carrying
    /// the `_split` marker are skipped; per-file failures are logged and
    /// absorbed. Returns the number of files processed.
    pub fn process_directory(&self, dir: &Path, language: Option<&str>) -> Result<usize> {
        let files = FileManager::find_files(dir, "srt")?;

        let mut processed = 0;
        for file in files {
            if is_split_output(&file) {
                debug!("Skipping already-processed file: {:?}", file);
                continue;
            }

            match self.process_file(&file, language) {
                Ok(output) => {
                    info!("Wrote {:?}", output);
                    processed += 1;
                }
                Err(e) => error!("Error processing {:?}: {}", file, e),
            }
        }

        Ok(processed)
    }
}

/// Append a validated cue; a cue the validator rejects is logged and
/// dropped rather than serialized
fn push_cue(cues: &mut Vec<Cue>, start_ms: u64, end_ms: u64, text: String) {
    match Cue::new_validated(cues.len() + 1, start_ms, end_ms, text) {
        Ok(cue) => cues.push(cue),
        Err(e) => warn!("Dropping invalid cue: {}", e),
    }
}

/// Whether a path already carries the `_split` marker suffix
pub fn is_split_output(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().ends_with(SPLIT_SUFFIX))
        .unwrap_or(false)
}

/// Output path for a processed file: `<stem>_split.srt` next to the source
fn split_output_path(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("Input path has no file stem: {:?}", path))?;

    let filename = format!("{}{}.srt", stem, SPLIT_SUFFIX);
    Ok(path.with_file_name(filename))
}

/// Break text into sentence-like chunks, keeping each terminator attached
/// to the chunk it ends
fn sentence_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if SENTENCE_TERMINATORS.contains(c) {
            if !current.trim().is_empty() {
                chunks.push(current.trim().to_string());
            }
            current.clear();
        }
    }
    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    if chunks.is_empty() && !text.trim().is_empty() {
        chunks.push(text.trim().to_string());
    }
    chunks
}
