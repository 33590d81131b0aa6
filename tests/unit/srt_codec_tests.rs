/*!
 * Tests for SRT parsing, repair and serialization
 */

use subsplit::srt_codec::{
    self, format_timecode, parse_timecode, try_parse_timecode, Cue,
};

/// Timecodes format with zero-padded fields and a comma separator
#[test]
fn test_formatTimecode_withMilliseconds_shouldProduceSrtForm() {
    assert_eq!(format_timecode(0), "00:00:00,000");
    assert_eq!(format_timecode(5_025_678), "01:23:45,678");
    assert_eq!(format_timecode(59_999), "00:00:59,999");
}

/// Parsing accepts both `,` and `.` millisecond separators
#[test]
fn test_tryParseTimecode_withEitherSeparator_shouldReturnMilliseconds() {
    assert_eq!(try_parse_timecode("01:23:45,678").unwrap(), 5_025_678);
    assert_eq!(try_parse_timecode("01:23:45.678").unwrap(), 5_025_678);
}

/// A full arrow line is tolerated by taking the start timecode
#[test]
fn test_tryParseTimecode_withFullArrowLine_shouldTakeStart() {
    let ms = try_parse_timecode("00:00:01,000 --> 00:00:02,000").unwrap();
    assert_eq!(ms, 1_000);
}

/// Out-of-range fields and garbage are rejected
#[test]
fn test_tryParseTimecode_withMalformedInput_shouldFail() {
    assert!(try_parse_timecode("00:61:00,000").is_err());
    assert!(try_parse_timecode("00:00:61,000").is_err());
    assert!(try_parse_timecode("not a timecode").is_err());
    assert!(try_parse_timecode("00:00:00").is_err());
}

/// Parsing then formatting a well-formed comma timecode reproduces it
/// exactly
#[test]
fn test_parseTimecode_thenFormat_shouldRoundTrip() {
    for timecode in [
        "00:00:00,000",
        "00:00:59,999",
        "00:01:00,001",
        "01:23:45,678",
        "11:59:59,500",
    ] {
        assert_eq!(format_timecode(parse_timecode(timecode)), timecode);
    }
}

/// The soft-failing variant falls back to 0 instead of aborting
#[test]
fn test_parseTimecode_withMalformedInput_shouldFallBackToZero() {
    assert_eq!(parse_timecode("garbage"), 0);
    assert_eq!(parse_timecode("01:23:45,678"), 5_025_678);
}

/// A well-formed file parses into ordered entries with joined text lines
#[test]
fn test_parse_withWellFormedFile_shouldRecoverAllEntries() {
    let entries = srt_codec::parse(crate::common::sample_srt());

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].index, 1);
    assert_eq!(entries[0].start_ms, 1_000);
    assert_eq!(entries[0].end_ms, 4_000);
    assert_eq!(entries[2].text, "Short one.");
}

/// CRLF line endings are normalized before block parsing
#[test]
fn test_parse_withCrlfLineEndings_shouldStillParse() {
    let raw = "1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n";

    let entries = srt_codec::parse(raw);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Hello");
}

/// A block missing its index line still parses, taking a fallback index
#[test]
fn test_parse_withMissingIndexLine_shouldUseFallbackIndex() {
    let raw = "00:00:01,000 --> 00:00:02,000\nHello\n";

    let entries = srt_codec::parse(raw);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].index, 1);
}

/// Multi-line block text joins with embedded newlines
#[test]
fn test_parse_withMultiLineText_shouldJoinWithNewlines() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nfirst line\nsecond line\n";

    let entries = srt_codec::parse(raw);

    assert_eq!(entries[0].text, "first line\nsecond line");
}

/// Entries with empty text are skipped, never fatal
#[test]
fn test_parse_withEmptyTextEntry_shouldSkipIt() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\n\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n";

    let entries = srt_codec::parse(raw);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Kept");
}

/// A blob whose second block has no spaces around the arrow fails strict
/// parsing but repairs into both entries, renumbered from 1
#[test]
fn test_repair_withTightArrowBlock_shouldRecoverBothEntries() {
    let raw = "1\n00:00:01,000 --> 00:00:02,500\nHello\n\n00:00:03.000-->00:00:04.000\nWorld\n";

    let entries = srt_codec::repair(raw);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].index, 1);
    assert_eq!(entries[0].start_ms, 1_000);
    assert_eq!(entries[0].end_ms, 2_500);
    assert_eq!(entries[0].text, "Hello");
    assert_eq!(entries[1].index, 2);
    assert_eq!(entries[1].start_ms, 3_000);
    assert_eq!(entries[1].end_ms, 4_000);
    assert_eq!(entries[1].text, "World");
}

/// Repair collapses newline runs inside recovered body text
#[test]
fn test_repair_withNewlineRunsInBody_shouldCollapseThem() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nline one\n\n\nline two\n";

    let entries = srt_codec::repair(raw);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "line one\nline two");
}

/// Repair of a blob with no recoverable headers yields nothing
#[test]
fn test_repair_withNoHeaders_shouldReturnEmpty() {
    assert!(srt_codec::repair("just some prose, no timecodes").is_empty());
}

/// Serialization renumbers from 1 regardless of incoming indices
#[test]
fn test_serialize_withArbitraryIndices_shouldRenumberFromOne() {
    let cues = vec![
        Cue::new(7, 0, 1_000, "first".to_string()),
        Cue::new(42, 1_000, 2_000, "second".to_string()),
    ];

    let output = srt_codec::serialize(&cues);

    assert_eq!(
        output,
        "1\n00:00:00,000 --> 00:00:01,000\nfirst\n\n2\n00:00:01,000 --> 00:00:02,000\nsecond\n"
    );
}

/// Serializing no cues produces an empty string
#[test]
fn test_serialize_withNoCues_shouldReturnEmptyString() {
    assert_eq!(srt_codec::serialize(&[]), "");
}

/// Serialized output round-trips through the strict parser
#[test]
fn test_serialize_thenParse_shouldRoundTrip() {
    let cues = vec![
        Cue::new(1, 500, 1_500, "alpha".to_string()),
        Cue::new(2, 1_500, 3_000, "beta".to_string()),
    ];

    let entries = srt_codec::parse(&srt_codec::serialize(&cues));

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].start_ms, 500);
    assert_eq!(entries[1].text, "beta");
}

/// Validated construction rejects collapsed ranges and blank text
#[test]
fn test_newValidated_withBadInput_shouldFail() {
    assert!(Cue::new_validated(1, 1_000, 1_000, "text".to_string()).is_err());
    assert!(Cue::new_validated(1, 2_000, 1_000, "text".to_string()).is_err());
    assert!(Cue::new_validated(1, 0, 1_000, "   ".to_string()).is_err());
    assert!(Cue::new_validated(1, 0, 1_000, "ok".to_string()).is_ok());
}
