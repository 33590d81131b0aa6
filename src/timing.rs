/// Timing allocation for segmented subtitle lines
///
/// Both policies cover `[start_ms, end_ms]` in order, without gaps or
/// overlaps between produced intervals, and every interval satisfies
/// `end > start`.
/// Minimum duration for a fallback cue with no real duration
pub const MIN_CUE_DURATION_MS: u64 = 500;

/// Split an interval evenly across `line_count` cues using floor division.
///
/// The final cue may be shorter than an exact 1/N share; the rounding
/// remainder is intentionally not redistributed. The step is clamped to at
/// least 1 ms so degenerate intervals still produce non-empty cues.
pub fn even_split(start_ms: u64, end_ms: u64, line_count: usize) -> Vec<(u64, u64)> {
    if line_count == 0 {
        return Vec::new();
    }
    let duration = end_ms.saturating_sub(start_ms);
    let step = (duration / line_count as u64).max(1);

    (0..line_count as u64)
        .map(|i| (start_ms + i * step, start_ms + (i + 1) * step))
        .collect()
}

/// Give every chunk an equal share of the interval, regardless of its
/// character length. Used when a segment was broken into sentence-like
/// chunks rather than width-bounded lines.
pub fn proportional_split(start_ms: u64, end_ms: u64, chunk_count: usize) -> Vec<(u64, u64)> {
    if chunk_count == 0 {
        return Vec::new();
    }
    let duration = end_ms.saturating_sub(start_ms) as f64;
    let share = duration / chunk_count as f64;

    let mut spans = Vec::with_capacity(chunk_count);
    let mut prev_end = start_ms;
    for i in 0..chunk_count {
        // A bumped span end pushes the next span's start forward, so
        // degenerate intervals never produce overlapping spans
        let rounded_start = start_ms + (i as f64 * share).round() as u64;
        let span_start = rounded_start.max(prev_end);
        let mut span_end = start_ms + ((i + 1) as f64 * share).round() as u64;
        if span_end <= span_start {
            span_end = span_start + 1;
        }
        prev_end = span_end;
        spans.push((span_start, span_end));
    }
    spans
}

/// Shift a timestamp so output starts at or near zero, clamping negative
/// offsets to zero
pub fn shift_origin(timestamp_ms: u64, earliest_ms: u64) -> u64 {
    timestamp_ms.saturating_sub(earliest_ms)
}

/// Floor a segment's end time so every segment has a usable duration
pub fn enforce_min_duration(start_ms: u64, end_ms: u64) -> u64 {
    if end_ms <= start_ms {
        start_ms + MIN_CUE_DURATION_MS
    } else {
        end_ms
    }
}
