use std::fmt;
use anyhow::{Result, anyhow};
use log::debug;

// @module: Caption segment model and gap-based merging

/// One timestamped caption unit as produced by the ASR/MT collaborators.
///
/// Times are floating-point seconds from the start of the media. A segment is
/// only ever constructed through [`Segment::new_validated`] when crossing the
/// collaborator boundary, so downstream code can rely on `start_seconds >= 0`,
/// `end_seconds > start_seconds` and non-blank text.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    // @field: Start of the display window, seconds
    pub start_seconds: f64,

    // @field: End of the display window, seconds
    pub end_seconds: f64,

    // @field: Caption text
    pub text: String,
}

impl Segment {
    /// Creates a segment without validation - used by tests and internal callers
    /// that already hold validated data
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Segment {
            start_seconds,
            end_seconds,
            text: text.into(),
        }
    }

    // @creates: Validated segment
    // @validates: Time window and non-blank text
    pub fn new_validated(start_seconds: f64, end_seconds: f64, text: String) -> Result<Self> {
        if !start_seconds.is_finite() || !end_seconds.is_finite() {
            return Err(anyhow!(
                "Non-finite segment times: start {} end {}",
                start_seconds, end_seconds
            ));
        }

        if start_seconds < 0.0 {
            return Err(anyhow!("Negative segment start time: {}", start_seconds));
        }

        if end_seconds <= start_seconds {
            return Err(anyhow!(
                "Invalid time window: end {} <= start {}",
                end_seconds, start_seconds
            ));
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Empty segment text at {}s", start_seconds));
        }

        Ok(Segment {
            start_seconds,
            end_seconds,
            text: trimmed.to_string(),
        })
    }

    /// Display duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:.3}s - {:.3}s] {}",
            self.start_seconds, self.end_seconds, self.text
        )
    }
}

/// Ordered, non-overlapping sequence of segments ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct CaptionTrack {
    segments: Vec<Segment>,
}

impl CaptionTrack {
    /// Build a track from collaborator output, enforcing the ordering contract.
    ///
    /// Segments must be monotonically non-decreasing in start time and must
    /// not overlap (exact abutment is tolerated). Out-of-order input is a
    /// contract violation the caller must avoid, so it is rejected here
    /// rather than silently reordered.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self> {
        for window in segments.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if next.start_seconds < prev.start_seconds {
                return Err(anyhow!(
                    "Out-of-order segments: {} before {}",
                    next.start_seconds, prev.start_seconds
                ));
            }
            if next.start_seconds < prev.end_seconds {
                return Err(anyhow!(
                    "Overlapping segments: [{} - {}] then [{} - {}]",
                    prev.start_seconds, prev.end_seconds,
                    next.start_seconds, next.end_seconds
                ));
            }
        }

        Ok(CaptionTrack { segments })
    }

    /// Track with no captions; valid input for the SRT writer, invalid for a burn job
    pub fn empty() -> Self {
        CaptionTrack { segments: Vec::new() }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Merged copy of this track, see [`merge_segments`]
    pub fn merged(&self, max_gap_seconds: f64) -> CaptionTrack {
        CaptionTrack {
            segments: merge_segments(&self.segments, max_gap_seconds),
        }
    }
}

/// Coalesce adjacent segments whose silence gap is at most `max_gap_seconds`.
///
/// Walks the input once with a single accumulator: a segment whose start is
/// within the gap threshold of the accumulator's end extends it (texts joined
/// with a single space), anything further away flushes the accumulator and
/// starts a new one. Blank and whitespace-only segments are dropped up front
/// so no blank caption is ever emitted.
///
/// Pure function. The output never contains overlapping segments, and merging
/// an already-merged sequence with the same gap is a no-op.
pub fn merge_segments(segments: &[Segment], max_gap_seconds: f64) -> Vec<Segment> {
    let mut input = segments
        .iter()
        .filter(|s| !s.text.trim().is_empty());

    let Some(first) = input.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    let mut accumulator = first.clone();

    for segment in input {
        if segment.start_seconds - accumulator.end_seconds <= max_gap_seconds {
            accumulator.end_seconds = segment.end_seconds;
            accumulator.text.push(' ');
            accumulator.text.push_str(&segment.text);
        } else {
            merged.push(accumulator);
            accumulator = segment.clone();
        }
    }
    merged.push(accumulator);

    debug!(
        "Merged {} segments into {} captions (max gap {}s)",
        segments.len(), merged.len(), max_gap_seconds
    );

    merged
}
