//! Subtitle Engine
//!
//! Stateless editing operations over an ordered collection of cues.
//! Every method takes the current cue collection and returns a new one;
//! the input is never mutated. Invalid requests (unknown ids, split
//! points outside the cue, merges that resolve to fewer than two cues)
//! return the input unchanged rather than failing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{
    cues::{CueInit, CuePatch, SubtitleCue, SubtitleWord},
    is_valid_time_sec, CueId, TimeSec, MAX_CUE_TEXT_LEN, MIN_CUE_DURATION,
};

// =============================================================================
// Text Sanitation
// =============================================================================

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Sanitizes cue text: strips `<script>` blocks, then any remaining HTML
/// tags, then truncates to [`MAX_CUE_TEXT_LEN`] characters.
pub fn sanitize_cue_text(text: &str) -> String {
    let no_scripts = SCRIPT_BLOCK_RE.replace_all(text, "");
    let no_tags = HTML_TAG_RE.replace_all(&no_scripts, "");
    if no_tags.chars().count() > MAX_CUE_TEXT_LEN {
        no_tags.chars().take(MAX_CUE_TEXT_LEN).collect()
    } else {
        no_tags.into_owned()
    }
}

// =============================================================================
// Id Generation
// =============================================================================

/// Source of fresh cue ids.
///
/// Injected into [`SubtitleEngine`] so tests can use deterministic ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> CueId;
}

/// Default id generator producing ULID strings
#[derive(Clone, Copy, Debug, Default)]
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn next_id(&self) -> CueId {
        ulid::Ulid::new().to_string()
    }
}

// =============================================================================
// Gap Record
// =============================================================================

/// A silence between two adjacent cues (in start-time order)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueGap {
    /// Id of the cue the gap follows
    pub after_cue_id: CueId,
    /// Gap length in seconds
    pub gap_seconds: TimeSec,
}

// =============================================================================
// Subtitle Engine
// =============================================================================

/// Pure cue-collection editor.
///
/// Holds only the injected id generator; all operations are functions of
/// their inputs.
pub struct SubtitleEngine {
    ids: Box<dyn IdGenerator>,
}

impl SubtitleEngine {
    /// Creates an engine with the default ULID id generator
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UlidGenerator))
    }

    /// Creates an engine with a custom id generator
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Generates a fresh cue id
    pub fn next_id(&self) -> CueId {
        self.ids.next_id()
    }

    /// Adds a new cue built from `init`, appended at the end (no auto-sort).
    ///
    /// The start time is clamped to >= 0, the end time to at least
    /// `start + MIN_CUE_DURATION`, and the text is sanitized.
    pub fn add_cue(&self, cues: &[SubtitleCue], init: CueInit) -> Vec<SubtitleCue> {
        let mut result = cues.to_vec();
        result.push(self.build_cue(init));
        result
    }

    /// Builds a normalized cue from `init` with a fresh id, without
    /// inserting it anywhere.
    pub fn build_cue(&self, init: CueInit) -> SubtitleCue {
        let start_time = if is_valid_time_sec(init.start_time) {
            init.start_time
        } else {
            0.0
        };
        let end_time = if init.end_time.is_finite() {
            init.end_time.max(start_time + MIN_CUE_DURATION)
        } else {
            start_time + MIN_CUE_DURATION
        };

        SubtitleCue {
            id: self.ids.next_id(),
            start_time,
            end_time,
            text: sanitize_cue_text(&init.text),
            words: init.words,
            animation_style: init.animation_style,
        }
    }

    /// Removes the cue with the given id; no-op if the id is absent.
    pub fn remove_cue(&self, cues: &[SubtitleCue], id: &str) -> Vec<SubtitleCue> {
        cues.iter().filter(|c| c.id != id).cloned().collect()
    }

    /// Merges `patch` into the cue with the given id; no-op if absent.
    ///
    /// Text is re-sanitized when provided. The end time is re-clamped so
    /// the cue keeps its minimum duration relative to the (possibly new)
    /// start time.
    pub fn update_cue(&self, cues: &[SubtitleCue], id: &str, patch: &CuePatch) -> Vec<SubtitleCue> {
        cues.iter()
            .map(|cue| {
                if cue.id != id {
                    return cue.clone();
                }

                let start_time = match patch.start_time {
                    Some(s) if is_valid_time_sec(s) => s,
                    Some(_) => cue.start_time,
                    None => cue.start_time,
                };
                let end_time = match patch.end_time {
                    Some(e) if e.is_finite() => e,
                    _ => cue.end_time,
                }
                .max(start_time + MIN_CUE_DURATION);

                SubtitleCue {
                    id: cue.id.clone(),
                    start_time,
                    end_time,
                    text: match &patch.text {
                        Some(text) => sanitize_cue_text(text),
                        None => cue.text.clone(),
                    },
                    words: match &patch.words {
                        Some(words) => words.clone(),
                        None => cue.words.clone(),
                    },
                    animation_style: match &patch.animation_style {
                        Some(style) => *style,
                        None => cue.animation_style,
                    },
                }
            })
            .collect()
    }

    /// Returns the cues stably sorted by start time, ascending.
    pub fn sort_cues(&self, cues: &[SubtitleCue]) -> Vec<SubtitleCue> {
        let mut sorted = cues.to_vec();
        sorted.sort_by(|a, b| {
            a.start_time
                .partial_cmp(&b.start_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Returns all cues visible at the given time.
    ///
    /// Start-inclusive, end-exclusive; overlapping cues all match.
    pub fn cues_at_time<'a>(&self, cues: &'a [SubtitleCue], time_sec: TimeSec) -> Vec<&'a SubtitleCue> {
        cues.iter().filter(|c| c.is_visible_at(time_sec)).collect()
    }

    /// Returns every overlapping pair of cue ids.
    ///
    /// Touching cues (one's end equals the next one's start) do not
    /// overlap. Pairs are reported in start-time order.
    pub fn overlaps(&self, cues: &[SubtitleCue]) -> Vec<(CueId, CueId)> {
        let sorted = self.sort_cues(cues);
        let mut pairs = Vec::new();
        for i in 0..sorted.len() {
            for later in &sorted[i + 1..] {
                // Sorted by start, so the first non-overlapping later cue
                // ends the sweep for this cue.
                if later.start_time >= sorted[i].end_time {
                    break;
                }
                pairs.push((sorted[i].id.clone(), later.id.clone()));
            }
        }
        pairs
    }

    /// Returns the gaps of at least `min_gap` seconds between adjacent
    /// cues in start-time order.
    pub fn gaps(&self, cues: &[SubtitleCue], min_gap: TimeSec) -> Vec<CueGap> {
        let sorted = self.sort_cues(cues);
        sorted
            .windows(2)
            .filter_map(|pair| {
                let gap = pair[1].start_time - pair[0].end_time;
                if gap >= min_gap {
                    Some(CueGap {
                        after_cue_id: pair[0].id.clone(),
                        gap_seconds: gap,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Splits a cue at `at_time` into two adjacent cues.
    ///
    /// No-op unless `start_time < at_time < end_time`. The first half
    /// keeps the original id; the second half gets a fresh id. When the
    /// cue carries word timing, words are partitioned around the split
    /// point and each half's text is rebuilt from its words; otherwise
    /// both halves keep the original text verbatim.
    pub fn split_cue(&self, cues: &[SubtitleCue], id: &str, at_time: TimeSec) -> Vec<SubtitleCue> {
        let Some(index) = cues.iter().position(|c| c.id == id) else {
            return cues.to_vec();
        };
        let cue = &cues[index];
        if !at_time.is_finite() || at_time <= cue.start_time || at_time >= cue.end_time {
            return cues.to_vec();
        }

        let (first_words, second_words, first_text, second_text) = match &cue.words {
            Some(words) => {
                let first: Vec<SubtitleWord> = words
                    .iter()
                    .filter(|w| w.end_time <= at_time)
                    .cloned()
                    .collect();
                let second: Vec<SubtitleWord> = words
                    .iter()
                    .filter(|w| w.start_time >= at_time)
                    .cloned()
                    .collect();
                let first_text = join_word_texts(&first);
                let second_text = join_word_texts(&second);
                (Some(first), Some(second), first_text, second_text)
            }
            None => (None, None, cue.text.clone(), cue.text.clone()),
        };

        let first = SubtitleCue {
            id: cue.id.clone(),
            start_time: cue.start_time,
            end_time: at_time,
            text: first_text,
            words: first_words,
            animation_style: cue.animation_style,
        };
        let second = SubtitleCue {
            id: self.ids.next_id(),
            start_time: at_time,
            end_time: cue.end_time,
            text: second_text,
            words: second_words,
            animation_style: cue.animation_style,
        };

        let mut result = cues.to_vec();
        result[index] = first;
        result.insert(index + 1, second);
        result
    }

    /// Merges the cues named by `ids` into one.
    ///
    /// No-op if fewer than two of the ids resolve. The result keeps the
    /// first listed (resolved) id, spans the min/max time envelope, joins
    /// the texts in start-time order, concatenates word timing in start
    /// order, and inherits the earliest cue's animation style. Untouched
    /// cues are preserved in place.
    pub fn merge_cues(&self, cues: &[SubtitleCue], ids: &[CueId]) -> Vec<SubtitleCue> {
        let mut merge_indices: Vec<usize> = Vec::new();
        for id in ids {
            if let Some(index) = cues.iter().position(|c| &c.id == id) {
                if !merge_indices.contains(&index) {
                    merge_indices.push(index);
                }
            }
        }
        if merge_indices.len() < 2 {
            return cues.to_vec();
        }

        let kept_index = merge_indices[0];
        let kept_id = cues[kept_index].id.clone();

        let mut sources: Vec<&SubtitleCue> = merge_indices.iter().map(|&i| &cues[i]).collect();
        sources.sort_by(|a, b| {
            a.start_time
                .partial_cmp(&b.start_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let start_time = sources
            .iter()
            .map(|c| c.start_time)
            .fold(f64::INFINITY, f64::min);
        let end_time = sources
            .iter()
            .map(|c| c.end_time)
            .fold(f64::NEG_INFINITY, f64::max);

        let text = sanitize_cue_text(
            &sources
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        );

        let has_words = sources.iter().any(|c| c.words.is_some());
        let words = if has_words {
            Some(
                sources
                    .iter()
                    .flat_map(|c| c.words.clone().unwrap_or_default())
                    .collect(),
            )
        } else {
            None
        };

        let merged = SubtitleCue {
            id: kept_id,
            start_time,
            end_time,
            text,
            words,
            animation_style: sources[0].animation_style,
        };

        cues.iter()
            .enumerate()
            .filter_map(|(index, cue)| {
                if index == kept_index {
                    Some(merged.clone())
                } else if merge_indices.contains(&index) {
                    None
                } else {
                    Some(cue.clone())
                }
            })
            .collect()
    }

    /// Shifts the named cues by `delta_seconds`.
    ///
    /// Start times clamp to >= 0 and end times to >= MIN_CUE_DURATION,
    /// independently, so a large negative shift compresses a cue against
    /// zero instead of producing negative times. Word timings shift with
    /// the cue.
    pub fn shift_cues(
        &self,
        cues: &[SubtitleCue],
        ids: &[CueId],
        delta_seconds: TimeSec,
    ) -> Vec<SubtitleCue> {
        if !delta_seconds.is_finite() {
            return cues.to_vec();
        }
        cues.iter()
            .map(|cue| {
                if !ids.contains(&cue.id) {
                    return cue.clone();
                }
                SubtitleCue {
                    id: cue.id.clone(),
                    start_time: (cue.start_time + delta_seconds).max(0.0),
                    end_time: (cue.end_time + delta_seconds).max(MIN_CUE_DURATION),
                    text: cue.text.clone(),
                    words: cue.words.as_ref().map(|words| {
                        words
                            .iter()
                            .map(|w| SubtitleWord {
                                text: w.text.clone(),
                                start_time: (w.start_time + delta_seconds).max(0.0),
                                end_time: (w.end_time + delta_seconds).max(0.0),
                            })
                            .collect()
                    }),
                    animation_style: cue.animation_style,
                }
            })
            .collect()
    }
}

impl Default for SubtitleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn join_word_texts(words: &[SubtitleWord]) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Transcription Intake
// =============================================================================

/// Groups word-level transcription timestamps into initial cues.
///
/// A new cue starts whenever the silence before a word reaches `max_gap`
/// or the current cue already holds `max_words` words. This conversion
/// sits outside the action path: the returned cues are ready to be set
/// as a project's initial state.
pub fn cues_from_words(
    engine: &SubtitleEngine,
    words: &[SubtitleWord],
    max_words: usize,
    max_gap: TimeSec,
) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();
    let mut group: Vec<SubtitleWord> = Vec::new();

    let flush = |group: &mut Vec<SubtitleWord>, cues: &mut Vec<SubtitleCue>| {
        if group.is_empty() {
            return;
        }
        let start_time = group[0].start_time;
        let end_time = group.last().map(|w| w.end_time).unwrap_or(start_time);
        let text = join_word_texts(group);
        let init = CueInit::new(start_time, end_time, &text).with_words(std::mem::take(group));
        cues.push(engine.build_cue(init));
    };

    for word in words {
        let breaks_run = match group.last() {
            Some(prev) => {
                group.len() >= max_words.max(1) || word.start_time - prev.end_time >= max_gap
            }
            None => false,
        };
        if breaks_run {
            flush(&mut group, &mut cues);
        }
        group.push(word.clone());
    }
    flush(&mut group, &mut cues);

    cues
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cues::AnimationStyle;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Deterministic id generator for tests
    struct SequentialGenerator(AtomicU64);

    impl IdGenerator for SequentialGenerator {
        fn next_id(&self) -> CueId {
            format!("cue_{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn test_engine() -> SubtitleEngine {
        SubtitleEngine::with_id_generator(Box::new(SequentialGenerator(AtomicU64::new(0))))
    }

    fn cue(id: &str, start: f64, end: f64, text: &str) -> SubtitleCue {
        SubtitleCue::new(id, start, end, text)
    }

    // -------------------------------------------------------------------------
    // Text Sanitation
    // -------------------------------------------------------------------------

    #[test]
    fn test_sanitize_strips_script_blocks() {
        let text = "Hello <script type=\"text/javascript\">alert('x')</script>World";
        assert_eq!(sanitize_cue_text(text), "Hello World");
    }

    #[test]
    fn test_sanitize_strips_remaining_tags() {
        assert_eq!(sanitize_cue_text("<b>Bold</b> and <i>italic</i>"), "Bold and italic");
    }

    #[test]
    fn test_sanitize_truncates_at_500_chars() {
        let long = "x".repeat(600);
        assert_eq!(sanitize_cue_text(&long).chars().count(), 500);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(600);
        let sanitized = sanitize_cue_text(&long);
        assert_eq!(sanitized.chars().count(), 500);
        assert!(sanitized.chars().all(|c| c == 'é'));
    }

    // -------------------------------------------------------------------------
    // Add / Remove / Update
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_cue_clamps_times() {
        let engine = test_engine();
        let cues = engine.add_cue(&[], CueInit::new(-5.0, -4.0, "test"));

        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].start_time, 0.0);
        assert_eq!(cues[0].end_time, MIN_CUE_DURATION);
    }

    #[test]
    fn test_add_cue_enforces_min_duration() {
        let engine = test_engine();
        let cues = engine.add_cue(&[], CueInit::new(2.0, 2.0, "test"));
        assert_eq!(cues[0].end_time, 2.0 + MIN_CUE_DURATION);
    }

    #[test]
    fn test_add_cue_appends_without_sorting() {
        let engine = test_engine();
        let cues = engine.add_cue(&[], CueInit::new(10.0, 12.0, "late"));
        let cues = engine.add_cue(&cues, CueInit::new(0.0, 2.0, "early"));

        assert_eq!(cues[0].text, "late");
        assert_eq!(cues[1].text, "early");
    }

    #[test]
    fn test_add_cue_sanitizes_text() {
        let engine = test_engine();
        let cues = engine.add_cue(&[], CueInit::new(0.0, 2.0, "<b>hi</b>"));
        assert_eq!(cues[0].text, "hi");
    }

    #[test]
    fn test_remove_cue() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 1.0, "A"), cue("b", 1.0, 2.0, "B")];

        let result = engine.remove_cue(&cues, "a");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");

        // Unknown id is a no-op
        let result = engine.remove_cue(&cues, "zzz");
        assert_eq!(result, cues);
    }

    #[test]
    fn test_update_cue_merges_patch() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 3.0, "old")];

        let patch = CuePatch::default().with_text("new <i>text</i>");
        let result = engine.update_cue(&cues, "a", &patch);

        assert_eq!(result[0].text, "new text");
        assert_eq!(result[0].start_time, 1.0);
        assert_eq!(result[0].end_time, 3.0);
    }

    #[test]
    fn test_update_cue_reclamps_end_for_new_start() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 3.0, "x")];

        // Move the start past the old end; the end must follow
        let patch = CuePatch::default().with_time_range(Some(5.0), None);
        let result = engine.update_cue(&cues, "a", &patch);

        assert_eq!(result[0].start_time, 5.0);
        assert_eq!(result[0].end_time, 5.0 + MIN_CUE_DURATION);
    }

    #[test]
    fn test_update_cue_unknown_id_is_noop() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 3.0, "x")];
        let result = engine.update_cue(&cues, "nope", &CuePatch::default().with_text("y"));
        assert_eq!(result, cues);
    }

    #[test]
    fn test_update_cue_can_clear_words() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 2.0, "hi").with_words(vec![SubtitleWord::new("hi", 0.0, 2.0)])];

        let result = engine.update_cue(&cues, "a", &CuePatch::default().with_words(None));
        assert!(result[0].words.is_none());
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[test]
    fn test_cues_at_time_boundaries() {
        let engine = test_engine();
        let cues = vec![cue("a", 5.0, 10.0, "A")];

        assert_eq!(engine.cues_at_time(&cues, 5.0).len(), 1);
        assert_eq!(engine.cues_at_time(&cues, 9.999).len(), 1);
        assert!(engine.cues_at_time(&cues, 10.0).is_empty());
        assert!(engine.cues_at_time(&cues, 4.999).is_empty());
    }

    #[test]
    fn test_cues_at_time_returns_all_overlapping() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 5.0, "A"), cue("b", 2.0, 8.0, "B")];
        assert_eq!(engine.cues_at_time(&cues, 3.0).len(), 2);
    }

    #[test]
    fn test_sort_cues_is_stable_and_nonmutating() {
        let engine = test_engine();
        let cues = vec![
            cue("b", 5.0, 6.0, "B"),
            cue("a", 0.0, 1.0, "A"),
            cue("c", 5.0, 7.0, "C"),
        ];
        let sorted = engine.sort_cues(&cues);

        assert_eq!(sorted[0].id, "a");
        // Equal start times keep their relative order
        assert_eq!(sorted[1].id, "b");
        assert_eq!(sorted[2].id, "c");
        // Input untouched
        assert_eq!(cues[0].id, "b");
    }

    #[test]
    fn test_overlaps_touching_cues_do_not_overlap() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 5.0, "A"), cue("b", 5.0, 10.0, "B")];
        assert!(engine.overlaps(&cues).is_empty());
    }

    #[test]
    fn test_overlaps_detects_pairs_beyond_adjacent() {
        let engine = test_engine();
        let cues = vec![
            cue("a", 0.0, 10.0, "A"),
            cue("b", 1.0, 2.0, "B"),
            cue("c", 3.0, 4.0, "C"),
            cue("d", 11.0, 12.0, "D"),
        ];
        let pairs = engine.overlaps(&cues);

        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("a".to_string(), "b".to_string())));
        assert!(pairs.contains(&("a".to_string(), "c".to_string())));
    }

    #[test]
    fn test_gaps() {
        let engine = test_engine();
        let cues = vec![
            cue("a", 0.0, 2.0, "A"),
            cue("b", 5.0, 6.0, "B"),
            cue("c", 6.2, 7.0, "C"),
        ];
        let gaps = engine.gaps(&cues, 1.0);

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].after_cue_id, "a");
        assert!((gaps[0].gap_seconds - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_gaps_ignores_overlapping_pairs() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 5.0, "A"), cue("b", 3.0, 8.0, "B")];
        assert!(engine.gaps(&cues, 0.0).is_empty());
    }

    // -------------------------------------------------------------------------
    // Split
    // -------------------------------------------------------------------------

    #[test]
    fn test_split_cue_without_words_duplicates_text() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 4.0, "hello world")];
        let result = engine.split_cue(&cues, "a", 2.0);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "a");
        assert_eq!(result[0].start_time, 0.0);
        assert_eq!(result[0].end_time, 2.0);
        assert_eq!(result[0].text, "hello world");
        assert_ne!(result[1].id, "a");
        assert_eq!(result[1].start_time, 2.0);
        assert_eq!(result[1].end_time, 4.0);
        assert_eq!(result[1].text, "hello world");
    }

    #[test]
    fn test_split_cue_partitions_words() {
        let engine = test_engine();
        let words = vec![
            SubtitleWord::new("Hello", 0.0, 1.0),
            SubtitleWord::new("beautiful", 1.0, 2.0),
            SubtitleWord::new("world", 2.0, 3.0),
        ];
        let cues = vec![cue("a", 0.0, 3.0, "Hello beautiful world").with_words(words)];

        let result = engine.split_cue(&cues, "a", 2.0);

        assert_eq!(result[0].text, "Hello beautiful");
        assert_eq!(result[0].words.as_ref().unwrap().len(), 2);
        assert_eq!(result[1].text, "world");
        assert_eq!(result[1].words.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_split_cue_out_of_range_is_noop() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 4.0, "x")];

        assert_eq!(engine.split_cue(&cues, "a", 1.0), cues);
        assert_eq!(engine.split_cue(&cues, "a", 4.0), cues);
        assert_eq!(engine.split_cue(&cues, "a", 0.5), cues);
        assert_eq!(engine.split_cue(&cues, "missing", 2.0), cues);
    }

    #[test]
    fn test_split_cue_preserves_surrounding_order() {
        let engine = test_engine();
        let cues = vec![
            cue("a", 0.0, 1.0, "A"),
            cue("b", 1.0, 5.0, "B"),
            cue("c", 5.0, 6.0, "C"),
        ];
        let result = engine.split_cue(&cues, "b", 3.0);

        assert_eq!(result.len(), 4);
        assert_eq!(result[0].id, "a");
        assert_eq!(result[1].id, "b");
        assert_eq!(result[3].id, "c");
    }

    // -------------------------------------------------------------------------
    // Merge
    // -------------------------------------------------------------------------

    #[test]
    fn test_merge_cues_envelope_and_text_order() {
        let engine = test_engine();
        let cues = vec![cue("late", 5.0, 8.0, "world"), cue("early", 0.0, 2.0, "hello")];

        // List order names "late" first; text still joins in start order
        let result = engine.merge_cues(&cues, &["late".to_string(), "early".to_string()]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "late");
        assert_eq!(result[0].start_time, 0.0);
        assert_eq!(result[0].end_time, 8.0);
        assert_eq!(result[0].text, "hello world");
    }

    #[test]
    fn test_merge_cues_inherits_earliest_animation() {
        let engine = test_engine();
        let cues = vec![
            cue("b", 3.0, 4.0, "B").with_animation(AnimationStyle::Bounce),
            cue("a", 0.0, 1.0, "A").with_animation(AnimationStyle::Karaoke),
        ];
        let result = engine.merge_cues(&cues, &["b".to_string(), "a".to_string()]);
        assert_eq!(result[0].animation_style, Some(AnimationStyle::Karaoke));
    }

    #[test]
    fn test_merge_cues_concatenates_words_in_start_order() {
        let engine = test_engine();
        let cues = vec![
            cue("b", 2.0, 4.0, "world").with_words(vec![SubtitleWord::new("world", 2.0, 4.0)]),
            cue("a", 0.0, 2.0, "hello").with_words(vec![SubtitleWord::new("hello", 0.0, 2.0)]),
        ];
        let result = engine.merge_cues(&cues, &["b".to_string(), "a".to_string()]);

        let words = result[0].words.as_ref().unwrap();
        assert_eq!(words[0].text, "hello");
        assert_eq!(words[1].text, "world");
    }

    #[test]
    fn test_merge_cues_preserves_untouched_in_place() {
        let engine = test_engine();
        let cues = vec![
            cue("a", 0.0, 1.0, "A"),
            cue("x", 1.0, 2.0, "X"),
            cue("b", 2.0, 3.0, "B"),
        ];
        let result = engine.merge_cues(&cues, &["a".to_string(), "b".to_string()]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "a");
        assert_eq!(result[1].id, "x");
    }

    #[test]
    fn test_merge_of_split_halves_restores_timed_cue() {
        let engine = test_engine();
        let words = vec![
            SubtitleWord::new("Hello", 0.0, 1.0),
            SubtitleWord::new("world", 2.0, 3.0),
        ];
        let cues = vec![cue("a", 0.0, 3.0, "Hello world").with_words(words)];

        let split = engine.split_cue(&cues, "a", 1.5);
        let second_id = split[1].id.clone();
        let merged = engine.merge_cues(&split, &["a".to_string(), second_id]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "a");
        assert_eq!(merged[0].start_time, 0.0);
        assert_eq!(merged[0].end_time, 3.0);
        assert_eq!(merged[0].text, "Hello world");
        assert_eq!(merged[0].words, cues[0].words);
    }

    #[test]
    fn test_merge_cues_requires_two_resolved_ids() {
        let engine = test_engine();
        let cues = vec![cue("a", 0.0, 1.0, "A")];

        assert_eq!(engine.merge_cues(&cues, &["a".to_string()]), cues);
        assert_eq!(
            engine.merge_cues(&cues, &["a".to_string(), "missing".to_string()]),
            cues
        );
        assert_eq!(
            engine.merge_cues(&cues, &["a".to_string(), "a".to_string()]),
            cues
        );
    }

    // -------------------------------------------------------------------------
    // Shift
    // -------------------------------------------------------------------------

    #[test]
    fn test_shift_cues_only_named_ids() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 2.0, "A"), cue("b", 3.0, 4.0, "B")];
        let result = engine.shift_cues(&cues, &["a".to_string()], 0.5);

        assert_eq!(result[0].start_time, 1.5);
        assert_eq!(result[0].end_time, 2.5);
        assert_eq!(result[1].start_time, 3.0);
    }

    #[test]
    fn test_shift_cues_clamps_independently() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 2.0, "A")];
        let result = engine.shift_cues(&cues, &["a".to_string()], -1.95);

        // Start clamps to 0, end clamps to the minimum duration
        assert_eq!(result[0].start_time, 0.0);
        assert_eq!(result[0].end_time, MIN_CUE_DURATION);
    }

    #[test]
    fn test_shift_cues_moves_word_timing() {
        let engine = test_engine();
        let cues = vec![cue("a", 1.0, 3.0, "hi").with_words(vec![SubtitleWord::new("hi", 1.0, 3.0)])];
        let result = engine.shift_cues(&cues, &["a".to_string()], 2.0);

        let word = &result[0].words.as_ref().unwrap()[0];
        assert_eq!(word.start_time, 3.0);
        assert_eq!(word.end_time, 5.0);
    }

    // -------------------------------------------------------------------------
    // Transcription Intake
    // -------------------------------------------------------------------------

    #[test]
    fn test_cues_from_words_groups_on_gap() {
        let engine = test_engine();
        let words = vec![
            SubtitleWord::new("Hello", 0.0, 0.5),
            SubtitleWord::new("there", 0.6, 1.0),
            SubtitleWord::new("General", 3.0, 3.5),
            SubtitleWord::new("Kenobi", 3.6, 4.0),
        ];
        let cues = cues_from_words(&engine, &words, 8, 1.0);

        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Hello there");
        assert_eq!(cues[0].start_time, 0.0);
        assert_eq!(cues[0].end_time, 1.0);
        assert_eq!(cues[1].text, "General Kenobi");
        assert_eq!(cues[1].words.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_cues_from_words_caps_run_length() {
        let engine = test_engine();
        let words: Vec<SubtitleWord> = (0..5)
            .map(|i| SubtitleWord::new("w", i as f64 * 0.2, i as f64 * 0.2 + 0.1))
            .collect();
        let cues = cues_from_words(&engine, &words, 2, 10.0);

        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].words.as_ref().unwrap().len(), 2);
        assert_eq!(cues[2].words.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_cues_from_words_empty_input() {
        let engine = test_engine();
        assert!(cues_from_words(&engine, &[], 8, 1.0).is_empty());
    }
}
