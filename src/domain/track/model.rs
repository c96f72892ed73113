use crate::domain::tts::LanguageCode;
use serde::{Deserialize, Serialize};

/// One word-list row: an ordered sequence of optional text cells.
///
/// Cell positions are significant — the primary column is addressed by its
/// position in the raw row, so missing cells are kept as `None` rather than
/// compacted away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRow {
    pub cells: Vec<Option<String>>,
}

impl SpeechRow {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Convenience constructor for rows where every cell is present
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(|t| Some(t.into())).collect(),
        }
    }
}

/// Parameters for one track build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRequest {
    /// Silence inserted before every primary-language clip except the first
    /// across the whole job. Signed so out-of-range caller input is rejected
    /// with a validation error instead of wrapping.
    pub pause_ms: i64,
    /// Position of the primary-language cell within each raw row
    pub primary_column: usize,
    pub primary_lang: LanguageCode,
    pub secondary_lang: LanguageCode,
    /// When set, per-cell language detection overrides the column convention
    pub auto_detect_languages: bool,
    /// When set, an empty `rows` input is an error instead of an empty track
    pub fail_on_empty: bool,
    /// Sample rate of the accumulated track and the exported MP3
    pub sample_rate: u32,
}

impl Default for TrackRequest {
    fn default() -> Self {
        Self {
            pause_ms: 500,
            primary_column: 0,
            primary_lang: LanguageCode::Russian,
            secondary_lang: LanguageCode::German,
            auto_detect_languages: false,
            fail_on_empty: false,
            sample_rate: 24_000,
        }
    }
}

/// A cell whose synthesis degraded to silence instead of aborting the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisWarning {
    pub row: usize,
    pub column: usize,
    pub text: String,
    pub reason: String,
}

/// Finished track plus build metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackBuildResult {
    /// MP3 bytes at 128 kbit/s, ready for playback or download
    pub audio_data: Vec<u8>,
    pub rows_processed: usize,
    pub clips_appended: usize,
    pub duration_ms: u64,
    pub warnings: Vec<SynthesisWarning>,
}
