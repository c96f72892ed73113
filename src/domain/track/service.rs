use super::error::TrackBuildError;
use super::model::{SpeechRow, SynthesisWarning, TrackBuildResult, TrackRequest};
use crate::domain::tts::{self, LanguageCode};
use crate::infrastructure::audio::{decode_clip, Mp3Exporter, PcmTrack};
use crate::infrastructure::repositories::SynthesisRepository;
use lingua::LanguageDetector;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Case-insensitive cell values treated as "no cell"
const NULL_TOKENS: &[&str] = &["nan", "none", "null", "n/a"];

/// Hard cap so a malformed upload cannot queue unbounded synthesis calls
const MAX_ROWS: usize = 10_000;

/// Builds one continuous speech track out of word-list rows.
///
/// Rows and cells are processed strictly sequentially: output order must
/// mirror input order and the running track is mutated in place, so there is
/// nothing to parallelize. All per-build state lives on the stack of `build`
/// and is discarded when it returns.
pub struct TrackService {
    tts_repo: Arc<dyn SynthesisRepository>,
    language_detector: LanguageDetector,
    cache: Option<Cache<String, Arc<Vec<u8>>>>,
}

impl TrackService {
    pub fn new(tts_repo: Arc<dyn SynthesisRepository>, cache_enabled: bool) -> Self {
        let language_detector = tts::build_detector();

        // Word lists repeat vocabulary across files, so cache per-cell
        // synthesis results keyed by language + text
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(1000)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            tts_repo,
            language_detector,
            cache,
        }
    }

    /// Assemble and export the track for the given rows.
    ///
    /// Per-cell synthesis failures degrade that cell to silence and are
    /// reported through `TrackBuildResult::warnings`; only configuration
    /// errors (raised before any synthesis) and export failures (raised at
    /// the very end) propagate to the caller.
    ///
    /// `progress` is invoked exactly once per row, including rows that
    /// contribute no audio, with strictly increasing indices. It runs on the
    /// calling task and must not block.
    pub async fn build(
        &self,
        rows: &[SpeechRow],
        request: &TrackRequest,
        mut progress: Option<&mut dyn FnMut(usize, usize)>,
    ) -> Result<TrackBuildResult, TrackBuildError> {
        Self::validate(rows, request)?;

        // Probe the encoder before doing any synthesis work so a missing
        // encoding capability fails fast
        let exporter = Mp3Exporter::new(request.sample_rate).map_err(TrackBuildError::Export)?;

        let total = rows.len();
        let mut track = PcmTrack::new(request.sample_rate);
        let mut primary_emitted = false;
        let mut clips_appended = 0usize;
        let mut warnings: Vec<SynthesisWarning> = Vec::new();

        tracing::info!(
            rows = total,
            pause_ms = request.pause_ms,
            primary_column = request.primary_column,
            primary_lang = %request.primary_lang,
            secondary_lang = %request.secondary_lang,
            "Building speech track"
        );

        for (index, row) in rows.iter().enumerate() {
            let cells = Self::normalize_row(row);
            if cells.is_empty() {
                tracing::debug!(row = index, "Row has no speakable cells");
                if let Some(cb) = progress.as_deref_mut() {
                    cb(index, total);
                }
                continue;
            }

            let primary_cell = cells
                .iter()
                .find(|(position, _)| *position == request.primary_column)
                .cloned();

            if let Some((position, text)) = primary_cell {
                if primary_emitted {
                    track.append_silence_ms(request.pause_ms as u64);
                }
                let lang = self.cell_language(&text, request.primary_lang, request);
                if self
                    .speak_into(&mut track, &mut warnings, index, position, &text, lang)
                    .await
                {
                    clips_appended += 1;
                }
                // The pause slot belongs to the row even when its audio
                // degraded to silence
                primary_emitted = true;
            }

            for (position, text) in &cells {
                if *position == request.primary_column {
                    continue;
                }
                let lang = self.cell_language(text, request.secondary_lang, request);
                if self
                    .speak_into(&mut track, &mut warnings, index, *position, text, lang)
                    .await
                {
                    clips_appended += 1;
                }
            }

            if let Some(cb) = progress.as_deref_mut() {
                cb(index, total);
            }
        }

        let duration_ms = track.duration_ms();
        let audio_data = exporter
            .export(track.samples())
            .map_err(TrackBuildError::Export)?;

        tracing::info!(
            rows = total,
            clips = clips_appended,
            degraded_cells = warnings.len(),
            duration_ms = duration_ms,
            audio_size_bytes = audio_data.len(),
            "Speech track exported"
        );

        Ok(TrackBuildResult {
            audio_data,
            rows_processed: total,
            clips_appended,
            duration_ms,
            warnings,
        })
    }

    fn validate(rows: &[SpeechRow], request: &TrackRequest) -> Result<(), TrackBuildError> {
        if request.pause_ms < 0 {
            return Err(TrackBuildError::InvalidConfig(format!(
                "pause_ms must be non-negative, got {}",
                request.pause_ms
            )));
        }
        if request.sample_rate == 0 {
            return Err(TrackBuildError::InvalidConfig(
                "sample_rate must be positive".to_string(),
            ));
        }
        if rows.len() > MAX_ROWS {
            return Err(TrackBuildError::InvalidConfig(format!(
                "row count {} exceeds the limit of {}",
                rows.len(),
                MAX_ROWS
            )));
        }
        if rows.is_empty() && request.fail_on_empty {
            return Err(TrackBuildError::EmptyInput);
        }
        Ok(())
    }

    /// Normalize a raw row into `(original position, text)` pairs: trim,
    /// collapse internal whitespace, drop blanks and null tokens
    fn normalize_row(row: &SpeechRow) -> Vec<(usize, String)> {
        let whitespace = regex::Regex::new(r"\s+").unwrap();

        row.cells
            .iter()
            .enumerate()
            .filter_map(|(position, cell)| {
                let raw = cell.as_deref()?;
                let text = whitespace.replace_all(raw.trim(), " ").to_string();
                if text.is_empty() || NULL_TOKENS.iter().any(|t| text.eq_ignore_ascii_case(t)) {
                    None
                } else {
                    Some((position, text))
                }
            })
            .collect()
    }

    /// Position-derived tag by default; lingua per-cell detection when the
    /// request opts into it, falling back to the positional tag
    fn cell_language(
        &self,
        text: &str,
        positional: LanguageCode,
        request: &TrackRequest,
    ) -> LanguageCode {
        if !request.auto_detect_languages {
            return positional;
        }
        match tts::detect_language(&self.language_detector, text) {
            Some(detected) => detected,
            None => {
                tracing::debug!(
                    text_preview = %Self::preview(text),
                    fallback = %positional,
                    "Language detection inconclusive"
                );
                positional
            }
        }
    }

    /// Log-safe preview of cell text, truncated on a character boundary
    fn preview(text: &str) -> String {
        text.chars().take(60).collect()
    }

    /// Synthesize one cell and append it to the track. Returns `true` when a
    /// clip was appended; failures are recorded and the cell contributes
    /// nothing.
    async fn speak_into(
        &self,
        track: &mut PcmTrack,
        warnings: &mut Vec<SynthesisWarning>,
        row: usize,
        column: usize,
        text: &str,
        lang: LanguageCode,
    ) -> bool {
        let outcome = match self.fetch_audio(text, lang).await {
            Ok(bytes) => decode_clip(&bytes).and_then(|clip| track.append_clip(clip)),
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(
                    row = row,
                    column = column,
                    lang = %lang,
                    text_preview = %Self::preview(text),
                    reason = %reason,
                    "Cell synthesis failed, degrading to silence"
                );
                warnings.push(SynthesisWarning {
                    row,
                    column,
                    text: text.to_string(),
                    reason,
                });
                false
            }
        }
    }

    /// Fetch intermediate audio bytes for one cell, via the synthesis cache
    /// when enabled
    async fn fetch_audio(&self, text: &str, lang: LanguageCode) -> Result<Arc<Vec<u8>>, String> {
        let key = format!("{}:{}", lang, text);

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key).await {
                tracing::debug!(lang = %lang, text_length = text.len(), "Synthesis cache hit");
                return Ok(hit);
            }
        }

        let bytes = Arc::new(self.tts_repo.synthesize(text, lang).await?);

        if let Some(cache) = &self.cache {
            cache.insert(key, bytes.clone()).await;
        }

        Ok(bytes)
    }
}
