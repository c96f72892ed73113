use crate::domain::tts::LanguageCode;
use async_trait::async_trait;

/// Repository for per-cell speech synthesis.
/// Abstracts the underlying TTS provider (Google Translate, AWS Polly,
/// OpenAI, ...).
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Selecting a provider-specific voice for the requested language
/// - Bounding every outbound request with a finite timeout so one stuck
///   cell cannot block a whole build
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Synthesize one cell's text in the given language.
    ///
    /// Returns audio bytes in an intermediate container format (MP3 or WAV)
    /// that the track builder decodes before appending.
    ///
    /// # Errors
    /// Returns an error string when synthesis fails or the provider is
    /// unavailable. The track builder treats this as a per-cell failure and
    /// degrades the cell to silence.
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String>;
}
