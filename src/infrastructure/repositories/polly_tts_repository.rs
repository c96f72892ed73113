use super::tts_repository::SynthesisRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request. Word-list cells are
/// short phrases, so anything beyond the limit is rejected rather than
/// batched.
const MAX_TEXT_LEN: usize = 3000;

/// AWS Polly implementation of the synthesis repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the appropriate Polly voice for a language
    fn voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::English => "Joanna",
            LanguageCode::Spanish => "Lupe",
            LanguageCode::French => "Lea",
            LanguageCode::German => "Vicki",
            LanguageCode::Italian => "Bianca",
            LanguageCode::Portuguese => "Ines",
            LanguageCode::Russian => "Tatyana",
        }
    }

    /// Polly has no neural Russian voice; Tatyana is standard-engine only
    fn engine_for_voice(voice: &str) -> Engine {
        match voice {
            "Tatyana" => Engine::Standard,
            _ => Engine::Neural,
        }
    }
}

#[async_trait]
impl SynthesisRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if text.len() > MAX_TEXT_LEN {
            return Err(format!(
                "cell text of {} bytes exceeds the Polly limit of {}",
                text.len(),
                MAX_TEXT_LEN
            ));
        }

        let start_time = std::time::Instant::now();
        let voice_name = Self::voice_for_language(language);
        let voice_id = VoiceId::from(voice_name);
        let engine = Self::engine_for_voice(voice_name);

        tracing::debug!(
            language = %language,
            voice = voice_name,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let voice_id_for_error = voice_id.clone();
        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    language = %language,
                    voice_id = ?voice_id_for_error,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("failed to read audio stream: {}", e)
        })?;
        let audio_data = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            language = %language,
            voice = voice_name,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_voice() {
        let languages = [
            LanguageCode::English,
            LanguageCode::Spanish,
            LanguageCode::French,
            LanguageCode::German,
            LanguageCode::Italian,
            LanguageCode::Portuguese,
            LanguageCode::Russian,
        ];
        for language in languages {
            assert!(!PollyTtsRepository::voice_for_language(language).is_empty());
        }
    }

    #[test]
    fn test_russian_uses_standard_engine() {
        let voice = PollyTtsRepository::voice_for_language(LanguageCode::Russian);
        assert_eq!(voice, "Tatyana");
        assert_eq!(
            PollyTtsRepository::engine_for_voice(voice),
            Engine::Standard
        );
    }

    #[test]
    fn test_other_voices_use_neural_engine() {
        let voice = PollyTtsRepository::voice_for_language(LanguageCode::German);
        assert_eq!(PollyTtsRepository::engine_for_voice(voice), Engine::Neural);
    }
}
