use super::tts_repository::SynthesisRepository;
use crate::domain::tts::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request; word-list cells are
/// short phrases, so oversize input is rejected rather than batched
const MAX_TEXT_LEN: usize = 4096;

/// OpenAI TTS implementation of the synthesis repository.
/// OpenAI voices are multilingual; the language still picks a voice whose
/// character suits it.
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// Select the appropriate OpenAI voice for a language
    fn voice_for_language(&self, language: LanguageCode) -> String {
        if !self.default_voice.is_empty() {
            return self.default_voice.clone();
        }
        match language {
            LanguageCode::English => "alloy".to_string(),
            LanguageCode::Spanish => "echo".to_string(),
            LanguageCode::French => "nova".to_string(),
            LanguageCode::German => "onyx".to_string(),
            LanguageCode::Italian => "fable".to_string(),
            LanguageCode::Portuguese => "shimmer".to_string(),
            LanguageCode::Russian => "alloy".to_string(),
        }
    }
}

#[async_trait]
impl SynthesisRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if text.len() > MAX_TEXT_LEN {
            return Err(format!(
                "cell text of {} bytes exceeds the OpenAI limit of {}",
                text.len(),
                MAX_TEXT_LEN
            ));
        }

        let start_time = std::time::Instant::now();
        let voice = self.voice_for_language(language);

        tracing::debug!(
            model = %self.model,
            voice = %voice,
            language = %language,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        let voice_enum = match voice.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        };

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice: voice_enum,
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = %voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let audio_data = response.bytes.to_vec();

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = %voice,
            language = %language,
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

    fn repo(default_voice: &str) -> OpenAiTtsRepository {
        OpenAiTtsRepository::new(
            Arc::new(Client::with_config(OpenAIConfig::new())),
            "tts-1".to_string(),
            default_voice.to_string(),
        )
    }

    #[test]
    fn test_voice_map_covers_languages() {
        let repo = repo("");
        assert_eq!(repo.voice_for_language(LanguageCode::German), "onyx");
        assert_eq!(repo.voice_for_language(LanguageCode::Russian), "alloy");
    }

    #[test]
    fn test_configured_voice_overrides_map() {
        let repo = repo("nova");
        assert_eq!(repo.voice_for_language(LanguageCode::German), "nova");
    }
}
