use super::tts_repository::SynthesisRepository;
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use std::time::Duration;

/// The unauthenticated translate endpoint rejects long inputs, so chunk at
/// roughly the limit the web client uses
const MAX_CHUNK_SIZE: usize = 100;

const ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Google Translate TTS implementation of the synthesis repository.
/// Uses the public endpoint the translate web client speaks with; no
/// credentials, MP3 responses.
pub struct GoogleTtsRepository {
    client: reqwest::Client,
}

impl GoogleTtsRepository {
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// Split text into chunks of at most MAX_CHUNK_SIZE characters,
    /// preferring whitespace boundaries; a single oversized token is split
    /// by characters
    fn split_into_chunks(text: &str) -> Vec<String> {
        if text.chars().count() <= MAX_CHUNK_SIZE {
            return vec![text.to_string()];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();

        for token in text.split_whitespace() {
            let token_len = token.chars().count();

            if !current.is_empty() && current.chars().count() + 1 + token_len > MAX_CHUNK_SIZE {
                chunks.push(current.clone());
                current.clear();
            }

            if token_len > MAX_CHUNK_SIZE {
                let chars: Vec<char> = token.chars().collect();
                for piece in chars.chunks(MAX_CHUNK_SIZE) {
                    chunks.push(piece.iter().collect());
                }
                continue;
            }

            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(token);
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    /// Call the translate endpoint for a single chunk
    async fn call_translate_tts(&self, text: &str, lang: &str) -> Result<Vec<u8>, String> {
        let url = format!(
            "{}?ie=UTF-8&client=tw-ob&tl={}&q={}",
            ENDPOINT,
            lang,
            urlencoding::encode(text)
        );

        tracing::debug!(
            lang = lang,
            text_length = text.len(),
            "Calling Google Translate TTS"
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!(error = %e, lang = lang, "Google Translate TTS request failed");
            format!("Google Translate TTS error: {}", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "Google Translate TTS returned status {}",
                status.as_u16()
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read audio response: {}", e))?;

        Ok(bytes.to_vec())
    }

    /// Synthesize chunks in order and merge the MP3 streams
    async fn synthesize_chunks(&self, chunks: &[String], lang: &str) -> Result<Vec<u8>, String> {
        let mut merged_audio = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            tracing::debug!(
                chunk_index = index,
                chunk_size = chunk.len(),
                "Synthesizing chunk"
            );

            let audio_data = self.call_translate_tts(chunk, lang).await?;
            merged_audio.extend(audio_data);
        }

        Ok(merged_audio)
    }
}

#[async_trait]
impl SynthesisRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let chunks = Self::split_into_chunks(text);
        let audio_data = self.synthesize_chunks(&chunks, language.as_str()).await?;

        tracing::info!(
            provider = "google-translate",
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            chunk_count = chunks.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
