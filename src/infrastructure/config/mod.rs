use crate::domain::tts::LanguageCode;
use crate::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub tts_provider: TtsProvider,
    pub aws_region: String,
    pub openai_model: String,
    pub openai_voice: String,
    pub http_timeout_secs: u64,
    pub synthesis_cache_enabled: bool,
    pub pause_ms: i64,
    pub primary_column: usize,
    pub primary_lang: LanguageCode,
    pub secondary_lang: LanguageCode,
    pub sample_rate: u32,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TtsProvider {
    Google,
    Polly,
    OpenAi,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Config {
            tts_provider: match env_or("TTS_PROVIDER", "google").to_lowercase().as_str() {
                "google" => TtsProvider::Google,
                "polly" => TtsProvider::Polly,
                "openai" => TtsProvider::OpenAi,
                other => {
                    return Err(AppError::Config(format!(
                        "unknown TTS provider '{}'",
                        other
                    )))
                }
            },
            aws_region: env_or("AWS_REGION", "eu-west-1"),
            openai_model: env_or("OPENAI_TTS_MODEL", "tts-1"),
            openai_voice: env_or("OPENAI_TTS_VOICE", ""),
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", "30")?,
            synthesis_cache_enabled: env_or("SYNTHESIS_CACHE_ENABLED", "false").to_lowercase()
                == "true",
            pause_ms: parse_env("PAUSE_MS", "500")?,
            primary_column: parse_env("PRIMARY_COLUMN", "0")?,
            primary_lang: parse_lang("PRIMARY_LANG", "ru")?,
            secondary_lang: parse_lang("SECONDARY_LANG", "de")?,
            sample_rate: parse_env("SAMPLE_RATE", "24000")?,
            log_format: match env_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    env_or(key, default)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid {}: {}", key, e)))
}

fn parse_lang(key: &str, default: &str) -> Result<LanguageCode, AppError> {
    let tag = env_or(key, default);
    LanguageCode::parse(&tag)
        .ok_or_else(|| AppError::Config(format!("unsupported language tag '{}' in {}", tag, key)))
}
