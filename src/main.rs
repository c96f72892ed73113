use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordtape::domain::track::{TrackRequest, TrackService};
use wordtape::error::{AppError, AppResult};
use wordtape::infrastructure::config::{Config, LogFormat, TtsProvider};
use wordtape::infrastructure::repositories::{
    GoogleTtsRepository, OpenAiTtsRepository, PollyTtsRepository, SynthesisRepository,
};
use wordtape::infrastructure::wordlist;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = Config::from_env()?;
    init_logging(&config);

    let mut args = std::env::args().skip(1);
    let input = args.next().ok_or_else(|| {
        AppError::BadRequest("usage: wordtape <words.csv> [output.mp3]".to_string())
    })?;
    let output = args.next().unwrap_or_else(|| "output.mp3".to_string());

    let rows = wordlist::parse_csv(&std::fs::read(&input)?).map_err(AppError::BadRequest)?;
    tracing::info!(file = %input, rows = rows.len(), "Word list loaded");

    let tts_repo = build_tts_repo(&config).await?;
    let service = TrackService::new(tts_repo, config.synthesis_cache_enabled);

    let request = TrackRequest {
        pause_ms: config.pause_ms,
        primary_column: config.primary_column,
        primary_lang: config.primary_lang,
        secondary_lang: config.secondary_lang,
        auto_detect_languages: false,
        fail_on_empty: true,
        sample_rate: config.sample_rate,
    };

    let mut on_progress = |index: usize, total: usize| {
        tracing::info!(row = index + 1, total = total, "Row spoken");
    };
    let result = service
        .build(&rows, &request, Some(&mut on_progress))
        .await?;

    for warning in &result.warnings {
        tracing::warn!(
            row = warning.row,
            column = warning.column,
            text = %warning.text,
            reason = %warning.reason,
            "Cell degraded to silence"
        );
    }

    std::fs::write(&output, &result.audio_data)?;
    tracing::info!(
        file = %output,
        audio_size_bytes = result.audio_data.len(),
        clips = result.clips_appended,
        duration_ms = result.duration_ms,
        degraded_cells = result.warnings.len(),
        "Track exported"
    );

    Ok(())
}

async fn build_tts_repo(config: &Config) -> AppResult<Arc<dyn SynthesisRepository>> {
    match config.tts_provider {
        TtsProvider::Google => {
            let repo = GoogleTtsRepository::new(Duration::from_secs(config.http_timeout_secs))
                .map_err(AppError::ExternalService)?;
            Ok(Arc::new(repo))
        }
        TtsProvider::Polly => {
            tracing::info!(region = %config.aws_region, "Initializing AWS Polly client");
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
            Ok(Arc::new(PollyTtsRepository::new(polly_client)))
        }
        TtsProvider::OpenAi => {
            let client = Arc::new(async_openai::Client::new());
            Ok(Arc::new(OpenAiTtsRepository::new(
                client,
                config.openai_model.clone(),
                config.openai_voice.clone(),
            )))
        }
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "wordtape=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "wordtape=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
