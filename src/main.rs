//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the pipeline lives in AnalysisService.
//!
//! Usage: `yt-sentiment [--json] [URL]`. Without a URL an interactive prompt loop starts.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use yt_sentiment::adapters::sentiment::ModelSentimentAdapter;
use yt_sentiment::adapters::ui::tui::{OutputMode, TuiInputPort};
use yt_sentiment::adapters::youtube::YouTubeDataApi;
use yt_sentiment::ports::{CommentSource, EngagementSource, InputPort, SentimentPort};
use yt_sentiment::shared::config::AppConfig;
use yt_sentiment::usecases::{AnalysisOptions, AnalysisService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // Logs go to stderr so `--json` output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = if args.iter().any(|a| a == "--json") {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };
    let url_arg = args.iter().find(|a| !a.starts_with("--")).cloned();

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
    let Some(api_key) = cfg.api_key() else {
        anyhow::bail!(
            "Set YT_SENTI_API_KEY (or YOUTUBE_API_KEY) in env or .env. Get one from https://console.cloud.google.com/apis/credentials"
        );
    };

    // --- Sentiment model: loaded once, shared read-only; absence is fatal ---
    let model_dir = cfg.model_dir_or_default();
    let model: Arc<dyn SentimentPort> = Arc::new(
        ModelSentimentAdapter::load(&model_dir)
            .await
            .map_err(|e| anyhow::anyhow!("{} (model dir: {})", e, model_dir.display()))?,
    );

    // --- YouTube client (one instance serves both ports) ---
    let youtube = Arc::new(YouTubeDataApi::new(
        cfg.api_base_url_or_default(),
        api_key,
        cfg.request_timeout(),
    )?);
    let comments: Arc<dyn CommentSource> = Arc::clone(&youtube) as Arc<dyn CommentSource>;
    let engagement: Arc<dyn EngagementSource> = youtube;

    let options = AnalysisOptions::from_config(&cfg);
    info!(
        comment_limit = options.comment_limit,
        max_retries = options.retry.max_retries,
        timeout_secs = cfg.request_timeout().as_secs(),
        "pipeline configured"
    );
    let service = Arc::new(AnalysisService::new(comments, engagement, model, options));

    if output == OutputMode::Pretty {
        yt_sentiment::adapters::ui::init_ui();
    }
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(service, output));

    match url_arg {
        Some(url) => input_port.run_once(&url).await?,
        None => input_port.run().await?,
    }

    Ok(())
}
