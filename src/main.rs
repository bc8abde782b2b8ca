use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use vidscribe::application::ports::{
    CallbackNotifier, JobRepository, MediaExtractor, ScratchStore,
};
use vidscribe::application::services::{
    EvictionScheduler, TranscriptionPipeline, TranscriptionWorker,
};
use vidscribe::infrastructure::audio::TranscriptionEngineFactory;
use vidscribe::infrastructure::media::YtDlpExtractor;
use vidscribe::infrastructure::notification::WebhookNotifier;
use vidscribe::infrastructure::observability::{TracingConfig, init_tracing};
use vidscribe::infrastructure::persistence::InMemoryJobRepository;
use vidscribe::infrastructure::storage::LocalScratchStore;
use vidscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::default());
    tracing::info!(environment = %environment, "Configuration loaded");

    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());

    let scratch_store: Arc<dyn ScratchStore> = Arc::new(
        LocalScratchStore::new(settings.extraction.scratch_dir.clone())
            .context("Failed to prepare scratch directory")?,
    );

    let media_extractor: Arc<dyn MediaExtractor> = Arc::new(YtDlpExtractor::new(
        settings.extraction.binary.clone(),
        Some(settings.extraction.audio_format.clone()),
        Some(settings.extraction.timeout()),
    ));

    let transcription_engine = TranscriptionEngineFactory::create(
        settings.transcription.provider,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
        settings.transcription.model.clone(),
        settings.transcription.poll_interval(),
    )
    .context("Failed to configure transcription provider")?;

    let callback_notifier: Arc<dyn CallbackNotifier> = Arc::new(
        WebhookNotifier::new(Some(settings.callback.timeout()))
            .context("Failed to build callback client")?,
    );

    let eviction_scheduler = Arc::new(EvictionScheduler::new(
        Arc::clone(&job_repository),
        settings.jobs.retention(),
    ));

    let pipeline = Arc::new(TranscriptionPipeline::new(
        Arc::clone(&job_repository),
        scratch_store,
        media_extractor,
        transcription_engine,
        callback_notifier,
        Arc::clone(&eviction_scheduler),
    ));

    let (job_sender, job_receiver) = mpsc::channel(settings.jobs.queue_capacity);
    let shutdown = CancellationToken::new();

    let worker = TranscriptionWorker::new(
        job_receiver,
        pipeline,
        shutdown.clone(),
        settings.server.shutdown_grace(),
    );
    let worker_handle = tokio::spawn(worker.run());

    let state = AppState {
        job_repository,
        job_sender,
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, draining background work");
    shutdown.cancel();
    if let Err(e) = worker_handle.await {
        tracing::error!(error = %e, "Transcription worker panicked");
    }
    eviction_scheduler.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
