use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hello_club::application::{LoginUseCase, ReportLayout, ReportService, RosterService};
use hello_club::domain::ports::{ClockPort, DocumentStorePort, SessionStoragePort};
use hello_club::infrastructure::{
    AppConfig, CliArgs, ConfigCredentialVerifier, ConfigFile, FileExportSink, FirestoreStore,
    JsonFileStore, KeyringSessionStorage, MemorySessionStorage, MemoryStore, PdfRenderer,
    StoreBackend, SystemClock, hash_password,
};
use hello_club::presentation::{App, AppServices};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: CliArgs) -> Result<AppConfig> {
    let file = match &args.config {
        Some(path) => ConfigFile::at(path),
        None => ConfigFile::default_location()?,
    };
    let mut config = file.load()?;
    config.merge_with_args(args);
    config.merge_with_env();
    Ok(config)
}

fn create_store(config: &AppConfig) -> Result<Arc<dyn DocumentStorePort>> {
    let store: Arc<dyn DocumentStorePort> = match config.store.backend {
        StoreBackend::Firestore => Arc::new(FirestoreStore::new(&config.store.firestore)?),
        StoreBackend::JsonFile => {
            let dir = config
                .effective_data_dir()
                .ok_or_else(|| eyre!("no data directory; set store.data_dir or --data-dir"))?;
            Arc::new(JsonFileStore::open(dir)?)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };
    info!(backend = ?config.store.backend, "Document store ready");
    Ok(store)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let store = create_store(config)?;

    let session: Arc<dyn SessionStoragePort> = if config.auth.remember_session {
        Arc::new(KeyringSessionStorage::new())
    } else {
        Arc::new(MemorySessionStorage::new())
    };
    let verifier = Arc::new(ConfigCredentialVerifier::new(&config.auth));
    if config.auth.password_sha256.is_none() {
        warn!("auth.password_sha256 is not set; sign-in is disabled");
    }

    let export_dir = config.effective_export_dir();
    let reports = ReportService::new(
        ReportLayout::new((&config.branding).into()),
        Arc::new(PdfRenderer::new()),
        Arc::new(FileExportSink::new(export_dir, config.export.open_exports)),
        clock.clone(),
    );

    let services = AppServices {
        login: LoginUseCase::new(verifier, session),
        roster: RosterService::new(store, clock.clone()),
        reports,
        clock,
    };

    Ok(App::new(services, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    if let Some(password) = &args.hash_password {
        println!("{}", hash_password(password));
        return Ok(());
    }

    let config = load_config(args)?;
    init_logging(&config)?;

    info!(version = hello_club::VERSION, "Starting {}", hello_club::NAME);

    let app = create_app(&config)?;

    let mut terminal = ratatui::init();
    if config.ui.mouse {
        crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if config.ui.mouse {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    }
    ratatui::restore();

    result
}
