use attendance::checkin_url::InvalidOrigin;
use attendance::qr::QrGenerator;
use attendance::{CheckinUrls, FallbackPolicy, SheetsClient};
use sea_orm::DatabaseConnection;
use services::{AttendanceEventService, DbEventSource};
use std::sync::Arc;
use std::time::Duration;
use util::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Origin(#[from] InvalidOrigin),
}

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    events: AttendanceEventService,
    sheets: Arc<SheetsClient>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, sheets: SheetsClient, qr: QrGenerator, urls: CheckinUrls) -> Self {
        Self {
            events: AttendanceEventService::new(db.clone(), Arc::new(qr), urls),
            db,
            sheets: Arc::new(sheets),
        }
    }

    /// Wires the QR generator, the spreadsheet client and the URL builder from [`AppConfig`].
    pub fn from_config(db: DatabaseConnection) -> Result<Self, StateError> {
        let config = AppConfig::global().clone();
        let timeout = Duration::from_secs(config.sheets_timeout_secs);

        let policy = config.sheets_fallback.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}; using any-failure");
            FallbackPolicy::default()
        });
        let sheets = SheetsClient::new(timeout, policy)?;

        let logo_client = reqwest::Client::builder().timeout(timeout).build()?;
        let logo = Some(config.qr_logo_url).filter(|u| !u.trim().is_empty());
        let qr = QrGenerator::new(config.qr_size, logo, logo_client);

        let urls = CheckinUrls::new(&config.public_origin)?;
        Ok(Self::new(db, sheets, qr, urls))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn events(&self) -> &AttendanceEventService {
        &self.events
    }

    pub fn sheets(&self) -> &SheetsClient {
        &self.sheets
    }

    pub fn event_source(&self) -> DbEventSource {
        DbEventSource::new(self.db.clone())
    }
}
