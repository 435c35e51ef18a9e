//! Open HAMS dashboard client
//!
//! Client core of the Habitat Animal Management System dashboard: a typed
//! REST client, a query cache, the event card state machine and batch
//! animal check-in/out, driven from the `hams` command line.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use services::{notify::Notifier, session::SessionStore};

/// Application state shared by every command
#[derive(Clone)]
pub struct Dashboard {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl Dashboard {
    pub fn new(config: AppConfig, session: SessionStore, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let api = api::ApiClient::new(&config.api, session)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(api, notifier)),
        })
    }

    /// Open the session file named in the configuration
    pub fn from_config(config: AppConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let session = SessionStore::open(&config.session.file)?;
        Self::new(config, session, notifier)
    }
}
