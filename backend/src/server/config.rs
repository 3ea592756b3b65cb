//! Server settings loaded via OrthoConfig, and the assembled server config.

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use pagination::MAX_PER_PAGE;
use serde::Deserialize;

use shops::inbound::http::session_config::SessionSettings;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Listener and listing settings, from CLI flags, `SHOPS_*` variables or a
/// config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHOPS")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Page size used when a listing request omits `per_page`.
    #[ortho_config(default = 15)]
    pub default_per_page: u32,
}

/// Rejected settings values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("default_per_page must be between 1 and {MAX_PER_PAGE}, got {0}")]
    DefaultPerPageOutOfRange(u32),
}

impl ServerSettings {
    /// Configured host or `0.0.0.0`.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured listing page size.
    ///
    /// # Errors
    /// Returns [`SettingsError::DefaultPerPageOutOfRange`] outside `1..=100`.
    pub fn default_per_page(&self) -> Result<u32, SettingsError> {
        if (1..=MAX_PER_PAGE).contains(&self.default_per_page) {
            Ok(self.default_per_page)
        } else {
            Err(SettingsError::DefaultPerPageOutOfRange(
                self.default_per_page,
            ))
        }
    }
}

/// Everything [`super::create_server`] needs.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: (String, u16),
    pub(crate) default_per_page: u32,
}

impl ServerConfig {
    /// Combine validated settings with the session cookie settings.
    ///
    /// # Errors
    /// Propagates [`SettingsError`] from [`ServerSettings::default_per_page`].
    pub fn new(settings: &ServerSettings, session: SessionSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr: (settings.host().to_owned(), settings.port),
            default_per_page: settings.default_per_page()?,
        })
    }
}
