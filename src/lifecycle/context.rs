//! Application context.

use crate::config::Settings;
use crate::http::{HttpClient, HttpError};

/// Everything handlers need, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct AppContext {
    settings: Settings,
    http: HttpClient,
}

impl AppContext {
    /// Build the shared client from validated settings.
    pub fn from_settings(settings: Settings) -> Result<Self, HttpError> {
        let http = HttpClient::new(&settings.http)?;
        tracing::info!(
            timeout_secs = settings.http.timeout_secs,
            retry = settings.http.retry,
            pool = ?http.pool_id(),
            "Application context ready"
        );
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Release pooled connections.
    pub fn shutdown(&self) {
        self.http.close();
        tracing::info!("Application context shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let mut settings = Settings::default();
        settings.http.retry = 4;
        let ctx = AppContext::from_settings(settings).unwrap();
        assert_eq!(ctx.http().retry_policy().max_retries, 4);
        assert_eq!(ctx.settings().webhook.base_path, "/webhook");
    }

    #[test]
    fn test_shutdown_closes_pool() {
        let ctx = AppContext::from_settings(Settings::default()).unwrap();
        let before = ctx.http().pool().unwrap().id();
        ctx.shutdown();
        assert_eq!(ctx.http().pool_id(), None);
        assert_ne!(ctx.http().pool().unwrap().id(), before);
    }
}
