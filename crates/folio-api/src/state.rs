use std::sync::Arc;

use folio_shared::config::AppConfig;

use crate::contact::ContactSink;
use crate::content::SiteContent;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub content: Arc<SiteContent>,
    pub contact_sink: Arc<dyn ContactSink>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        content: SiteContent,
        contact_sink: Arc<dyn ContactSink>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            content: Arc::new(content),
            contact_sink,
        }
    }
}
