use crate::config::StorefrontConfig;
use crate::records::{FileRecordStore, RecordStore};
use std::sync::Arc;
use storefront_compiler_html::StaticRenderer;
use storefront_content::BaseUrlResolver;
use storefront_templates::TemplateCatalog;

/// Shared, read-only request state. Nothing in here changes after startup,
/// so requests never contend on it.
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub catalog: TemplateCatalog,
    pub renderer: StaticRenderer,
    pub resolver: BaseUrlResolver,
}

impl AppState {
    pub fn new(
        records: Arc<dyn RecordStore>,
        catalog: TemplateCatalog,
        renderer: StaticRenderer,
        resolver: BaseUrlResolver,
    ) -> Self {
        Self {
            records,
            catalog,
            renderer,
            resolver,
        }
    }

    /// File-backed state as described by the config
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(
            Arc::new(FileRecordStore::new(&config.data_dir)),
            config.catalog(),
            StaticRenderer::new(config.render_options()),
            config.resolver(),
        )
    }
}
