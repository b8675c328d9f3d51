use crate::services::storage_service::StorageService;

/// Shared state handed to every handler and to the auth layer.
#[derive(Clone)]
pub struct AppState {
    pub storage: StorageService,
    pub api_key: String,
}
