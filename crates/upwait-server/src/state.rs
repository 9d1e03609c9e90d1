use std::sync::{Arc, Mutex, PoisonError};

use upwait_core::core::{CoreContext, CoreResult, UpwaitServices};

use super::error::ApiError;

/// Shared server state.
///
/// SQLite connections are not `Sync`, so the services sit behind a mutex and
/// every store call runs on the blocking pool via [`with_services`].
pub struct AppState {
    services: Mutex<UpwaitServices>,
}

impl AppState {
    pub fn new(ctx: &CoreContext) -> CoreResult<Arc<Self>> {
        let services = ctx.services()?;

        Ok(Arc::new(Self {
            services: Mutex::new(services),
        }))
    }
}

/// Run a service call on the blocking pool.
pub async fn with_services<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&UpwaitServices) -> CoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        // A panicked call leaves the connection usable; keep serving.
        let services = state.services.lock().unwrap_or_else(PoisonError::into_inner);
        f(&services).map_err(ApiError::from)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
}
