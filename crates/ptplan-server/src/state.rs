use std::sync::Arc;

use tokio::sync::Mutex;

use ptplan_core::directory::PatientDirectory;
use ptplan_engine::engine::RecommendationEngine;
use ptplan_storage::patients::PatientStore;

use crate::error::ApiError;

/// Shared application state, injected into all route handlers via Axum state.
///
/// The directory lives behind one lock. Handlers edit a copy, and the copy
/// replaces the shared directory only once it has been written to disk.
#[derive(Clone)]
pub struct AppState {
    pub engine: RecommendationEngine,
    pub store: PatientStore,
    pub patients: Arc<Mutex<PatientDirectory>>,
}

impl AppState {
    pub fn new(
        engine: RecommendationEngine,
        store: PatientStore,
        patients: PatientDirectory,
    ) -> Self {
        Self {
            engine,
            store,
            patients: Arc::new(Mutex::new(patients)),
        }
    }

    /// Save `next` and install it as `current`. On a failed save `current`
    /// is left untouched.
    pub async fn commit(
        &self,
        current: &mut PatientDirectory,
        next: PatientDirectory,
    ) -> Result<(), ApiError> {
        self.store.save_all(&next).await?;
        *current = next;
        Ok(())
    }
}
