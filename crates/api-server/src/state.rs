//! Application state

use std::sync::Arc;

use tt_core::task::{TaskRepository, TaskService};

use crate::router::RouteTable;

/// Shared application state
///
/// All handler dependencies are wired here explicitly at startup; there is
/// no runtime dependency discovery.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    service: TaskService,
    routes: RouteTable,
}

impl AppState {
    /// Build the state around the given repository
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                service: TaskService::new(repository),
                routes: RouteTable::standard(),
            }),
        }
    }

    /// Get reference to the task service
    pub fn service(&self) -> &TaskService {
        &self.inner.service
    }

    /// Get reference to the route table
    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }
}
