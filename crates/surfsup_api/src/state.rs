use surfsup_core::Store;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    /// Include store failure text in 500 responses.
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            expose_error_details: false,
        }
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }
}
