use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The org chart module implements this so that any binary can mount its
/// endpoints without knowing what they are. Routes are returned fully
/// prefixed (e.g. `/org/...`) and merged into the server router as-is.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes.
    fn routes(&self) -> Router;
}
