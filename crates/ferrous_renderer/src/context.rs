/// Re-exports the shared GPU context supplied by `ferrous_core` and maps its
/// creation errors into [`RenderError`].
///
/// Window surface setup lives in `ferrous_app`; the renderer only receives
/// an already-initialised `EngineContext`.
pub use ferrous_core::context::EngineContext;

use crate::error::RenderError;

/// Creates a context with no surface, for offscreen rendering and tests.
pub async fn headless() -> Result<EngineContext, RenderError> {
    EngineContext::headless()
        .await
        .map_err(|e| RenderError::DeviceFailure(e.to_string()))
}
