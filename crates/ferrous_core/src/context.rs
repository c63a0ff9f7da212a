use std::sync::Arc;

use thiserror::Error;

/// Adapter, device and queue for one text renderer.
///
/// The queue and device are shared with the passes, hence the `Arc`s.  The
/// `wgpu::Instance` is not kept: surfaces hold their own reference to it.
pub struct EngineContext {
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no GPU adapter matches the requested options")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
}

/// An instance over every backend wgpu was built with.
pub fn instance() -> wgpu::Instance {
    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

impl EngineContext {
    /// A context with no presentation surface.
    pub async fn headless() -> Result<Self, ContextError> {
        Self::for_surface(&instance(), None).await
    }

    /// Picks an adapter from `instance`, restricted to ones that can present
    /// to `surface` when one is given.
    pub async fn for_surface(
        instance: &wgpu::Instance,
        surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, ContextError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: surface,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::AdapterUnavailable)?;

        let info = adapter.get_info();
        log::info!(
            "using {} on {:?} ({:?})",
            info.name,
            info.backend,
            info.device_type
        );

        // The coverage and composite shaders need nothing beyond WebGPU
        // defaults.
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Text Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    ..Default::default()
                },
                None,
            )
            .await?;

        Ok(Self {
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_failing_step() {
        assert_eq!(
            ContextError::AdapterUnavailable.to_string(),
            "no GPU adapter matches the requested options"
        );
    }

    #[test]
    #[ignore = "requires a GPU adapter"]
    fn headless_context_reports_its_adapter() {
        let context = pollster::block_on(EngineContext::headless()).unwrap();
        assert!(!context.adapter_info().name.is_empty());
    }
}
