use crate::config::DeviceInit;

/// Handles obtained from a successful acquisition.
pub struct Acquired {
    pub surface: wgpu::Surface<'static>,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Acquires an adapter and device able to present to `target`.
///
/// Returns `None` when the platform has no usable GPU backend: the surface cannot
/// be created, no adapter matches, or the adapter refuses a device. Never panics;
/// callers branch on presence of the result.
pub async fn acquire(init: &DeviceInit, target: wgpu::SurfaceTarget<'static>) -> Option<Acquired> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: init.backends,
        ..Default::default()
    });

    let surface = match instance.create_surface(target) {
        Ok(surface) => surface,
        Err(e) => {
            log::warn!("GPU unavailable: cannot create a presentation surface: {e}");
            return None;
        }
    };

    let adapter = match instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.feature_tier.power_preference(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
    {
        Ok(adapter) => adapter,
        Err(e) => {
            log::warn!("GPU unavailable: no suitable adapter: {e}");
            return None;
        }
    };

    let info = adapter.get_info();
    log::info!("using GPU adapter {} ({:?})", info.name, info.backend);

    let (device, queue) = match adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("backdrop device"),
            required_features: wgpu::Features::empty(),
            required_limits: init.feature_tier.limits(&adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
    {
        Ok(pair) => pair,
        Err(e) => {
            log::warn!("GPU unavailable: adapter refused a device: {e}");
            return None;
        }
    };

    Some(Acquired {
        surface,
        adapter,
        device,
        queue,
    })
}
