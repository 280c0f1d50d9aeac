use wgpu::naga;

use crate::error::{PreviewError, Result};

/// Parses and validates WGSL on the CPU.
///
/// Failures come back as `ShaderCompile` instead of reaching the device's
/// uncaptured-error handler.
pub fn validate_wgsl(label: &str, source: &str) -> Result<()> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| PreviewError::ShaderCompile {
        label: label.to_string(),
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| PreviewError::ShaderCompile {
        label: label.to_string(),
        message: e.into_inner().to_string(),
    })?;

    Ok(())
}

/// Validates `source`, then creates the wgpu module.
pub(super) fn create_shader(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    if let Err(e) = validate_wgsl(label, source) {
        log::error!("{e}");
        return Err(e);
    }

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}
