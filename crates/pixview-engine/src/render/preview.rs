use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::ColorRgba;
use crate::error::{PreviewError, Result};
use crate::fit::VertexQuad;
use crate::frame::{FrameSlot, PendingFrame, QuadGeometry};
use crate::orient::{Rotation, COORDS_0};
use crate::render::{RenderCtx, RenderTarget};
use crate::sink::{Sink, SinkId};

use super::shader::create_shader;

const FRAME_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Preview renderer configuration.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Color of the letterbox/pillarbox bands.
    pub clear_color: ColorRgba,
    /// Texture filtering when the frame is scaled.
    pub filter: wgpu::FilterMode,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            clear_color: ColorRgba::black(),
            filter: wgpu::FilterMode::Linear,
        }
    }
}

/// Draws the latest camera frame as one aspect-fit textured quad.
///
/// Per tick: [`sync`](Self::sync) uploads the pending frame (if any) and refreshes
/// the quad geometry, then [`render`](Self::render) clears once and draws once.
pub struct PreviewRenderer {
    id: SinkId,
    config: PreviewConfig,

    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture: FrameTexture,

    vbo: wgpu::Buffer,
    geometry_revision: Option<u64>,
    // Last frame exceeded the texture limit; clear only.
    frame_rejected: bool,
}

struct FrameTexture {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
    bind_group: wgpu::BindGroup,
}

impl PreviewRenderer {
    /// Builds the pipeline and initial resources.
    ///
    /// Fails with `ShaderCompile` if the pass-through shader does not validate; no
    /// renderer exists in that case.
    pub fn new(ctx: &RenderCtx<'_>, config: PreviewConfig) -> Result<Self> {
        let shader = create_shader(
            ctx.device,
            "pixview preview shader",
            include_str!("shaders/preview.wgsl"),
        )?;

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("pixview preview bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("pixview preview pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pixview preview pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PreviewVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("pixview preview sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: config.filter,
            min_filter: config.filter,
            ..Default::default()
        });

        // 1x1 opaque black until the first frame arrives, so every tick has something
        // to draw.
        let texture = FrameTexture::new(ctx, &bind_group_layout, &sampler, 1, 1);
        ctx.queue.write_texture(
            texture.copy_target(),
            &[0, 0, 0, 255],
            texture.layout(),
            texture.extent(),
        );

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pixview preview vbo"),
            contents: bytemuck::cast_slice(&interleave(&QuadGeometry {
                tex_coords: COORDS_0,
                vertices: VertexQuad::FULL,
                rotation: Rotation::Deg0,
                revision: 0,
            })),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let id = SinkId::allocate();
        log::info!("preview renderer {id} ready ({:?})", ctx.surface_format);

        Ok(Self {
            id,
            config,
            pipeline,
            bind_group_layout,
            sampler,
            texture,
            vbo,
            geometry_revision: None,
            frame_rejected: false,
        })
    }

    /// Uploads one frame, reallocating the texture when its size changed.
    ///
    /// Frames the device cannot hold are rejected with `FrameTooLarge`; the
    /// previous texture is kept and nothing is drawn until a frame fits.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, frame: PendingFrame<'_>) -> Result<()> {
        if let Err(e) = check_texture_size(
            frame.width,
            frame.height,
            ctx.device.limits().max_texture_dimension_2d,
        ) {
            self.frame_rejected = true;
            return Err(e);
        }
        self.frame_rejected = false;

        if (frame.width, frame.height) != (self.texture.width, self.texture.height) {
            log::debug!(
                "preview texture {}x{} -> {}x{}",
                self.texture.width,
                self.texture.height,
                frame.width,
                frame.height
            );
            self.texture = FrameTexture::new(
                ctx,
                &self.bind_group_layout,
                &self.sampler,
                frame.width,
                frame.height,
            );
        }

        ctx.queue.write_texture(
            self.texture.copy_target(),
            frame.pixels,
            self.texture.layout(),
            self.texture.extent(),
        );
        Ok(())
    }

    /// Consumes the slot's pending frame and the geometry that goes with it, both
    /// under one lock.
    ///
    /// Returns whether a new frame was uploaded.
    pub fn sync(&mut self, ctx: &RenderCtx<'_>, slot: &FrameSlot) -> bool {
        let mut rejected = None;
        let latched = slot.latch(|frame| {
            if let Err(e) = self.upload(ctx, frame) {
                rejected = Some(e);
            }
        });

        if let Some(e) = rejected {
            log::warn!("dropping frame: {e}");
            return false;
        }
        self.write_geometry(ctx, &latched.geometry);
        latched.uploaded
    }

    /// Writes the quad vertices if `geometry` is newer than what the GPU holds.
    pub fn write_geometry(&mut self, ctx: &RenderCtx<'_>, geometry: &QuadGeometry) {
        if self.geometry_revision == Some(geometry.revision) {
            return;
        }
        ctx.queue
            .write_buffer(&self.vbo, 0, bytemuck::cast_slice(&interleave(geometry)));
        self.geometry_revision = Some(geometry.revision);
    }

    /// Clears the target and draws the frame quad.
    pub fn render(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pixview preview pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.config.clear_color.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.frame_rejected {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.texture.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.draw(0..4, 0..1);
    }

    /// Size of the texture currently bound.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.texture.width, self.texture.height)
    }
}

impl Sink for PreviewRenderer {
    fn native_class_id(&self) -> SinkId {
        self.id
    }
}

impl FrameTexture {
    fn new(
        ctx: &RenderCtx<'_>,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
    ) -> Self {
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pixview frame texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FRAME_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixview frame bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            texture,
            width,
            height,
            bind_group,
        }
    }

    fn copy_target(&self) -> wgpu::TexelCopyTextureInfo<'_> {
        wgpu::TexelCopyTextureInfo {
            texture: &self.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        }
    }

    fn layout(&self) -> wgpu::TexelCopyBufferLayout {
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * self.width),
            rows_per_image: Some(self.height),
        }
    }

    fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Rejects frames with a side longer than `max_side` texels.
fn check_texture_size(width: u32, height: u32, max_side: u32) -> Result<()> {
    if width > max_side || height > max_side {
        return Err(PreviewError::FrameTooLarge {
            width,
            height,
            max: max_side,
        });
    }
    Ok(())
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct PreviewVertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

impl PreviewVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PreviewVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn interleave(geometry: &QuadGeometry) -> [PreviewVertex; 4] {
    std::array::from_fn(|i| PreviewVertex {
        pos: geometry.vertices.0[i],
        uv: geometry.tex_coords[i],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orient::COORDS_90;

    #[test]
    fn interleave_pairs_corners_in_strip_order() {
        let g = QuadGeometry {
            tex_coords: COORDS_90,
            vertices: VertexQuad::scaled(0.5, 1.0),
            rotation: Rotation::Deg90,
            revision: 3,
        };
        let v = interleave(&g);
        assert_eq!(v[0], PreviewVertex { pos: [-0.5, -1.0], uv: [0.0, 0.0] });
        assert_eq!(v[3], PreviewVertex { pos: [0.5, 1.0], uv: [1.0, 1.0] });
    }

    #[test]
    fn texture_size_limit_applies_to_each_side() {
        let max = wgpu::Limits::default().max_texture_dimension_2d;
        assert_eq!(check_texture_size(max, max, max), Ok(()));
        assert_eq!(check_texture_size(1280, 720, max), Ok(()));
        assert_eq!(
            check_texture_size(max + 808, 16, max),
            Err(PreviewError::FrameTooLarge { width: max + 808, height: 16, max })
        );
        assert!(check_texture_size(16, max + 1, max).is_err());
    }

    #[test]
    fn vertex_stride_is_four_floats() {
        assert_eq!(PreviewVertex::layout().array_stride, 16);
    }
}
