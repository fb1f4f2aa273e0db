//! Rendering system with wgpu pipeline and GPU texture storage.

use std::collections::HashMap;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use log::{debug, info, warn};
use wgpu::util::DeviceExt;

use crate::error::{Error, Result};
use crate::params::RenderConfig;
use crate::scene::{UniformSink, UniformValue, NOISE_TEXTURE_UNIT};
use crate::upload::{
    FilterMode, TextureDescriptor, TextureDimension, TextureHandle, TextureUploader, WrapMode,
    CHANNELS,
};

/// Vertex data for the display quad (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Unit quad in the XY plane, textured once across
const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-1.0, -1.0, 0.0], uv: [0.0, 1.0] },
    Vertex { position: [1.0, -1.0, 0.0], uv: [1.0, 1.0] },
    Vertex { position: [-1.0, 1.0, 0.0], uv: [0.0, 0.0] },
    Vertex { position: [1.0, 1.0, 0.0], uv: [1.0, 0.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

/// Uniform buffer for the noise shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub mvp: [[f32; 4]; 4],
}

/// A texture living on the GPU
struct GpuTexture {
    texture: wgpu::Texture,
    /// Only 2D textures can be shown by the quad pipeline
    bind_group: Option<wgpu::BindGroup>,
}

/// Rendering system managing wgpu device, pipeline and noise textures
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniforms: Uniforms,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    filterable: bool,
    textures: HashMap<TextureHandle, GpuTexture>,
    next_texture_id: u32,
    bound: Option<TextureHandle>,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: Arc<winit::window::Window>, render_config: &RenderConfig) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::Resource(format!("Failed to create surface: {}", e)))?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| Error::Resource("Failed to find suitable GPU adapter".to_string()))?;

        // Float textures only filter linearly where the adapter allows it
        let filterable = adapter
            .features()
            .contains(wgpu::Features::FLOAT32_FILTERABLE);
        if !filterable {
            warn!("adapter cannot filter float textures, noise will be sampled nearest");
        }
        let required_features = if filterable {
            wgpu::Features::FLOAT32_FILTERABLE
        } else {
            wgpu::Features::empty()
        };

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| Error::Resource(format!("Failed to request device: {}", e)))?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Resource("Surface reports no formats".to_string()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Noise Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("noise.wgsl").into()),
        });

        // Create buffers
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniforms = Uniforms {
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Noise texture + sampler bind group layout
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Noise Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(if filterable {
                        wgpu::SamplerBindingType::Filtering
                    } else {
                        wgpu::SamplerBindingType::NonFiltering
                    }),
                    count: None,
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout, &texture_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Noise Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The orbit camera can look at either face
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let [r, g, b, a] = render_config.clear_color;
        info!("render system ready ({:?})", surface_format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            filterable,
            textures: HashMap::new(),
            next_texture_id: 0,
            bound: None,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Reconfigure the surface after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Render a frame: the quad textured with the bound noise texture
    pub fn render(&self) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let texture_group = self
                .bound
                .and_then(|handle| self.textures.get(&handle))
                .and_then(|texture| texture.bind_group.as_ref());

            if let Some(texture_group) = texture_group {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_bind_group(1, texture_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn create_sampler(&self, descriptor: &TextureDescriptor) -> wgpu::Sampler {
        let address_mode = match descriptor.wrap {
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
            WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        };
        let filter = match descriptor.filter {
            FilterMode::Linear if self.filterable => wgpu::FilterMode::Linear,
            _ => wgpu::FilterMode::Nearest,
        };

        self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Noise Sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        })
    }
}

/// Widen RGB texels to RGBA (wgpu has no three-channel float format)
fn rgb_to_rgba(values: &[f32]) -> Vec<f32> {
    values
        .chunks_exact(CHANNELS)
        .flat_map(|t| [t[0], t[1], t[2], 1.0])
        .collect()
}

impl TextureUploader for RenderSystem {
    fn upload(
        &mut self,
        descriptor: &TextureDescriptor,
        data: Option<&[f32]>,
    ) -> Result<TextureHandle> {
        descriptor.check_data(data)?;

        let size = wgpu::Extent3d {
            width: descriptor.width,
            height: descriptor.height,
            depth_or_array_layers: descriptor.depth,
        };
        let dimension = match descriptor.dimension {
            TextureDimension::D1 => wgpu::TextureDimension::D1,
            TextureDimension::D2 => wgpu::TextureDimension::D2,
            TextureDimension::D3 => wgpu::TextureDimension::D3,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Noise Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Without data the storage is left zero-initialised
        if let Some(values) = data {
            let rgba = rgb_to_rgba(values);
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                bytemuck::cast_slice(&rgba),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * std::mem::size_of::<f32>() as u32 * descriptor.width),
                    rows_per_image: Some(descriptor.height),
                },
                size,
            );
        }

        let bind_group = (descriptor.dimension == TextureDimension::D2).then(|| {
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let sampler = self.create_sampler(descriptor);
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Noise Texture Bind Group"),
                layout: &self.texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            })
        });

        self.next_texture_id += 1;
        let handle = TextureHandle(self.next_texture_id);
        self.textures.insert(handle, GpuTexture { texture, bind_group });
        Ok(handle)
    }

    fn bind(&mut self, handle: TextureHandle) {
        match self.textures.get(&handle) {
            Some(texture) if texture.bind_group.is_none() => {
                warn!("texture {:?} is not 2D and cannot be displayed", handle)
            }
            Some(_) => self.bound = Some(handle),
            None => debug!("ignoring bind of unknown texture {:?}", handle),
        }
    }

    fn delete(&mut self, handle: TextureHandle) {
        if let Some(gpu) = self.textures.remove(&handle) {
            gpu.texture.destroy();
            if self.bound == Some(handle) {
                self.bound = None;
            }
        }
    }
}

impl UniformSink for RenderSystem {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        match (name, value) {
            ("MVP", UniformValue::Mat4(mvp)) => {
                self.uniforms.mvp = mvp.to_cols_array_2d();
                self.queue.write_buffer(
                    &self.uniform_buffer,
                    0,
                    bytemuck::cast_slice(&[self.uniforms]),
                );
            }
            ("noiseTex", UniformValue::Int(unit)) if unit == NOISE_TEXTURE_UNIT => {}
            _ => debug!("shader has no uniform `{}`, ignoring", name),
        }
    }
}
