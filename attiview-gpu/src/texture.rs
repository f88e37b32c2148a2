//! GPU-resident textures addressed by [`TextureHandle`]

use attiview_core::{
    Error, FilterMode, RawImage, Result, TextureHandle, TextureState, TextureUploader,
};
use log::debug;
use std::sync::Arc;

/// Color format every uploaded texture is stored in
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// One uploaded texture with the bind group that samples it
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

/// Texture store implementing the registry's upload seam
///
/// Handle ids start at 1 and index `textures` directly. Untextured draws
/// sample a 1x1 white texture, which leaves the lit vertex color unchanged.
pub struct GpuTextures {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    layout: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,
    nearest_sampler: wgpu::Sampler,
    fallback: GpuTexture,
    textures: Vec<GpuTexture>,
}

impl GpuTextures {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

        let linear_sampler = create_sampler(&device, wgpu::FilterMode::Linear);
        let nearest_sampler = create_sampler(&device, wgpu::FilterMode::Nearest);
        let fallback = create_texture(
            &device,
            &queue,
            &layout,
            &linear_sampler,
            "white fallback texture",
            1,
            1,
            &[255, 255, 255, 255],
        );

        Self {
            device,
            queue,
            layout,
            linear_sampler,
            nearest_sampler,
            fallback,
            textures: Vec::new(),
        }
    }

    /// Layout of group 1 in the scene pipelines
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&GpuTexture> {
        let index = handle.id().checked_sub(1)?;
        self.textures.get(index as usize)
    }

    /// Bind group for a texture state, falling back to plain white
    pub fn bind_group(&self, state: TextureState) -> &wgpu::BindGroup {
        match state {
            TextureState::Bound(handle) => self
                .get(handle)
                .map_or(&self.fallback.bind_group, |texture| &texture.bind_group),
            TextureState::Disabled => &self.fallback.bind_group,
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureUploader for GpuTextures {
    fn upload(&mut self, image: RawImage, filter: FilterMode) -> Result<TextureHandle> {
        let max = self.device.limits().max_texture_dimension_2d;
        if image.width() > max || image.height() > max {
            return Err(Error::Gpu(format!(
                "texture {}x{} exceeds the device limit of {}",
                image.width(),
                image.height(),
                max
            )));
        }

        let id = u32::try_from(self.textures.len() + 1)
            .map_err(|_| Error::Gpu("texture handles exhausted".to_string()))?;
        let (width, height) = (image.width(), image.height());
        let rgba = image.to_rgba();
        drop(image);

        let sampler = match filter {
            FilterMode::Linear => &self.linear_sampler,
            FilterMode::Nearest => &self.nearest_sampler,
        };
        let texture = create_texture(
            &self.device,
            &self.queue,
            &self.layout,
            sampler,
            &format!("texture {}", id),
            width,
            height,
            &rgba,
        );
        debug!("created {}x{} texture {} ({:?})", width, height, id, filter);

        self.textures.push(texture);
        Ok(TextureHandle::new(id))
    }
}

fn create_sampler(device: &wgpu::Device, filter: wgpu::FilterMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("texture sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: filter,
        min_filter: filter,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[allow(clippy::too_many_arguments)]
fn create_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> GpuTexture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
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

    GpuTexture {
        texture,
        view,
        bind_group,
        width,
        height,
    }
}
