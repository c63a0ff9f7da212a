/// Off-screen colour buffer the jitter passes accumulate into.
///
/// Sized to the surface in device pixels.  The format is a float format so
/// the coverage shader can add negative contributions (back-facing fan
/// triangles) without clamping; the compositor samples it as a texture.
pub struct AccumulationTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    /// Nearest-neighbour, clamp-to-edge: every surface pixel reads exactly
    /// its own accumulated texel.
    pub sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl AccumulationTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (texture, view) = Self::make(device, width, height);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Accumulation Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Recreates the texture when the resolution changes.  Returns `false`
    /// (no GPU allocation) if the dimensions are identical.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        let (texture, view) = Self::make(device, width, height);
        self.texture = texture;
        self.view = view;
        self.width = width;
        self.height = height;
        true
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Unit tests read the accumulated values back.
    fn usage() -> wgpu::TextureUsages {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        if cfg!(test) {
            usage | wgpu::TextureUsages::COPY_SRC
        } else {
            usage
        }
    }

    fn make(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        // Zero-sized textures are invalid; a minimised window still gets a
        // 1x1 target.
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Accumulation Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: Self::usage(),
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}
