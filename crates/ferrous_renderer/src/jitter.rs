//! Jittered multi-pass sampling.
//!
//! The triangle buffer is drawn once per [`JitterSample`], each time under a
//! sub-pixel translation and into a single colour channel of the
//! accumulation target.  With the default six-entry pattern every channel
//! collects two samples; the composite shader averages them back into
//! coverage.

use glam::{Affine2, Mat3, Vec2};

/// Output channel a sample accumulates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// RGBA mask the coverage shader multiplies its output by.
    pub const fn mask(self) -> [f32; 4] {
        match self {
            Channel::Red => [1.0, 0.0, 0.0, 0.0],
            Channel::Green => [0.0, 1.0, 0.0, 0.0],
            Channel::Blue => [0.0, 0.0, 1.0, 0.0],
        }
    }
}

/// One entry of a jitter pattern.  `offset` is in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterSample {
    pub offset: Vec2,
    pub channel: Channel,
}

impl JitterSample {
    pub const fn new(offset: Vec2, channel: Channel) -> Self {
        Self { offset, channel }
    }
}

/// Six samples, two per channel, in twelfths of a pixel.
pub const JITTER_PATTERN: [JitterSample; 6] = [
    JitterSample::new(Vec2::new(-5.0 / 12.0, -5.0 / 12.0), Channel::Red),
    JitterSample::new(Vec2::new(-3.0 / 12.0, 1.0 / 12.0), Channel::Red),
    JitterSample::new(Vec2::new(-1.0 / 12.0, -1.0 / 12.0), Channel::Green),
    JitterSample::new(Vec2::new(1.0 / 12.0, 5.0 / 12.0), Channel::Green),
    JitterSample::new(Vec2::new(3.0 / 12.0, -3.0 / 12.0), Channel::Blue),
    JitterSample::new(Vec2::new(5.0 / 12.0, 3.0 / 12.0), Channel::Blue),
];

/// Uniform scale applied after the jitter translation.  Keeps the laid-out
/// string (em units) inside clip space.
pub const DEFAULT_SCALE: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    pub pattern: &'static [JitterSample],
    pub scale: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            pattern: &JITTER_PATTERN,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Dimensions of the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceInfo {
    /// Size in physical (device) pixels.
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio.
    pub scale_factor: f64,
}

impl SurfaceInfo {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Size in logical pixels.  An empty surface counts as one physical
    /// pixel in each direction.
    pub fn logical_size(&self) -> Vec2 {
        let physical = Vec2::new(self.width.max(1) as f32, self.height.max(1) as f32);
        physical / self.device_pixel_ratio()
    }

    /// `scale_factor` as `f32`; zero, negative or non-finite ratios read as 1.
    pub fn device_pixel_ratio(&self) -> f32 {
        let dpr = self.scale_factor as f32;
        if dpr.is_finite() && dpr > 0.0 {
            dpr
        } else {
            1.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Everything one accumulation pass needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassConfig {
    pub index: usize,
    pub transform: Affine2,
    pub channel: Channel,
}

impl PassConfig {
    pub fn uniform(&self) -> PassUniform {
        let m = Mat3::from(self.transform);
        PassUniform {
            transform: [
                m.x_axis.extend(0.0).to_array(),
                m.y_axis.extend(0.0).to_array(),
                m.z_axis.extend(0.0).to_array(),
            ],
            channel: self.channel.mask(),
        }
    }
}

/// GPU image of a [`PassConfig`]: a WGSL `mat3x3<f32>` (three padded
/// columns) followed by the channel mask.  64 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PassUniform {
    pub transform: [[f32; 4]; 3],
    pub channel: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterSampler {
    config: SamplerConfig,
}

impl Default for JitterSampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

impl JitterSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn pass_count(&self) -> usize {
        self.config.pattern.len()
    }

    /// Builds the per-pass transforms for `surface`.
    ///
    /// Offsets are converted from pixels to clip units (`2 / size`, with the
    /// size in logical pixels) and divided by the device pixel ratio, then
    /// the pass scale is applied on top: `p' = scale * p + offset`.
    pub fn plan(&self, surface: SurfaceInfo) -> Vec<PassConfig> {
        let logical = surface.logical_size();
        let dpr = surface.device_pixel_ratio();
        let scale = Affine2::from_scale(Vec2::splat(self.config.scale));

        self.config
            .pattern
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                let clip_offset = sample.offset * 2.0 / logical / dpr;
                let config = PassConfig {
                    index,
                    transform: Affine2::from_translation(clip_offset) * scale,
                    channel: sample.channel,
                };
                log::trace!(
                    "jitter pass {}: offset {:?} -> {:?}",
                    index,
                    clip_offset,
                    config.channel
                );
                config
            })
            .collect()
    }
}
