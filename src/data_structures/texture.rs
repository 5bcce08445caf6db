//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU GPU texture resources,
//! and helper methods for creating depth textures, the flat fallback texture, and
//! mipmapped colour textures from decoded images.

use image::{RgbaImage, imageops::FilterType};

/// A GPU texture with a view and optional sampler.
///
/// Colour textures come from [`from_image`](Self::from_image), depth buffers from
/// [`create_depth_texture`](Self::create_depth_texture).
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    pub const COLOUR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// A 1x1 opaque white texture.
    ///
    /// Bound for draws that do not sample a texture so the pipeline layout
    /// never changes between textured and flat-coloured objects.
    pub fn create_fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Texture {
        let image = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Self::from_image(device, queue, &image, Some("fallback texture"))
    }

    /// Upload an RGBA image together with a full mip chain.
    ///
    /// Mip levels are downsampled on the CPU. The sampler repeats in every
    /// direction and filters linearly within and between mip levels.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &RgbaImage,
        label: Option<&str>,
    ) -> Self {
        let (width, height) = img.dimensions();
        let mip_level_count = mip_level_count(width, height);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOUR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in mip_chain(img).iter().enumerate() {
            let (mip_width, mip_height) = mip.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                mip,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip_width),
                    rows_per_image: Some(mip_height),
                },
                wgpu::Extent3d {
                    width: mip_width,
                    height: mip_height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_default_sampler(device));

        Self {
            texture,
            view,
            sampler,
        }
    }
}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// The base image followed by each successively halved level.
pub fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let (width, height) = base.dimensions();
    let levels = mip_level_count(width, height);
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base.clone());
    for level in 1..levels {
        let mip_width = (width >> level).max(1);
        let mip_height = (height >> level).max(1);
        let previous = &chain[level as usize - 1];
        chain.push(image::imageops::resize(
            previous,
            mip_width,
            mip_height,
            FilterType::Triangle,
        ));
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_ends_at_one_pixel() {
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(1, 1), 1);

        let chain = mip_chain(&RgbaImage::new(8, 2));
        let sizes: Vec<_> = chain.iter().map(|mip| mip.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }
}
