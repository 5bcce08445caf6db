//! Texture loading and the tag -> texture registry.
//!
//! Loading is split in two steps: [`DecodedImage`] reads and validates an
//! image file on the CPU, and a [`TextureUploader`] turns it into a handle
//! (a GPU [`Texture`] in the viewer). The [`TextureRegistry`] records the
//! handles in registration order; that order is the slot each tag is bound
//! to when the scene selects a texture.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use crate::data_structures::texture::Texture;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has {channels} channels, only 3 or 4 are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("could not upload texture '{tag}': {reason}")]
    Upload { tag: String, reason: String },
}

/// A validated image, flipped vertically and expanded to RGBA8.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Channel count of the source file (3 or 4).
    pub channels: u8,
    pub rgba: RgbaImage,
}

impl DecodedImage {
    pub fn open(path: &Path) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, path)
    }

    /// Decodes `bytes`, guessing the format from the content. `path` is only used in errors.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels,
            });
        }
        // Texture coordinates put v = 0 at the bottom of the image.
        let rgba = img.flipv().to_rgba8();
        Ok(Self { channels, rgba })
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }
}

/// Creates texture handles from decoded images.
pub trait TextureUploader {
    type Handle;

    fn upload(&self, image: &DecodedImage, tag: &str) -> Result<Self::Handle, TextureError>;
}

/// Uploads into GPU textures with a full mip chain.
pub struct GpuUploader<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

impl TextureUploader for GpuUploader<'_> {
    type Handle = Texture;

    fn upload(&self, image: &DecodedImage, tag: &str) -> Result<Texture, TextureError> {
        let limit = self.device.limits().max_texture_dimension_2d;
        if image.width() > limit || image.height() > limit {
            return Err(TextureError::Upload {
                tag: tag.to_string(),
                reason: format!(
                    "{}x{} exceeds the device limit of {limit}",
                    image.width(),
                    image.height()
                ),
            });
        }
        Ok(Texture::from_image(self.device, self.queue, &image.rgba, Some(tag)))
    }
}

#[derive(Debug)]
pub struct TextureEntry<H> {
    pub tag: String,
    pub handle: H,
}

/// Ordered tag -> handle table. The slot of a tag is its registration index.
///
/// Tags are expected to be unique; when a tag is registered twice lookups
/// resolve to the first registration.
#[derive(Debug)]
pub struct TextureRegistry<H> {
    entries: Vec<TextureEntry<H>>,
}

impl<H> TextureRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Decodes `path`, uploads it and registers it under `tag`.
    ///
    /// Returns the slot of the new texture. On failure the error is logged and
    /// the registry is left unchanged.
    pub fn load<U>(&mut self, uploader: &U, path: &Path, tag: &str) -> Result<usize, TextureError>
    where
        U: TextureUploader<Handle = H>,
    {
        let result = DecodedImage::open(path).and_then(|image| {
            log::info!(
                "Successfully loaded image: {}, width: {}, height: {}, channels: {}",
                path.display(),
                image.width(),
                image.height(),
                image.channels
            );
            uploader.upload(&image, tag)
        });
        match result {
            Ok(handle) => Ok(self.register(tag, handle)),
            Err(e) => {
                log::error!("Could not load texture '{tag}': {e}");
                Err(e)
            }
        }
    }

    /// Appends an already created handle and returns its slot.
    pub fn register(&mut self, tag: &str, handle: H) -> usize {
        if self.lookup_slot(tag).is_some() {
            log::warn!("Texture tag '{tag}' is registered more than once");
        }
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        self.entries.len() - 1
    }

    pub fn lookup_handle(&self, tag: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.handle)
    }

    pub fn lookup_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    /// Binds every texture to the slot equal to its registration index.
    ///
    /// The returned bindings are ordered by slot.
    pub fn bind_all<B>(&self, mut bind: impl FnMut(usize, &TextureEntry<H>) -> B) -> Vec<B> {
        self.entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| bind(slot, entry))
            .collect()
    }

    /// Drops every handle and empties the table. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        label: Some("object_texture_bind_group_layout"),
    })
}

/// Bind group exposing `texture` as the shader's `objectTexture`.
pub fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    label: &str,
) -> wgpu::BindGroup {
    let fallback_sampler;
    let sampler = match &texture.sampler {
        Some(sampler) => sampler,
        None => {
            fallback_sampler = crate::data_structures::texture::create_default_sampler(device);
            &fallback_sampler
        }
    };
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some(label),
    })
}
