#![allow(dead_code)]

use std::{
    cell::Cell,
    path::PathBuf,
};

use image::{DynamicImage, ImageBuffer, Luma, LumaA, Rgb, Rgba};
use shape_viewer::resources::texture::{DecodedImage, TextureError, TextureUploader};

pub const EPSILON: f32 = 1e-4;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_matrix_close(actual: cgmath::Matrix4<f32>, expected: cgmath::Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for (column, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        for row in 0..4 {
            assert!(
                (a[row] - e[row]).abs() < EPSILON,
                "matrix differs at column {column}, row {row}: {actual:?} != {expected:?}"
            );
        }
    }
}

/// What the fake uploader hands out instead of a GPU texture.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeHandle {
    pub tag: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// Counts uploads and can be told to reject them.
#[derive(Default)]
pub struct FakeUploader {
    pub uploads: Cell<usize>,
    pub reject: bool,
}

impl FakeUploader {
    pub fn rejecting() -> Self {
        Self {
            uploads: Cell::new(0),
            reject: true,
        }
    }
}

impl TextureUploader for FakeUploader {
    type Handle = FakeHandle;

    fn upload(&self, image: &DecodedImage, tag: &str) -> Result<FakeHandle, TextureError> {
        if self.reject {
            return Err(TextureError::Upload {
                tag: tag.to_string(),
                reason: "rejected by test".to_string(),
            });
        }
        self.uploads.set(self.uploads.get() + 1);
        Ok(FakeHandle {
            tag: tag.to_string(),
            width: image.width(),
            height: image.height(),
            channels: image.channels,
        })
    }
}

/// Directory for files written by one test.
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("shape-viewer-tests")
        .join(format!("{}-{}", test, std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

pub fn write_image(dir: &PathBuf, name: &str, image: DynamicImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("failed to write test image");
    path
}

pub fn rgb_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
}

pub fn rgba_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    }))
}

pub fn gray_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(ImageBuffer::from_fn(width, height, |x, _| Luma([(x % 256) as u8])))
}

pub fn gray_alpha_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLumaA8(ImageBuffer::from_fn(width, height, |x, _| {
        LumaA([(x % 256) as u8, 255])
    }))
}
