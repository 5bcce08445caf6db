use std::path::Path;

use cgmath::Vector3;
use image::{DynamicImage, ImageBuffer, Rgb};
use shape_viewer::resources::{
    material::{MaterialRegistry, presets},
    texture::{DecodedImage, TextureError, TextureRegistry},
};

use crate::common::test_utils::{
    FakeHandle, FakeUploader, gray_alpha_image, gray_image, rgb_image, rgba_image, scratch_dir,
    write_image,
};

mod common;

#[test]
fn first_texture_gets_slot_zero() {
    let dir = scratch_dir("first_texture_gets_slot_zero");
    let brick = write_image(&dir, "brick.jpg", rgb_image(256, 256));
    let uploader = FakeUploader::default();
    let mut registry = TextureRegistry::new();

    let slot = registry.load(&uploader, &brick, "floor").expect("brick should load");

    assert_eq!(slot, 0);
    assert_eq!(registry.lookup_slot("floor"), Some(0));
    assert_eq!(
        registry.lookup_handle("floor"),
        Some(&FakeHandle {
            tag: "floor".to_string(),
            width: 256,
            height: 256,
            channels: 3,
        })
    );
    assert_eq!(uploader.uploads.get(), 1);
}

#[test]
fn slots_follow_registration_order() {
    let dir = scratch_dir("slots_follow_registration_order");
    let uploader = FakeUploader::default();
    let mut registry = TextureRegistry::new();

    for (index, tag) in ["floor", "cone", "box"].into_iter().enumerate() {
        let path = write_image(&dir, &format!("{tag}.png"), rgba_image(16, 8));
        assert_eq!(registry.load(&uploader, &path, tag).ok(), Some(index));
    }

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.lookup_slot("floor"), Some(0));
    assert_eq!(registry.lookup_slot("cone"), Some(1));
    assert_eq!(registry.lookup_slot("box"), Some(2));
    assert_eq!(registry.lookup_handle("cone").map(|h| h.channels), Some(4));
    assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["floor", "cone", "box"]);
}

#[test]
fn unsupported_channel_counts_are_rejected() {
    let dir = scratch_dir("unsupported_channel_counts_are_rejected");
    let uploader = FakeUploader::default();
    let mut registry = TextureRegistry::new();
    let ok = write_image(&dir, "ok.png", rgb_image(4, 4));
    registry.load(&uploader, &ok, "ok").expect("rgb should load");

    let gray = write_image(&dir, "gray.png", gray_image(4, 4));
    let result = registry.load(&uploader, &gray, "gray");
    assert!(matches!(result, Err(TextureError::UnsupportedChannels { channels: 1, .. })));

    let gray_alpha = write_image(&dir, "gray_alpha.png", gray_alpha_image(4, 4));
    let result = registry.load(&uploader, &gray_alpha, "gray_alpha");
    assert!(matches!(result, Err(TextureError::UnsupportedChannels { channels: 2, .. })));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup_slot("gray"), None);
    assert_eq!(uploader.uploads.get(), 1);
}

#[test]
fn unreadable_files_leave_registry_unchanged() {
    let dir = scratch_dir("unreadable_files_leave_registry_unchanged");
    let uploader = FakeUploader::default();
    let mut registry: TextureRegistry<FakeHandle> = TextureRegistry::new();

    let missing = registry.load(&uploader, &dir.join("missing.png"), "missing");
    assert!(matches!(missing, Err(TextureError::Io { .. })));

    let garbage = dir.join("garbage.png");
    std::fs::write(&garbage, b"definitely not an image").expect("failed to write file");
    let result = registry.load(&uploader, &garbage, "garbage");
    assert!(matches!(result, Err(TextureError::Decode { .. })));

    assert!(registry.is_empty());
}

#[test]
fn failed_upload_is_not_registered() {
    let dir = scratch_dir("failed_upload_is_not_registered");
    let path = write_image(&dir, "brick.png", rgb_image(8, 8));
    let mut registry = TextureRegistry::new();

    let result = registry.load(&FakeUploader::rejecting(), &path, "floor");

    assert!(matches!(result, Err(TextureError::Upload { .. })));
    assert!(registry.is_empty());
}

#[test]
fn images_are_flipped_vertically() {
    // top row red, bottom row blue
    let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(1, 2, |_, y| {
        if y == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
    }));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("failed to encode");

    let decoded = DecodedImage::from_bytes(&bytes, Path::new("in-memory.png")).expect("decodes");

    assert_eq!(decoded.channels, 3);
    assert_eq!(decoded.rgba.get_pixel(0, 0).0, [0, 0, 255, 255]);
    assert_eq!(decoded.rgba.get_pixel(0, 1).0, [255, 0, 0, 255]);
}

#[test]
fn lookups_miss_for_unknown_tags() {
    let registry: TextureRegistry<FakeHandle> = TextureRegistry::new();
    assert_eq!(registry.lookup_slot("floor"), None);
    assert_eq!(registry.lookup_handle("floor"), None);
}

#[test]
fn duplicate_tags_resolve_to_first_registration() {
    let mut registry = TextureRegistry::new();
    assert_eq!(registry.register("floor", 'a'), 0);
    assert_eq!(registry.register("floor", 'b'), 1);
    assert_eq!(registry.lookup_slot("floor"), Some(0));
    assert_eq!(registry.lookup_handle("floor"), Some(&'a'));
}

#[test]
fn bind_all_uses_registration_index() {
    let mut registry = TextureRegistry::new();
    registry.register("floor", 10);
    registry.register("cone", 20);

    let bound = registry.bind_all(|slot, entry| (slot, entry.tag.clone(), entry.handle));

    assert_eq!(
        bound,
        vec![(0, "floor".to_string(), 10), (1, "cone".to_string(), 20)]
    );
}

#[test]
fn release_all_empties_the_table() {
    let mut registry = TextureRegistry::new();
    registry.register("floor", ());
    registry.register("cone", ());

    assert_eq!(registry.release_all(), 2);
    assert!(registry.is_empty());
    assert_eq!(registry.lookup_slot("floor"), None);
}

#[test]
fn material_presets_are_available_by_tag() {
    let registry = MaterialRegistry::with_presets();
    assert_eq!(registry.len(), 6);
    for tag in ["gold", "cement", "wood", "tile", "glass", "clay"] {
        assert!(registry.lookup(tag).is_some(), "missing preset {tag}");
    }

    let gold = registry.lookup("gold").expect("gold preset");
    assert_eq!(gold.ambient_color, Vector3::new(0.2, 0.2, 0.1));
    assert_eq!(gold.ambient_strength, 0.4);
    assert_eq!(gold.diffuse_color, Vector3::new(0.3, 0.3, 0.2));
    assert_eq!(gold.specular_color, Vector3::new(0.6, 0.5, 0.4));
    assert_eq!(gold.shininess, 22.0);

    assert!(registry.lookup("marble").is_none());
}

#[test]
fn material_registry_is_populated_once() {
    let mut registry = MaterialRegistry::new();
    assert!(registry.is_empty());
    registry.populate();
    registry.populate();
    assert_eq!(registry.len(), presets().len());
}
