//! Scene texture loading through the registry with in-memory doubles

use attiview_core::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct FakeDecoder {
    decoded: RefCell<Vec<PathBuf>>,
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, path: &Path) -> Result<RawImage> {
        self.decoded.borrow_mut().push(path.to_path_buf());
        if path.starts_with("missing") {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        RawImage::from_rgb(4, 2, vec![128; 4 * 2 * 3])
    }
}

#[derive(Default)]
struct CountingUploader {
    next: u32,
    bytes: usize,
}

impl TextureUploader for CountingUploader {
    fn upload(&mut self, image: RawImage, _filter: FilterMode) -> Result<TextureHandle> {
        self.next += 1;
        self.bytes += image.pixels().len();
        Ok(TextureHandle::new(self.next))
    }
}

#[test]
fn same_path_decodes_once_and_shares_handle() {
    let mut registry = TextureRegistry::new(FakeDecoder::default(), CountingUploader::default());

    let textures = SceneTextures::load(&mut registry, "sphere.jpg", "sphere.jpg");

    assert_eq!(textures.sphere, textures.ring);
    assert!(textures.sphere.is_some());
    assert_eq!(registry.decoder().decoded.borrow().len(), 1);
    assert_eq!(registry.uploader().bytes, 24);
}

#[test]
fn one_missing_texture_leaves_the_other_bound() {
    let mut registry = TextureRegistry::new(FakeDecoder::default(), CountingUploader::default());

    let textures = SceneTextures::load(&mut registry, "sphere.jpg", "missing/ring.jpg");
    assert!(textures.sphere.is_some());
    assert!(textures.ring.is_none());

    let draws = SceneRenderer::new()
        .compose(&OrientationState::default(), &textures)
        .resolve()
        .unwrap();
    assert!(matches!(draws[0].texture, TextureState::Bound(_)));
    assert_eq!(draws[1].texture, TextureState::Disabled);
}

#[test]
fn arc_spans_a_lower_half_circle_from_left_to_right() {
    let renderer = SceneRenderer::new();
    let arc = renderer.arc().points();

    assert_eq!(arc.len(), ARC_POINTS);
    let first = arc[0];
    let last = arc[ARC_POINTS - 1];
    assert!((first.x + (ARC_RADIUS as f32)).abs() < 1e-6 && first.y.abs() < 1e-6);
    assert!((last.x - (ARC_RADIUS as f32)).abs() < 1e-6 && last.y.abs() < 1e-6);
    assert!(arc[ARC_POINTS / 2].y < -(ARC_RADIUS as f32) + 1e-6);
}
