//! Training-time augmentation: padded random crop and horizontal flip
//!
//! Pixels are only rescaled to [0, 1]; the L∞ budget is expressed in those
//! units, so no mean/std normalization is applied.

use super::cifar::{CHANNELS, IMAGE_BYTES, IMAGE_SIZE};
use ndarray::{ArrayView3, ArrayViewMut3};
use rand::Rng;

/// Random crop with zero padding followed by a random horizontal flip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Augmenter {
    /// Zero padding added on every side before cropping
    pub padding: usize,
    /// Probability of mirroring the image horizontally
    pub flip_prob: f64,
}

impl Default for Augmenter {
    fn default() -> Self {
        Self {
            padding: 4,
            flip_prob: 0.5,
        }
    }
}

impl Augmenter {
    /// Write an augmented copy of `image` (CHW bytes) into `out` as floats in [0, 1]
    pub fn apply<R: Rng + ?Sized>(&self, image: &[u8], rng: &mut R, out: &mut [f32]) {
        let offset_y = rng.gen_range(0..=2 * self.padding);
        let offset_x = rng.gen_range(0..=2 * self.padding);
        let flip = rng.gen_bool(self.flip_prob);
        self.crop_flip(image, offset_y, offset_x, flip, out);
    }

    /// Deterministic core of [`Augmenter::apply`]
    ///
    /// # Panics
    ///
    /// Panics if `image` or `out` is not exactly one CHW image long.
    pub fn crop_flip(
        &self,
        image: &[u8],
        offset_y: usize,
        offset_x: usize,
        flip: bool,
        out: &mut [f32],
    ) {
        assert_eq!(image.len(), IMAGE_BYTES, "source is not one CHW image");
        assert_eq!(out.len(), IMAGE_BYTES, "destination is not one CHW image");
        let shape = (CHANNELS, IMAGE_SIZE, IMAGE_SIZE);
        let (Ok(src), Ok(mut dst)) = (
            ArrayView3::from_shape(shape, image),
            ArrayViewMut3::from_shape(shape, out),
        ) else {
            return;
        };

        let pad = self.padding as isize;
        let size = IMAGE_SIZE as isize;
        for ((c, y, x), value) in dst.indexed_iter_mut() {
            let sx = if flip { IMAGE_SIZE - 1 - x } else { x };
            let py = y as isize + offset_y as isize - pad;
            let px = sx as isize + offset_x as isize - pad;
            *value = if (0..size).contains(&py) && (0..size).contains(&px) {
                f32::from(src[[c, py as usize, px as usize]]) / 255.0
            } else {
                0.0
            };
        }
    }
}

/// Rescale CHW bytes into `out` without augmentation
pub fn to_unit_range(image: &[u8], out: &mut [f32]) {
    assert_eq!(image.len(), out.len(), "source and destination lengths differ");
    for (dst, &src) in out.iter_mut().zip(image) {
        *dst = f32::from(src) / 255.0;
    }
}
