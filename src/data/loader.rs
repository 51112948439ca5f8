//! Minibatch iteration over an [`ImageSet`]

use super::augment::{to_unit_range, Augmenter};
use super::cifar::{ImageSet, CHANNELS, IMAGE_BYTES, IMAGE_SIZE};
use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor, TensorData};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A minibatch of images `[N, 3, 32, 32]` in [0, 1] and labels `[N]`
#[derive(Debug, Clone)]
pub struct ImageBatch<B: Backend> {
    pub images: Tensor<B, 4>,
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> ImageBatch<B> {
    /// Number of samples in the batch
    pub fn len(&self) -> usize {
        self.labels.dims()[0]
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Batches an image set, optionally shuffling and augmenting
#[derive(Debug, Clone)]
pub struct BatchLoader {
    set: ImageSet,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    augment: Option<Augmenter>,
}

impl BatchLoader {
    /// Training loader: shuffled, incomplete final batch dropped
    pub fn train(set: ImageSet, batch_size: usize, augment: bool) -> Self {
        Self {
            set,
            batch_size,
            shuffle: true,
            drop_last: true,
            augment: augment.then(Augmenter::default),
        }
    }

    /// Test loader: sequential, final partial batch kept, no augmentation
    pub fn test(set: ImageSet, batch_size: usize) -> Self {
        Self {
            set,
            batch_size,
            shuffle: false,
            drop_last: false,
            augment: None,
        }
    }

    /// Number of samples behind the loader
    pub fn num_samples(&self) -> usize {
        self.set.len()
    }

    /// Configured batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches yielded per epoch
    pub fn num_batches(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        if self.drop_last {
            self.set.len() / self.batch_size
        } else {
            self.set.len().div_ceil(self.batch_size)
        }
    }

    /// Iterate over one epoch.
    ///
    /// Shuffle order and augmentation draws depend only on `(seed, epoch)`, so
    /// a resumed run replays the same data stream from its resume epoch.
    pub fn epoch<B: Backend>(&self, seed: u64, epoch: usize, device: &B::Device) -> EpochIter<'_, B> {
        let mut rng = StdRng::seed_from_u64(epoch_seed(seed, epoch));
        let mut order: Vec<usize> = (0..self.set.len()).collect();
        if self.shuffle {
            order.shuffle(&mut rng);
        }
        EpochIter {
            loader: self,
            order,
            cursor: 0,
            rng,
            device: device.clone(),
        }
    }
}

fn epoch_seed(seed: u64, epoch: usize) -> u64 {
    seed ^ (epoch as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Iterator over the batches of one epoch
pub struct EpochIter<'a, B: Backend> {
    loader: &'a BatchLoader,
    order: Vec<usize>,
    cursor: usize,
    rng: StdRng,
    device: B::Device,
}

impl<B: Backend> Iterator for EpochIter<'_, B> {
    type Item = ImageBatch<B>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.order.len() - self.cursor;
        let batch_size = self.loader.batch_size;
        if remaining == 0 || batch_size == 0 || (self.loader.drop_last && remaining < batch_size) {
            return None;
        }

        let n = remaining.min(batch_size);
        let indices = &self.order[self.cursor..self.cursor + n];
        self.cursor += n;

        let mut pixels = vec![0.0f32; n * IMAGE_BYTES];
        let mut labels = Vec::with_capacity(n);
        for (slot, &index) in pixels.chunks_exact_mut(IMAGE_BYTES).zip(indices) {
            let image = self.loader.set.image(index);
            match &self.loader.augment {
                Some(augmenter) => augmenter.apply(image, &mut self.rng, slot),
                None => to_unit_range(image, slot),
            }
            labels.push(i64::from(self.loader.set.label(index)));
        }

        let images = Tensor::from_data(
            TensorData::new(pixels, [n, CHANNELS, IMAGE_SIZE, IMAGE_SIZE]),
            &self.device,
        );
        let labels = Tensor::from_data(TensorData::new(labels, [n]), &self.device);
        Some(ImageBatch { images, labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray<f32>;

    fn tiny_set(n: usize) -> ImageSet {
        let pixels = (0..n).flat_map(|i| vec![i as u8; IMAGE_BYTES]).collect();
        let labels = (0..n).map(|i| (i % 10) as u8).collect();
        ImageSet::new(pixels, labels).unwrap()
    }

    #[test]
    fn test_train_loader_drops_last_partial_batch() {
        let loader = BatchLoader::train(tiny_set(10), 4, true);
        assert_eq!(loader.num_batches(), 2);
        let batches: Vec<_> = loader.epoch::<B>(1, 0, &Default::default()).collect();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 4));
    }

    #[test]
    fn test_test_loader_keeps_last_partial_batch_in_order() {
        let loader = BatchLoader::test(tiny_set(10), 4);
        assert_eq!(loader.num_batches(), 3);
        let batches: Vec<_> = loader.epoch::<B>(1, 0, &Default::default()).collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].len(), 2);
        let labels = batches[0].labels.to_data().to_vec::<i64>().unwrap();
        assert_eq!(labels, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_shuffle_is_reproducible_per_epoch() {
        let loader = BatchLoader::train(tiny_set(32), 8, false);
        let labels = |epoch| -> Vec<i64> {
            loader
                .epoch::<B>(7, epoch, &Default::default())
                .flat_map(|b| b.labels.to_data().to_vec::<i64>().unwrap())
                .collect()
        };
        assert_eq!(labels(3), labels(3));
        assert_ne!(labels(3), labels(4));
    }

    #[test]
    fn test_batch_pixels_are_in_unit_range() {
        let loader = BatchLoader::test(tiny_set(3), 3);
        let batch = loader.epoch::<B>(0, 0, &Default::default()).next().unwrap();
        assert_eq!(batch.images.dims(), [3, 3, 32, 32]);
        let values = batch.images.to_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!((values[2 * IMAGE_BYTES] - 2.0 / 255.0).abs() < 1e-6);
    }
}
