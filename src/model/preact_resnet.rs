//! Pre-activation ResNet-18 for 32x32 inputs

use super::{Classifier, Mode};
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use serde::{Deserialize, Serialize};

/// Architecture hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreActResNetConfig {
    /// Output classes
    pub num_classes: usize,
    /// Channels of the first stage; later stages double it
    pub base_width: usize,
    /// Residual blocks per stage
    pub blocks: [usize; 4],
}

impl PreActResNetConfig {
    /// PreAct-ResNet18: [2, 2, 2, 2] blocks, 64 base channels
    pub fn resnet18(num_classes: usize) -> Self {
        Self {
            num_classes,
            base_width: 64,
            blocks: [2, 2, 2, 2],
        }
    }

    /// Override the base width (used for small test models)
    pub fn with_base_width(mut self, base_width: usize) -> Self {
        self.base_width = base_width;
        self
    }

    /// Initialize a model with fresh weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> PreActResNet<B> {
        let width = self.base_width;
        let stem = conv3x3(3, width, 1, device);

        let mut layers = Vec::new();
        let mut in_channels = width;
        for (stage, &count) in self.blocks.iter().enumerate() {
            let out_channels = width << stage;
            let first_stride = if stage == 0 { 1 } else { 2 };
            for i in 0..count {
                let stride = if i == 0 { first_stride } else { 1 };
                layers.push(PreActBlock::new(in_channels, out_channels, stride, device));
                in_channels = out_channels;
            }
        }

        PreActResNet {
            stem,
            layers,
            bn: BatchNormConfig::new(in_channels).init(device),
            pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            head: LinearConfig::new(in_channels, self.num_classes).init(device),
        }
    }
}

fn conv3x3<B: Backend>(
    in_channels: usize,
    out_channels: usize,
    stride: usize,
    device: &B::Device,
) -> Conv2d<B> {
    Conv2dConfig::new([in_channels, out_channels], [3, 3])
        .with_stride([stride, stride])
        .with_padding(PaddingConfig2d::Explicit(1, 1))
        .with_bias(false)
        .init(device)
}

/// Batch norm honouring [`Mode`] regardless of backend.
///
/// burn picks batch statistics whenever autodiff is enabled; evaluation
/// under attack needs input gradients with running statistics, so `Eval`
/// applies the stored mean and variance directly.
pub fn batch_norm<B: Backend>(bn: &BatchNorm<B, 2>, x: Tensor<B, 4>, mode: Mode) -> Tensor<B, 4> {
    match mode {
        Mode::Train => bn.forward(x),
        Mode::Eval => {
            let [channels] = bn.gamma.val().dims();
            let shape = [1, channels, 1, 1];
            let mean = bn.running_mean.value().reshape(shape);
            let std = bn
                .running_var
                .value()
                .add_scalar(bn.epsilon)
                .sqrt()
                .reshape(shape);
            x.sub(mean)
                .div(std)
                .mul(bn.gamma.val().reshape(shape))
                .add(bn.beta.val().reshape(shape))
        }
    }
}

/// Residual block with BN-ReLU before each convolution
#[derive(Module, Debug)]
pub struct PreActBlock<B: Backend> {
    bn1: BatchNorm<B, 2>,
    conv1: Conv2d<B>,
    bn2: BatchNorm<B, 2>,
    conv2: Conv2d<B>,
    shortcut: Option<Conv2d<B>>,
}

impl<B: Backend> PreActBlock<B> {
    fn new(in_channels: usize, out_channels: usize, stride: usize, device: &B::Device) -> Self {
        let shortcut = (stride != 1 || in_channels != out_channels).then(|| {
            Conv2dConfig::new([in_channels, out_channels], [1, 1])
                .with_stride([stride, stride])
                .with_bias(false)
                .init(device)
        });

        Self {
            bn1: BatchNormConfig::new(in_channels).init(device),
            conv1: conv3x3(in_channels, out_channels, stride, device),
            bn2: BatchNormConfig::new(out_channels).init(device),
            conv2: conv3x3(out_channels, out_channels, 1, device),
            shortcut,
        }
    }

    pub fn forward(&self, x: Tensor<B, 4>, mode: Mode) -> Tensor<B, 4> {
        let out = relu(batch_norm(&self.bn1, x.clone(), mode));
        // The projection sees the pre-activated input
        let identity = match &self.shortcut {
            Some(conv) => conv.forward(out.clone()),
            None => x,
        };
        let out = self.conv1.forward(out);
        let out = self.conv2.forward(relu(batch_norm(&self.bn2, out, mode)));
        out + identity
    }
}

/// PreAct-ResNet classifier
#[derive(Module, Debug)]
pub struct PreActResNet<B: Backend> {
    stem: Conv2d<B>,
    layers: Vec<PreActBlock<B>>,
    bn: BatchNorm<B, 2>,
    pool: AdaptiveAvgPool2d,
    /// Linear classifier over pooled features
    pub head: Linear<B>,
}

impl<B: Backend> PreActResNet<B> {
    /// Logits `[N, num_classes]` for images `[N, 3, H, W]`
    pub fn forward(&self, images: Tensor<B, 4>, mode: Mode) -> Tensor<B, 2> {
        let mut x = self.stem.forward(images);
        for block in &self.layers {
            x = block.forward(x, mode);
        }
        let x = relu(batch_norm(&self.bn, x, mode));
        let x = self.pool.forward(x);
        let [n, c, _, _] = x.dims();
        self.head.forward(x.reshape([n, c]))
    }

    /// Number of residual blocks
    pub fn num_blocks(&self) -> usize {
        self.layers.len()
    }
}

impl<B: Backend> Classifier<B> for PreActResNet<B> {
    fn logits(&self, images: Tensor<B, 4>, mode: Mode) -> Tensor<B, 2> {
        self.forward(images, mode)
    }
}
