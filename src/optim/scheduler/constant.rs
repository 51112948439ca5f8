use super::LRScheduler;

/// Fixed learning rate
#[derive(Debug, Clone, Copy)]
pub struct ConstantLR {
    lr: f64,
}

impl ConstantLR {
    pub fn new(lr: f64) -> Self {
        Self { lr }
    }
}

impl LRScheduler for ConstantLR {
    fn get_lr(&self) -> f64 {
        self.lr
    }

    fn step(&mut self) {}

    fn set_epoch(&mut self, _epoch: usize) {}
}
