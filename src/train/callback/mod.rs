//! Callback system for training events
//!
//! Provides extensible hooks for training loop events:
//! - `on_train_begin` / `on_train_end`
//! - `on_epoch_begin` / `on_epoch_end`
//! - `on_step_begin` / `on_step_end` (per minibatch)
//!
//! # Example
//!
//! ```rust
//! use endurecer::train::callback::{TrainerCallback, CallbackContext, CallbackAction};
//!
//! struct PrintCallback;
//!
//! impl TrainerCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
//!         println!("Epoch {} robust acc {:?}", ctx.epoch, ctx.robust_acc);
//!         CallbackAction::Continue
//!     }
//! }
//! ```

mod early_stopping;
mod manager;
mod progress;
mod traits;

pub use early_stopping::EarlyStopping;
pub use manager::CallbackManager;
pub use progress::ProgressCallback;
pub use traits::{CallbackAction, CallbackContext, TrainerCallback};
