//! Touch gesture recognition: controller frames in, semantic gestures out.

mod core;
pub mod frame;
pub mod poller;
pub mod projection;
mod types;
pub mod zone;

pub use self::core::{GestureEngine, GestureStateId};
pub use frame::{Axs15231bTouch, TouchDriverError};
pub use poller::{PollOutcome, ReadFailure, TouchController, TouchPoller};
pub use types::{
    GestureEvent, GestureOutput, SwipeDirection, TouchPhase, TouchSample, Zone,
};
