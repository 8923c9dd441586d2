//! Single physical button decoded into three actions.

mod core;

pub use self::core::{ButtonDecoder, ButtonEvent, ButtonOutput, ButtonStateId};
