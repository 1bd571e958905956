//! Runtime module - drives the Elm loop for a host
//!
//! - `app` - `GridRuntime`: update loop, command execution, key dispatch
//! - `click` - double-click detection from raw presses
//! - `observer` - host notification sink

pub mod app;
pub mod click;
pub mod observer;

pub use app::GridRuntime;
pub use click::{ClickTracker, DOUBLE_CLICK_TIME};
pub use observer::{GridObserver, Notification, RecordingObserver, TracingObserver};
