//! Time subsystem.
//!
//! Provides stable, testable timing utilities without coupling to a runtime:
//! - [`Clock`]: injectable monotonic + wall-clock source
//! - [`FrameClock`]: per-loop frame delta clamping
//! - [`TimerQueue`]: cooperative single-threaded delayed callbacks
//! - [`FrameRequests`]: animation-frame request slot with cancel-and-reschedule semantics

mod clock;
mod frame_clock;
mod frame_request;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_clock::{FrameClock, FrameTime};
pub use frame_request::{FrameHandle, FrameRequests};
pub use timer::{TimerId, TimerQueue};
