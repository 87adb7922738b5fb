/// Handle of one requested animation frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(u64);

/// Single animation-frame request slot.
///
/// Mirrors the cancel-then-request pattern used to coalesce bursts of input:
/// every [`request`](Self::request) cancels the previous pending handle, so at
/// most one callback is due when the host presents the next frame.
#[derive(Debug, Default)]
pub struct FrameRequests {
    pending: Option<FrameHandle>,
    next: u64,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending request and schedules a fresh one.
    pub fn request(&mut self) -> FrameHandle {
        self.cancel();
        self.next = self.next.wrapping_add(1);
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    /// Cancels the pending request. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consumes the pending request, if any. Called once per presented frame.
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
