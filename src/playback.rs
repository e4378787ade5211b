//! Play/pause state machine and frame pacing.
//!
//! The controller never talks to the display directly; it asks an injected
//! [`FrameScheduler`] for next-frame callbacks, which keeps the stride and
//! cancellation logic testable against a fake scheduler.

/// Next-frame scheduling capability. The browser implementation wraps
/// `requestAnimationFrame`/`cancelAnimationFrame`.
pub trait FrameScheduler {
    type Handle;
    /// Request a wake-up at the next display refresh.
    fn schedule(&mut self) -> Self::Handle;
    /// Cancel a wake-up that has not fired yet.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Drives rendering every frame and the simulation every `stride`th frame.
///
/// A pending handle exists exactly while playback is running; `pause` is the
/// sole cancellation path and leaves no dangling handle behind.
pub struct AnimationController<S: FrameScheduler> {
    scheduler: S,
    stride: u32,
    frames: u64,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> AnimationController<S> {
    pub fn new(scheduler: S, stride: u32) -> Self {
        debug_assert!(stride > 0, "stride of zero would never advance");
        Self {
            scheduler,
            stride,
            frames: 0,
            pending: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pending.is_none()
    }

    /// Start the scheduling loop. A no-op while already running.
    pub fn play(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(self.scheduler.schedule());
        log::info!("playback started");
    }

    /// Cancel the pending frame and stop. A no-op while already paused.
    pub fn pause(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };
        self.scheduler.cancel(handle);
        log::info!("playback paused");
    }

    /// Loop body, invoked when the scheduled frame fires.
    ///
    /// `advance` runs only on stride boundaries and must draw the current
    /// engine state before requesting the step, so the drawn frame always
    /// reflects the state preceding it. The next frame is scheduled
    /// regardless of the stride. A callback that fires after `pause` does
    /// nothing.
    pub fn on_frame<F: FnOnce()>(&mut self, advance: F) {
        if self.pending.take().is_none() {
            return;
        }
        self.frames = self.frames.wrapping_add(1);
        if self.frames % u64::from(self.stride) == 0 {
            advance();
        }
        self.pending = Some(self.scheduler.schedule());
    }
}
