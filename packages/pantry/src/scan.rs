//! # Barcode scan controller
//!
//! Drives one scan session from camera request to detected code:
//!
//! ```text
//! Idle ──start()──▶ RequestingCamera ──granted──▶ Scanning ──run()──▶ Detected
//!  ▲                      │ denied                   │ stop()
//!  └──────────────────────┴──────────────────────────┘
//! ```
//!
//! The terminal outcomes (detected, stopped, error) are reported through
//! return values; the controller itself is back at [`ScanState::Idle`]
//! afterwards.
//!
//! ## Concurrency
//!
//! Everything runs on one thread. State lives in a `RefCell` that is never
//! borrowed across an `.await`. Each loop iteration (wait for a frame, then
//! detect) is wrapped in [`Abortable`]; [`ScanController::stop`] fires the
//! stored handle, so a stop takes effect at the next poll even when the
//! detector is mid-call. A generation counter, bumped on every stop, lets a
//! camera request that completes after a stop notice it is stale and release
//! the stream it was handed.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};

use crate::platform::{BarcodeDetector, Camera, CaptureStream, FacingMode, FrameClock};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    RequestingCamera,
    Scanning,
}

/// How a detection loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A code was read; the camera has been released.
    Detected(String),
    /// [`ScanController::stop`] ended the session first.
    Stopped,
    /// Another session or loop was already running; nothing was touched.
    AlreadyActive,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("Barcode scanning not supported in this browser. Use Chrome/Edge, or add manually below.")]
    Unsupported,

    #[error("Could not access the camera. Check permissions and try again.")]
    Permission { detail: String },
}

struct Inner<S> {
    state: ScanState,
    stream: Option<Rc<S>>,
    pending: Option<AbortHandle>,
    generation: u64,
    looping: bool,
}

impl<S> Default for Inner<S> {
    fn default() -> Self {
        Self {
            state: ScanState::Idle,
            stream: None,
            pending: None,
            generation: 0,
            looping: false,
        }
    }
}

struct Shared<C: Camera, D, F> {
    camera: C,
    detector: Option<D>,
    clock: F,
    inner: RefCell<Inner<C::Stream>>,
}

impl<C: Camera, D, F> Drop for Shared<C, D, F> {
    fn drop(&mut self) {
        if let Some(stream) = self.inner.get_mut().stream.take() {
            stream.release();
        }
    }
}

/// Resets the single-loop flag however `run` exits.
struct LoopGuard<'a, S> {
    inner: &'a RefCell<Inner<S>>,
}

impl<S> Drop for LoopGuard<'_, S> {
    fn drop(&mut self) {
        self.inner.borrow_mut().looping = false;
    }
}

/// Camera + detector + frame pacing for one pantry page.
///
/// Cheap to clone; clones share the same session. A `None` detector means the
/// runtime cannot decode barcodes and [`start`](Self::start) reports
/// [`ScanError::Unsupported`].
pub struct ScanController<C: Camera, D, F> {
    shared: Rc<Shared<C, D, F>>,
}

// Manual Clone: derive would require C, D and F to be Clone.
impl<C: Camera, D, F> Clone for ScanController<C, D, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<C, D, F> ScanController<C, D, F>
where
    C: Camera,
    D: BarcodeDetector<C::Stream>,
    F: FrameClock,
{
    pub fn new(camera: C, detector: Option<D>, clock: F) -> Self {
        Self {
            shared: Rc::new(Shared {
                camera,
                detector,
                clock,
                inner: RefCell::new(Inner::default()),
            }),
        }
    }

    pub fn state(&self) -> ScanState {
        self.shared.inner.borrow().state
    }

    /// Whether a session is requesting the camera or scanning.
    pub fn is_active(&self) -> bool {
        self.state() != ScanState::Idle
    }

    pub fn is_supported(&self) -> bool {
        self.shared.detector.is_some()
    }

    /// Acquire the rear camera.
    ///
    /// Returns `Ok(true)` once scanning, `Ok(false)` when a session was
    /// already active or [`stop`](Self::stop) ran while the camera request
    /// was pending.
    pub async fn start(&self) -> Result<bool, ScanError> {
        let generation = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.state != ScanState::Idle {
                return Ok(false);
            }
            if self.shared.detector.is_none() {
                tracing::warn!("barcode detection unavailable");
                return Err(ScanError::Unsupported);
            }
            inner.state = ScanState::RequestingCamera;
            inner.generation += 1;
            inner.generation
        };
        tracing::debug!("requesting camera");

        let opened = self.shared.camera.open(FacingMode::Environment).await;

        let mut inner = self.shared.inner.borrow_mut();
        if inner.generation != generation {
            drop(inner);
            if let Ok(stream) = opened {
                stream.release();
            }
            tracing::debug!("scan stopped while the camera was being opened");
            return Ok(false);
        }
        match opened {
            Ok(stream) => {
                inner.stream = Some(Rc::new(stream));
                inner.state = ScanState::Scanning;
                tracing::debug!("scanning");
                Ok(true)
            }
            Err(e) => {
                inner.state = ScanState::Idle;
                tracing::warn!("camera request failed: {e}");
                Err(ScanError::Permission {
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Run the detection loop of the current session.
    ///
    /// One attempt per frame. Decode failures are skipped. The first
    /// detection goes to `on_detect`, then the session is stopped.
    pub async fn run(&self, mut on_detect: impl FnMut(&str)) -> ScanOutcome {
        let generation = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.looping {
                return ScanOutcome::AlreadyActive;
            }
            if inner.state != ScanState::Scanning {
                return ScanOutcome::Stopped;
            }
            inner.looping = true;
            inner.generation
        };
        let _guard = LoopGuard {
            inner: &self.shared.inner,
        };
        let Some(detector) = self.shared.detector.as_ref() else {
            return ScanOutcome::Stopped;
        };

        loop {
            let (stream, registration) = {
                let mut inner = self.shared.inner.borrow_mut();
                if inner.generation != generation || inner.state != ScanState::Scanning {
                    return ScanOutcome::Stopped;
                }
                let Some(stream) = inner.stream.clone() else {
                    return ScanOutcome::Stopped;
                };
                let (handle, registration) = AbortHandle::new_pair();
                inner.pending = Some(handle);
                (stream, registration)
            };

            let attempt = Abortable::new(
                async {
                    self.shared.clock.next_frame().await;
                    detector.detect(&stream).await
                },
                registration,
            )
            .await;
            self.shared.inner.borrow_mut().pending = None;

            let found = match attempt {
                Err(_aborted) => return ScanOutcome::Stopped,
                Ok(Err(e)) => {
                    tracing::trace!("frame skipped: {e}");
                    continue;
                }
                Ok(Ok(found)) => found,
            };
            let Some(first) = found.into_iter().next() else {
                continue;
            };

            let code = first.raw_value;
            tracing::debug!(code = %code, format = %first.format, "barcode detected");
            drop(stream);
            on_detect(&code);
            self.stop();
            return ScanOutcome::Detected(code);
        }
    }

    /// [`start`](Self::start) then [`run`](Self::run).
    pub async fn scan(&self, on_detect: impl FnMut(&str)) -> Result<ScanOutcome, ScanError> {
        if !self.start().await? {
            return Ok(if self.is_active() {
                ScanOutcome::AlreadyActive
            } else {
                ScanOutcome::Stopped
            });
        }
        Ok(self.run(on_detect).await)
    }

    /// End the session: cancel the pending frame, release the camera, go
    /// back to [`ScanState::Idle`]. Safe to call at any time, any number of
    /// times.
    pub fn stop(&self) {
        let (stream, pending, was) = {
            let mut inner = self.shared.inner.borrow_mut();
            inner.generation += 1;
            let was = std::mem::take(&mut inner.state);
            (inner.stream.take(), inner.pending.take(), was)
        };
        if let Some(pending) = pending {
            pending.abort();
        }
        if let Some(stream) = stream {
            stream.release();
        }
        if was != ScanState::Idle {
            tracing::debug!(from = ?was, "scan stopped");
        }
    }
}
