//! The browser capabilities the scanner needs, as traits.
//!
//! [`ScanController`](crate::ScanController) only talks to these, so it runs
//! unchanged against the real camera in a browser and against fakes in
//! tests. Builds without a camera use [`NoCamera`] / [`NoDetector`].

use std::future::Future;

/// Which camera to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Rear camera, the one pointed at the product.
    #[default]
    Environment,
    User,
}

impl FacingMode {
    /// Value of the `facingMode` media constraint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::User => "user",
        }
    }
}

/// A barcode found in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedBarcode {
    pub raw_value: String,
    pub format: String,
}

impl DetectedBarcode {
    pub fn new(raw_value: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            raw_value: raw_value.into(),
            format: format.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("camera unavailable: {0}")]
pub struct CameraError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("barcode detection failed: {0}")]
pub struct DetectError(pub String);

/// A live camera feed.
pub trait CaptureStream {
    /// Stop every track of the stream. Calling it again does nothing.
    fn release(&self);
}

/// Grants access to a camera.
pub trait Camera {
    type Stream: CaptureStream;

    fn open(
        &self,
        facing: FacingMode,
    ) -> impl Future<Output = Result<Self::Stream, CameraError>>;
}

/// Looks for barcodes in the current frame of a stream.
pub trait BarcodeDetector<S> {
    fn detect(
        &self,
        stream: &S,
    ) -> impl Future<Output = Result<Vec<DetectedBarcode>, DetectError>>;
}

/// Paces the detection loop: resolves once per display frame.
pub trait FrameClock {
    fn next_frame(&self) -> impl Future<Output = ()>;
}

/// Camera for builds that have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

/// Stream type of [`NoCamera`]; never constructed.
#[derive(Debug)]
pub enum NoStream {}

impl CaptureStream for NoStream {
    fn release(&self) {
        match *self {}
    }
}

impl Camera for NoCamera {
    type Stream = NoStream;

    fn open(
        &self,
        _facing: FacingMode,
    ) -> impl Future<Output = Result<Self::Stream, CameraError>> {
        async { Err(CameraError("no camera on this platform".into())) }
    }
}

/// Detector for builds without barcode support; never constructed, so a
/// controller holding `Option<NoDetector>` always reports "unsupported".
#[derive(Debug)]
pub enum NoDetector {}

impl<S> BarcodeDetector<S> for NoDetector {
    fn detect(
        &self,
        _stream: &S,
    ) -> impl Future<Output = Result<Vec<DetectedBarcode>, DetectError>> {
        let this = self;
        async move {
            let unreachable: Result<Vec<DetectedBarcode>, DetectError> = match *this {};
            unreachable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rear_camera_by_default() {
        assert_eq!(FacingMode::default(), FacingMode::Environment);
        assert_eq!(FacingMode::default().as_str(), "environment");
    }

    #[tokio::test]
    async fn test_no_camera_refuses() {
        let err = NoCamera.open(FacingMode::Environment).await.unwrap_err();
        assert!(err.to_string().contains("no camera"));
    }
}
