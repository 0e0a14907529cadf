//! The scan controller for the current platform.

use pantry::ScanController;

/// Id of the `<video>` element the camera preview renders into.
pub const SCANNER_VIDEO_ID: &str = "pantry-scanner-video";

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformScanner = ScanController<
    pantry::web::MediaCamera,
    pantry::web::WebBarcodeDetector,
    pantry::web::AnimationFrameClock,
>;

/// Without browser APIs scanning is unsupported; manual entry still works.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformScanner = ScanController<pantry::NoCamera, pantry::NoDetector, pantry::TimerClock>;

pub fn make_scanner() -> PlatformScanner {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        ScanController::new(
            pantry::web::MediaCamera::new(SCANNER_VIDEO_ID),
            pantry::web::WebBarcodeDetector::new(),
            pantry::web::AnimationFrameClock,
        )
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        ScanController::new(pantry::NoCamera, None, pantry::TimerClock::default())
    }
}
