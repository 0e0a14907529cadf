//! # Pantry crate — scanning and reconciling pantry items
//!
//! Turns a barcode in front of the camera into a row of the pantry list.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Barcode → product lookup (static table with a generic fallback) |
//! | [`items`] | [`PantryList`]: in-memory scanned items, add / remove / search |
//! | [`scan`] | [`ScanController`]: camera acquisition, frame-paced detection loop, start/stop |
//! | [`platform`] | The seams the controller runs against: [`Camera`], [`CaptureStream`], [`BarcodeDetector`], [`FrameClock`] |
//! | [`clock`] | [`TimerClock`], the fixed-rate [`FrameClock`] used off the browser |
//! | `web` | Browser bindings: `getUserMedia`, `BarcodeDetector`, `requestAnimationFrame` (wasm32 + `web` feature) |
//!
//! Everything here is single-threaded. Futures are not `Send`; they run on
//! the UI's local executor.

pub mod catalog;
pub mod clock;
pub mod items;
pub mod platform;
pub mod scan;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use catalog::{resolve, LookupResult};
pub use clock::TimerClock;
pub use items::{PantryItem, PantryList};
pub use platform::{
    BarcodeDetector, Camera, CameraError, CaptureStream, DetectError, DetectedBarcode,
    FacingMode, FrameClock, NoCamera, NoDetector, NoStream,
};
pub use scan::{ScanController, ScanError, ScanOutcome, ScanState};
