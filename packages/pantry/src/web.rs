//! # Browser bindings for the scanner
//!
//! | Type | Browser API |
//! |------|-------------|
//! | [`MediaCamera`] | `navigator.mediaDevices.getUserMedia`, rendered into a `<video>` element |
//! | [`WebBarcodeDetector`] | the Shape Detection `BarcodeDetector` (Chromium only) |
//! | [`AnimationFrameClock`] | `requestAnimationFrame` |
//!
//! `web-sys` has no binding for `BarcodeDetector`, so it is declared here.

use futures::channel::oneshot;
use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::clock::DEFAULT_FRAME_INTERVAL;
use crate::platform::{
    BarcodeDetector, Camera, CameraError, CaptureStream, DetectError, DetectedBarcode,
    FacingMode, FrameClock,
};

/// Retail barcode formats the pantry understands.
pub const BARCODE_FORMATS: &[&str] = &["ean_13", "ean_8", "upc_a", "upc_e", "code_128", "code_39"];

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = BarcodeDetector)]
    type JsBarcodeDetector;

    #[wasm_bindgen(constructor, js_class = "BarcodeDetector", catch)]
    fn new(options: &JsValue) -> Result<JsBarcodeDetector, JsValue>;

    #[wasm_bindgen(method, js_class = "BarcodeDetector", catch)]
    fn detect(this: &JsBarcodeDetector, source: &HtmlVideoElement) -> Result<Promise, JsValue>;
}

fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

fn get_string(target: &JsValue, key: &str) -> Option<String> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

/// Opens the device camera and shows it in the `<video>` element with id
/// `video_id`.
#[derive(Debug, Clone)]
pub struct MediaCamera {
    video_id: String,
}

impl MediaCamera {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }

    fn video_element(&self) -> Result<HtmlVideoElement, CameraError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&self.video_id))
            .and_then(|e| e.dyn_into::<HtmlVideoElement>().ok())
            .ok_or_else(|| CameraError(format!("no <video id=\"{}\"> in the page", self.video_id)))
    }
}

/// The live stream plus the element it is attached to.
#[derive(Debug)]
pub struct MediaCapture {
    stream: MediaStream,
    video: HtmlVideoElement,
}

impl MediaCapture {
    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl CaptureStream for MediaCapture {
    fn release(&self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        let _ = self.video.pause();
        self.video.set_src_object(None);
    }
}

impl Camera for MediaCamera {
    type Stream = MediaCapture;

    async fn open(&self, facing: FacingMode) -> Result<MediaCapture, CameraError> {
        let camera_err = |e: JsValue| CameraError(describe(&e));

        let window = web_sys::window().ok_or_else(|| CameraError("no window".into()))?;
        let devices = window.navigator().media_devices().map_err(camera_err)?;

        let video = Object::new();
        Reflect::set(
            &video,
            &JsValue::from_str("facingMode"),
            &JsValue::from_str(facing.as_str()),
        )
        .map_err(camera_err)?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(camera_err)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(camera_err)?
            .dyn_into()
            .map_err(camera_err)?;

        let element = match self.video_element() {
            Ok(element) => element,
            Err(e) => {
                for track in stream.get_tracks().iter() {
                    if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                        track.stop();
                    }
                }
                return Err(e);
            }
        };
        let _ = element.set_attribute("playsinline", "true");
        element.set_muted(true);
        element.set_src_object(Some(&stream));
        if let Ok(playing) = element.play() {
            if let Err(e) = JsFuture::from(playing).await {
                tracing::warn!("video playback did not start: {}", describe(&e));
            }
        }

        Ok(MediaCapture {
            stream,
            video: element,
        })
    }
}

/// The browser's native barcode detector.
pub struct WebBarcodeDetector {
    inner: JsBarcodeDetector,
}

impl WebBarcodeDetector {
    /// `None` when the browser has no `BarcodeDetector`.
    pub fn new() -> Option<Self> {
        let available =
            Reflect::has(&js_sys::global(), &JsValue::from_str("BarcodeDetector")).unwrap_or(false);
        if !available {
            return None;
        }

        let formats: Array = BARCODE_FORMATS.iter().map(|f| JsValue::from_str(f)).collect();
        let options = Object::new();
        Reflect::set(&options, &JsValue::from_str("formats"), &formats).ok()?;
        match JsBarcodeDetector::new(&options) {
            Ok(inner) => Some(Self { inner }),
            Err(e) => {
                tracing::warn!("BarcodeDetector rejected formats: {}", describe(&e));
                None
            }
        }
    }
}

impl BarcodeDetector<MediaCapture> for WebBarcodeDetector {
    async fn detect(&self, stream: &MediaCapture) -> Result<Vec<DetectedBarcode>, DetectError> {
        let detect_err = |e: JsValue| DetectError(describe(&e));

        let promise = self.inner.detect(stream.video()).map_err(detect_err)?;
        let found = JsFuture::from(promise).await.map_err(detect_err)?;
        let found: Array = found.dyn_into().map_err(detect_err)?;

        Ok(found
            .iter()
            .map(|barcode| DetectedBarcode {
                raw_value: get_string(&barcode, "rawValue").unwrap_or_default(),
                format: get_string(&barcode, "format").unwrap_or_default(),
            })
            .collect())
    }
}

/// Resolves on the next `requestAnimationFrame` callback.
///
/// A wait that is aborted does not call `cancelAnimationFrame`; the pending
/// callback still fires once and sends into a dropped receiver.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrameClock;

impl FrameClock for AnimationFrameClock {
    async fn next_frame(&self) {
        let Some(window) = web_sys::window() else {
            gloo_timers::future::sleep(DEFAULT_FRAME_INTERVAL).await;
            return;
        };
        let (tx, rx) = oneshot::channel::<()>();
        let callback = Closure::once_into_js(move || {
            let _ = tx.send(());
        });
        if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
            tracing::warn!("requestAnimationFrame failed: {}", describe(&e));
            gloo_timers::future::sleep(DEFAULT_FRAME_INTERVAL).await;
            return;
        }
        let _ = rx.await;
    }
}
