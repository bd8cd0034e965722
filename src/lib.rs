//! plantfit places a plant image over a live camera frame or a still photo, lets the user move,
//! scale and rotate it, and exports the scene as a PNG snapshot.
//!
//! # Pipeline overview
//!
//! 1. **Transform**: a single [`TransformState`] holds translation, rotation, gesture scale and
//!    depth scale. Gestures, hold buttons and the depth slider all write to it.
//! 2. **Project**: [`RenderProjector`] turns the state into the overlay's CSS transform string.
//! 3. **Compose**: [`CaptureCompositor`] flattens background, overlay, drop shadow and watermark
//!    into one premultiplied RGBA8 frame, turning it a quarter for side rotations.
//! 4. **Encode**: the frame is written as PNG and handed to a [`ShareTarget`].
//!
//! [`Session`] ties these together with the plant catalog and the transient [`Notifier`].
//!
//! Everything is synchronous and single-threaded; time is passed in as [`std::time::Instant`].
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod compose;
mod config;
mod foundation;
mod gesture;
mod notify;
mod render;
mod replay;
mod session;
mod transform;

pub use assets::decode::{PreparedImage, decode_data_uri, decode_image, parse_svg, rasterize_svg};
pub use assets::watermark::Watermark;
pub use catalog::model::{
    CatalogResponse, DEFAULT_STOREFRONT_URL, PLACEHOLDER_THUMBNAIL, PlantRecord, SelectedPlant,
    SizeClass, SizeFilter, Thumbnail, UNNAMED_PLANT, filter_plants, label_for_code,
    normalize_records,
};
pub use catalog::source::{
    CatalogSource, FallbackCatalog, FileCatalog, HttpCatalog, parse_catalog_json,
};
pub use compose::compositor::{
    Background, CaptureCompositor, CaptureRequest, CaptureResult, CompositorSettings, DisplayHint,
    OverlayLayout, encode_png, overlay_affine, watermark_size,
};
pub use compose::fit::{FitMode, FitPlacement, fit};
pub use compose::orient::{ExportOrientation, RasterFrame, SIDE_TOLERANCE_DEG, reorient};
pub use config::{Config, DEFAULT_API_BASE_URL, DEFAULT_INSTAGRAM_URL};
pub use foundation::core::{Affine, Canvas, MAX_CANVAS_DIM, Point, Rect, Size, StageSize, Vec2};
pub use foundation::error::{PlantfitError, PlantfitResult};
pub use foundation::math::normalize_degrees;
pub use gesture::controller::{GestureConfig, GestureController, GesturePhase, pair_geometry};
pub use gesture::hold::{
    HOLD_THRESHOLD, HoldButton, HoldRelease, REPEAT_INTERVAL, REPEAT_SCALE_STEP, TAP_SCALE_STEP,
};
pub use gesture::slider::{DepthSlider, THUMB_INSET_PX, ratio_in_track, thumb_left};
pub use notify::{DEFAULT_NOTIFICATION_DURATION, Notification, Notifier};
pub use render::projector::{OverlayElement, OverlayProjection, RenderProjector, project};
pub use replay::{
    ReplayAction, ReplayEvent, ReplayOutcome, ReplayScript, ZoomButton, run_replay,
};
pub use session::camera::{CameraDevice, NoCamera, StaticFrameCamera};
pub use session::share::{
    DirectoryShare, SHARE_FILE_NAME, SHARE_MIME, SHARE_TEXT, SHARE_TITLE, SharePayload,
    ShareTarget,
};
pub use session::{
    CapturedShot, MSG_CAMERA_UNAVAILABLE, MSG_CAPTURE_FAILED, MSG_CATALOG_FAILED,
    MSG_IMAGE_LOAD_FAILED, MSG_SHARE_FAILED, MSG_SHARE_UNSUPPORTED, PurchaseTarget, Session,
    SessionMode, ShareOutcome, StageLayout, Step, ZoomDirection,
};
pub use transform::state::{
    DEPTH_RATIO_NEUTRAL, DEPTH_SCALE_MAX, DEPTH_SCALE_MIN, DEPTH_SCALE_SPREAD, GESTURE_SCALE_MAX,
    GESTURE_SCALE_MIN, TransformState, depth_scale_for,
};
