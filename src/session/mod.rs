//! One user session: catalog browsing, plant placement, capture and sharing.
//!
//! The session owns the transform and every component that reads or writes it. All calls are
//! synchronous; time is passed in explicitly.

pub(crate) mod camera;
pub(crate) mod share;

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::assets::decode::{PreparedImage, decode_data_uri, decode_image};
use crate::assets::watermark::Watermark;
use crate::catalog::model::{SelectedPlant, SizeFilter, Thumbnail, filter_plants, normalize_records};
use crate::catalog::source::CatalogSource;
use crate::compose::compositor::{
    Background, CaptureCompositor, CaptureRequest, CaptureResult, OverlayLayout,
};
use crate::config::Config;
use crate::foundation::core::{Point, Rect, Size, StageSize};
use crate::foundation::error::PlantfitResult;
use crate::gesture::controller::GestureController;
use crate::gesture::hold::{HoldButton, HoldRelease, REPEAT_SCALE_STEP, TAP_SCALE_STEP};
use crate::gesture::slider::{DepthSlider, thumb_left};
use crate::notify::Notifier;
use crate::render::projector::{OverlayElement, RenderProjector};
use crate::transform::state::TransformState;

use self::camera::CameraDevice;
use self::share::{SharePayload, ShareTarget};

pub const MSG_CATALOG_FAILED: &str = "식물 목록을 불러오지 못했습니다.";
pub const MSG_CAMERA_UNAVAILABLE: &str = "카메라를 사용할 수 없습니다.";
pub const MSG_IMAGE_LOAD_FAILED: &str = "이미지를 불러오지 못했습니다.";
pub const MSG_CAPTURE_FAILED: &str = "이미지 생성 실패";
pub const MSG_SHARE_UNSUPPORTED: &str = "이 환경에서는 공유 기능을 지원하지 않습니다.";
pub const MSG_SHARE_FAILED: &str = "공유하기 실패";

/// Which background feeds the compositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    LiveCamera,
    StaticImage,
}

/// Screen the user is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Select,
    Place,
    Share,
}

impl Step {
    /// 1-based position shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            Step::Select => 1,
            Step::Place => 2,
            Step::Share => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Select => "식물 선택",
            Step::Place => "공간에 배치해 보기",
            Step::Share => "결과 확인 및 공유",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    fn sign(self) -> f64 {
        match self {
            ZoomDirection::In => 1.0,
            ZoomDirection::Out => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    /// There was no capture to share.
    Skipped,
    Unsupported,
    Shared,
    Failed,
}

/// Stage geometry the compositor needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageLayout {
    pub stage: StageSize,
    /// Canvas pixels per stage pixel.
    pub pixel_ratio: f64,
    /// Untransformed overlay box size, centered on the stage.
    pub overlay_size: Size,
}

/// Where the purchase button leads after a capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseTarget {
    pub url: String,
    pub sold_out: bool,
}

#[derive(Clone, Debug)]
pub struct CapturedShot {
    pub result: CaptureResult,
    pub purchase: PurchaseTarget,
    pub instagram_url: String,
    pub captured_at: Instant,
}

pub struct Session<C: CameraDevice, E: OverlayElement> {
    config: Config,
    camera: C,
    element: E,
    layout: StageLayout,
    notifier: Notifier,
    compositor: CaptureCompositor,
    gesture: GestureController,
    projector: RenderProjector,
    slider: DepthSlider,
    zoom_in: HoldButton,
    zoom_out: HoldButton,
    transform: TransformState,

    plants: Vec<SelectedPlant>,
    size_filter: SizeFilter,
    selected: Option<SelectedPlant>,
    overlay: Option<PreparedImage>,
    watermark: Option<Watermark>,
    still_image: Option<PreparedImage>,
    mode_dialog_open: bool,
    mode: Option<SessionMode>,
    step: Step,
    last_capture: Option<CapturedShot>,
}

impl<C: CameraDevice, E: OverlayElement> Session<C, E> {
    pub fn new(config: Config, camera: C, element: E, layout: StageLayout) -> Self {
        let mut session = Self {
            notifier: Notifier::new(config.notification_duration()),
            gesture: GestureController::new(config.gesture),
            config,
            camera,
            element,
            layout,
            compositor: CaptureCompositor::new(),
            projector: RenderProjector::new(),
            slider: DepthSlider::new(),
            zoom_in: HoldButton::new(),
            zoom_out: HoldButton::new(),
            transform: TransformState::default(),
            plants: Vec::new(),
            size_filter: SizeFilter::All,
            selected: None,
            overlay: None,
            watermark: None,
            still_image: None,
            mode_dialog_open: false,
            mode: None,
            step: Step::Select,
            last_capture: None,
        };
        session.project();
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notification(&self, now: Instant) -> Option<&str> {
        self.notifier.current(now)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn mode(&self) -> Option<SessionMode> {
        self.mode
    }

    pub fn is_mode_dialog_open(&self) -> bool {
        self.mode_dialog_open
    }

    pub fn selected(&self) -> Option<&SelectedPlant> {
        self.selected.as_ref()
    }

    pub fn plants(&self) -> &[SelectedPlant] {
        &self.plants
    }

    pub fn last_capture(&self) -> Option<&CapturedShot> {
        self.last_capture.as_ref()
    }

    pub fn layout(&self) -> StageLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: StageLayout) {
        self.layout = layout;
    }

    pub fn set_watermark(&mut self, watermark: Option<Watermark>) {
        self.watermark = watermark;
    }

    /// Replace the overlay raster, e.g. after loading the placeholder thumbnail from disk.
    pub fn set_overlay_image(&mut self, image: Option<PreparedImage>) {
        self.overlay = image;
    }

    pub fn has_overlay_image(&self) -> bool {
        self.overlay.is_some()
    }

    /// Replace the plant list from `source`. On failure the current list is kept and the user is
    /// notified.
    pub fn load_catalog(&mut self, source: &dyn CatalogSource, now: Instant) -> bool {
        match source.fetch() {
            Ok(records) => {
                self.plants = normalize_records(
                    &records,
                    &self.config.storefront_url,
                    &self.config.placeholder_thumbnail,
                );
                info!(source = %source.describe(), count = self.plants.len(), "catalog loaded");
                true
            }
            Err(err) => {
                warn!(source = %source.describe(), error = %err, "catalog load failed");
                self.notifier.show(MSG_CATALOG_FAILED, now);
                false
            }
        }
    }

    /// Reload, then carry the sold-out flag over to the current selection.
    pub fn refresh_catalog(&mut self, source: &dyn CatalogSource, now: Instant) -> bool {
        if !self.load_catalog(source, now) {
            return false;
        }
        if let Some(selected) = self.selected.as_mut() {
            if let Some(fresh) = self.plants.iter().find(|p| p.id == selected.id) {
                if fresh.sold_out != selected.sold_out {
                    debug!(id = %selected.id, sold_out = fresh.sold_out, "selection availability changed");
                }
                selected.sold_out = fresh.sold_out;
            }
        }
        true
    }

    pub fn size_filter(&self) -> &SizeFilter {
        &self.size_filter
    }

    pub fn set_size_filter(&mut self, filter: SizeFilter) {
        self.size_filter = filter;
    }

    /// Plants passing the current size filter, in catalog order.
    pub fn visible_plants(&self) -> Vec<&SelectedPlant> {
        filter_plants(&self.plants, &self.size_filter)
    }

    /// Select a plant and open the mode dialog. Unknown ids are ignored.
    pub fn select_plant(&mut self, id: &str) -> bool {
        let Some(plant) = self.plants.iter().find(|p| p.id == id).cloned() else {
            debug!(%id, "select_plant: unknown id");
            return false;
        };
        self.overlay = overlay_from_thumbnail(&plant.thumbnail);
        debug!(id = %plant.id, label = %plant.display_label(), has_overlay = self.overlay.is_some(), "plant selected");
        self.selected = Some(plant);
        self.mode_dialog_open = true;
        true
    }

    pub fn cancel_mode_dialog(&mut self) {
        self.mode_dialog_open = false;
        self.selected = None;
        self.overlay = None;
    }

    /// Switch to the live camera. A failed start is reported; the mode stays `LiveCamera` and no
    /// retry is attempted.
    pub fn choose_live_camera(&mut self, now: Instant) {
        if self.selected.is_none() {
            debug!("choose_live_camera without a selection");
            return;
        }
        self.mode_dialog_open = false;
        self.mode = Some(SessionMode::LiveCamera);
        self.still_image = None;
        self.restore_default_placement();
        self.enter_step(Step::Place);

        if self.camera.is_active() {
            return;
        }
        if let Err(err) = self.camera.start() {
            warn!(error = %err, "camera start failed");
            self.notifier.show(MSG_CAMERA_UNAVAILABLE, now);
        }
    }

    /// Switch to a still photo. Undecodable bytes leave the session untouched.
    pub fn choose_still_image(&mut self, bytes: &[u8], now: Instant) -> bool {
        if self.selected.is_none() {
            debug!("choose_still_image without a selection");
            return false;
        }
        let image = match decode_image(bytes) {
            Ok(image) => image,
            Err(err) => {
                warn!(error = %err, "background photo decode failed");
                self.notifier.show(MSG_IMAGE_LOAD_FAILED, now);
                return false;
            }
        };
        self.still_image = Some(image);
        self.mode = Some(SessionMode::StaticImage);
        self.mode_dialog_open = false;
        self.camera.stop();
        self.restore_default_placement();
        self.enter_step(Step::Place);
        true
    }

    /// Back to the plant list. Stops the camera.
    pub fn show_list(&mut self) {
        self.camera.stop();
        self.enter_step(Step::Select);
    }

    pub fn touch_start(&mut self, contacts: &[Point]) {
        if self.accepts_placement_input() {
            self.gesture.touch_start(contacts, &self.transform);
        }
    }

    pub fn touch_move(&mut self, contacts: &[Point]) {
        if self.accepts_placement_input() && self.gesture.touch_move(contacts, &mut self.transform)
        {
            self.project();
        }
    }

    pub fn touch_end(&mut self, remaining: &[Point]) {
        if self.accepts_placement_input() {
            self.gesture.touch_end(remaining, &self.transform);
        }
    }

    pub fn mouse_down(&mut self, at: Point) {
        if self.accepts_placement_input() {
            self.gesture.mouse_down(at, &self.transform);
        }
    }

    pub fn mouse_move(&mut self, at: Point) {
        if self.gesture.mouse_move(at, &mut self.transform) {
            self.project();
        }
    }

    pub fn mouse_up(&mut self) {
        self.gesture.mouse_up();
    }

    pub fn rotate_quarter(&mut self) {
        if self.accepts_placement_input() {
            self.transform.rotate_by(90.0);
            self.project();
        }
    }

    /// Back to the default placement, depth slider included.
    pub fn reset_transform(&mut self) {
        if self.accepts_placement_input() {
            self.restore_default_placement();
        }
    }

    pub fn zoom_press(&mut self, direction: ZoomDirection, now: Instant) {
        if self.accepts_placement_input() {
            self.zoom_button(direction).press(now);
        }
    }

    /// Apply repeat steps that came due on held zoom buttons.
    pub fn zoom_poll(&mut self, now: Instant) {
        for direction in [ZoomDirection::In, ZoomDirection::Out] {
            let ticks = self.zoom_button(direction).poll(now);
            self.apply_zoom_ticks(direction, ticks);
        }
    }

    pub fn zoom_release(&mut self, direction: ZoomDirection, now: Instant) {
        match self.zoom_button(direction).release(now) {
            HoldRelease::Ignored => {}
            HoldRelease::Tap => {
                self.transform
                    .nudge_gesture_scale(direction.sign() * TAP_SCALE_STEP);
                self.project();
            }
            HoldRelease::Held { pending } => self.apply_zoom_ticks(direction, pending),
        }
    }

    pub fn slider_begin(&mut self, x: f64, track: Rect) {
        if self.accepts_placement_input() {
            self.slider.begin_drag(x, track, &mut self.transform);
            self.project();
        }
    }

    pub fn slider_drag(&mut self, x: f64) {
        if self.slider.drag_to(x, &mut self.transform) {
            self.project();
        }
    }

    pub fn slider_end(&mut self) {
        self.slider.end_drag();
    }

    /// Left offset of the depth thumb inside its track.
    pub fn slider_thumb_left(&self, track_width: f64, thumb_width: f64) -> f64 {
        thumb_left(track_width, thumb_width, self.transform.depth_ratio())
    }

    /// Composite the current scene. On success the result is stored and the session moves to the
    /// share step; on failure the user is notified and nothing is stored.
    pub fn capture(&mut self, now: Instant) -> PlantfitResult<&CapturedShot> {
        let background = match self.mode {
            Some(SessionMode::StaticImage) => Background::Still(self.still_image.as_ref()),
            Some(SessionMode::LiveCamera) | None => Background::Camera(self.camera.latest_frame()),
        };
        let request = CaptureRequest {
            transform: &self.transform,
            background,
            overlay: self.overlay.as_ref(),
            layout: OverlayLayout::centered(self.layout.stage, self.layout.overlay_size),
            watermark: self.watermark.as_ref(),
            stage: self.layout.stage,
            pixel_ratio: self.layout.pixel_ratio,
            settings: &self.config.compositor,
        };

        let result = match self.compositor.capture(&request) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "capture failed");
                self.notifier.show(MSG_CAPTURE_FAILED, now);
                return Err(err);
            }
        };

        let purchase = match &self.selected {
            Some(plant) => PurchaseTarget {
                url: plant.purchase_url.clone(),
                sold_out: plant.sold_out,
            },
            None => PurchaseTarget {
                url: self.config.storefront_url.clone(),
                sold_out: false,
            },
        };
        self.enter_step(Step::Share);
        Ok(self.last_capture.insert(CapturedShot {
            result,
            purchase,
            instagram_url: self.config.instagram_url.clone(),
            captured_at: now,
        }))
    }

    /// Dismiss the result pane and return to placement. The capture is kept for sharing.
    pub fn close_capture(&mut self) {
        if self.step == Step::Share {
            self.enter_step(Step::Place);
        }
    }

    pub fn share(&mut self, target: &mut dyn ShareTarget, now: Instant) -> ShareOutcome {
        let Some(shot) = self.last_capture.as_ref() else {
            return ShareOutcome::Skipped;
        };
        let payload = SharePayload::for_capture(shot.result.png.clone());
        if !target.can_share(&payload) {
            self.notifier.show(MSG_SHARE_UNSUPPORTED, now);
            return ShareOutcome::Unsupported;
        }
        match target.share(payload) {
            Ok(()) => ShareOutcome::Shared,
            Err(err) => {
                warn!(error = %err, "share failed");
                self.notifier.show(MSG_SHARE_FAILED, now);
                ShareOutcome::Failed
            }
        }
    }

    fn accepts_placement_input(&self) -> bool {
        self.step == Step::Place
    }

    fn enter_step(&mut self, step: Step) {
        if self.step != step {
            debug!(from = ?self.step, to = ?step, "step changed");
        }
        self.step = step;
        if step != Step::Place {
            self.cancel_placement_input();
        }
    }

    /// Drop in-flight drags and held zoom buttons without applying them.
    fn cancel_placement_input(&mut self) {
        self.gesture.cancel();
        self.slider.end_drag();
        self.zoom_in.cancel();
        self.zoom_out.cancel();
    }

    fn restore_default_placement(&mut self) {
        self.transform.reset();
        self.cancel_placement_input();
        self.project();
    }

    fn zoom_button(&mut self, direction: ZoomDirection) -> &mut HoldButton {
        match direction {
            ZoomDirection::In => &mut self.zoom_in,
            ZoomDirection::Out => &mut self.zoom_out,
        }
    }

    fn apply_zoom_ticks(&mut self, direction: ZoomDirection, ticks: u32) {
        if ticks == 0 {
            return;
        }
        for _ in 0..ticks {
            self.transform
                .nudge_gesture_scale(direction.sign() * REPEAT_SCALE_STEP);
        }
        self.project();
    }

    fn project(&mut self) {
        self.projector.apply(&self.transform, &mut self.element);
    }
}

/// Decode an embedded thumbnail for use as the overlay. Placeholders are paths the host loads.
fn overlay_from_thumbnail(thumbnail: &Thumbnail) -> Option<PreparedImage> {
    let Thumbnail::DataUri(uri) = thumbnail else {
        return None;
    };
    match decode_data_uri(uri).and_then(|bytes| decode_image(&bytes)) {
        Ok(image) => Some(image),
        Err(err) => {
            warn!(error = %err, "plant thumbnail decode failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
