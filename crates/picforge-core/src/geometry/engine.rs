//! Interactive crop engine.
//!
//! The engine holds the published crop rectangle and the drag session in
//! progress. Every transition reads the rectangle snapshotted at pointer-down
//! (the anchor) and produces a corrected rectangle, so pointer-move events
//! can be applied in delivery order without accumulating error.
//!
//! # Resize Rules
//!
//! Resizing is driven by a per-corner table.
//! Each [`Corner`] carries a sign for each axis: a negative sign means the
//! left (or top) edge follows the pointer and the right (or bottom) edge is
//! fixed. The diagonally opposite corner is the fixed point for every
//! correction, so a clamped rectangle never jumps away from it.

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::face::{crop_from_face, FaceBounds};
use super::{CropRect, ImageFrame};
use crate::config::EditorConfig;

/// Minimum crop edge in image pixels.
pub const DEFAULT_MIN_SIZE: f64 = 50.0;

/// Share of the limiting image dimension covered by a fresh crop.
pub const DEFAULT_INITIAL_COVERAGE: f64 = 0.8;

/// Resize handle on the crop overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The corner that stays fixed while this one is dragged.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Position of this corner on `rect`.
    pub fn point(self, rect: &CropRect) -> (f64, f64) {
        let rule = self.rule();
        let x = if rule.x_sign < 0.0 { rect.x } else { rect.right() };
        let y = if rule.y_sign < 0.0 { rect.y } else { rect.bottom() };
        (x, y)
    }

    fn rule(self) -> CornerRule {
        match self {
            Corner::TopLeft => CornerRule::new(-1.0, -1.0),
            Corner::TopRight => CornerRule::new(1.0, -1.0),
            Corner::BottomLeft => CornerRule::new(-1.0, 1.0),
            Corner::BottomRight => CornerRule::new(1.0, 1.0),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

/// Error returned when a handle name does not name a corner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resize handle: {0}")]
pub struct ParseCornerError(pub String);

impl FromStr for Corner {
    type Err = ParseCornerError;

    /// Accepts both `top-left` and the overlay's `left-top` handle names,
    /// with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "top-left" | "left-top" => Ok(Corner::TopLeft),
            "top-right" | "right-top" => Ok(Corner::TopRight),
            "bottom-left" | "left-bottom" => Ok(Corner::BottomLeft),
            "bottom-right" | "right-bottom" => Ok(Corner::BottomRight),
            _ => Err(ParseCornerError(s.to_string())),
        }
    }
}

/// Per-corner resize rule.
///
/// A sign of `-1.0` means the edge on that axis moves with the handle
/// (left or top); `1.0` means the right or bottom edge moves.
#[derive(Debug, Clone, Copy)]
struct CornerRule {
    x_sign: f64,
    y_sign: f64,
}

impl CornerRule {
    const fn new(x_sign: f64, y_sign: f64) -> Self {
        Self { x_sign, y_sign }
    }

    /// Signed width change for an image-space drag: the axis with the larger
    /// magnitude wins, oriented so that dragging outward grows the crop.
    fn growth(self, dx: f64, dy: f64) -> f64 {
        if dx.abs() > dy.abs() {
            self.x_sign * dx
        } else {
            self.y_sign * dy
        }
    }

    /// The fixed corner of `rect` (diagonally opposite the handle).
    fn fixed_point(self, rect: &CropRect) -> (f64, f64) {
        let x = if self.x_sign < 0.0 { rect.right() } else { rect.x };
        let y = if self.y_sign < 0.0 { rect.bottom() } else { rect.y };
        (x, y)
    }

    /// Rectangle of `width` (height derived from `aspect_ratio`) hanging off
    /// the fixed point.
    fn place(self, fixed: (f64, f64), width: f64, aspect_ratio: f64) -> CropRect {
        let height = width / aspect_ratio;
        let x = if self.x_sign < 0.0 { fixed.0 - width } else { fixed.0 };
        let y = if self.y_sign < 0.0 { fixed.1 - height } else { fixed.1 };
        CropRect {
            x,
            y,
            width,
            height,
        }
    }
}

/// What a drag gesture does to the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    /// Move the rectangle without changing its size.
    Translate,
    /// Resize from a corner handle.
    Resize(Corner),
}

/// State captured at pointer-down for the duration of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub mode: DragMode,
    /// Pointer position at gesture start, display coordinates.
    pub anchor_pointer: (f64, f64),
    /// Crop at gesture start.
    pub anchor_crop: CropRect,
}

/// Compute the initial crop for an image: centered, at the target aspect
/// ratio, covering `coverage` of the limiting dimension.
///
/// Returns `None` when the frame has no area or the ratio is not a finite
/// positive number.
pub fn centered_crop(frame: &ImageFrame, aspect_ratio: f64, coverage: f64) -> Option<CropRect> {
    if !frame.is_valid() || !is_usable_ratio(aspect_ratio) {
        return None;
    }

    let (natural_width, natural_height) = frame.natural_size();

    let (mut width, mut height) = if frame.aspect_ratio() > aspect_ratio {
        // Image is wider than the target: height limits
        let height = natural_height * coverage;
        (height * aspect_ratio, height)
    } else {
        let width = natural_width * coverage;
        (width, width / aspect_ratio)
    };

    if width > natural_width {
        width = natural_width;
        height = width / aspect_ratio;
    }
    if height > natural_height {
        height = natural_height;
        width = height * aspect_ratio;
    }

    Some(CropRect {
        x: (natural_width - width) / 2.0,
        y: (natural_height - height) / 2.0,
        width,
        height,
    })
}

fn is_usable_ratio(aspect_ratio: f64) -> bool {
    aspect_ratio.is_finite() && aspect_ratio > 0.0
}

/// `max(0, min(value, upper))`, tolerating a negative `upper`.
#[inline]
fn clamp_axis(value: f64, upper: f64) -> f64 {
    value.min(upper).max(0.0)
}

/// Frame, ratio and published crop of the currently loaded image.
#[derive(Debug, Clone, Copy)]
struct Placement {
    frame: ImageFrame,
    aspect_ratio: f64,
    crop: CropRect,
}

impl Placement {
    /// Widest crop at the aspect ratio that fits the image.
    fn max_width(&self) -> f64 {
        let (natural_width, natural_height) = self.frame.natural_size();
        natural_width.min(natural_height * self.aspect_ratio)
    }

    /// Narrowest crop whose shorter edge still reaches `min_size`, capped
    /// to what the image can hold.
    fn min_width(&self, min_size: f64) -> f64 {
        let required = min_size.max(min_size * self.aspect_ratio);
        required.min(self.max_width())
    }

    /// Pull an arbitrary rectangle into validity around its center: width
    /// limited to the allowed range, height re-derived, origin clamped.
    fn conform(&self, rect: CropRect, min_size: f64) -> CropRect {
        let (natural_width, natural_height) = self.frame.natural_size();
        let width = if rect.width.is_finite() {
            rect.width
                .min(self.max_width())
                .max(self.min_width(min_size))
        } else {
            self.max_width()
        };
        let height = width / self.aspect_ratio;

        let (cx, cy) = rect.center();
        let (cx, cy) = if cx.is_finite() && cy.is_finite() {
            (cx, cy)
        } else {
            (natural_width / 2.0, natural_height / 2.0)
        };

        CropRect {
            x: clamp_axis(cx - width / 2.0, natural_width - width),
            y: clamp_axis(cy - height / 2.0, natural_height - height),
            width,
            height,
        }
    }

    fn translated(&self, anchor: &CropRect, dx: f64, dy: f64) -> CropRect {
        let (natural_width, natural_height) = self.frame.natural_size();
        CropRect {
            x: clamp_axis(anchor.x + dx, natural_width - anchor.width),
            y: clamp_axis(anchor.y + dy, natural_height - anchor.height),
            ..*anchor
        }
    }

    fn resized(
        &self,
        anchor: &CropRect,
        corner: Corner,
        dx: f64,
        dy: f64,
        min_size: f64,
    ) -> CropRect {
        let rule = corner.rule();
        let ratio = self.aspect_ratio;
        let (natural_width, natural_height) = self.frame.natural_size();
        let fixed = rule.fixed_point(anchor);

        let mut rect = rule.place(fixed, anchor.width + rule.growth(dx, dy), ratio);

        // 1. Minimum size on the limiting dimension
        let min_width = self.min_width(min_size);
        if rect.width < min_width {
            rect = rule.place(fixed, min_width, ratio);
        }

        // 2. Lower bounds: only a moving left/top edge can cross zero
        if rect.x < 0.0 {
            rect = rule.place(fixed, fixed.0, ratio);
        }
        if rect.y < 0.0 {
            rect = rule.place(fixed, fixed.1 * ratio, ratio);
        }

        // 3. Upper bounds, x before y. Shrinking around the fixed corner
        // cannot reopen a bound that already holds.
        if rect.right() > natural_width {
            rect = rule.place(fixed, natural_width - rect.x, ratio);
        }
        if rect.bottom() > natural_height {
            rect = rule.place(fixed, (natural_height - rect.y) * ratio, ratio);
        }

        // Absorb rounding noise from the ratio round trip
        rect.x = clamp_axis(rect.x, natural_width - rect.width);
        rect.y = clamp_axis(rect.y, natural_height - rect.height);
        rect
    }
}

/// Owner of the crop rectangle and the drag session in progress.
///
/// # Example
///
/// ```ignore
/// let mut engine = CropEngine::new();
/// let frame = ImageFrame::fit_width(1200, 1600, 600.0);
/// engine.initialize(frame, IdPhotoSize::OneInch.aspect_ratio());
///
/// engine.begin_resize(Corner::BottomRight, (400.0, 500.0));
/// let crop = engine.update((420.0, 510.0));
/// engine.end_drag();
/// ```
#[derive(Debug, Clone)]
pub struct CropEngine {
    min_size: f64,
    initial_coverage: f64,
    placement: Option<Placement>,
    session: Option<DragSession>,
}

impl Default for CropEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CropEngine {
    /// Engine with the default minimum size and initial coverage.
    pub fn new() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            initial_coverage: DEFAULT_INITIAL_COVERAGE,
            placement: None,
            session: None,
        }
    }

    /// Engine using the crop settings of `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            min_size: config.min_crop_size,
            initial_coverage: config.initial_coverage,
            ..Self::new()
        }
    }

    /// Set up the crop for a newly loaded image (or a new target ratio).
    ///
    /// Returns `None` and leaves the engine untouched when the frame has a
    /// zero dimension or the ratio is unusable; the host retries once a
    /// valid frame is available.
    pub fn initialize(&mut self, frame: ImageFrame, aspect_ratio: f64) -> Option<CropRect> {
        let centered = centered_crop(&frame, aspect_ratio, self.initial_coverage)?;

        let mut placement = Placement {
            frame,
            aspect_ratio,
            crop: centered,
        };
        placement.crop = placement.conform(centered, self.min_size);

        debug!(
            "crop initialized for {}x{} image at ratio {:.4}: {:?}",
            frame.natural_width, frame.natural_height, aspect_ratio, placement.crop
        );

        self.placement = Some(placement);
        self.session = None;
        Some(placement.crop)
    }

    /// Re-run initialization for the current image with a new target ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> Option<CropRect> {
        let frame = self.placement?.frame;
        self.initialize(frame, aspect_ratio)
    }

    /// Replace the crop with `rect`, pulled into validity around its center.
    ///
    /// Used when the crop comes from outside a drag, such as a restored edit.
    pub fn set_crop(&mut self, rect: CropRect) -> Option<CropRect> {
        let min_size = self.min_size;
        let placement = self.placement.as_mut()?;
        placement.crop = placement.conform(rect, min_size);
        self.session = None;
        Some(placement.crop)
    }

    /// Frame the crop around a detected face.
    pub fn apply_face(&mut self, face: &FaceBounds) -> Option<CropRect> {
        let placement = self.placement?;
        let (natural_width, natural_height) = placement.frame.natural_size();
        let rect = crop_from_face(face, natural_width, natural_height, placement.aspect_ratio);
        debug!("crop framed around face at ({:.1}, {:.1})", face.x, face.y);
        self.set_crop(rect)
    }

    /// Forget the loaded image.
    pub fn clear(&mut self) {
        self.placement = None;
        self.session = None;
    }

    /// The published crop, if an image is loaded.
    pub fn crop(&self) -> Option<CropRect> {
        self.placement.map(|p| p.crop)
    }

    /// The published crop in display coordinates, for the overlay.
    pub fn crop_in_display(&self) -> Option<CropRect> {
        self.placement.map(|p| p.crop.to_display(&p.frame))
    }

    pub fn frame(&self) -> Option<&ImageFrame> {
        self.placement.as_ref().map(|p| &p.frame)
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        self.placement.map(|p| p.aspect_ratio)
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start moving the crop. Replaces any session still open.
    pub fn begin_translate(&mut self, pointer: (f64, f64)) {
        self.begin(DragMode::Translate, pointer);
    }

    /// Start resizing from `corner`. Replaces any session still open.
    pub fn begin_resize(&mut self, corner: Corner, pointer: (f64, f64)) {
        self.begin(DragMode::Resize(corner), pointer);
    }

    fn begin(&mut self, mode: DragMode, pointer: (f64, f64)) {
        let Some(placement) = self.placement else {
            return;
        };
        if self.session.is_some() {
            debug!("drag started while another was active; replacing it");
        }
        self.session = Some(DragSession {
            mode,
            anchor_pointer: pointer,
            anchor_crop: placement.crop,
        });
    }

    /// Apply a pointer-move and publish the corrected crop.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn update(&mut self, pointer: (f64, f64)) -> Option<CropRect> {
        let session = self.session?;
        let min_size = self.min_size;
        let placement = self.placement.as_mut()?;

        let (dx, dy) = pointer_delta(session.anchor_pointer, pointer);
        let (dx, dy) = placement.frame.display_to_image(dx, dy);

        let next = match session.mode {
            DragMode::Translate => placement.translated(&session.anchor_crop, dx, dy),
            DragMode::Resize(corner) => {
                placement.resized(&session.anchor_crop, corner, dx, dy, min_size)
            }
        };

        trace!("{:?} drag -> {:?}", session.mode, next);
        placement.crop = next;
        Some(next)
    }

    /// Finish the gesture. The last published crop stays in place.
    pub fn end_drag(&mut self) -> Option<CropRect> {
        self.session = None;
        self.crop()
    }

    /// Display-to-image mapping of the loaded frame.
    pub fn display_to_image(&self, dx: f64, dy: f64) -> Option<(f64, f64)> {
        self.placement.map(|p| p.frame.display_to_image(dx, dy))
    }

    /// Image-to-display mapping of the loaded frame.
    pub fn image_to_display(&self, ix: f64, iy: f64) -> Option<(f64, f64)> {
        self.placement.map(|p| p.frame.image_to_display(ix, iy))
    }
}

/// Display-space movement since the anchor; non-finite input counts as no
/// movement.
fn pointer_delta(anchor: (f64, f64), pointer: (f64, f64)) -> (f64, f64) {
    let dx = pointer.0 - anchor.0;
    let dy = pointer.1 - anchor.1;
    if dx.is_finite() && dy.is_finite() {
        (dx, dy)
    } else {
        (0.0, 0.0)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Image sizes large enough that the minimum size always fits.
    fn frame_strategy() -> impl Strategy<Value = ImageFrame> {
        (400u32..=4000, 400u32..=4000)
            .prop_map(|(w, h)| ImageFrame::fit_width(w, h, 600.0))
    }

    fn ratio_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            Just(295.0 / 413.0),
            Just(413.0 / 626.0),
            0.5f64..=2.0,
        ]
    }

    fn corner_strategy() -> impl Strategy<Value = Corner> {
        prop_oneof![
            Just(Corner::TopLeft),
            Just(Corner::TopRight),
            Just(Corner::BottomLeft),
            Just(Corner::BottomRight),
        ]
    }

    fn pointer_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-5000.0f64..=5000.0, -5000.0f64..=5000.0)
    }

    #[derive(Debug, Clone)]
    enum Gesture {
        Translate((f64, f64), (f64, f64)),
        Resize(Corner, (f64, f64), (f64, f64)),
    }

    fn gesture_strategy() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            (pointer_strategy(), pointer_strategy()).prop_map(|(a, b)| Gesture::Translate(a, b)),
            (corner_strategy(), pointer_strategy(), pointer_strategy())
                .prop_map(|(c, a, b)| Gesture::Resize(c, a, b)),
        ]
    }

    fn check_invariants(engine: &CropEngine) -> Result<(), TestCaseError> {
        let crop = engine.crop().unwrap();
        let frame = engine.frame().unwrap();
        let ratio = engine.aspect_ratio().unwrap();
        let (w, h) = frame.natural_size();
        let tol = 1e-6;

        prop_assert!(crop.x >= -tol && crop.y >= -tol, "origin negative: {:?}", crop);
        prop_assert!(crop.right() <= w + tol, "right edge out: {:?} in {}", crop, w);
        prop_assert!(crop.bottom() <= h + tol, "bottom edge out: {:?} in {}", crop, h);
        prop_assert!(crop.width >= DEFAULT_MIN_SIZE - tol, "too narrow: {:?}", crop);
        prop_assert!(crop.height >= DEFAULT_MIN_SIZE - tol, "too short: {:?}", crop);
        prop_assert!(
            (crop.aspect_ratio() - ratio).abs() <= tol * ratio,
            "ratio drift: {} vs {}",
            crop.aspect_ratio(),
            ratio
        );
        Ok(())
    }

    proptest! {
        /// Property: Every reachable crop satisfies containment, minimum size and ratio.
        #[test]
        fn prop_invariants_hold_across_gestures(
            frame in frame_strategy(),
            ratio in ratio_strategy(),
            gestures in prop::collection::vec(gesture_strategy(), 1..12),
        ) {
            let mut engine = CropEngine::new();
            prop_assert!(engine.initialize(frame, ratio).is_some());
            check_invariants(&engine)?;

            for gesture in gestures {
                match gesture {
                    Gesture::Translate(start, end) => {
                        engine.begin_translate(start);
                        engine.update(end);
                    }
                    Gesture::Resize(corner, start, end) => {
                        engine.begin_resize(corner, start);
                        engine.update(end);
                    }
                }
                check_invariants(&engine)?;
                engine.end_drag();
                check_invariants(&engine)?;
            }
        }

        /// Property: Initialization is deterministic for identical inputs.
        #[test]
        fn prop_initialize_idempotent(frame in frame_strategy(), ratio in ratio_strategy()) {
            let mut a = CropEngine::new();
            let mut b = CropEngine::new();
            let first = a.initialize(frame, ratio);
            prop_assert_eq!(first, a.initialize(frame, ratio));
            prop_assert_eq!(first, b.initialize(frame, ratio));
        }

        /// Property: Translation never changes size and stays inside the image.
        #[test]
        fn prop_translate_preserves_size(
            frame in frame_strategy(),
            ratio in ratio_strategy(),
            end in pointer_strategy(),
        ) {
            let mut engine = CropEngine::new();
            let start = engine.initialize(frame, ratio).unwrap();

            engine.begin_translate((0.0, 0.0));
            let moved = engine.update(end).unwrap();

            prop_assert_eq!(moved.width, start.width);
            prop_assert_eq!(moved.height, start.height);
            check_invariants(&engine)?;
        }

        /// Property: The corner opposite the dragged handle stays fixed.
        #[test]
        fn prop_resize_anchors_opposite_corner(
            frame in frame_strategy(),
            ratio in ratio_strategy(),
            corner in corner_strategy(),
            end in (-30.0f64..=30.0, -30.0f64..=30.0),
        ) {
            let mut engine = CropEngine::new();
            let start = engine.initialize(frame, ratio).unwrap();
            let fixed = corner.opposite().point(&start);

            engine.begin_resize(corner, (0.0, 0.0));
            let resized = engine.update(end).unwrap();
            let after = corner.opposite().point(&resized);

            prop_assert!((after.0 - fixed.0).abs() < 1e-6, "x moved: {:?} -> {:?}", fixed, after);
            prop_assert!((after.1 - fixed.1).abs() < 1e-6, "y moved: {:?} -> {:?}", fixed, after);
        }

        /// Property: Resizing keeps the target ratio for every corner and delta.
        #[test]
        fn prop_resize_preserves_ratio(
            frame in frame_strategy(),
            ratio in ratio_strategy(),
            corner in corner_strategy(),
            end in pointer_strategy(),
        ) {
            let mut engine = CropEngine::new();
            engine.initialize(frame, ratio).unwrap();
            engine.begin_resize(corner, (0.0, 0.0));
            engine.update(end);
            check_invariants(&engine)?;
        }
    }
}
