//! Orchestrator tying decoding, region sampling and color mapping
//! together.
//!
//! Three activity sources drive an [`Engine`] concurrently: the
//! frame-arrival thread pushes raw buffers, the gesture collaborator
//! applies region edits, and a render tick rebuilds the outputs on
//! its own schedule. One mutex guards the region collections and the
//! current grid; a tick samples and builds the color bar inside a
//! single lock scope, so everything a renderer sees describes one
//! frame and one region state. Frame decoding itself runs outside
//! the lock.

use std::sync::Mutex;

use log::{debug, warn};

use crate::gradient::{
    build_color_bar, color_at, ColorBar, DisplayRange, GradientConfig, GradientError, Rgb,
};
use crate::region::{
    line_profile, sample_full, sample_line, sample_lines, sample_point, sample_points,
    sample_rects, LineSeg, Pixel, Rect, RegionCollection, SampleResult, DEFAULT_REGION_CAPACITY,
};
use crate::temperature::{decode, DecodeError, TemperatureGrid, DEFAULT_SCALE};

/// Which touch-editing tool is active. Mirrors the device UI: one
/// tool at a time, any number of regions per kind once active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMode {
    None,
    Point,
    Line,
    Rect,
    FullCenter,
    Trend,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Point,
    Line,
    Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionGeometry {
    Point(Pixel),
    Line(LineSeg),
    Rect(Rect),
}

/// A discrete edit from the gesture collaborator, already translated
/// to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionEdit {
    /// Add a region; at capacity the oldest of its kind is evicted.
    Insert(RegionGeometry),
    /// Replace the geometry at `index` (drag/resize). Never evicts.
    Move { index: usize, to: RegionGeometry },
    Delete { kind: RegionKind, index: usize },
    SetTrend(LineSeg),
    RemoveTrend,
    /// Remove every region and return to idle.
    Clear,
}

/// Everything the renderer needs for one frame, mutually consistent
/// by construction.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub full: SampleResult,
    pub center: SampleResult,
    pub points: Vec<SampleResult>,
    pub lines: Vec<SampleResult>,
    pub rects: Vec<SampleResult>,
    pub trend: Option<SampleResult>,
    pub trend_profile: Vec<f32>,
    pub color_bar: ColorBar,
}

struct Shared {
    scale: f32,
    grid: Option<TemperatureGrid>,
    points: RegionCollection<Pixel>,
    lines: RegionCollection<LineSeg>,
    rects: RegionCollection<Rect>,
    trend: Option<LineSeg>,
    mode: RegionMode,
    state: EngineState,
    gradient: GradientConfig,
    display: Option<DisplayRange>,
}

pub struct Engine {
    width: usize,
    height: usize,
    shared: Mutex<Shared>,
}

impl Engine {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_capacity(width, height, DEFAULT_REGION_CAPACITY)
    }

    /// `capacity` bounds each per-kind region collection.
    pub fn with_capacity(width: usize, height: usize, capacity: usize) -> Self {
        Engine {
            width,
            height,
            shared: Mutex::new(Shared {
                scale: DEFAULT_SCALE,
                grid: None,
                points: RegionCollection::new(capacity),
                lines: RegionCollection::new(capacity),
                rects: RegionCollection::new(capacity),
                trend: None,
                mode: RegionMode::None,
                state: EngineState::Idle,
                gradient: GradientConfig::default(),
                display: None,
            }),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Switch the fixed-point divisor when the device changes mode.
    pub fn set_scale(&self, scale: f32) {
        self.shared.lock().unwrap().scale = scale;
    }

    /// Install a gradient. A rejected config falls back to the
    /// default two-stop gradient so recomputation stays live; the
    /// error is returned for the settings UI to report.
    pub fn set_gradient(&self, gradient: GradientConfig) -> Result<(), GradientError> {
        let mut shared = self.shared.lock().unwrap();
        match gradient.validate() {
            Ok(()) => {
                shared.gradient = gradient;
                Ok(())
            }
            Err(err) => {
                warn!("rejected gradient config ({}), using default", err);
                shared.gradient = GradientConfig::default();
                Err(err)
            }
        }
    }

    /// `None` maps the gradient over each frame's own range.
    pub fn set_display_range(&self, display: Option<DisplayRange>) {
        self.shared.lock().unwrap().display = display;
    }

    pub fn set_mode(&self, mode: RegionMode) {
        self.shared.lock().unwrap().mode = mode;
    }

    pub fn mode(&self) -> RegionMode {
        self.shared.lock().unwrap().mode
    }

    pub fn state(&self) -> EngineState {
        self.shared.lock().unwrap().state
    }

    /// Decode an incoming raw frame and make it current.
    ///
    /// Decoding happens outside the lock so edits are never blocked
    /// by it. A malformed buffer skips the frame: the previous grid
    /// stays current and the next tick keeps serving it.
    pub fn push_frame(&self, raw: &[u8]) -> Result<(), DecodeError> {
        let scale = self.shared.lock().unwrap().scale;
        match decode(raw, self.width, self.height, scale) {
            Ok(grid) => {
                self.shared.lock().unwrap().grid = Some(grid);
                Ok(())
            }
            Err(err) => {
                warn!("skipping frame: {}", err);
                Err(err)
            }
        }
    }

    /// Apply one region edit. Inserting makes the engine active;
    /// only an explicit [`RegionEdit::Clear`] returns it to idle.
    pub fn edit(&self, edit: RegionEdit) {
        let mut shared = self.shared.lock().unwrap();
        match edit {
            RegionEdit::Insert(geometry) => {
                shared.state = EngineState::Active;
                match geometry {
                    RegionGeometry::Point(point) => {
                        shared.points.insert(point);
                        shared.mode = RegionMode::Point;
                    }
                    RegionGeometry::Line(line) => {
                        shared.lines.insert(line);
                        shared.mode = RegionMode::Line;
                    }
                    RegionGeometry::Rect(rect) => {
                        shared.rects.insert(rect);
                        shared.mode = RegionMode::Rect;
                    }
                }
            }
            RegionEdit::Move { index, to } => {
                let replaced = match to {
                    RegionGeometry::Point(point) => shared.points.replace(index, point),
                    RegionGeometry::Line(line) => shared.lines.replace(index, line),
                    RegionGeometry::Rect(rect) => shared.rects.replace(index, rect),
                };
                if !replaced {
                    // the region was evicted between gesture events
                    debug!("move targeted missing region slot {}", index);
                }
            }
            RegionEdit::Delete { kind, index } => {
                let removed = match kind {
                    RegionKind::Point => shared.points.remove(index).is_some(),
                    RegionKind::Line => shared.lines.remove(index).is_some(),
                    RegionKind::Rect => shared.rects.remove(index).is_some(),
                };
                if !removed {
                    debug!("delete targeted missing {:?} slot {}", kind, index);
                }
            }
            RegionEdit::SetTrend(line) => {
                shared.trend = Some(line);
                shared.state = EngineState::Active;
                shared.mode = RegionMode::Trend;
            }
            RegionEdit::RemoveTrend => {
                shared.trend = None;
            }
            RegionEdit::Clear => {
                shared.points.clear();
                shared.lines.clear();
                shared.rects.clear();
                shared.trend = None;
                shared.state = EngineState::Idle;
                shared.mode = RegionMode::None;
            }
        }
    }

    /// Re-evaluate every active region and rebuild the color bar
    /// against the current frame. Returns `None` until the first
    /// frame has been decoded.
    ///
    /// Runs to completion against whatever was current when it
    /// started; an edit committed concurrently shows up in the next
    /// tick.
    pub fn tick(&self) -> Option<Snapshot> {
        let shared = self.shared.lock().unwrap();
        let grid = shared.grid.as_ref()?;

        let full = sample_full(grid);
        let center = sample_point(
            grid,
            Pixel::new(self.width as i32 / 2, self.height as i32 / 2),
        );
        let points = sample_points(grid, &shared.points);
        let lines = sample_lines(grid, &shared.lines);
        let rects = sample_rects(grid, &shared.rects);
        let trend = shared.trend.as_ref().map(|line| sample_line(grid, line));
        let trend_profile = shared
            .trend
            .as_ref()
            .map(|line| line_profile(grid, line))
            .unwrap_or_default();

        let display = shared
            .display
            .unwrap_or_else(|| DisplayRange::new(full.min_value, full.max_value, false));
        let color_bar = build_color_bar(full.min_value, full.max_value, &display, &shared.gradient);

        Some(Snapshot {
            full,
            center,
            points,
            lines,
            rects,
            trend,
            trend_profile,
            color_bar,
        })
    }

    /// Color for an ad-hoc point probe, resolved against the display
    /// window (or the current frame's range when no window is set).
    pub fn probe(&self, value: f32) -> Option<Rgb> {
        let shared = self.shared.lock().unwrap();
        let (min, max) = match shared.display {
            Some(display) => (display.custom_min, display.custom_max),
            None => {
                let full = sample_full(shared.grid.as_ref()?);
                (full.min_value, full.max_value)
            }
        };
        Some(color_at(min, max, value, &shared.gradient))
    }
}
