//! Regions of interest and min/max temperature sampling.
//!
//! A region is a point, a line segment, a rectangle, or the whole
//! frame. Sampling a region walks every grid cell it covers and
//! reports the extreme values together with the pixel that attains
//! each of them. Geometry arrives in grid coordinates (the view layer
//! does its own view-to-grid scaling) and is clamped into the grid
//! before any cell is read.

use itertools::iproduct;
use serde_derive::*;
use thiserror::Error;

use crate::temperature::TemperatureGrid;

/// How many regions of each kind may coexist before the oldest one
/// is evicted.
pub const DEFAULT_REGION_CAPACITY: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("region covers no grid cells after clamping")]
    EmptyRegion,
}

/// A grid coordinate. Signed so that mid-edit geometry may lie
/// outside the grid; clamping happens at sampling time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub fn new(x: i32, y: i32) -> Self {
        Pixel { x, y }
    }

    fn clamped(self, width: usize, height: usize) -> Pixel {
        Pixel {
            x: self.x.max(0).min(width as i32 - 1),
            y: self.y.max(0).min(height as i32 - 1),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineSeg {
    pub start: Pixel,
    pub end: Pixel,
}

impl LineSeg {
    pub fn new(start: Pixel, end: Pixel) -> Self {
        LineSeg { start, end }
    }
}

/// Half-open rectangle: cells in `[left, right) x [top, bottom)`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Clip to the grid. Out-of-range rectangles are not rejected,
    /// only clipped; the result may be empty.
    fn clipped(self, width: usize, height: usize) -> Rect {
        Rect {
            left: self.left.max(0),
            top: self.top.max(0),
            right: self.right.min(width as i32),
            bottom: self.bottom.min(height as i32),
        }
    }

    fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

/// One region of interest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionSpec {
    Point(Pixel),
    Line(LineSeg),
    Rect(Rect),
    FullFrame,
}

/// Min/max temperatures over one region, with the pixels attaining
/// them.
///
/// `ordinal` is the 1-based insertion rank inside the owning
/// collection, kept so overlay consumers can label "Region #1/#2/#3"
/// without re-deriving order; 0 marks an unused or empty slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleResult {
    pub min_value: f32,
    pub min_pixel: Pixel,
    pub max_value: f32,
    pub max_pixel: Pixel,
    pub ordinal: usize,
}

impl SampleResult {
    pub fn is_set(&self) -> bool {
        self.ordinal != 0
    }

    fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }
}

/// Grid cells covered by the segment, both endpoints inclusive,
/// rasterized with Bresenham so traversal is deterministic and
/// independent of drag direction artifacts.
pub fn line_cells(start: Pixel, end: Pixel) -> Vec<Pixel> {
    let mut cells = Vec::new();
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };

    let mut err = dx + dy;
    let mut cur = start;
    loop {
        cells.push(cur);
        if cur == end {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            cur.x += sx;
        }
        if doubled <= dx {
            err += dx;
            cur.y += sy;
        }
    }
    cells
}

fn scan(grid: &TemperatureGrid, cells: impl IntoIterator<Item = Pixel>) -> Option<SampleResult> {
    let mut result: Option<SampleResult> = None;
    for pixel in cells {
        let value = grid.at(pixel);
        match result.as_mut() {
            None => {
                result = Some(SampleResult {
                    min_value: value,
                    min_pixel: pixel,
                    max_value: value,
                    max_pixel: pixel,
                    ordinal: 0,
                });
            }
            Some(r) => {
                if value < r.min_value {
                    r.min_value = value;
                    r.min_pixel = pixel;
                }
                if value > r.max_value {
                    r.max_value = value;
                    r.max_pixel = pixel;
                }
            }
        }
    }
    result
}

/// Sample a single pixel: min and max are the pixel's own value.
pub fn sample_point(grid: &TemperatureGrid, point: Pixel) -> SampleResult {
    let pixel = point.clamped(grid.width(), grid.height());
    let value = grid.at(pixel);
    SampleResult {
        min_value: value,
        min_pixel: pixel,
        max_value: value,
        max_pixel: pixel,
        ordinal: 0,
    }
}

/// Sample every cell on the segment. A degenerate segment reduces to
/// a point sample.
pub fn sample_line(grid: &TemperatureGrid, line: &LineSeg) -> SampleResult {
    let start = line.start.clamped(grid.width(), grid.height());
    let end = line.end.clamped(grid.width(), grid.height());
    if start == end {
        return sample_point(grid, start);
    }
    scan(grid, line_cells(start, end)).expect("line has at least one cell")
}

/// Scan `[left, right) x [top, bottom)` after clipping to the grid.
pub fn sample_rect(grid: &TemperatureGrid, rect: &Rect) -> Result<SampleResult, RegionError> {
    let clipped = rect.clipped(grid.width(), grid.height());
    if clipped.is_empty() {
        return Err(RegionError::EmptyRegion);
    }
    let cells = iproduct!(clipped.top..clipped.bottom, clipped.left..clipped.right)
        .map(|(y, x)| Pixel { x, y });
    Ok(scan(grid, cells).expect("non-empty rect has cells"))
}

/// Sample the whole frame. Always available; recomputed every frame
/// to feed the color mapping.
pub fn sample_full(grid: &TemperatureGrid) -> SampleResult {
    sample_rect(
        grid,
        &Rect::new(0, 0, grid.width() as i32, grid.height() as i32),
    )
    .expect("the full frame is never empty")
}

pub fn sample(grid: &TemperatureGrid, spec: &RegionSpec) -> Result<SampleResult, RegionError> {
    match spec {
        RegionSpec::Point(p) => Ok(sample_point(grid, *p)),
        RegionSpec::Line(l) => Ok(sample_line(grid, l)),
        RegionSpec::Rect(r) => sample_rect(grid, r),
        RegionSpec::FullFrame => Ok(sample_full(grid)),
    }
}

/// Temperatures along a segment in traversal order, for trend charts.
pub fn line_profile(grid: &TemperatureGrid, line: &LineSeg) -> Vec<f32> {
    let start = line.start.clamped(grid.width(), grid.height());
    let end = line.end.clamped(grid.width(), grid.height());
    line_cells(start, end)
        .into_iter()
        .map(|p| grid.at(p))
        .collect()
}

/// Bounded, insertion-ordered list of regions of one kind.
///
/// Inserting at capacity evicts the oldest entry (FIFO). Edits never
/// evict; only inserts do.
#[derive(Debug, Clone)]
pub struct RegionCollection<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> RegionCollection<T> {
    pub fn new(capacity: usize) -> Self {
        RegionCollection {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn insert(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.remove(0);
        }
        self.items.push(item);
    }

    /// Replace the geometry at `index`, keeping its rank. Returns
    /// false for an out-of-range index (e.g. the region was evicted
    /// between gesture events).
    pub fn replace(&mut self, index: usize, item: T) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

fn sample_slots<T>(
    grid: &TemperatureGrid,
    collection: &RegionCollection<T>,
    mut sample_one: impl FnMut(&TemperatureGrid, &T) -> Result<SampleResult, RegionError>,
) -> Vec<SampleResult> {
    let mut results = vec![SampleResult::default(); collection.capacity()];
    for (index, item) in collection.iter().enumerate() {
        // An empty clamped extent is an expected transient state
        // while the user is still dragging; the slot stays unset.
        if let Ok(result) = sample_one(grid, item) {
            results[index] = result.with_ordinal(index + 1);
        }
    }
    results
}

/// Sample every point region; slot `i` carries ordinal `i + 1`.
pub fn sample_points(
    grid: &TemperatureGrid,
    points: &RegionCollection<Pixel>,
) -> Vec<SampleResult> {
    sample_slots(grid, points, |g, p| Ok(sample_point(g, *p)))
}

pub fn sample_lines(grid: &TemperatureGrid, lines: &RegionCollection<LineSeg>) -> Vec<SampleResult> {
    sample_slots(grid, lines, |g, l| Ok(sample_line(g, l)))
}

pub fn sample_rects(grid: &TemperatureGrid, rects: &RegionCollection<Rect>) -> Vec<SampleResult> {
    sample_slots(grid, rects, sample_rect)
}
