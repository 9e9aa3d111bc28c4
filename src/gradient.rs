//! Pseudo-color mapping from temperatures to RGB.
//!
//! Two entry points: [`build_color_bar`] precomputes the 256-entry
//! lookup table used to pseudo-color a whole frame, and [`color_at`]
//! resolves a single temperature for point probes.
//!
//! The bar reconciles two ranges: the frame's *actual* min/max and
//! the user's *display* window, which may be narrower or wider than
//! the data on either side. Every relative arrangement of the two is
//! one [`RangeRegime`], dispatched explicitly so each regime stays
//! independently testable. Out-of-window positions either clamp to
//! the boundary stop color or degrade to gray ramps, depending on
//! [`DisplayRange::grayscale_out_of_range`].

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::*;
use thiserror::Error;

/// Entries in a color bar.
pub const COLOR_BAR_LEN: usize = 256;

/// Temperatures this close to a display bound take the exact
/// boundary stop color.
const BOUNDARY_EPSILON: f32 = 0.1;

// Gray ramp endpoints for out-of-window degradation. Colder than the
// window runs mid-gray down to black; hotter runs white down to the
// same mid-gray, so the two families never collide.
const GRAY_FLOOR_FROM: Rgb = Rgb::new(0x85, 0x85, 0x85);
const GRAY_FLOOR_TO: Rgb = Rgb::new(0x00, 0x00, 0x00);
const GRAY_CEIL_FROM: Rgb = Rgb::new(0xff, 0xff, 0xff);
const GRAY_CEIL_TO: Rgb = Rgb::new(0x85, 0x85, 0x85);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GradientError {
    #[error("gradient needs at least two color stops, found {0}")]
    TooFewStops(usize),
    #[error("gradient has {stops} stops but {positions} positions")]
    PositionCountMismatch { stops: usize, positions: usize },
    #[error("gradient positions must ascend within [0, 1]")]
    UnorderedPositions,
    #[error("color must be rrggbb hex, got {0:?}")]
    BadColor(String),
}

/// One 8-bit RGB color. Serialized as an `"#rrggbb"` string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn from_hex(text: &str) -> Result<Self, GradientError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^#?[0-9a-fA-F]{6}$").unwrap();
        }
        if !RE.is_match(text) {
            return Err(GradientError::BadColor(text.into()));
        }
        let hex = text.trim_start_matches('#');
        let channel = |range| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| GradientError::BadColor(text.into()))
        };
        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Per-channel linear interpolation, `round((1-t)*a + t*b)` in
    /// 8-bit space. `t` is clamped; never extrapolates.
    pub fn lerp(from: Rgb, to: Rgb, t: f32) -> Rgb {
        let t = clamp01(t);
        let channel = |a: u8, b: u8| ((1.0 - t) * a as f32 + t * b as f32).round() as u8;
        Rgb {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
        }
    }

    /// True for achromatic colors, i.e. the out-of-window ramps.
    pub fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        Rgb::from_hex(&text).map_err(Error::custom)
    }
}

/// Ordered color stops, coldest first.
///
/// Without explicit `positions` the stops are equally spaced over
/// `[0, 1]`; with them, each stop sits at its own ratio and segments
/// may have different widths.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GradientConfig {
    pub stops: Vec<Rgb>,
    #[serde(default)]
    pub positions: Option<Vec<f32>>,
}

impl Default for GradientConfig {
    /// The two-stop blue-to-red fallback used when a supplied config
    /// is rejected.
    fn default() -> Self {
        GradientConfig {
            stops: vec![Rgb::new(0x00, 0x00, 0xff), Rgb::new(0xff, 0x00, 0x00)],
            positions: None,
        }
    }
}

impl GradientConfig {
    pub fn new(stops: Vec<Rgb>) -> Result<Self, GradientError> {
        let config = GradientConfig {
            stops,
            positions: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_positions(stops: Vec<Rgb>, positions: Vec<f32>) -> Result<Self, GradientError> {
        let config = GradientConfig {
            stops,
            positions: Some(positions),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GradientError> {
        if self.stops.len() < 2 {
            return Err(GradientError::TooFewStops(self.stops.len()));
        }
        if let Some(positions) = &self.positions {
            if positions.len() != self.stops.len() {
                return Err(GradientError::PositionCountMismatch {
                    stops: self.stops.len(),
                    positions: positions.len(),
                });
            }
            let ascending = positions.windows(2).all(|w| w[0] <= w[1]);
            let in_range = positions.iter().all(|p| (0.0..=1.0).contains(p));
            if !ascending || !in_range {
                return Err(GradientError::UnorderedPositions);
            }
        }
        Ok(())
    }

    fn position(&self, index: usize) -> f32 {
        match &self.positions {
            Some(positions) => positions[index],
            None => index as f32 / (self.stops.len() - 1) as f32,
        }
    }

    /// Color at ratio `t` in `[0, 1]`: locate the bracketing pair of
    /// stops and interpolate within that segment.
    pub fn eval(&self, t: f32) -> Rgb {
        let n = self.stops.len();
        match n {
            0 => return Rgb::default(),
            1 => return self.stops[0],
            _ => (),
        }
        let t = clamp01(t);

        let (segment, local) = match &self.positions {
            Some(positions) => {
                let mut segment = n - 2;
                for k in 0..n - 1 {
                    if t <= positions[k + 1] {
                        segment = k;
                        break;
                    }
                }
                let width = positions[segment + 1] - positions[segment];
                let local = if width > f32::EPSILON {
                    (t - positions[segment]) / width
                } else {
                    1.0
                };
                (segment, local)
            }
            None => {
                let scaled = t * (n - 1) as f32;
                let segment = (scaled.floor() as usize).min(n - 2);
                (segment, scaled - segment as f32)
            }
        };

        Rgb::lerp(self.stops[segment], self.stops[segment + 1], local)
    }

    /// Sub-gradient covering `[lo, hi]` of this one, anchored at the
    /// interpolated boundary colors and rescaled onto `[0, 1]`.
    ///
    /// This is how a partial display window re-derives its stop list:
    /// interior stops keep their colors, the cut edges get the exact
    /// color the full gradient has there, so the two agree at the
    /// seam.
    pub fn slice(&self, lo: f32, hi: f32) -> GradientConfig {
        let lo = clamp01(lo);
        let hi = clamp01(hi);
        if hi - lo <= f32::EPSILON {
            let edge = self.eval(lo);
            return GradientConfig {
                stops: vec![edge, edge],
                positions: None,
            };
        }

        let mut stops = vec![self.eval(lo)];
        let mut positions = vec![0.0];
        for (index, stop) in self.stops.iter().enumerate() {
            let p = self.position(index);
            if p > lo + 1e-6 && p < hi - 1e-6 {
                stops.push(*stop);
                positions.push((p - lo) / (hi - lo));
            }
        }
        stops.push(self.eval(hi));
        positions.push(1.0);

        GradientConfig {
            stops,
            positions: Some(positions),
        }
    }
}

/// The user's display window plus the grayscale degradation toggle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub custom_min: f32,
    pub custom_max: f32,
    pub grayscale_out_of_range: bool,
}

impl DisplayRange {
    pub fn new(custom_min: f32, custom_max: f32, grayscale_out_of_range: bool) -> Self {
        DisplayRange {
            custom_min,
            custom_max,
            grayscale_out_of_range,
        }
    }
}

/// Relative arrangement of the frame's actual range and the display
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRegime {
    /// Window inside (or equal to) the data range; either side may
    /// have an out-of-window band.
    WindowWithin,
    /// Data range strictly inside the window; no out-of-window band,
    /// the bar recolors with the window's stop subset.
    WindowCovers,
    /// Every data value is below the window.
    WindowAbove,
    /// Every data value is above the window.
    WindowBelow,
    /// Data extends below the window, window extends above the data.
    OverlapLow,
    /// Data extends above the window, window extends below the data.
    OverlapHigh,
}

pub fn classify(actual_min: f32, actual_max: f32, display: &DisplayRange) -> RangeRegime {
    if display.custom_min > actual_max {
        RangeRegime::WindowAbove
    } else if display.custom_max < actual_min {
        RangeRegime::WindowBelow
    } else if actual_min <= display.custom_min && actual_max >= display.custom_max {
        RangeRegime::WindowWithin
    } else if actual_min >= display.custom_min && actual_max <= display.custom_max {
        RangeRegime::WindowCovers
    } else if actual_min < display.custom_min {
        RangeRegime::OverlapLow
    } else {
        RangeRegime::OverlapHigh
    }
}

/// 256-entry RGB lookup table; index 0 maps to the frame's actual
/// minimum, index 255 to its maximum. Consumed read-only by the
/// renderer.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorBar([Rgb; COLOR_BAR_LEN]);

impl ColorBar {
    pub fn entries(&self) -> &[Rgb; COLOR_BAR_LEN] {
        &self.0
    }
}

impl std::ops::Index<usize> for ColorBar {
    type Output = Rgb;
    fn index(&self, index: usize) -> &Rgb {
        &self.0[index]
    }
}

impl fmt::Debug for ColorBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColorBar({} .. {})", self.0[0], self.0[COLOR_BAR_LEN - 1])
    }
}

/// Build the pseudo-color lookup table for one frame.
///
/// Deterministic: identical inputs yield identical tables. With
/// grayscale degradation off the table is continuous across every
/// regime boundary; with it on, the gray ramps are intentionally
/// distinct from the gradient's boundary colors.
pub fn build_color_bar(
    actual_min: f32,
    actual_max: f32,
    display: &DisplayRange,
    gradient: &GradientConfig,
) -> ColorBar {
    let span = actual_max - actual_min;
    let window = display.custom_max - display.custom_min;
    if !(span > 0.0) || !(window > 0.0) {
        // Degenerate frame or window: plain ramp over the gradient.
        return fill(|ratio| gradient.eval(ratio));
    }

    match classify(actual_min, actual_max, display) {
        RangeRegime::WindowAbove => {
            let first = gradient.eval(0.0);
            fill(|ratio| {
                if display.grayscale_out_of_range {
                    Rgb::lerp(GRAY_CEIL_FROM, GRAY_FLOOR_TO, ratio)
                } else {
                    first
                }
            })
        }
        RangeRegime::WindowBelow => {
            let last = gradient.eval(1.0);
            fill(|ratio| {
                if display.grayscale_out_of_range {
                    Rgb::lerp(GRAY_FLOOR_TO, GRAY_CEIL_FROM, ratio)
                } else {
                    last
                }
            })
        }
        RangeRegime::WindowWithin => {
            let min_gray = if actual_min < display.custom_min {
                Some((display.custom_min - actual_min) / span)
            } else {
                None
            };
            let max_gray = if actual_max > display.custom_max {
                Some((display.custom_max - actual_min) / span)
            } else {
                None
            };
            banded(display, gradient.clone(), min_gray, max_gray)
        }
        RangeRegime::WindowCovers => {
            let effective = gradient.slice(
                (actual_min - display.custom_min) / window,
                (actual_max - display.custom_min) / window,
            );
            banded(display, effective, None, None)
        }
        RangeRegime::OverlapLow => {
            let min_gray = (display.custom_min - actual_min) / span;
            let effective = gradient.slice(0.0, (actual_max - display.custom_min) / window);
            banded(display, effective, Some(min_gray), None)
        }
        RangeRegime::OverlapHigh => {
            let max_gray = (display.custom_max - actual_min) / span;
            let effective = gradient.slice((actual_min - display.custom_min) / window, 1.0);
            banded(display, effective, None, Some(max_gray))
        }
    }
}

fn fill(mut color_for: impl FnMut(f32) -> Rgb) -> ColorBar {
    let mut entries = [Rgb::default(); COLOR_BAR_LEN];
    for (i, entry) in entries.iter_mut().enumerate() {
        *entry = color_for(i as f32 / (COLOR_BAR_LEN - 1) as f32);
    }
    ColorBar(entries)
}

/// Fill a bar whose in-window band spans `[min_gray, max_gray]` of
/// the actual range, with gray or clamped regions outside it.
fn banded(
    display: &DisplayRange,
    effective: GradientConfig,
    min_gray: Option<f32>,
    max_gray: Option<f32>,
) -> ColorBar {
    let lo = min_gray.unwrap_or(0.0);
    let hi = max_gray.unwrap_or(1.0);

    fill(|ratio| {
        if let Some(floor) = min_gray.filter(|floor| ratio < *floor && *floor > 0.0) {
            if display.grayscale_out_of_range {
                Rgb::lerp(GRAY_FLOOR_FROM, GRAY_FLOOR_TO, ratio / floor)
            } else {
                effective.eval(0.0)
            }
        } else if let Some(ceil) = max_gray.filter(|ceil| ratio > *ceil) {
            if display.grayscale_out_of_range {
                Rgb::lerp(GRAY_CEIL_FROM, GRAY_CEIL_TO, (1.0 - ratio) / (1.0 - ceil))
            } else {
                effective.eval(1.0)
            }
        } else if hi - lo > f32::EPSILON {
            effective.eval((ratio - lo) / (hi - lo))
        } else {
            effective.eval(0.0)
        }
    })
}

/// Resolve one temperature to a color within the display window.
///
/// Values within [`BOUNDARY_EPSILON`] of either bound take the exact
/// boundary stop color; anything else clamps into the window and
/// interpolates between the bracketing stops.
pub fn color_at(custom_min: f32, custom_max: f32, value: f32, gradient: &GradientConfig) -> Rgb {
    let stops = &gradient.stops;
    if stops.is_empty() {
        return Rgb::default();
    }
    if (value - custom_max).abs() < BOUNDARY_EPSILON {
        return stops[stops.len() - 1];
    }
    if (value - custom_min).abs() < BOUNDARY_EPSILON {
        return stops[0];
    }
    let window = custom_max - custom_min;
    if !(window > 0.0) {
        return stops[0];
    }
    gradient.eval(clamp01((value - custom_min) / window))
}

fn clamp01(t: f32) -> f32 {
    t.max(0.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xff);
    const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);

    fn three_stop() -> GradientConfig {
        GradientConfig::new(vec![
            Rgb::new(0x00, 0x00, 0xff),
            Rgb::new(0x00, 0xff, 0x00),
            Rgb::new(0xff, 0x00, 0x00),
        ])
        .unwrap()
    }

    fn max_adjacent_step(bar: &ColorBar) -> i32 {
        (1..COLOR_BAR_LEN)
            .map(|i| {
                let a = bar[i - 1];
                let b = bar[i];
                let dr = (a.r as i32 - b.r as i32).abs();
                let dg = (a.g as i32 - b.g as i32).abs();
                let db = (a.b as i32 - b.b as i32).abs();
                dr.max(dg).max(db)
            })
            .max()
            .unwrap()
    }

    #[test]
    fn hex_colors_round_trip() {
        let parsed = Rgb::from_hex("#ff8000").unwrap();
        assert_eq!(parsed, Rgb::new(0xff, 0x80, 0x00));
        assert_eq!(parsed.to_string(), "#ff8000");
        assert_eq!(Rgb::from_hex("ff8000").unwrap(), parsed);
        assert!(Rgb::from_hex("#ff80").is_err());
        assert!(Rgb::from_hex("not a color").is_err());
    }

    #[test]
    fn gradient_config_deserializes_from_json() {
        let config: GradientConfig = serde_json::from_str(
            r##"{"stops": ["#0000ff", "#00ff00", "#ff0000"], "positions": [0.0, 0.9, 1.0]}"##,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.stops[1], Rgb::new(0x00, 0xff, 0x00));
    }

    #[test]
    fn rejects_invalid_configs() {
        assert_eq!(
            GradientConfig::new(vec![BLUE]).unwrap_err(),
            GradientError::TooFewStops(1)
        );
        assert_eq!(
            GradientConfig::with_positions(vec![BLUE, RED], vec![0.0]).unwrap_err(),
            GradientError::PositionCountMismatch {
                stops: 2,
                positions: 1
            }
        );
        assert_eq!(
            GradientConfig::with_positions(vec![BLUE, RED], vec![0.8, 0.2]).unwrap_err(),
            GradientError::UnorderedPositions
        );
    }

    #[test]
    fn color_at_midpoint_interpolates() {
        let gradient = GradientConfig::default();
        assert_eq!(
            color_at(0.0, 100.0, 50.0, &gradient),
            Rgb::new(128, 0, 128)
        );
    }

    #[test]
    fn color_at_bounds_return_exact_stops() {
        let gradient = GradientConfig::default();
        assert_eq!(color_at(0.0, 100.0, 100.0, &gradient), RED);
        assert_eq!(color_at(0.0, 100.0, 0.05, &gradient), BLUE);
    }

    #[test]
    fn color_at_clamps_out_of_window_values() {
        let gradient = GradientConfig::default();
        assert_eq!(color_at(0.0, 100.0, -10.0, &gradient), BLUE);
        assert_eq!(color_at(0.0, 100.0, 400.0, &gradient), RED);
    }

    #[test]
    fn color_at_honors_explicit_positions() {
        let green = Rgb::new(0x00, 0xff, 0x00);
        let gradient =
            GradientConfig::with_positions(vec![BLUE, green, RED], vec![0.0, 0.75, 1.0]).unwrap();
        // ratio 0.375 is halfway through the wide first segment
        assert_eq!(
            color_at(0.0, 100.0, 37.5, &gradient),
            Rgb::lerp(BLUE, green, 0.5)
        );
        // ratio 0.875 is halfway through the narrow last segment
        assert_eq!(
            color_at(0.0, 100.0, 87.5, &gradient),
            Rgb::lerp(green, RED, 0.5)
        );
    }

    #[test]
    fn slice_agrees_with_parent_at_the_seams() {
        let gradient = three_stop();
        let sliced = gradient.slice(0.25, 0.75);
        assert_eq!(sliced.eval(0.0), gradient.eval(0.25));
        assert_eq!(sliced.eval(1.0), gradient.eval(0.75));
        // interior stop survives at its rescaled position
        assert_eq!(sliced.eval(0.5), gradient.eval(0.5));
    }

    #[test]
    fn bar_is_idempotent() {
        let display = DisplayRange::new(10.0, 60.0, true);
        let gradient = three_stop();
        let a = build_color_bar(-5.0, 80.0, &display, &gradient);
        let b = build_color_bar(-5.0, 80.0, &display, &gradient);
        assert_eq!(a, b);
    }

    #[test]
    fn window_within_grayscale_ramps_below_the_floor() {
        // actual -10..110, window 0..100, grayscale on
        let display = DisplayRange::new(0.0, 100.0, true);
        let gradient = GradientConfig::default();
        let bar = build_color_bar(-10.0, 110.0, &display, &gradient);

        assert_eq!(classify(-10.0, 110.0, &display), RangeRegime::WindowWithin);
        // entries for temperatures below 0C: ratio < 10/120
        let floor_entries = COLOR_BAR_LEN * 10 / 120;
        for i in 0..floor_entries - 1 {
            assert!(bar[i].is_gray(), "entry {} should be gray, got {}", i, bar[i]);
            assert_ne!(bar[i], gradient.stops[0]);
        }
        // hottest entry is the white end of the ceiling ramp
        assert_eq!(bar[COLOR_BAR_LEN - 1], Rgb::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn window_within_clamps_without_grayscale() {
        let display = DisplayRange::new(0.0, 100.0, false);
        let gradient = GradientConfig::default();
        let bar = build_color_bar(-10.0, 110.0, &display, &gradient);

        assert_eq!(bar[0], BLUE);
        assert_eq!(bar[COLOR_BAR_LEN - 1], RED);
        assert!(max_adjacent_step(&bar) <= 8, "bar must stay continuous");
    }

    #[test]
    fn window_covers_recolors_from_the_stop_subset() {
        // actual 20..40 strictly inside window 0..100
        let display = DisplayRange::new(0.0, 100.0, true);
        let gradient = three_stop();
        let bar = build_color_bar(20.0, 40.0, &display, &gradient);

        assert_eq!(classify(20.0, 40.0, &display), RangeRegime::WindowCovers);
        assert_eq!(bar[0], gradient.eval(0.2));
        assert_eq!(bar[COLOR_BAR_LEN - 1], gradient.eval(0.4));
        assert!(max_adjacent_step(&bar) <= 8);
    }

    #[test]
    fn overlap_low_anchors_at_the_data_ceiling() {
        // actual -20..50, window 0..100: data extends below the
        // window, window extends above the data
        let display = DisplayRange::new(0.0, 100.0, false);
        let gradient = three_stop();
        let bar = build_color_bar(-20.0, 50.0, &display, &gradient);

        assert_eq!(classify(-20.0, 50.0, &display), RangeRegime::OverlapLow);
        // below-window entries clamp to the first stop
        assert_eq!(bar[0], gradient.eval(0.0));
        // the hottest entry is the window color of 50C
        assert_eq!(bar[COLOR_BAR_LEN - 1], gradient.eval(0.5));
        assert!(max_adjacent_step(&bar) <= 8, "no seam at the regime boundary");
    }

    #[test]
    fn overlap_high_anchors_at_the_data_floor() {
        // actual 50..150, window 0..100
        let display = DisplayRange::new(0.0, 100.0, false);
        let gradient = three_stop();
        let bar = build_color_bar(50.0, 150.0, &display, &gradient);

        assert_eq!(classify(50.0, 150.0, &display), RangeRegime::OverlapHigh);
        assert_eq!(bar[0], gradient.eval(0.5));
        assert_eq!(bar[COLOR_BAR_LEN - 1], gradient.eval(1.0));
        assert!(max_adjacent_step(&bar) <= 8);
    }

    #[test]
    fn disjoint_ranges_degenerate_cleanly() {
        let gradient = GradientConfig::default();

        // data entirely below the window, no grayscale: clamp cold
        let display = DisplayRange::new(60.0, 100.0, false);
        let bar = build_color_bar(0.0, 30.0, &display, &gradient);
        assert_eq!(classify(0.0, 30.0, &display), RangeRegime::WindowAbove);
        assert!(bar.entries().iter().all(|c| *c == BLUE));

        // data entirely above the window, grayscale: luminance ramp
        let display = DisplayRange::new(-40.0, -20.0, true);
        let bar = build_color_bar(0.0, 30.0, &display, &gradient);
        assert_eq!(classify(0.0, 30.0, &display), RangeRegime::WindowBelow);
        assert!(bar.entries().iter().all(Rgb::is_gray));
        assert_eq!(bar[0], Rgb::new(0x00, 0x00, 0x00));
        assert_eq!(bar[COLOR_BAR_LEN - 1], Rgb::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn degenerate_actual_range_falls_back_to_plain_ramp() {
        let display = DisplayRange::new(0.0, 100.0, true);
        let gradient = GradientConfig::default();
        let bar = build_color_bar(25.0, 25.0, &display, &gradient);
        assert_eq!(bar[0], BLUE);
        assert_eq!(bar[COLOR_BAR_LEN - 1], RED);
    }

    #[test]
    fn gray_families_do_not_collide() {
        // with both bands active the floor ramp tops out at mid-gray
        // from below black, the ceiling ramp at white from mid-gray,
        // so overlay code can tell them apart
        let display = DisplayRange::new(20.0, 30.0, true);
        let gradient = GradientConfig::default();
        let bar = build_color_bar(0.0, 50.0, &display, &gradient);

        assert_eq!(bar[0], GRAY_FLOOR_FROM);
        assert_eq!(bar[COLOR_BAR_LEN - 1], GRAY_CEIL_FROM);
    }
}
