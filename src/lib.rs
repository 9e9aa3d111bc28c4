//! Core engine for region-based temperature sampling and adaptive
//! pseudo-coloring of thermal camera frames.
//!
//! This crate provides three functionalities:
//!
//! 1. [Decode][temperature] raw fixed-point sensor buffers into
//!    grids of Celsius values.
//!
//! 2. [Sample][region] user-defined regions of interest -- points,
//!    line segments, rectangles, or the whole frame -- reporting
//!    min/max temperatures and the pixel attaining each extremum,
//!    with bounded FIFO region collections.
//!
//! 3. [Map][gradient] temperatures to colors against a
//!    user-configured display range that may be narrower or wider
//!    than the frame's own range, as a 256-entry color bar for
//!    whole-frame pseudo-coloring or a single color for point
//!    probes, with optional grayscale degradation outside the range.
//!
//! The [`Engine`] owns all three, driven once per incoming frame and
//! once per region-edit event. On-screen rendering, gesture-to-region
//! translation and device transport are external collaborators: they
//! feed raw buffers and edit commands in, and consume the numeric
//! results.
//!
//! # Usage
//!
//! ```rust
//! use thermogrid::engine::{Engine, RegionEdit, RegionGeometry};
//! use thermogrid::region::Rect;
//!
//! let engine = Engine::new(4, 4);
//!
//! // one 4x4 frame of little-endian fixed-point samples
//! let raw: Vec<u8> = (0u16..16)
//!     .flat_map(|i| {
//!         let sample = ((20.0 + i as f32 + 273.15) * 64.0) as u16;
//!         sample.to_le_bytes().to_vec()
//!     })
//!     .collect();
//! engine.push_frame(&raw).unwrap();
//!
//! engine.edit(RegionEdit::Insert(RegionGeometry::Rect(Rect::new(0, 0, 2, 2))));
//!
//! let snapshot = engine.tick().expect("a frame has been decoded");
//! assert!(snapshot.rects[0].is_set());
//! assert_eq!(snapshot.color_bar.entries().len(), 256);
//! ```

pub mod temperature;

pub mod region;
pub mod gradient;
pub mod engine;

pub mod stats;
pub mod cli;

pub use crate::engine::{Engine, Snapshot};
pub use crate::gradient::{ColorBar, DisplayRange, GradientConfig, Rgb};
pub use crate::region::{RegionSpec, SampleResult};
pub use crate::temperature::TemperatureGrid;
