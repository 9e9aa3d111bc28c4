//! Decode raw sensor buffers into grids of Celsius values.
//!
//! The sensor delivers one little-endian 16-bit fixed-point sample
//! per pixel; `celsius = raw / scale - 273.15`. The divisor is a
//! device constant: most firmware modes use 64, remap modes use 16.
//! (Some vendor call sites spell the same constant as `(raw / 4) / 16`,
//! which is numerically identical to `raw / 64`.)

use byteordered::ByteOrdered;
use ndarray::Array2;
use thiserror::Error;

use crate::region::Pixel;

pub const CELSIUS_OFFSET: f32 = 273.15;

/// Fixed-point divisor used by most device modes.
pub const DEFAULT_SCALE: f32 = 64.0;

/// Divisor used by the remap/dual firmware modes.
pub const REMAP_SCALE: f32 = 16.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed frame buffer: expected {expected} bytes, found {found}")]
    MalformedBuffer { expected: usize, found: usize },
}

/// One frame's worth of decoded temperatures.
///
/// Indexed `(row, col)`; width and height are fixed for a session,
/// and the grid is replaced wholesale on every frame.
#[derive(Debug, Clone)]
pub struct TemperatureGrid {
    values: Array2<f32>,
}

impl TemperatureGrid {
    pub fn from_celsius(values: Array2<f32>) -> Self {
        TemperatureGrid { values }
    }

    pub fn width(&self) -> usize {
        self.values.dim().1
    }

    pub fn height(&self) -> usize {
        self.values.dim().0
    }

    /// Temperature at a pixel known to be in bounds.
    pub fn at(&self, pixel: Pixel) -> f32 {
        self.values[(pixel.y as usize, pixel.x as usize)]
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.values
    }
}

/// Decode a raw frame buffer into a temperature grid.
///
/// The buffer must hold exactly `width * height` little-endian u16
/// samples; anything else fails with
/// [`MalformedBuffer`](DecodeError::MalformedBuffer) without decoding
/// a single pixel. The input is never mutated, and nothing beyond the
/// output grid is allocated, so this is safe to call from a dedicated
/// frame-arrival thread at the sensor's frame rate.
pub fn decode(
    raw: &[u8],
    width: usize,
    height: usize,
    scale: f32,
) -> Result<TemperatureGrid, DecodeError> {
    let expected = width * height * 2;
    if raw.len() != expected {
        return Err(DecodeError::MalformedBuffer {
            expected,
            found: raw.len(),
        });
    }

    let mut rdr = ByteOrdered::le(raw);
    let mut values = Vec::with_capacity(width * height);
    for _ in 0..height {
        for _ in 0..width {
            // Length was checked up front, so the read cannot fail.
            let sample = rdr.read_u16().expect("buffer length checked");
            values.push(sample as f32 / scale - CELSIUS_OFFSET);
        }
    }

    let values =
        Array2::from_shape_vec((height, width), values).expect("shape matches decoded length");
    Ok(TemperatureGrid { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(samples: &[u16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes().to_vec()).collect()
    }

    #[test]
    fn decodes_fixed_point_celsius() {
        let raw = encode(&[17482, 0, u16::MAX, 19200]);
        let grid = decode(&raw, 2, 2, DEFAULT_SCALE).unwrap();

        // 17482 / 64 - 273.15 = 0.00625
        assert!((grid.at(Pixel::new(0, 0)) - 0.00625).abs() < 1e-4);
        assert!((grid.at(Pixel::new(1, 0)) + CELSIUS_OFFSET).abs() < 1e-4);
        // 19200 / 64 - 273.15 = 26.85
        assert!((grid.at(Pixel::new(1, 1)) - 26.85).abs() < 1e-4);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn remap_scale_is_the_same_constant_spelled_differently() {
        let raw = encode(&[19200]);
        let coarse = decode(&raw, 1, 1, DEFAULT_SCALE).unwrap();
        // (raw / 4) / 16 == raw / 64
        let spelled_out = (19200.0_f32 / 4.0) / REMAP_SCALE - CELSIUS_OFFSET;
        assert!((coarse.at(Pixel::new(0, 0)) - spelled_out).abs() < 1e-4);
    }

    #[test]
    fn rejects_wrong_length_without_decoding() {
        let raw = encode(&[0, 0, 0]);
        let err = decode(&raw, 2, 2, DEFAULT_SCALE).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedBuffer {
                expected: 8,
                found: 6
            }
        );
    }

    #[test]
    fn samples_are_little_endian() {
        let grid = decode(&[0x00, 0x50], 1, 1, DEFAULT_SCALE).unwrap();
        // 0x5000 = 20480 -> 20480 / 64 - 273.15 = 46.85
        assert!((grid.at(Pixel::new(0, 0)) - 46.85).abs() < 1e-4);
    }
}
