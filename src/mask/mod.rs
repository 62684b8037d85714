//! Binary dark/light masks.
//!
//! A pixel is dark iff its intensity is strictly below the resolved threshold.
//! The threshold is either fixed or derived from the mean brightness of the
//! image; the resolved value and the mean are reported alongside the mask
//! because they materially affect every downstream detection.

use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::error::invalid;
use crate::util::ZeroSightResult;

/// How the dark/light threshold is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdStrategy {
    /// Deterministic threshold, preferred for scans and synthetic images.
    Fixed(u8),
    /// `clamp(mean - offset, min, max)`, tolerant of lighting changes between
    /// photographs.
    Adaptive { offset: f64, min: u8, max: u8 },
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        ThresholdStrategy::Adaptive {
            offset: 60.0,
            min: 50,
            max: 180,
        }
    }
}

impl ThresholdStrategy {
    /// Resolves the threshold for an image with the given mean intensity.
    pub fn resolve(&self, mean_intensity: f64) -> ZeroSightResult<u8> {
        match *self {
            ThresholdStrategy::Fixed(value) => Ok(value),
            ThresholdStrategy::Adaptive { offset, min, max } => {
                if min > max {
                    return Err(invalid("threshold", "adaptive min exceeds max"));
                }
                if !offset.is_finite() {
                    return Err(invalid("threshold", "adaptive offset must be finite"));
                }
                let raw = (mean_intensity - offset).round();
                Ok(raw.clamp(f64::from(min), f64::from(max)) as u8)
            }
        }
    }
}

/// Row-major boolean grid, `true` marking a dark pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    bits: Vec<bool>,
    width: usize,
    height: usize,
}

impl BinaryMask {
    /// Builds a mask from explicit bits; `bits.len()` must equal `width * height`.
    pub fn from_bits(bits: Vec<bool>, width: usize, height: usize) -> ZeroSightResult<Self> {
        ImageView::from_slice(&bits, width, height)?;
        Ok(Self {
            bits,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether `(x, y)` is dark; out-of-bounds reads as light.
    #[inline]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.bits[y * self.width + x]
    }

    /// Total number of dark pixels.
    pub fn count_dark(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Dark pixels per row, top to bottom.
    pub fn row_counts(&self) -> Vec<usize> {
        self.bits
            .chunks_exact(self.width)
            .map(|row| row.iter().filter(|&&b| b).count())
            .collect()
    }

    /// Dark pixels per column, left to right.
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.width];
        for row in self.bits.chunks_exact(self.width) {
            for (count, &dark) in counts.iter_mut().zip(row) {
                *count += usize::from(dark);
            }
        }
        counts
    }

    pub(crate) fn bits(&self) -> &[bool] {
        &self.bits
    }
}

/// Mask plus the values that produced it.
#[derive(Clone, Debug)]
pub struct MaskBuild {
    pub mask: BinaryMask,
    pub threshold: u8,
    pub mean_intensity: f64,
}

/// Thresholds a grayscale image into a dark/light mask.
pub fn build_mask(
    pixels: ImageView<'_, u8>,
    strategy: ThresholdStrategy,
) -> ZeroSightResult<MaskBuild> {
    let _span = trace_span!("build_mask", width = pixels.width(), height = pixels.height()).entered();

    let mean_intensity = pixels.mean_intensity();
    let threshold = strategy.resolve(mean_intensity)?;

    let mut bits = Vec::with_capacity(pixels.len());
    for row in pixels.rows() {
        bits.extend(row.iter().map(|&v| v < threshold));
    }
    let mask = BinaryMask::from_bits(bits, pixels.width(), pixels.height())?;

    trace_event!(
        "mask_built",
        threshold = threshold,
        mean_intensity = mean_intensity,
        dark = mask.count_dark()
    );
    Ok(MaskBuild {
        mask,
        threshold,
        mean_intensity,
    })
}

#[cfg(test)]
mod tests {
    use super::ThresholdStrategy;

    #[test]
    fn adaptive_threshold_clamps() {
        let s = ThresholdStrategy::Adaptive {
            offset: 60.0,
            min: 50,
            max: 180,
        };
        assert_eq!(s.resolve(250.0).unwrap(), 180);
        assert_eq!(s.resolve(200.0).unwrap(), 140);
        assert_eq!(s.resolve(70.0).unwrap(), 50);
        assert_eq!(ThresholdStrategy::Fixed(99).resolve(250.0).unwrap(), 99);
    }

    #[test]
    fn adaptive_rejects_inverted_bounds() {
        let s = ThresholdStrategy::Adaptive {
            offset: 10.0,
            min: 200,
            max: 100,
        };
        assert!(s.resolve(128.0).is_err());
    }
}
