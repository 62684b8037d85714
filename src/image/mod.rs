//! Grayscale pixel buffers.
//!
//! `ImageView` is a borrowed 2D view into a row-major `u8` buffer where `0` is
//! black and `255` is white. The stride counts elements between the starts of
//! consecutive rows, so a stride larger than the width represents padded rows.
//! The detection pipeline only ever reads from a view; it never mutates the
//! caller's pixels.

use crate::util::{ZeroSightError, ZeroSightResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view; `data.len()` must equal `width * height`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ZeroSightResult<Self> {
        let expected = required_len(width, height, width)?;
        if data.len() != expected {
            return Err(ZeroSightError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride: width,
        })
    }

    /// Creates a view with an explicit stride over a possibly padded buffer.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> ZeroSightResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(ZeroSightError::BufferSizeMismatch {
                expected: needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of pixels covered by the view.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; views are validated non-empty on construction.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over all rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }
}

impl ImageView<'_, u8> {
    /// Mean intensity over all pixels.
    pub fn mean_intensity(&self) -> f64 {
        let sum: u64 = self
            .rows()
            .map(|row| row.iter().map(|&v| u64::from(v)).sum::<u64>())
            .sum();
        sum as f64 / self.len() as f64
    }
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a contiguous buffer; the length must equal `width * height`.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ZeroSightResult<Self> {
        ImageView::from_slice(&data, width, height)?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the raw row-major pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> ZeroSightResult<usize> {
    if width == 0 || height == 0 {
        return Err(ZeroSightError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(ZeroSightError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(ZeroSightError::InvalidDimensions { width, height })
}
