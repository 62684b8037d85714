//! Crosshair-peak bull locator.
//!
//! Within the central band of the search box the column and the row with the
//! largest mean darkness (`255 - intensity`) are taken as the crosshair lines.
//! A thick line yields a plateau of near-equal peaks; its center is used.

use crate::geom::{PixelBox, PixelPoint};
use crate::image::ImageView;
use crate::util::error::invalid;
use crate::util::{ZeroSightError, ZeroSightResult};

/// Search settings for the crosshair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrosshairParams {
    /// Fraction of the search box, centered, scanned for each line.
    pub band_frac: f64,
    /// Minimum mean darkness of the winning row and column.
    pub min_darkness: f64,
}

impl Default for CrosshairParams {
    fn default() -> Self {
        Self {
            band_frac: 0.5,
            min_darkness: 64.0,
        }
    }
}

/// Integer index range `[lo, hi)` covered by `[a, b)`, clipped to `[0, limit)`.
fn index_range(a: f64, b: f64, limit: usize) -> (usize, usize) {
    let lo = a.max(0.0).floor() as usize;
    let hi = (b.ceil().max(0.0) as usize).min(limit);
    (lo.min(hi), hi)
}

/// Center of the plateau around the strongest profile entry.
fn peak_center(profile: &[f64], offset: usize) -> Option<(f64, f64)> {
    let (peak_idx, &peak) = profile
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1).then(b.0.cmp(&a.0)))?;
    let floor = 0.9 * peak;
    let mut lo = peak_idx;
    while lo > 0 && profile[lo - 1] >= floor {
        lo -= 1;
    }
    let mut hi = peak_idx;
    while hi + 1 < profile.len() && profile[hi + 1] >= floor {
        hi += 1;
    }
    let center = (offset + lo) as f64 + 0.5 * (hi - lo) as f64 + 0.5;
    Some((center, peak))
}

/// Finds the crosshair intersection inside `within`.
pub fn locate_crosshair(
    pixels: ImageView<'_, u8>,
    within: PixelBox,
    params: CrosshairParams,
) -> ZeroSightResult<PixelPoint> {
    if !(params.band_frac > 0.0 && params.band_frac <= 1.0) {
        return Err(invalid("crosshair.band_frac", "must be in (0, 1]"));
    }
    let (x0, x1) = index_range(within.left, within.right, pixels.width());
    let (y0, y1) = index_range(within.top, within.bottom, pixels.height());
    if x0 >= x1 || y0 >= y1 {
        return Err(ZeroSightError::FrameNotFound {
            reason: "crosshair search box is empty",
        });
    }

    let center = within.center();
    let half_w = 0.5 * params.band_frac * within.width();
    let half_h = 0.5 * params.band_frac * within.height();
    let (bx0, bx1) = index_range(center.x - half_w, center.x + half_w, pixels.width());
    let (by0, by1) = index_range(center.y - half_h, center.y + half_h, pixels.height());

    let mut col_dark = vec![0.0f64; bx1.saturating_sub(bx0)];
    let mut row_dark = vec![0.0f64; by1.saturating_sub(by0)];
    for y in y0..y1 {
        let Some(row) = pixels.row(y) else { continue };
        let in_row_band = y >= by0 && y < by1;
        let mut row_sum = 0.0;
        for x in x0..x1 {
            let darkness = f64::from(255 - row[x]);
            if x >= bx0 && x < bx1 {
                col_dark[x - bx0] += darkness;
            }
            row_sum += darkness;
        }
        if in_row_band {
            row_dark[y - by0] = row_sum;
        }
    }
    let rows_scanned = (y1 - y0) as f64;
    let cols_scanned = (x1 - x0) as f64;
    col_dark.iter_mut().for_each(|v| *v /= rows_scanned);
    row_dark.iter_mut().for_each(|v| *v /= cols_scanned);

    let not_found = ZeroSightError::FrameNotFound {
        reason: "crosshair not found",
    };
    let (cx, col_peak) = peak_center(&col_dark, bx0).ok_or(not_found.clone())?;
    let (cy, row_peak) = peak_center(&row_dark, by0).ok_or(not_found.clone())?;
    if col_peak < params.min_darkness || row_peak < params.min_darkness {
        return Err(not_found);
    }
    Ok(PixelPoint::new(cx, cy))
}
