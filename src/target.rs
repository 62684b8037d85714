//! Physical target dimensions.

use crate::geom::InchPoint;
use crate::util::error::invalid;
use crate::util::math::positive_finite;
use crate::util::{ZeroSightError, ZeroSightResult};
use std::str::FromStr;

/// Physical paper size in inches; both sides are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSize {
    width_in: f64,
    height_in: f64,
}

impl TargetSize {
    /// Letter paper, 8.5 x 11 in.
    pub const LETTER: TargetSize = TargetSize {
        width_in: 8.5,
        height_in: 11.0,
    };

    /// Creates a target size, rejecting non-positive or non-finite sides.
    pub fn new(width_in: f64, height_in: f64) -> ZeroSightResult<Self> {
        let width_in =
            positive_finite(width_in).ok_or(invalid("target_width", "must be finite and > 0"))?;
        let height_in =
            positive_finite(height_in).ok_or(invalid("target_height", "must be finite and > 0"))?;
        Ok(Self {
            width_in,
            height_in,
        })
    }

    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn long_side(&self) -> f64 {
        self.width_in.max(self.height_in)
    }

    pub fn short_side(&self) -> f64 {
        self.width_in.min(self.height_in)
    }

    /// Width / height.
    pub fn aspect(&self) -> f64 {
        self.width_in / self.height_in
    }

    pub fn is_landscape(&self) -> bool {
        self.width_in > self.height_in
    }

    /// Returns the same paper rotated so its orientation matches `landscape`.
    pub fn oriented(&self, landscape: bool) -> TargetSize {
        if landscape == self.is_landscape() || self.width_in == self.height_in {
            *self
        } else {
            TargetSize {
                width_in: self.height_in,
                height_in: self.width_in,
            }
        }
    }

    /// Default bull position: the middle of the target.
    ///
    /// The center is the same under either axis convention.
    pub fn center(&self) -> InchPoint {
        InchPoint::new(self.width_in / 2.0, self.height_in / 2.0)
    }
}

impl FromStr for TargetSize {
    type Err = ZeroSightError;

    /// Parses `"8.5x11"`, `"8.5 X 11"`, `"23x23"` or a named preset
    /// (`letter`, `legal`, `tabloid`, `a4`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        match text.as_str() {
            "letter" => return Ok(TargetSize::LETTER),
            "legal" => return TargetSize::new(8.5, 14.0),
            "tabloid" => return TargetSize::new(11.0, 17.0),
            "a4" => return TargetSize::new(8.27, 11.69),
            _ => {}
        }
        let (w, h) = text
            .split_once(['x', '*'])
            .ok_or(invalid("target_size", "expected WIDTHxHEIGHT in inches"))?;
        let parse = |part: &str| {
            part.trim()
                .trim_end_matches("in")
                .trim_end_matches('"')
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid("target_size", "dimensions must be numbers"))
        };
        TargetSize::new(parse(w)?, parse(h)?)
    }
}

#[cfg(test)]
mod tests {
    use super::TargetSize;

    #[test]
    fn parses_common_forms() {
        let t: TargetSize = "8.5x11".parse().unwrap();
        assert_eq!((t.width_in(), t.height_in()), (8.5, 11.0));
        let t: TargetSize = " 23 X 23 ".parse().unwrap();
        assert_eq!((t.width_in(), t.height_in()), (23.0, 23.0));
        let t: TargetSize = "12in x 18in".parse().unwrap();
        assert_eq!((t.width_in(), t.height_in()), (12.0, 18.0));
        assert_eq!("Letter".parse::<TargetSize>().unwrap(), TargetSize::LETTER);
    }

    #[test]
    fn rejects_garbage_and_non_positive() {
        assert!("8.5".parse::<TargetSize>().is_err());
        assert!("axb".parse::<TargetSize>().is_err());
        assert!("0x11".parse::<TargetSize>().is_err());
        assert!("-8.5x11".parse::<TargetSize>().is_err());
    }

    #[test]
    fn orientation_swaps_sides() {
        let t = TargetSize::LETTER;
        assert_eq!(t.long_side(), 11.0);
        assert_eq!(t.short_side(), 8.5);
        let l = t.oriented(true);
        assert_eq!((l.width_in(), l.height_in()), (11.0, 8.5));
        assert_eq!(t.oriented(false), t);
        let c = t.center();
        assert_eq!((c.x, c.y), (4.25, 5.5));
    }
}
