//! zerosight computes sight corrections from a group of bullet holes.
//!
//! Given a grayscale photograph of a paper target (or explicit hole positions
//! in inches) the crate locates the target frame, detects hole-like blobs,
//! selects the shot group, and converts the offset from the group's point of
//! impact to the bull into signed windage/elevation clicks using the true-MOA
//! model. Optional features add image decoding (`image-io`), batch parallelism
//! (`rayon`) and stage-level tracing (`tracing`).

pub mod blob;
pub mod cluster;
pub mod convention;
pub mod correction;
pub mod frame;
pub mod geom;
pub mod image;
pub mod lowlevel;
pub mod mask;
pub mod pipeline;
pub mod target;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use convention::{AxisConvention, CorrectionVector, Direction};
pub use correction::{inches_per_moa, Ballistics, ClickResult};
pub use frame::{BorderParams, CornerParams, CrosshairParams, Frame, FrameMethod, FrameStrategy};
pub use geom::{InchPoint, PixelBox, PixelPoint};
pub use crate::image::{ImageView, OwnedImage};
pub use mask::ThresholdStrategy;
pub use pipeline::{
    compute_correction, BullSource, ComputeInput, CoordinateInput, CorrectionReport, Corrector,
    CorrectorConfig, Diagnostics, HoleSize, ImageInput, RejectCounts,
};
pub use target::TargetSize;
pub use util::{ErrorKind, ZeroSightError, ZeroSightResult};
