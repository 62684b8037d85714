//! Individual pipeline stages for custom detection flows.
//!
//! Most users should call [`Corrector`](crate::Corrector); these re-exports let
//! callers run, inspect or replace single stages.

pub use crate::blob::classify::{
    classify_blobs, reject_reason, Classification, ClassifyParams, ExclusionZone, RejectReason,
};
pub use crate::blob::{find_blobs, Blob, BoundingBox, Connectivity, FindParams};
pub use crate::cluster::{select_cluster, ClusterParams};
pub use crate::convention::correction;
pub use crate::correction::{apply_deadband, poib_of, solve, to_clicks, Solution};
pub use crate::frame::{locate_border, locate_corners, locate_crosshair, locate_frame};
pub use crate::mask::{build_mask, BinaryMask, MaskBuild};
