//! Feature-gated tracing macros for the detection pipeline.
//!
//! Spans, outermost first: `correct_image` or `correct_holes`, then one per
//! stage (`build_mask`, `locate_frame`, `find_blobs`, `classify_blobs`,
//! `select_cluster`, `compute_clicks`).
//!
//! Events: `mask_built` (threshold and dark pixel count), `frame_located`
//! (pixels per inch and origin), `blobs_found`, `blobs_classified`,
//! `cluster_selected` (k and radius in pixels), `clicks`, and `image_corrected`
//! with the POIB in inches.
//!
//! Without the `tracing` feature the macros compile to nothing.

/// Opens an info span named after the stage.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emits one of the stage events listed above.
///
/// Compiled out, the field expressions are still evaluated so values computed
/// only for reporting do not warn as unused.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in span guard when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
