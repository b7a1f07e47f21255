//! # qraft
//!
//! A Rust library for styled QR code rendering. `qraft` consumes the module
//! matrix produced by a standard symbol encoder and focuses entirely on
//! presentation: module and finder-corner shapes, two-stop gradients,
//! decorative frames with captions, a circular logo overlay, and pixel-exact
//! raster plus flat vector export.
//!
//! ## Features
//!
//! - **Styled rendering**: six module patterns, five finder ring shapes and
//!   five center-dot shapes, solid or two-stop gradient fills on modules and
//!   background
//! - **Frames**: eight decorative border/banner/badge kinds with a caption
//!   band and proportional caption text
//! - **Logo overlay**: circular logo composited over the symbol center with a
//!   separation disc and accent ring
//! - **Export**: PNG byte stream, the encoder's own flat SVG serialization,
//!   and best-effort clipboard image copy
//! - **Coalesced re-rendering**: style edits debounce into a single render
//!   pass; stale asynchronous logo decodes are discarded by generation token
//! - **Saved gallery**: snapshot configurations into a pluggable key-value
//!   store and restore them by value
//!
//! ## Quick Start
//!
//! ```rust
//! use qraft::{MatrixProvider, StyleConfig, render_image};
//!
//! let config = StyleConfig::default()
//!     .with_text("https://example.com/court/4")
//!     .with_size(280);
//!
//! let mut provider = MatrixProvider::new();
//! let matrix = provider.encode(&config.text, config.ec_level);
//! let img = render_image(matrix, &config);
//! assert_eq!(img.width(), 344); // 280 + 32px quiet padding per side
//! ```
//!
//! ## Styling
//!
//! ```rust
//! use qraft::{
//!     Color, DotShape, Fill, FrameKind, Gradient, GradientDirection, MatrixProvider,
//!     ModulePattern, RingShape, StyleConfig, render_image,
//! };
//!
//! let config = StyleConfig::default()
//!     .with_text("https://example.com/court/4")
//!     .with_pattern(ModulePattern::Dot)
//!     .with_module_fill(Fill::Gradient(Gradient {
//!         start: Color::rgb(20, 40, 160),
//!         end: Color::rgb(160, 20, 90),
//!         direction: GradientDirection::Diagonal,
//!     }))
//!     .with_ring(RingShape::Rounded, Color::rgb(20, 40, 160))
//!     .with_dot(DotShape::Circle, Color::rgb(160, 20, 90))
//!     .with_frame(FrameKind::Simple, Color::rgb(20, 40, 160))
//!     .with_caption("SCAN TO BOOK", Color::WHITE);
//!
//! let mut provider = MatrixProvider::new();
//! let img = render_image(provider.encode(&config.text, config.ec_level), &config);
//! assert_eq!(img.height(), 344 + 70); // frames add a caption band below
//! ```
//!
//! ## Driving re-renders
//!
//! The [`Pipeline`] coalesces bursts of edits (debounce, not a queue) and
//! guards asynchronous logo decodes with a generation token, so a late decode
//! never paints over a newer pass:
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use qraft::{Pipeline, StyleConfig, decode_logo};
//!
//! let mut pipeline = Pipeline::new(StyleConfig::default().with_text("hello"));
//! pipeline.render_now();
//!
//! let now = Instant::now();
//! pipeline.edit(pipeline.config().clone().with_size(400), now);
//! pipeline.tick(now + Duration::from_millis(150)); // quiet period elapsed
//!
//! if let Some(job) = pipeline.take_logo_job() {
//!     let decoded = decode_logo(job.data()).unwrap();
//!     pipeline.complete_logo(&job, decoded); // no-op if a newer pass started
//! }
//! ```

pub(crate) mod common;
pub mod export;
pub mod gallery;
pub mod matrix;
pub mod pipeline;
pub mod render;
pub mod style;

pub use common::error::{QraftError, QraftResult};
pub use common::geometry::{RectF, Shape};
pub use matrix::{Matrix, MatrixProvider, FINDER_SPAN};
pub use pipeline::{Generation, LogoJob, Pipeline, RenderScheduler, DEBOUNCE_WINDOW};
pub use render::{
    composite_logo, decode_logo, render, render_image, Layout, CAPTION_BAND, FRAME_EXTRA,
    FRAME_PAD, MAX_LOGO_BYTES, QUIET_PAD,
};
pub use style::{
    Background, Color, DotShape, EcLevel, Fill, FrameKind, Gradient, GradientDirection, LogoData,
    ModulePattern, RingShape, StyleConfig, FALLBACK_TEXT, MAX_RENDER_SIZE, MIN_RENDER_SIZE,
};
