//! Core primitives for star-target detection.
//!
//! This crate is intentionally small: grayscale image buffers, the
//! incremental union-find used for connected-component labeling, and a
//! minimal logger. It does *not* depend on any concrete image codec.

mod image;
mod labeling;
mod logger;
mod union_find;

pub use image::{GrayImage, GrayImageView};
pub use labeling::{label_regions, Labeling};
pub use union_find::UnionFind;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
