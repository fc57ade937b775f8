//! Extract a dominant-color palette from an image.
//!
//! The pipeline resamples the input to a bounded working size, clusters its
//! pixels in CIELAB space with a damped k-means variant, and assembles the
//! resulting centroids into a swatch strip:
//!
//! 1. Resample so the longest side equals [`Options::max_dimension`]
//!    (nearest-neighbor).
//! 2. Seed `cluster_count` centroids from random pixels of the working
//!    image, then iterate assign/commit passes until no pixel changes its
//!    nearest centroid (or the iteration ceiling is hit).
//! 3. Order the clusters and render a swatch whose column widths are
//!    proportional to each cluster's share of observations.
//!
//! Runs are fully deterministic for a fixed input, cluster count, and seed.

pub mod cluster;
pub mod color;
pub mod error;
pub mod random;
pub mod resize;
pub mod swatch;

pub use cluster::{Cluster, ClusterGroup, Outcome};
pub use color::Lab;
pub use error::PalettizeError;
pub use swatch::{Palette, PaletteEntry, SortOrder, SWATCH_HEIGHT, SWATCH_WIDTH};

use image::RgbaImage;
use log::debug;

/// Supported cluster-count range; requests outside it are clamped.
pub const MIN_CLUSTERS: u32 = 1;
pub const MAX_CLUSTERS: u32 = 64;

/// Tuning knobs for a palette extraction run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Number of clusters, clamped to `[MIN_CLUSTERS, MAX_CLUSTERS]`.
    pub cluster_count: u32,
    /// Seed for the deterministic random source.
    pub seed: u32,
    /// Palette ordering criterion.
    pub sort_order: SortOrder,
    /// Iteration ceiling for the clustering loop.
    pub max_iterations: u32,
    /// Longest side of the working image, in pixels.
    pub max_dimension: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cluster_count: 5,
            seed: 2019,
            sort_order: SortOrder::Weight,
            max_iterations: 300,
            max_dimension: 100,
        }
    }
}

/// Run the full pipeline on a decoded image.
///
/// Returns the assembled palette and the engine's terminal state. Both
/// [`Outcome`] variants are normal completion; errors only arise from
/// images the resampler cannot map onto a valid working size.
pub fn extract_palette(
    image: &RgbaImage,
    options: &Options,
) -> Result<(Palette, Outcome), PalettizeError> {
    let cluster_count = options.cluster_count.clamp(MIN_CLUSTERS, MAX_CLUSTERS);
    let working = resize::fit_to_max_side(image, options.max_dimension)?;
    debug!(
        "clustering {}x{} working image into {} clusters (seed {})",
        working.width(),
        working.height(),
        cluster_count,
        options.seed
    );

    let mut group = ClusterGroup::new(&working, options.seed, cluster_count as usize);
    let outcome = group.run(&working, options.max_iterations.max(1));
    let palette = Palette::assemble(&group, options.sort_order);

    Ok((palette, outcome))
}
