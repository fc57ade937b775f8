//! Palette assembly: order the final clusters and render them as a swatch
//! strip whose column widths are proportional to each cluster's share of
//! observations.

use image::{Rgba, RgbaImage};

use crate::cluster::{Cluster, ClusterGroup};
use crate::color::Lab;

/// Default swatch dimensions.
pub const SWATCH_WIDTH: u32 = 512;
pub const SWATCH_HEIGHT: u32 = 64;

// CIELAB coordinates of the pure sRGB primaries, used as sort anchors.
#[allow(clippy::excessive_precision)]
const RED_ANCHOR: Lab = Lab::new(53.23288178584245, 80.10930952982204, 67.22006831026425);
#[allow(clippy::excessive_precision)]
const GREEN_ANCHOR: Lab = Lab::new(87.73703347354422, -86.18463649762525, 83.18116474777854);
#[allow(clippy::excessive_precision)]
const BLUE_ANCHOR: Lab = Lab::new(32.302586667249486, 79.19666178930935, -107.86368104495168);

/// Criterion for ordering the palette before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Descending by cumulative observation count.
    #[default]
    Weight,
    /// Ascending by squared Lab distance to pure red.
    Red,
    /// Ascending by squared Lab distance to pure green.
    Green,
    /// Ascending by squared Lab distance to pure blue.
    Blue,
}

impl SortOrder {
    fn anchor(self) -> Option<Lab> {
        match self {
            SortOrder::Weight => None,
            SortOrder::Red => Some(RED_ANCHOR),
            SortOrder::Green => Some(GREEN_ANCHOR),
            SortOrder::Blue => Some(BLUE_ANCHOR),
        }
    }
}

/// One final palette entry, in sorted order.
#[derive(Debug, Clone)]
pub struct PaletteEntry {
    /// Centroid in CIELAB space.
    pub lab: Lab,
    /// Centroid packed back to RGBA8 (alpha 255).
    pub rgba: [u8; 4],
    /// Cumulative observations the cluster received over the whole run.
    pub observations: u64,
    /// `observations / total` across all clusters (0 when the total is 0).
    pub weight: f32,
}

/// The assembled palette.
#[derive(Debug, Clone)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Order the clusters of a finished run and pack their centroids.
    pub fn assemble(group: &ClusterGroup, order: SortOrder) -> Self {
        let total = group.total_observations();
        let mut clusters: Vec<Cluster> = group.clusters().to_vec();
        sort_clusters(&mut clusters, order);

        let entries = clusters
            .iter()
            .map(|cluster| {
                let weight = if total == 0 {
                    0.0
                } else {
                    cluster.total_count() as f32 / total as f32
                };
                PaletteEntry {
                    lab: cluster.centroid(),
                    rgba: cluster.centroid().to_rgba8(),
                    observations: cluster.total_count(),
                    weight,
                }
            })
            .collect();

        Self { entries }
    }

    /// Render the swatch strip at the default 512x64 size.
    pub fn render_swatch(&self) -> RgbaImage {
        self.render_swatch_sized(SWATCH_WIDTH, SWATCH_HEIGHT)
    }

    /// Render one scanline of weight-proportional color spans and replicate
    /// it across every row.
    ///
    /// Per-entry spans are `round(weight * width)` and are capped at the
    /// remaining width, so rounded spans can never write past the buffer.
    /// When rounding leaves columns unfilled, they take the last rendered
    /// color; if nothing renders at all (zero total) the swatch stays
    /// opaque black.
    pub fn render_swatch_sized(&self, width: u32, height: u32) -> RgbaImage {
        let width_px = width as usize;
        let mut scanline = vec![[0u8, 0, 0, 255]; width_px];

        let mut cursor = 0usize;
        for entry in &self.entries {
            let span = (entry.weight * width as f32).round() as usize;
            let span = span.min(width_px - cursor);
            scanline[cursor..cursor + span].fill(entry.rgba);
            cursor += span;
            if cursor == width_px {
                break;
            }
        }
        if cursor > 0 && cursor < width_px {
            let last = scanline[cursor - 1];
            scanline[cursor..].fill(last);
        }

        RgbaImage::from_fn(width, height, |x, _| Rgba(scanline[x as usize]))
    }
}

fn sort_clusters(clusters: &mut [Cluster], order: SortOrder) {
    // Stable sorts with a strict comparator leave ties in their original
    // order, matching the reference's adjacent-swap passes.
    match order.anchor() {
        None => clusters.sort_by(|a, b| b.total_count().cmp(&a.total_count())),
        Some(anchor) => clusters.sort_by(|a, b| {
            let da = anchor.distance_squared(a.centroid());
            let db = anchor.distance_squared(b.centroid());
            da.total_cmp(&db)
        }),
    }
}
