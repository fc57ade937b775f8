//! The clustering engine: a fixed set of centroids in CIELAB space refined
//! over full raster scans until per-pixel assignments stabilize.
//!
//! The centroid update is deliberately *not* a plain k-means mean: the new
//! centroid is `(old + sum) / (count + 1)`, so the previous centroid counts
//! as one pseudo-observation and the update is damped. Clusters that receive
//! no observations in a pass are reseeded from a random pixel of the working
//! image rather than left dead.

use image::RgbaImage;
use log::debug;

use crate::color::Lab;
use crate::random::XorShift32;

/// One centroid plus its per-iteration and whole-run statistics.
#[derive(Debug, Clone)]
pub struct Cluster {
    centroid: Lab,
    running_sum: Lab,
    running_count: u32,
    total_count: u64,
}

impl Cluster {
    fn seeded_at(centroid: Lab) -> Self {
        Self {
            centroid,
            running_sum: Lab::ZERO,
            running_count: 0,
            total_count: 0,
        }
    }

    pub fn centroid(&self) -> Lab {
        self.centroid
    }

    /// Observations received in the current (uncommitted) pass.
    pub fn running_count(&self) -> u32 {
        self.running_count
    }

    /// Observations received across the whole run; never reset, even when
    /// the cluster is reseeded.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }
}

/// Terminal state of a clustering run. Both variants are normal completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No pixel changed its nearest cluster between the last two passes.
    Converged { iterations: u32 },
    /// The iteration ceiling was reached before assignments stabilized.
    Exhausted { iterations: u32 },
}

/// The fixed-cardinality cluster set together with its entropy source and
/// the running total of all observations.
#[derive(Debug)]
pub struct ClusterGroup {
    clusters: Vec<Cluster>,
    entropy: XorShift32,
    total_observations: u64,
}

impl ClusterGroup {
    /// Create `cluster_count` clusters, each seeded from an independently
    /// drawn random pixel of `image`. Both image dimensions must be ≥ 2
    /// (guaranteed by [`crate::resize::fit_to_max_side`]).
    pub fn new(image: &RgbaImage, seed: u32, cluster_count: usize) -> Self {
        let mut entropy = XorShift32::new(seed);
        let clusters = (0..cluster_count)
            .map(|_| Cluster::seeded_at(random_pixel_lab(&mut entropy, image)))
            .collect();
        Self {
            clusters,
            entropy,
            total_observations: 0,
        }
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn total_observations(&self) -> u64 {
        self.total_observations
    }

    /// One full raster scan: assign every pixel to its nearest centroid and
    /// accumulate per-cluster statistics. Returns whether any pixel's
    /// winning index differs from its slot in `assignments` (callers ignore
    /// the result when `first` is set, since the map holds no prior pass).
    pub fn assign_pass(&mut self, image: &RgbaImage, assignments: &mut [u32], first: bool) -> bool {
        debug_assert_eq!(
            assignments.len(),
            image.width() as usize * image.height() as usize
        );

        let mut changed = false;
        for (slot, pixel) in assignments.iter_mut().zip(image.pixels()) {
            let observation = Lab::from_rgba8(pixel.0);

            let mut best_index = 0u32;
            let mut best_distance = f32::MAX;
            for (index, cluster) in self.clusters.iter().enumerate() {
                // Strict `<`: on ties the lowest-index cluster keeps the pixel.
                let distance = cluster.centroid.distance_squared(observation);
                if distance < best_distance {
                    best_distance = distance;
                    best_index = index as u32;
                }
            }

            let winner = &mut self.clusters[best_index as usize];
            winner.running_sum = winner.running_sum + observation;
            winner.running_count += 1;
            winner.total_count += 1;
            self.total_observations += 1;

            if !first && *slot != best_index {
                changed = true;
            }
            *slot = best_index;
        }

        changed
    }

    /// Recompute every centroid from the pass's accumulated observations,
    /// then reset the per-pass statistics. Empty clusters are reseeded from
    /// a fresh random pixel so they can compete again next pass.
    pub fn commit(&mut self, image: &RgbaImage) {
        for cluster in &mut self.clusters {
            if cluster.running_count > 0 {
                let damped = cluster.centroid + cluster.running_sum;
                cluster.centroid = damped * (1.0 / (cluster.running_count as f32 + 1.0));
            } else {
                cluster.centroid = random_pixel_lab(&mut self.entropy, image);
            }
            cluster.running_sum = Lab::ZERO;
            cluster.running_count = 0;
        }
    }

    /// Iterate assign/commit passes until assignments stabilize or
    /// `max_iterations` passes have run.
    pub fn run(&mut self, image: &RgbaImage, max_iterations: u32) -> Outcome {
        let mut assignments = vec![0u32; image.width() as usize * image.height() as usize];
        for iteration in 0..max_iterations {
            let changed = self.assign_pass(image, &mut assignments, iteration == 0);
            self.commit(image);
            debug!(
                "iteration {}: {} observations, changed={}",
                iteration + 1,
                self.total_observations,
                changed
            );
            if iteration > 0 && !changed {
                return Outcome::Converged {
                    iterations: iteration + 1,
                };
            }
        }
        Outcome::Exhausted {
            iterations: max_iterations,
        }
    }
}

fn random_pixel_lab(entropy: &mut XorShift32, image: &RgbaImage) -> Lab {
    let x = entropy.between(0, image.width() - 1);
    let y = entropy.between(0, image.height() - 1);
    Lab::from_rgba8(image.get_pixel(x, y).0)
}
