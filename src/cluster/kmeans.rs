//! k-means clustering with k-means++ seeding and multiple restarts.
//!
//! Each run seeds its centroids with k-means++ (the first uniformly at
//! random, every next one with probability proportional to the squared
//! distance to the nearest chosen centroid) and then alternates assignment
//! and mean updates until the labels stop changing, the centroids move by
//! no more than `tolerance` times the mean feature variance, or
//! `max_iter` is reached. The run with the lowest inertia wins.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TemuError};
use crate::ranking::similarity::squared_euclidean;

/// Configuration for k-means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of independently seeded runs.
    pub n_init: usize,

    /// Maximum Lloyd iterations per run.
    pub max_iter: usize,

    /// Relative centroid shift below which a run has converged.
    pub tolerance: f64,

    /// Seed for reproducible runs; random when unset.
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        KMeansConfig {
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-4,
            seed: None,
        }
    }
}

/// Outcome of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster index of every point
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,

    /// Sum of squared distances of points to their centroid
    pub inertia: f64,

    /// Lloyd iterations of the winning run
    pub iterations: usize,
}

/// k-means clusterer.
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        KMeans { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Partition `points` into `k` clusters.
    pub fn fit(&self, points: &[Vec<f64>], k: usize) -> Result<KMeansFit> {
        if k == 0 {
            return Err(TemuError::invalid_cluster_count(
                "number of clusters must be a positive integer",
            ));
        }
        if points.len() < k {
            return Err(TemuError::NotEnoughDocuments {
                documents: points.len(),
                clusters: k,
            });
        }

        let mut master = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));
        let seeds: Vec<u64> = (0..self.config.n_init.max(1))
            .map(|_| master.random())
            .collect();
        let tolerance = self.config.tolerance * mean_variance(points);

        let runs: Vec<KMeansFit> = seeds
            .par_iter()
            .map(|&seed| self.run_once(points, k, tolerance, seed))
            .collect();

        // First run wins ties so a fixed seed gives a fixed result.
        let mut best: Option<KMeansFit> = None;
        for run in runs {
            if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let best = best.ok_or_else(|| TemuError::internal("k-means produced no run"))?;
        debug!(
            "k-means with k={} over {} points: inertia {:.6} after {} iterations",
            k,
            points.len(),
            best.inertia,
            best.iterations
        );
        Ok(best)
    }

    fn run_once(&self, points: &[Vec<f64>], k: usize, tolerance: f64, seed: u64) -> KMeansFit {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut centroids = init_centroids_kmeans_plus_plus(points, k, &mut rng);
        let mut labels = assign_points(points, &centroids);
        let mut iterations = 0;

        for iteration in 0..self.config.max_iter {
            iterations = iteration + 1;

            relocate_empty_clusters(points, &centroids, &mut labels, k);
            let new_centroids = compute_means(points, &labels, k);
            let shift: f64 = centroids
                .iter()
                .zip(&new_centroids)
                .map(|(old, new)| squared_euclidean(old, new))
                .sum();
            centroids = new_centroids;

            let new_labels = assign_points(points, &centroids);
            let stable = new_labels == labels;
            labels = new_labels;

            trace!("k-means iteration {iterations}: shift {shift:.3e}, stable {stable}");
            if stable || shift <= tolerance {
                break;
            }
        }

        let inertia = inertia(points, &centroids, &labels);
        KMeansFit {
            labels,
            centroids,
            inertia,
            iterations,
        }
    }
}

/// Mean over features of the per-feature population variance.
fn mean_variance(points: &[Vec<f64>]) -> f64 {
    let Some(dimension) = points.first().map(Vec::len) else {
        return 0.0;
    };
    if dimension == 0 {
        return 0.0;
    }

    let n = points.len() as f64;
    let total: f64 = (0..dimension)
        .map(|j| {
            let mean = points.iter().map(|p| p[j]).sum::<f64>() / n;
            points.iter().map(|p| (p[j] - mean).powi(2)).sum::<f64>() / n
        })
        .sum();

    total / dimension as f64
}

/// Pick `k` initial centroids with k-means++.
fn init_centroids_kmeans_plus_plus(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);

    // Choose first centroid randomly
    centroids.push(points[rng.random_range(0..points.len())].clone());

    // Choose remaining centroids with probability proportional to squared distance
    for _ in 1..k {
        let weights: Vec<f64> = points
            .iter()
            .map(|point| nearest(point, &centroids).1)
            .collect();
        let total_weight: f64 = weights.iter().sum();

        let idx = if total_weight > 0.0 {
            sample_weighted(&weights, rng.random::<f64>() * total_weight)
        } else {
            // Fallback to random selection
            rng.random_range(0..points.len())
        };
        centroids.push(points[idx].clone());
    }

    centroids
}

/// Index whose cumulative weight first reaches `target`.
fn sample_weighted(weights: &[f64], target: f64) -> usize {
    let mut cumsum = 0.0;
    let mut last_positive = 0;

    for (i, &weight) in weights.iter().enumerate() {
        if weight > 0.0 {
            last_positive = i;
            cumsum += weight;
            if cumsum >= target {
                return i;
            }
        }
    }

    last_positive
}

/// Index of and squared distance to the nearest centroid; ties go to the
/// lower index.
fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best_cluster = 0;
    let mut best_distance = f64::INFINITY;

    for (i, centroid) in centroids.iter().enumerate() {
        let distance = squared_euclidean(point, centroid);
        if distance < best_distance {
            best_distance = distance;
            best_cluster = i;
        }
    }

    (best_cluster, best_distance)
}

fn assign_points(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.iter().map(|p| nearest(p, centroids).0).collect()
}

/// Give every empty cluster the point farthest from its current centroid,
/// taken from a cluster that keeps at least one member.
fn relocate_empty_clusters(
    points: &[Vec<f64>],
    centroids: &[Vec<f64>],
    labels: &mut [usize],
    k: usize,
) {
    let mut counts = vec![0usize; k];
    for &label in labels.iter() {
        counts[label] += 1;
    }

    for cluster in 0..k {
        if counts[cluster] > 0 {
            continue;
        }

        let farthest = (0..points.len())
            .filter(|&i| counts[labels[i]] > 1)
            .map(|i| (i, squared_euclidean(&points[i], &centroids[labels[i]])))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((i, _)) = farthest {
            trace!("relocating empty cluster {cluster} to point {i}");
            counts[labels[i]] -= 1;
            labels[i] = cluster;
            counts[cluster] = 1;
        }
    }
}

fn compute_means(points: &[Vec<f64>], labels: &[usize], k: usize) -> Vec<Vec<f64>> {
    let dimension = points.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dimension]; k];
    let mut counts = vec![0usize; k];

    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for (sum, &value) in sums[label].iter_mut().zip(point) {
            *sum += value;
        }
    }

    for (sum, &count) in sums.iter_mut().zip(&counts) {
        if count > 0 {
            for value in sum.iter_mut() {
                *value /= count as f64;
            }
        }
    }

    sums
}

fn inertia(points: &[Vec<f64>], centroids: &[Vec<f64>], labels: &[usize]) -> f64 {
    points
        .iter()
        .zip(labels)
        .map(|(point, &label)| squared_euclidean(point, &centroids[label]))
        .sum()
}
