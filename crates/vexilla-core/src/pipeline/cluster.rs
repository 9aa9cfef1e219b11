//! K-means clustering of average colors in RGB space.
//!
//! Initial centroids are distinct records picked with a seeded RNG, so the
//! same records and seed always produce the same clusters.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ClusterConfig;

/// A point in normalized RGB space.
pub type Color = [f64; 3];

/// Outcome of one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Final centroid of each cluster
    pub centroids: Vec<Color>,

    /// Cluster index of each input point, in input order
    pub assignments: Vec<usize>,

    /// Assign/update rounds performed
    pub iterations: usize,
}

impl Clustering {
    /// Indices of the points assigned to `cluster`, in input order.
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter(move |(_, a)| **a == cluster)
            .map(|(i, _)| i)
    }
}

/// Lloyd's k-means with seeded random initialization.
#[derive(Debug, Clone)]
pub struct ColorClusterer {
    k: usize,
    max_iterations: usize,
    seed: u64,
}

impl ColorClusterer {
    /// Create a clusterer from the `[clusters]` config section.
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            k: config.k,
            max_iterations: config.max_iterations,
            seed: config.seed,
        }
    }

    /// Number of clusters actually produced for `points` points.
    ///
    /// Never more than the number of points.
    pub fn effective_k(&self, points: usize) -> usize {
        self.k.min(points)
    }

    /// Cluster `points`, starting from distinct points chosen by the seed.
    pub fn cluster(&self, points: &[Color]) -> Clustering {
        let k = self.effective_k(points.len());
        if k < self.k {
            tracing::warn!(
                "Only {} colors to cluster, reducing k from {} to {}",
                points.len(),
                self.k,
                k
            );
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let initial = rand::seq::index::sample(&mut rng, points.len(), k)
            .into_iter()
            .map(|i| points[i])
            .collect();
        self.cluster_from(points, initial)
    }

    /// Cluster `points` starting from explicit centroids.
    ///
    /// Each round assigns every point to its nearest centroid (ties go to the
    /// lower index), then moves each centroid to the mean of its members. A
    /// centroid with no members stays where it is. Stops once a round changes
    /// no assignment, or after `max_iterations` rounds.
    pub fn cluster_from(&self, points: &[Color], mut centroids: Vec<Color>) -> Clustering {
        let mut assignments = vec![usize::MAX; points.len()];
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;

            let mut changed = false;
            for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
                let best = nearest(point, &centroids);
                if *assignment != best {
                    *assignment = best;
                    changed = true;
                }
            }

            let mut sums = vec![([0.0; 3], 0usize); centroids.len()];
            for (point, &a) in points.iter().zip(&assignments) {
                let (sum, count) = &mut sums[a];
                for c in 0..3 {
                    sum[c] += point[c];
                }
                *count += 1;
            }
            for (centroid, (sum, count)) in centroids.iter_mut().zip(sums) {
                if count > 0 {
                    *centroid = sum.map(|s| s / count as f64);
                }
            }

            if !changed {
                break;
            }
        }

        tracing::debug!(
            "K-means settled after {} iterations ({} clusters, {} points)",
            iterations,
            centroids.len(),
            points.len()
        );
        Clustering {
            centroids,
            assignments,
            iterations,
        }
    }
}

/// Index of the centroid closest to `point` (squared Euclidean distance).
fn nearest(point: &Color, centroids: &[Color]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (j, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best_distance {
            best_distance = distance;
            best = j;
        }
    }
    best
}

fn squared_distance(a: &Color, b: &Color) -> f64 {
    (0..3).map(|c| (a[c] - b[c]).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusterer(k: usize, seed: u64) -> ColorClusterer {
        ColorClusterer::new(&ClusterConfig {
            k,
            seed,
            ..ClusterConfig::default()
        })
    }

    /// Two tight groups: near-blacks and near-whites.
    fn two_groups() -> Vec<Color> {
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0],
            [0.1, 0.0, 0.0],
            [0.9, 1.0, 1.0],
        ]
    }

    #[test]
    fn test_separates_two_groups_for_any_seed() {
        for seed in 0..20 {
            let result = clusterer(2, seed).cluster(&two_groups());
            let a = result.assignments[0];
            let b = result.assignments[1];
            assert_ne!(a, b, "seed {seed}");
            assert_eq!(result.assignments, vec![a, b, a, b], "seed {seed}");

            let dark = result.centroids[a];
            assert!((dark[0] - 0.05).abs() < 1e-12);
            let light = result.centroids[b];
            assert!((light[0] - 0.95).abs() < 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let points: Vec<Color> = (0..30)
            .map(|i| {
                let t = i as f64 / 30.0;
                [t, (t * 7.0) % 1.0, (t * 13.0) % 1.0]
            })
            .collect();

        let first = clusterer(4, 7).cluster(&points);
        let second = clusterer(4, 7).cluster(&points);
        assert_eq!(first, second);
        assert_eq!(first.centroids.len(), 4);
        assert!(first.iterations >= 1);
        assert!(first.assignments.iter().all(|&a| a < 4));
    }

    #[test]
    fn test_k_is_capped_by_point_count() {
        let points = vec![[0.0, 0.0, 0.0], [0.5, 0.5, 0.5], [1.0, 1.0, 1.0]];
        let result = clusterer(4, 1).cluster(&points);

        assert_eq!(result.centroids.len(), 3);
        let mut centroids = result.centroids.clone();
        centroids.sort_by(|a, b| a[0].total_cmp(&b[0]));
        assert_eq!(centroids, points);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let points = vec![[0.0, 0.0, 0.0], [0.2, 0.0, 0.0]];
        let far = [5.0, 5.0, 5.0];
        let result = clusterer(2, 0).cluster_from(&points, vec![[0.0, 0.0, 0.0], far]);

        assert_eq!(result.assignments, vec![0, 0]);
        assert_eq!(result.centroids[0], [0.1, 0.0, 0.0]);
        assert_eq!(result.centroids[1], far);
        assert_eq!(result.members(1).count(), 0);
    }

    #[test]
    fn test_iterations_are_bounded() {
        let clusterer = ColorClusterer::new(&ClusterConfig {
            k: 2,
            max_iterations: 1,
            ..ClusterConfig::default()
        });
        let result = clusterer.cluster_from(&two_groups(), vec![[0.0; 3], [0.1, 0.0, 0.0]]);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_ties_go_to_lower_index() {
        let centroids = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        assert_eq!(nearest(&[0.5, 0.0, 0.0], &centroids), 0);
        assert_eq!(nearest(&[0.6, 0.0, 0.0], &centroids), 1);
    }

    #[test]
    fn test_members_in_input_order() {
        let result = clusterer(2, 3).cluster_from(
            &two_groups(),
            vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
        );
        assert_eq!(result.members(0).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(result.members(1).collect::<Vec<_>>(), vec![1, 3]);
    }
}
