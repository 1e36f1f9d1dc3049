use std::collections::BinaryHeap;

/// Balanced kd-tree over fixed-width points, built once by recursive median
/// splits and queried read-only afterwards.
///
/// Distances are Euclidean, except that any coordinate pair involving a
/// missing value (`NaN`) contributes nothing to the sum. Queries break
/// distance ties by insertion order, so results are deterministic for any
/// input.
pub struct KdTree {
    points: Vec<Vec<f64>>,
    nodes: Vec<KdNode>,
    root: Option<usize>,
}

struct KdNode {
    point: usize,
    split_dim: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Heap entry ordered by squared distance, then insertion index.
#[derive(Clone, Copy)]
struct Candidate {
    distance_sq: f64,
    point: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance_sq
            .total_cmp(&other.distance_sq)
            .then(self.point.cmp(&other.point))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl KdTree {
    /// Builds the tree. All points must share one width; an empty point set
    /// yields an empty tree.
    pub fn build(points: Vec<Vec<f64>>) -> KdTree {
        let dims = points.first().map_or(0, Vec::len);
        let mut indexes: Vec<usize> = (0..points.len()).collect();
        let mut tree = KdTree {
            points,
            nodes: Vec::new(),
            root: None,
        };
        if dims > 0 {
            tree.root = tree.build_node(&mut indexes, 0, dims);
        }
        tree
    }

    fn build_node(&mut self, indexes: &mut [usize], depth: usize, dims: usize) -> Option<usize> {
        if indexes.is_empty() {
            return None;
        }
        let split_dim = depth % dims;
        let middle = indexes.len() / 2;
        indexes.select_nth_unstable_by(middle, |&a, &b| {
            self.points[a][split_dim].total_cmp(&self.points[b][split_dim])
        });

        let (left_part, rest) = indexes.split_at_mut(middle);
        let (middle_part, right_part) = rest.split_at_mut(1);
        let point = middle_part[0];
        let left = self.build_node(left_part, depth + 1, dims);
        let right = self.build_node(right_part, depth + 1, dims);

        let node_index = self.nodes.len();
        self.nodes.push(KdNode {
            point,
            split_dim,
            left,
            right,
        });
        Some(node_index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Up to `k` nearest points to `query`, ascending by distance with ties
    /// broken by insertion order. Distances are Euclidean.
    pub fn nearest(&self, query: &[f64], k: usize) -> Vec<(usize, f64)> {
        if k == 0 || self.points.is_empty() {
            return Vec::new();
        }
        if self.root.is_none() {
            // zero-width points: every distance is zero
            return (0..self.points.len().min(k)).map(|i| (i, 0.0)).collect();
        }

        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
        self.search(self.root, query, k, &mut heap);
        heap.into_sorted_vec()
            .into_iter()
            .map(|candidate| (candidate.point, candidate.distance_sq.sqrt()))
            .collect()
    }

    fn search(
        &self,
        node: Option<usize>,
        query: &[f64],
        k: usize,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        let Some(index) = node else {
            return;
        };
        let node = &self.nodes[index];
        let point = &self.points[node.point];

        let candidate = Candidate {
            distance_sq: squared_distance(query, point),
            point: node.point,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(worst) = heap.peek() {
            if candidate < *worst {
                heap.pop();
                heap.push(candidate);
            }
        }

        let diff = query.get(node.split_dim).copied().unwrap_or(f64::NAN) - point[node.split_dim];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.search(near, query, k, heap);

        // a missing coordinate gives no lower bound, so the far side stays in
        let plane_sq = if diff.is_nan() { 0.0 } else { diff * diff };
        let must_widen = heap.len() < k
            || heap
                .peek()
                .is_some_and(|worst| plane_sq <= worst.distance_sq);
        if must_widen {
            self.search(far, query, k, heap);
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        let diff = x - y;
        if diff.is_nan() {
            continue;
        }
        sum += diff * diff;
    }
    sum
}
