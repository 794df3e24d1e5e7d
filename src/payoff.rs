use crate::constants::{NORMALIZED_PAYOFF_MAX, NORMALIZED_PAYOFF_MIN};
use ndarray::prelude::*;
use rand::Rng;
use tracing::warn;

/// One player's payoff for every joint outcome
///
/// Entry `k` belongs to the joint outcome at position `k` of the strategy space
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffTable {
    values: Array1<f64>,
}

impl PayoffTable {
    /// zero payoff for every one of `size` joint outcomes
    pub fn zeros(size: usize) -> Self {
        PayoffTable {
            values: Array1::zeros(size),
        }
    }
    pub fn from_values(values: Vec<f64>) -> Self {
        PayoffTable {
            values: Array1::from(values),
        }
    }
    /// Draws an independent integer payoff from `[low, high)` for every joint outcome
    ///
    /// # Arguments
    ///
    /// * `size` - number of joint outcomes
    /// * `low` - inclusive lower bound
    /// * `high` - exclusive upper bound, must be greater than `low`
    /// * `rng` - random source
    pub fn random<R: Rng + ?Sized>(size: usize, low: i64, high: i64, rng: &mut R) -> Self {
        assert!(low < high);
        let values: Vec<f64> = (0..size)
            .map(|_| {
                let value: i64 = rng.gen_range(low, high);
                value as f64
            })
            .collect();
        PayoffTable::from_values(values)
    }
    /// sets the payoff of the joint outcome at `index`
    pub fn assign(&mut self, index: usize, value: f64) {
        assert!(index < self.values.len());
        self.values[index] = value;
    }
    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn min(&self) -> f64 {
        self.values.fold(f64::INFINITY, |acc, &x| acc.min(x))
    }
    pub fn max(&self) -> f64 {
        self.values.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x))
    }
    /// Rescales the payoffs affinely onto [-1000, 1000]
    ///
    /// Equilibria are invariant under a positive affine transform of a single player's payoffs,
    /// so this only keeps a fixed learning rate meaningful across payoff magnitudes.
    /// A constant table becomes 1000 everywhere.
    pub fn normalize(&mut self) {
        let max = self.max();
        let min = self.min();
        let interval = max - min;
        if interval > 0.0 {
            let a = (NORMALIZED_PAYOFF_MAX - NORMALIZED_PAYOFF_MIN) / interval;
            let b = NORMALIZED_PAYOFF_MAX - a * max;
            self.values.mapv_inplace(|x| a * x + b);
        } else {
            warn!("constant payoff table, every entry set to {}", NORMALIZED_PAYOFF_MAX);
            self.values.fill(NORMALIZED_PAYOFF_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_assign() {
        let mut table = PayoffTable::zeros(4);
        table.assign(2, -3.5);
        assert_eq!(table.values().to_vec(), vec![0.0, 0.0, -3.5, 0.0]);
        assert_eq!(table.get(2), -3.5);
    }

    #[test]
    fn test_random_bounds() {
        let mut rng = SmallRng::seed_from_u64(11);
        let table = PayoffTable::random(500, -1000, 1000, &mut rng);
        assert_eq!(table.len(), 500);
        for &x in table.values() {
            assert!(x >= -1000.0 && x < 1000.0);
            assert_eq!(x, x.trunc());
        }
    }

    #[test]
    fn test_normalize() {
        let mut table = PayoffTable::from_values(vec![0.0, 1.0, 0.5, -1.0]);
        table.normalize();
        assert_eq!(table.values().to_vec(), vec![0.0, 1000.0, 500.0, -1000.0]);
        assert_eq!(table.max(), 1000.0);
        assert_eq!(table.min(), -1000.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut table = PayoffTable::from_values(vec![-231.0, -505.0, 525.0, 831.0, -928.0]);
        table.normalize();
        let once = table.clone();
        table.normalize();
        for (a, b) in once.values().iter().zip(table.values()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_normalize_degenerate() {
        let mut table = PayoffTable::from_values(vec![3.0, 3.0, 3.0]);
        table.normalize();
        assert_eq!(table.values().to_vec(), vec![1000.0; 3]);
    }
}
