//! Cartesian product over per-position candidate lists
//!
//! Odometer iteration: the rightmost position advances fastest, and every
//! combination is produced exactly once. Any empty position yields no
//! combinations; zero positions yield a single empty combination.

/// Lazy iterator over all combinations of `sets`
pub struct CartesianProduct<'a, T> {
    sets: &'a [Vec<T>],
    indices: Vec<usize>,
    done: bool,
}

pub fn cartesian_product<T: Clone>(sets: &[Vec<T>]) -> CartesianProduct<'_, T> {
    CartesianProduct {
        sets,
        indices: vec![0; sets.len()],
        done: sets.iter().any(Vec::is_empty),
    }
}

/// Number of combinations, saturating on overflow
pub fn product_len<T>(sets: &[Vec<T>]) -> usize {
    sets.iter()
        .map(Vec::len)
        .fold(1usize, |acc, n| acc.saturating_mul(n))
}

impl<T: Clone> Iterator for CartesianProduct<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let combination = self
            .indices
            .iter()
            .zip(self.sets)
            .map(|(&i, set)| set[i].clone())
            .collect();

        // Advance the odometer from the right
        self.done = true;
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.sets[pos].len() {
                self.done = false;
                break;
            }
            self.indices[pos] = 0;
        }

        Some(combination)
    }
}
