// ============================================================
// Layer 4 - Train/Validation Splitter
// ============================================================
// Splits the formatted lines into two sets:
//   - Training set:   what the fine-tuning run learns from
//   - Validation set: held out to measure generalisation
//
// The split must be reproducible: the same input and the same
// configuration always give the same two files. So instead of
// thread_rng() the shuffle is driven by a StdRng seeded from the
// configured seed.
//
// Algorithm:
//   1. Shuffle the indices 0..n with the seeded RNG
//   2. The first n_val shuffled indices are the validation set
//   3. Emit each set either in input order (default) or in the
//      shuffled order (`shuffle_within`)
//
// Corpora are usually ordered by poet and era. Picking the
// validation indices from a shuffled permutation keeps both sets
// a representative mix, even when each stream stays in input order.
//
// `split_by_group` runs the same algorithm over distinct group keys
// (poem or poet) instead of lines, so a group lands in exactly one
// of the two sets. The plan then counts groups, not lines.
//
// A fractional plan below 1 never empties the training set: with a
// single item the item trains.

use std::collections::HashMap;
use std::hash::Hash;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default held-out fraction (2.5%).
pub const DEFAULT_VAL_FRACTION: f64 = 0.025;

/// Default seed. Fixed, never taken from the clock.
pub const DEFAULT_SEED: u64 = 42;

/// How large the validation set should be.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPlan {
    /// Fraction of all lines, rounded up
    Fraction(f64),
    /// Fixed number of lines
    Count(usize),
}

impl SplitPlan {
    /// Number of validation items for `total` items, never more than `total`.
    /// A fraction below 1 leaves at least one item for training.
    pub fn validation_size(&self, total: usize) -> usize {
        match *self {
            SplitPlan::Fraction(f) => {
                // The epsilon keeps 0.07 * 100 = 7.000000000000001 at 7
                let n = (((total as f64) * f - 1e-9).ceil().max(0.0) as usize).min(total);
                if f < 1.0 && total > 0 && n == total {
                    total - 1
                } else {
                    n
                }
            }
            SplitPlan::Count(n) => n.min(total),
        }
    }
}

impl Default for SplitPlan {
    fn default() -> Self {
        SplitPlan::Fraction(DEFAULT_VAL_FRACTION)
    }
}

/// Deterministically split `samples` into (train, validation).
///
/// # Arguments
/// * `samples`        - All items (consumed by this function)
/// * `plan`           - Validation size rule
/// * `seed`           - Seed for the index permutation
/// * `shuffle_within` - Emit each set in shuffled order instead of input order
pub fn split_train_val<T>(
    samples:        Vec<T>,
    plan:           SplitPlan,
    seed:           u64,
    shuffle_within: bool,
) -> (Vec<T>, Vec<T>) {
    let total = samples.len();
    let n_val = plan.validation_size(total);

    let mut order: Vec<usize> = (0..total).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let mut is_val = vec![false; total];
    for &i in &order[..n_val] {
        is_val[i] = true;
    }

    let sequence: Vec<usize> = if shuffle_within { order } else { (0..total).collect() };

    let mut slots: Vec<Option<T>> = samples.into_iter().map(Some).collect();
    let mut train = Vec::with_capacity(total - n_val);
    let mut val   = Vec::with_capacity(n_val);

    for i in sequence {
        if let Some(item) = slots[i].take() {
            if is_val[i] {
                val.push(item);
            } else {
                train.push(item);
            }
        }
    }

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        train.len(),
        val.len(),
        (train.len() * 100) / total.max(1),
        (val.len()   * 100) / total.max(1),
    );

    (train, val)
}

/// Split whole groups: every item whose `key` matches goes to the same set.
///
/// Groups are collected in first-appearance order, then the group list is
/// split with [`split_train_val`]. Items keep their input order inside a
/// group; `shuffle_within` shuffles the order of the groups only.
pub fn split_by_group<T, K, F>(
    samples:        Vec<T>,
    key:            F,
    plan:           SplitPlan,
    seed:           u64,
    shuffle_within: bool,
) -> (Vec<T>, Vec<T>)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut slot_of: HashMap<K, usize> = HashMap::new();
    let mut groups:  Vec<Vec<T>>       = Vec::new();

    for item in samples {
        let slot = *slot_of.entry(key(&item)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(item);
    }

    let n_groups = groups.len();
    let (train, val) = split_train_val(groups, plan, seed, shuffle_within);

    tracing::debug!(
        "Group split: {} of {} groups held out for validation",
        val.len(),
        n_groups,
    );

    (
        train.into_iter().flatten().collect(),
        val.into_iter().flatten().collect(),
    )
}
