use rand::Rng;

use serde::{Deserialize, Serialize};

/// Exponent of the scaling transform applied to raw observation counts.
///
/// The superlinear exponent amplifies frequently observed tokens relative to
/// rare ones. The exact value is kept from the original data set tuning.
pub(crate) const SCALING_EXPONENT: f64 = 1.3;

/// A weighted distribution over tokens of one chain category.
///
/// A `Distribution` accumulates observation counts for tokens (characters or
/// integer counts, depending on the category) and, once scaled, serves as the
/// sampling table for weighted random draws.
///
/// Entries are kept in first-insertion order. The inverse-CDF draw in
/// [`select`](Self::select) walks entries in that order, so the same uniform
/// index always resolves to the same token; an unordered container here would
/// break reproducibility under a fixed random seed.
///
/// ## Responsibilities:
/// - Accumulate token observations during chain building
/// - Scale raw counts into sampling weights
/// - Select a token using a weighted random draw
/// - Merge with another distribution of the same category (parallel building)
///
/// ## Invariants
/// - Each weight is strictly positive, before and after scaling
/// - `total` equals the sum of all weights at all times
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Distribution<T> {
	/// `(token, weight)` entries in first-insertion order.
	entries: Vec<(T, u64)>,
	/// Sum of all weights, kept in step with `entries`.
	total: u64,
}

impl<T> Default for Distribution<T> {
	fn default() -> Self {
		Self { entries: Vec::new(), total: 0 }
	}
}

impl<T: Copy + PartialEq> Distribution<T> {
	/// Creates a new empty distribution.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one observation of `token`.
	///
	/// - If the token was seen before, its count is increased.
	/// - Otherwise a new entry is appended with an initial count of 1.
	///
	/// The scan is O(n); category alphabets stay small in practice.
	pub(crate) fn record(&mut self, token: T) {
		match self.entries.iter_mut().find(|(t, _)| *t == token) {
			Some((_, weight)) => *weight += 1,
			None => self.entries.push((token, 1)),
		}
		self.total += 1;
	}

	/// Folds another raw-count distribution into this one.
	///
	/// Counts of shared tokens are summed; tokens unknown to `self` are
	/// appended in the order they appear in `other`. Intended for merging
	/// partial counts from parallel chain building, before scaling.
	pub(crate) fn merge(&mut self, other: &Self) {
		for (token, weight) in &other.entries {
			match self.entries.iter_mut().find(|(t, _)| *t == *token) {
				Some((_, w)) => *w += *weight,
				None => self.entries.push((*token, *weight)),
			}
		}
		self.total += other.total;
	}

	/// Replaces every raw count `n` with `floor(n^1.3)` and recomputes the
	/// total from the scaled weights.
	///
	/// Since `n >= 1` implies `n^1.3 >= 1`, scaled weights stay strictly
	/// positive and the total stays exact (integer arithmetic after the
	/// floor, no drift).
	pub(crate) fn scale(&mut self) {
		let mut total = 0;
		for (_, weight) in &mut self.entries {
			*weight = (*weight as f64).powf(SCALING_EXPONENT).floor() as u64;
			total += *weight;
		}
		self.total = total;
	}

	/// Selects a token with probability proportional to its weight.
	///
	/// Draws a uniform index in `[0, total)`, then walks the entries in
	/// first-insertion order accumulating weights and returns the first
	/// token whose running sum exceeds the index.
	///
	/// Returns `None` if the distribution is empty. If the walk exhausts
	/// the entries without a hit (unreachable while `total` matches the
	/// weight sum), the last entry is returned instead of panicking.
	pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
		if self.entries.is_empty() {
			return None;
		}
		if self.total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}

		let idx = rng.random_range(0..self.total);

		let mut running = 0;
		let mut fallback: Option<T> = None;
		for (token, weight) in &self.entries {
			running += weight;
			if idx < running {
				return Some(*token);
			}
			fallback = Some(*token);
		}
		fallback
	}

	/// Weight currently associated with `token`, 0 if absent.
	pub fn weight(&self, token: T) -> u64 {
		self.entries
			.iter()
			.find(|(t, _)| *t == token)
			.map(|(_, w)| *w)
			.unwrap_or(0)
	}

	/// Sum of all weights.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True if no token was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates `(token, weight)` entries in first-insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (T, u64)> + '_ {
		self.entries.iter().map(|(t, w)| (*t, *w))
	}
}
