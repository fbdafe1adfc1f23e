use std::collections::HashMap;
use std::thread;

use log::debug;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::{NameGenError, Result};
use crate::model::distribution::Distribution;

/// Sentinel emitted when the current character has no outgoing transition
/// distribution in the chain (it never appeared as a non-final character of
/// a training word). The exact value is kept from the original data set.
pub const FALLBACK_CHAR: char = '-';

/// Training sets at least this large are counted on worker threads.
const PARALLEL_THRESHOLD: usize = 4096;

/// Chunks per CPU when building in parallel.
const CHUNK_FACTOR: usize = 8;

/// Accumulates raw observation counts from training entries.
///
/// The builder walks each entry the same way the chain will later be
/// sampled: the word count of the entry, then per word its length, its
/// first character and each pair of consecutive characters.
///
/// # Invariants
/// - Counts are raw (unscaled) until [`finish`](Self::finish) is called.
/// - An entry with no words after whitespace splitting records nothing.
#[derive(Clone, Debug, Default)]
pub struct ChainBuilder {
	parts: Distribution<usize>,
	name_len: Distribution<usize>,
	initial: Distribution<char>,
	transitions: HashMap<char, Distribution<char>>,
}

impl ChainBuilder {
	/// Creates a builder with no recorded observations.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one training entry.
	///
	/// The entry is split into words on runs of whitespace. The word count
	/// goes into the `parts` category; per word, the character count goes
	/// into `name_len`, the first character into `initial`, and every
	/// consecutive character pair into that pair's transition distribution.
	/// Entries with no words are ignored.
	pub fn observe(&mut self, entry: &str) {
		let words: Vec<&str> = entry.split_whitespace().collect();
		if words.is_empty() {
			return;
		}
		self.parts.record(words.len());

		for word in words {
			let mut chars = word.chars();
			// split_whitespace never yields an empty word
			let Some(first) = chars.next() else {
				continue;
			};
			self.name_len.record(word.chars().count());
			self.initial.record(first);

			let mut last = first;
			for c in chars {
				self.transitions.entry(last).or_default().record(c);
				last = c;
			}
		}
	}

	/// Folds another builder's raw counts into this one.
	///
	/// Used to combine partial counts from parallel building; summing raw
	/// counts commutes, unlike summing scaled weights.
	fn merge(&mut self, other: &Self) {
		self.parts.merge(&other.parts);
		self.name_len.merge(&other.name_len);
		self.initial.merge(&other.initial);
		for (c, dist) in &other.transitions {
			self.transitions.entry(*c).or_default().merge(dist);
		}
	}

	/// Applies the scaling transform to every distribution and freezes the
	/// counts into an immutable [`Chain`].
	pub fn finish(mut self) -> Chain {
		self.parts.scale();
		self.name_len.scale();
		self.initial.scale();
		for dist in self.transitions.values_mut() {
			dist.scale();
		}
		Chain {
			parts: self.parts,
			name_len: self.name_len,
			initial: self.initial,
			transitions: self.transitions,
		}
	}
}

/// The trained statistical model of one nameset.
///
/// A `Chain` holds one weighted distribution per category:
/// - `parts`: word count per generated name
/// - `name_len`: word length in characters
/// - `initial`: first character of a word
/// - per character: the character following it in the training data
///
/// A chain is immutable once built and safe to share across concurrent
/// generation calls without locking.
///
/// # Invariants
/// - Every populated distribution has strictly positive weights.
/// - Each distribution's total equals the sum of its weights.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Chain {
	parts: Distribution<usize>,
	name_len: Distribution<usize>,
	initial: Distribution<char>,
	transitions: HashMap<char, Distribution<char>>,
}

impl Chain {
	/// Builds a chain from a list of training entries.
	///
	/// Large training sets are split into chunks counted on worker threads;
	/// the partial raw counts are merged in chunk order and the scaling
	/// transform is applied once to the merged counts, so the parallel path
	/// produces the same chain as the sequential one.
	pub fn build<S: AsRef<str> + Sync>(entries: &[S]) -> Self {
		let builder = if entries.len() < PARALLEL_THRESHOLD {
			let mut builder = ChainBuilder::new();
			for entry in entries {
				builder.observe(entry.as_ref());
			}
			builder
		} else {
			Self::build_chunked(entries)
		};

		debug!("built chain from {} training entries", entries.len());
		builder.finish()
	}

	/// Counts `entries` on `num_cpus * CHUNK_FACTOR` scoped worker threads
	/// and merges the partial builders in chunk order.
	fn build_chunked<S: AsRef<str> + Sync>(entries: &[S]) -> ChainBuilder {
		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = entries.len().div_ceil(chunks);

		let mut builder = ChainBuilder::new();
		thread::scope(|scope| {
			let handles: Vec<_> = entries
				.chunks(chunk_size)
				.map(|chunk| {
					scope.spawn(move || {
						let mut partial = ChainBuilder::new();
						for entry in chunk {
							partial.observe(entry.as_ref());
						}
						partial
					})
				})
				.collect();

			for handle in handles {
				let partial = handle.join().expect("chain build worker panicked");
				builder.merge(&partial);
			}
		});
		builder
	}

	/// Synthesizes one name from the chain.
	///
	/// Draws the word count from `parts`, then per word a target length
	/// from `name_len`, a first character from `initial`, and each further
	/// character from the transition distribution of the previous one. A
	/// character with no outgoing transitions contributes [`FALLBACK_CHAR`]
	/// instead, so the walk always terminates. Words are joined with a
	/// single space.
	///
	/// # Errors
	/// Returns `EmptyModel` if the chain was built from a training set with
	/// no usable words.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
		let parts = self.parts.select(rng).ok_or(NameGenError::EmptyModel)?;
		let mut words: Vec<String> = Vec::with_capacity(parts);

		for _ in 0..parts {
			let target_len = self.name_len.select(rng).ok_or(NameGenError::EmptyModel)?;
			let first = self.initial.select(rng).ok_or(NameGenError::EmptyModel)?;

			let mut word = String::new();
			word.push(first);
			let mut len = 1;
			let mut last = first;

			while len < target_len {
				let next = self
					.transitions
					.get(&last)
					.and_then(|dist| dist.select(rng))
					.unwrap_or(FALLBACK_CHAR);
				word.push(next);
				len += 1;
				last = next;
			}
			words.push(word);
		}
		Ok(words.join(" "))
	}

	/// True if the chain has no structural distributions to sample from.
	///
	/// Generation on an empty chain fails with `EmptyModel`.
	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}

	/// Word-count distribution (`parts` category).
	pub fn parts(&self) -> &Distribution<usize> {
		&self.parts
	}

	/// Word-length distribution (`name_len` category).
	pub fn name_len(&self) -> &Distribution<usize> {
		&self.name_len
	}

	/// First-character distribution (`initial` category).
	pub fn initial(&self) -> &Distribution<char> {
		&self.initial
	}

	/// Outgoing transition distribution for `c`, if `c` ever appeared as a
	/// non-final character of a training word.
	pub fn transition(&self, c: char) -> Option<&Distribution<char>> {
		self.transitions.get(&c)
	}

	/// Iterates all `(character, transition distribution)` pairs.
	pub fn transitions(&self) -> impl Iterator<Item = (char, &Distribution<char>)> {
		self.transitions.iter().map(|(c, dist)| (*c, dist))
	}

	/// Serializes the chain into the compact snapshot format.
	pub fn to_snapshot(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Restores a chain from snapshot bytes.
	pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}
