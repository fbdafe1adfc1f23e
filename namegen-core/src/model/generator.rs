use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use rand::Rng;

use crate::error::{NameGenError, Result};
use crate::io;
use crate::model::chain::Chain;

/// Identifier of the built-in nameset.
pub const DEFAULT_NAMESET: &str = "default";

/// First-name seed corpus carried over from the original distribution.
/// Duplicate entries are deliberate: they weight the chain.
const DEFAULT_CORPUS: &str = include_str!("../../data/default.txt");

/// Generation service owning the nameset registry and the chain cache.
///
/// # Responsibilities
/// - Register namesets: the embedded default corpus, programmatic lists,
///   or `.txt` corpus files loaded from a directory
/// - Build each nameset's chain at most once and reuse it afterwards
/// - Generate names with a caller-supplied or thread-local random source
///
/// # Invariants
/// - Registered namesets are immutable for the lifetime of the service.
/// - At most one chain is ever built per identifier; all callers observe
///   the same shared instance.
/// - The cache is never invalidated or evicted. It is unbounded by design:
///   the key space (distinct namesets) is small and operator-controlled.
#[derive(Debug, Default)]
pub struct NameGenerator {
	namesets: HashMap<String, Vec<String>>,
	chains: HashMap<String, Arc<Chain>>,
}

impl NameGenerator {
	/// Creates an empty service with no registered namesets.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a service with the built-in `default` nameset registered.
	pub fn with_defaults() -> Self {
		let mut generator = Self::new();
		let names = DEFAULT_CORPUS
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.map(str::to_owned)
			.collect();
		// Registering into an empty registry cannot collide
		generator
			.register(DEFAULT_NAMESET, names)
			.expect("default nameset registration failed");
		generator
	}

	/// Creates a service and loads every `.txt` corpus file from `dir`.
	///
	/// See [`load_dir`](Self::load_dir) for the loading rules.
	pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let mut generator = Self::new();
		generator.load_dir(dir)?;
		Ok(generator)
	}

	/// Registers a nameset under `identifier`.
	///
	/// # Errors
	/// Returns `DuplicateNameset` if the identifier is already taken:
	/// namesets are immutable for the lifetime of the service, so
	/// re-registration would invalidate an already-shared chain.
	pub fn register(&mut self, identifier: &str, names: Vec<String>) -> Result<()> {
		if self.namesets.contains_key(identifier) {
			return Err(NameGenError::DuplicateNameset(identifier.to_owned()));
		}
		debug!("registered nameset '{}' ({} entries)", identifier, names.len());
		self.namesets.insert(identifier.to_owned(), names);
		Ok(())
	}

	/// Registered nameset identifiers, sorted.
	pub fn nameset_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.namesets.keys().map(|k| k.to_owned()).collect();
		names.sort();
		names
	}

	/// Loads every `.txt` corpus file in `dir` as a nameset named after the
	/// file stem.
	///
	/// # Errors
	/// Fails on the first file that cannot be loaded; files loaded before
	/// the failure stay registered. See
	/// [`load_corpus_file`](Self::load_corpus_file).
	pub fn load_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
		let folder = io::normalize_folder(dir.as_ref());
		for file in io::list_files(&folder, "txt")? {
			self.load_corpus_file(folder.join(&file))?;
		}
		Ok(())
	}

	/// Loads a single `.txt` corpus file (one name per line, blank lines
	/// and `#` comments ignored) as a nameset named after the file stem.
	///
	/// A chain snapshot (`<stem>.bin`) next to the corpus file is restored
	/// instead of rebuilding the chain; otherwise the chain is built
	/// immediately and the snapshot written for the next run. Snapshot
	/// write failures are logged and ignored.
	///
	/// # Errors
	/// - `Io` if the corpus file cannot be read.
	/// - `DuplicateNameset` if the file stem collides with a registered set.
	/// - `Snapshot` if an existing snapshot fails to decode.
	pub fn load_corpus_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let path = path.as_ref();
		let identifier = io::file_stem(path)?;
		if self.namesets.contains_key(&identifier) {
			return Err(NameGenError::DuplicateNameset(identifier));
		}
		let names = io::read_corpus(path)?;

		let snapshot_path = io::sibling_with_extension(path, "bin")?;
		let chain = if snapshot_path.exists() {
			let bytes = fs::read(&snapshot_path)
				.map_err(|e| NameGenError::io(e, Some(snapshot_path.clone())))?;
			debug!("restored chain snapshot for '{}'", identifier);
			Arc::new(Chain::from_snapshot(&bytes)?)
		} else {
			let chain = Arc::new(Chain::build(&names));
			match chain.to_snapshot() {
				Ok(bytes) => {
					if let Err(e) = fs::write(&snapshot_path, bytes) {
						warn!("failed to write snapshot {}: {}", snapshot_path.display(), e);
					}
				}
				Err(e) => warn!("failed to encode snapshot for '{}': {}", identifier, e),
			}
			chain
		};

		self.namesets.insert(identifier.clone(), names);
		self.chains.insert(identifier, chain);
		Ok(())
	}

	/// Returns the chain for `identifier`, building it on first request.
	///
	/// The built chain is cached for the lifetime of the service; later
	/// calls return the same shared instance. The chain itself is
	/// immutable, so callers may hold and sample it concurrently.
	///
	/// # Errors
	/// Returns `UnknownNameset` if nothing was registered under
	/// `identifier`.
	pub fn chain(&mut self, identifier: &str) -> Result<Arc<Chain>> {
		if let Some(chain) = self.chains.get(identifier) {
			return Ok(Arc::clone(chain));
		}

		let names = self
			.namesets
			.get(identifier)
			.ok_or_else(|| NameGenError::UnknownNameset(identifier.to_owned()))?;
		info!("building chain for nameset '{}' ({} entries)", identifier, names.len());
		let chain = Arc::new(Chain::build(names));
		self.chains.insert(identifier.to_owned(), Arc::clone(&chain));
		Ok(chain)
	}

	/// Generates one name from `identifier`'s chain using `rng`.
	///
	/// A fixed-seed `rng` reproduces a fixed output sequence.
	///
	/// # Errors
	/// - `UnknownNameset` if nothing was registered under `identifier`.
	/// - `EmptyModel` if the nameset contained no usable words.
	pub fn generate_with<R: Rng + ?Sized>(&mut self, identifier: &str, rng: &mut R) -> Result<String> {
		let chain = self.chain(identifier)?;
		chain.generate(rng)
	}

	/// Generates one name from `identifier`'s chain using the thread RNG.
	pub fn generate(&mut self, identifier: &str) -> Result<String> {
		self.generate_with(identifier, &mut rand::rng())
	}
}
