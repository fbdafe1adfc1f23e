use namegen_core::{DEFAULT_NAMESET, NameGenError, NameGenerator};

use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	// Start from the built-in nameset (several thousand first names)
	let mut generator = NameGenerator::with_defaults();

	// Register a custom nameset; entries may contain several words,
	// and generated names then follow the same word-count statistics
	generator.register(
		"norse",
		vec![
			"Ragnar Lodbrok".to_owned(),
			"Bjorn Ironside".to_owned(),
			"Ivar Ragnarsson".to_owned(),
			"Halfdan Ragnarsson".to_owned(),
			"Sigurd Hring".to_owned(),
			"Erik Thorvaldsson".to_owned(),
			"Leif Erikson".to_owned(),
			"Harald Hardrada".to_owned(),
		],
	)?;

	// Re-registering an identifier is an error: namesets are immutable
	// for the lifetime of the generator
	match generator.register(DEFAULT_NAMESET, vec!["Ada".to_owned()]) {
		Ok(_) => println!("Should not happen"),
		Err(NameGenError::DuplicateNameset(_)) => {
			println!("This nameset ('{DEFAULT_NAMESET}') is already registered")
		}
		Err(e) => return Err(e.into()),
	}

	// Asking for an unregistered nameset is a descriptive failure
	match generator.generate("unknown") {
		Ok(_) => println!("Should not happen"),
		Err(e) => println!("{e}"),
	}

	// Generate 10 names from the default nameset; the first call builds
	// the chain, every later call reuses it
	for i in 0..10 {
		println!("Generated name {}: {}", i + 1, generator.generate(DEFAULT_NAMESET)?);
	}

	// Multi-word namesets generate multi-word names
	for _ in 0..3 {
		println!("Norse name: {}", generator.generate("norse")?);
	}

	// A fixed seed reproduces a fixed sequence
	let mut rng = StdRng::seed_from_u64(42);
	println!("Seeded name: {}", generator.generate_with(DEFAULT_NAMESET, &mut rng)?);

	Ok(())
}
