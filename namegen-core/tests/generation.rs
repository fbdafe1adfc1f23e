//! Public-API tests: chain building, weighted generation, the nameset
//! registry and corpus file loading.

use std::fs;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use namegen_core::{Chain, DEFAULT_NAMESET, FALLBACK_CHAR, NameGenError, NameGenerator};

const FIRST_NAMES: &[&str] = &[
	"Aaron", "Abigail", "Adela", "Adrian", "Agnes", "Alberto", "Alexandra", "Alfred",
	"Alice", "Amanda", "Amy", "Ana", "Andrea", "Angela", "Ann", "Anna", "Anthony",
	"Antonio", "April", "Arthur", "Ashley", "Audrey", "Barbara", "Beatrice", "Benjamin",
];

#[test]
fn totals_equal_weight_sums_for_every_category() {
	let chain = Chain::build(FIRST_NAMES);

	assert_eq!(chain.parts().total(), chain.parts().iter().map(|(_, w)| w).sum::<u64>());
	assert_eq!(
		chain.name_len().total(),
		chain.name_len().iter().map(|(_, w)| w).sum::<u64>()
	);
	assert_eq!(
		chain.initial().total(),
		chain.initial().iter().map(|(_, w)| w).sum::<u64>()
	);
	for (_, dist) in chain.transitions() {
		assert_eq!(dist.total(), dist.iter().map(|(_, w)| w).sum::<u64>());
	}
}

#[test]
fn generated_word_counts_are_supported_by_the_parts_category() {
	let chain = Chain::build(&["Mary", "John Smith", "Anna Lee Jones"]);
	let mut rng = StdRng::seed_from_u64(17);

	for _ in 0..128 {
		let name = chain.generate(&mut rng).expect("chain is populated");
		let count = name.split(' ').count();
		assert!(chain.parts().weight(count) > 0, "word count of {name:?} was never observed");
	}
}

#[test]
fn generated_word_lengths_are_supported_or_padded() {
	let chain = Chain::build(FIRST_NAMES);
	let mut rng = StdRng::seed_from_u64(29);

	for _ in 0..128 {
		let name = chain.generate(&mut rng).expect("chain is populated");
		for word in name.split(' ') {
			let observed = chain.name_len().weight(word.chars().count()) > 0;
			assert!(
				observed || word.contains(FALLBACK_CHAR),
				"word {word:?} has an unobserved length and no fallback padding"
			);
		}
	}
}

#[test]
fn fixed_seed_reproduces_a_fixed_output_sequence() {
	let chain = Chain::build(FIRST_NAMES);

	let generate_batch = |seed: u64| -> Vec<String> {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..32).map(|_| chain.generate(&mut rng).expect("chain is populated")).collect()
	};

	assert_eq!(generate_batch(42), generate_batch(42));
	// Different streams exist; the model is not constant
	assert_ne!(generate_batch(42), generate_batch(43));
}

#[test]
fn three_a_names_round_trip_into_expected_weights() {
	let chain = Chain::build(&["Ann", "Ana", "Amy"]);

	// floor(3^1.3) = 4
	assert_eq!(chain.initial().weight('A'), 4);
	assert_eq!(chain.initial().len(), 1);
	assert_eq!(chain.parts().weight(1), 4);
	assert_eq!(chain.parts().len(), 1);
}

#[test]
fn empty_training_entries_yield_an_empty_failing_chain() {
	let chain = Chain::build(&[""]);
	assert!(chain.is_empty());

	let mut rng = StdRng::seed_from_u64(0);
	assert!(matches!(chain.generate(&mut rng), Err(NameGenError::EmptyModel)));
}

#[test]
fn single_letter_training_set_generates_that_letter() {
	let chain = Chain::build(&["A"]);

	assert!(chain.initial().weight('A') >= 1);
	assert!(chain.name_len().weight(1) >= 1);
	assert!(chain.transition('A').is_none());

	let mut rng = StdRng::seed_from_u64(1);
	assert_eq!(chain.generate(&mut rng).expect("chain is populated"), "A");
}

#[test]
fn registry_builds_once_and_shares_the_chain() {
	let mut generator = NameGenerator::with_defaults();

	let first = generator.chain(DEFAULT_NAMESET).expect("default is registered");
	let second = generator.chain(DEFAULT_NAMESET).expect("default is registered");
	assert!(Arc::ptr_eq(&first, &second));

	// The shared chain samples without going through the service
	let mut rng = StdRng::seed_from_u64(4);
	assert!(!first.generate(&mut rng).expect("default corpus is populated").is_empty());
}

#[test]
fn unknown_nameset_fails_without_poisoning_later_calls() {
	let mut generator = NameGenerator::with_defaults();

	let err = generator.generate("no-such-set").expect_err("nameset is not registered");
	assert!(matches!(err, NameGenError::UnknownNameset(_)));
	assert!(generator.generate(DEFAULT_NAMESET).is_ok());
}

#[test]
fn corpus_directory_round_trips_through_snapshots() {
	let dir = tempfile::tempdir().expect("temp dir");
	let corpus_path = dir.path().join("elvish.txt");
	fs::write(&corpus_path, "# elvish\nLegolas\nThranduil\nElrond\nGaladriel\n")
		.expect("write corpus");

	let mut generator = NameGenerator::from_dir(dir.path()).expect("directory loads");
	assert_eq!(generator.nameset_names(), vec!["elvish".to_owned()]);

	let mut rng = StdRng::seed_from_u64(77);
	let name = generator.generate_with("elvish", &mut rng).expect("corpus is populated");
	assert!(!name.is_empty());

	// The first load leaves a snapshot behind; the second one restores it
	let snapshot_path = dir.path().join("elvish.bin");
	assert!(snapshot_path.exists());

	let mut restored = NameGenerator::from_dir(dir.path()).expect("snapshot loads");
	let original_chain = generator.chain("elvish").expect("registered");
	let restored_chain = restored.chain("elvish").expect("registered");
	assert_eq!(*original_chain, *restored_chain);
}

#[test]
fn multi_word_namesets_generate_multi_word_names() {
	let mut generator = NameGenerator::new();
	generator
		.register(
			"norse",
			vec![
				"Ragnar Lodbrok".to_owned(),
				"Bjorn Ironside".to_owned(),
				"Ivar Ragnarsson".to_owned(),
				"Leif Erikson".to_owned(),
			],
		)
		.expect("fresh identifier");

	let mut rng = StdRng::seed_from_u64(55);
	for _ in 0..32 {
		let name = generator.generate_with("norse", &mut rng).expect("corpus is populated");
		assert_eq!(name.split(' ').count(), 2, "unexpected shape for {name:?}");
	}
}
