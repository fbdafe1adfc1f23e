use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use serde::Deserialize;

use namegen_core::io::list_files;
use namegen_core::{DEFAULT_NAMESET, NameGenError, NameGenerator};

/// Directory scanned for `.txt` corpus files.
const DATA_DIR: &str = "./data";

/// Upper bound on names generated per request.
const MAX_COUNT: usize = 100;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	sets: Option<String>, // comma-separated nameset identifiers
	count: Option<usize>,
	seed: Option<u64>,
}

#[derive(Deserialize)]
struct NamesetQuery {
	names: Option<String>,
}

struct SharedData {
	generator: NameGenerator,
}

impl GenerateParams {
	/// Requested nameset identifiers, defaulting to the built-in set.
	fn sets(&self) -> Vec<&str> {
		self.sets
			.as_deref()
			.unwrap_or(DEFAULT_NAMESET)
			.split(',')
			.map(|s| s.trim())
			.filter(|s| !s.is_empty())
			.collect()
	}

	/// Random source for this request: seeded and reproducible when a
	/// `seed` parameter is given, the thread RNG otherwise.
	fn rng(&self) -> Box<dyn RngCore> {
		match self.seed {
			Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
			None => Box::new(rand::rng()),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` lines (default 1). Each line holds one name per
/// requested nameset joined with spaces, so `sets=first,last` composes
/// full names from two namesets. Response lines are trimmed for display.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let count = query.count.unwrap_or(1).clamp(1, MAX_COUNT);
	let sets = query.sets();
	if sets.is_empty() {
		return HttpResponse::BadRequest().body("No nameset requested");
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let mut rng = query.rng();

	let mut lines = Vec::with_capacity(count);
	for _ in 0..count {
		let mut pieces = Vec::with_capacity(sets.len());
		for set in &sets {
			match shared_data.generator.generate_with(set, &mut *rng) {
				Ok(name) => pieces.push(name.trim().to_owned()),
				Err(e @ NameGenError::UnknownNameset(_)) => {
					return HttpResponse::BadRequest().body(e.to_string());
				}
				Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
			}
		}
		lines.push(pieces.join(" "));
	}
	HttpResponse::Ok().body(lines.join("\n"))
}

/// HTTP GET endpoint `/v1/namesets`
///
/// Lists the corpus files available for loading from the data directory.
#[get("/v1/namesets")]
async fn get_namesets() -> impl Responder {
	match list_files(DATA_DIR, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list namesets"),
	}
}

/// HTTP GET endpoint `/v1/loaded_namesets`
///
/// Lists the nameset identifiers currently registered in the generator.
#[get("/v1/loaded_namesets")]
async fn get_loaded_namesets(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.nameset_names().join("\n"))
}

/// HTTP PUT endpoint `/v1/load_namesets`
///
/// Loads the named corpus files from the data directory. Loading is
/// additive: registered namesets are immutable, so reloading one is
/// rejected.
#[put("/v1/load_namesets")]
async fn put_namesets(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<NamesetQuery>,
) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty nameset name"),
	};

	let nameset_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	for name in nameset_names {
		let corpus_path = format!("{DATA_DIR}/{name}.txt");
		match shared_data.generator.load_corpus_file(&corpus_path) {
			Ok(_) => (),
			Err(e @ NameGenError::DuplicateNameset(_)) => {
				return HttpResponse::BadRequest().body(e.to_string());
			}
			Err(e) => {
				return HttpResponse::InternalServerError()
					.body(format!("Failed to load nameset: {e}"));
			}
		}
	}

	HttpResponse::Ok().body("Namesets loaded successfully")
}

/// Main entry point for the server.
///
/// Registers the built-in nameset, wraps the generator in a `Mutex` for
/// thread safety, and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Additional corpus files are loaded on demand via `PUT /v1/load_namesets`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		generator: NameGenerator::with_defaults(),
	};
	let shared_generator = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_generator.clone())
			.service(get_generated)
			.service(get_namesets)
			.service(get_loaded_namesets)
			.service(put_namesets)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
