//! REST facade over a shared trigram chain.
//!
//! One chain, one MeCab tokenizer, guarded by a mutex; every endpoint works
//! on the same model. The database is loaded once at startup and written
//! back on demand through `/v1/save`.

use std::path::PathBuf;
use std::sync::Mutex;

use actix_web::middleware::Logger;
use actix_web::{get, post, put, web, App, HttpResponse, HttpServer, Responder};

use actix_cors::Cors;
use clap::Parser;
use serde::Deserialize;

use rensa_core::error::Error;
use rensa_core::io::{load_snapshot_file, save_snapshot_file};
use rensa_core::markov::Markov;
use rensa_core::tokenizer::MecabTokenizer;

#[derive(Parser, Debug)]
#[command(version, about = "HTTP server for the trigram chain", long_about = None)]
struct Args {
	/// Address to bind.
	#[arg(long, env = "RENSA_ADDR", default_value = "127.0.0.1")]
	addr: String,

	/// Port to bind.
	#[arg(long, env = "RENSA_PORT", default_value_t = 5000)]
	port: u16,

	/// Snapshot database file, loaded at startup and written by `/v1/save`.
	#[arg(long, env = "RENSA_DB", default_value = "rensa.json")]
	db: PathBuf,

	/// MeCab binary to run.
	#[arg(long, env = "RENSA_MECAB", default_value = "mecab")]
	mecab_command: String,
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
}

struct SharedData {
	markov: Markov<MecabTokenizer>,
	db: PathBuf,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` sentences (default 5) and returns them one per line.
/// An untrained chain answers 409 rather than an empty body.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let count = query.count.unwrap_or(5);

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match shared_data.markov.generate(count) {
		Ok(sentences) => HttpResponse::Ok().body(sentences.join("\n")),
		Err(e @ Error::EmptyModel) => HttpResponse::Conflict().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/learn`
///
/// Tokenizes the raw request body and learns it into the shared chain.
#[put("/v1/learn")]
async fn put_learn(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match shared_data.markov.learn(&body) {
		Ok(()) => {
			HttpResponse::Ok().body(format!("{} triplets", shared_data.markov.store().len()))
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/forget`
///
/// Removes every triplet mentioning a word of the request body.
#[put("/v1/forget")]
async fn put_forget(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match shared_data.markov.forget(&body) {
		Ok(removed) => HttpResponse::Ok().body(format!(
			"removed {removed} triplets, {} left",
			shared_data.markov.store().len()
		)),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/stats`
#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	let store = shared_data.markov.store();
	HttpResponse::Ok().body(format!(
		"triplets: {}\nopeners: {}",
		store.len(),
		store.opener_count()
	))
}

/// HTTP POST endpoint `/v1/save`
///
/// Writes the current chain back to the database file, atomically.
#[post("/v1/save")]
async fn post_save(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	match save_snapshot_file(&shared_data.db, shared_data.markov.store()) {
		Ok(()) => HttpResponse::Ok().body(format!("saved to {}", shared_data.db.display())),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// Main entry point for the server.
///
/// Loads the snapshot database, wraps the chain in a `Mutex` for thread
/// safety, and starts an Actix-web HTTP server.
///
/// # Notes
/// - A missing database starts an empty chain; a malformed one aborts
///   startup instead of silently serving nothing.
/// - CORS is permissive: the server is meant to sit behind something.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
	let args = Args::parse();

	let tokenizer = MecabTokenizer::with_command(&args.mecab_command);
	let markov = match load_snapshot_file(&args.db)? {
		Some(store) => {
			log::info!("loaded {} triplets from {}", store.len(), args.db.display());
			Markov::with_store(tokenizer, store)
		}
		None => {
			log::info!("no database at {}, starting empty", args.db.display());
			Markov::new(tokenizer)
		}
	};

	let shared_data = SharedData {
		markov,
		db: args.db.clone(),
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on {}:{}", args.addr, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(put_learn)
			.service(put_forget)
			.service(get_stats)
			.service(post_save)
	})
	.bind((args.addr, args.port))?
	.run()
	.await?;

	Ok(())
}
