//! Command-line front end for the trigram chain.
//!
//! Keeps a snapshot database on disk and drives the full cycle over it:
//! `learn`, `gen`, `forget`, `stats`. Results go to stdout, diagnostics to
//! the log (`RUST_LOG` controls verbosity).

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use rensa_core::chain::store::TripletStore;
use rensa_core::io::{load_snapshot_file, save_snapshot_file};
use rensa_core::tokenizer::{MecabTokenizer, Tokenizer, WhitespaceTokenizer};

#[derive(Parser, Debug)]
#[command(name = "rensa", version, about = "Trigram Markov-chain sentence generator", long_about = None)]
struct Cli {
	/// Snapshot database file.
	#[arg(long, env = "RENSA_DB", default_value = "rensa.json", global = true)]
	db: PathBuf,

	/// How to split raw text into tokens.
	#[arg(long, value_enum, default_value_t = TokenizerKind::Mecab, global = true)]
	tokenizer: TokenizerKind,

	/// MeCab binary to run (for installs outside PATH).
	#[arg(long, env = "RENSA_MECAB", default_value = "mecab", global = true)]
	mecab_command: String,

	/// Extra argument passed to MeCab after `-Owakati`; repeatable.
	#[arg(long = "mecab-arg", value_name = "ARG", global = true)]
	mecab_args: Vec<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TokenizerKind {
	/// External MeCab process in word-dividing mode.
	Mecab,
	/// Plain whitespace splitting, for pre-segmented text.
	Whitespace,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Learn from text files and update the database.
	Learn {
		/// Text files, one sentence per line.
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Start from an empty database instead of extending the existing
		/// one.
		#[arg(long)]
		fresh: bool,
	},
	/// Generate sentences from the database.
	Gen {
		/// Number of sentences.
		#[arg(short = 'n', long, default_value_t = 5)]
		count: usize,

		/// Join tokens with this separator instead of concatenating them.
		#[arg(long)]
		sep: Option<String>,
	},
	/// Remove every triplet that mentions a word of TEXT.
	Forget {
		/// Text to tokenize into the words to forget.
		text: String,
	},
	/// Print database statistics.
	Stats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let cli = Cli::parse();

	match &cli.command {
		Command::Learn { files, fresh } => learn(&cli, files, *fresh),
		Command::Gen { count, sep } => generate(&cli, *count, sep.as_deref()),
		Command::Forget { text } => forget(&cli, text),
		Command::Stats => stats(&cli),
	}
}

fn learn(cli: &Cli, files: &[PathBuf], fresh: bool) -> Result<(), Box<dyn std::error::Error>> {
	let tokenizer = make_tokenizer(cli);
	let mut store = if fresh {
		TripletStore::new()
	} else {
		load_snapshot_file(&cli.db)?.unwrap_or_default()
	};

	for file in files {
		let text = fs::read_to_string(file)?;
		let lines = tokenizer.tokenize(&text)?;
		let partial = TripletStore::from_lines_parallel(&lines);
		log::info!(
			"{}: {} lines, {} distinct triplets",
			file.display(),
			lines.len(),
			partial.len()
		);
		store.merge(partial);
	}

	save_snapshot_file(&cli.db, &store)?;
	println!("{} triplets in {}", store.len(), cli.db.display());
	Ok(())
}

fn generate(cli: &Cli, count: usize, sep: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
	let store = load_required(&cli.db)?;
	match sep {
		None => {
			for sentence in store.generate(count)? {
				println!("{sentence}");
			}
		}
		Some(sep) => {
			for _ in 0..count {
				println!("{}", store.generate_tokens()?.join(sep));
			}
		}
	}
	Ok(())
}

fn forget(cli: &Cli, text: &str) -> Result<(), Box<dyn std::error::Error>> {
	let tokenizer = make_tokenizer(cli);
	let mut store = load_required(&cli.db)?;

	let lines = tokenizer.tokenize(text)?;
	let removed = store.remove_containing_lines(&lines);
	save_snapshot_file(&cli.db, &store)?;

	println!("removed {removed} triplets, {} left", store.len());
	Ok(())
}

fn stats(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
	let store = load_required(&cli.db)?;
	println!("triplets: {}", store.len());
	println!("openers: {}", store.opener_count());
	Ok(())
}

/// Loads the database or fails with a pointer to `learn`.
///
/// A malformed database aborts here; wiping it is the user's call, never
/// this tool's.
fn load_required(db: &Path) -> Result<TripletStore, Box<dyn std::error::Error>> {
	match load_snapshot_file(db)? {
		Some(store) => Ok(store),
		None => Err(format!("no database at {}; run `rensa learn` first", db.display()).into()),
	}
}

fn make_tokenizer(cli: &Cli) -> Box<dyn Tokenizer> {
	match cli.tokenizer {
		TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer),
		TokenizerKind::Mecab => {
			let mut tokenizer = MecabTokenizer::with_command(&cli.mecab_command);
			for arg in &cli.mecab_args {
				tokenizer = tokenizer.arg(arg);
			}
			Box::new(tokenizer)
		}
	}
}
