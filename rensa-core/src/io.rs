use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::chain::store::TripletStore;
use crate::error::Error;

/// Loads a snapshot database if the file exists.
///
/// - A missing file is `Ok(None)`: a fresh start, not an error
/// - An unreadable or malformed file is an error; the caller decides
///   whether starting over is acceptable
pub fn load_snapshot_file<P: AsRef<Path>>(path: P) -> Result<Option<TripletStore>, Error> {
	let snapshot = match fs::read_to_string(path) {
		Ok(snapshot) => snapshot,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(Error::Io(e)),
	};
	Ok(Some(TripletStore::from_snapshot(&snapshot)?))
}

/// Saves a snapshot database atomically.
///
/// Writes to a temporary file in the target directory, then renames it over
/// `path`, so a crash mid-write never leaves a truncated database behind.
pub fn save_snapshot_file<P: AsRef<Path>>(path: P, store: &TripletStore) -> Result<(), Error> {
	let path = path.as_ref();
	let snapshot = store.to_snapshot()?;

	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut file = NamedTempFile::new_in(dir)?;
	file.write_all(snapshot.as_bytes())?;
	file.persist(path).map_err(|e| Error::Io(e.error))?;
	Ok(())
}
