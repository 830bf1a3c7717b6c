use crate::chain::store::TripletStore;
use crate::chain::triplet::Triplet;
use crate::error::Error;

impl TripletStore {
	/// Encodes the store as a JSON snapshot.
	///
	/// The snapshot is an array of `[triplet, count]` pairs, each triplet an
	/// array of three tokens (`"begin"`, `"end"` or `{"word": "..."}`).
	/// Entries are sorted by triplet, so the same store always produces the
	/// same bytes whatever order it was built in.
	pub fn to_snapshot(&self) -> Result<String, Error> {
		let mut entries: Vec<(&Triplet, usize)> = self.iter().collect();
		entries.sort_by(|a, b| a.0.cmp(b.0));
		serde_json::to_string(&entries).map_err(Error::SnapshotEncode)
	}

	/// Decodes a snapshot produced by [`TripletStore::to_snapshot`].
	///
	/// Counts of duplicate entries are summed, so concatenated or merged
	/// snapshot fragments stay loadable.
	///
	/// # Errors
	/// [`Error::MalformedSnapshot`] when the input is not valid JSON, does
	/// not have the snapshot shape, carries a zero count, or places a
	/// sentinel where it cannot occur. Nothing is ever silently dropped.
	pub fn from_snapshot(snapshot: &str) -> Result<Self, Error> {
		let entries: Vec<(Triplet, usize)> = serde_json::from_str(snapshot)
			.map_err(|e| Error::MalformedSnapshot(e.to_string()))?;

		let mut store = TripletStore::new();
		for (triplet, count) in entries {
			if count == 0 {
				return Err(Error::MalformedSnapshot(format!(
					"zero count for {triplet:?}"
				)));
			}
			if !triplet.is_well_formed() {
				return Err(Error::MalformedSnapshot(format!(
					"sentinel out of place in {triplet:?}"
				)));
			}
			*store.triplets.entry(triplet).or_insert(0) += count;
		}
		Ok(store)
	}
}
