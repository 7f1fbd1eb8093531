//! In-memory read cache using DashMap with generation tracking
//!
//! Every read stamps its entry with a fresh generation. A result is only
//! stored if its entry still carries that generation when the read
//! completes, so invalidating (or re-requesting) a key while a read is in
//! flight drops the late result instead of overwriting newer state.
//! Fetches that find a read in flight wait for it rather than starting
//! their own.

use dashmap::DashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::debug;
use zapout_types::{ChainResult, ReadKey, ReadState, ReadValue};

/// Carries the outcome of one read to the fetches waiting on it
type Outcome = Option<ReadState<ReadValue>>;

#[derive(Debug, Clone)]
struct CacheEntry {
	state: ReadState<ReadValue>,
	generation: u64,
	settled_at: Option<Instant>,
	in_flight: Option<watch::Receiver<Outcome>>,
}

impl CacheEntry {
	fn is_expired(&self, max_age: Option<Duration>) -> bool {
		match (max_age, self.settled_at) {
			(Some(max_age), Some(settled_at)) => settled_at.elapsed() > max_age,
			_ => false,
		}
	}

	fn is_settled(&self) -> bool {
		matches!(self.state, ReadState::Ready(_) | ReadState::Error(_))
	}

	/// Receiver for the read in flight, if the entry is still loading
	fn waiter(&self) -> Option<watch::Receiver<Outcome>> {
		match self.state {
			ReadState::Loading => self.in_flight.clone(),
			_ => None,
		}
	}
}

/// Wait for a read to publish its outcome; `None` when it was abandoned
async fn outcome_of(mut receiver: watch::Receiver<Outcome>) -> Outcome {
	let published = receiver.wait_for(Option::is_some).await;
	match published {
		Ok(outcome) => outcome.clone(),
		Err(_) => None,
	}
}

/// Statistics about cache usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
	pub entries: usize,
	pub loading: usize,
	pub ready: usize,
	pub errors: usize,
}

/// Thread-safe cache of keyed contract reads
#[derive(Clone, Debug, Default)]
pub struct ReadCache {
	entries: Arc<DashMap<ReadKey, CacheEntry>>,
	generation: Arc<AtomicU64>,
	max_age: Option<Duration>,
}

impl ReadCache {
	/// Create a cache whose settled entries never expire on their own
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a cache that refetches settled entries older than `max_age`
	pub fn with_max_age(max_age: Duration) -> Self {
		Self {
			max_age: Some(max_age),
			..Self::default()
		}
	}

	/// Current state of `key` without triggering a read
	pub fn state(&self, key: &ReadKey) -> ReadState<ReadValue> {
		self.entries
			.get(key)
			.map(|entry| entry.state.clone())
			.unwrap_or(ReadState::NotRequested)
	}

	/// Return the settled value for `key`, reading through `fetcher` when
	/// the key is unknown, invalidated or expired
	///
	/// When a read of `key` is already in flight the fetch waits for it and
	/// returns its result, and `fetcher` is not called.
	pub async fn fetch<F, Fut>(&self, key: &ReadKey, fetcher: F) -> ReadState<ReadValue>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = ChainResult<ReadValue>>,
	{
		let waiter = match self.entries.get(key) {
			Some(entry) if entry.is_settled() && !entry.is_expired(self.max_age) => {
				return entry.state.clone();
			},
			Some(entry) => entry.waiter(),
			None => None,
		};

		if let Some(receiver) = waiter {
			debug!("Joining read of {} already in flight", key);
			if let Some(state) = outcome_of(receiver).await {
				return state;
			}
			debug!("Read of {} was abandoned, reading again", key);
		}

		self.refetch(key, fetcher).await
	}

	/// Read `key` through `fetcher` regardless of any cached value
	pub async fn refetch<F, Fut>(&self, key: &ReadKey, fetcher: F) -> ReadState<ReadValue>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = ChainResult<ReadValue>>,
	{
		let (generation, publish) = self.begin(key);
		let result = fetcher().await;
		let state = match self.complete(key, generation, result) {
			Some(state) => state,
			None => self.settled_state(key).await,
		};
		publish.send_replace(Some(state.clone()));
		state
	}

	fn begin(&self, key: &ReadKey) -> (u64, watch::Sender<Outcome>) {
		let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
		let (publish, receiver) = watch::channel(None);
		self.entries.insert(
			key.clone(),
			CacheEntry {
				state: ReadState::Loading,
				generation,
				settled_at: None,
				in_flight: Some(receiver),
			},
		);
		debug!("Reading {} (generation {})", key, generation);
		(generation, publish)
	}

	/// Store `result` if the entry still belongs to `generation`
	fn complete(
		&self,
		key: &ReadKey,
		generation: u64,
		result: ChainResult<ReadValue>,
	) -> Option<ReadState<ReadValue>> {
		let state = match result {
			Ok(value) => ReadState::Ready(value),
			Err(error) => ReadState::Error(error),
		};

		match self.entries.get_mut(key) {
			Some(mut entry) if entry.generation == generation => {
				entry.state = state.clone();
				entry.settled_at = Some(Instant::now());
				entry.in_flight = None;
				Some(state)
			},
			_ => {
				debug!(
					"Discarding stale result for {} (generation {})",
					key, generation
				);
				None
			},
		}
	}

	/// State of `key` once the read that superseded ours has settled
	async fn settled_state(&self, key: &ReadKey) -> ReadState<ReadValue> {
		let waiter = match self.entries.get(key) {
			Some(entry) => match entry.waiter() {
				Some(receiver) => receiver,
				None => return entry.state.clone(),
			},
			None => return ReadState::NotRequested,
		};
		outcome_of(waiter).await.unwrap_or(ReadState::NotRequested)
	}

	/// Forget `key` so the next fetch reads the chain again
	///
	/// A read of `key` that is still in flight will not be stored.
	pub fn invalidate(&self, key: &ReadKey) -> bool {
		let removed = self.entries.remove(key).is_some();
		if removed {
			debug!("Invalidated {}", key);
		}
		removed
	}

	/// Invalidate every key matching `predicate`, returning how many were removed
	pub fn invalidate_where(&self, predicate: impl Fn(&ReadKey) -> bool) -> usize {
		let mut removed = 0;
		self.entries.retain(|key, _| {
			let matches = predicate(key);
			if matches {
				removed += 1;
			}
			!matches
		});
		if removed > 0 {
			debug!("Invalidated {} cached reads", removed);
		}
		removed
	}

	/// Drop every failed read so the next fetch retries it
	pub fn invalidate_errors(&self) -> usize {
		let mut removed = 0;
		self.entries.retain(|_, entry| {
			let failed = matches!(entry.state, ReadState::Error(_));
			if failed {
				removed += 1;
			}
			!failed
		});
		if removed > 0 {
			debug!("Dropped {} failed reads", removed);
		}
		removed
	}

	pub fn clear(&self) {
		let count = self.entries.len();
		self.entries.clear();
		debug!("Cleared all {} cached reads", count);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn stats(&self) -> CacheStats {
		let mut stats = CacheStats {
			entries: self.entries.len(),
			..CacheStats::default()
		};
		for entry in self.entries.iter() {
			match entry.state {
				ReadState::Loading => stats.loading += 1,
				ReadState::Ready(_) => stats.ready += 1,
				ReadState::Error(_) => stats.errors += 1,
				ReadState::NotRequested => {},
			}
		}
		stats
	}
}
