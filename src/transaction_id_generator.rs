use std::sync::{Mutex, PoisonError};

use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use tracing::trace;

use crate::types::TransactionId;

pub const TRANSACTION_ID_LEN: usize = 2;

/// Hands out 2 byte transaction ids, each byte drawn uniformly from 1..=255.
///
/// The generator is seeded exactly once when it's made and shared behind a mutex, so concurrent
/// callers each get an independent draw from the same stream.
#[derive(Debug)]
pub struct TransactionIdGenerator<R = SmallRng> {
    rng: Mutex<R>,
}

impl TransactionIdGenerator<SmallRng> {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Deterministic sequence, useful for tests and replaying captures
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for TransactionIdGenerator<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> TransactionIdGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    pub fn generate(&self) -> TransactionId {
        // nothing in here can panic while holding the lock, but don't take the encoder down if
        // someone else managed to
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let mut id = [0u8; TRANSACTION_ID_LEN];
        for byte in id.iter_mut() {
            *byte = rng.random_range(1..=u8::MAX);
        }
        drop(rng);

        trace!("generated transaction id {}", hex::encode_upper(id));
        TransactionId::from(id)
    }
}
