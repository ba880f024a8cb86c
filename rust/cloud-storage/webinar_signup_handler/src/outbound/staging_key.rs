//! Keys for messages written into the staging bucket

use crate::{
    domain::{
        models::StagedKey,
        ports::{StagingKeyGenerator, TimeGetter},
    },
    outbound::time::DefaultTime,
};
use uuid::Uuid;

/// Generates `<epoch seconds>-<uuid v7>.json`.
/// The dispatcher lists the bucket by key so the epoch prefix keeps messages roughly
/// in staging order, and the uuid keeps two messages staged in the same second apart.
#[derive(Debug, Clone)]
pub struct EpochKeyGenerator<T = DefaultTime> {
    time: T,
}

impl<T: TimeGetter> EpochKeyGenerator<T> {
    /// create a generator reading the time from `time`
    pub fn new(time: T) -> Self {
        Self { time }
    }
}

impl<T: TimeGetter> StagingKeyGenerator for EpochKeyGenerator<T> {
    fn next_key(&self) -> StagedKey {
        let seconds = self.time.now().timestamp();
        StagedKey(format!("{seconds}-{}.json", Uuid::now_v7()))
    }
}
