//! An [ObjectStore] kept entirely in memory, used for local runs and tests

use crate::domain::ports::ObjectStore;
use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// An object as it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// bucket the object lives in
    pub bucket: String,
    /// object key
    pub key: String,
    /// raw content
    pub content: Vec<u8>,
    /// content type given on write, if any
    pub content_type: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<(String, String), StoredObject>,
    // keys in the order they were put
    writes: Vec<(String, String)>,
}

/// Bucket/key store backed by a map. Clones share the same objects
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryObjectStore {
    /// an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// seed an object without recording it as a write
    pub fn with_object(self, bucket: &str, key: &str, content: impl Into<Vec<u8>>) -> Self {
        self.lock().objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                content: content.into(),
                content_type: None,
            },
        );
        self
    }

    /// every object written through [ObjectStore::put] into `bucket`, oldest first
    pub fn written_to(&self, bucket: &str) -> Vec<StoredObject> {
        let inner = self.lock();
        inner
            .writes
            .iter()
            .filter(|(b, _)| b == bucket)
            .filter_map(|id| inner.objects.get(id).cloned())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectStore for InMemoryObjectStore {
    type Err = Infallible;

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>, Infallible> {
        Ok(self
            .lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .map(|o| o.content.clone()))
    }

    async fn put(
        &self,
        bucket: &str,
        key: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), Infallible> {
        let id = (bucket.to_string(), key.to_string());
        let mut inner = self.lock();
        inner.objects.insert(
            id.clone(),
            StoredObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                content,
                content_type: Some(content_type.to_string()),
            },
        );
        inner.writes.retain(|existing| existing != &id);
        inner.writes.push(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_reads_seeded_objects() {
        let store = InMemoryObjectStore::new().with_object("in", "a.json", "{}");
        assert_eq!(store.get("in", "a.json").await.unwrap(), Some(b"{}".to_vec()));
        assert_eq!(store.get("in", "b.json").await.unwrap(), None);
        assert!(store.written_to("in").is_empty());
    }

    #[tokio::test]
    async fn it_records_writes_in_order() {
        let store = InMemoryObjectStore::new();
        store.put("out", "2.json", b"two".to_vec(), "application/json").await.unwrap();
        store.put("out", "1.json", b"one".to_vec(), "application/json").await.unwrap();
        store.put("other", "3.json", b"three".to_vec(), "text/plain").await.unwrap();

        let written = store.written_to("out");
        let keys: Vec<_> = written.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["2.json", "1.json"]);
        assert_eq!(written[0].content_type.as_deref(), Some("application/json"));
    }
}
