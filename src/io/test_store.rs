use std::io;

use crate::io::store::{MemoryStore, Store, StoreError, StoreKey};

/// Memory store whose `fail_on`-th save (1-based) fails with "disk full"
#[derive(Debug)]
pub struct FailingStore {
    pub inner: MemoryStore,
    fail_on: usize,
    saves: usize,
}

impl FailingStore {
    pub fn new(inner: MemoryStore, fail_on: usize) -> Self {
        FailingStore {
            inner,
            fail_on,
            saves: 0,
        }
    }
}

impl Store for FailingStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.inner.load(key)
    }

    fn save(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.saves += 1;
        if self.saves == self.fail_on {
            return Err(StoreError::Write {
                path: key.file_name().into(),
                source: io::Error::other("disk full"),
            });
        }
        self.inner.save(key, value)
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}
