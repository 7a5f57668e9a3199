// In-memory ListStore
//
// Same list semantics as the network store: FIFO lists, keys vanish once
// drained, blocking pops wake on push or give up at the deadline.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::port::{ListStore, PushAck, StoreError};

type Lists = HashMap<String, VecDeque<Vec<u8>>>;

/// Process-local list store
#[derive(Default)]
pub struct MemoryListStore {
    lists: Mutex<Lists>,
    pushed: Notify,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Lists>, StoreError> {
        self.lists
            .lock()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }

    fn pop_now(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut lists = self.lock()?;
        let Some(list) = lists.get_mut(key) else {
            return Ok(None);
        };
        let value = list.pop_front();
        if list.is_empty() {
            lists.remove(key);
        }
        Ok(value)
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn push_back(&self, key: &str, value: &[u8]) -> Result<PushAck, StoreError> {
        let len = {
            let mut lists = self.lock()?;
            let list = lists.entry(key.to_string()).or_default();
            list.push_back(value.to_vec());
            list.len()
        };
        self.pushed.notify_waiters();
        Ok(PushAck::Length(len as i64))
    }

    async fn pop_front(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.pop_now(key)
    }

    async fn blocking_pop_front(
        &self,
        key: &str,
        timeout_secs: u64,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        // A deadline past what the clock can represent waits without one
        let deadline = (timeout_secs > 0)
            .then(|| Instant::now().checked_add(Duration::from_secs(timeout_secs)))
            .flatten();

        loop {
            // Register before checking so a push in between is not missed
            let notified = self.pushed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(value) = self.pop_now(key)? {
                return Ok(Some(value));
            }

            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, notified).await.is_err() {
                        return Ok(None);
                    }
                }
                None => notified.await,
            }
        }
    }

    async fn len(&self, key: &str) -> Result<u64, StoreError> {
        Ok(self.lock()?.get(key).map_or(0, |list| list.len() as u64))
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        Ok(u64::from(self.lock()?.remove(key).is_some()))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lock()?
            .keys()
            .filter(|key| glob_match(pattern.as_bytes(), key.as_bytes()))
            .cloned()
            .collect())
    }
}

/// Glob matching with `*` (any run) and `?` (any single byte)
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(b'*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == b'?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((sp, st)) => {
                    p = sp + 1;
                    t = st + 1;
                    star = Some((sp, st + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == b'*')
}
