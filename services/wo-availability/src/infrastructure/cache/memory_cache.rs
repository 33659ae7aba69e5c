//! 进程内缓存（单节点部署、测试）
//!
//! 写入时顺带清掉所有已过期条目，不再读取的键也不会一直占内存。

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use monopilot_errors::AppResult;
use monopilot_ports::CachePort;
use parking_lot::Mutex;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前持有的条目数（含尚未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CachePort for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| now + ttl),
        };

        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.is_live(now));
        entries.insert(key.to_string(), entry);
        Ok(())
    }
}
