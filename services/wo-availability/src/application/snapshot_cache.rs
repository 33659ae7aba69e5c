//! 可用性快照缓存
//!
//! 键按租户隔离：`org:{tenant_id}:wo:{wo_id}:availability`。
//! 缓存只用于削减轮询压力，读写失败都降级为未命中，不影响请求结果。

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use monopilot_common::TenantId;
use monopilot_ports::CachePort;
use tracing::{debug, warn};

use super::dto::AvailabilityResponse;
use crate::domain::WorkOrderId;

pub struct SnapshotCache {
    backend: Arc<dyn CachePort>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(backend: Arc<dyn CachePort>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    pub fn key(tenant_id: &TenantId, wo_id: &WorkOrderId) -> String {
        format!("org:{}:wo:{}:availability", tenant_id, wo_id)
    }

    fn ttl_delta(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.ttl.as_millis() as i64)
    }

    /// 快照的过期时刻
    pub fn expires_at(&self, checked_at: DateTime<Utc>) -> DateTime<Utc> {
        checked_at + self.ttl_delta()
    }

    /// 读取未过期的快照，返回值已标记 `cached: true`
    pub async fn get(
        &self,
        tenant_id: &TenantId,
        wo_id: &WorkOrderId,
        now: DateTime<Utc>,
    ) -> Option<AvailabilityResponse> {
        let key = Self::key(tenant_id, wo_id);

        let raw = match self.backend.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Snapshot cache read failed, recomputing");
                return None;
            }
        };

        let snapshot: AvailabilityResponse = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable snapshot");
                return None;
            }
        };

        // 后端 TTL 精度是秒，这里按 checked_at 再判一次
        if now - snapshot.checked_at >= self.ttl_delta() {
            debug!(key = %key, "Snapshot older than TTL");
            return None;
        }

        Some(snapshot.mark_cached())
    }

    /// 覆盖写入快照，失败只记日志
    pub async fn put(
        &self,
        tenant_id: &TenantId,
        wo_id: &WorkOrderId,
        response: &AvailabilityResponse,
    ) {
        let key = Self::key(tenant_id, wo_id);

        let raw = match serde_json::to_string(response) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode snapshot");
                return;
            }
        };

        if let Err(e) = self.backend.set(&key, &raw, Some(self.ttl)).await {
            warn!(key = %key, error = %e, "Snapshot cache write failed");
        }
    }
}
