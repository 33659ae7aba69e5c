#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use monopilot_common::TenantId;
use monopilot_errors::{AppError, AppResult};
use monopilot_ports::CachePort;
use parking_lot::Mutex;
use uuid::Uuid;

use wo_availability::application::{AvailabilityHandler, SettingsGate, SnapshotCache};
use wo_availability::domain::{
    InventoryLot, InventoryLotRepository, LotStatus, MaterialCheckSettingRepository, ProductId,
    ReservationClaim, ReservationRepository, WoMaterialId, WorkOrder, WorkOrderId,
    WorkOrderMaterialLine, WorkOrderRepository, WorkOrderStatus,
};
use wo_availability::infrastructure::cache::MemoryCache;

pub const STORE_FAILURE: &str = "connection refused by license_plates backend";

/// 内存版后端存储，同时实现四个仓储接口
#[derive(Default)]
pub struct MockStore {
    work_orders: Mutex<HashMap<WorkOrderId, WorkOrder>>,
    materials: Mutex<HashMap<WorkOrderId, Vec<WorkOrderMaterialLine>>>,
    lots: Mutex<HashMap<(TenantId, ProductId), Vec<InventoryLot>>>,
    reservations: Mutex<Vec<(TenantId, ReservationClaim)>>,
    settings: Mutex<HashMap<TenantId, bool>>,
    fail_inventory: AtomicBool,
    store_calls: AtomicUsize,
    lot_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_work_order(&self, tenant_id: TenantId, status: WorkOrderStatus) -> WorkOrderId {
        let id = WorkOrderId(Uuid::new_v4());
        let number = format!("WO-{}", self.work_orders.lock().len() + 1);
        self.work_orders.lock().insert(
            id,
            WorkOrder {
                id,
                tenant_id,
                wo_number: number,
                status,
            },
        );
        id
    }

    /// 新增一条物料行，返回新产品 ID
    pub fn add_material(&self, wo_id: WorkOrderId, code: &str, required_qty: f64) -> ProductId {
        let product_id = ProductId(Uuid::new_v4());
        self.add_material_for(wo_id, product_id, code, required_qty);
        product_id
    }

    pub fn add_material_for(
        &self,
        wo_id: WorkOrderId,
        product_id: ProductId,
        code: &str,
        required_qty: f64,
    ) {
        let mut materials = self.materials.lock();
        let lines = materials.entry(wo_id).or_default();
        let sequence = lines.len() as i32 + 1;
        lines.push(WorkOrderMaterialLine {
            id: WoMaterialId(Uuid::new_v4()),
            wo_id,
            product_id,
            product_code: code.to_string(),
            product_name: format!("{} name", code),
            required_qty,
            uom: "kg".to_string(),
            sequence,
        });
    }

    pub fn add_lot(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
        quantity: f64,
        expiry_date: Option<NaiveDate>,
    ) {
        self.add_lot_with_status(tenant_id, product_id, quantity, expiry_date, LotStatus::Available);
    }

    pub fn add_lot_with_status(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
        quantity: f64,
        expiry_date: Option<NaiveDate>,
        status: LotStatus,
    ) {
        self.lots
            .lock()
            .entry((tenant_id, product_id))
            .or_default()
            .push(InventoryLot {
                product_id,
                quantity,
                uom: "kg".to_string(),
                expiry_date,
                status,
            });
    }

    pub fn add_reservation(
        &self,
        tenant_id: TenantId,
        wo_id: WorkOrderId,
        product_id: ProductId,
        reserved_qty: f64,
        consumed_qty: f64,
    ) {
        self.reservations.lock().push((
            tenant_id,
            ReservationClaim {
                wo_id,
                product_id,
                reserved_qty,
                consumed_qty,
            },
        ));
    }

    pub fn set_check_enabled(&self, tenant_id: TenantId, enabled: bool) {
        self.settings.lock().insert(tenant_id, enabled);
    }

    pub fn fail_inventory(&self, fail: bool) {
        self.fail_inventory.store(fail, Ordering::SeqCst);
    }

    /// 所有仓储调用次数
    pub fn store_calls(&self) -> usize {
        self.store_calls.load(Ordering::SeqCst)
    }

    pub fn lot_calls(&self) -> usize {
        self.lot_calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.store_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkOrderRepository for MockStore {
    async fn find_by_id(
        &self,
        id: &WorkOrderId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<WorkOrder>> {
        self.touch();
        Ok(self
            .work_orders
            .lock()
            .get(id)
            .filter(|wo| wo.tenant_id == *tenant_id)
            .cloned())
    }

    async fn find_materials(&self, wo_id: &WorkOrderId) -> AppResult<Vec<WorkOrderMaterialLine>> {
        self.touch();
        Ok(self.materials.lock().get(wo_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl InventoryLotRepository for MockStore {
    async fn find_usable_lots(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Vec<InventoryLot>> {
        self.touch();
        self.lot_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inventory.load(Ordering::SeqCst) {
            return Err(AppError::database(STORE_FAILURE));
        }
        Ok(self
            .lots
            .lock()
            .get(&(*tenant_id, *product_id))
            .map(|lots| {
                lots.iter()
                    .filter(|lot| lot.status.is_usable())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl ReservationRepository for MockStore {
    async fn reserved_by_others(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        excluding_wo: &WorkOrderId,
    ) -> AppResult<f64> {
        self.touch();
        let work_orders = self.work_orders.lock();
        let reservations = self.reservations.lock();

        let claims: Vec<&ReservationClaim> = reservations
            .iter()
            .filter(|(tenant, claim)| {
                tenant == tenant_id
                    && claim.product_id == *product_id
                    && claim.wo_id != *excluding_wo
                    && work_orders
                        .get(&claim.wo_id)
                        .is_some_and(|wo| wo.status.is_active())
            })
            .map(|(_, claim)| claim)
            .collect();

        Ok(ReservationClaim::total_remaining(claims))
    }
}

#[async_trait]
impl MaterialCheckSettingRepository for MockStore {
    async fn find(&self, tenant_id: &TenantId) -> AppResult<Option<bool>> {
        self.touch();
        Ok(self.settings.lock().get(tenant_id).copied())
    }
}

/// 读写都失败的缓存后端
pub struct BrokenCache;

#[async_trait]
impl CachePort for BrokenCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::internal("cache unavailable"))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> AppResult<()> {
        Err(AppError::internal("cache unavailable"))
    }
}

pub fn handler_with_cache(
    store: Arc<MockStore>,
    cache: Arc<dyn CachePort>,
    ttl: Duration,
) -> AvailabilityHandler {
    AvailabilityHandler::new(
        store.clone(),
        store.clone(),
        store.clone(),
        SettingsGate::new(store, true),
        SnapshotCache::new(cache, ttl),
    )
}

pub fn handler(store: Arc<MockStore>) -> AvailabilityHandler {
    handler_with_cache(store, Arc::new(MemoryCache::new()), Duration::from_secs(30))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}
