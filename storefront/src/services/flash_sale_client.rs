use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use storefront_core::{ApiClient, ApiRequest, ClientError};

use crate::flash_sale::{FlashSaleSlot, SlotSchedule};
use crate::models::FlashSale;

#[derive(Debug, Clone, Serialize)]
pub struct CurrentFlashSale {
    pub slot: FlashSaleSlot,
    pub sale: FlashSale,
}

#[derive(Clone)]
pub struct FlashSaleClient {
    api: Arc<ApiClient>,
    schedule: SlotSchedule,
}

impl FlashSaleClient {
    pub fn new(api: Arc<ApiClient>, schedule: SlotSchedule) -> Self {
        Self { api, schedule }
    }

    pub fn schedule(&self) -> &SlotSchedule {
        &self.schedule
    }

    /// Items for the running slot, or the next one. `None` when the schedule
    /// has no slots.
    pub async fn current(&self, now: DateTime<Utc>) -> Result<Option<CurrentFlashSale>, ClientError> {
        let Some(slot) = self.schedule.select_slot(now) else {
            return Ok(None);
        };

        let sale: FlashSale = self
            .api
            .send_json(
                ApiRequest::get("/flash-sales/current")
                    .anonymous()
                    .query("slot_start", slot.starts_at.to_rfc3339()),
            )
            .await?;

        Ok(Some(CurrentFlashSale { slot, sale }))
    }
}
