use serde::Serialize;

use super::{
    client::ApiClient,
    envelope::{ScheduleMap, ScheduleMonthEnvelope},
    types::{
        ApiError, ApplyTemplateResult, ApplyTemplateRequest, ConflictInfo, ConflictQuery,
        CopyScheduleRequest, ScheduleEntry, SchedulePayload, ShiftTemplate, ShiftTemplatePayload,
        ShiftType,
    },
};
use serde_json::Value;

#[derive(Serialize)]
struct MonthQuery {
    year: i32,
    month: u32,
}

#[derive(Serialize)]
struct ShiftTypeQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<bool>,
}

impl ApiClient {
    pub async fn month_schedules(&self, year: i32, month: u32) -> Result<ScheduleMap, ApiError> {
        let envelope: ScheduleMonthEnvelope = self
            .get_json_with_query("/schedules", &MonthQuery { year, month })
            .await?;
        Ok(envelope.into_month(year, month))
    }

    pub async fn create_schedule(&self, payload: &SchedulePayload) -> Result<ScheduleEntry, ApiError> {
        self.post_json("/schedules", payload).await
    }

    pub async fn update_schedule(
        &self,
        id: i64,
        payload: &SchedulePayload,
    ) -> Result<ScheduleEntry, ApiError> {
        self.put_json(&format!("/schedules/{}", id), payload).await
    }

    pub async fn delete_schedule(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/schedules/{}", id)).await
    }

    pub async fn batch_create_schedules(
        &self,
        schedules: &[SchedulePayload],
    ) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.post_json("/schedules/batch", schedules).await
    }

    pub async fn copy_schedules(&self, request: &CopyScheduleRequest) -> Result<Value, ApiError> {
        self.post_json("/schedules/copy", request).await
    }

    /// `Some` when the backend reports an overlapping entry.
    pub async fn check_schedule_conflict(
        &self,
        query: &ConflictQuery,
    ) -> Result<Option<ConflictInfo>, ApiError> {
        let conflicting: Option<ScheduleEntry> =
            self.get_json_with_query("/schedules/conflicts", query).await?;
        Ok(conflicting.map(|entry| ConflictInfo {
            conflicting_schedule_id: Some(entry.id),
            detail: format!(
                "{} 至 {} 已有排班{}",
                entry.start_date,
                entry.end_date,
                entry
                    .shift_type_name
                    .as_deref()
                    .map(|name| format!("（{}）", name))
                    .unwrap_or_default()
            ),
        }))
    }

    pub async fn list_shift_types(&self) -> Result<Vec<ShiftType>, ApiError> {
        self.get_list_with_query(
            "/shift_types",
            &ShiftTypeQuery {
                name: None,
                available: None,
            },
        )
        .await
    }

    pub async fn list_shift_templates(&self) -> Result<Vec<ShiftTemplate>, ApiError> {
        self.get_list("/shift_templates").await
    }

    pub async fn create_shift_template(
        &self,
        payload: &ShiftTemplatePayload,
    ) -> Result<ShiftTemplate, ApiError> {
        self.post_json("/shift_templates", payload).await
    }

    pub async fn update_shift_template(
        &self,
        id: i64,
        payload: &ShiftTemplatePayload,
    ) -> Result<ShiftTemplate, ApiError> {
        self.put_json(&format!("/shift_templates/{}", id), payload)
            .await
    }

    pub async fn delete_shift_template(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/shift_templates/{}", id)).await
    }

    pub async fn apply_shift_template(
        &self,
        request: &ApplyTemplateRequest,
    ) -> Result<ApplyTemplateResult, ApiError> {
        self.post_json("/shift_templates/apply", request).await
    }
}
