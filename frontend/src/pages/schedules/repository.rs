use serde_json::Value;

use crate::api::{
    ApiClient, ApiError, ApplyTemplateRequest, ApplyTemplateResult, ConflictInfo, ConflictQuery,
    CopyScheduleRequest, Employee, ScheduleEntry, ScheduleMap, SchedulePayload, ShiftTemplate,
    ShiftType,
};

pub async fn fetch_month(api: &ApiClient, year: i32, month: u32) -> Result<ScheduleMap, ApiError> {
    api.month_schedules(year, month).await
}

/// Employees, shift types and templates for the schedule modal.
pub async fn fetch_options(
    api: &ApiClient,
) -> Result<(Vec<Employee>, Vec<ShiftType>, Vec<ShiftTemplate>), ApiError> {
    let (employees, shift_types, templates) = futures::join!(
        api.list_employees(),
        api.list_shift_types(),
        api.list_shift_templates()
    );
    // Missing shift types or templates only narrow the modal's choices.
    Ok((
        employees?,
        shift_types.unwrap_or_default(),
        templates.unwrap_or_default(),
    ))
}

pub async fn check_conflict(
    api: &ApiClient,
    payload: &SchedulePayload,
    schedule_id: Option<i64>,
) -> Result<Option<ConflictInfo>, ApiError> {
    api.check_schedule_conflict(&ConflictQuery {
        employee_id: payload.employee_id,
        start_date: payload.start_date,
        end_date: payload.end_date,
        schedule_id,
    })
    .await
}

/// Creates (or updates, with `schedule_id`) only when no overlap is
/// reported; the conflict comes back as the inner `Err`.
pub async fn save_unless_conflict(
    api: &ApiClient,
    schedule_id: Option<i64>,
    payload: &SchedulePayload,
) -> Result<Result<ScheduleEntry, ConflictInfo>, ApiError> {
    if let Some(conflict) = check_conflict(api, payload, schedule_id).await? {
        return Ok(Err(conflict));
    }
    let saved = match schedule_id {
        Some(id) => api.update_schedule(id, payload).await?,
        None => api.create_schedule(payload).await?,
    };
    Ok(Ok(saved))
}

pub async fn remove(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete_schedule(id).await
}

pub async fn create_batch(
    api: &ApiClient,
    payloads: &[SchedulePayload],
) -> Result<Vec<ScheduleEntry>, ApiError> {
    api.batch_create_schedules(payloads).await
}

pub async fn apply_template(
    api: &ApiClient,
    request: &ApplyTemplateRequest,
) -> Result<ApplyTemplateResult, ApiError> {
    api.apply_shift_template(request).await
}

pub async fn copy(api: &ApiClient, request: &CopyScheduleRequest) -> Result<Value, ApiError> {
    api.copy_schedules(request).await
}

/// Posts rows one at a time; returns `(created, failed)`. Earlier rows are
/// kept when a later one fails.
pub async fn import_rows(api: &ApiClient, rows: &[SchedulePayload]) -> (usize, usize) {
    let mut created = 0;
    let mut failed = 0;
    for row in rows {
        match api.create_schedule(row).await {
            Ok(_) => created += 1,
            Err(error) => {
                log::warn!("schedule import row failed: {}", error);
                failed += 1;
            }
        }
    }
    (created, failed)
}
