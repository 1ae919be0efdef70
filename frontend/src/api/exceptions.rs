use super::{
    client::ApiClient,
    types::{ApiError, ExceptionRule, ExceptionRulePayload},
};

impl ApiClient {
    pub async fn list_exception_rules(&self) -> Result<Vec<ExceptionRule>, ApiError> {
        self.get_list("/exception-rules").await
    }

    pub async fn create_exception_rule(
        &self,
        payload: &ExceptionRulePayload,
    ) -> Result<ExceptionRule, ApiError> {
        self.post_json("/exception-rules", payload).await
    }

    pub async fn update_exception_rule(
        &self,
        id: i64,
        payload: &ExceptionRulePayload,
    ) -> Result<ExceptionRule, ApiError> {
        self.put_json(&format!("/exception-rules/{}", id), payload)
            .await
    }

    pub async fn delete_exception_rule(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/exception-rules/{}", id)).await
    }
}
