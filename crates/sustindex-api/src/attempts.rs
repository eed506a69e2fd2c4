use reqwest::Method;
use tracing::{info, warn};

use sustindex_core::ids::{AttemptId, SurveyId};
use sustindex_core::models::attempt::{Attempt, CompletedAttempt, CreatedAttempt, NewAttempt};

use crate::client::{ApiClient, decode};
use crate::error::ApiError;

impl ApiClient {
    /// Start a new attempt at `survey` and return its id.
    ///
    /// The create endpoint does not always echo the primary key. When it is
    /// missing, the newest unfinished attempt for the same survey is used.
    pub async fn create_attempt(&self, survey: SurveyId) -> Result<AttemptId, ApiError> {
        let created: CreatedAttempt = self
            .send_json(Method::POST, "attempts/", &NewAttempt { survey })
            .await?;

        if let Some(id) = created.id {
            info!(attempt_id = %id, survey_id = %survey, "attempt created");
            return Ok(id);
        }

        warn!(survey_id = %survey, "attempt create response had no id, looking it up");
        self.my_attempts()
            .await?
            .into_iter()
            .find(|a| a.survey == Some(survey) && !a.is_completed)
            .map(|a| a.id)
            .ok_or(ApiError::MissingField("attempt id"))
    }

    /// The caller's attempts, newest first.
    pub async fn my_attempts(&self) -> Result<Vec<Attempt>, ApiError> {
        self.get_listing("attempts/my_attempts/").await
    }

    /// Full detail of one attempt, including answers and recommendations.
    pub async fn attempt(&self, id: AttemptId) -> Result<Attempt, ApiError> {
        self.get_json(&format!("attempts/{id}/")).await
    }

    /// Mark the attempt complete; the backend computes scores and grade.
    pub async fn complete_attempt(&self, id: AttemptId) -> Result<CompletedAttempt, ApiError> {
        info!(attempt_id = %id, "completing attempt");
        let resp = self
            .request(Method::POST, &format!("attempts/{id}/complete/"))?
            .send()
            .await?;
        decode(resp).await
    }
}
