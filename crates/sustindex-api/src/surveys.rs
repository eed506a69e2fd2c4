use sustindex_core::ids::SurveyId;
use sustindex_core::models::question::Question;
use sustindex_core::models::survey::Survey;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Active surveys, bare or paginated.
    pub async fn list_surveys(&self) -> Result<Vec<Survey>, ApiError> {
        self.get_listing("surveys/").await
    }

    /// The ordered question list for one survey.
    pub async fn survey_questions(&self, survey: SurveyId) -> Result<Vec<Question>, ApiError> {
        self.get_listing(&format!("surveys/{survey}/questions/"))
            .await
    }
}
