use serde::Deserialize;

use crate::client::LinearClient;
use crate::error::Result;
use crate::lenient;
use crate::queries::GET_VIEWER_QUERY;
use crate::responses::required;
use crate::types::User;

#[derive(Deserialize)]
struct ViewerResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    viewer: Option<User>,
}

impl LinearClient {
    /// The user the API key belongs to.
    pub async fn get_viewer(&self) -> Result<User> {
        let response: ViewerResponse = self.query("GetViewer", GET_VIEWER_QUERY, None).await?;

        required(response.viewer, "GetViewer", "viewer")
    }
}
