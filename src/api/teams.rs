use serde::Deserialize;

use crate::client::LinearClient;
use crate::error::Result;
use crate::lenient;
use crate::queries::GET_TEAMS_QUERY;
use crate::responses::{required, Connection};
use crate::types::Team;

#[derive(Deserialize)]
struct TeamsResponse {
    #[serde(default, deserialize_with = "lenient::optional")]
    teams: Option<Connection<Team>>,
}

impl LinearClient {
    pub async fn get_teams(&self) -> Result<Vec<Team>> {
        let response: TeamsResponse = self.query("GetTeams", GET_TEAMS_QUERY, None).await?;

        required(response.teams, "GetTeams", "teams")?.into_nodes("GetTeams")
    }
}
