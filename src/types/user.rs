use serde::{Deserialize, Serialize};

use crate::lenient;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct User {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
}
