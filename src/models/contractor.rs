use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractorRequest {
    pub email: String,
    pub company_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}
