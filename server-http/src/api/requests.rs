use serde::Deserialize;

// Missing fields deserialize as empty strings so the service reports them
// as validation errors instead of the extractor rejecting the body.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub holder_name: String,
    #[serde(default)]
    pub cpf: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub holder_name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListAccountsQuery {
    #[serde(default)]
    pub status: Option<String>,
}
