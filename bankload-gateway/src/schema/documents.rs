use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub url: Url,
    pub document: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetTariffDocumentResponse {
    pub tariff: Document,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetContractDocumentResponse {
    pub contract: Document,
}
