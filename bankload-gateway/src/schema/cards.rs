use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Virtual,
    Physical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Frozen,
    Closed,
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardPaymentSystem {
    Visa,
    Mastercard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub pin: String,
    pub cvv: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub status: CardStatus,
    pub account_id: String,
    pub card_number: String,
    pub card_holder: String,
    /// `YYYY-MM-DD`
    pub expiry_date: String,
    pub payment_system: CardPaymentSystem,
}

/// Body of both `issue-virtual-card` and `issue-physical-card`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCardRequest {
    pub user_id: String,
    pub account_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IssueCardResponse {
    pub card: Card,
}
