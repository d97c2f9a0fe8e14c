use super::cards::Card;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Deposit,
    Savings,
    DebitCard,
    CreditCard,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Deposit,
        AccountType::Savings,
        AccountType::DebitCard,
        AccountType::CreditCard,
    ];

    /// Path segment of the matching `open-*-account` endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            AccountType::Deposit => "deposit",
            AccountType::Savings => "savings",
            AccountType::DebitCard => "debit-card",
            AccountType::CreditCard => "credit-card",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    PendingClosure,
    Closed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub cards: Vec<Card>,
    pub status: AccountStatus,
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountsQuery {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetAccountsResponse {
    pub accounts: Vec<Account>,
}

/// Body of every `open-*-account` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAccountRequest {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenAccountResponse {
    pub account: Account,
}
