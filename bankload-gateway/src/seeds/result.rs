use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCardResult {
    pub card_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOperationResult {
    pub operation_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccountResult {
    pub account_id: String,
    pub physical_cards: Vec<SeedCardResult>,
    pub virtual_cards: Vec<SeedCardResult>,
    pub top_up_operations: Vec<SeedOperationResult>,
    pub purchase_operations: Vec<SeedOperationResult>,
    pub transfer_operations: Vec<SeedOperationResult>,
    pub cash_withdrawal_operations: Vec<SeedOperationResult>,
}

impl SeedAccountResult {
    /// First card of the account, physical cards first.
    pub fn card_id(&self) -> Option<&str> {
        self.physical_cards
            .iter()
            .chain(&self.virtual_cards)
            .map(|card| card.card_id.as_str())
            .next()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUserResult {
    pub user_id: String,
    pub deposit_accounts: Vec<SeedAccountResult>,
    pub savings_accounts: Vec<SeedAccountResult>,
    pub debit_card_accounts: Vec<SeedAccountResult>,
    pub credit_card_accounts: Vec<SeedAccountResult>,
}

impl SeedUserResult {
    pub fn accounts(&self) -> impl Iterator<Item = &SeedAccountResult> {
        self.deposit_accounts
            .iter()
            .chain(&self.savings_accounts)
            .chain(&self.debit_card_accounts)
            .chain(&self.credit_card_accounts)
    }
}

/// Identifiers created by one seeding run.
///
/// Equality and serialization only consider `users`; the cursor behind
/// [`SeedsResult::next_user`] is runtime state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeedsResult {
    pub users: Vec<SeedUserResult>,
    #[serde(skip)]
    cursor: AtomicUsize,
}

impl SeedsResult {
    pub fn new(users: Vec<SeedUserResult>) -> Self {
        Self {
            users,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Hands users out round-robin. Safe to call from every virtual user.
    pub fn next_user(&self) -> Option<&SeedUserResult> {
        if self.users.is_empty() {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.users.get(index % self.users.len())
    }

    pub fn random_user(&self) -> Option<&SeedUserResult> {
        self.users.choose(&mut rand::thread_rng())
    }
}

impl Clone for SeedsResult {
    fn clone(&self) -> Self {
        Self::new(self.users.clone())
    }
}

impl PartialEq for SeedsResult {
    fn eq(&self, other: &Self) -> bool {
        self.users == other.users
    }
}

impl Eq for SeedsResult {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn account(id: &str) -> SeedAccountResult {
        SeedAccountResult {
            account_id: id.to_string(),
            physical_cards: vec![],
            virtual_cards: vec![SeedCardResult {
                card_id: format!("{id}-card"),
            }],
            top_up_operations: vec![SeedOperationResult {
                operation_id: format!("{id}-top-up"),
            }],
            purchase_operations: vec![],
            transfer_operations: vec![],
            cash_withdrawal_operations: vec![],
        }
    }

    pub(crate) fn user(id: &str) -> SeedUserResult {
        SeedUserResult {
            user_id: id.to_string(),
            deposit_accounts: vec![],
            savings_accounts: vec![],
            debit_card_accounts: vec![],
            credit_card_accounts: vec![account(&format!("{id}-credit"))],
        }
    }

    #[test]
    fn next_user_cycles() {
        let result = SeedsResult::new(vec![user("a"), user("b")]);
        let ids: Vec<_> = (0..5)
            .map(|_| result.next_user().unwrap().user_id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn empty_result_has_no_users() {
        let result = SeedsResult::default();
        assert!(result.next_user().is_none());
        assert!(result.random_user().is_none());
    }

    #[test]
    fn random_user_is_seeded_user() {
        let result = SeedsResult::new(vec![user("a"), user("b")]);
        let picked = result.random_user().unwrap();
        assert!(result.users.contains(picked));
    }

    #[test]
    fn equality_ignores_cursor() {
        let result = SeedsResult::new(vec![user("a")]);
        result.next_user();
        assert_eq!(result, result.clone());
    }

    #[test]
    fn card_prefers_physical() {
        let mut account = account("acc");
        assert_eq!(account.card_id(), Some("acc-card"));
        account.physical_cards.push(SeedCardResult {
            card_id: "physical".to_string(),
        });
        assert_eq!(account.card_id(), Some("physical"));
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let mut value = serde_json::to_value(SeedsResult::new(vec![user("a")])).unwrap();
        value["users"][0]
            .as_object_mut()
            .unwrap()
            .remove("savings_accounts");
        assert!(serde_json::from_value::<SeedsResult>(value).is_err());
    }
}
