use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedCardsPlan {
    pub count: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOperationsPlan {
    pub count: usize,
}

/// Fixtures created inside every account of one kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedAccountsPlan {
    pub count: usize,
    pub physical_cards: SeedCardsPlan,
    pub virtual_cards: SeedCardsPlan,
    pub top_up_operations: SeedOperationsPlan,
    pub purchase_operations: SeedOperationsPlan,
    pub transfer_operations: SeedOperationsPlan,
    pub cash_withdrawal_operations: SeedOperationsPlan,
}

impl SeedAccountsPlan {
    pub fn accounts(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn with_physical_cards(mut self, count: usize) -> Self {
        self.physical_cards = SeedCardsPlan { count };
        self
    }

    pub fn with_virtual_cards(mut self, count: usize) -> Self {
        self.virtual_cards = SeedCardsPlan { count };
        self
    }

    pub fn with_top_up_operations(mut self, count: usize) -> Self {
        self.top_up_operations = SeedOperationsPlan { count };
        self
    }

    pub fn with_purchase_operations(mut self, count: usize) -> Self {
        self.purchase_operations = SeedOperationsPlan { count };
        self
    }

    pub fn with_transfer_operations(mut self, count: usize) -> Self {
        self.transfer_operations = SeedOperationsPlan { count };
        self
    }

    pub fn with_cash_withdrawal_operations(mut self, count: usize) -> Self {
        self.cash_withdrawal_operations = SeedOperationsPlan { count };
        self
    }

    pub(crate) fn operation_count(&self) -> usize {
        self.top_up_operations.count
            + self.purchase_operations.count
            + self.transfer_operations.count
            + self.cash_withdrawal_operations.count
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedUsersPlan {
    pub count: usize,
    pub deposit_accounts: SeedAccountsPlan,
    pub savings_accounts: SeedAccountsPlan,
    pub debit_card_accounts: SeedAccountsPlan,
    pub credit_card_accounts: SeedAccountsPlan,
}

/// Declarative description of the fixtures a scenario needs.
///
/// Plans read from JSON may omit any section; missing counts are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedsPlan {
    pub users: SeedUsersPlan,
}

impl SeedsPlan {
    pub fn users(count: usize) -> Self {
        Self {
            users: SeedUsersPlan {
                count,
                ..SeedUsersPlan::default()
            },
        }
    }

    pub fn with_deposit_accounts(mut self, plan: SeedAccountsPlan) -> Self {
        self.users.deposit_accounts = plan;
        self
    }

    pub fn with_savings_accounts(mut self, plan: SeedAccountsPlan) -> Self {
        self.users.savings_accounts = plan;
        self
    }

    pub fn with_debit_card_accounts(mut self, plan: SeedAccountsPlan) -> Self {
        self.users.debit_card_accounts = plan;
        self
    }

    pub fn with_credit_card_accounts(mut self, plan: SeedAccountsPlan) -> Self {
        self.users.credit_card_accounts = plan;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_sections_default_to_zero() {
        let plan: SeedsPlan = serde_json::from_value(json!({
            "users": {
                "count": 3,
                "credit_card_accounts": { "count": 1, "top_up_operations": { "count": 5 } }
            }
        }))
        .unwrap();

        assert_eq!(
            plan,
            SeedsPlan::users(3)
                .with_credit_card_accounts(SeedAccountsPlan::accounts(1).with_top_up_operations(5))
        );
        assert_eq!(plan.users.deposit_accounts, SeedAccountsPlan::default());
    }

    #[test]
    fn empty_document_is_empty_plan() {
        let plan: SeedsPlan = serde_json::from_str("{}").unwrap();
        assert_eq!(plan, SeedsPlan::default());
    }

    #[test]
    fn counts_operations() {
        let plan = SeedAccountsPlan::accounts(1)
            .with_top_up_operations(2)
            .with_purchase_operations(3)
            .with_cash_withdrawal_operations(1);
        assert_eq!(plan.operation_count(), 6);
    }
}
