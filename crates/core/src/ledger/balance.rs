//! Account balance calculations.
//!
//! Balances are reported in the account's normal direction:
//! - Debit-normal (asset, expense, contra liability): balance = debit - credit
//! - Credit-normal (liability, equity, revenue, contra asset): balance = credit - debit

use fibu_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountType};
use super::error::{LedgerError, LedgerResult};

/// Side on which an account's balance normally grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Soll.
    Debit,
    /// Haben.
    Credit,
}

impl NormalBalance {
    /// Balance for the given totals, signed in this direction.
    #[must_use]
    pub fn balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Raw debit/credit sums for one account, as aggregated by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountTotals {
    /// The account.
    pub account_id: AccountId,
    /// Sum of debit amounts.
    pub debit_total: Decimal,
    /// Sum of credit amounts.
    pub credit_total: Decimal,
}

impl AccountTotals {
    /// Zero totals for an account.
    #[must_use]
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
        }
    }

    /// Adds one line's amounts.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if either sum leaves the `Decimal` range; the
    /// totals are unchanged in that case.
    pub fn add(&mut self, debit: Decimal, credit: Decimal) -> LedgerResult<()> {
        let overflow = || {
            LedgerError::Validation(format!("totals for account {} overflow", self.account_id))
        };
        let debit_total = self.debit_total.checked_add(debit).ok_or_else(overflow)?;
        let credit_total = self.credit_total.checked_add(credit).ok_or_else(overflow)?;
        self.debit_total = debit_total;
        self.credit_total = credit_total;
        Ok(())
    }
}

/// One row of the trial balance (Summen- und Saldenliste).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Account number.
    pub account_number: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// Net balance in the account's normal direction.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Combines an account with its aggregated totals.
    #[must_use]
    pub fn from_totals(account: &Account, totals: &AccountTotals) -> Self {
        Self {
            account_id: account.id,
            account_number: account.account_number.clone(),
            account_name: account.account_name.clone(),
            account_type: account.account_type,
            debit_total: totals.debit_total,
            credit_total: totals.credit_total,
            balance: account
                .account_type
                .normal_balance()
                .balance(totals.debit_total, totals.credit_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::{AccountClass, NewAccount};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn account(t: AccountType, c: AccountClass) -> Account {
        Account::create(
            NewAccount {
                account_number: "0998".to_string(),
                account_name: "Test".to_string(),
                account_type: t,
                account_class: c,
                description: None,
                tax_relevant: false,
                tax_code: None,
            },
            AccountId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_normal_balance_direction() {
        assert_eq!(NormalBalance::Debit.balance(dec!(500.00), dec!(120.00)), dec!(380.00));
        assert_eq!(NormalBalance::Credit.balance(dec!(500.00), dec!(120.00)), dec!(-380.00));
    }

    #[test]
    fn test_totals_accumulate() {
        let mut totals = AccountTotals::new(AccountId::new());
        totals.add(dec!(100.00), Decimal::ZERO).unwrap();
        totals.add(Decimal::ZERO, dec!(40.50)).unwrap();
        totals.add(dec!(0.50), Decimal::ZERO).unwrap();

        assert_eq!(totals.debit_total, dec!(100.50));
        assert_eq!(totals.credit_total, dec!(40.50));
    }

    #[test]
    fn test_contra_asset_is_credit_normal() {
        let wb = account(AccountType::ContraAsset, AccountClass::CurrentAsset);
        let mut totals = AccountTotals::new(wb.id);
        totals.add(Decimal::ZERO, dec!(250.00)).unwrap();

        let row = AccountBalance::from_totals(&wb, &totals);
        assert_eq!(row.balance, dec!(250.00));
    }

    #[test]
    fn test_expense_is_debit_normal() {
        let miete = account(AccountType::Expense, AccountClass::OperatingExpense);
        let mut totals = AccountTotals::new(miete.id);
        totals.add(dec!(1200.00), Decimal::ZERO).unwrap();
        totals.add(Decimal::ZERO, dec!(200.00)).unwrap();

        let row = AccountBalance::from_totals(&miete, &totals);
        assert_eq!(row.debit_total, dec!(1200.00));
        assert_eq!(row.credit_total, dec!(200.00));
        assert_eq!(row.balance, dec!(1000.00));
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let mut totals = AccountTotals::new(AccountId::new());
        totals.add(Decimal::MAX, Decimal::ZERO).unwrap();

        let result = totals.add(dec!(1.00), Decimal::ZERO);
        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert_eq!(totals.debit_total, Decimal::MAX);
    }
}
