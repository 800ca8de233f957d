//! Property-based tests for the journal entry aggregate.
//!
//! - Posting succeeds exactly when debits equal credits
//! - A reversal cancels the original's net effect on every account
//! - Every line has exactly one nonzero side

use chrono::{NaiveDate, Utc};
use fibu_shared::types::{AccountId, JournalEntryId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use super::account::{Account, AccountClass, AccountType, NewAccount};
use super::entry::{CreateJournalEntry, JournalEntry};
use super::error::LedgerError;
use super::line::JournalEntryLine;
use super::types::{EntryStatus, EntryType};

/// Strategy for generating account IDs.
fn arb_account_id() -> impl Strategy<Value = AccountId> {
    any::<u128>().prop_map(|n| AccountId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating positive cent amounts (0.01 to 10,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Debit lines on random accounts plus one credit line that balances them.
fn arb_balanced_lines() -> impl Strategy<Value = Vec<JournalEntryLine>> {
    (
        prop::collection::vec((arb_account_id(), arb_amount()), 1..6),
        arb_account_id(),
    )
        .prop_map(|(debits, credit_account)| {
            let total: Decimal = debits.iter().map(|(_, amount)| *amount).sum();
            let mut lines: Vec<JournalEntryLine> = debits
                .into_iter()
                .map(|(account, amount)| JournalEntryLine::debit(account, amount).unwrap())
                .collect();
            lines.push(JournalEntryLine::credit(credit_account, total).unwrap());
            lines
        })
}

fn input(lines: Vec<JournalEntryLine>) -> CreateJournalEntry {
    CreateJournalEntry {
        entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        description: "Property".to_string(),
        notes: None,
        entry_type: EntryType::Manual,
        lines,
    }
}

/// Active accounts for every ID the lines reference.
fn chart_for(lines: &[JournalEntryLine]) -> HashMap<AccountId, Account> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let account = Account::create(
                NewAccount {
                    account_number: format!("{:04}", i + 1),
                    account_name: format!("Konto {i}"),
                    account_type: AccountType::Asset,
                    account_class: AccountClass::CurrentAsset,
                    description: None,
                    tax_relevant: false,
                    tax_code: None,
                },
                line.account_id(),
                Utc::now(),
            )
            .unwrap();
            (account.id, account)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_balanced_entries_post(lines in arb_balanced_lines()) {
        let accounts = chart_for(&lines);
        let mut entry = JournalEntry::create(input(lines), JournalEntryId::new(), 1, Utc::now()).unwrap();

        prop_assert_eq!(entry.total_debit, entry.total_credit);
        prop_assert!(entry.post(&accounts, Utc::now()).is_ok());
        prop_assert_eq!(entry.status, EntryStatus::Posted);
    }

    #[test]
    fn prop_unbalanced_entries_rejected(
        lines in arb_balanced_lines(),
        extra in arb_amount(),
        account in arb_account_id(),
    ) {
        let mut lines = lines;
        lines.push(JournalEntryLine::debit(account, extra).unwrap());

        let result = JournalEntry::create(input(lines), JournalEntryId::new(), 1, Utc::now());
        prop_assert!(matches!(result, Err(LedgerError::UnbalancedEntry { .. })), "unbalanced entry was accepted");
    }

    #[test]
    fn prop_reversal_cancels_net_effect(lines in arb_balanced_lines()) {
        let accounts = chart_for(&lines);
        let mut entry = JournalEntry::create(input(lines), JournalEntryId::new(), 1, Utc::now()).unwrap();
        entry.post(&accounts, Utc::now()).unwrap();

        let reversal = entry.reverse("Storno", JournalEntryId::new(), 2, Utc::now()).unwrap();

        prop_assert!(reversal.is_balanced());
        prop_assert_eq!(reversal.lines.len(), entry.lines.len());
        let mirror = reversal.net_effect();
        for (account_id, amount) in entry.net_effect() {
            prop_assert_eq!(amount + mirror[&account_id], Decimal::ZERO);
        }
    }

    #[test]
    fn prop_line_sides_exclusive(debit in 0i64..10_000, credit in 0i64..10_000) {
        let debit = Decimal::new(debit, 2);
        let credit = Decimal::new(credit, 2);

        match JournalEntryLine::new(AccountId::new(), debit, credit, None) {
            Ok(line) => {
                prop_assert!(line.debit_amount().is_zero() != line.credit_amount().is_zero());
            }
            Err(LedgerError::InvalidLineAmount(_)) => {
                prop_assert!(debit.is_zero() == credit.is_zero());
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
