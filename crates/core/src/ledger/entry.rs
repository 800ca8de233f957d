//! Journal entry aggregate.
//!
//! A journal entry (Buchungssatz) owns its lines and enforces the double-entry
//! invariant: the sum of debits equals the sum of credits. Entries move through
//! `draft → posted → reversed`; every transition goes through a method here.

use chrono::{DateTime, NaiveDate, Utc};
use fibu_shared::types::{AccountId, JournalEntryId, MAX_AMOUNT, within_amount_limit};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::account::Account;
use super::error::{LedgerError, LedgerResult};
use super::line::JournalEntryLine;
use super::types::{EntryStatus, EntryTotals, EntryType};

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntry {
    /// Booking date.
    pub entry_date: NaiveDate,
    /// Booking text.
    pub description: String,
    /// Internal notes.
    pub notes: Option<String>,
    /// Origin of the entry.
    pub entry_type: EntryType,
    /// Lines in display order.
    pub lines: Vec<JournalEntryLine>,
}

impl CreateJournalEntry {
    /// Checks the entry rules that do not need the chart of accounts.
    ///
    /// Checks run in this order:
    /// 1. Description is not blank
    /// 2. Entry type is not `reversal` (those come from reversing)
    /// 3. At least 2 lines
    /// 4. Both sums stay within `MAX_AMOUNT`
    /// 5. Debits equal credits
    pub fn validate(&self) -> LedgerResult<EntryTotals> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        if self.entry_type == EntryType::Reversal {
            return Err(LedgerError::Validation(
                "reversal entries are created by reversing a posted entry".to_string(),
            ));
        }
        if self.lines.len() < 2 {
            return Err(LedgerError::InsufficientLines(self.lines.len()));
        }
        let totals = totals_of(&self.lines)?;
        if !totals.is_balanced() {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.debit,
                credit: totals.credit,
            });
        }
        Ok(totals)
    }

    /// Distinct accounts referenced by the lines, in first-use order.
    #[must_use]
    pub fn referenced_accounts(&self) -> Vec<AccountId> {
        distinct_accounts(&self.lines)
    }
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Sequential number, assigned at creation.
    pub entry_number: u64,
    /// Booking date.
    pub entry_date: NaiveDate,
    /// Booking text.
    pub description: String,
    /// Internal notes.
    pub notes: Option<String>,
    /// Origin of the entry.
    pub entry_type: EntryType,
    /// Lines in display order.
    pub lines: Vec<JournalEntryLine>,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// Cached sum of debits.
    pub total_debit: Decimal,
    /// Cached sum of credits.
    pub total_credit: Decimal,
    /// Set when posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// Set when reversed.
    pub reversed_at: Option<DateTime<Utc>>,
    /// Why the entry was reversed.
    pub reversal_reason: Option<String>,
    /// The entry that reversed this one.
    pub reversed_by: Option<JournalEntryId>,
    /// On a reversal entry: the entry it cancels.
    pub reverses: Option<JournalEntryId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Creates a draft entry from validated input.
    ///
    /// The input is validated again here so a draft can never be built
    /// from an unbalanced set of lines.
    pub fn create(
        input: CreateJournalEntry,
        id: JournalEntryId,
        entry_number: u64,
        now: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        let totals = input.validate()?;

        Ok(Self {
            id,
            entry_number,
            entry_date: input.entry_date,
            description: input.description.trim().to_string(),
            notes: input
                .notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            entry_type: input.entry_type,
            lines: input.lines,
            status: EntryStatus::Draft,
            total_debit: totals.debit,
            total_credit: totals.credit,
            posted_at: None,
            reversed_at: None,
            reversal_reason: None,
            reversed_by: None,
            reverses: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Recomputed debit and credit sums.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineAmount` if a sum exceeds the amount limit.
    pub fn totals(&self) -> LedgerResult<EntryTotals> {
        totals_of(&self.lines)
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.totals().is_ok_and(|t| t.is_balanced())
    }

    /// Distinct accounts referenced by the lines, in first-use order.
    #[must_use]
    pub fn referenced_accounts(&self) -> Vec<AccountId> {
        distinct_accounts(&self.lines)
    }

    /// Signed effect per account (debit minus credit).
    #[must_use]
    pub fn net_effect(&self) -> BTreeMap<AccountId, Decimal> {
        let mut effect = BTreeMap::new();
        for line in &self.lines {
            *effect.entry(line.account_id()).or_insert(Decimal::ZERO) += line.net_amount();
        }
        effect
    }

    /// Transitions `draft → posted`.
    ///
    /// `accounts` must contain every account the lines reference.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the entry is a draft
    /// - `UnbalancedEntry` if the lines no longer balance
    /// - `AccountNotFound` if a referenced account is missing from `accounts`
    /// - `InactiveAccountReferenced` if a referenced account is inactive
    pub fn post(
        &mut self,
        accounts: &HashMap<AccountId, Account>,
        now: DateTime<Utc>,
    ) -> LedgerResult<()> {
        if self.status != EntryStatus::Draft {
            return Err(LedgerError::InvalidStateTransition {
                from: self.status,
                to: EntryStatus::Posted,
            });
        }

        let totals = self.totals()?;
        if !totals.is_balanced() {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        for account_id in self.referenced_accounts() {
            let account = accounts
                .get(&account_id)
                .ok_or(LedgerError::AccountNotFound(account_id))?;
            if !account.is_active {
                return Err(LedgerError::InactiveAccountReferenced {
                    account_id,
                    account_number: account.account_number.clone(),
                });
            }
        }

        self.status = EntryStatus::Posted;
        self.posted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Checks that the entry may be reversed with `reason`.
    ///
    /// Returns the trimmed reason.
    pub fn check_reversible(&self, reason: &str) -> LedgerResult<String> {
        if self.status != EntryStatus::Posted {
            return Err(LedgerError::InvalidStateTransition {
                from: self.status,
                to: EntryStatus::Reversed,
            });
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LedgerError::EmptyReversalReason);
        }
        Ok(reason.to_string())
    }

    /// Transitions `posted → reversed` and returns the reversal entry.
    ///
    /// The reversal mirrors every line, keeps the original entry date and is
    /// created already posted.
    pub fn reverse(
        &mut self,
        reason: &str,
        reversal_id: JournalEntryId,
        reversal_number: u64,
        now: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        let reason = self.check_reversible(reason)?;

        let reversal = Self {
            id: reversal_id,
            entry_number: reversal_number,
            entry_date: self.entry_date,
            description: format!("Storno zu Buchung Nr. {}: {reason}", self.entry_number),
            notes: None,
            entry_type: EntryType::Reversal,
            lines: self.lines.iter().map(JournalEntryLine::reversed).collect(),
            status: EntryStatus::Posted,
            total_debit: self.total_credit,
            total_credit: self.total_debit,
            posted_at: Some(now),
            reversed_at: None,
            reversal_reason: None,
            reversed_by: None,
            reverses: Some(self.id),
            created_at: now,
            updated_at: now,
        };

        self.status = EntryStatus::Reversed;
        self.reversed_by = Some(reversal_id);
        self.reversed_at = Some(now);
        self.reversal_reason = Some(reason);
        self.updated_at = now;

        Ok(reversal)
    }
}

/// Sums both sides; either sum above `MAX_AMOUNT` is rejected.
fn totals_of(lines: &[JournalEntryLine]) -> LedgerResult<EntryTotals> {
    let mut totals = EntryTotals::default();
    for line in lines {
        totals.debit = bounded_sum(totals.debit, line.debit_amount(), "debit")?;
        totals.credit = bounded_sum(totals.credit, line.credit_amount(), "credit")?;
    }
    Ok(totals)
}

fn bounded_sum(total: Decimal, amount: Decimal, side: &str) -> LedgerResult<Decimal> {
    total
        .checked_add(amount)
        .filter(|sum| within_amount_limit(*sum))
        .ok_or_else(|| {
            LedgerError::InvalidLineAmount(format!(
                "{side} total exceeds the maximum of {MAX_AMOUNT}"
            ))
        })
}

fn distinct_accounts(lines: &[JournalEntryLine]) -> Vec<AccountId> {
    let mut ids: Vec<AccountId> = Vec::with_capacity(lines.len());
    for line in lines {
        if !ids.contains(&line.account_id()) {
            ids.push(line.account_id());
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::{AccountClass, AccountType, NewAccount};
    use rust_decimal_macros::dec;

    fn account(number: &str, name: &str, t: AccountType, c: AccountClass) -> Account {
        Account::create(
            NewAccount {
                account_number: number.to_string(),
                account_name: name.to_string(),
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

    fn kasse_and_erloese() -> (Account, Account) {
        (
            account("1000", "Kasse", AccountType::Asset, AccountClass::CurrentAsset),
            account("8400", "Erlöse 19% USt", AccountType::Revenue, AccountClass::OperatingRevenue),
        )
    }

    fn chart(accounts: &[&Account]) -> HashMap<AccountId, Account> {
        accounts.iter().map(|a| (a.id, (*a).clone())).collect()
    }

    fn barverkauf(debit: Decimal, credit: Decimal, kasse: &Account, erloese: &Account) -> CreateJournalEntry {
        CreateJournalEntry {
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            description: "Barverkauf".to_string(),
            notes: None,
            entry_type: EntryType::Manual,
            lines: vec![
                JournalEntryLine::debit(kasse.id, debit).unwrap().with_description("Kasse"),
                JournalEntryLine::credit(erloese.id, credit).unwrap(),
            ],
        }
    }

    fn draft() -> (JournalEntry, HashMap<AccountId, Account>) {
        let (kasse, erloese) = kasse_and_erloese();
        let input = barverkauf(dec!(500.00), dec!(500.00), &kasse, &erloese);
        let entry = JournalEntry::create(input, JournalEntryId::new(), 1, Utc::now()).unwrap();
        (entry, chart(&[&kasse, &erloese]))
    }

    #[test]
    fn test_create_balanced_draft() {
        let (entry, _) = draft();

        assert_eq!(entry.status, EntryStatus::Draft);
        assert_eq!(entry.entry_number, 1);
        assert_eq!(entry.total_debit, dec!(500.00));
        assert_eq!(entry.total_credit, dec!(500.00));
        assert!(entry.posted_at.is_none());
        assert!(entry.is_balanced());
    }

    #[test]
    fn test_create_unbalanced_fails() {
        let (kasse, erloese) = kasse_and_erloese();
        let input = barverkauf(dec!(500.00), dec!(450.00), &kasse, &erloese);
        let result = JournalEntry::create(input, JournalEntryId::new(), 1, Utc::now());

        assert!(matches!(
            result,
            Err(LedgerError::UnbalancedEntry { debit, credit })
                if debit == dec!(500.00) && credit == dec!(450.00)
        ));
    }

    #[test]
    fn test_create_total_above_limit_fails() {
        let (kasse, erloese) = kasse_and_erloese();
        let mut input = barverkauf(MAX_AMOUNT, MAX_AMOUNT, &kasse, &erloese);
        input.lines.push(JournalEntryLine::debit(kasse.id, MAX_AMOUNT).unwrap());
        input.lines.push(JournalEntryLine::credit(erloese.id, MAX_AMOUNT).unwrap());

        assert!(matches!(input.validate(), Err(LedgerError::InvalidLineAmount(_))));
        assert!(JournalEntry::create(input, JournalEntryId::new(), 1, Utc::now()).is_err());
    }

    #[test]
    fn test_create_total_at_limit() {
        let (kasse, erloese) = kasse_and_erloese();
        let input = barverkauf(MAX_AMOUNT, MAX_AMOUNT, &kasse, &erloese);
        let entry = JournalEntry::create(input, JournalEntryId::new(), 1, Utc::now()).unwrap();
        assert_eq!(entry.total_debit, MAX_AMOUNT);
    }

    #[test]
    fn test_create_blank_description_fails() {
        let (kasse, erloese) = kasse_and_erloese();
        let mut input = barverkauf(dec!(1.00), dec!(1.00), &kasse, &erloese);
        input.description = "   ".to_string();

        assert!(matches!(input.validate(), Err(LedgerError::EmptyDescription)));
    }

    #[test]
    fn test_create_single_line_fails() {
        let (kasse, erloese) = kasse_and_erloese();
        let mut input = barverkauf(dec!(1.00), dec!(1.00), &kasse, &erloese);
        input.lines.truncate(1);

        assert!(matches!(input.validate(), Err(LedgerError::InsufficientLines(1))));
    }

    #[test]
    fn test_create_reversal_type_rejected() {
        let (kasse, erloese) = kasse_and_erloese();
        let mut input = barverkauf(dec!(1.00), dec!(1.00), &kasse, &erloese);
        input.entry_type = EntryType::Reversal;

        assert!(matches!(input.validate(), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_referenced_accounts_are_distinct() {
        let (kasse, erloese) = kasse_and_erloese();
        let mut input = barverkauf(dec!(300.00), dec!(500.00), &kasse, &erloese);
        input
            .lines
            .push(JournalEntryLine::debit(kasse.id, dec!(200.00)).unwrap());

        assert_eq!(input.referenced_accounts(), vec![kasse.id, erloese.id]);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_post_draft() {
        let (mut entry, accounts) = draft();
        let now = Utc::now();
        entry.post(&accounts, now).unwrap();

        assert_eq!(entry.status, EntryStatus::Posted);
        assert_eq!(entry.posted_at, Some(now));
        assert_eq!(entry.updated_at, now);
    }

    #[test]
    fn test_post_twice_fails() {
        let (mut entry, accounts) = draft();
        entry.post(&accounts, Utc::now()).unwrap();

        let result = entry.post(&accounts, Utc::now());
        assert!(matches!(
            result,
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Posted,
                to: EntryStatus::Posted,
            })
        ));
    }

    #[test]
    fn test_post_inactive_account_fails() {
        let (mut entry, mut accounts) = draft();
        let kasse_id = entry.lines[0].account_id();
        if let Some(kasse) = accounts.get_mut(&kasse_id) {
            kasse.is_active = false;
        }

        let result = entry.post(&accounts, Utc::now());
        assert!(matches!(
            result,
            Err(LedgerError::InactiveAccountReferenced { account_id, ref account_number })
                if account_id == kasse_id && account_number == "1000"
        ));
        assert_eq!(entry.status, EntryStatus::Draft);
    }

    #[test]
    fn test_post_missing_account_fails() {
        let (mut entry, mut accounts) = draft();
        let erloese_id = entry.lines[1].account_id();
        accounts.remove(&erloese_id);

        let result = entry.post(&accounts, Utc::now());
        assert!(matches!(result, Err(LedgerError::AccountNotFound(id)) if id == erloese_id));
    }

    #[test]
    fn test_post_rechecks_balance() {
        let (mut entry, accounts) = draft();
        entry.lines[1].set_credit(dec!(499.99)).unwrap();

        let result = entry.post(&accounts, Utc::now());
        assert!(matches!(result, Err(LedgerError::UnbalancedEntry { .. })));
    }

    #[test]
    fn test_reverse_posted_entry() {
        let (mut entry, accounts) = draft();
        entry.post(&accounts, Utc::now()).unwrap();

        let reversal_id = JournalEntryId::new();
        let reversal = entry
            .reverse("  Falscher Betrag ", reversal_id, 2, Utc::now())
            .unwrap();

        assert_eq!(entry.status, EntryStatus::Reversed);
        assert_eq!(entry.reversed_by, Some(reversal_id));
        assert_eq!(entry.reversal_reason.as_deref(), Some("Falscher Betrag"));
        assert!(entry.reversed_at.is_some());

        assert_eq!(reversal.id, reversal_id);
        assert_eq!(reversal.entry_number, 2);
        assert_eq!(reversal.status, EntryStatus::Posted);
        assert_eq!(reversal.entry_type, EntryType::Reversal);
        assert_eq!(reversal.entry_date, entry.entry_date);
        assert_eq!(reversal.reverses, Some(entry.id));
        assert_eq!(
            reversal.description,
            "Storno zu Buchung Nr. 1: Falscher Betrag"
        );
        assert_eq!(reversal.lines[0].credit_amount(), dec!(500.00));
        assert_eq!(reversal.lines[0].description(), Some("Storno: Kasse"));
        assert_eq!(reversal.lines[1].debit_amount(), dec!(500.00));
        assert_eq!(reversal.lines[1].description(), Some("Storno"));
        assert!(reversal.is_balanced());
    }

    #[test]
    fn test_reverse_cancels_net_effect() {
        let (mut entry, accounts) = draft();
        entry.post(&accounts, Utc::now()).unwrap();
        let reversal = entry
            .reverse("Doppelt erfasst", JournalEntryId::new(), 2, Utc::now())
            .unwrap();

        let original = entry.net_effect();
        let mirror = reversal.net_effect();
        for (account_id, amount) in &original {
            assert_eq!(*amount + mirror[account_id], Decimal::ZERO);
        }
    }

    #[test]
    fn test_reverse_draft_fails() {
        let (mut entry, _) = draft();
        let result = entry.reverse("Fehler", JournalEntryId::new(), 2, Utc::now());

        assert!(matches!(
            result,
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Draft,
                to: EntryStatus::Reversed,
            })
        ));
    }

    #[test]
    fn test_reverse_twice_fails() {
        let (mut entry, accounts) = draft();
        entry.post(&accounts, Utc::now()).unwrap();
        entry.reverse("Fehler", JournalEntryId::new(), 2, Utc::now()).unwrap();

        let result = entry.reverse("Fehler", JournalEntryId::new(), 3, Utc::now());
        assert!(matches!(
            result,
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Reversed,
                ..
            })
        ));
    }

    #[test]
    fn test_reverse_blank_reason_fails() {
        let (mut entry, accounts) = draft();
        entry.post(&accounts, Utc::now()).unwrap();

        let result = entry.reverse("  ", JournalEntryId::new(), 2, Utc::now());
        assert!(matches!(result, Err(LedgerError::EmptyReversalReason)));
        assert_eq!(entry.status, EntryStatus::Posted);
    }

    #[test]
    fn test_post_reversed_fails() {
        let (mut entry, accounts) = draft();
        entry.post(&accounts, Utc::now()).unwrap();
        entry.reverse("Fehler", JournalEntryId::new(), 2, Utc::now()).unwrap();

        let result = entry.post(&accounts, Utc::now());
        assert!(matches!(
            result,
            Err(LedgerError::InvalidStateTransition {
                from: EntryStatus::Reversed,
                to: EntryStatus::Posted,
            })
        ));
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let (entry, _) = draft();
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["entryNumber"], 1);
        assert_eq!(json["status"], "draft");
        assert_eq!(json["entryType"], "manual");
        assert_eq!(json["totalDebit"], "500.00");
        assert_eq!(json["lines"][0]["accountId"], entry.lines[0].account_id().to_string());
    }
}
