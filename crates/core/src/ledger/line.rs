//! Journal entry lines.
//!
//! A line moves an amount on exactly one side of one account. The fields are
//! private so the debit/credit exclusivity cannot be broken after construction.

use fibu_shared::types::{AccountId, MAX_AMOUNT, has_cent_precision, within_amount_limit};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::{LedgerError, LedgerResult};

/// One debit or credit posting within a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryLine {
    account_id: AccountId,
    debit_amount: Decimal,
    credit_amount: Decimal,
    description: Option<String>,
}

impl JournalEntryLine {
    /// Builds a line from raw amounts.
    ///
    /// Exactly one of `debit` and `credit` must be positive, the other zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineAmount` for negative amounts, sub-cent precision,
    /// both sides set, or both sides zero.
    pub fn new(
        account_id: AccountId,
        debit: Decimal,
        credit: Decimal,
        description: Option<String>,
    ) -> LedgerResult<Self> {
        check_amount(debit)?;
        check_amount(credit)?;
        match (debit.is_zero(), credit.is_zero()) {
            (false, false) => Err(LedgerError::InvalidLineAmount(
                "a line cannot carry both a debit and a credit amount".to_string(),
            )),
            (true, true) => Err(LedgerError::InvalidLineAmount(
                "a line needs either a debit or a credit amount".to_string(),
            )),
            _ => Ok(Self {
                account_id,
                debit_amount: debit,
                credit_amount: credit,
                description: description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
            }),
        }
    }

    /// Debit line (Soll).
    pub fn debit(account_id: AccountId, amount: Decimal) -> LedgerResult<Self> {
        Self::new(account_id, amount, Decimal::ZERO, None)
    }

    /// Credit line (Haben).
    pub fn credit(account_id: AccountId, amount: Decimal) -> LedgerResult<Self> {
        Self::new(account_id, Decimal::ZERO, amount, None)
    }

    /// Sets the line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        let trimmed = description.trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Moves the line to the debit side; the credit amount is cleared.
    pub fn set_debit(&mut self, amount: Decimal) -> LedgerResult<()> {
        positive_amount(amount)?;
        self.debit_amount = amount;
        self.credit_amount = Decimal::ZERO;
        Ok(())
    }

    /// Moves the line to the credit side; the debit amount is cleared.
    pub fn set_credit(&mut self, amount: Decimal) -> LedgerResult<()> {
        positive_amount(amount)?;
        self.credit_amount = amount;
        self.debit_amount = Decimal::ZERO;
        Ok(())
    }

    /// Referenced account.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Debit amount, zero on credit lines.
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        self.debit_amount
    }

    /// Credit amount, zero on debit lines.
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        self.credit_amount
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns true for a debit line.
    #[must_use]
    pub fn is_debit(&self) -> bool {
        !self.debit_amount.is_zero()
    }

    /// Signed effect on the account: debit minus credit.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.debit_amount - self.credit_amount
    }

    /// Mirror image of this line for a reversal entry.
    #[must_use]
    pub(crate) fn reversed(&self) -> Self {
        let description = match &self.description {
            Some(d) => format!("Storno: {d}"),
            None => "Storno".to_string(),
        };
        Self {
            account_id: self.account_id,
            debit_amount: self.credit_amount,
            credit_amount: self.debit_amount,
            description: Some(description),
        }
    }
}

fn check_amount(amount: Decimal) -> LedgerResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::InvalidLineAmount(format!(
            "amount {amount} is negative"
        )));
    }
    if !has_cent_precision(amount) {
        return Err(LedgerError::InvalidLineAmount(format!(
            "amount {amount} has more than 2 decimal places"
        )));
    }
    if !within_amount_limit(amount) {
        return Err(LedgerError::InvalidLineAmount(format!(
            "amount {amount} exceeds the maximum of {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

fn positive_amount(amount: Decimal) -> LedgerResult<()> {
    check_amount(amount)?;
    if amount.is_zero() {
        return Err(LedgerError::InvalidLineAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_line() {
        let account = AccountId::new();
        let line = JournalEntryLine::debit(account, dec!(500.00)).unwrap();

        assert_eq!(line.account_id(), account);
        assert_eq!(line.debit_amount(), dec!(500.00));
        assert_eq!(line.credit_amount(), Decimal::ZERO);
        assert!(line.is_debit());
        assert_eq!(line.net_amount(), dec!(500.00));
    }

    #[test]
    fn test_credit_line() {
        let line = JournalEntryLine::credit(AccountId::new(), dec!(19.99)).unwrap();
        assert!(!line.is_debit());
        assert_eq!(line.net_amount(), dec!(-19.99));
    }

    #[rstest]
    #[case(dec!(10.00), dec!(10.00))]
    #[case(dec!(0), dec!(0))]
    #[case(dec!(-5.00), dec!(0))]
    #[case(dec!(0), dec!(-0.01))]
    #[case(dec!(0.001), dec!(0))]
    #[case(dec!(0), dec!(12.345))]
    #[case(dec!(10000000000000.00), dec!(0))]
    #[case(dec!(0), dec!(50000000000000000000000000000))]
    fn test_rejects_invalid_amounts(#[case] debit: Decimal, #[case] credit: Decimal) {
        let result = JournalEntryLine::new(AccountId::new(), debit, credit, None);
        assert!(matches!(result, Err(LedgerError::InvalidLineAmount(_))));
    }

    #[test]
    fn test_largest_amount_accepted() {
        let line = JournalEntryLine::credit(AccountId::new(), MAX_AMOUNT).unwrap();
        assert_eq!(line.credit_amount(), dec!(9999999999999.99));
        assert!(JournalEntryLine::credit(AccountId::new(), MAX_AMOUNT + dec!(0.01)).is_err());
    }

    #[test]
    fn test_trailing_zeros_are_cent_precision() {
        let line = JournalEntryLine::debit(AccountId::new(), dec!(12.3400)).unwrap();
        assert_eq!(line.debit_amount(), dec!(12.34));
    }

    #[test]
    fn test_set_debit_clears_credit() {
        let mut line = JournalEntryLine::credit(AccountId::new(), dec!(100.00)).unwrap();
        line.set_debit(dec!(80.00)).unwrap();

        assert_eq!(line.debit_amount(), dec!(80.00));
        assert_eq!(line.credit_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_set_credit_clears_debit() {
        let mut line = JournalEntryLine::debit(AccountId::new(), dec!(100.00)).unwrap();
        line.set_credit(dec!(80.00)).unwrap();

        assert_eq!(line.credit_amount(), dec!(80.00));
        assert_eq!(line.debit_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_set_zero_is_rejected() {
        let mut line = JournalEntryLine::debit(AccountId::new(), dec!(100.00)).unwrap();
        assert!(line.set_credit(Decimal::ZERO).is_err());
        assert_eq!(line.debit_amount(), dec!(100.00));
    }

    #[test]
    fn test_reversed_swaps_sides() {
        let line = JournalEntryLine::debit(AccountId::new(), dec!(500.00))
            .unwrap()
            .with_description("Barverkauf");
        let reversed = line.reversed();

        assert_eq!(reversed.debit_amount(), Decimal::ZERO);
        assert_eq!(reversed.credit_amount(), dec!(500.00));
        assert_eq!(reversed.description(), Some("Storno: Barverkauf"));
        assert_eq!(line.net_amount() + reversed.net_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_blank_description_dropped() {
        let line = JournalEntryLine::new(AccountId::new(), dec!(1.00), Decimal::ZERO, Some("  ".into()))
            .unwrap();
        assert_eq!(line.description(), None);
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let line = JournalEntryLine::debit(AccountId::new(), dec!(500.00)).unwrap();
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["debitAmount"], "500.00");
        assert_eq!(json["creditAmount"], "0");
    }
}
