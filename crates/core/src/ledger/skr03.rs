//! SKR03 standard accounts (DATEV Standardkontenrahmen 03).
//!
//! A small business starter set, not the full frame.

use super::account::{AccountClass, AccountType, NewAccount};

struct StandardAccount {
    number: &'static str,
    name: &'static str,
    account_type: AccountType,
    account_class: AccountClass,
    tax_code: Option<&'static str>,
}

const fn acct(
    number: &'static str,
    name: &'static str,
    account_type: AccountType,
    account_class: AccountClass,
) -> StandardAccount {
    StandardAccount {
        number,
        name,
        account_type,
        account_class,
        tax_code: None,
    }
}

const fn taxed(
    number: &'static str,
    name: &'static str,
    account_type: AccountType,
    account_class: AccountClass,
    tax_code: &'static str,
) -> StandardAccount {
    StandardAccount {
        number,
        name,
        account_type,
        account_class,
        tax_code: Some(tax_code),
    }
}

use AccountClass as C;
use AccountType as T;

const ACCOUNTS: [StandardAccount; 24] = [
    // Anlagevermögen / Kapital
    acct("0630", "Verbindlichkeiten gegenüber Kreditinstituten", T::Liability, C::LongTermLiability),
    acct("0650", "Büroeinrichtung", T::Asset, C::FixedAsset),
    acct("0800", "Gezeichnetes Kapital", T::Equity, C::Equity),
    acct("0998", "Einzelwertberichtigungen zu Forderungen", T::ContraAsset, C::CurrentAsset),
    // Finanz- und Privatkonten
    acct("1000", "Kasse", T::Asset, C::CurrentAsset),
    acct("1200", "Bank", T::Asset, C::CurrentAsset),
    acct("1400", "Forderungen aus Lieferungen und Leistungen", T::Asset, C::CurrentAsset),
    taxed("1571", "Abziehbare Vorsteuer 7%", T::Asset, C::CurrentAsset, "VSt7"),
    taxed("1576", "Abziehbare Vorsteuer 19%", T::Asset, C::CurrentAsset, "VSt19"),
    acct("1600", "Verbindlichkeiten aus Lieferungen und Leistungen", T::Liability, C::CurrentLiability),
    taxed("1771", "Umsatzsteuer 7%", T::Liability, C::CurrentLiability, "USt7"),
    taxed("1776", "Umsatzsteuer 19%", T::Liability, C::CurrentLiability, "USt19"),
    acct("1800", "Privatentnahmen allgemein", T::Equity, C::Equity),
    acct("1890", "Privateinlagen", T::Equity, C::Equity),
    acct("2650", "Sonstige Zinsen und ähnliche Erträge", T::Revenue, C::OtherRevenue),
    // Wareneingang und Aufwand
    taxed("3400", "Wareneingang 19% Vorsteuer", T::Expense, C::OperatingExpense, "VSt19"),
    acct("4120", "Gehälter", T::Expense, C::OperatingExpense),
    acct("4210", "Miete", T::Expense, C::OperatingExpense),
    acct("4600", "Werbekosten", T::Expense, C::OperatingExpense),
    acct("4920", "Telefon", T::Expense, C::OperatingExpense),
    acct("4930", "Bürobedarf", T::Expense, C::OperatingExpense),
    acct("4970", "Nebenkosten des Geldverkehrs", T::Expense, C::OtherExpense),
    // Erlöse
    taxed("8300", "Erlöse 7% USt", T::Revenue, C::OperatingRevenue, "USt7"),
    taxed("8400", "Erlöse 19% USt", T::Revenue, C::OperatingRevenue, "USt19"),
];

/// The SKR03 starter accounts as creation inputs, ordered by number.
pub(crate) fn standard_accounts() -> Vec<NewAccount> {
    ACCOUNTS
        .iter()
        .map(|a| NewAccount {
            account_number: a.number.to_string(),
            account_name: a.name.to_string(),
            account_type: a.account_type,
            account_class: a.account_class,
            description: None,
            tax_relevant: a.tax_code.is_some(),
            tax_code: a.tax_code.map(str::to_string),
        })
        .collect()
}
