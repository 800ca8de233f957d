//! PostgreSQL implementation of the ledger store.
//!
//! Status changes use `UPDATE ... WHERE id = $1 AND status = $expected` and
//! check the affected row count, so concurrent transitions of one entry have
//! a single winner. Reversals run in one database transaction.
//!
//! Writes that depend on accounts (inserting lines, posting) first read the
//! referenced account rows `FOR SHARE` in the same transaction. A concurrent
//! deactivation or delete waits for that transaction, or is seen by it.

use async_trait::async_trait;
use chrono::Utc;
use fibu_core::ledger::{
    Account, AccountClass, AccountFilter, AccountTotals, AccountType, EntryFilter, EntryStatus,
    EntryType, JournalEntry, JournalEntryLine, LedgerError, LedgerResult, LedgerStore,
};
use fibu_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, Statement, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{accounts, journal_entries, journal_entry_lines};

const EFFECTIVE_TOTALS_SQL: &str = r"
SELECT l.account_id,
       SUM(l.debit_amount) AS debit_total,
       SUM(l.credit_amount) AS credit_total
FROM journal_entry_lines l
JOIN journal_entries e ON e.id = l.journal_entry_id
WHERE e.status IN ('posted', 'reversed')
GROUP BY l.account_id
";

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    account_id: Uuid,
    debit_total: Decimal,
    credit_total: Decimal,
}

/// Ledger store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgLedgerStore {
    db: DatabaseConnection,
}

impl PgLedgerStore {
    /// Creates a new store over a connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_lines<C: ConnectionTrait>(
        conn: &C,
        entry_ids: &[Uuid],
    ) -> LedgerResult<HashMap<Uuid, Vec<JournalEntryLine>>> {
        let rows = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::JournalEntryId.is_in(entry_ids.iter().copied()))
            .order_by_asc(journal_entry_lines::Column::JournalEntryId)
            .order_by_asc(journal_entry_lines::Column::LineNo)
            .all(conn)
            .await
            .map_err(storage)?;

        let mut lines: HashMap<Uuid, Vec<JournalEntryLine>> = HashMap::new();
        for row in rows {
            let entry_id = row.journal_entry_id;
            lines.entry(entry_id).or_default().push(line_from_model(row)?);
        }
        Ok(lines)
    }

    /// Reads the accounts among `ids` with a shared row lock held until the
    /// surrounding transaction ends.
    async fn lock_accounts<C: ConnectionTrait>(
        conn: &C,
        ids: &[AccountId],
    ) -> LedgerResult<Vec<accounts::Model>> {
        accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .lock_shared()
            .all(conn)
            .await
            .map_err(storage)
    }

    async fn insert_entry_rows<C: ConnectionTrait>(conn: &C, entry: &JournalEntry) -> LedgerResult<()> {
        let referenced = entry.referenced_accounts();
        let found = Self::lock_accounts(conn, &referenced).await?;
        if let Some(missing) = first_missing(&referenced, &found) {
            return Err(LedgerError::AccountNotFound(missing));
        }

        entry_to_active(entry)?.insert(conn).await.map_err(storage)?;

        let lines = entry
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let line_no = i32::try_from(i + 1)
                    .map_err(|_| LedgerError::Validation("too many journal lines".to_string()))?;
                Ok(journal_entry_lines::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    journal_entry_id: Set(entry.id.into_inner()),
                    line_no: Set(line_no),
                    account_id: Set(line.account_id().into_inner()),
                    debit_amount: Set(line.debit_amount()),
                    credit_amount: Set(line.credit_amount()),
                    description: Set(line.description().map(str::to_string)),
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        journal_entry_lines::Entity::insert_many(lines)
            .exec(conn)
            .await
            .map_err(storage)?;
        Ok(())
    }

    /// Compare-and-set of the status columns. Returns the affected row count.
    async fn write_status<C: ConnectionTrait>(
        conn: &C,
        entry: &JournalEntry,
        expected: EntryStatus,
    ) -> LedgerResult<u64> {
        let result = journal_entries::Entity::update_many()
            .col_expr(journal_entries::Column::Status, Expr::value(entry.status.as_str()))
            .col_expr(
                journal_entries::Column::PostedAt,
                Expr::value(entry.posted_at.map(Into::<sea_orm::prelude::DateTimeWithTimeZone>::into)),
            )
            .col_expr(
                journal_entries::Column::ReversedAt,
                Expr::value(entry.reversed_at.map(Into::<sea_orm::prelude::DateTimeWithTimeZone>::into)),
            )
            .col_expr(
                journal_entries::Column::ReversalReason,
                Expr::value(entry.reversal_reason.clone()),
            )
            .col_expr(
                journal_entries::Column::ReversedBy,
                Expr::value(entry.reversed_by.map(JournalEntryId::into_inner)),
            )
            .col_expr(
                journal_entries::Column::UpdatedAt,
                Expr::value(Into::<sea_orm::prelude::DateTimeWithTimeZone>::into(entry.updated_at)),
            )
            .filter(journal_entries::Column::Id.eq(entry.id.into_inner()))
            .filter(journal_entries::Column::Status.eq(expected.as_str()))
            .exec(conn)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected)
    }

    /// Builds the error for a compare-and-set that matched no row.
    async fn lost_transition<C: ConnectionTrait>(
        conn: &C,
        id: JournalEntryId,
        to: EntryStatus,
    ) -> LedgerError {
        match journal_entries::Entity::find_by_id(id.into_inner()).one(conn).await {
            Ok(Some(row)) => match EntryStatus::parse(&row.status) {
                Some(from) => LedgerError::InvalidStateTransition { from, to },
                None => corrupt("entry status", &row.status),
            },
            Ok(None) => LedgerError::EntryNotFound(id),
            Err(e) => storage(e),
        }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn insert_account(&self, account: &Account) -> LedgerResult<()> {
        account_to_active(account)
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    LedgerError::DuplicateAccountNumber(account.account_number.clone())
                }
                _ => storage(e),
            })?;
        tracing::debug!(account_id = %account.id, "Account row inserted");
        Ok(())
    }

    async fn account_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage)?
            .map(account_from_model)
            .transpose()
    }

    async fn account_by_number(&self, account_number: &str) -> LedgerResult<Option<Account>> {
        accounts::Entity::find()
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await
            .map_err(storage)?
            .map(account_from_model)
            .transpose()
    }

    async fn accounts_by_ids(&self, ids: &[AccountId]) -> LedgerResult<Vec<Account>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .all(&self.db)
            .await
            .map_err(storage)?
            .into_iter()
            .map(account_from_model)
            .collect()
    }

    async fn search_accounts(&self, filter: &AccountFilter) -> LedgerResult<Vec<Account>> {
        let mut query = accounts::Entity::find();

        if let Some(account_type) = filter.account_type {
            query = query.filter(accounts::Column::AccountType.eq(account_type.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(accounts::Column::IsActive.eq(is_active));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            query = query.filter(
                sea_orm::Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(accounts::Column::AccountNumber))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(accounts::Column::AccountName))).like(pattern)),
            );
        }

        query
            .order_by_asc(accounts::Column::AccountNumber)
            .all(&self.db)
            .await
            .map_err(storage)?
            .into_iter()
            .map(account_from_model)
            .collect()
    }

    async fn update_account(&self, account: &Account) -> LedgerResult<()> {
        let model = accounts::ActiveModel {
            id: Unchanged(account.id.into_inner()),
            account_name: Set(account.account_name.clone()),
            description: Set(account.description.clone()),
            tax_relevant: Set(account.tax_relevant),
            tax_code: Set(account.tax_code.clone()),
            is_active: Set(account.is_active),
            updated_at: Set(account.updated_at.into()),
            ..Default::default()
        };
        match model.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(LedgerError::AccountNotFound(account.id)),
            Err(e) => Err(storage(e)),
        }
    }

    async fn delete_account(&self, id: AccountId) -> LedgerResult<()> {
        let txn = self.db.begin().await.map_err(storage)?;

        let exists = accounts::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(storage)?
            .is_some();
        if !exists {
            return Err(LedgerError::AccountNotFound(id));
        }

        let references = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::AccountId.eq(id.into_inner()))
            .count(&txn)
            .await
            .map_err(storage)?;
        if references > 0 {
            return Err(LedgerError::AccountInUse(id));
        }

        accounts::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => LedgerError::AccountInUse(id),
                _ => storage(e),
            })?;

        txn.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn insert_entry(&self, entry: &JournalEntry) -> LedgerResult<()> {
        let txn = self.db.begin().await.map_err(storage)?;
        Self::insert_entry_rows(&txn, entry).await?;
        txn.commit().await.map_err(storage)?;
        tracing::debug!(entry_id = %entry.id, lines = entry.lines.len(), "Journal entry rows inserted");
        Ok(())
    }

    async fn entry_by_id(&self, id: JournalEntryId) -> LedgerResult<Option<JournalEntry>> {
        let Some(row) = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage)?
        else {
            return Ok(None);
        };

        let mut lines = Self::load_lines(&self.db, &[row.id]).await?;
        let entry_lines = lines.remove(&row.id).unwrap_or_default();
        entry_from_model(row, entry_lines).map(Some)
    }

    async fn list_entries(&self, filter: &EntryFilter) -> LedgerResult<Vec<JournalEntry>> {
        let mut query = journal_entries::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(journal_entries::Column::Status.eq(status.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }

        let rows = query
            .order_by_desc(journal_entries::Column::EntryNumber)
            .limit(filter.limit.get())
            .all(&self.db)
            .await
            .map_err(storage)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut lines = Self::load_lines(&self.db, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let entry_lines = lines.remove(&row.id).unwrap_or_default();
                entry_from_model(row, entry_lines)
            })
            .collect()
    }

    async fn transition_entry(
        &self,
        entry: &JournalEntry,
        expected: EntryStatus,
    ) -> LedgerResult<()> {
        if entry.status != EntryStatus::Posted {
            let affected = Self::write_status(&self.db, entry, expected).await?;
            if affected == 0 {
                return Err(Self::lost_transition(&self.db, entry.id, entry.status).await);
            }
            return Ok(());
        }

        let txn = self.db.begin().await.map_err(storage)?;

        let referenced = entry.referenced_accounts();
        let found = Self::lock_accounts(&txn, &referenced).await?;
        if let Err(e) = check_postable(&referenced, &found) {
            txn.rollback().await.map_err(storage)?;
            return Err(e);
        }

        let affected = Self::write_status(&txn, entry, expected).await?;
        if affected == 0 {
            let err = Self::lost_transition(&txn, entry.id, entry.status).await;
            txn.rollback().await.map_err(storage)?;
            return Err(err);
        }

        txn.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn commit_reversal(
        &self,
        original: &JournalEntry,
        reversal: &JournalEntry,
    ) -> LedgerResult<()> {
        let txn = self.db.begin().await.map_err(storage)?;

        // the reversal row must exist before the original can point at it
        Self::insert_entry_rows(&txn, reversal).await?;

        let affected = Self::write_status(&txn, original, EntryStatus::Posted).await?;
        if affected == 0 {
            let err = Self::lost_transition(&txn, original.id, EntryStatus::Reversed).await;
            txn.rollback().await.map_err(storage)?;
            return Err(err);
        }

        txn.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn effective_totals(&self) -> LedgerResult<Vec<AccountTotals>> {
        let rows = TotalsRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            EFFECTIVE_TOTALS_SQL,
        ))
        .all(&self.db)
        .await
        .map_err(storage)?;

        Ok(rows
            .into_iter()
            .map(|r| AccountTotals {
                account_id: AccountId::from_uuid(r.account_id),
                debit_total: r.debit_total,
                credit_total: r.credit_total,
            })
            .collect())
    }
}

fn storage(err: DbErr) -> LedgerError {
    tracing::error!(error = %err, "Database error");
    LedgerError::Storage(err.to_string())
}

fn corrupt(what: &str, value: &str) -> LedgerError {
    LedgerError::Storage(format!("unexpected {what} in database: {value}"))
}

/// First ID in `ids` with no row in `found`.
fn first_missing(ids: &[AccountId], found: &[accounts::Model]) -> Option<AccountId> {
    ids.iter()
        .copied()
        .find(|id| !found.iter().any(|row| row.id == id.into_inner()))
}

/// Every ID in `ids` must have a row in `found`, and that row must be active.
fn check_postable(ids: &[AccountId], found: &[accounts::Model]) -> LedgerResult<()> {
    if let Some(missing) = first_missing(ids, found) {
        return Err(LedgerError::AccountNotFound(missing));
    }
    for id in ids {
        if let Some(row) = found.iter().find(|row| row.id == id.into_inner() && !row.is_active) {
            return Err(LedgerError::InactiveAccountReferenced {
                account_id: *id,
                account_number: row.account_number.clone(),
            });
        }
    }
    Ok(())
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn account_to_active(account: &Account) -> accounts::ActiveModel {
    accounts::ActiveModel {
        id: Set(account.id.into_inner()),
        account_number: Set(account.account_number.clone()),
        account_name: Set(account.account_name.clone()),
        account_type: Set(account.account_type.as_str().to_string()),
        account_class: Set(account.account_class.as_str().to_string()),
        description: Set(account.description.clone()),
        tax_relevant: Set(account.tax_relevant),
        tax_code: Set(account.tax_code.clone()),
        is_active: Set(account.is_active),
        created_at: Set(account.created_at.into()),
        updated_at: Set(account.updated_at.into()),
    }
}

fn account_from_model(model: accounts::Model) -> LedgerResult<Account> {
    let account_type = AccountType::parse(&model.account_type)
        .ok_or_else(|| corrupt("account type", &model.account_type))?;
    let account_class = AccountClass::parse(&model.account_class)
        .ok_or_else(|| corrupt("account class", &model.account_class))?;

    Ok(Account {
        id: AccountId::from_uuid(model.id),
        account_number: model.account_number,
        account_name: model.account_name,
        account_type,
        account_class,
        description: model.description,
        tax_relevant: model.tax_relevant,
        tax_code: model.tax_code,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn entry_to_active(entry: &JournalEntry) -> LedgerResult<journal_entries::ActiveModel> {
    let entry_number = i64::try_from(entry.entry_number)
        .map_err(|_| LedgerError::Storage(format!("entry number {} out of range", entry.entry_number)))?;

    Ok(journal_entries::ActiveModel {
        id: Set(entry.id.into_inner()),
        entry_number: Set(entry_number),
        entry_date: Set(entry.entry_date),
        description: Set(entry.description.clone()),
        notes: Set(entry.notes.clone()),
        entry_type: Set(entry.entry_type.as_str().to_string()),
        status: Set(entry.status.as_str().to_string()),
        total_debit: Set(entry.total_debit),
        total_credit: Set(entry.total_credit),
        posted_at: Set(entry.posted_at.map(Into::into)),
        reversed_at: Set(entry.reversed_at.map(Into::into)),
        reversal_reason: Set(entry.reversal_reason.clone()),
        reversed_by: Set(entry.reversed_by.map(JournalEntryId::into_inner)),
        reverses: Set(entry.reverses.map(JournalEntryId::into_inner)),
        created_at: Set(entry.created_at.into()),
        updated_at: Set(entry.updated_at.into()),
    })
}

fn line_from_model(model: journal_entry_lines::Model) -> LedgerResult<JournalEntryLine> {
    JournalEntryLine::new(
        AccountId::from_uuid(model.account_id),
        model.debit_amount,
        model.credit_amount,
        model.description,
    )
    .map_err(|e| LedgerError::Storage(format!("invalid journal line {}: {e}", model.id)))
}

fn entry_from_model(
    model: journal_entries::Model,
    lines: Vec<JournalEntryLine>,
) -> LedgerResult<JournalEntry> {
    let status = EntryStatus::parse(&model.status).ok_or_else(|| corrupt("entry status", &model.status))?;
    let entry_type =
        EntryType::parse(&model.entry_type).ok_or_else(|| corrupt("entry type", &model.entry_type))?;
    let entry_number = u64::try_from(model.entry_number)
        .map_err(|_| corrupt("entry number", &model.entry_number.to_string()))?;

    Ok(JournalEntry {
        id: JournalEntryId::from_uuid(model.id),
        entry_number,
        entry_date: model.entry_date,
        description: model.description,
        notes: model.notes,
        entry_type,
        lines,
        status,
        total_debit: model.total_debit,
        total_credit: model.total_credit,
        posted_at: model.posted_at.map(|t| t.with_timezone(&Utc)),
        reversed_at: model.reversed_at.map(|t| t.with_timezone(&Utc)),
        reversal_reason: model.reversal_reason,
        reversed_by: model.reversed_by.map(JournalEntryId::from_uuid),
        reverses: model.reverses.map(JournalEntryId::from_uuid),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn account_row(account_type: &str, account_class: &str) -> accounts::Model {
        let now = Utc::now().into();
        accounts::Model {
            id: Uuid::now_v7(),
            account_number: "1000".to_string(),
            account_name: "Kasse".to_string(),
            account_type: account_type.to_string(),
            account_class: account_class.to_string(),
            description: None,
            tax_relevant: false,
            tax_code: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_account_from_model() {
        let account = account_from_model(account_row("asset", "current_asset")).unwrap();
        assert_eq!(account.account_type, AccountType::Asset);
        assert_eq!(account.account_class, AccountClass::CurrentAsset);
    }

    #[test]
    fn test_account_from_model_rejects_unknown_type() {
        let result = account_from_model(account_row("aktiva", "current_asset"));
        assert!(matches!(result, Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_account_roundtrip_through_active_model() {
        let account = account_from_model(account_row("revenue", "operating_revenue")).unwrap();
        let active = account_to_active(&account);
        assert_eq!(active.account_type, Set("revenue".to_string()));
        assert_eq!(active.account_number, Set("1000".to_string()));
    }

    #[test]
    fn test_first_missing_names_the_absent_account() {
        let present = account_row("asset", "current_asset");
        let present_id = AccountId::from_uuid(present.id);
        let ghost = AccountId::new();

        assert_eq!(first_missing(&[present_id], std::slice::from_ref(&present)), None);
        assert_eq!(first_missing(&[present_id, ghost], &[present]), Some(ghost));
        assert_eq!(first_missing(&[ghost], &[]), Some(ghost));
    }

    #[test]
    fn test_check_postable() {
        let active = account_row("asset", "current_asset");
        let mut inactive = account_row("revenue", "operating_revenue");
        inactive.account_number = "8400".to_string();
        inactive.is_active = false;
        let active_id = AccountId::from_uuid(active.id);
        let inactive_id = AccountId::from_uuid(inactive.id);
        let rows = [active, inactive];

        assert!(check_postable(&[active_id], &rows).is_ok());
        assert!(matches!(
            check_postable(&[active_id, inactive_id], &rows),
            Err(LedgerError::InactiveAccountReferenced { account_id, ref account_number })
                if account_id == inactive_id && account_number == "8400"
        ));

        let ghost = AccountId::new();
        assert!(matches!(
            check_postable(&[active_id, ghost], &rows),
            Err(LedgerError::AccountNotFound(id)) if id == ghost
        ));
    }

    #[test]
    fn test_line_from_model_rejects_both_sides() {
        let row = journal_entry_lines::Model {
            id: Uuid::now_v7(),
            journal_entry_id: Uuid::now_v7(),
            line_no: 1,
            account_id: Uuid::now_v7(),
            debit_amount: dec!(1.00),
            credit_amount: dec!(1.00),
            description: None,
        };
        assert!(matches!(line_from_model(row), Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_entry_from_model() {
        let now = Utc::now();
        let row = journal_entries::Model {
            id: Uuid::now_v7(),
            entry_number: 7,
            entry_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            description: "Miete Februar".to_string(),
            notes: None,
            entry_type: "manual".to_string(),
            status: "posted".to_string(),
            total_debit: dec!(1200.00),
            total_credit: dec!(1200.00),
            posted_at: Some(now.into()),
            reversed_at: None,
            reversal_reason: None,
            reversed_by: None,
            reverses: None,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let entry = entry_from_model(row, Vec::new()).unwrap();
        assert_eq!(entry.entry_number, 7);
        assert_eq!(entry.status, EntryStatus::Posted);
        assert_eq!(entry.posted_at, Some(now));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("10%_a\\"), "10\\%\\_a\\\\");
    }
}
