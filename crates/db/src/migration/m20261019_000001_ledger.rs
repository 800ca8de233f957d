//! Ledger schema.
//!
//! Creates the chart of accounts, journal entries with their lines, and the
//! entry number sequence. CHECK constraints repeat the domain invariants so
//! rows written outside the service cannot break them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRY_LINES_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ACCOUNTS_SQL: &str = r"
-- Chart of accounts
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    account_number VARCHAR(20) NOT NULL,
    account_name VARCHAR(255) NOT NULL,
    account_type VARCHAR(32) NOT NULL,
    account_class VARCHAR(32) NOT NULL,
    description TEXT,
    tax_relevant BOOLEAN NOT NULL DEFAULT false,
    tax_code VARCHAR(32),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_accounts_account_number UNIQUE (account_number),
    CONSTRAINT chk_account_number_not_blank CHECK (btrim(account_number) <> ''),
    CONSTRAINT chk_account_name_not_blank CHECK (btrim(account_name) <> ''),
    CONSTRAINT chk_account_type_class CHECK (
        (account_type IN ('asset', 'contra_asset')
            AND account_class IN ('current_asset', 'fixed_asset'))
        OR (account_type IN ('liability', 'contra_liability')
            AND account_class IN ('current_liability', 'long_term_liability'))
        OR (account_type = 'equity' AND account_class = 'equity')
        OR (account_type = 'revenue'
            AND account_class IN ('operating_revenue', 'other_revenue'))
        OR (account_type = 'expense'
            AND account_class IN ('operating_expense', 'other_expense'))
    )
);
";

const JOURNAL_ENTRIES_SQL: &str = r"
-- Entry numbers: strictly increasing, gaps allowed
CREATE SEQUENCE journal_entry_number_seq START WITH 1 INCREMENT BY 1 NO CYCLE;

CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_number BIGINT NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT NOT NULL,
    notes TEXT,
    entry_type VARCHAR(32) NOT NULL,
    status VARCHAR(16) NOT NULL DEFAULT 'draft',
    total_debit NUMERIC(15, 2) NOT NULL,
    total_credit NUMERIC(15, 2) NOT NULL,
    posted_at TIMESTAMPTZ,
    reversed_at TIMESTAMPTZ,
    reversal_reason TEXT,
    reversed_by UUID REFERENCES journal_entries(id),
    reverses UUID REFERENCES journal_entries(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_journal_entries_entry_number UNIQUE (entry_number),
    CONSTRAINT chk_entry_description_not_blank CHECK (btrim(description) <> ''),
    CONSTRAINT chk_entry_status CHECK (status IN ('draft', 'posted', 'reversed')),
    CONSTRAINT chk_entry_type CHECK (entry_type IN (
        'manual', 'opening_balance', 'closing', 'adjustment',
        'invoice', 'payment', 'expense', 'reversal'
    )),
    CONSTRAINT chk_entry_balanced CHECK (total_debit = total_credit),
    CONSTRAINT chk_entry_posted_at CHECK ((status = 'draft') = (posted_at IS NULL)),
    CONSTRAINT chk_entry_reversed CHECK (
        (status = 'reversed') = (reversed_by IS NOT NULL AND reversed_at IS NOT NULL)
    )
);
";

const JOURNAL_ENTRY_LINES_SQL: &str = r"
CREATE TABLE journal_entry_lines (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE RESTRICT,
    debit_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    credit_amount NUMERIC(15, 2) NOT NULL DEFAULT 0,
    description TEXT,
    CONSTRAINT uq_journal_entry_lines_position UNIQUE (journal_entry_id, line_no),
    CONSTRAINT chk_line_non_negative CHECK (debit_amount >= 0 AND credit_amount >= 0),
    CONSTRAINT chk_line_one_side CHECK ((debit_amount > 0) <> (credit_amount > 0))
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_accounts_type ON accounts(account_type);
CREATE INDEX idx_journal_entries_status_date ON journal_entries(status, entry_date);
CREATE INDEX idx_journal_entry_lines_entry ON journal_entry_lines(journal_entry_id);
CREATE INDEX idx_journal_entry_lines_account ON journal_entry_lines(account_id);
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS journal_entry_lines CASCADE;
DROP TABLE IF EXISTS journal_entries CASCADE;
DROP SEQUENCE IF EXISTS journal_entry_number_seq;
DROP TABLE IF EXISTS accounts CASCADE;
";
