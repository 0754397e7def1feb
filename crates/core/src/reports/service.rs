//! Ledger query service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use ucto_shared::LedgerConfig;
use ucto_shared::types::{AccountId, CompanyId, Currency};

use super::error::ReportError;
use super::query;
use super::types::{AccountLedger, TrialBalance};
use crate::accounts::{AccountRepository, ChartOfAccounts};
use crate::journal::JournalRepository;

/// Loads accounts and entries and runs the ledger queries over them.
pub struct LedgerQueryService<R> {
    repo: Arc<R>,
    currency: Currency,
}

impl<R> LedgerQueryService<R>
where
    R: AccountRepository + JournalRepository,
{
    /// Creates a query service reporting in EUR.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            currency: Currency::Eur,
        }
    }

    /// Creates a query service reporting in the configured base currency.
    #[must_use]
    pub fn with_config(repo: Arc<R>, config: &LedgerConfig) -> Self {
        Self {
            repo,
            currency: config.base_currency,
        }
    }

    /// Returns the ledger of one account for `[date_from, date_to]`.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or `InvalidDateRange`.
    pub async fn account_ledger(
        &self,
        account_id: AccountId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<AccountLedger, ReportError> {
        let account = self
            .repo
            .find_account(account_id)
            .await?
            .ok_or(ReportError::AccountNotFound(account_id))?;
        let entries = self.repo.list_journal_entries(account.company_id).await?;

        let ledger = query::account_ledger(&account, &entries, date_from, date_to)?;
        debug!(
            account_id = %account_id,
            rows = ledger.rows.len(),
            closing_balance = %ledger.closing_balance,
            "Account ledger built"
        );
        Ok(ledger)
    }

    /// Returns the company's trial balance as of a date.
    ///
    /// # Errors
    ///
    /// Fails if stored accounts are inconsistent or the store fails.
    pub async fn trial_balance(
        &self,
        company_id: CompanyId,
        as_of: NaiveDate,
        include_zero_rows: bool,
    ) -> Result<TrialBalance, ReportError> {
        let chart = ChartOfAccounts::new(self.repo.list_accounts(company_id).await?)?;
        let entries = self.repo.list_journal_entries(company_id).await?;

        let mut report = query::trial_balance(&chart, &entries, as_of, include_zero_rows);
        report.currency = self.currency;
        debug!(
            company_id = %company_id,
            as_of = %as_of,
            rows = report.rows.len(),
            is_balanced = report.totals.is_balanced,
            "Trial balance built"
        );
        Ok(report)
    }
}
