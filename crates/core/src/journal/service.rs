//! Journal service: drafts, posting and correction entries.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use ucto_shared::LedgerConfig;
use ucto_shared::types::{
    AccountId, CompanyId, JournalEntryId, JournalLineId, PageRequest, PageResponse, UserId,
};

use super::error::JournalError;
use super::reversal::build_reversal;
use super::types::{EntryStatus, JournalEntry, JournalLine, NewJournalEntry};
use super::validation::{BALANCE_TOLERANCE, validate_for_posting, validate_new_lines};
use super::workflow::ensure_status;
use crate::accounts::AccountRepository;
use crate::period::{PeriodLockRepository, check_date};
use crate::repository::RepositoryError;

/// Repository trait for journal persistence.
pub trait JournalRepository: Send + Sync {
    /// Stores a new entry and returns it with its creation sequence assigned.
    fn insert_journal_entry(
        &self,
        entry: JournalEntry,
    ) -> impl Future<Output = Result<JournalEntry, RepositoryError>> + Send;

    /// Finds an entry with its lines.
    fn find_journal_entry(
        &self,
        id: JournalEntryId,
    ) -> impl Future<Output = Result<Option<JournalEntry>, RepositoryError>> + Send;

    /// Lists all entries of a company, in any order.
    fn list_journal_entries(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<JournalEntry>, RepositoryError>> + Send;

    /// Atomically moves a stored draft to `Posted`.
    ///
    /// Must compare the stored status and set it in one step. Returns the
    /// updated entry, or `None` if the entry is missing or no longer a draft.
    fn mark_posted(
        &self,
        id: JournalEntryId,
        posted_by: UserId,
        posted_at: chrono::DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<JournalEntry>, RepositoryError>> + Send;

    /// Returns true if any posted line references the account.
    fn account_has_postings(
        &self,
        account_id: AccountId,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Journal service.
///
/// Posting checks run in a fixed order: existence, state, period lock,
/// emptiness, balance, then the referenced accounts.
pub struct JournalService<R> {
    repo: Arc<R>,
    tolerance: Decimal,
}

impl<R> JournalService<R>
where
    R: JournalRepository + PeriodLockRepository + AccountRepository,
{
    /// Creates a journal service with the default balance tolerance.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            tolerance: BALANCE_TOLERANCE,
        }
    }

    /// Creates a journal service using the configured tolerance.
    #[must_use]
    pub fn with_config(repo: Arc<R>, config: &LedgerConfig) -> Self {
        Self {
            repo,
            tolerance: config.balance_tolerance,
        }
    }

    /// Saves a draft entry. Drafts may be empty or unbalanced.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for malformed lines or a repository error.
    pub async fn create_draft(&self, input: NewJournalEntry) -> Result<JournalEntry, JournalError> {
        validate_new_lines(&input.lines)?;

        let id = JournalEntryId::new();
        let lines = input
            .lines
            .into_iter()
            .zip(0u32..)
            .map(|(line, position)| JournalLine {
                id: JournalLineId::new(),
                entry_id: id,
                position,
                account_id: line.account_id,
                side: line.side,
                amount: line.amount,
                currency: line.currency,
                description: line.description,
                cost_center_id: line.cost_center_id,
                project_id: line.project_id,
            })
            .collect();

        let entry = JournalEntry {
            id,
            company_id: input.company_id,
            date: input.date,
            document_type: input.document_type,
            number: input.number,
            description: input.description,
            status: EntryStatus::Draft,
            sequence: 0,
            created_by: input.created_by,
            created_at: Utc::now(),
            posted_at: None,
            posted_by: None,
            reverses: input.reverses,
            lines,
        };
        let entry = self.repo.insert_journal_entry(entry).await?;

        debug!(
            entry_id = %entry.id,
            company_id = %entry.company_id,
            number = %entry.number,
            lines = entry.lines.len(),
            "Journal draft created"
        );
        Ok(entry)
    }

    /// Posts a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidState`, `PeriodLocked`, `EmptyEntry`,
    /// `UnbalancedEntry`, `UnknownAccount` or `InactiveAccount`. Nothing is
    /// persisted on failure.
    pub async fn post(
        &self,
        entry_id: JournalEntryId,
        posted_by: UserId,
    ) -> Result<JournalEntry, JournalError> {
        match self.try_post(entry_id, posted_by).await {
            Ok(entry) => {
                info!(
                    entry_id = %entry.id,
                    company_id = %entry.company_id,
                    number = %entry.number,
                    posted_by = %posted_by,
                    "Journal entry posted"
                );
                Ok(entry)
            }
            Err(err) => {
                warn!(
                    entry_id = %entry_id,
                    error_code = err.error_code(),
                    error = %err,
                    "Journal entry rejected"
                );
                Err(err)
            }
        }
    }

    async fn try_post(
        &self,
        entry_id: JournalEntryId,
        posted_by: UserId,
    ) -> Result<JournalEntry, JournalError> {
        let entry = self.get(entry_id).await?;
        ensure_status(&entry, EntryStatus::Draft)?;

        let locks = self.repo.list_period_locks(entry.company_id).await?;
        check_date(&locks, entry.date)?;

        validate_for_posting(&entry.lines, self.tolerance)?;
        self.check_accounts(&entry).await?;

        match self.repo.mark_posted(entry_id, posted_by, Utc::now()).await? {
            Some(posted) => Ok(posted),
            // Lost the race against a concurrent post.
            None => Err(JournalError::InvalidState {
                id: entry_id,
                status: EntryStatus::Posted,
                expected: EntryStatus::Draft,
            }),
        }
    }

    async fn check_accounts(&self, entry: &JournalEntry) -> Result<(), JournalError> {
        let account_ids: BTreeSet<AccountId> =
            entry.lines.iter().map(|line| line.account_id).collect();
        for account_id in account_ids {
            let account = self
                .repo
                .find_account(account_id)
                .await?
                .filter(|account| account.company_id == entry.company_id)
                .ok_or(JournalError::UnknownAccount(account_id))?;
            if !account.is_active {
                return Err(JournalError::InactiveAccount(account_id));
            }
        }
        Ok(())
    }

    /// Returns one entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry does not exist.
    pub async fn get(&self, entry_id: JournalEntryId) -> Result<JournalEntry, JournalError> {
        self.repo
            .find_journal_entry(entry_id)
            .await?
            .ok_or(JournalError::NotFound(entry_id))
    }

    /// Lists a company's entries ordered by date, then document number.
    ///
    /// # Errors
    ///
    /// Fails if the store fails.
    pub async fn list_by_company(
        &self,
        company_id: CompanyId,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, JournalError> {
        let mut entries = self.repo.list_journal_entries(company_id).await?;
        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.number.cmp(&b.number))
                .then_with(|| a.sequence.cmp(&b.sequence))
        });
        Ok(page.paginate(entries))
    }

    /// Creates a draft that reverses a posted entry.
    ///
    /// The original stays posted. The draft must be posted like any other.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidState` if the original is not posted.
    pub async fn create_reversal(
        &self,
        entry_id: JournalEntryId,
        date: NaiveDate,
        created_by: UserId,
    ) -> Result<JournalEntry, JournalError> {
        let original = self.get(entry_id).await?;
        let input = build_reversal(&original, date, created_by)?;
        let reversal = self.create_draft(input).await?;

        info!(
            entry_id = %reversal.id,
            reverses = %entry_id,
            "Reversal draft created"
        );
        Ok(reversal)
    }
}
