//! Repository implementations over in-process tables.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use ucto_core::RepositoryError;
use ucto_core::accounts::{Account, AccountCode, AccountRepository};
use ucto_core::depreciation::{Asset, AssetDepreciation, AssetRepository};
use ucto_core::journal::{JournalEntry, JournalRepository, apply_post};
use ucto_core::period::{PeriodLock, PeriodLockRepository};
use ucto_core::tax::{Contact, ContactRepository, Invoice, InvoiceRepository};
use ucto_shared::types::{
    AccountId, AssetId, CompanyId, ContactId, InvoiceId, JournalEntryId, PeriodLockId, UserId,
};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) accounts: HashMap<AccountId, Account>,
    pub(crate) entries: HashMap<JournalEntryId, JournalEntry>,
    pub(crate) next_sequence: u64,
    pub(crate) locks: HashMap<PeriodLockId, PeriodLock>,
    pub(crate) assets: HashMap<AssetId, Asset>,
    pub(crate) depreciations: BTreeMap<(AssetId, i32), AssetDepreciation>,
    pub(crate) invoices: HashMap<InvoiceId, Invoice>,
    pub(crate) contacts: HashMap<ContactId, Contact>,
}

impl Tables {
    fn code_taken(&self, account: &Account) -> bool {
        self.accounts.values().any(|existing| {
            existing.id != account.id
                && existing.company_id == account.company_id
                && existing.code == account.code
        })
    }

    pub(crate) fn add_account(&mut self, account: Account) -> Result<(), RepositoryError> {
        if self.code_taken(&account) || self.accounts.contains_key(&account.id) {
            return Err(RepositoryError::Conflict(format!(
                "account {} already exists in company {}",
                account.code, account.company_id
            )));
        }
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Stores an entry. A zero sequence is replaced by the next one.
    pub(crate) fn add_entry(&mut self, mut entry: JournalEntry) -> Result<JournalEntry, RepositoryError> {
        if self.entries.contains_key(&entry.id) {
            return Err(RepositoryError::Conflict(format!(
                "journal entry {} already exists",
                entry.id
            )));
        }
        if entry.sequence == 0 {
            self.next_sequence += 1;
            entry.sequence = self.next_sequence;
        } else {
            self.next_sequence = self.next_sequence.max(entry.sequence);
        }
        self.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    pub(crate) fn add_depreciation(&mut self, record: AssetDepreciation) -> Result<(), RepositoryError> {
        let key = (record.asset_id, record.year);
        if self.depreciations.contains_key(&key) {
            return Err(RepositoryError::Conflict(format!(
                "depreciation for asset {} in {} already recorded",
                record.asset_id, record.year
            )));
        }
        self.depreciations.insert(key, record);
        Ok(())
    }
}

/// In-memory store implementing every core repository trait.
///
/// All tables sit behind one lock. Writes that must be atomic, such as
/// posting a draft, run entirely under the write guard.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Number of stored journal entries.
    pub async fn entry_count(&self) -> usize {
        self.tables.read().await.entries.len()
    }
}

impl AccountRepository for MemoryStore {
    async fn insert_account(&self, account: Account) -> Result<(), RepositoryError> {
        self.tables.write().await.add_account(account)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        code: &AccountCode,
    ) -> Result<Option<Account>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|account| account.company_id == company_id && &account.code == code)
            .cloned())
    }

    async fn list_accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .filter(|account| account.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn update_account(&self, account: Account) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.accounts.contains_key(&account.id) {
            return Ok(false);
        }
        if tables.code_taken(&account) {
            return Err(RepositoryError::Conflict(format!(
                "account {} already exists in company {}",
                account.code, account.company_id
            )));
        }
        tables.accounts.insert(account.id, account);
        Ok(true)
    }
}

impl JournalRepository for MemoryStore {
    async fn insert_journal_entry(
        &self,
        mut entry: JournalEntry,
    ) -> Result<JournalEntry, RepositoryError> {
        entry.sequence = 0;
        self.tables.write().await.add_entry(entry)
    }

    async fn find_journal_entry(
        &self,
        id: JournalEntryId,
    ) -> Result<Option<JournalEntry>, RepositoryError> {
        Ok(self.tables.read().await.entries.get(&id).cloned())
    }

    async fn list_journal_entries(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<JournalEntry>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .entries
            .values()
            .filter(|entry| entry.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn mark_posted(
        &self,
        id: JournalEntryId,
        posted_by: UserId,
        posted_at: DateTime<Utc>,
    ) -> Result<Option<JournalEntry>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.entries.get_mut(&id) else {
            return Ok(None);
        };
        match apply_post(entry, posted_by, posted_at) {
            Ok(()) => {
                debug!(entry_id = %id, "Entry marked posted");
                Ok(Some(entry.clone()))
            }
            Err(err) => {
                warn!(entry_id = %id, error = %err, "Conditional post lost");
                Ok(None)
            }
        }
    }

    async fn account_has_postings(&self, account_id: AccountId) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.entries.values().any(|entry| {
            entry.is_posted() && entry.lines.iter().any(|line| line.account_id == account_id)
        }))
    }
}

impl PeriodLockRepository for MemoryStore {
    async fn list_period_locks(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<PeriodLock>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut locks: Vec<_> = tables
            .locks
            .values()
            .filter(|lock| lock.company_id == company_id)
            .cloned()
            .collect();
        locks.sort_by_key(|lock| (lock.period_start, lock.period_end));
        Ok(locks)
    }

    async fn insert_period_lock(&self, lock: PeriodLock) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.locks.contains_key(&lock.id) {
            return Err(RepositoryError::Conflict(format!(
                "period lock {} already exists",
                lock.id
            )));
        }
        tables.locks.insert(lock.id, lock);
        Ok(())
    }

    async fn set_period_locked(&self, id: PeriodLockId, locked: bool) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        Ok(tables.locks.get_mut(&id).map(|lock| lock.locked = locked).is_some())
    }
}

impl AssetRepository for MemoryStore {
    async fn insert_asset(&self, asset: Asset) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.assets.contains_key(&asset.id) {
            return Err(RepositoryError::Conflict(format!("asset {} already exists", asset.id)));
        }
        tables.assets.insert(asset.id, asset);
        Ok(())
    }

    async fn find_asset(&self, id: AssetId) -> Result<Option<Asset>, RepositoryError> {
        Ok(self.tables.read().await.assets.get(&id).cloned())
    }

    async fn list_assets(&self, company_id: CompanyId) -> Result<Vec<Asset>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut assets: Vec<_> = tables
            .assets
            .values()
            .filter(|asset| asset.company_id == company_id)
            .cloned()
            .collect();
        assets.sort_by(|a, b| {
            a.acquisition_date
                .cmp(&b.acquisition_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(assets)
    }

    async fn update_asset(&self, asset: Asset) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        match tables.assets.get_mut(&asset.id) {
            Some(stored) => {
                *stored = asset;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_depreciations(
        &self,
        asset_id: AssetId,
    ) -> Result<Vec<AssetDepreciation>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .depreciations
            .range((asset_id, i32::MIN)..=(asset_id, i32::MAX))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn insert_depreciation(&self, record: AssetDepreciation) -> Result<(), RepositoryError> {
        self.tables.write().await.add_depreciation(record)
    }
}

impl InvoiceRepository for MemoryStore {
    async fn insert_invoice(&self, invoice: Invoice) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.invoices.contains_key(&invoice.id) {
            return Err(RepositoryError::Conflict(format!(
                "invoice {} already exists",
                invoice.number
            )));
        }
        tables.invoices.insert(invoice.id, invoice);
        Ok(())
    }

    async fn list_invoices(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut invoices: Vec<_> = tables
            .invoices
            .values()
            .filter(|invoice| {
                invoice.company_id == company_id
                    && invoice.issue_date >= from
                    && invoice.issue_date <= to
            })
            .cloned()
            .collect();
        invoices.sort_by(|a, b| {
            a.issue_date
                .cmp(&b.issue_date)
                .then_with(|| a.number.cmp(&b.number))
        });
        Ok(invoices)
    }
}

impl ContactRepository for MemoryStore {
    async fn insert_contact(&self, contact: Contact) -> Result<(), RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.contacts.contains_key(&contact.id) {
            return Err(RepositoryError::Conflict(format!(
                "contact {} already exists",
                contact.id
            )));
        }
        tables.contacts.insert(contact.id, contact);
        Ok(())
    }

    async fn list_contacts(&self, company_id: CompanyId) -> Result<Vec<Contact>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .values()
            .filter(|contact| contact.company_id == company_id)
            .cloned()
            .collect())
    }
}
