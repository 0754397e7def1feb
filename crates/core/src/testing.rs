//! In-crate test doubles and builders.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use ucto_shared::types::{
    AccountId, AssetId, CompanyId, ContactId, Currency, InvoiceId, InvoiceItemId, JournalEntryId,
    JournalLineId, PeriodLockId, UserId,
};

use crate::accounts::{Account, AccountCode, AccountRepository, AccountType};
use crate::depreciation::{Asset, AssetDepreciation, AssetRepository};
use crate::journal::{
    DocumentType, EntryStatus, JournalEntry, JournalLine, JournalRepository, Side, apply_post,
};
use crate::period::{PeriodLock, PeriodLockRepository};
use crate::repository::RepositoryError;
use crate::tax::{
    Contact, ContactRepository, Invoice, InvoiceItem, InvoiceKind, InvoiceRepository,
    InvoiceStatus, SupplyKind, VatTreatment,
};

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    entries: Vec<JournalEntry>,
    next_sequence: u64,
    locks: Vec<PeriodLock>,
    assets: Vec<Asset>,
    depreciations: Vec<AssetDepreciation>,
    invoices: Vec<Invoice>,
    contacts: Vec<Contact>,
}

/// Repository double backed by vectors.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<State>,
}

impl MockStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Adds an active account and returns its id.
    pub fn put_account(&self, company_id: CompanyId, code: &str, account_type: AccountType) -> AccountId {
        let record = account(company_id, code, account_type);
        let id = record.id;
        self.put_account_record(record);
        id
    }

    pub fn put_account_record(&self, account: Account) {
        self.state().accounts.push(account);
    }

    /// Adds an entry as-is, keeping its sequence.
    pub fn put_entry(&self, entry: JournalEntry) {
        let mut state = self.state();
        state.next_sequence = state.next_sequence.max(entry.sequence);
        state.entries.push(entry);
    }

    pub fn put_lock(&self, lock: PeriodLock) {
        self.state().locks.push(lock);
    }
}

impl AccountRepository for MockStore {
    async fn insert_account(&self, account: Account) -> Result<(), RepositoryError> {
        let mut state = self.state();
        if state
            .accounts
            .iter()
            .any(|a| a.company_id == account.company_id && a.code == account.code)
        {
            return Err(RepositoryError::Conflict(account.code.to_string()));
        }
        state.accounts.push(account);
        Ok(())
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.state().accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        code: &AccountCode,
    ) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .state()
            .accounts
            .iter()
            .find(|a| a.company_id == company_id && &a.code == code)
            .cloned())
    }

    async fn list_accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, RepositoryError> {
        Ok(self
            .state()
            .accounts
            .iter()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn update_account(&self, account: Account) -> Result<bool, RepositoryError> {
        let mut state = self.state();
        match state.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(stored) => {
                *stored = account;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl JournalRepository for MockStore {
    async fn insert_journal_entry(&self, mut entry: JournalEntry) -> Result<JournalEntry, RepositoryError> {
        let mut state = self.state();
        state.next_sequence += 1;
        entry.sequence = state.next_sequence;
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn find_journal_entry(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, RepositoryError> {
        Ok(self.state().entries.iter().find(|e| e.id == id).cloned())
    }

    async fn list_journal_entries(&self, company_id: CompanyId) -> Result<Vec<JournalEntry>, RepositoryError> {
        Ok(self
            .state()
            .entries
            .iter()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn mark_posted(
        &self,
        id: JournalEntryId,
        posted_by: UserId,
        posted_at: DateTime<Utc>,
    ) -> Result<Option<JournalEntry>, RepositoryError> {
        let mut state = self.state();
        let Some(entry) = state.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        Ok(apply_post(entry, posted_by, posted_at).ok().map(|()| entry.clone()))
    }

    async fn account_has_postings(&self, account_id: AccountId) -> Result<bool, RepositoryError> {
        Ok(self.state().entries.iter().any(|e| {
            e.is_posted() && e.lines.iter().any(|line| line.account_id == account_id)
        }))
    }
}

impl PeriodLockRepository for MockStore {
    async fn list_period_locks(&self, company_id: CompanyId) -> Result<Vec<PeriodLock>, RepositoryError> {
        Ok(self
            .state()
            .locks
            .iter()
            .filter(|l| l.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn insert_period_lock(&self, lock: PeriodLock) -> Result<(), RepositoryError> {
        self.put_lock(lock);
        Ok(())
    }

    async fn set_period_locked(&self, id: PeriodLockId, locked: bool) -> Result<bool, RepositoryError> {
        let mut state = self.state();
        match state.locks.iter_mut().find(|l| l.id == id) {
            Some(lock) => {
                lock.locked = locked;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl AssetRepository for MockStore {
    async fn insert_asset(&self, asset: Asset) -> Result<(), RepositoryError> {
        self.state().assets.push(asset);
        Ok(())
    }

    async fn find_asset(&self, id: AssetId) -> Result<Option<Asset>, RepositoryError> {
        Ok(self.state().assets.iter().find(|a| a.id == id).cloned())
    }

    async fn list_assets(&self, company_id: CompanyId) -> Result<Vec<Asset>, RepositoryError> {
        Ok(self
            .state()
            .assets
            .iter()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn update_asset(&self, asset: Asset) -> Result<bool, RepositoryError> {
        let mut state = self.state();
        match state.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(stored) => {
                *stored = asset;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_depreciations(&self, asset_id: AssetId) -> Result<Vec<AssetDepreciation>, RepositoryError> {
        let mut rows: Vec<_> = self
            .state()
            .depreciations
            .iter()
            .filter(|d| d.asset_id == asset_id)
            .cloned()
            .collect();
        rows.sort_by_key(|d| d.year);
        Ok(rows)
    }

    async fn insert_depreciation(&self, record: AssetDepreciation) -> Result<(), RepositoryError> {
        let mut state = self.state();
        if state
            .depreciations
            .iter()
            .any(|d| d.asset_id == record.asset_id && d.year == record.year)
        {
            return Err(RepositoryError::Conflict(format!(
                "depreciation {} {}",
                record.asset_id, record.year
            )));
        }
        state.depreciations.push(record);
        Ok(())
    }
}

impl InvoiceRepository for MockStore {
    async fn insert_invoice(&self, invoice: Invoice) -> Result<(), RepositoryError> {
        self.state().invoices.push(invoice);
        Ok(())
    }

    async fn list_invoices(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Invoice>, RepositoryError> {
        Ok(self
            .state()
            .invoices
            .iter()
            .filter(|i| i.company_id == company_id && i.issue_date >= from && i.issue_date <= to)
            .cloned()
            .collect())
    }
}

impl ContactRepository for MockStore {
    async fn insert_contact(&self, contact: Contact) -> Result<(), RepositoryError> {
        self.state().contacts.push(contact);
        Ok(())
    }

    async fn list_contacts(&self, company_id: CompanyId) -> Result<Vec<Contact>, RepositoryError> {
        Ok(self
            .state()
            .contacts
            .iter()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect())
    }
}

/// An active account named after its code.
pub fn account(company_id: CompanyId, code: &str, account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        company_id,
        code: AccountCode::parse(code).unwrap(),
        name: format!("Account {code}"),
        account_type,
        tax_relevant: true,
        is_active: true,
    }
}

/// An entry with one line per `(account, debit, credit)` triple.
pub fn entry_on(
    company_id: CompanyId,
    date: NaiveDate,
    sequence: u64,
    posted: bool,
    lines: &[(AccountId, Decimal, Decimal)],
) -> JournalEntry {
    let id = JournalEntryId::new();
    let user = UserId::new();
    let lines = lines
        .iter()
        .zip(1..)
        .map(|(&(account_id, debit, credit), position)| {
            let (side, amount) = if debit.is_zero() {
                (Side::Credit, credit)
            } else {
                (Side::Debit, debit)
            };
            JournalLine {
                id: JournalLineId::new(),
                entry_id: id,
                position,
                account_id,
                side,
                amount,
                currency: Currency::Eur,
                description: None,
                cost_center_id: None,
                project_id: None,
            }
        })
        .collect();
    let now = Utc::now();
    JournalEntry {
        id,
        company_id,
        date,
        document_type: DocumentType::Internal,
        number: format!("ID{sequence:04}"),
        description: String::new(),
        status: if posted { EntryStatus::Posted } else { EntryStatus::Draft },
        sequence,
        created_by: user,
        created_at: now,
        posted_at: posted.then_some(now),
        posted_by: posted.then_some(user),
        reverses: None,
        lines,
    }
}

/// A posted entry dated 2025-01-15.
pub fn posted_entry(company_id: CompanyId, lines: &[(AccountId, Decimal, Decimal)]) -> JournalEntry {
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    entry_on(company_id, date, 1, true, lines)
}

/// An issued or received invoice in `Issued` status with no counterparty.
pub fn invoice(kind: InvoiceKind, number: &str, issue_date: NaiveDate, items: Vec<InvoiceItem>) -> Invoice {
    Invoice {
        id: InvoiceId::new(),
        company_id: CompanyId::new(),
        number: number.to_string(),
        kind,
        is_credit_note: false,
        original_number: None,
        issue_date,
        delivery_date: None,
        contact_id: None,
        status: InvoiceStatus::Issued,
        vat_treatment: VatTreatment::Standard,
        is_simplified: false,
        is_cash_register: false,
        items,
    }
}

/// A goods line.
pub fn item(base: Decimal, vat_rate: Option<Decimal>, vat_amount: Decimal) -> InvoiceItem {
    InvoiceItem {
        id: InvoiceItemId::new(),
        description: String::new(),
        base,
        vat_rate,
        vat_amount,
        supply: SupplyKind::Goods,
        commodity_code: None,
    }
}

/// A contact in `country`.
pub fn contact(country: &str, vat_id: Option<&str>, is_vat_payer: bool) -> Contact {
    Contact {
        id: ContactId::new(),
        company_id: CompanyId::new(),
        name: format!("Partner {country}"),
        country: country.to_string(),
        ico: None,
        dic: None,
        ic_dph: vat_id.map(str::to_string),
        is_vat_payer,
    }
}
