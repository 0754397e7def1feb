//! Chart of accounts service.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};
use ucto_shared::types::{AccountId, CompanyId};

use super::chart::ChartOfAccounts;
use super::error::AccountError;
use super::types::{Account, AccountCode, AccountType, NewAccount};
use crate::journal::JournalRepository;
use crate::repository::RepositoryError;

/// Repository trait for account persistence.
///
/// Implementations must reject a second account with the same
/// (company, code) with `RepositoryError::Conflict`.
pub trait AccountRepository: Send + Sync {
    /// Stores a new account.
    fn insert_account(
        &self,
        account: Account,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Finds an account by id.
    fn find_account(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Finds an account by company and code.
    fn find_account_by_code(
        &self,
        company_id: CompanyId,
        code: &AccountCode,
    ) -> impl Future<Output = Result<Option<Account>, RepositoryError>> + Send;

    /// Lists all accounts of a company, in any order.
    fn list_accounts(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<Account>, RepositoryError>> + Send;

    /// Replaces a stored account. Returns false if it does not exist.
    fn update_account(
        &self,
        account: Account,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Chart of accounts maintenance.
pub struct AccountService<R> {
    repo: Arc<R>,
}

impl<R> AccountService<R>
where
    R: AccountRepository + JournalRepository,
{
    /// Creates a new account service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Creates an account.
    ///
    /// When no type is given it is derived from the account class.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCode`, `TypeRequired` or `DuplicateAccount`.
    pub async fn create(&self, input: NewAccount) -> Result<Account, AccountError> {
        input.code.validate()?;
        let class = input.code.class();
        let account_type = match input.account_type {
            Some(account_type) => account_type,
            None => AccountType::default_for_class(class).ok_or(AccountError::TypeRequired(class))?,
        };

        if self
            .repo
            .find_account_by_code(input.company_id, &input.code)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateAccount(input.code.to_string()));
        }

        let account = Account {
            id: AccountId::new(),
            company_id: input.company_id,
            code: input.code,
            name: input.name,
            account_type,
            tax_relevant: input.tax_relevant,
            is_active: true,
        };
        self.repo.insert_account(account.clone()).await?;

        debug!(account_id = %account.id, code = %account.code, "Account created");
        Ok(account)
    }

    /// Returns one account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn get(&self, id: AccountId) -> Result<Account, AccountError> {
        self.repo
            .find_account(id)
            .await?
            .ok_or(AccountError::NotFound(id))
    }

    /// Returns a company's chart of accounts.
    ///
    /// # Errors
    ///
    /// Fails if stored data violates code uniqueness or the store fails.
    pub async fn chart(&self, company_id: CompanyId) -> Result<ChartOfAccounts, AccountError> {
        ChartOfAccounts::new(self.repo.list_accounts(company_id).await?)
    }

    /// Lists a company's accounts in code order.
    ///
    /// # Errors
    ///
    /// Fails if the store fails.
    pub async fn list_by_company(&self, company_id: CompanyId) -> Result<Vec<Account>, AccountError> {
        let mut accounts = self.repo.list_accounts(company_id).await?;
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    /// Changes an account's type unless posted lines reference it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidState`.
    pub async fn change_type(
        &self,
        id: AccountId,
        new_type: AccountType,
    ) -> Result<Account, AccountError> {
        let mut account = self.get(id).await?;
        let has_postings = self.repo.account_has_postings(id).await?;
        ChartOfAccounts::validate_type_change(&account, new_type, has_postings)?;

        let old_type = account.account_type;
        account.account_type = new_type;
        if !self.repo.update_account(account.clone()).await? {
            return Err(AccountError::NotFound(id));
        }

        info!(account_id = %id, from = %old_type, to = %new_type, "Account type changed");
        Ok(account)
    }

    /// Activates or deactivates an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn set_active(&self, id: AccountId, is_active: bool) -> Result<Account, AccountError> {
        let mut account = self.get(id).await?;
        account.is_active = is_active;
        if !self.repo.update_account(account.clone()).await? {
            return Err(AccountError::NotFound(id));
        }
        Ok(account)
    }
}
