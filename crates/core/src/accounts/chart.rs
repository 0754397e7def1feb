//! In-memory chart of accounts registry.

use std::collections::{BTreeMap, HashMap};

use ucto_shared::types::AccountId;

use super::error::AccountError;
use super::types::{Account, AccountCode, AccountType};

/// A company's chart of accounts, indexed by id and ordered by code.
#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    by_code: BTreeMap<AccountCode, Account>,
    codes: HashMap<AccountId, AccountCode>,
}

impl ChartOfAccounts {
    /// Builds a registry, enforcing code validity and uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCode` for a malformed code and `DuplicateAccount`
    /// when two accounts share a code.
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Result<Self, AccountError> {
        let mut chart = Self::default();
        for account in accounts {
            chart.insert(account)?;
        }
        Ok(chart)
    }

    /// Adds one account.
    ///
    /// # Errors
    ///
    /// Same as [`ChartOfAccounts::new`].
    pub fn insert(&mut self, account: Account) -> Result<(), AccountError> {
        account.code.validate()?;
        if self.by_code.contains_key(&account.code) {
            return Err(AccountError::DuplicateAccount(account.code.to_string()));
        }
        self.codes.insert(account.id, account.code.clone());
        self.by_code.insert(account.code.clone(), account);
        Ok(())
    }

    /// Looks an account up by id.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.codes.get(&id).and_then(|code| self.by_code.get(code))
    }

    /// Looks an account up by code.
    #[must_use]
    pub fn by_code(&self, code: &AccountCode) -> Option<&Account> {
        self.by_code.get(code)
    }

    /// Iterates all accounts in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.by_code.values()
    }

    /// Iterates active accounts in code order.
    pub fn active(&self) -> impl Iterator<Item = &Account> {
        self.iter().filter(|a| a.is_active)
    }

    /// Analytic children of a synthetic account, in code order.
    pub fn children_of<'a>(&'a self, parent: &'a AccountCode) -> impl Iterator<Item = &'a Account> {
        self.iter().filter(move |a| parent.is_parent_of(&a.code))
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Checks whether an account's type may change.
    ///
    /// The type decides statement placement, so it is frozen once any posted
    /// line references the account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when `has_postings` is true and the type differs.
    pub fn validate_type_change(
        account: &Account,
        new_type: AccountType,
        has_postings: bool,
    ) -> Result<(), AccountError> {
        if account.account_type != new_type && has_postings {
            return Err(AccountError::InvalidState(format!(
                "account {} has posted lines; type cannot change from {} to {}",
                account.code, account.account_type, new_type
            )));
        }
        Ok(())
    }
}
