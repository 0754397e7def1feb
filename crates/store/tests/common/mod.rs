//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use ucto_core::accounts::{AccountCode, AccountService, NewAccount};
use ucto_core::journal::{DocumentType, NewJournalEntry, NewJournalLine, Side};
use ucto_shared::types::{AccountId, CompanyId, UserId};
use ucto_store::MemoryStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A company with a small chart of accounts.
pub struct Books {
    pub store: Arc<MemoryStore>,
    pub company: CompanyId,
    pub user: UserId,
    /// 221 Bankové účty
    pub bank: AccountId,
    /// 321 Dodávatelia
    pub suppliers: AccountId,
    /// 518 Ostatné služby
    pub services: AccountId,
    /// 602 Tržby z predaja služieb
    pub revenue: AccountId,
}

pub async fn books() -> Books {
    let store = Arc::new(MemoryStore::new());
    let accounts = AccountService::new(Arc::clone(&store));
    let company = CompanyId::new();

    let mut ids = Vec::new();
    for code in ["221", "321", "518", "602"] {
        let account = accounts
            .create(NewAccount {
                company_id: company,
                code: AccountCode::parse(code).unwrap(),
                name: format!("Účet {code}"),
                account_type: None,
                tax_relevant: true,
            })
            .await
            .unwrap();
        ids.push(account.id);
    }

    Books {
        store,
        company,
        user: UserId::new(),
        bank: ids[0],
        suppliers: ids[1],
        services: ids[2],
        revenue: ids[3],
    }
}

/// Draft input with one debit and one credit line.
pub fn transfer(
    books: &Books,
    on: NaiveDate,
    debit: (AccountId, Decimal),
    credit: (AccountId, Decimal),
) -> NewJournalEntry {
    NewJournalEntry {
        company_id: books.company,
        date: on,
        document_type: DocumentType::Internal,
        number: format!("ID{}", on.format("%Y%m%d")),
        description: "Test entry".to_string(),
        lines: vec![
            NewJournalLine::new(debit.0, Side::Debit, debit.1),
            NewJournalLine::new(credit.0, Side::Credit, credit.1),
        ],
        created_by: books.user,
        reverses: None,
    }
}
