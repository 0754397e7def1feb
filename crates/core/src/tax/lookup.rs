//! Shared helpers for the VAT computations.

use std::collections::HashMap;

use tracing::warn;
use ucto_shared::types::{ContactId, InvoiceItemId};

use super::types::{Contact, Invoice, TaxWarning, WarningReason};

/// Contact registry indexed by id.
pub(crate) struct Counterparties<'a> {
    by_id: HashMap<ContactId, &'a Contact>,
}

impl<'a> Counterparties<'a> {
    pub(crate) fn new(contacts: &'a [Contact]) -> Self {
        Self {
            by_id: contacts.iter().map(|contact| (contact.id, contact)).collect(),
        }
    }

    /// The invoice's counterparty, if it has one and it is registered.
    pub(crate) fn of(&self, invoice: &Invoice) -> Option<&'a Contact> {
        invoice
            .contact_id
            .and_then(|id| self.by_id.get(&id).copied())
    }
}

/// Collects skipped lines and logs each one.
#[derive(Debug, Default)]
pub(crate) struct WarningLog {
    warnings: Vec<TaxWarning>,
}

impl WarningLog {
    pub(crate) fn push(
        &mut self,
        invoice: &Invoice,
        item_id: Option<InvoiceItemId>,
        reason: WarningReason,
    ) {
        warn!(
            invoice_number = %invoice.number,
            item_id = ?item_id,
            reason = %reason,
            "Invoice line left out of VAT figures"
        );
        self.warnings.push(TaxWarning {
            invoice_number: invoice.number.clone(),
            item_id,
            reason,
        });
    }

    pub(crate) fn into_inner(self) -> Vec<TaxWarning> {
        self.warnings
    }
}
