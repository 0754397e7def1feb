//! VAT service: loads a company's invoices and contacts and runs the
//! computations.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use ucto_shared::TaxConfig;
use ucto_shared::types::CompanyId;

use super::dph::{PeriodicReturn, calculate_dph};
use super::error::TaxError;
use super::kv_dph::{ControlStatement, calculate_kv_dph};
use super::sv::{SummaryStatement, calculate_sv};
use super::types::{Contact, Invoice, TaxPeriod};
use crate::repository::RepositoryError;

/// Repository trait for invoices.
pub trait InvoiceRepository: Send + Sync {
    /// Stores an invoice with its lines.
    fn insert_invoice(
        &self,
        invoice: Invoice,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Lists a company's invoices issued between `from` and `to` inclusive,
    /// in any status.
    fn list_invoices(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Invoice>, RepositoryError>> + Send;
}

/// Repository trait for business partners.
pub trait ContactRepository: Send + Sync {
    /// Stores a contact.
    fn insert_contact(
        &self,
        contact: Contact,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Lists a company's contacts.
    fn list_contacts(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<Contact>, RepositoryError>> + Send;
}

/// VAT reporting service.
pub struct TaxService<R> {
    repo: Arc<R>,
    home_country: String,
}

impl<R: InvoiceRepository + ContactRepository> TaxService<R> {
    /// Creates a service for a Slovak VAT registration.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self::with_config(repo, &TaxConfig::default())
    }

    /// Creates a service using the configured VAT country.
    #[must_use]
    pub fn with_config(repo: Arc<R>, config: &TaxConfig) -> Self {
        Self {
            repo,
            home_country: config.vat_country.to_uppercase(),
        }
    }

    fn period(&self, from: NaiveDate, to: NaiveDate) -> Result<TaxPeriod, TaxError> {
        Ok(TaxPeriod::new(from, to)?.with_home_country(self.home_country.clone()))
    }

    async fn load(
        &self,
        company_id: CompanyId,
        period: &TaxPeriod,
    ) -> Result<(Vec<Invoice>, Vec<Contact>), TaxError> {
        let invoices = self
            .repo
            .list_invoices(company_id, period.from, period.to)
            .await?;
        let contacts = self.repo.list_contacts(company_id).await?;
        debug!(
            company_id = %company_id,
            from = %period.from,
            to = %period.to,
            invoices = invoices.len(),
            contacts = contacts.len(),
            "Loaded VAT data"
        );
        Ok((invoices, contacts))
    }

    /// Computes the periodic VAT return.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` or a repository failure.
    pub async fn periodic_return(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PeriodicReturn, TaxError> {
        let period = self.period(from, to)?;
        let (invoices, _) = self.load(company_id, &period).await?;
        let result = calculate_dph(&period, &invoices);
        debug!(
            company_id = %company_id,
            net_liability = %result.net_liability,
            warnings = result.warnings.len(),
            "VAT return computed"
        );
        Ok(result)
    }

    /// Builds the control statement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` or a repository failure.
    pub async fn control_statement(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ControlStatement, TaxError> {
        let period = self.period(from, to)?;
        let (invoices, contacts) = self.load(company_id, &period).await?;
        let result = calculate_kv_dph(&period, &invoices, &contacts);
        debug!(
            company_id = %company_id,
            counts = ?result.counts(),
            warnings = result.warnings.len(),
            "Control statement built"
        );
        Ok(result)
    }

    /// Builds the EU summary statement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` or a repository failure.
    pub async fn summary_statement(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SummaryStatement, TaxError> {
        let period = self.period(from, to)?;
        let (invoices, contacts) = self.load(company_id, &period).await?;
        let result = calculate_sv(&period, &invoices, &contacts);
        debug!(
            company_id = %company_id,
            rows = result.rows.len(),
            warnings = result.warnings.len(),
            "Summary statement built"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::tax::types::{InvoiceKind, VatTreatment};
    use crate::testing::{MockStore, contact, invoice, item};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> (Arc<MockStore>, CompanyId) {
        let store = Arc::new(MockStore::default());
        let company = CompanyId::new();

        let mut customer = contact("SK", Some("SK2020123456"), true);
        customer.company_id = company;
        let mut eu_customer = contact("HU", Some("HU12345678"), true);
        eu_customer.company_id = company;

        let mut sale = invoice(
            InvoiceKind::Issued,
            "FV2025040",
            date(2025, 6, 3),
            vec![item(dec!(1000.00), Some(dec!(23)), dec!(230.00))],
        );
        sale.company_id = company;
        sale.contact_id = Some(customer.id);

        let mut eu_sale = invoice(
            InvoiceKind::Issued,
            "FV2025041",
            date(2025, 6, 4),
            vec![item(dec!(800.00), None, Decimal::ZERO)],
        );
        eu_sale.company_id = company;
        eu_sale.contact_id = Some(eu_customer.id);
        eu_sale.vat_treatment = VatTreatment::IntraCommunity;

        let mut other_company = sale.clone();
        other_company.company_id = CompanyId::new();
        other_company.number = "FV2025099".into();

        store.insert_contact(customer).await.unwrap();
        store.insert_contact(eu_customer).await.unwrap();
        store.insert_invoice(sale).await.unwrap();
        store.insert_invoice(eu_sale).await.unwrap();
        store.insert_invoice(other_company).await.unwrap();
        (store, company)
    }

    #[tokio::test]
    async fn test_periodic_return_for_company() {
        let (store, company) = seeded().await;
        let service = TaxService::new(store);

        let result = service
            .periodic_return(company, date(2025, 6, 1), date(2025, 6, 30))
            .await
            .unwrap();

        assert_eq!(result.total_output_vat, dec!(230.00));
        assert_eq!(result.intra_community_supply_base, dec!(800.00));
        assert_eq!(result.period.home_country, "SK");
    }

    #[tokio::test]
    async fn test_control_statement_for_company() {
        let (store, company) = seeded().await;
        let service = TaxService::new(store);

        let kv = service
            .control_statement(company, date(2025, 6, 1), date(2025, 6, 30))
            .await
            .unwrap();

        assert_eq!(kv.counts().a1, 1);
        assert_eq!(kv.a1[0].invoice_number, "FV2025040");
    }

    #[tokio::test]
    async fn test_summary_statement_for_company() {
        let (store, company) = seeded().await;
        let service = TaxService::new(store);

        let sv = service
            .summary_statement(company, date(2025, 6, 1), date(2025, 6, 30))
            .await
            .unwrap();

        assert_eq!(sv.rows.len(), 1);
        assert_eq!(sv.rows[0].counterparty_vat_id, "HU12345678");
        assert_eq!(sv.rows[0].total_base, dec!(800.00));
    }

    #[tokio::test]
    async fn test_configured_home_country() {
        let (store, company) = seeded().await;
        let config = TaxConfig {
            vat_country: "hu".into(),
        };
        let service = TaxService::with_config(store, &config);

        let sv = service
            .summary_statement(company, date(2025, 6, 1), date(2025, 6, 30))
            .await
            .unwrap();

        assert!(sv.rows.is_empty());
        assert_eq!(sv.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_inverted_period_rejected() {
        let (store, company) = seeded().await;
        let service = TaxService::new(store);

        let err = service
            .periodic_return(company, date(2025, 7, 1), date(2025, 6, 30))
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "INVALID_TAX_PERIOD");
    }
}
