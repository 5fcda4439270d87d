// Reporting projections: GST summary, outstanding receivables, received
// payments. All read-only; the scenario below exercises exclusions and
// every filter.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sqlx::SqlitePool;

use gstbill::config::DatabaseConfig;
use gstbill::invoices::{
    AllottedDetails, InvoiceService, InvoiceStatus, NewInvoice, NewInvoiceItem,
};
use gstbill::masters::{ClientRepository, ClientUpdate, Gstin, NewOffice, OfficeRepository};
use gstbill::payments::{NewPayment, PaymentService};
use gstbill::reports::{PendingFilter, ReportService};
use gstbill::taxes::{GstRate, TaxType};

const ACME_GSTIN: &str = "29AAAAA0000A1Z5";
const ZENITH_GSTIN: &str = "27BBBBB1111B1Z4";

struct Fixture {
    invoices: InvoiceService,
    payments: PaymentService,
    reports: ReportService,
    office_id: i64,
}

async fn setup() -> (SqlitePool, Fixture) {
    let pool = DatabaseConfig::in_memory()
        .create_pool()
        .await
        .expect("Failed to create in-memory database");

    let office_id = OfficeRepository::new(pool.clone())
        .create(&NewOffice {
            firm_name: "AGARWAL & ASSOCIATES".to_string(),
            address: "12 MG Road, Bengaluru".to_string(),
            gstin: "29AAACA1111A1Z5".to_string(),
            pan: "AAACA1111A".to_string(),
            email: None,
        })
        .await
        .unwrap();

    let clients = ClientRepository::new(pool.clone());
    clients
        .create(
            &Gstin::parse(ACME_GSTIN).unwrap(),
            &ClientUpdate {
                client_name: "Acme Traders".to_string(),
                address: None,
                email: None,
                phone: None,
            },
        )
        .await
        .unwrap();
    clients
        .create(
            &Gstin::parse(ZENITH_GSTIN).unwrap(),
            &ClientUpdate {
                client_name: "Zenith Exports".to_string(),
                address: None,
                email: None,
                phone: None,
            },
        )
        .await
        .unwrap();

    let fixture = Fixture {
        invoices: InvoiceService::new(pool.clone(), "A4CA"),
        payments: PaymentService::new(pool.clone()),
        reports: ReportService::new(pool.clone()),
        office_id,
    };

    (pool, fixture)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

impl Fixture {
    async fn invoice(
        &self,
        gstin: &str,
        invoice_date: NaiveDate,
        amount: rust_decimal::Decimal,
        gst_rate: GstRate,
        tax_type: TaxType,
        bank: &str,
        branch: &str,
    ) -> i64 {
        let (id, _) = self
            .invoices
            .create_invoice(NewInvoice {
                client_gstin: gstin.to_string(),
                office_id: self.office_id,
                invoice_date,
                items: vec![NewInvoiceItem {
                    description: "Professional services".to_string(),
                    hsn_code: Some("9982".to_string()),
                    amount,
                    gst_rate,
                }],
                tax_type,
                allotted: AllottedDetails {
                    bank: Some(bank.to_string()),
                    branch: Some(branch.to_string()),
                    city: Some("Bengaluru".to_string()),
                    place_of_supply: Some("Karnataka".to_string()),
                },
                manual_number: None,
            })
            .await
            .unwrap();
        id
    }

    /// Two live invoices and one cancelled, plus a partial payment:
    /// - Acme, Apr 2025, 5000 @ 12% intra-state -> 5600, 1000 received
    /// - Zenith, May 2025, 10000 @ 18% inter-state -> 11800, unpaid
    /// - Acme, Apr 2025, 2000 @ 18% inter-state, then cancelled
    async fn standard_scenario(&self) -> (i64, i64, i64) {
        let acme = self
            .invoice(
                ACME_GSTIN,
                date(2025, 4, 10),
                dec!(5000),
                GstRate::Twelve,
                TaxType::CgstSgst,
                "HDFC Bank",
                "Koramangala",
            )
            .await;

        let zenith = self
            .invoice(
                ZENITH_GSTIN,
                date(2025, 5, 3),
                dec!(10000),
                GstRate::Eighteen,
                TaxType::Igst,
                "ICICI Bank",
                "MG Road",
            )
            .await;

        let cancelled = self
            .invoice(
                ACME_GSTIN,
                date(2025, 4, 20),
                dec!(2000),
                GstRate::Eighteen,
                TaxType::Igst,
                "HDFC Bank",
                "Koramangala",
            )
            .await;
        self.invoices
            .change_status(cancelled, InvoiceStatus::Cancelled)
            .await
            .unwrap();

        self.payments
            .add_payment(NewPayment {
                invoice_id: acme,
                amount: dec!(1000),
                payment_date: date(2025, 5, 15),
                payment_mode: Some("NEFT".to_string()),
                reference_number: Some("UTR0001".to_string()),
                notes: None,
            })
            .await
            .unwrap();

        (acme, zenith, cancelled)
    }
}

#[tokio::test]
async fn test_gst_summary_excludes_cancelled() {
    let (_pool, fx) = setup().await;
    fx.standard_scenario().await;

    let summary = fx.reports.gst_summary("2526", None).await.unwrap();

    assert_eq!(summary.total_taxable, dec!(15000.00));
    assert_eq!(summary.total_cgst, dec!(300.00));
    assert_eq!(summary.total_sgst, dec!(300.00));
    assert_eq!(summary.total_igst, dec!(1800.00));
    assert_eq!(summary.total_revenue, dec!(17400.00));
}

#[tokio::test]
async fn test_gst_summary_month_filter() {
    let (_pool, fx) = setup().await;
    fx.standard_scenario().await;

    let april = fx.reports.gst_summary("2526", Some("04")).await.unwrap();
    assert_eq!(april.total_taxable, dec!(5000.00));
    assert_eq!(april.total_revenue, dec!(5600.00));

    let may = fx.reports.gst_summary("2526", Some("05")).await.unwrap();
    assert_eq!(may.total_igst, dec!(1800.00));
    assert_eq!(may.total_revenue, dec!(11800.00));

    // A bucket with nothing in it sums to zero, not an error
    let empty = fx.reports.gst_summary("2526", Some("12")).await.unwrap();
    assert_eq!(empty.total_revenue, dec!(0));
}

#[tokio::test]
async fn test_pending_payments_balances_and_exclusions() {
    let (_pool, fx) = setup().await;
    let (acme, zenith, _) = fx.standard_scenario().await;

    let pending = fx
        .reports
        .pending_payments(&PendingFilter::default())
        .await
        .unwrap();

    // Cancelled is out; ordered by invoice date
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].invoice_id, acme);
    assert_eq!(pending[0].status, InvoiceStatus::PartiallyPaid);
    assert_eq!(pending[0].total_received, dec!(1000.00));
    assert_eq!(pending[0].balance_due, dec!(4600.00));

    assert_eq!(pending[1].invoice_id, zenith);
    assert_eq!(pending[1].status, InvoiceStatus::Generated);
    assert_eq!(pending[1].total_received, dec!(0));
    assert_eq!(pending[1].balance_due, dec!(11800.00));
}

#[tokio::test]
async fn test_pending_payments_filters() {
    let (_pool, fx) = setup().await;
    let (acme, zenith, _) = fx.standard_scenario().await;

    let by_bank = fx
        .reports
        .pending_payments(&PendingFilter {
            bank: Some("HDFC".to_string()),
            ..PendingFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_bank.len(), 1);
    assert_eq!(by_bank[0].invoice_id, acme);

    let by_branch = fx
        .reports
        .pending_payments(&PendingFilter {
            branch: Some("MG".to_string()),
            ..PendingFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_branch.len(), 1);
    assert_eq!(by_branch[0].invoice_id, zenith);

    let by_client = fx
        .reports
        .pending_payments(&PendingFilter {
            client_gstin: Some(ZENITH_GSTIN.to_string()),
            ..PendingFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_client.len(), 1);
    assert_eq!(by_client[0].client_name, "Zenith Exports");

    let by_month = fx
        .reports
        .pending_payments(&PendingFilter {
            month: Some("04".to_string()),
            financial_year: Some("2526".to_string()),
            ..PendingFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_month.len(), 1);
    assert_eq!(by_month[0].invoice_id, acme);
}

#[tokio::test]
async fn test_fully_paid_invoices_leave_the_pending_list() {
    let (_pool, fx) = setup().await;
    let (acme, zenith, _) = fx.standard_scenario().await;

    fx.payments
        .add_payment(NewPayment {
            invoice_id: zenith,
            amount: dec!(11800),
            payment_date: date(2025, 6, 1),
            payment_mode: Some("IMPS".to_string()),
            reference_number: None,
            notes: None,
        })
        .await
        .unwrap();

    let pending = fx
        .reports
        .pending_payments(&PendingFilter::default())
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].invoice_id, acme);
}

#[tokio::test]
async fn test_received_payments_follow_the_invoice_bucket() {
    let (_pool, fx) = setup().await;
    fx.standard_scenario().await;

    let all = fx.reports.received_payments(None, Some("2526")).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].client_name, "Acme Traders");
    assert_eq!(all[0].amount_received, dec!(1000.00));
    assert_eq!(all[0].payment_mode.as_deref(), Some("NEFT"));

    // The payment was received in May, but its invoice is in the April
    // bucket; the ledger filters by the invoice's month
    let april = fx
        .reports
        .received_payments(Some("04"), Some("2526"))
        .await
        .unwrap();
    assert_eq!(april.len(), 1);

    let may = fx
        .reports
        .received_payments(Some("05"), Some("2526"))
        .await
        .unwrap();
    assert!(may.is_empty());
}
