// Master records: office lifecycle, client identity rules, branch
// composite uniqueness.

use sqlx::SqlitePool;

use gstbill::config::DatabaseConfig;
use gstbill::masters::{
    BranchRepository, ClientRepository, ClientUpdate, Gstin, NewBranch, NewOffice, OfficeRepository,
    OfficeStatus,
};

async fn test_pool() -> SqlitePool {
    DatabaseConfig::in_memory()
        .create_pool()
        .await
        .expect("Failed to create in-memory database")
}

fn office(firm_name: &str) -> NewOffice {
    NewOffice {
        firm_name: firm_name.to_string(),
        address: "12 MG Road, Bengaluru".to_string(),
        gstin: "29AAACA1111A1Z5".to_string(),
        pan: "AAACA1111A".to_string(),
        email: None,
    }
}

fn branch(bank: &str, name: &str) -> NewBranch {
    NewBranch {
        branch_name: name.to_string(),
        city: "Bengaluru".to_string(),
        bank_name: bank.to_string(),
        ifsc_code: "HDFC0000123".to_string(),
        account_number: "50100123456789".to_string(),
    }
}

#[tokio::test]
async fn test_archived_offices_stay_but_leave_selection() {
    let pool = test_pool().await;
    let offices = OfficeRepository::new(pool.clone());

    let head = offices.create(&office("Head Office")).await.unwrap();
    let annex = offices.create(&office("Annex Office")).await.unwrap();

    assert_eq!(offices.list_active().await.unwrap().len(), 2);

    offices.archive(annex).await.unwrap();

    let active = offices.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, head);

    // Soft delete: the row is still there, just archived
    let archived = offices.find_by_id(annex).await.unwrap().unwrap();
    assert_eq!(archived.status, OfficeStatus::Archived);
    assert_eq!(archived.firm_name, "Annex Office");
}

#[tokio::test]
async fn test_office_update_and_missing_ids() {
    let pool = test_pool().await;
    let offices = OfficeRepository::new(pool.clone());

    let id = offices.create(&office("Head Office")).await.unwrap();

    let mut changed = office("Head Office");
    changed.address = "New Wing, Residency Road".to_string();
    changed.email = Some("office@example.in".to_string());
    offices.update(id, &changed).await.unwrap();

    let reloaded = offices.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(reloaded.address, "New Wing, Residency Road");
    assert_eq!(reloaded.email.as_deref(), Some("office@example.in"));

    assert!(offices.update(999, &changed).await.is_err());
    assert!(offices.archive(999).await.is_err());
}

#[tokio::test]
async fn test_client_gstin_is_validated_and_unique() {
    let pool = test_pool().await;
    let clients = ClientRepository::new(pool.clone());

    let details = ClientUpdate {
        client_name: "Acme Traders".to_string(),
        address: None,
        email: None,
        phone: None,
    };

    // Malformed registration numbers never reach the store
    assert!(Gstin::parse("NOT-A-GSTIN").is_err());
    assert!(Gstin::parse("99ZZZZZ9999Z0Z9").is_err());

    let gstin = Gstin::parse("29AAAAA0000A1Z5").unwrap();
    clients.create(&gstin, &details).await.unwrap();

    // The key cannot be reused for another client
    let err = clients
        .create(
            &gstin,
            &ClientUpdate {
                client_name: "Different Company".to_string(),
                address: None,
                email: None,
                phone: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already exists"), "got: {}", err);

    // The original row is untouched
    let stored = clients.find_by_gstin(gstin.as_str()).await.unwrap().unwrap();
    assert_eq!(stored.client_name, "Acme Traders");
}

#[tokio::test]
async fn test_client_attributes_are_mutable_in_place() {
    let pool = test_pool().await;
    let clients = ClientRepository::new(pool.clone());

    let gstin = Gstin::parse("29AAAAA0000A1Z5").unwrap();
    clients
        .create(
            &gstin,
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
        .update(
            gstin.as_str(),
            &ClientUpdate {
                client_name: "Acme Traders Pvt Ltd".to_string(),
                address: Some("4 Residency Road".to_string()),
                email: Some("accounts@acme.in".to_string()),
                phone: Some("+91 80 4000 0000".to_string()),
            },
        )
        .await
        .unwrap();

    let stored = clients.find_by_gstin(gstin.as_str()).await.unwrap().unwrap();
    assert_eq!(stored.client_name, "Acme Traders Pvt Ltd");
    assert_eq!(stored.phone.as_deref(), Some("+91 80 4000 0000"));

    assert!(clients
        .update("27BBBBB1111B1Z4", &ClientUpdate {
            client_name: "Ghost".to_string(),
            address: None,
            email: None,
            phone: None,
        })
        .await
        .is_err());
}

#[tokio::test]
async fn test_branch_identity_is_bank_plus_name() {
    let pool = test_pool().await;
    let branches = BranchRepository::new(pool.clone());

    branches.create(&branch("HDFC Bank", "Koramangala")).await.unwrap();

    // Same pair again is rejected
    let err = branches
        .create(&branch("HDFC Bank", "Koramangala"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already exists"), "got: {}", err);

    // Same branch name under a different bank is a different identity
    branches.create(&branch("ICICI Bank", "Koramangala")).await.unwrap();
    branches.create(&branch("HDFC Bank", "Indiranagar")).await.unwrap();

    assert_eq!(branches.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_branch_selection_lists_are_distinct() {
    let pool = test_pool().await;
    let branches = BranchRepository::new(pool.clone());

    branches.create(&branch("HDFC Bank", "Koramangala")).await.unwrap();
    branches.create(&branch("HDFC Bank", "Indiranagar")).await.unwrap();
    branches.create(&branch("ICICI Bank", "MG Road")).await.unwrap();

    let banks = branches.list_banks().await.unwrap();
    assert_eq!(banks, vec!["HDFC Bank".to_string(), "ICICI Bank".to_string()]);

    let cities = branches.list_cities().await.unwrap();
    assert_eq!(cities, vec!["Bengaluru".to_string()]);
}
