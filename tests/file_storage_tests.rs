use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use web3_portfolio_api::{
    entities::{certificate::CertificateInsert, project::ProjectInsert},
    repositories::{file::FileStorage, storage::Storage},
    seed::seed_if_empty,
};

fn temp_data_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "portfolio-file-storage-{}-{}-{}",
        label,
        std::process::id(),
        rand::random::<u32>()
    ))
}

fn project_insert(name: &str) -> ProjectInsert {
    ProjectInsert {
        name: name.to_string(),
        hackathon_name: None,
        hackathon_placement: None,
        github_link: None,
        live_link: None,
        tech_stack: Vec::new(),
        image_url: None,
        contract_address: None,
        explorer_link: None,
        created_at: Utc::now(),
    }
}

fn certificate_insert(name: &str) -> CertificateInsert {
    CertificateInsert {
        name: name.to_string(),
        issuing_organization: "Example Org".to_string(),
        issue_date: "June 2024".to_string(),
        link: None,
        image_url: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn missing_files_mean_empty_collections() {
    let dir = temp_data_dir("missing");
    let storage = FileStorage::new(&dir);

    assert!(storage.get_projects().await.unwrap().is_empty());
    assert!(storage.get_certificates().await.unwrap().is_empty());
    assert_eq!(storage.get_project(1).await.unwrap(), None);
}

#[tokio::test]
async fn create_assigns_sequential_ids_starting_at_one() {
    let dir = temp_data_dir("sequential");
    let storage = FileStorage::new(&dir);

    let a = storage.create_project(&project_insert("a")).await.unwrap();
    let b = storage.create_project(&project_insert("b")).await.unwrap();
    let c = storage.create_project(&project_insert("c")).await.unwrap();

    assert_eq!((a.id, b.id, c.id), (1, 2, 3));

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn ids_are_not_reused_after_deleting_the_max() {
    let dir = temp_data_dir("no-reuse");
    let storage = FileStorage::new(&dir);

    storage.create_project(&project_insert("a")).await.unwrap();
    let b = storage.create_project(&project_insert("b")).await.unwrap();
    storage.delete_project(b.id).await.unwrap();

    let c = storage.create_project(&project_insert("c")).await.unwrap();
    assert_eq!(c.id, 3);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn created_record_round_trips_field_for_field() {
    let dir = temp_data_dir("round-trip");
    let storage = FileStorage::new(&dir);

    let insert = ProjectInsert {
        name: "NFT Marketplace".to_string(),
        hackathon_name: Some("Chainlink Hackathon".to_string()),
        hackathon_placement: Some("Best Use of Chainlink".to_string()),
        github_link: Some("https://github.com/example/nft-market".to_string()),
        live_link: None,
        tech_stack: vec!["Solidity".to_string(), "Next.js".to_string()],
        image_url: None,
        contract_address: Some("0xabc123".to_string()),
        explorer_link: Some("https://etherscan.io/address/0xabc123".to_string()),
        created_at: Utc::now(),
    };

    let created = storage.create_project(&insert).await.unwrap();
    let fetched = storage.get_project(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let listed = storage.get_projects().await.unwrap();
    assert_eq!(listed, vec![created]);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn listing_orders_by_creation_time_ascending() {
    let dir = temp_data_dir("ordering");
    let storage = FileStorage::new(&dir);

    let mut newer = project_insert("newer");
    newer.created_at = Utc::now();
    let mut older = project_insert("older");
    older.created_at = Utc::now() - Duration::hours(1);

    // Inserted newest-first; listing must still come back oldest-first.
    storage.create_project(&newer).await.unwrap();
    storage.create_project(&older).await.unwrap();

    let names: Vec<String> = storage
        .get_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["older", "newer"]);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty_and_recovers_on_write() {
    let dir = temp_data_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("projects.json"), b"{ not valid json ]").unwrap();

    let storage = FileStorage::new(&dir);
    assert!(storage.get_projects().await.unwrap().is_empty());

    let created = storage.create_project(&project_insert("fresh")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(storage.get_projects().await.unwrap().len(), 1);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn delete_is_idempotent_for_unknown_ids() {
    let dir = temp_data_dir("idempotent-delete");
    let storage = FileStorage::new(&dir);

    assert!(storage.delete_project(42).await.is_ok());

    let created = storage.create_project(&project_insert("only")).await.unwrap();
    storage.delete_project(created.id).await.unwrap();
    assert!(storage.delete_project(created.id).await.is_ok());
    assert!(storage.get_projects().await.unwrap().is_empty());

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn certificates_have_their_own_id_sequence() {
    let dir = temp_data_dir("certificates");
    let storage = FileStorage::new(&dir);

    storage.create_project(&project_insert("p1")).await.unwrap();
    storage.create_project(&project_insert("p2")).await.unwrap();

    let cert = storage
        .create_certificate(&certificate_insert("first-cert"))
        .await
        .unwrap();
    assert_eq!(cert.id, 1);

    let fetched = storage.get_certificate(cert.id).await.unwrap().unwrap();
    assert_eq!(fetched, cert);

    storage.delete_certificate(cert.id).await.unwrap();
    assert_eq!(storage.get_certificate(cert.id).await.unwrap(), None);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn seeding_fills_empty_collections_and_is_a_no_op_afterwards() {
    let dir = temp_data_dir("seed-empty");
    let storage = FileStorage::new(&dir);

    seed_if_empty(&storage).await.unwrap();

    let projects = storage.get_projects().await.unwrap();
    let certificates = storage.get_certificates().await.unwrap();
    assert!(!projects.is_empty());
    assert!(!certificates.is_empty());

    // A second pass over populated collections inserts nothing.
    seed_if_empty(&storage).await.unwrap();
    assert_eq!(storage.get_projects().await.unwrap(), projects);
    assert_eq!(storage.get_certificates().await.unwrap(), certificates);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn seeding_leaves_a_populated_collection_untouched() {
    let dir = temp_data_dir("seed-populated");
    let storage = FileStorage::new(&dir);

    let existing = storage
        .create_project(&project_insert("handmade"))
        .await
        .unwrap();

    seed_if_empty(&storage).await.unwrap();

    // Projects already had a record, so only certificates get samples.
    assert_eq!(storage.get_projects().await.unwrap(), vec![existing]);
    assert!(!storage.get_certificates().await.unwrap().is_empty());

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn concurrent_lists_never_observe_a_partial_write() {
    let dir = temp_data_dir("concurrent");
    let storage = Arc::new(FileStorage::new(&dir));

    let writer = {
        let storage = storage.clone();
        tokio::spawn(async move {
            for i in 0..10 {
                storage
                    .create_project(&project_insert(&format!("p{}", i)))
                    .await
                    .unwrap();
            }
        })
    };

    let reader = {
        let storage = storage.clone();
        tokio::spawn(async move {
            for _ in 0..25 {
                let snapshot = storage.get_projects().await.unwrap();
                assert!(snapshot.len() <= 10);

                let mut ids: Vec<i32> = snapshot.iter().map(|p| p.id).collect();
                ids.dedup();
                assert_eq!(ids.len(), snapshot.len(), "duplicate ids in snapshot");
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();

    assert_eq!(storage.get_projects().await.unwrap().len(), 10);

    std::fs::remove_dir_all(dir.as_path()).ok();
}
