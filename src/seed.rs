use chrono::Utc;
use tracing::info;

use crate::{
    entities::{certificate::CertificateInsert, project::ProjectInsert},
    errors::AppError,
    repositories::storage::Storage,
};

/// Inserts sample records through the normal create path when a
/// collection is empty. Opt-in via `seed_on_startup`; a non-empty
/// collection is left untouched.
pub async fn seed_if_empty(storage: &dyn Storage) -> Result<(), AppError> {
    if storage.get_projects().await?.is_empty() {
        for insert in sample_projects() {
            storage.create_project(&insert).await?;
        }
        info!("Seeded sample projects");
    }

    if storage.get_certificates().await?.is_empty() {
        for insert in sample_certificates() {
            storage.create_certificate(&insert).await?;
        }
        info!("Seeded sample certificates");
    }

    Ok(())
}

fn sample_projects() -> Vec<ProjectInsert> {
    vec![
        ProjectInsert {
            name: "DeFi Swap Protocol".to_string(),
            hackathon_name: Some("ETHGlobal Paris 2024".to_string()),
            hackathon_placement: Some("1st Place".to_string()),
            github_link: Some("https://github.com/example/defi-swap".to_string()),
            live_link: Some("https://defi-swap-demo.example.com".to_string()),
            tech_stack: vec![
                "Solidity".to_string(),
                "React".to_string(),
                "Ethers.js".to_string(),
            ],
            image_url: None,
            contract_address: None,
            explorer_link: None,
            created_at: Utc::now(),
        },
        ProjectInsert {
            name: "Cross-Chain Bridge".to_string(),
            hackathon_name: None,
            hackathon_placement: None,
            github_link: Some("https://github.com/example/bridge".to_string()),
            live_link: None,
            tech_stack: vec!["Rust".to_string(), "Solidity".to_string()],
            image_url: None,
            contract_address: None,
            explorer_link: None,
            created_at: Utc::now(),
        },
    ]
}

fn sample_certificates() -> Vec<CertificateInsert> {
    vec![
        CertificateInsert {
            name: "Certified Ethereum Developer".to_string(),
            issuing_organization: "Blockchain Council".to_string(),
            issue_date: "December 2024".to_string(),
            link: Some("https://verify.example.org/cert/12345".to_string()),
            image_url: None,
            created_at: Utc::now(),
        },
        CertificateInsert {
            name: "Smart Contract Auditor".to_string(),
            issuing_organization: "OpenZeppelin".to_string(),
            issue_date: "June 2024".to_string(),
            link: None,
            image_url: None,
            created_at: Utc::now(),
        },
    ]
}
