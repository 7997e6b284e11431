use fleet_core::models::NewAdministrator;

use crate::common::setup_test_db;

fn admin(email: &str, name: &str) -> NewAdministrator {
    NewAdministrator {
        email: email.to_string(),
        // Repository tests treat the hash as an opaque string.
        password_hash: "hashed".to_string(),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn insert_then_find_by_email() {
    let db = setup_test_db().await;
    let repo = db.admin_repo();

    let stored = repo.insert(&admin("admin@admin", "Admin")).await.unwrap();
    assert!(stored.id > 0);

    let found = repo.find_by_email("admin@admin").await.unwrap().unwrap();
    assert_eq!(found.id, stored.id);
    assert_eq!(found.email, "admin@admin");
    assert_eq!(found.name, "Admin");
}

#[tokio::test]
async fn find_by_email_is_exact_match() {
    let db = setup_test_db().await;
    let repo = db.admin_repo();

    repo.insert(&admin("admin@admin", "Admin")).await.unwrap();

    assert!(repo.find_by_email("admin@admi").await.unwrap().is_none());
    assert!(repo.find_by_email("other@admin").await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_id() {
    let db = setup_test_db().await;
    let repo = db.admin_repo();

    let stored = repo.insert(&admin("admin@admin", "Admin")).await.unwrap();

    let fetched = repo.get(stored.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "admin@admin");
    assert!(repo.get(stored.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let db = setup_test_db().await;
    let repo = db.admin_repo();

    repo.insert(&admin("admin@admin", "Admin")).await.unwrap();
    assert!(repo.insert(&admin("admin@admin", "Other")).await.is_err());
}

#[tokio::test]
async fn list_paginates_in_id_order() {
    let db = setup_test_db().await;
    let repo = db.admin_repo();

    for i in 1..=12 {
        repo.insert(&admin(&format!("admin{i:02}@fleet"), &format!("Admin {i}")))
            .await
            .unwrap();
    }

    let page1 = repo.list(Some(1)).await.unwrap();
    assert_eq!(page1.len(), 10);
    assert_eq!(page1[0].email, "admin01@fleet");

    let page2 = repo.list(Some(2)).await.unwrap();
    assert_eq!(page2.len(), 2);
    assert_eq!(page2[0].email, "admin11@fleet");

    let all = repo.list(None).await.unwrap();
    assert_eq!(all.len(), 12);
}
