//! Durable session round-trips across simulated process restarts.

use std::sync::Arc;

use subsflow_core::Role;
use subsflow_platform::Platform;
use subsflow_platform::config::PlatformConfig;
use subsflow_platform::session::AuthState;
use subsflow_platform::storage::{FileStorage, MemoryStorage, Storage, keys};

use subsflow_integration_tests::demo_platform_over;

#[tokio::test]
async fn test_session_round_trip_across_processes() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    // First "process": sign in and exit without signing out.
    let first = demo_platform_over(storage.clone());
    first.restore_session().await.unwrap();
    let account = first.sign_in("user@example.com", "user123").await.unwrap();
    drop(first);

    // Second "process" over the same storage restores the identity.
    let second = demo_platform_over(storage);
    let state = second.restore_session().await.unwrap();
    assert_eq!(state.account_id(), Some(account.id));
}

#[tokio::test]
async fn test_corrupt_session_record_degrades_to_anonymous() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage.store(keys::SESSION, "{\"user\": 42").unwrap();

    let platform = demo_platform_over(storage);
    let state = platform.restore_session().await.unwrap();
    assert_eq!(state, AuthState::Anonymous);
}

#[tokio::test]
async fn test_well_formed_json_with_wrong_shape_degrades_to_anonymous() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage
        .store(keys::SESSION, "{\"session_token\": \"abc\"}")
        .unwrap();

    let platform = demo_platform_over(storage);
    let state = platform.restore_session().await.unwrap();
    assert_eq!(state, AuthState::Anonymous);
}

#[tokio::test]
async fn test_sign_up_session_survives_restart() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    let first = demo_platform_over(storage.clone());
    first.restore_session().await.unwrap();
    let account = first
        .sign_up("new@example.com", "pw", "Jane Doe", Role::User)
        .await
        .unwrap();
    drop(first);

    // Demo seeding recreates seeded accounts, but "new@example.com"
    // lives only in the first process's account map: the restored
    // session dangles and must degrade to anonymous, not crash.
    let second = demo_platform_over(storage.clone());
    let state = second.restore_session().await.unwrap();
    assert_eq!(state, AuthState::Anonymous);

    // The durable notification log, by contrast, did survive.
    let notifications = second.notifications_for(account.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Welcome!");
}

#[tokio::test]
async fn test_file_backed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlatformConfig {
        data_dir: Some(dir.path().to_path_buf()),
        seed_demo_data: true,
        ..PlatformConfig::instant()
    };

    let account_id = {
        let first = Platform::new(config.clone()).unwrap();
        first.restore_session().await.unwrap();
        first
            .sign_in("admin@example.com", "admin123")
            .await
            .unwrap()
            .id
    };

    // Seeded account ids are fixed, so the record written by the first
    // process resolves against the second process's reseeded map.
    let second = Platform::new(config).unwrap();
    let state = second.restore_session().await.unwrap();
    assert_eq!(state.account_id(), Some(account_id));
}

#[tokio::test]
async fn test_file_storage_sign_out_removes_record() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(dir.path()).unwrap());

    let platform = demo_platform_over(storage.clone());
    platform.restore_session().await.unwrap();
    platform
        .sign_in("user@example.com", "user123")
        .await
        .unwrap();
    assert!(storage.load(keys::SESSION).unwrap().is_some());

    platform.sign_out().await.unwrap();
    assert!(storage.load(keys::SESSION).unwrap().is_none());
}
