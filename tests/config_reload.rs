//! Config file → shared snapshot → client deadline, with hot reload.

use eth_wallet::config::{apply_reloads, load_config, ConfigError, ConfigWatcher, SharedConfig};
use eth_wallet::rpc::{EthClient, NodeClient};
use serde_json::json;
use std::fs;
use std::time::Duration;
use tokio::time::timeout;

mod common;

#[tokio::test]
async fn test_reload_changes_request_deadline() {
    let addr = common::start_rpc_backend(|_, _| async {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        Ok(json!("0x1"))
    })
    .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.toml");
    fs::write(
        &path,
        format!("eth_rpc_url = \"{}\"\nmax_request_time = 5\n", common::rpc_url(addr)),
    )
    .unwrap();

    let shared = SharedConfig::new(load_config(&path).unwrap());
    let client = NodeClient::dial(shared.clone()).await.unwrap();
    assert!(client.suggest_gas_price().await.is_ok());

    let (watcher, updates) = ConfigWatcher::new(&path);
    let _guard = watcher.run().unwrap();
    let applier = tokio::spawn(apply_reloads(shared.clone(), updates));

    fs::write(
        &path,
        format!("eth_rpc_url = \"{}\"\nmax_request_time = 1\n", common::rpc_url(addr)),
    )
    .unwrap();

    timeout(Duration::from_secs(10), async {
        while shared.snapshot().max_request_time != 1 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("reload never applied");

    let err = client.suggest_gas_price().await.unwrap_err();
    assert!(err.is_transport());

    applier.abort();
}

#[tokio::test]
async fn test_broken_reload_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.toml");
    fs::write(&path, "eth_rpc_url = \"http://127.0.0.1:8545\"\nmax_request_time = 3\n").unwrap();

    let shared = SharedConfig::new(load_config(&path).unwrap());
    let (watcher, updates) = ConfigWatcher::new(&path);
    let _guard = watcher.run().unwrap();
    let applier = tokio::spawn(apply_reloads(shared.clone(), updates));

    fs::write(&path, "max_request_time = \"soon\"\n").unwrap();

    let result = timeout(Duration::from_secs(10), applier)
        .await
        .expect("applier did not stop")
        .unwrap();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[tokio::test]
async fn test_truncated_file_keeps_previous_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.toml");
    fs::write(&path, "eth_rpc_url = \"https://node.internal:8545\"\nmax_request_time = 4\n").unwrap();

    let shared = SharedConfig::new(load_config(&path).unwrap());
    let (watcher, updates) = ConfigWatcher::new(&path);
    let _guard = watcher.run().unwrap();
    let applier = tokio::spawn(apply_reloads(shared.clone(), updates));

    fs::write(&path, "").unwrap();

    let result = timeout(Duration::from_secs(10), applier)
        .await
        .expect("applier did not stop")
        .unwrap();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
    assert_eq!(shared.snapshot().eth_rpc_url, "https://node.internal:8545");
    assert_eq!(shared.snapshot().max_request_time, 4);
}

#[test]
fn test_invalid_startup_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet.toml");
    fs::write(&path, "eth_rpc_url = \"\"\nmax_request_time = 0\n").unwrap();

    match load_config(&path) {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation failure, got {other:?}"),
    }
}
