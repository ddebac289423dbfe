use std::path::PathBuf;

use super::{
    file::FileSaveConfig,
    service::ExportService,
    testing::{MockClipboard, MockSaver, mock_dependencies},
    types::{ExportArtifact, ExportDestination, ExportError, ExportReceipt},
};

fn artifact(bytes: &[u8]) -> ExportArtifact {
    ExportArtifact {
        png: bytes.to_vec(),
        width: 4,
        height: 4,
    }
}

fn save_config() -> FileSaveConfig {
    FileSaveConfig {
        save_directory: PathBuf::from("/tmp/signpad-test"),
        ..FileSaveConfig::default()
    }
}

#[tokio::test]
async fn copy_writes_one_clipboard_item() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let service = ExportService::with_dependencies(save_config(), mock_dependencies(&saver, &clipboard));

    service.copy_to_clipboard(artifact(&[1, 2, 3])).await.unwrap();

    assert_eq!(*clipboard.copied.lock().unwrap(), vec![vec![1, 2, 3]]);
    assert!(saver.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn copy_failure_is_surfaced() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard {
        should_fail: true,
        ..MockClipboard::default()
    };
    let service = ExportService::with_dependencies(save_config(), mock_dependencies(&saver, &clipboard));

    let err = service.copy_to_clipboard(artifact(&[9])).await.unwrap_err();
    assert!(matches!(err, ExportError::PermissionDenied(_)));
}

#[tokio::test]
async fn deliver_to_file_uses_default_name() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let service = ExportService::with_dependencies(save_config(), mock_dependencies(&saver, &clipboard));

    let receipt = service
        .deliver(artifact(&[4, 5]), ExportDestination::File)
        .await
        .unwrap();

    assert_eq!(
        receipt,
        ExportReceipt::Saved(PathBuf::from("/tmp/signpad-test/sign.png"))
    );
    let saved = saver.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "sign.png");
    assert!(clipboard.copied.lock().unwrap().is_empty());
}

#[tokio::test]
async fn save_failure_is_surfaced() {
    let saver = MockSaver {
        should_fail: true,
        ..MockSaver::default()
    };
    let clipboard = MockClipboard::default();
    let service = ExportService::with_dependencies(save_config(), mock_dependencies(&saver, &clipboard));

    let result = service.save_to_file(artifact(&[1]), "custom.png").await;
    assert!(matches!(result, Err(ExportError::Save(_))));
}

#[tokio::test]
async fn real_saver_writes_into_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let service = ExportService::new(FileSaveConfig {
        save_directory: temp.path().to_path_buf(),
        ..FileSaveConfig::default()
    });

    let receipt = service
        .deliver(artifact(b"png"), ExportDestination::File)
        .await
        .unwrap();

    let ExportReceipt::Saved(path) = receipt else {
        panic!("expected a saved path");
    };
    assert!(path.ends_with("sign.png"));
    assert_eq!(std::fs::read(path).unwrap(), b"png");
}
