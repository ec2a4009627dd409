// End-to-end lifecycle tests against the public API with real file storage

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use docsign::config::{LifecycleConfig, StorageConfig};
use docsign::{
    CreateDocument, Document, DocumentError, DocumentService, DocumentStatus, ErrorKind,
    JsonFileDocumentStore, Notifier, StandardFileSystem, UploadedFile,
};

/// Notifier recording every document it was asked to announce
#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Document>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_signers_for_review(&self, document: &Document) -> anyhow::Result<()> {
        self.seen.lock().unwrap().push(document.clone());
        Ok(())
    }
}

struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_signers_for_review(&self, _document: &Document) -> anyhow::Result<()> {
        anyhow::bail!("mail relay unavailable")
    }
}

struct TestEnv {
    temp_dir: TempDir,
    notifier: Arc<RecordingNotifier>,
    service: DocumentService,
}

impl TestEnv {
    fn new() -> Self {
        Self::with_lifecycle(LifecycleConfig::default())
    }

    fn with_lifecycle(lifecycle: LifecycleConfig) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let store = Arc::new(JsonFileDocumentStore::new(
            temp_dir.path().join("documents.json"),
        ));
        let service = DocumentService::new(store, notifier.clone(), Arc::new(StandardFileSystem))
            .with_storage(StorageConfig {
                root: temp_dir.path().join("storage"),
                ..StorageConfig::default()
            })
            .with_lifecycle(lifecycle);
        Self {
            temp_dir,
            notifier,
            service,
        }
    }

    async fn upload(&self, owner: &str, name: &str, bytes: &[u8]) -> Document {
        self.service
            .create_document(CreateDocument {
                file: Some(UploadedFile::new(name, bytes.to_vec())),
                signers: vec![],
                owner: owner.to_string(),
            })
            .await
            .unwrap()
    }
}

fn emails(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_list_by_owner_returns_only_owned_newest_first() {
    let env = TestEnv::new();
    let first = env.upload("0xalice", "one.pdf", b"one").await;
    env.upload("0xbob", "bob.pdf", b"bob").await;
    let second = env.upload("0xalice", "two.pdf", b"two").await;
    let third = env.upload("0xalice", "three.pdf", b"three").await;

    let listed = env.service.list_by_owner("0xalice").await.unwrap();
    let ids: Vec<_> = listed.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    assert!(listed.iter().all(|d| d.owner == "0xalice"));
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));

    assert!(env.service.list_by_owner("0xcarol").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_by_id_malformed_and_missing_are_distinct() {
    let env = TestEnv::new();
    let doc = env.upload("0xalice", "one.pdf", b"one").await;

    let malformed = env.service.get_by_id("12345").await.unwrap_err();
    assert_eq!(malformed.kind(), ErrorKind::InvalidArgument);

    let mut absent = doc.id.to_string();
    let last = if absent.ends_with('0') { "1" } else { "0" };
    absent.replace_range(23.., last);
    let missing = env.service.get_by_id(&absent).await.unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let view = env.service.get_by_id(&doc.id.to_string()).await.unwrap();
    assert_eq!(view, doc.view());
}

#[tokio::test]
async fn test_fully_signed_document_can_return_to_pending() {
    let env = TestEnv::new();
    let doc = env.upload("0xalice", "one.pdf", b"one").await;
    let id = doc.id.to_string();

    env.service
        .update_status(&id, DocumentStatus::FullySigned)
        .await
        .unwrap();
    let reverted = env
        .service
        .update_status(&id, DocumentStatus::Pending)
        .await
        .unwrap();
    assert_eq!(reverted.status, DocumentStatus::Pending);
    assert!(reverted.updated_at >= doc.updated_at);
}

#[tokio::test]
async fn test_enforced_transitions_follow_the_table() {
    let env = TestEnv::with_lifecycle(LifecycleConfig {
        enforce_transitions: true,
        ..LifecycleConfig::default()
    });
    let doc = env.upload("0xalice", "one.pdf", b"one").await;
    let id = doc.id.to_string();

    env.service
        .add_signers_and_notify(&id, &emails(&["a@x.com"]))
        .await
        .unwrap();
    env.service
        .update_status(&id, DocumentStatus::PartiallySigned)
        .await
        .unwrap();
    env.service
        .update_status(&id, DocumentStatus::FullySigned)
        .await
        .unwrap();

    let err = env
        .service
        .update_status(&id, DocumentStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentError::IllegalTransition { .. }));
}

#[tokio::test]
async fn test_add_signers_and_notify() {
    let env = TestEnv::new();
    let doc = env.upload("0xalice", "one.pdf", b"one").await;

    let invitation = env
        .service
        .add_signers_and_notify(&doc.id.to_string(), &emails(&["a@x.com", "b@x.com"]))
        .await
        .unwrap();

    assert_eq!(invitation.signers.len(), 2);
    assert_eq!(invitation.signers[0].email, "a@x.com");
    assert_eq!(invitation.signers[1].email, "b@x.com");
    assert!(invitation.signers.iter().all(|s| !s.status));
    assert!(invitation.notified);

    let view = env.service.get_by_id(&doc.id.to_string()).await.unwrap();
    assert_eq!(view.status, DocumentStatus::AwaitingSignatures);

    let seen = env.notifier.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].signers.len(), 2);
}

#[tokio::test]
async fn test_notifier_failure_saves_nothing() {
    let env = TestEnv::new();
    let doc = env.upload("0xalice", "one.pdf", b"one").await;

    let store = Arc::new(JsonFileDocumentStore::new(
        env.temp_dir.path().join("documents.json"),
    ));
    let failing = DocumentService::new(store, Arc::new(FailingNotifier), Arc::new(StandardFileSystem))
        .with_storage(StorageConfig {
            root: env.temp_dir.path().join("storage"),
            ..StorageConfig::default()
        });

    let err = failing
        .add_signers_and_notify(&doc.id.to_string(), &emails(&["a@x.com"]))
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentError::Notification(_)));
    assert_eq!(err.kind(), ErrorKind::Unexpected);

    let view = env.service.get_by_id(&doc.id.to_string()).await.unwrap();
    assert_eq!(view, doc.view());
}

#[tokio::test]
async fn test_signers_accumulate_across_invitations() {
    let env = TestEnv::new();
    let doc = env.upload("0xalice", "one.pdf", b"one").await;
    let id = doc.id.to_string();

    env.service
        .add_signers_and_notify(&id, &emails(&["a@x.com"]))
        .await
        .unwrap();
    let invitation = env
        .service
        .add_signers_and_notify(&id, &emails(&["b@x.com", "c@x.com"]))
        .await
        .unwrap();

    let order: Vec<_> = invitation.signers.iter().map(|s| s.email.as_str()).collect();
    assert_eq!(order, vec!["a@x.com", "b@x.com", "c@x.com"]);
}

#[tokio::test]
async fn test_empty_signer_list_leaves_document_unmodified() {
    let env = TestEnv::new();
    let doc = env.upload("0xalice", "one.pdf", b"one").await;

    let err = env
        .service
        .add_signers_and_notify(&doc.id.to_string(), &[])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let view = env.service.get_by_id(&doc.id.to_string()).await.unwrap();
    assert_eq!(view, doc.view());
    assert!(env.notifier.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_identical_content_shares_blob_and_overwrites() {
    let env = TestEnv::new();
    let first = env.upload("0xalice", "report.pdf", b"identical bytes").await;
    let blob = env.service.blob_path(&first);
    let first_written = std::fs::metadata(&blob).unwrap().modified().unwrap();

    let second = env.upload("0xbob", "copy.pdf", b"identical bytes").await;

    assert_eq!(first.hash, second.hash);
    assert_eq!(env.service.blob_path(&second), blob);
    assert_eq!(std::fs::read(&blob).unwrap(), b"identical bytes");
    assert!(std::fs::metadata(&blob).unwrap().modified().unwrap() >= first_written);

    let stored: Vec<_> = std::fs::read_dir(env.temp_dir.path().join("storage"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(stored.len(), 1, "no temporary files may remain: {stored:?}");
}

#[tokio::test]
async fn test_mis_encoded_filename_round_trips_as_utf8() {
    let env = TestEnv::new();
    let original = "Überweisung_März.pdf";
    let as_latin1: String = original.as_bytes().iter().map(|&b| b as char).collect();

    let doc = env.upload("0xalice", &as_latin1, b"bytes").await;
    assert_eq!(doc.name, original);

    let view = env.service.get_by_id(&doc.id.to_string()).await.unwrap();
    assert_eq!(view.name, original);
    assert_eq!(view.extension, ".pdf");
}
