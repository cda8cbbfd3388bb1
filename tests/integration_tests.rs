//! Integration tests for the tell library
//!
//! These tests verify the public API and module interactions.

mod commands;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use httpmock::prelude::*;
use serde_json::json;
use tempfile::{tempdir, TempDir};

use tell::{
    archive::create_archive,
    message::{classify_with_input, kind_for_extension, kind_from_name, profile_for},
    Deliverer, Error, Limits, MessageKind, PendingMessage, SendRequest, TelegramApi,
    TransferClient,
};

fn sized_file(dir: &TempDir, name: &str, size: u64) -> PathBuf {
    let path = dir.path().join(name);
    File::create(&path).unwrap().set_len(size).unwrap();
    path
}

fn file_request(path: PathBuf, file_type: Option<&str>, text: &str, no_upload: bool) -> SendRequest {
    SendRequest {
        text: text.to_string(),
        file: Some(path),
        file_type: file_type.map(str::to_string),
        no_upload,
    }
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_every_kind_has_method_or_is_staged() {
    for kind in MessageKind::ALL {
        let profile = profile_for(kind);
        if kind.is_staged() {
            assert!(profile.method.is_none());
        } else {
            assert!(profile.method.unwrap().starts_with("send"));
        }
    }
}

#[test]
fn test_registry_lookups() {
    assert_eq!(kind_for_extension(".mp4"), Some(MessageKind::Video));
    assert_eq!(kind_from_name("upload").unwrap(), MessageKind::FileUpload);
    assert!(matches!(kind_from_name("gif"), Err(Error::InvalidType(_))));
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_report_pdf_is_document() {
    let dir = tempdir().unwrap();
    let path = sized_file(&dir, "report.pdf", 2);
    let msg = classify_with_input(file_request(path, None, "", false), Limits::default(), io::empty())
        .unwrap();
    assert_eq!(msg.kind, MessageKind::Document);
    assert!(msg.detected);
}

#[test]
fn test_jpg_size_ladder() {
    let limits = Limits { photo: 100, file: 1_000 };
    let cases = [
        (50, MessageKind::Photo),
        (500, MessageKind::Document),
        (5_000, MessageKind::FileUpload),
    ];

    for (size, expected) in cases {
        let dir = tempdir().unwrap();
        let path = sized_file(&dir, "picture.jpg", size);
        let msg = classify_with_input(file_request(path, None, "", false), limits, io::empty())
            .unwrap();
        assert_eq!(msg.kind, expected, "size {size}");
    }
}

#[test]
fn test_oversized_with_explicit_type_and_no_upload() {
    let limits = Limits { photo: 10, file: 100 };
    let dir = tempdir().unwrap();
    let path = sized_file(&dir, "movie.mp4", 101);

    let msg = classify_with_input(
        file_request(path.clone(), Some("video"), "", false),
        limits,
        io::empty(),
    )
    .unwrap();
    assert_eq!(msg.kind, MessageKind::FileUpload);

    let err = classify_with_input(file_request(path, Some("video"), "", true), limits, io::empty())
        .unwrap_err();
    assert!(matches!(err, Error::UploadSuppressed(_)));
}

#[test]
fn test_unsupported_content_for_every_kind() {
    let dir = tempdir().unwrap();
    let path = sized_file(&dir, "blob", 1);

    for kind in MessageKind::ALL.into_iter().filter(|k| !k.is_staged()) {
        let profile = profile_for(kind);
        let result = classify_with_input(
            file_request(path.clone(), Some(kind.as_str()), "words", false),
            Limits::default(),
            io::empty(),
        );

        if profile.text_field.is_none() {
            assert!(matches!(result, Err(Error::UnsupportedText(k)) if k == kind), "{kind}");
        } else if profile.file_field.is_none() {
            assert!(matches!(result, Err(Error::UnsupportedFile(k)) if k == kind), "{kind}");
        } else {
            assert_eq!(result.unwrap().kind, kind);
        }
    }
}

// ============================================================================
// Archive Tests
// ============================================================================

#[test]
fn test_archive_round_trip() {
    let root = tempdir().unwrap();
    let src = root.path().join("project");
    fs::create_dir_all(src.join("src").join("bin")).unwrap();
    fs::write(src.join("README"), "readme").unwrap();
    fs::write(src.join("src").join("lib.rs"), "pub fn f() {}").unwrap();
    fs::write(src.join("src").join("bin").join("main.rs"), "fn main() {}").unwrap();

    let archive = create_archive(&src).unwrap();
    let out = tempdir().unwrap();
    zip::ZipArchive::new(File::open(archive.path()).unwrap())
        .unwrap()
        .extract(out.path())
        .unwrap();

    let extracted = out.path().join("project");
    assert_eq!(fs::read_to_string(extracted.join("README")).unwrap(), "readme");
    assert_eq!(
        fs::read_to_string(extracted.join("src").join("lib.rs")).unwrap(),
        "pub fn f() {}"
    );
    assert_eq!(
        fs::read_to_string(extracted.join("src").join("bin").join("main.rs")).unwrap(),
        "fn main() {}"
    );
}

// ============================================================================
// Delivery Tests
// ============================================================================

#[tokio::test]
async fn test_classified_directory_is_delivered_as_link_when_too_big() {
    let telegram = MockServer::start_async().await;
    let upload = MockServer::start_async().await;

    let root = tempdir().unwrap();
    let notes = root.path().join("notes");
    fs::create_dir_all(notes.join("2024")).unwrap();
    fs::write(notes.join("2024").join("jan.md"), "january").unwrap();

    let put = upload.mock(|when, then| {
        when.method(PUT).path("/notes.zip");
        then.status(200).body("https://files.example/q/notes.zip");
    });
    let send = telegram.mock(|when, then| {
        when.method(POST)
            .path("/botX/sendMessage")
            .is_true(|req| {
                String::from_utf8_lossy(req.body().as_ref())
                    .contains("archive\nhttps://files.example/q/notes.zip")
            });
        then.status(200).json_body(json!({ "ok": true, "result": {} }));
    });

    let limits = Limits { photo: 1, file: 10 };
    let message = classify_with_input(file_request(notes, None, "archive", false), limits, io::empty())
        .unwrap();
    assert_eq!(message.kind, MessageKind::Directory);

    let deliverer = Deliverer::new(
        TelegramApi::with_url(&telegram.base_url(), "X"),
        TransferClient::with_url(&upload.base_url()),
        limits,
    );
    let submitted = deliverer.deliver(message, 8).await.unwrap();

    assert_eq!(submitted, MessageKind::Text);
    put.assert_calls(1);
    send.assert_calls(1);
}

#[tokio::test]
async fn test_text_message_delivery() {
    let telegram = MockServer::start_async().await;
    let upload = MockServer::start_async().await;

    let send = telegram.mock(|when, then| {
        when.method(POST).path("/botX/sendMessage");
        then.status(200).json_body(json!({ "ok": true, "result": {} }));
    });

    let deliverer = Deliverer::new(
        TelegramApi::with_url(&telegram.base_url(), "X"),
        TransferClient::with_url(&upload.base_url()),
        Limits::default(),
    );
    let kind = deliverer
        .deliver(PendingMessage::text("deploy done"), 8)
        .await
        .unwrap();

    assert_eq!(kind, MessageKind::Text);
    send.assert_calls(1);
}
