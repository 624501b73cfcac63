//! Integration tests for the preprocess -> train -> predict pipeline

use spam_rs::config::Config;
use spam_rs::dataset::{read_dataset, Label, Preprocessor};
use spam_rs::inference::{SpamDetector, Verdict};
use spam_rs::model::ModelBundle;
use spam_rs::text::TextCleaner;
use spam_rs::trainer::{Trainer, TrainerConfig};
use spam_rs::SpamError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SPAM_EMAILS: &[&str] = &[
    "Congratulations! You are the WINNER of a FREE cash prize. Claim now at http://win.example",
    "Limited offer: cheap pills, free shipping, click here www.pills.biz",
    "Claim your lottery cash prize today, reply to prize@lottery.example",
    "<html><b>FREE</b> casino bonus cash, click to claim</html>",
    "You won a free cruise! Claim your prize, click the link",
    "Cheap loans, instant cash offer, act now",
];

const HAM_EMAILS: &[&str] = &[
    "Hi team, the project meeting is moved to Monday at 10am.",
    "Please review the attached quarterly report before Friday.",
    "Are we still on for lunch tomorrow? Let me know.",
    "Notes from the Monday meeting: budget review and project schedule.",
    "Reminder: the team retrospective is scheduled for Thursday.",
    "Can you send me the updated report for the project review?",
];

/// Helper to lay out `data/raw/{spam,ham}` under a temp dir
fn setup_raw_data(root: &Path) -> (PathBuf, PathBuf) {
    let spam_dir = root.join("data/raw/spam");
    let ham_dir = root.join("data/raw/ham");
    std::fs::create_dir_all(&spam_dir).unwrap();
    std::fs::create_dir_all(&ham_dir).unwrap();

    for (i, body) in SPAM_EMAILS.iter().enumerate() {
        std::fs::write(spam_dir.join(format!("spam_{}.txt", i)), body).unwrap();
    }
    for (i, body) in HAM_EMAILS.iter().enumerate() {
        std::fs::write(ham_dir.join(format!("ham_{}.txt", i)), body).unwrap();
    }

    (spam_dir, ham_dir)
}

#[test]
fn test_full_pipeline_round_trip() {
    let tmp = TempDir::new().unwrap();
    let (spam_dir, ham_dir) = setup_raw_data(tmp.path());
    let dataset_path = tmp.path().join("data/processed_data.csv");
    let model_path = tmp.path().join("model/spam_model.json");

    let config = Config::default();

    let report = Preprocessor::new(TextCleaner::new(config.cleaner))
        .run(&spam_dir, &ham_dir, &dataset_path)
        .unwrap();
    assert_eq!(report.spam_count, SPAM_EMAILS.len());
    assert_eq!(report.ham_count, HAM_EMAILS.len());
    assert!(report.folder_errors.is_empty());

    let records = read_dataset(&dataset_path).unwrap();
    assert_eq!(records.len(), 12);
    assert!(records.iter().all(|r| !r.clean_text.is_empty()));
    assert_eq!(records.iter().filter(|r| r.label == Label::Spam).count(), 6);

    Trainer::new(TrainerConfig::from(&config))
        .train_from_file(&dataset_path, &model_path)
        .unwrap();
    assert!(model_path.exists());

    let detector = SpamDetector::load(&model_path).unwrap();

    let spam = detector
        .classify("FREE cash prize! Claim your prize now, click here")
        .unwrap();
    assert_eq!(spam.verdict, Verdict::Spam);

    let ham = detector
        .classify("Project meeting on Monday, please review the report")
        .unwrap();
    assert_eq!(ham.verdict, Verdict::NotSpam);

    assert_eq!(detector.classify("   ").unwrap().verdict, Verdict::EmptyInput);
}

#[test]
fn test_retrain_replaces_bundle() {
    let tmp = TempDir::new().unwrap();
    let (spam_dir, ham_dir) = setup_raw_data(tmp.path());
    let dataset_path = tmp.path().join("processed_data.csv");
    let model_path = tmp.path().join("model/spam_model.json");

    Preprocessor::default()
        .run(&spam_dir, &ham_dir, &dataset_path)
        .unwrap();

    let first = Trainer::default()
        .train_from_file(&dataset_path, &model_path)
        .unwrap();
    let second = Trainer::default()
        .train_from_file(&dataset_path, &model_path)
        .unwrap();

    let loaded = ModelBundle::load(&model_path).unwrap();
    assert_eq!(loaded.bundle_id, second.bundle.bundle_id);
    assert_ne!(loaded.bundle_id, first.bundle.bundle_id);
    // same data, same seed, same model
    assert_eq!(first.bundle.classifier, second.bundle.classifier);
}

#[test]
fn test_preprocess_fails_without_any_emails() {
    let tmp = TempDir::new().unwrap();
    let spam_dir = tmp.path().join("data/raw/spam");
    let ham_dir = tmp.path().join("data/raw/ham");
    std::fs::create_dir_all(&ham_dir).unwrap();
    let output = tmp.path().join("data/processed_data.csv");

    let err = Preprocessor::default()
        .run(&spam_dir, &ham_dir, &output)
        .unwrap_err();

    assert!(matches!(err, SpamError::EmptyCorpus(_)));
    assert!(!output.exists());
}

#[test]
fn test_train_missing_dataset() {
    let tmp = TempDir::new().unwrap();
    let err = Trainer::default()
        .train_from_file(&tmp.path().join("missing.csv"), &tmp.path().join("model.json"))
        .unwrap_err();

    assert!(matches!(err, SpamError::NotFound(_)));
    assert!(!tmp.path().join("model.json").exists());
}

#[test]
fn test_train_empty_dataset_file() {
    let tmp = TempDir::new().unwrap();
    let dataset_path = tmp.path().join("processed_data.csv");
    std::fs::write(&dataset_path, "text,clean_text,label\n").unwrap();

    let err = Trainer::default()
        .train_from_file(&dataset_path, &tmp.path().join("model.json"))
        .unwrap_err();
    assert!(matches!(err, SpamError::EmptyDataset));
}

#[test]
fn test_load_error_is_distinct_from_prediction_error() {
    let tmp = TempDir::new().unwrap();
    let err = SpamDetector::load(&tmp.path().join("model/spam_model.json"))
        .err()
        .unwrap();

    assert!(matches!(err, SpamError::ArtifactLoad { .. }));
    assert!(!matches!(err, SpamError::Prediction(_)));
}
