//! Integration tests for terraform-ioc-normalizer
//!
//! These tests drive the full load -> process -> export workflow on the sample files.

use chrono::NaiveDate;
use terraform_ioc_normalizer::{
    output::{read_export_snapshot, ExportFormat, MemoryClipboard},
    parsing::Delimiter,
    NormalizerError, Session, Stage,
};

const TEST_DATA: &str = "src/tests/test_data";

fn load(name: &str) -> Session {
    let mut session = Session::new();
    session
        .load(format!("{TEST_DATA}/{name}"))
        .unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
    session
}

#[test]
fn test_full_workflow_with_export() {
    let mut session = load("mixed_noise.csv");
    let profile = session.profile().expect("profile after load");
    assert_eq!(profile.delimiter, Delimiter::Comma);
    assert!(profile.has_header);
    assert_eq!(
        session.raw_addresses(),
        vec!["45.9.148.3", "5.188.206.14", "193.42.33.7", "91.240.118.172"]
    );

    assert_eq!(session.process().expect("process"), 4);

    let mut clipboard = MemoryClipboard::default();
    let text = session.copy_to(&mut clipboard).expect("copy");
    assert_eq!(
        text,
        r#"["45.9.148.3/32","5.188.206.14/32","193.42.33.7/32","91.240.118.172/32"]"#
    );

    let dir = tempfile::tempdir().expect("tempdir");
    let now = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_micro_opt(20, 43, 7, 250)
        .unwrap();
    let report = session
        .export_to(dir.path(), now, &[ExportFormat::Json, ExportFormat::Text])
        .expect("export");
    assert_eq!(session.stage(), Stage::Exported);

    let json_path = dir.path().join("terraform_iocs_4_20240110_204307.json");
    let txt_path = dir.path().join("terraform_iocs_4_20240110_204307.txt");
    assert_eq!(report.paths, vec![json_path.clone(), txt_path.clone()]);

    let snapshot = read_export_snapshot(&json_path).expect("read back export");
    assert_eq!(snapshot.source_name, "mixed_noise.csv");
    assert!(snapshot.source_file.ends_with("src/tests/test_data/mixed_noise.csv"));
    assert_eq!(snapshot.ipv4_count, 4);
    assert_eq!(snapshot.terraform_list, text);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(raw["export_timestamp"], "2024-01-10T20:43:07.000250");
    assert_eq!(raw["cidr_blocks"][2], "193.42.33.7/32");

    assert_eq!(
        std::fs::read_to_string(&txt_path).unwrap(),
        "45.9.148.3\n5.188.206.14\n193.42.33.7\n91.240.118.172\n"
    );
}

#[test]
fn test_semicolon_header_file() {
    let session = load("semicolon_header.csv");
    let profile = session.profile().unwrap();
    assert_eq!(profile.delimiter, Delimiter::Semicolon);
    assert!(profile.has_header);
    assert_eq!(
        session.raw_addresses(),
        vec!["102.129.165.164", "103.136.69.227"]
    );
}

#[test]
fn test_headerless_tsv_dedupes() {
    let session = load("headerless.tsv");
    let profile = session.profile().unwrap();
    assert_eq!(profile.delimiter, Delimiter::Tab);
    assert!(!profile.has_header);
    assert_eq!(session.raw_addresses(), vec!["192.168.1.1", "10.0.0.1"]);
    assert_eq!(session.summary().raw_count, 2);
}

#[test]
fn test_log_file_scanned() {
    let session = load("auth.log");
    assert_eq!(session.profile().unwrap().delimiter, Delimiter::None);
    assert_eq!(
        session.raw_addresses(),
        vec!["185.220.101.4", "45.155.205.233"]
    );
}

#[test]
fn test_one_per_line_keeps_order() {
    let mut session = load("one_per_line.txt");
    let expected = vec!["8.8.8.8", "1.1.1.1", "9.9.9.9", "4.4.4.4", "208.67.222.222"];
    assert_eq!(session.raw_addresses(), expected);
    session.process().unwrap();
    let stripped: Vec<String> = session
        .cidr_blocks()
        .iter()
        .map(|c| c.trim_end_matches("/32").to_string())
        .collect();
    assert_eq!(stripped, expected);
}

#[test]
fn test_empty_and_no_match_files() {
    for name in ["empty.txt", "no_matches.txt"] {
        let mut session = Session::new();
        let err = session
            .load(format!("{TEST_DATA}/{name}"))
            .expect_err("no addresses");
        assert!(
            matches!(err, NormalizerError::EmptyOrNoMatches { .. }),
            "{name}: {err}"
        );
        assert_eq!(session.summary().raw_count, 0);
        assert!(session.process().is_err());
    }
}

#[test]
fn test_unsupported_extension() {
    let mut session = Session::new();
    let err = session.load("Cargo.toml").expect_err("toml is not accepted");
    assert!(matches!(err, NormalizerError::UnsupportedFileType { .. }));
    assert_eq!(session.stage(), Stage::Empty);
}
