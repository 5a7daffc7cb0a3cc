//! Export write/read round-trip test

#[cfg(test)]
mod tests {
    use crate::fixtures::create_reference_archive;
    use idfa::io::export::{read_report, write_report};
    use idfa::{AuditOptions, AuditReport, Report};
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_export_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_reference_archive(temp_dir.path()).unwrap();
        let audit = idfa::audit_archive(&root, &AuditOptions::default()).unwrap();

        let export = temp_dir.path().join("out/outubro.parquet");
        let write_result = write_report(&export, &audit);
        assert!(
            write_result.is_ok(),
            "Failed to write export: {:?}",
            write_result.err()
        );

        let restored = read_report(&export).expect("read export");
        assert_eq!(restored, audit);
    }

    #[test]
    fn test_export_of_empty_report_keeps_root() {
        let temp_file = NamedTempFile::new().unwrap();
        let audit = AuditReport {
            root: "/arquivo/10. Outubro".to_string(),
            report: Report::default(),
        };

        write_report(temp_file.path(), &audit).unwrap();
        let restored = read_report(temp_file.path()).unwrap();

        assert_eq!(restored.root, "/arquivo/10. Outubro");
        assert!(restored.report.categories.is_empty());
    }

    #[test]
    fn test_reading_garbage_fails() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), b"not parquet").unwrap();

        let result = read_report(temp_file.path());
        assert!(result.is_err());
    }
}
