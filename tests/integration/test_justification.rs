//! Sentinel inheritance and missing-folder policy

#[cfg(test)]
mod tests {
    use crate::fixtures::{sentinel_file_name, write_file};
    use idfa::{AuditOptions, ItemId, ItemStatus, SENTINEL_STEM, Taxonomy};
    use std::fs;
    use tempfile::TempDir;

    fn proativas_taxonomy() -> Taxonomy {
        Taxonomy::from_json_str(
            r#"{
                "categories": [{
                    "name": "1. SMS",
                    "tree": {
                        "3. Gestão de SMS": {
                            "3.3 Ferramentas Proativas": {
                                "DDS": {},
                                "Inspeções": {},
                                "Observações": {}
                            }
                        }
                    }
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_sentinel_in_ancestor_excuses_empty_descendants() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let proativas = root.join("1. SMS/3. Gestão de SMS/3.3 Ferramentas Proativas");

        write_file(proativas.join(sentinel_file_name()), b"").unwrap();
        write_file(proativas.join("DDS/dds.pdf"), b"dds").unwrap();
        fs::create_dir_all(proativas.join("Inspeções")).unwrap();
        fs::create_dir_all(proativas.join("Observações")).unwrap();

        let opts = AuditOptions {
            taxonomy: proativas_taxonomy(),
        };
        let audit = idfa::audit_archive(root, &opts).unwrap();
        let item = audit
            .report
            .find_item(&ItemId::new("1", "3", "3"))
            .expect("1.3.3 present");

        assert_eq!(item.status, ItemStatus::Complete);
        assert_eq!(item.previsao_pastas, 3);
        // one real file plus two excused folders
        assert_eq!(item.soma_total, 3);

        let dds = &item.diretorios[0];
        assert_eq!(dds.qtd, 1);
        assert_eq!(dds.itens, ["dds.pdf"]);

        for record in &item.diretorios[1..] {
            assert_eq!(record.qtd, 1);
            assert_eq!(record.itens, [SENTINEL_STEM]);
            assert!(record.diretorio.ends_with(SENTINEL_STEM));
        }
    }

    #[test]
    fn test_without_sentinel_empty_leaves_stay_unfilled() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let proativas = root.join("1. SMS/3. Gestão de SMS/3.3 Ferramentas Proativas");

        for leaf in ["DDS", "Inspeções", "Observações"] {
            fs::create_dir_all(proativas.join(leaf)).unwrap();
        }

        let opts = AuditOptions {
            taxonomy: proativas_taxonomy(),
        };
        let audit = idfa::audit_archive(root, &opts).unwrap();
        let item = audit
            .report
            .find_item(&ItemId::new("1", "3", "3"))
            .unwrap();

        assert_eq!(item.status, ItemStatus::NotStarted);
        assert_eq!(item.soma_total, 0);
        assert!(item.diretorios.iter().all(|r| r.qtd == 0 && r.itens.is_empty()));
    }

    #[test]
    fn test_sentinel_outside_taxonomy_has_no_effect() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let proativas = root.join("1. SMS/3. Gestão de SMS/3.3 Ferramentas Proativas");

        for leaf in ["DDS", "Inspeções", "Observações"] {
            fs::create_dir_all(proativas.join(leaf)).unwrap();
        }
        write_file(root.join("outros").join(sentinel_file_name()), b"").unwrap();

        let opts = AuditOptions {
            taxonomy: proativas_taxonomy(),
        };
        let audit = idfa::audit_archive(root, &opts).unwrap();
        let item = audit
            .report
            .find_item(&ItemId::new("1", "3", "3"))
            .unwrap();

        assert_eq!(item.status, ItemStatus::NotStarted);
    }

    #[test]
    fn test_empty_root_excuses_every_leaf() {
        let temp_dir = TempDir::new().unwrap();
        let audit = idfa::audit_archive(temp_dir.path(), &AuditOptions::default()).unwrap();

        assert_eq!(audit.report.categories.len(), 4);
        for (label, id, item) in audit.report.iter_items() {
            assert_eq!(item.status, ItemStatus::Complete, "{label} {id}");
            assert!((item.percentual_conclusao - 100.0).abs() < f64::EPSILON);
            for record in &item.diretorios {
                assert_eq!(record.qtd, 1);
                assert_eq!(record.itens, [SENTINEL_STEM]);
            }
        }
    }

    #[test]
    fn test_leaf_path_that_is_a_file_counts_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_file(
            root.join("1. SMS/3. Gestão de SMS/3.3 Ferramentas Proativas/DDS"),
            b"not a directory",
        )
        .unwrap();

        let opts = AuditOptions {
            taxonomy: proativas_taxonomy(),
        };
        let audit = idfa::audit_archive(root, &opts).unwrap();
        let item = audit
            .report
            .find_item(&ItemId::new("1", "3", "3"))
            .unwrap();

        assert_eq!(item.diretorios[0].qtd, 1);
        assert_eq!(item.diretorios[0].itens, [SENTINEL_STEM]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_leaf_counts_as_missing() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let dds = root.join("1. SMS/3. Gestão de SMS/3.3 Ferramentas Proativas/DDS");
        write_file(dds.join("ata.pdf"), b"evidence").unwrap();

        fs::set_permissions(&dds, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&dds).is_ok() {
            // Permission bits are not enforced for this user (e.g. root).
            fs::set_permissions(&dds, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let opts = AuditOptions {
            taxonomy: proativas_taxonomy(),
        };
        let audit = idfa::audit_archive(root, &opts);
        fs::set_permissions(&dds, fs::Permissions::from_mode(0o755)).unwrap();

        let audit = audit.unwrap();
        let item = audit
            .report
            .find_item(&ItemId::new("1", "3", "3"))
            .unwrap();

        let record = &item.diretorios[0];
        assert!(record.diretorio.contains("DDS"));
        assert_eq!(record.qtd, 1);
        assert_eq!(record.itens, [SENTINEL_STEM]);
    }
}
