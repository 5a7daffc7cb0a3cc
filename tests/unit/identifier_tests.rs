//! Unit tests for identifier derivation

#[cfg(test)]
mod tests {
    use idfa::IdentifierScheme;
    use idfa::services::identifier::{
        category_numeral, compute_identifier, digit_run_after_dot, first_digit_run,
    };

    fn segs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_prefixed_scheme() {
        let id = compute_identifier(
            "1",
            IdentifierScheme::CategoryPrefixed,
            &segs(&["1. Incidentes", "1.1 Abrangencia das Ocorrencias"]),
        );
        assert_eq!(id.to_string(), "1.1.1");

        let id = compute_identifier(
            "4",
            IdentifierScheme::CategoryPrefixed,
            &segs(&["2. Recursos Humanos", "2.2 Treinamentos"]),
        );
        assert_eq!(id.to_string(), "4.2.2");
    }

    #[test]
    fn test_category_prefixed_falls_back_to_first_number() {
        let id = compute_identifier(
            "1",
            IdentifierScheme::CategoryPrefixed,
            &segs(&["3. Gestão de SMS", "Relatório 7"]),
        );
        assert_eq!(id.to_string(), "1.3.7");

        let id = compute_identifier(
            "1",
            IdentifierScheme::CategoryPrefixed,
            &segs(&["Geral", "Sem numero"]),
        );
        assert_eq!(id.to_string(), "1.0.0");
    }

    #[test]
    fn test_section_dotted_scheme() {
        let id = compute_identifier(
            "2",
            IdentifierScheme::SectionDotted,
            &segs(&["2.3 Não Conformidades", "2. Ações Corretivas"]),
        );
        assert_eq!(id.to_string(), "2.3.2");

        let id = compute_identifier(
            "3",
            IdentifierScheme::SectionDotted,
            &segs(&["3. Prazo sem subseção", "Curva S"]),
        );
        assert_eq!(id.to_string(), "3.0.0");
    }

    #[test]
    fn test_missing_segments_default_to_zero() {
        let prefixed = compute_identifier("1", IdentifierScheme::CategoryPrefixed, &[]);
        assert_eq!(prefixed.to_string(), "1.0.0");

        let dotted = compute_identifier("2", IdentifierScheme::SectionDotted, &segs(&["2.4 X"]));
        assert_eq!(dotted.to_string(), "2.4.0");
    }

    #[test]
    fn test_deeper_segments_do_not_affect_identifier() {
        let shallow = compute_identifier(
            "1",
            IdentifierScheme::CategoryPrefixed,
            &segs(&["3. Gestão de SMS", "3.3 Ferramentas Proativas"]),
        );
        let deep = compute_identifier(
            "1",
            IdentifierScheme::CategoryPrefixed,
            &segs(&["3. Gestão de SMS", "3.3 Ferramentas Proativas", "9.9 DDS", "42"]),
        );
        assert_eq!(shallow, deep);
    }

    #[test]
    fn test_identifier_is_deterministic() {
        let path = segs(&["2.1 Controle de Documentos", "1. Lista Mestra"]);
        let first = compute_identifier("2", IdentifierScheme::SectionDotted, &path);
        for _ in 0..10 {
            assert_eq!(
                compute_identifier("2", IdentifierScheme::SectionDotted, &path),
                first
            );
        }
    }

    #[test]
    fn test_digit_scanners() {
        assert_eq!(first_digit_run("abc 123 def 45"), Some("123"));
        assert_eq!(first_digit_run(""), None);
        assert_eq!(digit_run_after_dot("10.12 Item"), Some("12"));
        assert_eq!(digit_run_after_dot("1.a 2.3"), Some("3"));
        assert_eq!(digit_run_after_dot(".5"), None);
        assert_eq!(digit_run_after_dot("7."), None);
    }

    #[test]
    fn test_category_numeral() {
        assert_eq!(category_numeral("1. SMS"), "1");
        assert_eq!(category_numeral("12. Extra"), "12");
        assert_eq!(category_numeral("Sem numero"), "0");
    }
}
