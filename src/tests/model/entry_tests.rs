    use super::*;

    #[test]
    fn parse_trims_both_fields() {
        let entry = Entry::parse("  Stay hungry.  ", "\tLife\n").expect("parse entry");
        assert_eq!(entry.text, "Stay hungry.");
        assert_eq!(entry.category, "Life");
    }

    #[test]
    fn parse_rejects_blank_fields() {
        let err = Entry::parse("   ", "Life").unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)), "{}", err);

        let err = Entry::parse("Stay hungry.", "").unwrap_err();
        assert!(err.to_string().contains("category is empty"), "{}", err);
    }

    #[test]
    fn from_json_reports_first_problem() {
        let missing = serde_json::json!({"text": "a"});
        assert_eq!(
            Entry::from_json(&missing),
            Err(RejectReason::Missing("category"))
        );

        let wrong_type = serde_json::json!({"text": 42, "category": "b"});
        assert_eq!(
            Entry::from_json(&wrong_type),
            Err(RejectReason::NotAString("text"))
        );

        let blank = serde_json::json!({"text": "", "category": "b"});
        assert_eq!(Entry::from_json(&blank), Err(RejectReason::Empty("text")));

        assert_eq!(
            Entry::from_json(&serde_json::json!("a")),
            Err(RejectReason::NotAnObject)
        );
    }

    #[test]
    fn from_json_ignores_extra_fields() {
        let value = serde_json::json!({"text": " a ", "category": "b", "author": "x"});
        let entry = Entry::from_json(&value).expect("valid element");
        assert_eq!(entry, Entry::parse("a", "b").expect("parse"));
    }

    #[test]
    fn conflict_serializes_with_camel_case_keys() {
        let conflict = Conflict {
            text: "a".to_string(),
            local_category: "X".to_string(),
            server_category: "Y".to_string(),
        };
        let v = serde_json::to_value(&conflict).expect("serialize conflict");
        assert_eq!(
            v,
            serde_json::json!({"text": "a", "localCategory": "X", "serverCategory": "Y"})
        );
    }

    #[test]
    fn seed_entries_are_valid_and_distinct() {
        let seeds = default_entries();
        assert!((3..=6).contains(&seeds.len()));
        let texts: std::collections::HashSet<_> = seeds.iter().map(|e| &e.text).collect();
        assert_eq!(texts.len(), seeds.len());
        for e in &seeds {
            assert_eq!(Entry::parse(&e.text, &e.category).expect("seed parses"), *e);
        }
    }
