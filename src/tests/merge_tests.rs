    use super::*;

    fn e(text: &str, category: &str) -> Entry {
        Entry {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn remote_category_wins_and_conflict_is_reported() {
        let out = merge_entries(&[e("a", "X")], &[e("a", "Y")]);
        assert_eq!(out.merged, vec![e("a", "Y")]);
        assert_eq!(
            out.conflicts,
            vec![Conflict {
                text: "a".to_string(),
                local_category: "X".to_string(),
                server_category: "Y".to_string(),
            }]
        );
    }

    #[test]
    fn disjoint_lists_are_unioned_without_conflicts() {
        let out = merge_entries(&[e("a", "X"), e("b", "Y")], &[e("c", "Z")]);
        assert_eq!(out.merged, vec![e("a", "X"), e("b", "Y"), e("c", "Z")]);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn merging_a_list_with_itself_is_identity() {
        let list = vec![e("a", "X"), e("b", "Y"), e("c", "X")];
        let out = merge_entries(&list, &list);
        assert_eq!(out.merged, list);
        assert!(out.conflicts.is_empty());
        assert!(!out.differs_from(&list));
    }

    #[test]
    fn shared_texts_with_equal_category_are_untouched() {
        let out = merge_entries(&[e("a", "X"), e("b", "L")], &[e("b", "R"), e("a", "X")]);
        assert_eq!(out.merged, vec![e("a", "X"), e("b", "R")]);
        assert_eq!(out.conflicts.len(), 1);
        assert_eq!(out.conflicts[0].text, "b");
    }

    #[test]
    fn duplicates_collapse_to_one_entry_per_text() {
        let local = vec![e("a", "X"), e("a", "Q"), e("b", "Y")];
        let remote = vec![e("c", "Z"), e("c", "W"), e("a", "R")];
        let out = merge_entries(&local, &remote);

        assert_eq!(out.merged, vec![e("a", "R"), e("b", "Y"), e("c", "Z")]);
        assert_eq!(out.conflicts.len(), 1);
        assert!(out.differs_from(&local));
    }

    #[test]
    fn later_local_duplicate_with_other_category_is_reported() {
        let out = merge_entries(&[e("a", "X"), e("a", "Y")], &[e("a", "X")]);
        assert_eq!(out.merged, vec![e("a", "X")]);
        assert_eq!(
            out.conflicts,
            vec![Conflict {
                text: "a".to_string(),
                local_category: "Y".to_string(),
                server_category: "X".to_string(),
            }]
        );
    }

    #[test]
    fn differing_local_duplicates_report_one_conflict_per_text() {
        let out = merge_entries(&[e("a", "P"), e("a", "Q"), e("a", "R")], &[e("a", "R")]);
        assert_eq!(out.merged, vec![e("a", "R")]);
        assert_eq!(out.conflicts.len(), 1);
        assert_eq!(out.conflicts[0].local_category, "P");
    }

    #[test]
    fn text_match_is_case_sensitive() {
        let out = merge_entries(&[e("Hello", "X")], &[e("hello", "Y")]);
        assert_eq!(out.merged.len(), 2);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn empty_sides() {
        let list = vec![e("a", "X")];
        assert_eq!(merge_entries(&list, &[]).merged, list);
        assert_eq!(merge_entries(&[], &list).merged, list);
        assert_eq!(merge_entries(&[], &[]), MergeOutcome::default());
    }
