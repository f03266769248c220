#[cfg(test)]
mod tests {
    use crate::protocol::Command;

    #[test]
    fn test_display_matches_line_forms() {
        let insert = Command::Insert {
            word: "abc".to_string(),
            value: 42,
        };
        assert_eq!(insert.to_string(), "+ abc 42");
        assert_eq!(Command::Delete { word: "abc".into() }.to_string(), "- abc");
        assert_eq!(Command::Query { word: "abc".into() }.to_string(), "abc");
        assert_eq!(Command::Save { path: "rbtree".into() }.to_string(), "! Save rbtree");
        assert_eq!(Command::Load { path: "rbtree".into() }.to_string(), "! Load rbtree");
    }

    #[test]
    fn test_write_line_appends_newline() {
        let mut out = Vec::new();
        Command::Query { word: "q".into() }.write_line(&mut out).unwrap();
        Command::Delete { word: "d".into() }.write_line(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "q\n- d\n");
    }

    #[test]
    fn test_parse_accepts_every_form() {
        assert_eq!(
            Command::parse_line("+ word 18446744073709551615").unwrap(),
            Command::Insert {
                word: "word".into(),
                value: u64::MAX
            }
        );
        assert_eq!(
            Command::parse_line("- word").unwrap(),
            Command::Delete { word: "word".into() }
        );
        assert_eq!(
            Command::parse_line("word").unwrap(),
            Command::Query { word: "word".into() }
        );
        assert_eq!(
            Command::parse_line("! Load some dir/rbtree").unwrap(),
            Command::Load {
                path: "some dir/rbtree".into()
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        for bad in ["", "+ word", "+ word -1", "+ word 12 extra", "-", "- a b", "! Dump x", "! Save", "a b"] {
            assert!(Command::parse_line(bad).is_err(), "expected '{}' to be rejected", bad);
        }
    }

    #[test]
    fn test_parse_rejects_value_overflow() {
        let err = Command::parse_line("+ word 18446744073709551616").unwrap_err();
        assert!(err.message.contains("invalid insert value"));
    }

    #[test]
    fn test_word_accessor() {
        assert_eq!(Command::Query { word: "w".into() }.word(), Some("w"));
        assert_eq!(Command::Save { path: "p".into() }.word(), None);
    }
}
