use strata_conf::Config;

fn parse(src: &str) -> Config {
    Config::parse(src.as_bytes(), &[]).expect("input must parse")
}

#[test]
fn empty_input_yields_empty_config() {
    let config = parse("");
    assert!(config.is_empty());
    assert_eq!(config.len(), 0);
    assert_eq!(config.sections(), Vec::<String>::new());
}

#[test]
fn section_without_keys() {
    let config = parse("[foo]");
    assert_eq!(config.len(), 1);
    assert_eq!(config.sections(), ["foo"]);
    assert_eq!(config.keys("foo"), Some(Vec::new()));
}

#[test]
fn single_key() {
    for src in [
        "[foo]\nasd = zxc",
        "[foo]\nasd = zxc\n",
        "[foo]\r\nasd = zxc\r\n",
    ] {
        let config = parse(src);
        assert_eq!(config.sections(), ["foo"], "src: {src:?}");
        assert_eq!(config.get("foo", "asd"), Some("zxc"), "src: {src:?}");
        assert_eq!(config.keys("foo"), Some(vec!["asd".to_string()]));
    }
}

#[test]
fn multiple_keys_keep_order() {
    for src in [
        "[foo]\nasd = zxc\nqwe = rty\nzxc = vbn",
        "[foo]\nasd = zxc\nqwe = rty\nzxc = vbn\n",
        "[foo]\r\nasd = zxc\r\nqwe = rty\r\nzxc = vbn\r\n",
    ] {
        let config = parse(src);
        assert_eq!(config.get("foo", "asd"), Some("zxc"));
        assert_eq!(config.get("foo", "qwe"), Some("rty"));
        assert_eq!(config.get("foo", "zxc"), Some("vbn"));
        assert_eq!(
            config.keys("foo"),
            Some(vec!["asd".to_string(), "qwe".to_string(), "zxc".to_string()]),
            "src: {src:?}"
        );
    }
}

#[test]
fn multiple_sections_keep_order() {
    for src in [
        "[foo]\nasd = zxc\n\n[bar]\nlol = hehe",
        "[foo]\nasd = zxc\n\n[bar]\nlol = hehe\n",
        "[foo]\r\nasd = zxc\r\n\r\n[bar]\r\nlol = hehe\r\n",
    ] {
        let config = parse(src);
        assert_eq!(config.len(), 2);
        assert_eq!(config.sections(), ["foo", "bar"], "src: {src:?}");
        assert_eq!(config.get("foo", "asd"), Some("zxc"));
        assert_eq!(config.get("bar", "lol"), Some("hehe"));
    }
}

#[test]
fn file_must_start_with_section() {
    let err = Config::parse(b"asd\n[foo]", &[]).unwrap_err();
    assert_eq!(err.message, "file must start with section");
    assert_eq!(err.offset, 0);
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 1);
    assert_eq!(err.line_text, "asd");
}

#[test]
fn section_names_cannot_span_lines() {
    let err = Config::parse(b"[foo\nbar]", &[]).unwrap_err();
    assert_eq!(err.message, "section names can't have new lines");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 5);
    assert_eq!(err.line_text, "[foo");
}

#[test]
fn key_without_value() {
    let err = Config::parse(b"[foobar]\nasd = 12\nfoo", &[]).unwrap_err();
    assert_eq!(err.message, "key without value: foo");
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 3);
    assert_eq!(err.line_text, "foo");

    let err = Config::parse(b"[foobar]\nasd = 12\nfoo\n", &[]).unwrap_err();
    assert_eq!(err.message, "key without value: foo");
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 4);
    assert_eq!(err.line_text, "foo");
}

#[test]
fn error_position_with_crlf_endings() {
    let err = Config::parse(b"[foo]\r\nbar baz\r\n", &[]).unwrap_err();
    assert_eq!(err.message, "key without value: bar baz");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 8);
    assert_eq!(err.line_text, "bar baz");
}

#[test]
fn error_display_includes_source_line() {
    let err = Config::parse(b"asd\n[foo]", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "file must start with section\nerror occurred near line 1, position 1: asd"
    );
}

#[test]
fn list_sections_collect_raw_lines() {
    let config = Config::parse(b"[bar]\nlol = hehe\nasdasdadssad\n", &["bar"])
        .expect("input must parse");
    assert_eq!(
        config.get_list("bar").map(<[String]>::to_vec),
        Some(vec!["lol = hehe".to_string(), "asdasdadssad".to_string()])
    );
    // list sections have no key/value structure
    assert_eq!(config.keys("bar"), None);
    assert_eq!(config.get("bar", "lol"), None);
}

#[test]
fn quoted_list_items_are_verbatim() {
    let config = Config::parse(b"[l]\n\"  item one  \"\nsecond\n", &["l"])
        .expect("input must parse");
    assert_eq!(
        config.get_list("l").map(<[String]>::to_vec),
        Some(vec!["  item one  ".to_string(), "second".to_string()])
    );
}

#[test]
fn quoted_value_with_escaped_quote() {
    let config = parse("[foo]\na = \"lo\\\"l\"\n");
    assert_eq!(config.get("foo", "a"), Some("lo\"l"));
}

#[test]
fn quoted_value_preserves_whitespace() {
    let config = parse("[foo]\nk = \" a b \"\n");
    assert_eq!(config.get("foo", "k"), Some(" a b "));
}

#[test]
fn garbage_after_closing_quote_is_an_error() {
    let err = Config::parse(b"[foo]\nk = \"v\" x\n", &[]).unwrap_err();
    assert_eq!(
        err.message,
        "invalid value for key, should not have anything after quotes"
    );
    assert_eq!(err.line, 2);
}

#[test]
fn garbage_after_list_quote_is_an_error() {
    let err = Config::parse(b"[l]\n\"item\" x\n", &["l"]).unwrap_err();
    assert_eq!(
        err.message,
        "invalid value for list item, should not have anything after quotes"
    );
}

#[test]
fn escape_makes_the_next_byte_literal() {
    let config = parse("[foo]\npath = C:\\\\temp\n");
    assert_eq!(config.get("foo", "path"), Some("C:\\temp"));
}

#[test]
fn unquoted_values_are_trimmed() {
    let config = parse("[foo]\nk =   spaced out   \n");
    assert_eq!(config.get("foo", "k"), Some("spaced out"));
}

#[test]
fn empty_values() {
    let config = parse("[foo]\nk =\n");
    assert_eq!(config.get("foo", "k"), Some(""));

    let config = parse("[foo]\nk =");
    assert_eq!(config.get("foo", "k"), Some(""));

    let config = parse("[foo]\nk = \"\"\n");
    assert_eq!(config.get("foo", "k"), Some(""));
}

#[test]
fn comments_run_to_end_of_line() {
    let config = parse("# leading\n; also leading\n[foo]\n  # indented\nk = v # kept\n");
    assert_eq!(config.sections(), ["foo"]);
    assert_eq!(config.keys("foo"), Some(vec!["k".to_string()]));
    // a hash inside a value is not a comment
    assert_eq!(config.get("foo", "k"), Some("v # kept"));
}

#[test]
fn reopening_a_section_replaces_it() {
    let config = parse("[a]\nk = 1\n[b]\nx = y\n[a]\nz = 2\n");
    assert_eq!(config.sections(), ["a", "b"]);
    assert_eq!(config.keys("a"), Some(vec!["z".to_string()]));
    assert_eq!(config.get("a", "k"), None);
    assert_eq!(config.get("a", "z"), Some("2"));
    assert_eq!(config.get("b", "x"), Some("y"));
}

#[test]
fn unterminated_constructs_are_dropped() {
    // a header that never closes contributes nothing
    let config = parse("[foo");
    assert!(config.is_empty());

    // an unterminated quoted value is discarded along with its key
    let config = parse("[foo]\nk = \"abc");
    assert_eq!(config.sections(), ["foo"]);
    assert_eq!(config.keys("foo"), Some(Vec::new()));
}

#[test]
fn parsing_is_idempotent() {
    let src = b"[foo]\nasd = zxc\nqwe = rty\n\n[items]\none\n\"two\"\n\n[bar]\nlol = hehe\n";
    let first = Config::parse(src, &["items"]).expect("input must parse");
    let second = Config::parse(src, &["items"]).expect("input must parse");
    assert_eq!(first, second);
}
