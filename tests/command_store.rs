use std::io::Cursor;

use mexec::commands::{CommandLine, CommandStore};
use mexec_test_utils::builders::CommandFileBuilder;

#[test]
fn test_read_from_keeps_line_order() {
    mexec_test_utils::init_tracing();

    let input = CommandFileBuilder::new()
        .stages(["ls -l", "grep foo", "wc -l"])
        .contents();

    let store = CommandStore::read_from(Cursor::new(input)).unwrap();

    assert_eq!(store.count(), 3);
    assert_eq!(store.get(0), Some(&CommandLine::from("ls -l")));
    assert_eq!(store.get(1), Some(&CommandLine::from("grep foo")));
    assert_eq!(store.get(2), Some(&CommandLine::from("wc -l")));
    assert_eq!(store.get(3), None);
}

#[test]
fn test_last_line_without_newline_is_kept() {
    let input = CommandFileBuilder::new()
        .stages(["echo a", "cat"])
        .without_trailing_newline()
        .contents();

    let store = CommandStore::read_from(Cursor::new(input)).unwrap();

    assert_eq!(store.count(), 2);
    assert_eq!(store.get(1), Some(&CommandLine::from("cat")));
}

#[test]
fn test_blank_lines_are_stages() {
    let store = CommandStore::read_from(Cursor::new("echo a\n   \ncat\n")).unwrap();

    assert_eq!(store.count(), 3);
    assert_eq!(store.get(1), Some(&CommandLine::from("   ")));
}

#[test]
fn test_crlf_line_endings_are_stripped() {
    let store = CommandStore::read_from(Cursor::new("echo a\r\ncat\r\n")).unwrap();

    assert_eq!(store.get(0), Some(&CommandLine::from("echo a")));
    assert_eq!(store.get(1), Some(&CommandLine::from("cat")));
}

#[test]
fn test_non_utf8_bytes_are_preserved() {
    let bytes: &[u8] = b"printf \xff\xfe\n";
    let store = CommandStore::read_from(Cursor::new(bytes)).unwrap();

    assert_eq!(store.get(0).unwrap().as_bytes(), b"printf \xff\xfe");
}

#[test]
fn test_empty_input_gives_empty_store() {
    let store = CommandStore::read_from(Cursor::new("")).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.count(), 0);
}

#[test]
fn test_ten_thousand_lines_without_truncation() {
    let input: String = (0..10_000).map(|i| format!("echo line-{i}\n")).collect();

    let store = CommandStore::read_from(Cursor::new(input)).unwrap();

    assert_eq!(store.count(), 10_000);
    assert_eq!(store.get(9_999), Some(&CommandLine::from("echo line-9999")));
}

#[test]
fn test_long_lines_are_not_split() {
    let long = format!("echo {}", "x".repeat(8192));
    let store = CommandStore::read_from(Cursor::new(format!("{long}\ncat\n"))).unwrap();

    assert_eq!(store.count(), 2);
    assert_eq!(store.get(0).unwrap().as_bytes().len(), long.len());
}

#[test]
fn test_append_grows_count() {
    let mut store = CommandStore::new();
    for i in 0..5 {
        store.append(CommandLine::from("true")).unwrap();
        assert_eq!(store.count(), i + 1);
    }
    assert_eq!(store.iter().count(), 5);
}
