use fastfs::{join, normalize, FsError};
use proptest::prelude::*;

#[test]
fn normalize_pinned_examples() {
    assert_eq!(normalize(""), ".");
    assert_eq!(normalize("a/./b/../c"), "a/c");
    assert_eq!(normalize("/a/../../b"), "/b");
    assert_eq!(normalize(".."), "..");
}

#[test]
fn join_pinned_examples() {
    assert_eq!(join(&["/a/", "b", "/c"]).unwrap(), "/c");
    assert_eq!(join(&["a", "b/", "c"]).unwrap(), "a/b/c");
    assert_eq!(join(&["a", "", " ", "c"]).unwrap(), "a/ /c");
}

#[test]
fn join_rejects_empty_list() {
    let empty: Vec<String> = Vec::new();
    assert!(matches!(join(&empty), Err(FsError::Usage { .. })));
}

#[test]
fn join_then_normalize() {
    let joined = join(&["/srv", "www/", "../logs", "./access.log"]).unwrap();
    assert_eq!(joined, "/srv/www/../logs/./access.log");
    assert_eq!(normalize(&joined), "/srv/logs/access.log");
}

fn path_strategy() -> impl Strategy<Value = String> {
    "[ab./]{0,24}"
}

proptest! {
    #[test]
    fn normalize_is_idempotent(path in path_strategy()) {
        let once = normalize(&path);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_preserves_absoluteness(path in path_strategy()) {
        let normalized = normalize(&path);
        prop_assert_eq!(path.starts_with('/'), normalized.first() == Some(&b'/'));
    }

    #[test]
    fn normalize_never_grows(path in path_strategy()) {
        prop_assume!(!path.is_empty());
        prop_assert!(normalize(&path).len() <= path.len());
    }

    #[test]
    fn normalize_output_is_clean(path in path_strategy()) {
        let normalized = normalize(&path);
        let text = String::from_utf8(normalized.to_vec()).unwrap();
        prop_assert!(!text.contains("//"));
        prop_assert!(text == "/" || !text.ends_with('/'));
        prop_assert!(text.split('/').all(|segment| segment != "." || text == "."));
    }

    #[test]
    fn join_discards_before_last_absolute(
        head in prop::collection::vec("[ab/]{0,4}", 0..4),
        anchor in "/[ab]{1,3}",
        tail in prop::collection::vec("[ab]{1,3}", 0..3),
    ) {
        let mut with_head = head.clone();
        with_head.push(anchor.clone());
        with_head.extend(tail.iter().cloned());

        let mut without_head = vec![anchor];
        without_head.extend(tail.iter().cloned());

        prop_assert_eq!(join(&with_head).unwrap(), join(&without_head).unwrap());
    }
}
