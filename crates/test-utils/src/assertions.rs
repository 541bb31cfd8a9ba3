//! Assertion helpers for rendered text.

/// Assert that `haystack` contains every needle, reporting all missing ones at once.
///
/// Used for output whose ordering is not part of the contract, such as argument
/// lists assembled from a map.
///
/// ```
/// gqlsh_test_utils::assertions::assert_contains_all("query { users }", &["query {", "users"]);
/// ```
#[track_caller]
pub fn assert_contains_all(haystack: &str, needles: &[&str]) {
    let missing: Vec<&str> = needles
        .iter()
        .copied()
        .filter(|needle| !haystack.contains(needle))
        .collect();

    assert!(
        missing.is_empty(),
        "expected output to contain {missing:?}\n--- output ---\n{haystack}"
    );
}

/// Assert that `needles` appear in `haystack` in the given order.
#[track_caller]
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut offset = 0;
    for needle in needles {
        match haystack[offset..].find(needle) {
            Some(pos) => offset += pos + needle.len(),
            None => panic!(
                "expected {needle:?} after byte {offset}\n--- output ---\n{haystack}"
            ),
        }
    }
}
