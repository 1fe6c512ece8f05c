//! Table merge semantics: incremental extension of the same table across
//! dotted keys and repeated headers, and eager conflict detection.

use tomlite::{from_str, Error, Table, Value};

#[test]
fn test_dotted_keys_extend_one_table() {
    let doc = from_str("a.b = 1\na.c = 2").unwrap();
    let a = doc.get("a").unwrap().as_table().unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a.get("b").unwrap().as_i32(), Some(1));
    assert_eq!(a.get("c").unwrap().as_i32(), Some(2));
}

#[test]
fn test_duplicate_leaf_assignment_conflicts() {
    assert!(matches!(
        from_str("a.b = 1\na.b = 2").unwrap_err(),
        Error::KeyConflict { .. }
    ));
    assert!(matches!(
        from_str("k = 1\nk = 1").unwrap_err(),
        Error::KeyConflict { .. }
    ));
}

#[test]
fn test_repeated_header_merges() {
    let doc = from_str("[x]\nk = 1\n[x]\nj = 2").unwrap();
    let x = doc.get("x").unwrap().as_table().unwrap();
    assert_eq!(x.len(), 2);
    assert_eq!(x.get("k").unwrap().as_i32(), Some(1));
    assert_eq!(x.get("j").unwrap().as_i32(), Some(2));
}

#[test]
fn test_repeated_header_duplicate_key_conflicts() {
    assert!(matches!(
        from_str("[x]\nk = 1\n[x]\nk = 2").unwrap_err(),
        Error::KeyConflict { .. }
    ));
}

#[test]
fn test_header_merges_with_prior_dotted_keys() {
    let doc = from_str("x.k = 1\n[x]\nj = 2").unwrap();
    let x = doc.get("x").unwrap().as_table().unwrap();
    assert_eq!(x.len(), 2);
}

#[test]
fn test_dotted_keys_merge_with_prior_header() {
    let doc = from_str("[x]\nk = 1\n\n[y]\nj = 1\n\n[x.sub]\nd = 2").unwrap();
    let x = doc.get("x").unwrap().as_table().unwrap();
    assert!(x.contains_key("k"));
    let sub = x.get("sub").unwrap().as_table().unwrap();
    assert_eq!(sub.get("d").unwrap().as_i32(), Some(2));
}

#[test]
fn test_non_table_intermediate_conflicts() {
    assert!(matches!(
        from_str("a = 1\na.b = 2").unwrap_err(),
        Error::KeyConflict { .. }
    ));
}

#[test]
fn test_header_over_scalar_conflicts() {
    assert!(matches!(
        from_str("x = 1\n[x]\nk = 2").unwrap_err(),
        Error::KeyConflict { .. }
    ));
}

#[test]
fn test_keys_after_header_land_under_it() {
    // a bare `x` after [x] is x.x, not a root-level collision
    let doc = from_str("[x]\nk = 1\nx = 2").unwrap();
    let x = doc.get("x").unwrap().as_table().unwrap();
    assert_eq!(x.get("x").unwrap().as_i32(), Some(2));
}

#[test]
fn test_duplicate_key_under_header_conflicts() {
    assert!(matches!(
        from_str("[x]\nk = 1\nk = 2").unwrap_err(),
        Error::KeyConflict { .. }
    ));
}

#[test]
fn test_merge_recurses_through_depth() {
    let doc = from_str("[a.b]\nx = 1\n[a.b.c]\ny = 2\n[a]\nz = 3").unwrap();
    let a = doc.get("a").unwrap().as_table().unwrap();
    assert_eq!(a.get("z").unwrap().as_i32(), Some(3));
    let b = a.get("b").unwrap().as_table().unwrap();
    assert_eq!(b.get("x").unwrap().as_i32(), Some(1));
    let c = b.get("c").unwrap().as_table().unwrap();
    assert_eq!(c.get("y").unwrap().as_i32(), Some(2));
}

#[test]
fn test_conflict_error_names_the_key() {
    let err = from_str("a.b = 1\na.b = 2").unwrap_err();
    match err {
        Error::KeyConflict { key, .. } => assert!(key.contains('b'), "key was: {key}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_inline_table_merges_like_any_table() {
    // an inline table extends a previously declared dotted structure
    let doc = from_str("t.a = 1\nt.b = {c = 2}").unwrap();
    let t = doc.get("t").unwrap().as_table().unwrap();
    assert_eq!(t.len(), 2);

    // but colliding leaves inside it still conflict
    let mut existing = Table::new();
    existing.insert("t.c", Value::from(1)).unwrap();
    let mut incoming = Table::new();
    incoming.insert("c", Value::from(2)).unwrap();
    assert!(matches!(
        existing.insert("t", Value::Table(incoming)).unwrap_err(),
        Error::KeyConflict { .. }
    ));
}
