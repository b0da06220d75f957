use super::*;

#[test]
fn clone_shares_the_allocation() {
    let a = Heap::new(vec![1u8, 2, 3]);
    let b = a.clone();
    assert!(Heap::ptr_eq(&a, &b));
    assert_eq!(*a, *b);
}

#[test]
fn equality_is_by_content() {
    let a = Heap::new(String::from("abc"));
    let b = Heap::new(String::from("abc"));
    let c = Heap::new(String::from("abd"));
    assert!(!Heap::ptr_eq(&a, &b));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn unsized_payloads() {
    let bytes: Heap<[u8]> = Heap::from_arc(Arc::from(&b"xyz"[..]));
    assert_eq!(&*bytes, b"xyz");
}

#[test]
fn into_inner_needs_the_last_reference() {
    let a = Heap::new(7u32);
    let b = a.clone();
    assert_eq!(a.into_inner(), None);
    assert_eq!(b.into_inner(), Some(7));
}
