use super::*;

#[test]
fn push_and_iterate_in_order() {
    let mut units = UnitList::with_capacity(3);
    units.push(b"sps");
    units.push(b"");
    units.push_with(|buf| buf.extend_from_slice(b"slice"));

    assert_eq!(units.len(), 3);
    assert_eq!(units.payload_len(), 8);
    let payloads: Vec<&[u8]> = units.iter().map(|u| u.payload()).collect();
    assert_eq!(payloads, vec![&b"sps"[..], &b""[..], &b"slice"[..]]);
    assert!(units.get(1).unwrap().is_empty());
    assert!(units.get(3).is_none());
}

#[test]
fn clear_keeps_capacity() {
    let mut units = UnitList::with_capacity(4);
    for _ in 0..4 {
        units.push(b"x");
    }
    let cap = units.capacity();
    units.clear();
    assert!(units.is_empty());
    assert_eq!(units.payload_len(), 0);
    assert_eq!(units.capacity(), cap);
    assert!(cap >= 4);
}
