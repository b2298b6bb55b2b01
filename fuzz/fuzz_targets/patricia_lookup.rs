#![no_main]
use libfuzzer_sys::fuzz_target;
use strie::Patricia;

fuzz_target!(|data: Vec<Vec<u8>>| {
    let mut keys = data;
    for key in &mut keys {
        key.truncate(32);
    }
    keys.sort();
    keys.dedup();

    let mut index = Patricia::new();
    for key in &keys {
        index.add(key).expect("sorted unique keys must be accepted");
    }
    index.build();

    assert_eq!(index.n_keys(), keys.len());

    // Membership and ordinal bijection
    let mut ordinals: Vec<usize> = keys
        .iter()
        .map(|key| index.lookup(key).expect("inserted key must be found"))
        .collect();
    ordinals.sort_unstable();
    for (i, &o) in ordinals.iter().enumerate() {
        assert_eq!(i, o);
    }

    // A derived probe: extend the last key, which can never be present
    if let Some(last) = keys.last() {
        let mut probe = last.clone();
        probe.push(0);
        assert_eq!(index.lookup(&probe), None);
    }
});
