#![no_main]
use libfuzzer_sys::fuzz_target;
use strie::BitVector;

fuzz_target!(|data: (Vec<u64>, usize)| {
    let (words, seed) = data;
    if words.is_empty() {
        return;
    }

    let len = seed % (words.len() * 64);
    if len == 0 {
        return;
    }

    let mut bv = BitVector::new();
    for i in 0..len {
        bv.add((words[i / 64] >> (i % 64)) & 1 != 0);
    }
    bv.build();

    // Check total rank
    let mut expected_total = 0;
    for i in 0..len {
        if (words[i / 64] >> (i % 64)) & 1 != 0 {
            expected_total += 1;
        }
    }
    assert_eq!(bv.ones(), expected_total);

    // Check rank/select inverse laws at a derived position
    if expected_total > 0 {
        let k = (seed / 13) % expected_total;
        let pos = bv.select(k);
        assert!(pos < len);
        assert!(bv.get(pos));
        assert_eq!(bv.rank(pos), k);
        assert_eq!(bv.next_one(pos), pos);
    }
});
