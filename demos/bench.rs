//! Benchmark driver: reads newline-delimited sorted keys from stdin, times
//! construction and lookups, and prints statistics.
//!
//! ```text
//! sort -u keys.txt | cargo run --release --example bench
//! ```

use std::io::{self, BufRead};
use std::time::Instant;

use rand::seq::SliceRandom;
use strie::Patricia;

fn main() -> io::Result<()> {
    let mut keys: Vec<Vec<u8>> = Vec::new();
    for line in io::stdin().lock().lines() {
        keys.push(line?.into_bytes());
    }
    if keys.is_empty() {
        eprintln!("no keys on stdin");
        return Ok(());
    }

    let begin = Instant::now();
    let mut index = Patricia::new();
    for key in &keys {
        index.add(key).expect("keys must be sorted and unique");
    }
    index.build();
    let elapsed = begin.elapsed().as_nanos() as f64;
    println!("build = {} ns/key", elapsed / keys.len() as f64);

    println!("#keys = {}", index.n_keys());
    println!("#nodes = {}", index.n_nodes());
    println!("size = {} bytes", index.size());

    let begin = Instant::now();
    let mut ids: Vec<usize> = Vec::with_capacity(keys.len());
    for key in &keys {
        ids.push(index.lookup(key).expect("added key must be found"));
    }
    let elapsed = begin.elapsed().as_nanos() as f64;
    println!("seq. lookup = {} ns/key", elapsed / keys.len() as f64);

    ids.sort_unstable();
    for (i, &id) in ids.iter().enumerate() {
        assert_eq!(i, id, "ordinals must form a permutation of 0..n_keys");
    }

    keys.shuffle(&mut rand::thread_rng());

    let begin = Instant::now();
    for key in &keys {
        assert!(index.lookup(key).is_some());
    }
    let elapsed = begin.elapsed().as_nanos() as f64;
    println!("rnd. lookup = {} ns/key", elapsed / keys.len() as f64);

    Ok(())
}
