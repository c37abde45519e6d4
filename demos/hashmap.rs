use hashcode31::{BuildHashcode31, Hashcode31};
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};

type WordCounts<'a> = HashMap<&'a str, usize, BuildHashcode31>;

fn main() {
    let text = "the cat sat on the mat and the dog sat on the log";

    let mut counts = WordCounts::default();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut words: Vec<_> = counts.iter().collect();
    words.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    for (word, n) in words {
        println!("  {:<4} x{}", word, n);
    }

    // `str` hashes its bytes plus a 0xff terminator through `write`
    let mut h = counts.hasher().build_hasher();
    "cat".hash(&mut h);
    let mut raw = Hashcode31::new();
    raw.update(b"cat\xff");
    assert_eq!(h.finish(), raw.finalize() as u32 as u64);
    println!("\nhash of \"cat\" as a map key: 0x{:08x}", h.finish());
}
