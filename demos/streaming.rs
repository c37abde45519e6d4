use hashcode31::{combine, hash, Hashcode31};

fn main() {
    let message = b"The quick brown fox jumps over the lazy dog";
    let expected = hash(message);

    // Feed the input in arbitrary pieces
    let mut h = Hashcode31::new();
    for part in message.chunks(5) {
        h.update(part);
    }
    println!("Incremental: {} (one-shot: {})", h.finalize(), expected);
    assert_eq!(h.finalize(), expected);

    // Hash two halves independently, then join them
    let (a, b) = message.split_at(16);
    let joined = combine(hash(a), hash(b), b.len() as u64);
    println!("Combined:    {}", joined);
    assert_eq!(joined, expected);
}
