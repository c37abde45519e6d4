use hashcode31::{hash, hash_scalar, Variant};

fn main() {
    let data = b"Hello, world!";
    let h = hash(data);
    println!("Hash of {:?}: {} (0x{:08x})", data, h, h as u32);

    // Every strategy computes the same value
    for variant in Variant::ALL {
        println!("  {:<20} {}", variant.name(), variant.hash(data));
        assert_eq!(variant.hash(data), h);
    }

    // Bytes are signed: 0xff contributes -1
    assert_eq!(hash_scalar([0xffu8]), 31 - 1);
    assert_eq!(hash_scalar(b""), 1);
    println!("Empty input hashes to 1, [0xff] hashes to 30");
}
