//! Property-based tests: every variant agrees with the scalar fold.

use hashcode31::*;
use proptest::prelude::*;

fn arb_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

proptest! {
    #[test]
    fn variants_match_scalar(data in arb_data()) {
        let expected = hash_scalar(&data);
        for v in Variant::ALL {
            prop_assert_eq!(v.hash(&data), expected, "{}", v.name());
        }
        prop_assert_eq!(hash(&data), expected);
    }

    #[test]
    fn matches_closed_form(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let l = data.len() as u64;
        let mut expected = pow31(l);
        for (i, &b) in data.iter().enumerate() {
            expected = expected.wrapping_add((b as i8 as i32).wrapping_mul(pow31(l - 1 - i as u64)));
        }
        prop_assert_eq!(hash_vec_quad(&data), expected);
        prop_assert_eq!(hash_vec_dual(&data), expected);
    }

    #[test]
    fn combine_any_split(data in arb_data(), split in any::<usize>()) {
        let split = split % (data.len() + 1);
        let (a, b) = data.split_at(split);
        prop_assert_eq!(combine(hash(a), hash(b), b.len() as u64), hash(&data));
    }

    #[test]
    fn incremental_any_chunking(data in arb_data(), chunk in 1usize..=97) {
        let mut h = Hashcode31::new();
        for part in data.chunks(chunk) {
            h.update(part);
        }
        prop_assert_eq!(h.finalize(), hash_scalar(&data));
    }
}
