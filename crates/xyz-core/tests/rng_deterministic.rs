use rand::seq::SliceRandom;
use rand::RngCore;
use xyz_core::rng::RngHandle;

#[test]
fn rng_emits_reproducible_sequence() {
    let mut rng_a = RngHandle::from_seed(1234);
    let mut rng_b = RngHandle::from_seed(1234);

    let seq_a: Vec<u64> = (0..100).map(|_| rng_a.next_u64()).collect();
    let seq_b: Vec<u64> = (0..100).map(|_| rng_b.next_u64()).collect();

    assert_eq!(seq_a, seq_b);
}

#[test]
fn optional_seed_matches_fixed_seed() {
    let mut items_a: Vec<u32> = (0..32).collect();
    let mut items_b = items_a.clone();
    items_a.shuffle(&mut RngHandle::from_optional_seed(Some(7)));
    items_b.shuffle(&mut RngHandle::from_seed(7));
    assert_eq!(items_a, items_b);
}
