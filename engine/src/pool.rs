use rand::seq::SliceRandom;
use rand::Rng;
use shared::Catalog;

/// Expands a catalog into its draw pool: each prize id repeated `capacity`
/// times, then shuffled once. The multiset of ids is fixed by the catalog;
/// only the order is random.
pub fn build(catalog: &Catalog) -> Vec<usize> {
    build_with_rng(catalog, &mut rand::thread_rng())
}

/// Same as [`build`] but with a caller-supplied generator, so tests can
/// drive the shuffle with a seeded rng.
pub fn build_with_rng<R: Rng>(catalog: &Catalog, rng: &mut R) -> Vec<usize> {
    let mut pool = Vec::with_capacity(catalog.total_capacity());
    for entry in catalog.entries() {
        for _ in 0..entry.capacity {
            pool.push(entry.id);
        }
    }
    // Fisher-Yates, unbiased over all permutations of the multiset
    pool.shuffle(rng);
    pool
}
