#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use narjillos::simulation::gene_pool::{GenePool, GenePoolError};
use narjillos::simulation::params::Params;
use narjillos::simulation::rng::create_rng;

fn pool_of(genomes: &[&str]) -> GenePool {
    let mut pool = GenePool::new();
    for genome in genomes {
        pool.create_dna(genome).unwrap();
    }
    pool
}

#[test]
fn test_created_dna_is_tracked() {
    let mut pool = GenePool::new();
    let dna = pool.create_dna("{1_2_3}").unwrap();

    assert_eq!(dna.id(), 1);
    assert!(pool.is_current(1));
    assert_eq!(pool.current_size(), 1);
    assert_eq!(pool.history_size(), 1);
}

#[test]
fn test_removed_dna_stays_in_history() {
    let mut pool = pool_of(&["{1_2_3}"]);
    pool.remove(1);

    assert!(!pool.is_current(1));
    assert_eq!(pool.current_size(), 0);
    assert!(pool.dna(1).is_some());
    assert_eq!(pool.ancestry(1).unwrap().len(), 1);
}

#[test]
fn test_ancestry_is_oldest_first() {
    let params = Params::default();
    let mut rng = create_rng(11);
    let mut pool = GenePool::new();

    let founder = pool.create_random_dna(&params, &mut rng);
    let child = pool.mutate_dna(&founder, &params, &mut rng);
    let grandchild = pool.mutate_dna(&child, &params, &mut rng);
    pool.remove(founder.id());

    let ancestry: Vec<u64> = pool
        .ancestry(grandchild.id())
        .unwrap()
        .iter()
        .map(|dna| dna.id())
        .collect();
    assert_eq!(ancestry, vec![founder.id(), child.id(), grandchild.id()]);
    assert_eq!(pool.generation_of(grandchild.id()), Ok(2));
    assert_eq!(pool.children_of(founder.id()), &[child.id()]);
    assert!(pool.children_of(grandchild.id()).is_empty());
}

#[test]
fn test_ancestry_of_unknown_dna() {
    let pool = pool_of(&["{1_2_3}"]);
    assert_eq!(pool.ancestry(99), Err(GenePoolError::NotFound(99)));
}

#[test]
fn test_average_generation() {
    let params = Params::default();
    let mut rng = create_rng(5);
    let mut pool = GenePool::new();
    assert_eq!(pool.average_generation(), 0.0);

    let founder = pool.create_random_dna(&params, &mut rng);
    let child = pool.mutate_dna(&founder, &params, &mut rng);
    pool.mutate_dna(&child, &params, &mut rng);
    assert_eq!(pool.average_generation(), 1.0);

    pool.remove(founder.id());
    assert_eq!(pool.average_generation(), 1.5);
}

#[test]
fn test_most_typical_dna() {
    let pool = pool_of(&[
        "{10_20_30_40_50_60}",
        "{10_20_30_40_50_61}",
        "{10_20_30_41_51_61}",
        "{10_21_30_41_51_61}",
        "{99_20_30_40_50_60_70_80_90_100_110_120}",
    ]);

    let typical = pool.most_typical_dna().unwrap();
    assert_eq!(typical.id(), 2);
    assert_eq!(typical.to_string(), "{010_020_030_040_050_061}");
    assert_eq!(pool.most_successful_dna().unwrap().id(), 2);
}

#[test]
fn test_most_typical_dna_ties_go_to_lowest_id() {
    let pool = pool_of(&[
        "{111_111_111_222_111_000}",
        "{111_111_111_111_111_000}",
        "{111_111_111_222_222_000}",
        "{111_111_222_111_222_000}",
        "{111_222_222_222_222_000}",
    ]);

    assert_eq!(pool.most_typical_dna().unwrap().id(), 1);
}

#[test]
fn test_most_typical_dna_ignores_removed_dna() {
    let mut pool = pool_of(&[
        "{10_20_30_40_50_60}",
        "{10_20_30_40_50_61}",
        "{10_20_30_41_51_61}",
    ]);
    pool.remove(2);

    // 1 and 3 are two edits apart either way
    assert_eq!(pool.most_typical_dna().unwrap().id(), 1);
}

#[test]
fn test_most_typical_dna_of_empty_pool() {
    assert!(GenePool::new().most_typical_dna().is_none());
}
