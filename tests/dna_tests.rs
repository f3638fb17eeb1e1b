#![allow(missing_docs)]

use narjillos::simulation::dna::{CHROMOSOME_SIZE, Chromosome, Dna, DnaError};
use narjillos::simulation::params::Params;
use narjillos::simulation::rng::create_rng;

#[test]
fn test_encoding_round_trip() {
    let text = "{001_002_003_004_005_006_255_000_010_020_030_040}";
    let dna = Dna::parse(1, None, text).unwrap();

    assert_eq!(dna.to_string(), text);
    assert_eq!(Dna::parse(2, None, &dna.to_string()).unwrap(), dna);
}

#[test]
fn test_missing_genes_are_zero_padded() {
    let dna = Dna::parse(1, None, "{1_2_3}").unwrap();
    assert_eq!(dna.genes(), &[1, 2, 3, 0, 0, 0]);
    assert_eq!(dna.to_string(), "{001_002_003_000_000_000}");

    let dna = Dna::parse(1, None, "{1_2_3_4_5_6_7}").unwrap();
    assert_eq!(dna.genes().len(), 2 * CHROMOSOME_SIZE);
    assert_eq!(dna.chromosome_count(), 2);
}

#[test]
fn test_accepts_one_chromosome_per_line() {
    let dna = Dna::parse(1, None, "{001_002_003_004_005_006\n007_008_009_010_011_012}").unwrap();
    assert_eq!(dna.genes(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn test_rejects_out_of_range_genes() {
    assert_eq!(
        Dna::parse(1, None, "{1_-2_3}"),
        Err(DnaError::GeneOutOfRange(-2))
    );
    assert_eq!(
        Dna::parse(1, None, "{1_256_3}"),
        Err(DnaError::GeneOutOfRange(256))
    );
    assert_eq!(
        Dna::new(1, None, [0, 255, 300]),
        Err(DnaError::GeneOutOfRange(300))
    );
}

#[test]
fn test_rejects_malformed_text() {
    assert!(matches!(
        Dna::parse(1, None, "1_2_3"),
        Err(DnaError::MissingBraces(_))
    ));
    assert_eq!(
        Dna::parse(1, None, "{1_x_3}"),
        Err(DnaError::InvalidGene("x".to_string()))
    );
    assert_eq!(Dna::parse(1, None, "{}"), Err(DnaError::Empty));
}

#[test]
fn test_rejects_empty_genes() {
    assert_eq!(
        Dna::parse(1, None, "{1__2}"),
        Err(DnaError::InvalidGene(String::new()))
    );
    assert_eq!(
        Dna::parse(1, None, "{1_2_}"),
        Err(DnaError::InvalidGene(String::new()))
    );
    assert_eq!(
        Dna::parse(1, None, "{_1_2}"),
        Err(DnaError::InvalidGene(String::new()))
    );
}

#[test]
fn test_equality_ignores_ids() {
    let a = Dna::parse(1, None, "{1_2_3}").unwrap();
    let b = Dna::parse(7, Some(1), "{1_2_3}").unwrap();
    let c = Dna::parse(1, None, "{1_2_4}").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_chromosomes() {
    let dna = Dna::parse(1, None, "{1_2_3_4_5_6_7_8}").unwrap();
    let chromosomes: Vec<Chromosome> = dna.chromosomes().collect();

    assert_eq!(chromosomes.len(), 2);
    assert_eq!(chromosomes[0].genes(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(chromosomes[1].genes(), &[7, 8, 0, 0, 0, 0]);
    assert!(chromosomes[1].is_mirror());
    assert!(!Chromosome::new(&[2]).is_mirror());
}

#[test]
fn test_levenshtein_distance() {
    let a = Dna::parse(1, None, "{10_20_30_40_50_60}").unwrap();
    let b = Dna::parse(2, None, "{10_20_30_40_50_61}").unwrap();
    let c = Dna::parse(3, None, "{10_20_30_40_50_60_1_2_3_4_5_6}").unwrap();

    assert_eq!(a.levenshtein_distance(&a), 0);
    assert_eq!(a.levenshtein_distance(&b), 1);
    assert_eq!(b.levenshtein_distance(&a), 1);
    assert_eq!(a.levenshtein_distance(&c), 6);
    assert_eq!(c.levenshtein_distance(&a), 6);
}

#[test]
fn test_copy_without_errors_is_identical() {
    let params = Params {
        gene_mutation_rate: 0.0,
        structural_mutation_rate: 0.0,
        ..Params::default()
    };
    let mut rng = create_rng(42);
    let parent = Dna::random(1, &params, &mut rng);
    let child = parent.mutate(2, &params, &mut rng);

    assert_eq!(child, parent);
    assert_eq!(child.id(), 2);
    assert_eq!(child.parent_id(), Some(1));
}

#[test]
fn test_gene_mutations_stay_within_range() {
    let params = Params {
        gene_mutation_rate: 1.0,
        gene_mutation_range: 15,
        structural_mutation_rate: 0.0,
        ..Params::default()
    };
    let mut rng = create_rng(7);
    let parent = Dna::random(1, &params, &mut rng);

    for id in 2..50 {
        let child = parent.mutate(id, &params, &mut rng);
        assert_eq!(child.genes().len(), parent.genes().len());
        for (before, after) in parent.genes().iter().zip(child.genes()) {
            assert!((i32::from(*before) - i32::from(*after)).abs() <= 15);
        }
    }
}

#[test]
fn test_structural_mutations_add_or_drop_one_chromosome() {
    let params = Params {
        gene_mutation_rate: 0.0,
        structural_mutation_rate: 1.0,
        ..Params::default()
    };
    let mut rng = create_rng(3);
    let parent = Dna::random(1, &params, &mut rng);

    for id in 2..50 {
        let child = parent.mutate(id, &params, &mut rng);
        let difference = child.chromosome_count().abs_diff(parent.chromosome_count());
        assert_eq!(difference, 1);
        assert_eq!(child.genes().len() % CHROMOSOME_SIZE, 0);
    }
}

#[test]
fn test_random_founder_has_configured_size() {
    let params = Params::default();
    let dna = Dna::random(1, &params, &mut create_rng(1));

    assert_eq!(dna.chromosome_count(), params.founder_chromosomes);
    assert_eq!(dna.parent_id(), None);
}
