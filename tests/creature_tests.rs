#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::sync::Arc;

use narjillos::simulation::creature::{Creature, Target};
use narjillos::simulation::dna::Dna;
use narjillos::simulation::egg::Egg;
use narjillos::simulation::energy::Energy;
use narjillos::simulation::gene_pool::GenePool;
use narjillos::simulation::geometric_utils::Vector;
use narjillos::simulation::locatable::Locatable;
use narjillos::simulation::params::Params;
use narjillos::simulation::rng::create_rng;

const GENOME: &str = "{050_020_000_100_127_050}";

fn create_test_params() -> Params {
    Params {
        creature_mature_age: 10,
        egg_interval_base: 5,
        egg_interval_step: 0,
        ..Params::default()
    }
}

fn create_creature(pool: &mut GenePool, energy: f64, params: &Params) -> Creature {
    let dna = pool.create_dna(GENOME).unwrap();
    let energy = Energy::new(energy, params.creature_max_energy, params.creature_lifespan);
    Creature::new(dna, Vector::cartesian(100.0, 100.0), 0.0, energy, params)
}

#[test]
fn test_energy_stays_within_bounds() {
    let mut energy = Energy::new(100.0, 200.0, 100.0);
    assert_eq!(energy.decay(), 2.0);

    energy.tick(0.0);
    assert_eq!(energy.value(), 98.0);
    assert_eq!(energy.max_for_age(), 198.0);

    energy.increase_by(1_000.0);
    assert_eq!(energy.value(), 198.0);

    energy.tick(1e9);
    assert!(energy.is_zero());
    assert_eq!(energy.value(), 0.0);

    energy.increase_by(10.0);
    assert!(energy.is_zero());
}

#[test]
fn test_energy_ceiling_decays_to_zero() {
    let mut energy = Energy::new(10.0, 10.0, 5.0);
    for _ in 0..5 {
        assert!(!energy.is_zero());
        energy.tick(0.0);
    }
    assert!(energy.is_zero());
}

#[test]
fn test_living_creature_moves_and_spends_energy() {
    let params = create_test_params();
    let mut pool = GenePool::new();
    let mut creature = create_creature(&mut pool, 50_000.0, &params);
    creature.set_target(Target::Location(Vector::cartesian(1_000.0, 100.0)));

    let mut travelled = 0.0;
    for _ in 0..100 {
        let movement = creature.tick(&params);
        travelled += movement.length();
    }

    assert_eq!(creature.age(), 100);
    assert!(travelled > 0.0);
    assert!(creature.energy().value() < 50_000.0);
    assert!(creature.energy().value() <= creature.energy().max_for_age());
}

#[test]
fn test_death_is_permanent() {
    let params = create_test_params();
    let mut pool = GenePool::new();
    let mut creature = create_creature(&mut pool, 50_000.0, &params);
    let position = creature.position();

    creature.kill();
    assert!(creature.is_dead());

    creature.feed(params.energy_per_food);
    assert!(creature.is_dead());

    let movement = creature.tick(&params);
    assert_eq!(movement.length(), 0.0);
    assert_eq!(movement.start, position);
    assert_eq!(creature.age(), 1);
    assert!(creature.is_dead());
}

#[test]
fn test_starving_creature_is_in_pain() {
    let params = create_test_params();
    let mut pool = GenePool::new();
    let mut creature = create_creature(&mut pool, 100.0, &params);

    creature.tick(&params);
    assert!(creature.is_in_pain());

    let mut healthy = create_creature(&mut pool, 100_000.0, &params);
    healthy.tick(&params);
    assert!(!healthy.is_in_pain());
}

#[test]
fn test_egg_laying_requires_maturity_and_energy() {
    let params = create_test_params();
    let mut rng = create_rng(17);
    let mut pool = GenePool::new();
    let mut creature = create_creature(&mut pool, 20_000.0, &params);
    assert_eq!(creature.next_egg_age(), 5);

    // too young: the opportunity is postponed
    for _ in 0..5 {
        creature.tick(&params);
    }
    assert!(creature.lay_egg(&mut pool, &params, &mut rng).is_none());
    assert_eq!(creature.next_egg_age(), 10);

    // mature, but cannot afford the egg
    for _ in 0..5 {
        creature.tick(&params);
    }
    let required = creature.body().energy_to_children()
        + (creature.body().egg_velocity() * params.egg_mass).powi(2);
    assert!(creature.energy().value() < required);
    assert!(creature.lay_egg(&mut pool, &params, &mut rng).is_none());
    assert_eq!(pool.history_size(), 1);

    creature.feed(params.energy_per_food);
    creature.tick(&params);
    assert!(creature.energy().value() >= required);

    let before = creature.energy().value();
    let egg = creature.lay_egg(&mut pool, &params, &mut rng).unwrap();
    let energy_to_child = creature.body().energy_to_children();

    assert!((before - creature.energy().value() - energy_to_child).abs() < 1e-6);
    assert_eq!(egg.energy(), energy_to_child);
    assert_eq!(egg.position(), creature.body().neck_location());
    assert_eq!(egg.dna().parent_id(), Some(creature.dna().id()));
    assert_eq!(pool.history_size(), 2);
    assert!(pool.is_current(egg.dna().id()));
    assert_eq!(creature.next_egg_age(), creature.age() + 5);

    // one egg per opportunity
    assert!(creature.lay_egg(&mut pool, &params, &mut rng).is_none());
}

fn create_egg(energy: f64, velocity: Vector, params: &Params) -> Egg {
    let dna = Arc::new(Dna::parse(1, None, GENOME).unwrap());
    Egg::new(
        dna,
        Vector::cartesian(10.0, 20.0),
        velocity,
        energy,
        params,
        &mut create_rng(1),
    )
}

#[test]
fn test_incubation_time_within_bounds() {
    let params = create_test_params();
    let mut rng = create_rng(2);
    for _ in 0..50 {
        let dna = Arc::new(Dna::parse(1, None, GENOME).unwrap());
        let egg = Egg::new(dna, Vector::ZERO, Vector::ZERO, 1.0, &params, &mut rng);
        assert!(egg.incubation_time() >= params.egg_min_incubation);
        assert!(egg.incubation_time() <= params.egg_max_incubation);
    }
}

#[test]
fn test_egg_drifts_and_slows_down() {
    let params = create_test_params();
    let mut egg = create_egg(100.0, Vector::cartesian(1.0, 0.0), &params);

    egg.tick();
    assert_eq!(egg.position(), Vector::cartesian(11.0, 20.0));
    assert_eq!(egg.velocity(), Vector::cartesian(params.egg_velocity_decay, 0.0));
}

#[test]
fn test_hatching() {
    let params = create_test_params();
    let mut rng = create_rng(4);
    let mut egg = create_egg(100.0, Vector::ZERO, &params);

    let mut hatched = egg.hatch(7, &params, &mut rng);
    while hatched.is_none() {
        assert!(egg.age() < egg.incubation_time());
        egg.tick();
        hatched = egg.hatch(7, &params, &mut rng);
    }
    let creature = hatched.unwrap();

    assert_eq!(creature.position(), Vector::cartesian(10.0, 20.0));
    assert_eq!(creature.dna().as_ref(), egg.dna().as_ref());
    assert_eq!(creature.energy().value(), 100.0);
    assert_eq!(egg.energy(), 0.0);
    assert_eq!(egg.hatchling(), Some(7));
    assert!(egg.hatch(8, &params, &mut rng).is_none());
}

#[test]
fn test_hatched_egg_fades_away() {
    let params = create_test_params();
    let mut rng = create_rng(4);
    let mut egg = create_egg(100.0, Vector::ZERO, &params);
    while egg.hatch(1, &params, &mut rng).is_none() {
        egg.tick();
    }

    for i in 0..100 {
        assert!(!egg.is_dead());
        assert_eq!(egg.fading(), f64::from(i) / 100.0);
        egg.tick();
    }
    assert!(egg.is_dead());
    assert_eq!(egg.fading(), 1.0);

    egg.tick();
    assert_eq!(egg.fading(), 1.0);
}
