#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::Arc;
use std::sync::mpsc;

use narjillos::simulation::creature::Creature;
use narjillos::simulation::dna::Dna;
use narjillos::simulation::egg::Egg;
use narjillos::simulation::energy::Energy;
use narjillos::simulation::events::{EcosystemEvent, EcosystemListener, Thing, ThingsCounter};
use narjillos::simulation::food::FoodPiece;
use narjillos::simulation::geometric_utils::{BoundingBox, Segment, Vector, normalize_angle};
use narjillos::simulation::locatable::{Locatable, ThingKind};
use narjillos::simulation::params::Params;
use narjillos::simulation::rng::create_rng;
use narjillos::simulation::spatial::FoodIndex;

fn create_dna() -> Arc<Dna> {
    Arc::new(Dna::parse(1, None, "{050_020_000_100_127_050}").unwrap())
}

#[test]
fn test_food_locatable() {
    let food = FoodPiece::new(Vector::cartesian(10.0, 20.0));
    assert_eq!(food.position(), Vector::cartesian(10.0, 20.0));
    assert_eq!(food.kind(), ThingKind::FoodPiece);

    let mut rng = create_rng(3);
    for _ in 0..100 {
        let food = FoodPiece::new_random(500.0, &mut rng);
        assert!((0.0..500.0).contains(&food.position().x));
        assert!((0.0..500.0).contains(&food.position().y));
    }
}

#[test]
fn test_egg_and_creature_locatable() {
    let params = Params::default();
    let egg = Egg::new(
        create_dna(),
        Vector::cartesian(3.0, 4.0),
        Vector::ZERO,
        10.0,
        &params,
        &mut create_rng(1),
    );
    assert_eq!(egg.position(), Vector::cartesian(3.0, 4.0));
    assert_eq!(egg.kind(), ThingKind::Egg);

    let energy = Energy::new(1_000.0, 2_000.0, 100.0);
    let creature = Creature::new(create_dna(), Vector::cartesian(7.0, 8.0), 0.0, energy, &params);
    assert_eq!(creature.position(), Vector::cartesian(7.0, 8.0));
    assert_eq!(creature.kind(), ThingKind::Narjillo);

    let thing = Thing::new(5, &creature);
    assert_eq!(thing.id, 5);
    assert_eq!(thing.kind, ThingKind::Narjillo);
    assert_eq!(thing.position, creature.position());
}

#[test]
fn test_things_counter() {
    let counter = ThingsCounter::new();
    let mut listener = counter.clone();
    let food = Thing::new(1, &FoodPiece::new(Vector::ZERO));
    let other_food = Thing::new(2, &FoodPiece::new(Vector::ZERO));

    listener.thing_added(&food);
    listener.thing_added(&other_food);
    listener.thing_removed(&food);

    assert_eq!(counter.count(ThingKind::FoodPiece), 1);
    assert_eq!(counter.count(ThingKind::Narjillo), 0);

    listener.thing_removed(&food);
    listener.thing_removed(&food);
    assert_eq!(counter.count(ThingKind::FoodPiece), 0);
}

#[test]
fn test_sender_listener() {
    let (mut sender, receiver) = mpsc::channel();
    let food = Thing::new(1, &FoodPiece::new(Vector::cartesian(1.0, 1.0)));

    sender.thing_added(&food);
    sender.thing_removed(&food);

    assert_eq!(receiver.recv().unwrap(), EcosystemEvent::Added(food));
    assert_eq!(receiver.recv().unwrap(), EcosystemEvent::Removed(food));

    drop(receiver);
    sender.thing_added(&food);
}

#[test]
fn test_food_index_candidates() {
    let index = FoodIndex::build([
        (3, Vector::cartesian(50.0, 5.0)),
        (1, Vector::cartesian(0.0, 0.0)),
        (2, Vector::cartesian(100.0, 0.0)),
        (4, Vector::cartesian(50.0, 500.0)),
    ])
    .unwrap();
    assert_eq!(index.len(), 4);

    let movement = Segment::between(Vector::cartesian(0.0, 0.0), Vector::cartesian(100.0, 0.0));
    assert_eq!(index.candidates_near(&movement, 10.0), vec![1, 2, 3]);

    let standing = Segment::new(Vector::cartesian(50.0, 490.0), Vector::ZERO);
    assert_eq!(index.candidates_near(&standing, 15.0), vec![4]);
    assert!(index.candidates_near(&standing, 5.0).is_empty());
}

#[test]
fn test_food_index_nearest() {
    let mut index = FoodIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.nearest(Vector::ZERO), None);

    index.insert(1, Vector::cartesian(10.0, 0.0)).unwrap();
    index.insert(2, Vector::cartesian(-3.0, 0.0)).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.nearest(Vector::ZERO), Some(2));
    assert!(index.insert(3, Vector::cartesian(f64::NAN, 0.0)).is_err());
}

#[test]
fn test_food_index_with_pieces_at_the_same_spot() {
    let spot = Vector::cartesian(500.0, 500.0);
    let index = FoodIndex::build([(1, spot), (2, spot), (3, Vector::cartesian(900.0, 900.0))]).unwrap();
    assert_eq!(index.len(), 3);

    let nearest = index.nearest(Vector::cartesian(490.0, 500.0)).unwrap();
    assert!(nearest == 1 || nearest == 2);
    let standing = Segment::new(spot, Vector::ZERO);
    assert_eq!(index.candidates_near(&standing, 1.0), vec![1, 2]);

    let rebuilt = FoodIndex::build([(2, spot), (3, Vector::cartesian(900.0, 900.0))]).unwrap();
    assert_eq!(rebuilt.len(), 2);
    assert_eq!(rebuilt.nearest(spot), Some(2));
}

#[test]
fn test_segment_distance() {
    let segment = Segment::between(Vector::cartesian(0.0, 0.0), Vector::cartesian(10.0, 0.0));
    assert_eq!(segment.length(), 10.0);
    assert_eq!(segment.midpoint(), Vector::cartesian(5.0, 0.0));
    assert_eq!(segment.distance_to_point(Vector::cartesian(5.0, 3.0)), 3.0);
    assert_eq!(segment.distance_to_point(Vector::cartesian(13.0, 4.0)), 5.0);
    assert_eq!(segment.distance_to_point(Vector::cartesian(-3.0, -4.0)), 5.0);

    let point = Segment::new(Vector::cartesian(1.0, 1.0), Vector::ZERO);
    assert_eq!(point.distance_to_point(Vector::cartesian(4.0, 5.0)), 5.0);
}

#[test]
fn test_bounding_box() {
    assert!(BoundingBox::around(Vec::<Vector>::new()).is_none());

    let mut bounds = BoundingBox::around([
        Vector::cartesian(1.0, 5.0),
        Vector::cartesian(-2.0, 3.0),
        Vector::cartesian(4.0, -1.0),
    ])
    .unwrap();
    assert_eq!(
        bounds,
        BoundingBox {
            left: -2.0,
            bottom: -1.0,
            right: 4.0,
            top: 5.0,
        }
    );
    assert!(bounds.contains(Vector::cartesian(4.0, 5.0)));
    assert!(!bounds.contains(Vector::cartesian(4.1, 0.0)));

    bounds.translate(Vector::cartesian(10.0, 0.0));
    assert!(bounds.contains(Vector::cartesian(14.0, 0.0)));
}

#[test]
fn test_vectors_and_angles() {
    let vector = Vector::polar(FRAC_PI_2, 2.0);
    assert!(vector.x.abs() < 1e-12);
    assert!((vector.y - 2.0).abs() < 1e-12);
    assert_eq!(Vector::ZERO.normalize(5.0), Vector::ZERO);
    assert_eq!(Vector::cartesian(3.0, 4.0).normalize(10.0), Vector::cartesian(6.0, 8.0));

    let turn = Vector::cartesian(1.0, 0.0).angle_to(Vector::cartesian(0.0, 1.0));
    assert!((turn - FRAC_PI_2).abs() < 1e-12);
    assert_eq!(Vector::ZERO.angle_to(Vector::cartesian(1.0, 0.0)), 0.0);

    assert_eq!(normalize_angle(-PI), PI);
    assert!((normalize_angle(FRAC_PI_2 + 4.0 * PI) - FRAC_PI_2).abs() < 1e-12);
    assert!((normalize_angle(-FRAC_PI_2 - 2.0 * PI) + FRAC_PI_2).abs() < 1e-12);
}
