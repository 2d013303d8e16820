use reluctant_hero::GameError;
use reluctant_hero::entity::EntityKind;
use reluctant_hero::score::*;

#[test]
fn starts_at_zero() {
    let s = ScoreController::new();
    assert_eq!(s.high_score(), 0);
    assert_eq!(s.boredom_meter(), 0);
}

#[test]
fn skeleton_death_raises_both_meters() {
    let mut s = ScoreController::new();
    s.bad_entity_destroyed_update_score(EntityKind::Skeleton);
    assert_eq!(s.high_score(), SCORE_INCREASE_SKELETON_DEATH);
    assert_eq!(s.boredom_meter(), BOREDOM_INCREASE_SKELETON_DEATH);
}

#[test]
fn damsel_death_clamps_at_zero() {
    let mut s = ScoreController::new();
    s.set_high_score(3).unwrap();
    s.set_boredom_meter(4).unwrap();
    s.good_entity_destroyed_update_score(EntityKind::Damsel);
    assert_eq!(s.high_score(), 0);
    assert_eq!(s.boredom_meter(), 0);
}

#[test]
fn damsel_death_subtracts_when_there_is_room() {
    let mut s = ScoreController::new();
    s.set_high_score(20).unwrap();
    s.set_boredom_meter(20).unwrap();
    s.good_entity_destroyed_update_score(EntityKind::Damsel);
    assert_eq!(s.high_score(), 20 - SCORE_REDUCE_DAMSEL_DEATH);
    assert_eq!(s.boredom_meter(), 20 - BOREDOM_REDUCE_DAMSEL_DEATH);
}

#[test]
fn wrong_kind_for_the_update_is_ignored() {
    let mut s = ScoreController::new();
    s.bad_entity_destroyed_update_score(EntityKind::Damsel);
    s.good_entity_destroyed_update_score(EntityKind::Skeleton);
    assert_eq!(s, ScoreController::new());
}

#[test]
fn negative_values_are_rejected_and_leave_score_alone() {
    let mut s = ScoreController::new();
    s.set_high_score(5).unwrap();
    let err = s.set_high_score(-1).unwrap_err();
    assert!(matches!(err, GameError::NegativeScore { value: -1, .. }), "{err}");
    assert_eq!(s.high_score(), 5);

    assert!(s.set_boredom_meter(-10).is_err());
    assert_eq!(s.boredom_meter(), 0);
}

#[test]
fn entity_destroyed_routes_by_kind() {
    let mut s = ScoreController::new();
    s.entity_destroyed(EntityKind::Skeleton);
    s.entity_destroyed(EntityKind::Skeleton);
    s.entity_destroyed(EntityKind::Player);
    assert_eq!(s.high_score(), 2 * SCORE_INCREASE_SKELETON_DEATH);
    s.entity_destroyed(EntityKind::Damsel);
    assert_eq!(s.high_score(), 0);
}
