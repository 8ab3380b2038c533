use combat_core::{CombatSession, CombatantId, DamageBreakdown, EffectKind, SourceId};

const PLAYER: CombatantId = CombatantId(0);
const CULTIST: CombatantId = CombatantId(1);
const CARD: SourceId = SourceId(100);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("combat_core=debug")
        .try_init();
}

#[test]
fn strength_weak_and_vulnerable_compose_in_order() {
    init_tracing();
    let mut session = CombatSession::standard();
    assert!(session.apply_effect(PLAYER, EffectKind::Strength, 5, 3, CARD));
    assert!(session.apply_effect(CULTIST, EffectKind::Weak, 1, 2, CARD));
    assert!(session.apply_effect(CULTIST, EffectKind::Vulnerable, 1, 2, CARD));

    // 10 + 5 = 15 -> floor(15 * 0.75) = 11 -> floor(11 * 1.5) = 16
    let breakdown = session.compute_damage(10, PLAYER, CULTIST);

    assert_eq!(breakdown.total_damage, 16);
    assert_eq!(breakdown.hp_damage, 16);
}

#[test]
fn block_is_consumed_before_armor() {
    init_tracing();
    let mut session = CombatSession::standard();
    session.add_block(CULTIST, 5);
    session.add_armor(CULTIST, 10);

    let breakdown = session.compute_damage(12, PLAYER, CULTIST);

    assert_eq!(
        breakdown,
        DamageBreakdown {
            hp_damage: 0,
            block_consumed: 5,
            armor_consumed: 7,
            total_damage: 12,
        }
    );
    assert_eq!(session.pools(CULTIST).block, 0);
    assert_eq!(session.pools(CULTIST).armor, 3);
}

#[test]
fn both_pools_can_be_exhausted_by_one_hit() {
    let mut session = CombatSession::standard();
    session.add_block(CULTIST, 5);
    session.add_armor(CULTIST, 10);

    let breakdown = session.compute_damage(15, PLAYER, CULTIST);

    assert_eq!(breakdown.block_consumed, 5);
    assert_eq!(breakdown.armor_consumed, 10);
    assert_eq!(breakdown.hp_damage, 0);
    assert_eq!(session.pools(CULTIST).total(), 0);

    let follow_up = session.compute_damage(4, PLAYER, CULTIST);
    assert_eq!(follow_up.hp_damage, 4);
}

#[test]
fn armor_survives_turn_end_but_block_does_not() {
    let mut session = CombatSession::standard();
    session.add_block(PLAYER, 7);
    session.add_armor(PLAYER, 3);

    assert_eq!(session.end_turn(PLAYER, 1), Ok(7));

    assert_eq!(session.pools(PLAYER).block, 0);
    assert_eq!(session.pools(PLAYER).armor, 3);
    assert!(session.end_turn(PLAYER, 1).is_err());
}

#[test]
fn opponent_turn_end_does_not_touch_block() {
    let mut session = CombatSession::standard();
    session.add_block(PLAYER, 6);

    session.end_turn(CULTIST, 1).unwrap();

    assert_eq!(session.pools(PLAYER).block, 6);
}

#[test]
fn dexterity_raises_block_gain() {
    let mut session = CombatSession::standard();
    session.apply_effect(PLAYER, EffectKind::Dexterity, 4, 99, CARD);

    assert_eq!(session.add_block(PLAYER, 8), 12);
    assert_eq!(session.pools(PLAYER).block, 12);
}

#[test]
fn preview_matches_resolution() {
    let mut session = CombatSession::standard();
    session.apply_effect(CULTIST, EffectKind::Vulnerable, 1, 2, CARD);
    session.add_block(CULTIST, 4);

    let preview = session.preview_damage(6, PLAYER, CULTIST);
    assert_eq!(session.pools(CULTIST).block, 4);
    assert_eq!(session.compute_damage(6, PLAYER, CULTIST), preview);
}
