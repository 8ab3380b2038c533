use combat_core::{
    ApplyOutcome, ClassFilter, CombatSession, CombatantId, EffectCatalog, EffectClass,
    EffectDefinition, EffectKind, EffectPayload, SourceId, StatusError,
};

const PLAYER: CombatantId = CombatantId(0);
const JAW_WORM: CombatantId = CombatantId(2);

#[test]
fn stacking_sums_magnitude_and_keeps_latest_duration() {
    let mut session = CombatSession::standard();

    session
        .try_apply_effect(PLAYER, EffectKind::Strength, 2, 4, SourceId(1))
        .unwrap();
    let outcome = session
        .try_apply_effect(PLAYER, EffectKind::Strength, 3, 1, SourceId(2))
        .unwrap();

    assert_eq!(outcome, ApplyOutcome::Stacked { capped: false });
    assert_eq!(session.query(PLAYER, EffectKind::Strength), 5);
    let effects = session.effects(PLAYER);
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].remaining, 1);
}

#[test]
fn poison_ticks_down_and_pays_out_once() {
    let mut session = CombatSession::standard();
    session.apply_effect(JAW_WORM, EffectKind::Poison, 6, 3, SourceId(1));

    let mut payloads = Vec::new();
    for _ in 0..3 {
        let report = session.process_turn_start(JAW_WORM);
        payloads.extend(report.payloads());
    }

    assert_eq!(payloads, vec![EffectPayload::Damage(6)]);
    assert_eq!(session.query(JAW_WORM, EffectKind::Poison), 0);
    assert!(!session.ledger().has(JAW_WORM));

    let after = session.process_turn_start(JAW_WORM);
    assert!(after.is_empty());
}

#[test]
fn default_duration_comes_from_catalog() {
    let mut session = CombatSession::standard();
    session
        .apply_effect_default(JAW_WORM, EffectKind::Weak, 1, SourceId(9))
        .unwrap();

    assert_eq!(session.effects(JAW_WORM)[0].remaining, 2);
}

#[test]
fn custom_kinds_behave_like_builtins() {
    let bleed = EffectKind::Custom(1);
    let catalog = EffectCatalog::builder()
        .with_standard()
        .register(
            EffectDefinition::new(bleed, EffectClass::Dot)
                .stacking(20)
                .with_duration(2),
        )
        .unwrap()
        .build();
    let mut session = CombatSession::new(catalog, Default::default());

    session.apply_effect(JAW_WORM, bleed, 15, 2, SourceId(1));
    session.apply_effect(JAW_WORM, bleed, 15, 1, SourceId(1));
    assert_eq!(session.query(JAW_WORM, bleed), 20);

    let report = session.process_turn_start(JAW_WORM);
    assert_eq!(report.total_damage(), 20);
}

#[test]
fn cleanse_removes_only_debuffs() {
    let mut session = CombatSession::standard();
    session.apply_effect(PLAYER, EffectKind::Weak, 1, 2, SourceId(1));
    session.apply_effect(PLAYER, EffectKind::Dexterity, 2, 9, SourceId(1));

    let removed = session.clear_effects_by_class(PLAYER, ClassFilter::Negative);

    assert_eq!(removed, vec![EffectKind::Weak]);
    assert_eq!(session.query(PLAYER, EffectKind::Dexterity), 2);
}

#[test]
fn saved_records_restore_into_new_session() {
    let mut session = CombatSession::standard();
    session.apply_effect(PLAYER, EffectKind::Regen, 3, 2, SourceId(4));
    session.apply_effect(JAW_WORM, EffectKind::Vulnerable, 1, 1, SourceId(5));
    let records = session.effect_records();

    let mut loaded = CombatSession::standard();
    assert_eq!(loaded.restore_effects(records.clone()), Ok(2));
    assert_eq!(loaded.effect_records(), records);

    let mut broken = records;
    broken[0].remaining = 0;
    assert!(matches!(
        loaded.restore_effects(broken),
        Err(StatusError::InvalidDuration { .. })
    ));
    assert_eq!(loaded.query(PLAYER, EffectKind::Regen), 3);
}
