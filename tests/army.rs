mod common;

use ancientwars::GameConfig;
use common::*;

#[tokio::test]
async fn upgrade_deducts_cost_and_raises_stats() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Egypt", "nile_bounty", true).await;

    let upgraded = engine.upgrade_army(id, NOW).await.unwrap();

    assert!(upgraded);
    // Level 2 costs 400/200/100/300 against the 1000/500/500/1500 start.
    assert_eq!(stockpile(&pool, id).await, (600, 300, 400, 1200));
    // Nile bounty has no combat stat effect.
    assert_eq!(army_row(&pool, id).await, (2, 75, 75, 65));
}

#[tokio::test]
async fn upgrade_records_event() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Egypt", "nile_bounty", true).await;

    engine.upgrade_army(id, NOW).await.unwrap();

    let descriptions = event_descriptions(&pool, "army_upgrade").await;
    assert_eq!(descriptions, vec!["Army upgraded to Level 2".to_string()]);
}

#[tokio::test]
async fn upgrade_rejected_when_resources_fall_short() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Egypt", "nile_bounty", true).await;
    set_resources(&pool, id, 100, 500, 500, 1500).await;

    let upgraded = engine.upgrade_army(id, NOW).await.unwrap();

    assert!(!upgraded);
    assert_eq!(stockpile(&pool, id).await, (100, 500, 500, 1500));
    assert_eq!(army_row(&pool, id).await, (1, 50, 50, 50));
    assert!(event_descriptions(&pool, "army_upgrade").await.is_empty());
}

#[tokio::test]
async fn upgrade_rejected_at_max_level() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Egypt", "nile_bounty", true).await;
    set_army(&pool, id, 10, 275, 275, 185).await;
    set_resources(&pool, id, 1_000_000, 500_000, 500_000, 2_000_000).await;

    let upgraded = engine.upgrade_army(id, NOW).await.unwrap();

    assert!(!upgraded);
    assert_eq!(army_row(&pool, id).await, (10, 275, 275, 185));
}

#[tokio::test]
async fn upgrade_rejected_for_unknown_country() {
    let (engine, _pool) = engine_with(GameConfig::default()).await;

    assert!(!engine.upgrade_army(999, NOW).await.unwrap());
}

#[tokio::test]
async fn bonus_multipliers_shape_upgraded_stats() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let rome = insert_country(&pool, "Rome", "fortress_defense", true).await;
    let persia = insert_country(&pool, "Persia", "cavalry_speed", true).await;
    let macedonia = insert_country(&pool, "Macedonia", "companion_cavalry", true).await;

    assert!(engine.upgrade_army(rome, NOW).await.unwrap());
    assert!(engine.upgrade_army(persia, NOW).await.unwrap());
    assert!(engine.upgrade_army(macedonia, NOW).await.unwrap());

    // Base level 2 is 75/75/65 before bonuses, truncated after.
    assert_eq!(army_row(&pool, rome).await, (2, 75, 93, 65));
    assert_eq!(army_row(&pool, persia).await, (2, 75, 75, 78));
    assert_eq!(army_row(&pool, macedonia).await, (2, 93, 75, 74));
}
