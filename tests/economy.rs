mod common;

use ancientwars::GameConfig;
use common::*;

#[tokio::test]
async fn ai_countries_accrue_with_production_bonus() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Elam", "iron_masters", true).await;
    set_resources(&pool, id, 0, 0, 0, 0).await;
    set_last_collected(&pool, id, NOW - 2 * HOUR).await;

    let updated = engine.collect_resources(NOW).await.unwrap();

    assert_eq!(updated, vec![id]);
    // 2h at 50/30/30/100 per hour, times the 1.2 AI multiplier, truncated.
    assert_eq!(stockpile(&pool, id).await, (120, 72, 72, 240));
    assert_eq!(last_collected(&pool, id).await, NOW);
}

#[tokio::test]
async fn human_countries_accrue_at_base_rate() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Elam", "iron_masters", true).await;
    assign_human(&pool, 42, id).await;
    set_resources(&pool, id, 0, 0, 0, 0).await;
    set_last_collected(&pool, id, NOW - 2 * HOUR).await;

    engine.collect_resources(NOW).await.unwrap();

    assert_eq!(stockpile(&pool, id).await, (100, 60, 60, 200));
}

#[tokio::test]
async fn skips_countries_collected_less_than_an_hour_ago() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Elam", "iron_masters", true).await;
    set_resources(&pool, id, 7, 7, 7, 7).await;
    set_last_collected(&pool, id, NOW - 30 * 60).await;

    let updated = engine.collect_resources(NOW).await.unwrap();

    assert!(updated.is_empty());
    assert_eq!(stockpile(&pool, id).await, (7, 7, 7, 7));
    assert_eq!(last_collected(&pool, id).await, NOW - 30 * 60);
}

#[tokio::test]
async fn accrual_clamps_to_resource_caps() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Elam", "iron_masters", true).await;
    assign_human(&pool, 42, id).await;
    set_resources(&pool, id, 999_950, 499_990, 10, 1_999_990).await;
    set_last_collected(&pool, id, NOW - 2 * HOUR).await;

    engine.collect_resources(NOW).await.unwrap();

    let (gold, iron, stone, food) = stockpile(&pool, id).await;
    assert_eq!(gold, 1_000_000);
    assert_eq!(iron, 500_000);
    assert_eq!(stone, 70);
    assert_eq!(food, 2_000_000);
}

#[tokio::test]
async fn second_pass_at_same_instant_is_a_no_op() {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    let id = insert_country(&pool, "Elam", "iron_masters", true).await;
    set_resources(&pool, id, 0, 0, 0, 0).await;
    set_last_collected(&pool, id, NOW - 3 * HOUR).await;

    engine.collect_resources(NOW).await.unwrap();
    let after_first = stockpile(&pool, id).await;
    let updated = engine.collect_resources(NOW).await.unwrap();

    assert!(updated.is_empty());
    assert_eq!(stockpile(&pool, id).await, after_first);
}

#[tokio::test]
async fn collects_every_eligible_country_in_one_pass() {
    let (engine, pool) = seeded_engine().await;
    sqlx::query("UPDATE resources SET last_collected = ?")
        .bind(NOW - HOUR)
        .execute(&pool)
        .await
        .unwrap();

    let updated = engine.collect_resources(NOW).await.unwrap();

    assert_eq!(updated.len(), 12);
}
