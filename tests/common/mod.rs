#![allow(dead_code)]

use ancientwars::db;
use ancientwars::{GameConfig, GameEngine};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fixed wall-clock origin for deterministic tests (Unix seconds).
pub const NOW: i64 = 1_700_000_000;
pub const HOUR: i64 = 3600;
pub const DAY: i64 = 24 * HOUR;

/// In-memory store with the schema applied. A single connection keeps every
/// caller on the same database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

/// Engine over an empty (unseeded) world with the given config. The returned
/// pool is a handle to the same database, for direct fixture access.
pub async fn engine_with(config: GameConfig) -> (GameEngine, SqlitePool) {
    let pool = memory_pool().await;
    (GameEngine::new(pool.clone(), config), pool)
}

/// Engine over the default 12-country roster.
pub async fn seeded_engine() -> (GameEngine, SqlitePool) {
    let (engine, pool) = engine_with(GameConfig::default()).await;
    engine.init_world(NOW).await.unwrap();
    (engine, pool)
}

/// Insert a country with a level-1 army and default starting resources.
/// Returns the country id.
pub async fn insert_country(pool: &SqlitePool, name: &str, bonus: &str, ai: bool) -> i64 {
    let country_id = sqlx::query(
        "INSERT INTO countries (name, is_ai_controlled, unique_bonus, bonus_description, created_at) \
         VALUES (?, ?, ?, 'test bonus', ?)",
    )
    .bind(name)
    .bind(ai)
    .bind(bonus)
    .bind(NOW)
    .execute(pool)
    .await
    .unwrap()
    .last_insert_rowid();

    sqlx::query(
        "INSERT INTO armies (country_id, level, attack_power, defense, speed, last_upgrade) \
         VALUES (?, 1, 50, 50, 50, ?)",
    )
    .bind(country_id)
    .bind(NOW)
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO resources (country_id, gold, iron, stone, food, last_collected) \
         VALUES (?, 1000, 500, 500, 1500, ?)",
    )
    .bind(country_id)
    .bind(NOW)
    .execute(pool)
    .await
    .unwrap();

    country_id
}

pub async fn set_resources(pool: &SqlitePool, country_id: i64, gold: i64, iron: i64, stone: i64, food: i64) {
    sqlx::query("UPDATE resources SET gold = ?, iron = ?, stone = ?, food = ? WHERE country_id = ?")
        .bind(gold)
        .bind(iron)
        .bind(stone)
        .bind(food)
        .bind(country_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn set_last_collected(pool: &SqlitePool, country_id: i64, timestamp: i64) {
    sqlx::query("UPDATE resources SET last_collected = ? WHERE country_id = ?")
        .bind(timestamp)
        .bind(country_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn set_army(pool: &SqlitePool, country_id: i64, level: i64, attack: i64, defense: i64, speed: i64) {
    sqlx::query(
        "UPDATE armies SET level = ?, attack_power = ?, defense = ?, speed = ? WHERE country_id = ?",
    )
    .bind(level)
    .bind(attack)
    .bind(defense)
    .bind(speed)
    .bind(country_id)
    .execute(pool)
    .await
    .unwrap();
}

/// (gold, iron, stone, food)
pub async fn stockpile(pool: &SqlitePool, country_id: i64) -> (i64, i64, i64, i64) {
    sqlx::query_as("SELECT gold, iron, stone, food FROM resources WHERE country_id = ?")
        .bind(country_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// (level, attack_power, defense, speed)
pub async fn army_row(pool: &SqlitePool, country_id: i64) -> (i64, i64, i64, i64) {
    sqlx::query_as("SELECT level, attack_power, defense, speed FROM armies WHERE country_id = ?")
        .bind(country_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn last_collected(pool: &SqlitePool, country_id: i64) -> i64 {
    sqlx::query_scalar("SELECT last_collected FROM resources WHERE country_id = ?")
        .bind(country_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Link a human player to a country, flipping it off AI control.
pub async fn assign_human(pool: &SqlitePool, telegram_id: i64, country_id: i64) {
    sqlx::query(
        "INSERT INTO players (telegram_id, is_owner, joined_at, last_active, country_id) \
         VALUES (?, 0, ?, ?, ?) \
         ON CONFLICT(telegram_id) DO UPDATE SET country_id = excluded.country_id",
    )
    .bind(telegram_id)
    .bind(NOW)
    .bind(NOW)
    .bind(country_id)
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("UPDATE countries SET is_ai_controlled = 0 WHERE id = ?")
        .bind(country_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn active_alliance_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM alliances WHERE end_date IS NULL")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn event_descriptions(pool: &SqlitePool, kind: &str) -> Vec<String> {
    sqlx::query_scalar("SELECT description FROM events WHERE event_type = ? ORDER BY id")
        .bind(kind)
        .fetch_all(pool)
        .await
        .unwrap()
}
