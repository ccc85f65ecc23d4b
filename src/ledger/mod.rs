use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::Context;
use chrono::NaiveDateTime;
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};

use crate::config::settings::RatingSettings;
use crate::database::{
    self, games, matches, participations, players, setup, DbConn, DbPool, Game, GameId,
    HistoryEntry, MatchId, MatchParticipation, ParticipantRow, Player, PlayerHistory,
    RatingDrift, RecentMatch,
};
use crate::errors::{LedgerError, LedgerResult};
use crate::rating::{EloCalculator, PlayerId, Position, Standing};

const DRIFT_TOLERANCE: f64 = 1e-9;

/// Where one player finished in a match being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub player_id: PlayerId,
    pub position: Position,
}

impl Placement {
    pub fn new(player_id: PlayerId, position: Position) -> Self {
        Self { player_id, position }
    }
}

/// Owner of every persisted game, player, match and rating history row.
///
/// Ratings only ever change inside [`MatchLedger::record_match`], which reads the
/// participants' ratings, computes the deltas and writes the match, the new
/// ratings and the history rows in one immediate transaction. Clones share the
/// same pool.
#[derive(Clone)]
pub struct MatchLedger {
    pool: DbPool,
    calculator: EloCalculator,
    settings: RatingSettings,
}

impl MatchLedger {
    /// Wraps an existing pool, creating the schema if it is missing.
    pub fn open(pool: DbPool, settings: RatingSettings) -> LedgerResult<Self> {
        let conn = database::get_connection(&pool)?;
        setup::ensure_schema(&conn)?;
        drop(conn);

        Ok(Self {
            pool,
            calculator: EloCalculator::new(&settings),
            settings,
        })
    }

    /// A ledger over a fresh private in-memory database.
    pub fn in_memory(settings: RatingSettings) -> LedgerResult<Self> {
        Self::open(database::create_memory_pool()?, settings)
    }

    pub fn settings(&self) -> &RatingSettings {
        &self.settings
    }

    pub fn register_game(&self, name: &str) -> LedgerResult<GameId> {
        let name = validate_name(name)?;
        let conn = self.connection()?;
        let game = games::insert_game(&conn, name)?;
        info!("Registered game #{} '{}'", game.id, game.name);
        Ok(game.id)
    }

    pub fn register_player(&self, name: &str) -> LedgerResult<PlayerId> {
        let name = validate_name(name)?;
        let conn = self.connection()?;
        let player = players::insert_player(&conn, name, self.settings.starting_rating)?;
        info!("Registered player #{} '{}'", player.id, player.name);
        Ok(player.id)
    }

    pub fn get_game(&self, game_id: GameId) -> LedgerResult<Game> {
        let conn = self.connection()?;
        games::find_by_id(&conn, game_id)?.ok_or(LedgerError::UnknownGame { game_id })
    }

    pub fn get_player(&self, player_id: PlayerId) -> LedgerResult<Player> {
        let conn = self.connection()?;
        players::find_by_id(&conn, player_id)?.ok_or(LedgerError::UnknownPlayer { player_id })
    }

    pub fn find_game_by_name(&self, name: &str) -> LedgerResult<Option<Game>> {
        let conn = self.connection()?;
        Ok(games::find_by_name(&conn, name)?)
    }

    pub fn find_player_by_name(&self, name: &str) -> LedgerResult<Option<Player>> {
        let conn = self.connection()?;
        Ok(players::find_by_name(&conn, name)?)
    }

    pub fn list_games(&self) -> LedgerResult<Vec<Game>> {
        let conn = self.connection()?;
        Ok(games::list_all(&conn)?)
    }

    /// All players, highest rating first.
    pub fn list_players(&self) -> LedgerResult<Vec<Player>> {
        let conn = self.connection()?;
        Ok(players::list_by_rating(&conn)?)
    }

    pub fn list_recent_matches(&self, limit: usize) -> LedgerResult<Vec<RecentMatch>> {
        let conn = self.connection()?;
        Ok(matches::list_recent(&conn, limit)?)
    }

    pub fn match_participants(&self, match_id: MatchId) -> LedgerResult<Vec<ParticipantRow>> {
        let conn = self.connection()?;
        if matches::find_by_id(&conn, match_id)?.is_none() {
            return Err(LedgerError::UnknownMatch { match_id });
        }
        Ok(participations::list_by_match(&conn, match_id)?)
    }

    /// Rating timeline of every player who has played at least one match,
    /// ordered by player id with entries in chronological match order.
    pub fn get_rating_history(&self) -> LedgerResult<Vec<PlayerHistory>> {
        let conn = self.connection()?;
        let names: HashMap<PlayerId, String> = players::list_by_rating(&conn)?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let mut timelines: BTreeMap<PlayerId, Vec<HistoryEntry>> = BTreeMap::new();
        for row in participations::list_timeline(&conn)? {
            timelines.entry(row.player_id).or_default().push(HistoryEntry {
                match_id: row.match_id,
                timestamp: row.timestamp,
                rating_delta: row.rating_delta,
                rating: row.rating_after,
            });
        }

        Ok(timelines
            .into_iter()
            .map(|(player_id, ratings)| PlayerHistory {
                player_id,
                name: names.get(&player_id).cloned().unwrap_or_default(),
                ratings,
            })
            .collect())
    }

    /// Records a finished match and applies its rating changes.
    ///
    /// # Errors
    /// Validation failures (`InsufficientParticipants`, `DuplicateParticipant`,
    /// `UnknownGame`, `UnknownPlayer`, `OutOfOrderMatch`) are reported before
    /// anything is written.
    /// A `Persistence` error means the transaction was rolled back in full.
    pub fn record_match(
        &self,
        game_id: GameId,
        timestamp: NaiveDateTime,
        placements: &[Placement],
    ) -> LedgerResult<MatchId> {
        self.try_record_match(game_id, timestamp, placements)
            .inspect_err(|e| warn!("Match for game {} rejected: {}", game_id, e))
    }

    fn try_record_match(
        &self,
        game_id: GameId,
        timestamp: NaiveDateTime,
        placements: &[Placement],
    ) -> LedgerResult<MatchId> {
        validate_placements(placements)?;

        let mut conn = self.connection()?;
        // IMMEDIATE takes the write lock up front, so no other match can change
        // these ratings between the snapshot and the commit.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin match transaction")?;

        ensure_game_exists(&tx, game_id)?;
        let standings = snapshot_standings(&tx, placements)?;
        ensure_chronological(&tx, timestamp, &standings)?;
        let deltas = self.calculator.compute_deltas(&standings)?;

        let recorded = matches::insert_match(&tx, game_id, timestamp)?;
        for standing in &standings {
            let rating_delta = deltas[&standing.player_id];
            let rating_after = players::apply_delta(&tx, standing.player_id, rating_delta)?;
            participations::insert_participation(
                &tx,
                &MatchParticipation {
                    match_id: recorded.id,
                    player_id: standing.player_id,
                    position: standing.position,
                    rating_delta,
                    rating_after,
                },
            )?;
        }

        tx.commit().context("Failed to commit match transaction")?;
        info!(
            "Recorded match #{} for game {} with {} participants",
            recorded.id,
            game_id,
            standings.len()
        );
        Ok(recorded.id)
    }

    /// Players whose stored rating no longer equals the starting rating plus
    /// the sum of their recorded deltas. Empty when the ledger is consistent.
    pub fn audit(&self) -> LedgerResult<Vec<RatingDrift>> {
        let conn = self.connection()?;
        let drifts: Vec<RatingDrift> = participations::delta_totals(&conn)?
            .into_iter()
            .map(|(player_id, stored_rating, delta_sum)| RatingDrift {
                player_id,
                stored_rating,
                replayed_rating: self.settings.starting_rating + delta_sum,
            })
            .filter(|d| (d.stored_rating - d.replayed_rating).abs() > DRIFT_TOLERANCE)
            .collect();

        for drift in &drifts {
            warn!(
                "Player {} rating {} disagrees with history ({})",
                drift.player_id, drift.stored_rating, drift.replayed_rating
            );
        }
        Ok(drifts)
    }

    fn connection(&self) -> LedgerResult<DbConn> {
        Ok(database::get_connection(&self.pool)?)
    }
}

fn validate_name(name: &str) -> LedgerResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    Ok(trimmed)
}

fn validate_placements(placements: &[Placement]) -> LedgerResult<()> {
    if placements.len() < 2 {
        return Err(LedgerError::InsufficientParticipants {
            count: placements.len(),
        });
    }

    let mut seen = HashSet::with_capacity(placements.len());
    for placement in placements {
        if !seen.insert(placement.player_id) {
            return Err(LedgerError::DuplicateParticipant {
                player_id: placement.player_id,
            });
        }
    }
    Ok(())
}

fn ensure_game_exists(conn: &Connection, game_id: GameId) -> LedgerResult<()> {
    match games::find_by_id(conn, game_id)? {
        Some(_) => Ok(()),
        None => Err(LedgerError::UnknownGame { game_id }),
    }
}

/// History is replayed in timestamp order, so a match may not predate any
/// participant's latest recorded match.
fn ensure_chronological(
    conn: &Connection,
    timestamp: NaiveDateTime,
    standings: &[Standing],
) -> LedgerResult<()> {
    for standing in standings {
        if let Some(latest) = participations::latest_timestamp_for(conn, standing.player_id)? {
            if latest > timestamp {
                return Err(LedgerError::OutOfOrderMatch {
                    player_id: standing.player_id,
                    latest,
                    timestamp,
                });
            }
        }
    }
    Ok(())
}

fn snapshot_standings(conn: &Connection, placements: &[Placement]) -> LedgerResult<Vec<Standing>> {
    placements
        .iter()
        .map(|placement| -> LedgerResult<Standing> {
            let player = players::find_by_id(conn, placement.player_id)?.ok_or(
                LedgerError::UnknownPlayer {
                    player_id: placement.player_id,
                },
            )?;
            Ok(Standing::new(player.id, player.rating, placement.position))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    use crate::config::settings::DatabaseSettings;

    const TOLERANCE: f64 = 1e-9;

    fn ledger() -> MatchLedger {
        MatchLedger::in_memory(RatingSettings::default()).unwrap()
    }

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    }

    fn row_counts(ledger: &MatchLedger) -> (i64, i64) {
        let conn = ledger.connection().unwrap();
        (
            matches::count_all(&conn).unwrap(),
            participations::count_all(&conn).unwrap(),
        )
    }

    fn rating_of(ledger: &MatchLedger, id: PlayerId) -> f64 {
        ledger.get_player(id).unwrap().rating
    }

    #[test]
    fn test_registered_player_starts_at_default_rating() {
        let ledger = ledger();
        let ann = ledger.register_player("Ann").unwrap();

        let players = ledger.list_players().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, ann);
        assert_eq!(players[0].name, "Ann");
        assert_eq!(players[0].rating, 1500.0);
    }

    #[test]
    fn test_duplicate_names_are_distinct_entities() {
        let ledger = ledger();
        let first = ledger.register_game("Chess").unwrap();
        let second = ledger.register_game("Chess").unwrap();
        assert_ne!(first, second);
        assert_eq!(ledger.list_games().unwrap().len(), 2);
        assert_eq!(ledger.find_game_by_name("Chess").unwrap().unwrap().id, first);
    }

    #[test]
    fn test_empty_name_rejected() {
        let ledger = ledger();
        assert!(matches!(ledger.register_player("   "), Err(LedgerError::EmptyName)));
        assert!(matches!(ledger.register_game(""), Err(LedgerError::EmptyName)));
        assert!(ledger.list_players().unwrap().is_empty());
    }

    #[test]
    fn test_three_player_chess_match() {
        let ledger = ledger();
        let chess = ledger.register_game("Chess").unwrap();
        let a = ledger.register_player("A").unwrap();
        let b = ledger.register_player("B").unwrap();
        let c = ledger.register_player("C").unwrap();

        let match_id = ledger
            .record_match(
                chess,
                t0(),
                &[Placement::new(a, 1), Placement::new(b, 2), Placement::new(c, 3)],
            )
            .unwrap();

        let delta_a = rating_of(&ledger, a) - 1500.0;
        let delta_b = rating_of(&ledger, b) - 1500.0;
        let delta_c = rating_of(&ledger, c) - 1500.0;
        assert!(delta_a > 0.0);
        assert!(delta_c < 0.0);
        assert!(delta_b.abs() < TOLERANCE);
        assert!((delta_a + delta_b + delta_c).abs() < TOLERANCE);

        let participants = ledger.match_participants(match_id).unwrap();
        let order: Vec<PlayerId> = participants.iter().map(|p| p.player_id).collect();
        assert_eq!(order, vec![a, b, c]);
        assert!((participants[0].rating_after - rating_of(&ledger, a)).abs() < TOLERANCE);

        let players = ledger.list_players().unwrap();
        assert_eq!(players.first().unwrap().id, a);
        assert_eq!(players.last().unwrap().id, c);
    }

    #[test]
    fn test_insufficient_participants_writes_nothing() {
        let ledger = ledger();
        let chess = ledger.register_game("Chess").unwrap();
        let a = ledger.register_player("A").unwrap();

        let result = ledger.record_match(chess, t0(), &[Placement::new(a, 1)]);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientParticipants { count: 1 })
        ));
        assert_eq!(row_counts(&ledger), (0, 0));
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let ledger = ledger();
        let chess = ledger.register_game("Chess").unwrap();
        let a = ledger.register_player("A").unwrap();

        let result = ledger.record_match(chess, t0(), &[Placement::new(a, 1), Placement::new(a, 2)]);
        assert!(matches!(
            result,
            Err(LedgerError::DuplicateParticipant { player_id }) if player_id == a
        ));
        assert_eq!(row_counts(&ledger), (0, 0));
    }

    #[test]
    fn test_unknown_references_rejected_before_writes() {
        let ledger = ledger();
        let chess = ledger.register_game("Chess").unwrap();
        let a = ledger.register_player("A").unwrap();
        let b = ledger.register_player("B").unwrap();

        let unknown_game = ledger.record_match(99, t0(), &[Placement::new(a, 1), Placement::new(b, 2)]);
        assert!(matches!(unknown_game, Err(LedgerError::UnknownGame { game_id: 99 })));

        let unknown_player =
            ledger.record_match(chess, t0(), &[Placement::new(a, 1), Placement::new(42, 2)]);
        assert!(matches!(
            unknown_player,
            Err(LedgerError::UnknownPlayer { player_id: 42 })
        ));

        assert_eq!(row_counts(&ledger), (0, 0));
        assert_eq!(rating_of(&ledger, a), 1500.0);
        assert_eq!(rating_of(&ledger, b), 1500.0);
    }

    #[test]
    fn test_storage_failure_mid_match_rolls_back_everything() {
        let ledger = ledger();
        let chess = ledger.register_game("Chess").unwrap();
        let a = ledger.register_player("A").unwrap();
        let b = ledger.register_player("B").unwrap();
        let c = ledger.register_player("C").unwrap();
        ledger
            .record_match(chess, t0(), &[Placement::new(a, 1), Placement::new(b, 2)])
            .unwrap();
        let before: Vec<f64> = [a, b, c].iter().map(|&id| rating_of(&ledger, id)).collect();

        {
            let conn = ledger.connection().unwrap();
            conn.execute_batch(&format!(
                "CREATE TRIGGER fail_last_history_row BEFORE INSERT ON match_participation
                 WHEN NEW.player_id = {c}
                 BEGIN SELECT RAISE(ABORT, 'simulated storage failure'); END;"
            ))
            .unwrap();
        }

        let result = ledger.record_match(
            chess,
            t0() + Duration::hours(1),
            &[Placement::new(a, 1), Placement::new(b, 2), Placement::new(c, 3)],
        );
        match result {
            Err(LedgerError::Persistence(e)) => {
                assert!(format!("{e:#}").contains("simulated storage failure"))
            }
            other => panic!("expected persistence failure, got {other:?}"),
        }

        assert_eq!(row_counts(&ledger), (1, 2));
        let after: Vec<f64> = [a, b, c].iter().map(|&id| rating_of(&ledger, id)).collect();
        assert_eq!(before, after);
        assert!(ledger.audit().unwrap().is_empty());
    }

    #[test]
    fn test_rating_equals_start_plus_sum_of_deltas() {
        let ledger = ledger();
        let game = ledger.register_game("Catan").unwrap();
        let ids: Vec<PlayerId> = ["A", "B", "C", "D"]
            .iter()
            .map(|name| ledger.register_player(name).unwrap())
            .collect();

        let rounds: [&[(usize, Position)]; 5] = [
            &[(0, 1), (1, 2), (2, 3), (3, 4)],
            &[(3, 1), (2, 1), (0, 3)],
            &[(1, 1), (0, 2)],
            &[(2, 1), (1, 2), (3, 2), (0, 4)],
            &[(0, 1), (3, 2)],
        ];
        for (idx, round) in rounds.iter().enumerate() {
            let placements: Vec<Placement> = round
                .iter()
                .map(|&(player, position)| Placement::new(ids[player], position))
                .collect();
            ledger
                .record_match(game, t0() + Duration::minutes(idx as i64), &placements)
                .unwrap();
        }

        assert!(ledger.audit().unwrap().is_empty());
        for history in ledger.get_rating_history().unwrap() {
            let sum: f64 = history.ratings.iter().map(|e| e.rating_delta).sum();
            let current = rating_of(&ledger, history.player_id);
            assert!((current - (1500.0 + sum)).abs() < TOLERANCE);
            assert_eq!(history.ratings.last().unwrap().rating, current);
        }
    }

    #[test]
    fn test_history_is_chronological_by_match_timestamp() {
        let ledger = ledger();
        let game = ledger.register_game("Go").unwrap();
        let a = ledger.register_player("A").unwrap();
        let b = ledger.register_player("B").unwrap();
        let c = ledger.register_player("C").unwrap();

        let first = ledger
            .record_match(game, t0(), &[Placement::new(a, 1), Placement::new(b, 2)])
            .unwrap();
        let back_dated = ledger
            .record_match(game, t0() - Duration::days(1), &[Placement::new(c, 1), Placement::new(b, 2)])
            .unwrap_err();
        assert!(matches!(back_dated, LedgerError::OutOfOrderMatch { player_id, .. } if player_id == b));
        let same_time = ledger
            .record_match(game, t0(), &[Placement::new(b, 1), Placement::new(a, 2)])
            .unwrap();

        let history = ledger.get_rating_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].player_id, a);
        assert_eq!(history[0].name, "A");
        let order: Vec<MatchId> = history[0].ratings.iter().map(|e| e.match_id).collect();
        assert_eq!(order, vec![first, same_time]);
    }

    #[test]
    fn test_back_dated_match_rejected_and_history_ends_on_current_rating() {
        let ledger = ledger();
        let game = ledger.register_game("Go").unwrap();
        let a = ledger.register_player("A").unwrap();
        let b = ledger.register_player("B").unwrap();

        ledger
            .record_match(game, t0() + Duration::days(2), &[Placement::new(a, 1), Placement::new(b, 2)])
            .unwrap();
        let result = ledger.record_match(game, t0(), &[Placement::new(b, 1), Placement::new(a, 2)]);
        match result {
            Err(LedgerError::OutOfOrderMatch { player_id, latest, timestamp }) => {
                assert_eq!(player_id, b);
                assert_eq!(latest, t0() + Duration::days(2));
                assert_eq!(timestamp, t0());
            }
            other => panic!("expected out-of-order rejection, got {other:?}"),
        }

        assert_eq!(row_counts(&ledger), (1, 2));
        for history in ledger.get_rating_history().unwrap() {
            let current = rating_of(&ledger, history.player_id);
            assert_eq!(history.ratings.last().unwrap().rating, current);
        }
    }

    #[test]
    fn test_recent_matches_newest_first_with_limit() {
        let ledger = ledger();
        let chess = ledger.register_game("Chess").unwrap();
        let go = ledger.register_game("Go").unwrap();
        let a = ledger.register_player("A").unwrap();
        let b = ledger.register_player("B").unwrap();
        let pair = [Placement::new(a, 1), Placement::new(b, 2)];

        ledger.record_match(chess, t0(), &pair).unwrap();
        let newest = ledger.record_match(go, t0() + Duration::hours(3), &pair).unwrap();
        let middle = ledger.record_match(chess, t0() + Duration::hours(1), &pair).unwrap();

        let recent = ledger.list_recent_matches(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].match_id, newest);
        assert_eq!(recent[0].game_name, "Go");
        assert_eq!(recent[1].match_id, middle);
    }

    #[test]
    fn test_unknown_lookups() {
        let ledger = ledger();
        assert!(matches!(ledger.get_player(5), Err(LedgerError::UnknownPlayer { player_id: 5 })));
        assert!(matches!(ledger.get_game(6), Err(LedgerError::UnknownGame { game_id: 6 })));
        assert!(matches!(
            ledger.match_participants(7),
            Err(LedgerError::UnknownMatch { match_id: 7 })
        ));
    }

    #[test]
    fn test_audit_detects_out_of_band_rating_change() {
        let ledger = ledger();
        let a = ledger.register_player("A").unwrap();
        {
            let conn = ledger.connection().unwrap();
            conn.execute("UPDATE player SET rating = 1600 WHERE id = ?1", [a])
                .unwrap();
        }

        let drifts = ledger.audit().unwrap();
        assert_eq!(drifts.len(), 1);
        assert_eq!(drifts[0].player_id, a);
        assert_eq!(drifts[0].replayed_rating, 1500.0);
    }

    struct TempDatabase {
        path: PathBuf,
    }

    impl TempDatabase {
        fn new(label: &str) -> Self {
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            let path = std::env::temp_dir()
                .join(format!("getrankd_{}_{}_{}.db", label, std::process::id(), nanos));
            Self { path }
        }
    }

    impl Drop for TempDatabase {
        fn drop(&mut self) {
            for suffix in ["", "-wal", "-shm"] {
                let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
            }
        }
    }

    #[test]
    fn test_concurrent_overlapping_matches_are_serialized() {
        let temp = TempDatabase::new("concurrency");
        let settings = DatabaseSettings {
            path: temp.path.display().to_string(),
            pool_size: 4,
            busy_timeout_ms: 10_000,
        };
        let pool = database::create_pool(&settings).unwrap();
        let ledger = Arc::new(MatchLedger::open(pool, RatingSettings::default()).unwrap());

        let game = ledger.register_game("Poker").unwrap();
        let ids: Vec<PlayerId> = (0..5)
            .map(|i| ledger.register_player(&format!("P{i}")).unwrap())
            .collect();

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let ledger = Arc::clone(&ledger);
                let ids = ids.clone();
                thread::spawn(move || {
                    for round in 0..10 {
                        // Player 0 sits at every table, so every match overlaps.
                        let placements = vec![
                            Placement::new(ids[0], ((worker + round) % 3) as Position),
                            Placement::new(ids[1 + worker], 1),
                            Placement::new(ids[1 + (worker + 1) % 4], 2),
                        ];
                        // Same instant for every match: equal timestamps never count as back-dated.
                        ledger.record_match(game, t0(), &placements).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(row_counts(&ledger), (40, 120));
        assert!(ledger.audit().unwrap().is_empty());

        let total: f64 = ledger.list_players().unwrap().iter().map(|p| p.rating - 1500.0).sum();
        assert!(total.abs() < 1e-6);
    }
}
