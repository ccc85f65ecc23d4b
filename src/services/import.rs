use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;

use crate::database::GameId;
use crate::ledger::{MatchLedger, Placement};
use crate::rating::{PlayerId, Position};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FIELDS_PER_PLAYER: usize = 3;
const LEADING_FIELDS: usize = 2;

/// One line of a match export, in finishing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMatch {
    pub timestamp: NaiveDateTime,
    pub game_name: String,
    pub player_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub games_created: usize,
    pub players_created: usize,
    pub matches_recorded: usize,
}

/// Replays a CSV match export into the ledger.
///
/// Each line reads `"timestamp","game",(rank,score,"player")*`, newest match
/// first. Finishing position is the order of the player triples; the rank and
/// score columns must be integers but do not affect positions. Games and
/// players are matched by name and registered on first sight. The whole file is
/// parsed before anything is recorded, so a malformed line imports nothing.
pub struct ImportService {
    ledger: MatchLedger,
    game_ids: HashMap<String, GameId>,
    player_ids: HashMap<String, PlayerId>,
    summary: ImportSummary,
}

impl ImportService {
    pub fn new(ledger: MatchLedger) -> Self {
        Self {
            ledger,
            game_ids: HashMap::new(),
            player_ids: HashMap::new(),
            summary: ImportSummary::default(),
        }
    }

    pub fn run<P: AsRef<Path>>(self, path: P) -> Result<ImportSummary> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open import file {}", path.display()))?;
        self.run_from_reader(file)
    }

    pub fn run_from_reader<R: Read>(mut self, reader: R) -> Result<ImportSummary> {
        info!("=== Starting Match Import ===");

        let matches = parse_matches(reader)?;
        info!("  → Parsed {} matches", matches.len());

        // Exports list the newest match first.
        for (idx, imported) in matches.iter().rev().enumerate() {
            self.persist_match(imported)
                .with_context(|| format!("Failed to import match {} of {}", idx + 1, matches.len()))?;

            if (idx + 1) % 100 == 0 || idx + 1 == matches.len() {
                info!("  Persisted match {}/{}", idx + 1, matches.len());
            }
        }

        info!("=== Import Complete ===");
        Ok(self.summary)
    }

    fn persist_match(&mut self, imported: &ImportedMatch) -> Result<()> {
        let game_id = self.resolve_game(&imported.game_name)?;

        let mut placements = Vec::with_capacity(imported.player_names.len());
        for (idx, name) in imported.player_names.iter().enumerate() {
            let player_id = self.resolve_player(name)?;
            placements.push(Placement::new(player_id, idx as Position + 1));
        }

        self.ledger.record_match(game_id, imported.timestamp, &placements)?;
        self.summary.matches_recorded += 1;
        Ok(())
    }

    fn resolve_game(&mut self, name: &str) -> Result<GameId> {
        if let Some(&id) = self.game_ids.get(name) {
            return Ok(id);
        }

        let id = match self.ledger.find_game_by_name(name)? {
            Some(game) => game.id,
            None => {
                self.summary.games_created += 1;
                self.ledger.register_game(name)?
            }
        };
        self.game_ids.insert(name.to_string(), id);
        Ok(id)
    }

    fn resolve_player(&mut self, name: &str) -> Result<PlayerId> {
        if let Some(&id) = self.player_ids.get(name) {
            return Ok(id);
        }

        let id = match self.ledger.find_player_by_name(name)? {
            Some(player) => player.id,
            None => {
                self.summary.players_created += 1;
                self.ledger.register_player(name)?
            }
        };
        self.player_ids.insert(name.to_string(), id);
        Ok(id)
    }
}

/// Reads match lines until the first one without a complete player triple.
pub fn parse_matches<R: Read>(reader: R) -> Result<Vec<ImportedMatch>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut matches = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read line {}", idx + 1))?;
        match parse_record(&record).with_context(|| format!("Invalid line {}", idx + 1))? {
            Some(imported) => matches.push(imported),
            None => break,
        }
    }
    Ok(matches)
}

fn parse_record(record: &csv::StringRecord) -> Result<Option<ImportedMatch>> {
    if record.len() < LEADING_FIELDS + FIELDS_PER_PLAYER {
        return Ok(None);
    }
    let player_count = (record.len() - LEADING_FIELDS) / FIELDS_PER_PLAYER;
    if player_count < 2 {
        bail!("A match needs at least 2 players, found {}", player_count);
    }

    let timestamp = parse_timestamp(&record[0])?;
    let game_name = record[1].to_string();
    if game_name.is_empty() {
        bail!("Missing game name");
    }

    let mut player_names = Vec::with_capacity(player_count);
    for i in 0..player_count {
        let offset = LEADING_FIELDS + i * FIELDS_PER_PLAYER;
        parse_integer(&record[offset], "rank")?;
        parse_integer(&record[offset + 1], "score")?;
        player_names.push(record[offset + 2].to_string());
    }

    Ok(Some(ImportedMatch {
        timestamp,
        game_name,
        player_names,
    }))
}

fn parse_integer(value: &str, column: &str) -> Result<i32> {
    value
        .parse::<i32>()
        .with_context(|| format!("Failed to parse {}: {}", column, value))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .with_context(|| format!("Failed to parse timestamp: {}", value))
}
