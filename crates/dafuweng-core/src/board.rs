//! The circular game board and its text loader.
//!
//! The board is an ordered sequence of [`Unit`]s created once at game
//! start and never resized. Positions are `0..len` and move arithmetic
//! wraps modulo the unit count; a wrap past position 0 is what grants
//! the start bonus.
//!
//! Board data is line-oriented, one unit per line, first token a
//! single-character type code:
//!
//! ```text
//! U <name> <price> <upgradePrice> <fine1> <fine2> <fine3> <fine4> <fine5>
//! C <name> <price> <perUnitFine>
//! R <name> <price> <finePerPoint>
//! J <name>
//! ```
//!
//! Malformed or unrecognized lines are skipped, never fatal.

use crate::player::PlayerId;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Result of a move computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Landing position
    pub position: usize,
    /// True when the move crossed position 0
    pub wrapped: bool,
}

/// The ordered, circular sequence of board units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    units: Vec<Unit>,
    skipped_records: usize,
}

impl Board {
    /// Build a board from an already-constructed unit list.
    ///
    /// Ids are reassigned to match the positions.
    pub fn new(mut units: Vec<Unit>) -> Self {
        for (position, unit) in units.iter_mut().enumerate() {
            unit.id = position;
        }
        Self {
            units,
            skipped_records: 0,
        }
    }

    /// Parse line-oriented board data.
    ///
    /// Ids are assigned sequentially from 0 in input order. Lines that
    /// fail to parse are counted in [`Board::skipped_records`] and
    /// otherwise ignored; blank lines are not counted.
    pub fn parse(input: &str) -> Self {
        let mut units = Vec::new();
        let mut skipped_records = 0;

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_record(units.len(), line) {
                Some(unit) => units.push(unit),
                None => skipped_records += 1,
            }
        }

        Self {
            units,
            skipped_records,
        }
    }

    /// Read and parse a board file.
    ///
    /// An I/O failure propagates so the caller can degrade to an empty
    /// board; parse problems inside the file never fail the load.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Number of units on the board
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the board has no units (degenerate; no game can run)
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// How many input lines the parser had to skip
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// The full unit sequence, in board order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Unit at a position
    pub fn get(&self, position: usize) -> Option<&Unit> {
        self.units.get(position)
    }

    /// Mutable unit at a position
    pub fn get_mut(&mut self, position: usize) -> Option<&mut Unit> {
        self.units.get_mut(position)
    }

    /// Where a move of `steps` from `origin` ends up.
    ///
    /// `position = (origin + steps) % len`, and the move wrapped exactly
    /// when the landing position is below the origin.
    ///
    /// # Panics
    ///
    /// Panics if the board is empty; callers never move on a board with
    /// no units.
    pub fn destination(&self, origin: usize, steps: u8) -> Destination {
        assert!(!self.units.is_empty(), "cannot move on an empty board");
        let position = (origin + steps as usize) % self.units.len();
        Destination {
            position,
            wrapped: position < origin,
        }
    }

    /// Put a token on a position's occupancy record
    pub fn attach(&mut self, player: PlayerId, position: usize) {
        if let Some(unit) = self.units.get_mut(position) {
            unit.add_occupant(player);
        }
    }

    /// Take a token off a position's occupancy record
    pub fn detach(&mut self, player: PlayerId, position: usize) {
        if let Some(unit) = self.units.get_mut(position) {
            unit.remove_occupant(player);
        }
    }
}

fn parse_record(id: usize, line: &str) -> Option<Unit> {
    let mut fields = line.split_whitespace();
    let code = fields.next()?;
    let name = fields.next()?;

    let mut num = move || fields.next()?.parse::<i64>().ok();

    match code {
        "U" => {
            let price = num()?;
            let upgrade_price = num()?;
            let mut fines = [0i64; 5];
            for fine in fines.iter_mut() {
                *fine = num()?;
            }
            Some(Unit::upgradable(id, name, price, upgrade_price, fines))
        }
        "C" => {
            let price = num()?;
            let unit_fine = num()?;
            Some(Unit::collection_set(id, name, price, unit_fine))
        }
        "R" => {
            let price = num()?;
            let fine_per_point = num()?;
            Some(Unit::random_fine(id, name, price, fine_per_point))
        }
        "J" => Some(Unit::jail(id, name)),
        _ => None,
    }
}
