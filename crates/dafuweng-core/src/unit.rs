//! Board units and their landing behavior.
//!
//! This module contains:
//! - The `Unit` struct (one space on the board) and its `UnitKind` variants
//! - The visit-outcome computation used by the turn engine
//! - Ownership and occupancy bookkeeping shared by all variants

use crate::player::PlayerId;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Highest building level an upgradable unit can reach
pub const MAX_LEVEL: u8 = 5;

/// Per-variant data for a board unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    /// Plain lot: can be bought, never fines visitors
    Purchasable,
    /// Buildable lot: the fine grows with the building level
    Upgradable {
        /// Cost of raising the level by one
        upgrade_price: i64,
        /// Fine charged to visitors, indexed by `level - 1`
        fines: [i64; 5],
        /// Current building level, 1..=5
        level: u8,
    },
    /// Fine is a fresh 1-6 roll times a multiplier, recomputed every visit
    RandomFine { fine_per_point: i64 },
    /// Fine scales with how many collection units the owner holds in total
    CollectionSet { unit_fine: i64 },
    /// Landing here freezes the visitor for one round
    Jail,
}

/// What a landing on a unit resolves to.
///
/// Computed without touching any ledger; [`GameState`](crate::GameState)
/// applies the outcome and owns all side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitOutcome {
    /// Nothing to resolve
    Nothing,
    /// Unowned, priced, and the visitor can afford it
    PurchaseAvailable { price: i64 },
    /// Owned by the visitor with room and cash to build
    UpgradeAvailable { price: i64, next_level: u8 },
    /// Owned by the visitor and already fully built
    AtMaxLevel,
    /// Owned by someone else: cash moves from the visitor to the owner
    Fine { owner: PlayerId, amount: i64 },
    /// Jail freezes the visitor for one round
    Arrested,
}

/// One space on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Board position, assigned sequentially at load time
    pub id: usize,
    /// Display name
    pub name: String,
    /// Purchase price; 0 means the unit can never be owned
    pub price: i64,
    /// Current owner, if any
    pub owner: Option<PlayerId>,
    /// Players whose token currently sits on this unit
    pub occupants: Vec<PlayerId>,
    /// Variant data
    pub kind: UnitKind,
}

impl Unit {
    fn base(id: usize, name: impl Into<String>, price: i64, kind: UnitKind) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            owner: None,
            occupants: Vec::new(),
            kind,
        }
    }

    /// A plain lot with a fixed price and no fine
    pub fn purchasable(id: usize, name: impl Into<String>, price: i64) -> Self {
        Self::base(id, name, price, UnitKind::Purchasable)
    }

    /// An upgradable lot starting at level 1
    pub fn upgradable(
        id: usize,
        name: impl Into<String>,
        price: i64,
        upgrade_price: i64,
        fines: [i64; 5],
    ) -> Self {
        Self::base(
            id,
            name,
            price,
            UnitKind::Upgradable {
                upgrade_price,
                fines,
                level: 1,
            },
        )
    }

    /// A lot whose fine is rolled fresh on every visit
    pub fn random_fine(id: usize, name: impl Into<String>, price: i64, fine_per_point: i64) -> Self {
        Self::base(id, name, price, UnitKind::RandomFine { fine_per_point })
    }

    /// A collection lot whose fine scales with the owner's set
    pub fn collection_set(id: usize, name: impl Into<String>, price: i64, unit_fine: i64) -> Self {
        Self::base(id, name, price, UnitKind::CollectionSet { unit_fine })
    }

    /// The jail; priced at 0 so it can never be owned
    pub fn jail(id: usize, name: impl Into<String>) -> Self {
        Self::base(id, name, 0, UnitKind::Jail)
    }

    /// Stable one-character discriminant, matching the board-file codes
    pub fn type_code(&self) -> char {
        match self.kind {
            UnitKind::Purchasable => 'P',
            UnitKind::Upgradable { .. } => 'U',
            UnitKind::RandomFine { .. } => 'R',
            UnitKind::CollectionSet { .. } => 'C',
            UnitKind::Jail => 'J',
        }
    }

    /// Whether this unit can ever be owned
    pub fn is_ownable(&self) -> bool {
        self.price > 0
    }

    /// Current building level, for upgradable units
    pub fn level(&self) -> Option<u8> {
        match self.kind {
            UnitKind::Upgradable { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Cost of the next upgrade, for upgradable units
    pub fn upgrade_price(&self) -> Option<i64> {
        match self.kind {
            UnitKind::Upgradable { upgrade_price, .. } => Some(upgrade_price),
            _ => None,
        }
    }

    /// Raise the building level by one.
    ///
    /// Returns the new level, or `None` when the unit is not upgradable
    /// or is already fully built. A level-5 unit never changes.
    pub fn upgrade(&mut self) -> Option<u8> {
        match &mut self.kind {
            UnitKind::Upgradable { level, .. } if *level < MAX_LEVEL => {
                *level += 1;
                Some(*level)
            }
            _ => None,
        }
    }

    /// Clear ownership back to the creation state.
    ///
    /// Owner is dropped and upgradable units fall back to level 1.
    /// Idempotent; a no-op on the jail.
    pub fn reset(&mut self) {
        if matches!(self.kind, UnitKind::Jail) {
            return;
        }
        self.owner = None;
        if let UnitKind::Upgradable { level, .. } = &mut self.kind {
            *level = 1;
        }
    }

    /// Record a token standing on this unit
    pub fn add_occupant(&mut self, player: PlayerId) {
        self.occupants.push(player);
    }

    /// Remove a token from this unit
    pub fn remove_occupant(&mut self, player: PlayerId) {
        self.occupants.retain(|&p| p != player);
    }

    /// Resolve a landing on this unit.
    ///
    /// `owner_collection_units` is the owner's total count of collection
    /// units (only consulted by [`UnitKind::CollectionSet`]); the caller
    /// computes it because the unit holds no back-reference to players.
    pub fn on_visit<R: Rng>(
        &self,
        visitor: PlayerId,
        visitor_cash: i64,
        owner_collection_units: usize,
        rng: &mut R,
    ) -> VisitOutcome {
        if matches!(self.kind, UnitKind::Jail) {
            return VisitOutcome::Arrested;
        }

        match self.owner {
            None => {
                if self.is_ownable() && visitor_cash >= self.price {
                    VisitOutcome::PurchaseAvailable { price: self.price }
                } else {
                    VisitOutcome::Nothing
                }
            }
            Some(host) if host == visitor => match self.kind {
                UnitKind::Upgradable {
                    upgrade_price,
                    level,
                    ..
                } => {
                    if level >= MAX_LEVEL {
                        VisitOutcome::AtMaxLevel
                    } else if visitor_cash >= upgrade_price {
                        VisitOutcome::UpgradeAvailable {
                            price: upgrade_price,
                            next_level: level + 1,
                        }
                    } else {
                        VisitOutcome::Nothing
                    }
                }
                _ => VisitOutcome::Nothing,
            },
            Some(host) => {
                let amount = match self.kind {
                    UnitKind::Upgradable { fines, level, .. } => fines[(level - 1) as usize],
                    UnitKind::RandomFine { fine_per_point } => {
                        i64::from(rng.gen_range(1..=6u8)) * fine_per_point
                    }
                    UnitKind::CollectionSet { unit_fine } => {
                        owner_collection_units as i64 * unit_fine
                    }
                    UnitKind::Purchasable | UnitKind::Jail => return VisitOutcome::Nothing,
                };
                VisitOutcome::Fine {
                    owner: host,
                    amount,
                }
            }
        }
    }
}
