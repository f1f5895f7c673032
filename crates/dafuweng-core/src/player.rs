//! Player ledgers and the seat roster.
//!
//! A [`Player`] is an economic ledger plus a board position. Units are
//! owned by the [`Board`]; a player only keeps the positions of the
//! units it holds, and the board-side `owner` field mirrors that set.

use crate::board::Board;
use crate::unit::UnitKind;
use serde::{Deserialize, Serialize};

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// Most seats a game can hold
pub const MAX_PLAYERS: usize = 4;

/// Where a player stands in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Normal,
    /// Frozen for one round; the next turn skips movement entirely
    InJail,
    /// Out of the game for good; owns nothing
    Bankrupt,
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat number, assigned by the roster, never reused
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Cash balance; may go negative, which triggers bankruptcy
    pub cash: i64,
    /// Current board position
    pub position: usize,
    /// Normal, InJail, or Bankrupt
    pub status: PlayerStatus,
    /// Board positions of owned units (the board owns the units)
    pub owned_units: Vec<usize>,
}

impl Player {
    /// Create a player at the start corner with the configured cash
    pub fn new(id: PlayerId, name: String, starting_cash: i64) -> Self {
        Self {
            id,
            name,
            cash: starting_cash,
            position: 0,
            status: PlayerStatus::Normal,
            owned_units: Vec::new(),
        }
    }

    /// Debit the full amount, uncapped, and return what was collected.
    ///
    /// The balance is allowed to go negative; a negative balance is the
    /// bankruptcy trigger, not an error.
    pub fn pay(&mut self, amount: i64) -> i64 {
        self.cash -= amount;
        amount
    }

    /// Credit the amount unconditionally
    pub fn receive(&mut self, amount: i64) {
        self.cash += amount;
    }

    /// Move the token, detaching from the old slot before attaching to
    /// the new one so a player occupies exactly one slot at a time.
    pub fn move_to(&mut self, destination: usize, board: &mut Board) {
        board.detach(self.id, self.position);
        self.position = destination;
        board.attach(self.id, destination);
    }

    /// Record ownership on both sides
    pub fn add_unit(&mut self, position: usize, board: &mut Board) {
        if let Some(unit) = board.get_mut(position) {
            unit.owner = Some(self.id);
        }
        self.owned_units.push(position);
    }

    /// Reset every owned unit and clear the set.
    ///
    /// Called exactly once, at bankruptcy.
    pub fn release_all_units(&mut self, board: &mut Board) {
        for &position in &self.owned_units {
            if let Some(unit) = board.get_mut(position) {
                unit.reset();
            }
        }
        self.owned_units.clear();
    }

    /// Freeze for one round
    pub fn set_to_jail(&mut self) {
        self.status = PlayerStatus::InJail;
    }

    /// Thaw after the skipped round
    pub fn release_from_jail(&mut self) {
        self.status = PlayerStatus::Normal;
    }

    /// Leave the game: status becomes Bankrupt, the balance is zeroed,
    /// and every owned unit is released back to the board.
    pub fn declare_bankruptcy(&mut self, board: &mut Board) {
        self.status = PlayerStatus::Bankrupt;
        self.cash = 0;
        self.release_all_units(board);
    }

    /// Number of owned units
    pub fn unit_count(&self) -> usize {
        self.owned_units.len()
    }

    /// How many owned units are collection units.
    ///
    /// O(k) scan over the owned set; k is bounded by the board size.
    pub fn collection_units(&self, board: &Board) -> usize {
        self.owned_units
            .iter()
            .filter_map(|&position| board.get(position))
            .filter(|unit| matches!(unit.kind, UnitKind::CollectionSet { .. }))
            .count()
    }

    /// Still in the game (Normal or InJail)
    pub fn is_active(&self) -> bool {
        self.status != PlayerStatus::Bankrupt
    }
}

/// Fixed, ordered seat collection for the whole game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    /// Create the roster, assigning seat ids sequentially from 0
    pub fn new(names: Vec<String>, starting_cash: i64) -> Self {
        assert!(
            (1..=MAX_PLAYERS).contains(&names.len()),
            "must have 1-4 players"
        );
        let players = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name, starting_cash))
            .collect();
        Self { players }
    }

    /// Number of seats
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// A roster always holds at least one player
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player by seat number
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// Mutable player by seat number
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id as usize)
    }

    /// All players in seat order
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// How many players are still in the game
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// The players still in the game, in seat order
    pub fn solvent(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    fn small_board() -> Board {
        Board::new(vec![
            Unit::purchasable(0, "Start", 0),
            Unit::upgradable(1, "Taipei", 1000, 500, [100, 200, 300, 400, 500]),
            Unit::collection_set(2, "Tainan", 800, 50),
            Unit::collection_set(3, "Chiayi", 800, 50),
            Unit::jail(4, "Jail"),
        ])
    }

    #[test]
    fn test_pay_is_uncapped_and_returns_collected() {
        let mut player = Player::new(0, "Test".to_string(), 100);
        let collected = player.pay(150);
        assert_eq!(collected, 150);
        assert_eq!(player.cash, -50);
    }

    #[test]
    fn test_receive_credits_unconditionally() {
        let mut player = Player::new(0, "Test".to_string(), 0);
        player.receive(2000);
        assert_eq!(player.cash, 2000);
    }

    #[test]
    fn test_move_to_keeps_one_occupancy_slot() {
        let mut board = small_board();
        let mut player = Player::new(0, "Test".to_string(), 100);
        board.attach(player.id, 0);

        player.move_to(2, &mut board);
        assert!(board.get(0).unwrap().occupants.is_empty());
        assert_eq!(board.get(2).unwrap().occupants, vec![0]);
        assert_eq!(player.position, 2);

        player.move_to(4, &mut board);
        assert!(board.get(2).unwrap().occupants.is_empty());
        assert_eq!(board.get(4).unwrap().occupants, vec![0]);
    }

    #[test]
    fn test_add_unit_records_both_sides() {
        let mut board = small_board();
        let mut player = Player::new(1, "Test".to_string(), 5000);

        player.add_unit(1, &mut board);
        assert_eq!(board.get(1).unwrap().owner, Some(1));
        assert_eq!(player.owned_units, vec![1]);
    }

    #[test]
    fn test_collection_units_counts_only_collection_kind() {
        let mut board = small_board();
        let mut player = Player::new(0, "Test".to_string(), 5000);
        player.add_unit(1, &mut board);
        player.add_unit(2, &mut board);
        player.add_unit(3, &mut board);

        assert_eq!(player.unit_count(), 3);
        assert_eq!(player.collection_units(&board), 2);
    }

    #[test]
    fn test_release_all_units_resets_everything() {
        let mut board = small_board();
        let mut player = Player::new(0, "Test".to_string(), 5000);
        player.add_unit(1, &mut board);
        player.add_unit(2, &mut board);
        board.get_mut(1).unwrap().upgrade();

        player.release_all_units(&mut board);

        assert_eq!(player.unit_count(), 0);
        assert_eq!(board.get(1).unwrap().owner, None);
        assert_eq!(board.get(1).unwrap().level(), Some(1));
        assert_eq!(board.get(2).unwrap().owner, None);
    }

    #[test]
    fn test_bankruptcy_zeroes_cash_and_releases() {
        let mut board = small_board();
        let mut player = Player::new(0, "Test".to_string(), 100);
        player.add_unit(1, &mut board);
        player.pay(120);
        assert!(player.cash < 0);

        player.declare_bankruptcy(&mut board);

        assert_eq!(player.status, PlayerStatus::Bankrupt);
        assert_eq!(player.cash, 0);
        assert_eq!(player.unit_count(), 0);
        assert_eq!(board.get(1).unwrap().owner, None);
        assert!(!player.is_active());
    }

    #[test]
    fn test_jail_status_toggles() {
        let mut player = Player::new(0, "Test".to_string(), 100);
        player.set_to_jail();
        assert_eq!(player.status, PlayerStatus::InJail);
        assert!(player.is_active());
        player.release_from_jail();
        assert_eq!(player.status, PlayerStatus::Normal);
    }

    #[test]
    fn test_roster_assigns_sequential_ids() {
        let roster = PlayerRoster::new(vec!["A".into(), "B".into(), "C".into()], 30000);
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.active_count(), 3);
        for (i, player) in roster.iter().enumerate() {
            assert_eq!(player.id, i as PlayerId);
            assert_eq!(player.cash, 30000);
            assert_eq!(player.position, 0);
        }
    }

    #[test]
    #[should_panic(expected = "must have 1-4 players")]
    fn test_roster_rejects_too_many_players() {
        PlayerRoster::new(vec!["A".into(); 5], 30000);
    }
}
