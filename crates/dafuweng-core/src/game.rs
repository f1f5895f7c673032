//! Core game state machine.
//!
//! This module contains the main `GameState` struct and the per-turn
//! resolution logic: dice, movement, landing outcomes, purchase and
//! upgrade decisions, bankruptcy, and turn advancement.

use crate::actions::{GameEvent, TurnAction};
use crate::board::Board;
use crate::player::{Player, PlayerId, PlayerRoster, PlayerStatus};
use crate::unit::VisitOutcome;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cash every player starts with
pub const DEFAULT_STARTING_CASH: i64 = 30000;

/// Default bonus for crossing the start corner
pub const DEFAULT_PASS_START_BONUS: i64 = 2000;

/// Tunable game constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Opening balance for every player
    pub starting_cash: i64,
    /// Credited when a move wraps past position 0
    pub pass_start_bonus: i64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            pass_start_bonus: DEFAULT_PASS_START_BONUS,
        }
    }
}

/// Turn phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Start of the current player's turn: roll or quit
    AwaitingAction,

    /// The current player landed on a unit it can buy
    AwaitingPurchase { unit: usize },

    /// The current player landed on its own unit and can build
    AwaitingUpgrade { unit: usize },

    /// Game is over
    Finished { winner: Option<PlayerId> },
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Game is over")]
    GameOver,
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// All players, in seat order
    pub players: PlayerRoster,
    /// Whose turn it is
    pub current_player: PlayerId,
    /// Current turn phase
    pub phase: TurnPhase,
    /// Turn number (starts at 1)
    pub turn_number: u32,
    /// Last dice roll
    pub last_roll: Option<u8>,
    /// Tunable constants
    pub rules: GameRules,
    /// Seed the dice generator was created from (for replays)
    rng_seed: u64,
    #[serde(skip, default = "restored_rng")]
    rng: StdRng,
}

fn restored_rng() -> StdRng {
    StdRng::from_entropy()
}

impl GameState {
    /// Create a new game with a freshly seeded dice generator.
    ///
    /// All tokens start on position 0. A game that begins with one
    /// solvent player or an empty board is finished before any turn.
    pub fn new(board: Board, names: Vec<String>, rules: GameRules) -> Self {
        let seed = rand::thread_rng().gen();
        Self::with_seed(board, names, rules, seed)
    }

    /// Create a game with a fixed dice seed (deterministic replays)
    pub fn with_seed(board: Board, names: Vec<String>, rules: GameRules, seed: u64) -> Self {
        let players = PlayerRoster::new(names, rules.starting_cash);
        let mut board = board;
        for player in players.iter() {
            board.attach(player.id, 0);
        }

        let phase = if board.is_empty() || players.active_count() <= 1 {
            TurnPhase::Finished {
                winner: Self::sole_survivor(&players),
            }
        } else {
            TurnPhase::AwaitingAction
        };

        Self {
            board,
            players,
            current_player: 0,
            phase,
            turn_number: 1,
            last_roll: None,
            rules,
            rng_seed: seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn sole_survivor(players: &PlayerRoster) -> Option<PlayerId> {
        if players.active_count() == 1 {
            players.solvent().next().map(|p| p.id)
        } else {
            None
        }
    }

    /// Number of seats in the game
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Player by seat number
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, TurnPhase::Finished { .. })
    }

    /// The winner, once the game has finished with a sole survivor
    pub fn winner(&self) -> Option<PlayerId> {
        if let TurnPhase::Finished { winner } = self.phase {
            winner
        } else {
            None
        }
    }

    /// Get all currently valid actions for a player
    pub fn valid_actions(&self, player: PlayerId) -> Vec<TurnAction> {
        if player != self.current_player {
            return Vec::new();
        }
        match self.phase {
            TurnPhase::Finished { .. } => Vec::new(),
            TurnPhase::AwaitingAction => vec![TurnAction::RollDice, TurnAction::Quit],
            TurnPhase::AwaitingPurchase { .. } => vec![TurnAction::Buy, TurnAction::DeclineBuy],
            TurnPhase::AwaitingUpgrade { .. } => {
                vec![TurnAction::Upgrade, TurnAction::DeclineUpgrade]
            }
        }
    }

    /// Apply an action to the game state.
    ///
    /// The only mutation entry point besides [`GameState::resolve_roll`];
    /// returns the events the action produced, in order.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: TurnAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        match action {
            TurnAction::RollDice => {
                let roll = self.rng.gen_range(1..=6u8);
                self.resolve_roll(player, roll)
            }

            TurnAction::Quit => {
                if !matches!(self.phase, TurnPhase::AwaitingAction) {
                    return Err(GameError::InvalidPhase);
                }
                self.phase = TurnPhase::Finished { winner: None };
                Ok(vec![GameEvent::GameQuit { player }])
            }

            TurnAction::Buy => {
                let position = match self.phase {
                    TurnPhase::AwaitingPurchase { unit } => unit,
                    _ => return Err(GameError::InvalidPhase),
                };
                let price = self.board.get(position).unwrap().price;
                let buyer = self.players.get_mut(player).unwrap();
                buyer.pay(price);
                buyer.add_unit(position, &mut self.board);

                let mut events = vec![GameEvent::UnitPurchased {
                    player,
                    unit: position,
                    price,
                }];
                self.finish_turn(player, &mut events);
                Ok(events)
            }

            TurnAction::DeclineBuy => {
                if !matches!(self.phase, TurnPhase::AwaitingPurchase { .. }) {
                    return Err(GameError::InvalidPhase);
                }
                let mut events = Vec::new();
                self.finish_turn(player, &mut events);
                Ok(events)
            }

            TurnAction::Upgrade => {
                let position = match self.phase {
                    TurnPhase::AwaitingUpgrade { unit } => unit,
                    _ => return Err(GameError::InvalidPhase),
                };
                let (price, level) = {
                    let unit = self.board.get_mut(position).unwrap();
                    let price = unit.upgrade_price().unwrap();
                    let level = unit.upgrade().unwrap();
                    (price, level)
                };
                self.players.get_mut(player).unwrap().pay(price);

                let mut events = vec![GameEvent::UnitUpgraded {
                    player,
                    unit: position,
                    level,
                    price,
                }];
                self.finish_turn(player, &mut events);
                Ok(events)
            }

            TurnAction::DeclineUpgrade => {
                if !matches!(self.phase, TurnPhase::AwaitingUpgrade { .. }) {
                    return Err(GameError::InvalidPhase);
                }
                let mut events = Vec::new();
                self.finish_turn(player, &mut events);
                Ok(events)
            }
        }
    }

    /// Resolve a turn for a known dice value.
    ///
    /// This is the movement half of [`TurnAction::RollDice`], public so
    /// replays and tests can drive the engine deterministically. A
    /// jailed player sits the round out: the roll is discarded, the
    /// jail status clears, and the turn advances.
    pub fn resolve_roll(&mut self, player: PlayerId, roll: u8) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }
        if !matches!(self.phase, TurnPhase::AwaitingAction) {
            return Err(GameError::InvalidPhase);
        }

        let mut events = Vec::new();

        if self.players.get(player).unwrap().status == PlayerStatus::InJail {
            self.players.get_mut(player).unwrap().release_from_jail();
            events.push(GameEvent::JailSkipped { player });
            self.advance_turn(&mut events);
            return Ok(events);
        }

        self.last_roll = Some(roll);
        events.push(GameEvent::DiceRolled { player, roll });

        let origin = self.players.get(player).unwrap().position;
        let destination = self.board.destination(origin, roll);

        if destination.wrapped {
            let bonus = self.rules.pass_start_bonus;
            self.players.get_mut(player).unwrap().receive(bonus);
            events.push(GameEvent::PassedStart { player, bonus });
        }

        self.players
            .get_mut(player)
            .unwrap()
            .move_to(destination.position, &mut self.board);
        events.push(GameEvent::Moved {
            player,
            from: origin,
            to: destination.position,
        });

        match self.visit_outcome(player, destination.position) {
            VisitOutcome::Nothing => {}
            VisitOutcome::PurchaseAvailable { .. } => {
                self.phase = TurnPhase::AwaitingPurchase {
                    unit: destination.position,
                };
                return Ok(events);
            }
            VisitOutcome::UpgradeAvailable { .. } => {
                self.phase = TurnPhase::AwaitingUpgrade {
                    unit: destination.position,
                };
                return Ok(events);
            }
            VisitOutcome::AtMaxLevel => {
                events.push(GameEvent::MaxLevelReached {
                    player,
                    unit: destination.position,
                });
            }
            VisitOutcome::Fine { owner, amount } => {
                // uncapped debit: the owner is credited the nominal fine
                // even when the payer goes negative
                let collected = self.players.get_mut(player).unwrap().pay(amount);
                self.players.get_mut(owner).unwrap().receive(collected);
                events.push(GameEvent::FinePaid {
                    payer: player,
                    owner,
                    amount,
                });
            }
            VisitOutcome::Arrested => {
                self.players.get_mut(player).unwrap().set_to_jail();
                events.push(GameEvent::Arrested {
                    player,
                    unit: destination.position,
                });
            }
        }

        self.finish_turn(player, &mut events);
        Ok(events)
    }

    fn visit_outcome(&mut self, player: PlayerId, position: usize) -> VisitOutcome {
        let visitor_cash = self.players.get(player).unwrap().cash;
        let owner = self.board.get(position).and_then(|unit| unit.owner);
        let owner_collection_units = owner
            .and_then(|id| self.players.get(id))
            .map(|host| host.collection_units(&self.board))
            .unwrap_or(0);

        self.board.get(position).unwrap().on_visit(
            player,
            visitor_cash,
            owner_collection_units,
            &mut self.rng,
        )
    }

    /// Bankruptcy check, then turn advancement
    fn finish_turn(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        if self.players.get(player).unwrap().cash < 0 {
            let released = self.players.get(player).unwrap().unit_count();
            self.players
                .get_mut(player)
                .unwrap()
                .declare_bankruptcy(&mut self.board);
            events.push(GameEvent::WentBankrupt {
                player,
                released_units: released,
            });
        }
        self.advance_turn(events);
    }

    /// Move to the next solvent seat, or finish the game.
    ///
    /// Each skipped bankrupt seat consumes one index advance; turns stay
    /// strictly serialized in seat order.
    fn advance_turn(&mut self, events: &mut Vec<GameEvent>) {
        if self.players.active_count() <= 1 {
            let winner = Self::sole_survivor(&self.players);
            self.phase = TurnPhase::Finished { winner };
            if let Some(winner) = winner {
                events.push(GameEvent::GameWon { winner });
            }
            return;
        }

        let seats = self.players.len() as PlayerId;
        let previous = self.current_player;
        let mut next = (previous + 1) % seats;
        while self.players.get(next).unwrap().status == PlayerStatus::Bankrupt {
            next = (next + 1) % seats;
        }

        self.current_player = next;
        self.turn_number += 1;
        self.phase = TurnPhase::AwaitingAction;
        events.push(GameEvent::TurnEnded {
            player: previous,
            next_player: next,
        });
    }
}
