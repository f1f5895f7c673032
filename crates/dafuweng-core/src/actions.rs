//! Turn actions and the events they produce.
//!
//! The engine never prompts: landing on a buyable or upgradable unit
//! parks the game in a decision phase, and the front end answers with
//! the matching accept/decline action.

use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// All actions a player can submit to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Roll and move (the start-of-turn default)
    RollDice,
    /// End the whole game from the action prompt
    Quit,
    /// Accept the pending purchase offer
    Buy,
    /// Turn the pending purchase offer down
    DeclineBuy,
    /// Accept the pending upgrade offer
    Upgrade,
    /// Turn the pending upgrade offer down
    DeclineUpgrade,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Dice were rolled
    DiceRolled { player: PlayerId, roll: u8 },

    /// The move crossed the start corner
    PassedStart { player: PlayerId, bonus: i64 },

    /// A token moved
    Moved {
        player: PlayerId,
        from: usize,
        to: usize,
    },

    /// A jailed player sat the round out (no dice, no movement)
    JailSkipped { player: PlayerId },

    /// A unit was bought
    UnitPurchased {
        player: PlayerId,
        unit: usize,
        price: i64,
    },

    /// A unit was built up one level
    UnitUpgraded {
        player: PlayerId,
        unit: usize,
        level: u8,
        price: i64,
    },

    /// The visitor owns the unit and it is already fully built
    MaxLevelReached { player: PlayerId, unit: usize },

    /// A fine moved cash from a visitor to an owner
    FinePaid {
        payer: PlayerId,
        owner: PlayerId,
        amount: i64,
    },

    /// The visitor landed on the jail
    Arrested { player: PlayerId, unit: usize },

    /// Negative cash: the player left the game and released its units
    WentBankrupt {
        player: PlayerId,
        released_units: usize,
    },

    /// Turn passed to the next seat
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// Only one solvent player remains
    GameWon { winner: PlayerId },

    /// A player ended the game from the action prompt
    GameQuit { player: PlayerId },
}
