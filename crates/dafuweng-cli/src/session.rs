//! The interactive game loop.
//!
//! The loop renders the state, forwards the current player's choices to
//! the engine as [`TurnAction`]s, and narrates the [`GameEvent`]s that
//! come back. Pending purchase/upgrade decisions surface as engine
//! phases and are answered with a confirmation prompt.

use dafuweng_core::{Board, GameEvent, GameRules, GameState, PlayerId, TurnAction, TurnPhase};
use tracing::info;

use crate::input;
use crate::render;

pub fn run(board: Board) -> anyhow::Result<()> {
    if board.is_empty() {
        println!("No board data loaded; cannot start a game.");
        return Ok(());
    }

    let names = match input::player_count()? {
        Some(count) => input::player_names(count)?,
        None => vec![input::DEFAULT_NAMES[0].to_string()],
    };

    let mut game = GameState::new(board, names, GameRules::default());
    info!(
        players = game.player_count(),
        units = game.board.len(),
        "game ready"
    );

    redraw(&game);

    while !game.is_finished() {
        let current = game.current_player;
        let action = input::turn_action(&player_name(&game, current))?;

        let events = match game.apply_action(current, action) {
            Ok(events) => events,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        if matches!(action, TurnAction::Quit) {
            break;
        }

        redraw(&game);
        narrate(&game, &events);

        let decision_events = match game.phase {
            TurnPhase::AwaitingPurchase { unit } => answer_purchase(&mut game, current, unit)?,
            TurnPhase::AwaitingUpgrade { unit } => answer_upgrade(&mut game, current, unit)?,
            _ => Vec::new(),
        };
        narrate(&game, &decision_events);

        if game.is_finished() {
            break;
        }
        input::wait_for_enter()?;
        redraw(&game);
    }

    announce_result(&game);
    Ok(())
}

fn answer_purchase(
    game: &mut GameState,
    player: PlayerId,
    unit: usize,
) -> anyhow::Result<Vec<GameEvent>> {
    let (name, price) = {
        let unit = game.board.get(unit).expect("pending unit exists");
        (unit.name.clone(), unit.price)
    };
    let yes = input::confirm(&format!(
        "{}, do you want to buy {} for ${}? (1: Yes [default] / 2: No) ...>",
        player_name(game, player),
        name,
        price
    ))?;
    let action = if yes {
        TurnAction::Buy
    } else {
        TurnAction::DeclineBuy
    };
    Ok(game.apply_action(player, action)?)
}

fn answer_upgrade(
    game: &mut GameState,
    player: PlayerId,
    unit: usize,
) -> anyhow::Result<Vec<GameEvent>> {
    let (name, level, price) = {
        let unit = game.board.get(unit).expect("pending unit exists");
        (
            unit.name.clone(),
            unit.level().unwrap_or(1),
            unit.upgrade_price().unwrap_or(0),
        )
    };
    println!(
        "You own {} (Lv.{}). Upgrade to Lv.{} costs ${}",
        name,
        level,
        level + 1,
        price
    );
    let yes = input::confirm("Do you want to upgrade? (1:Yes [default] / 2:No)...>")?;
    let action = if yes {
        TurnAction::Upgrade
    } else {
        TurnAction::DeclineUpgrade
    };
    Ok(game.apply_action(player, action)?)
}

fn redraw(game: &GameState) {
    render::clear_screen();
    render::board(game);
    render::standings(game);
}

fn narrate(game: &GameState, events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::DiceRolled { player, roll } => {
                println!("{} rolled a {}.", player_name(game, player), roll);
            }
            GameEvent::PassedStart { player, bonus } => {
                println!(
                    "{} passed GO and collects ${}!",
                    player_name(game, player),
                    bonus
                );
            }
            GameEvent::Moved { player, to, .. } => {
                println!(
                    "{} moved to {}.",
                    player_name(game, player),
                    unit_name(game, to)
                );
            }
            GameEvent::JailSkipped { player } => {
                println!("{} is in jail and misses a turn.", player_name(game, player));
            }
            GameEvent::UnitPurchased {
                player,
                unit,
                price,
            } => {
                println!(
                    "{} pays ${} to buy {}.",
                    player_name(game, player),
                    price,
                    unit_name(game, unit)
                );
            }
            GameEvent::UnitUpgraded {
                player,
                unit,
                level,
                ..
            } => {
                println!(
                    "{} upgraded {} to Lv.{}.",
                    player_name(game, player),
                    unit_name(game, unit),
                    level
                );
            }
            GameEvent::MaxLevelReached { unit, .. } => {
                println!("{} is already fully built.", unit_name(game, unit));
            }
            GameEvent::FinePaid {
                payer,
                owner,
                amount,
            } => {
                println!(
                    "{}, you must pay ${} to Player {} ({}).",
                    player_name(game, payer),
                    amount,
                    owner,
                    player_name(game, owner)
                );
            }
            GameEvent::Arrested { player, .. } => {
                println!(
                    "{} is visiting the Jail and will be frozen for one round.",
                    player_name(game, player)
                );
            }
            GameEvent::WentBankrupt { player, .. } => {
                println!("{} is bankrupt!", player_name(game, player));
            }
            GameEvent::TurnEnded { .. }
            | GameEvent::GameWon { .. }
            | GameEvent::GameQuit { .. } => {}
        }
    }
}

fn announce_result(game: &GameState) {
    match game.winner() {
        Some(winner) => {
            info!("game over");
            println!("\nGame Over! The winner is {}!", player_name(game, winner));
        }
        None => {
            let survivors: Vec<String> = game.players.solvent().map(|p| p.name.clone()).collect();
            println!("\nGame Over! Still standing: {}.", survivors.join(", "));
        }
    }
}

fn player_name(game: &GameState, id: PlayerId) -> String {
    game.get_player(id)
        .map(|p| p.name.clone())
        .unwrap_or_default()
}

fn unit_name(game: &GameState, position: usize) -> String {
    game.board
        .get(position)
        .map(|u| u.name.clone())
        .unwrap_or_default()
}
