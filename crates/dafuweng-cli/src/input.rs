//! Blocking console prompts.
//!
//! Every prompt degrades to a safe default: a non-numeric player count
//! falls back to a single default-named player, empty names take the
//! next default name, and an empty choice means "roll"/"yes". Only an
//! explicit `2` declines.

use dafuweng_core::{TurnAction, MAX_PLAYERS};
use std::io::{self, Write};

/// Fallback names, in seat order
pub const DEFAULT_NAMES: [&str; MAX_PLAYERS] = ["A-Tu", "Little-Mei", "King-Baby", "Mrs.Money"];

fn prompt(text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Ask how many players join.
///
/// Numeric input clamps to 1..=4. Non-numeric input returns `None`,
/// which the caller turns into a single default-named player without
/// asking for names.
pub fn player_count() -> io::Result<Option<usize>> {
    let line = prompt("How many players?(Maximum:4)...>")?;
    Ok(line
        .parse::<i64>()
        .ok()
        .map(|n| n.clamp(1, MAX_PLAYERS as i64) as usize))
}

/// Ask for each player's name; empty input takes the default
pub fn player_names(count: usize) -> io::Result<Vec<String>> {
    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let line = prompt(&format!(
            "Please input player {}'s name (Default: {})...>",
            i + 1,
            DEFAULT_NAMES[i]
        ))?;
        names.push(if line.is_empty() {
            DEFAULT_NAMES[i].to_string()
        } else {
            line
        });
    }
    Ok(names)
}

/// Start-of-turn choice; anything but `2` rolls the dice
pub fn turn_action(name: &str) -> io::Result<TurnAction> {
    let line = prompt(&format!(
        "{name}, your action? (1:Dice [default] / 2:Exit)...>"
    ))?;
    Ok(if line == "2" {
        TurnAction::Quit
    } else {
        TurnAction::RollDice
    })
}

/// Yes/no confirmation; only an explicit `2` declines
pub fn confirm(text: &str) -> io::Result<bool> {
    let line = prompt(text)?;
    Ok(line != "2")
}

/// Pause until the player presses Enter
pub fn wait_for_enter() -> io::Result<()> {
    prompt("\nPress Enter to continue...")?;
    Ok(())
}
