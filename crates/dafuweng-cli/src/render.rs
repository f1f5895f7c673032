//! Console rendering: the folded board view and the standings panel.
//!
//! The board is drawn in two columns, folding the circular sequence in
//! half so the walk order reads down the left side and back up the
//! right. Each row shows the player tokens standing on the unit, its
//! id and name, the owner seat, and either the buy price or the
//! owned-state details.

use dafuweng_core::{GameState, PlayerStatus, Unit, UnitKind};

/// ANSI clear plus cursor home
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");
}

/// Draw the folded two-column board
pub fn board(game: &GameState) {
    let units = game.board.units();
    if units.is_empty() {
        return;
    }

    let half = (units.len() + 1) / 2;
    for i in 0..half {
        let right_id = units.len() - 1 - i;
        let mut line = row(game, &units[i]);
        if right_id != i {
            line.push_str(&row(game, &units[right_id]));
        }
        println!("{}", line.trim_end());
    }
}

fn row(game: &GameState, unit: &Unit) -> String {
    format!(
        "={}=  [{:>2}] {:>14} {:<4}{:<16}",
        tokens(game, unit.id),
        unit.id,
        unit.name,
        owner_tag(unit),
        details(unit),
    )
}

/// One track slot per seat; bankrupt players disappear from the board
fn tokens(game: &GameState, position: usize) -> String {
    let mut track = vec![b' '; game.player_count()];
    for player in game.players.iter() {
        if player.status != PlayerStatus::Bankrupt && player.position == position {
            track[player.id as usize] = b'0' + player.id;
        }
    }
    String::from_utf8(track).expect("seat digits are ascii")
}

fn owner_tag(unit: &Unit) -> String {
    match unit.owner {
        Some(owner) => format!("{{{owner}}}"),
        None => String::new(),
    }
}

fn details(unit: &Unit) -> String {
    match unit.owner {
        None if unit.is_ownable() => format!("B$ {}", unit.price),
        None => String::new(),
        Some(_) => match unit.kind {
            UnitKind::Upgradable {
                upgrade_price,
                level,
                ..
            } => format!("U$ {upgrade_price} L{level}"),
            _ => "Owned".to_string(),
        },
    }
}

/// Draw the standings panel under the board
pub fn standings(game: &GameState) {
    println!();
    for player in game.players.iter() {
        if player.status == PlayerStatus::Bankrupt {
            println!("   [{}] {:<12}is BANKRUPT", player.id, player.name);
            continue;
        }

        let marker = if player.id == game.current_player {
            "=>"
        } else {
            "  "
        };
        println!(
            "{marker}[{}] {:<12}${:<8}with {} units",
            player.id,
            player.name,
            player.cash,
            player.unit_count()
        );
    }
    println!();
}
