//! Subcommands and their output

use anyhow::{anyhow, bail, Context};
use chip_solver_core::{CashoutInput, Player, Session, Settlement};
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a player to the table
    AddPlayer { name: String },

    /// Remove a player and all of their buy-ins
    RemovePlayer { player: String },

    /// Record a buy-in
    Buyin { player: String, amount: i64 },

    /// Undo a buy-in (defaults to the most recent one)
    Undo { event_id: Option<String> },

    /// List players with their total buy-in
    Players,

    /// Show every buy-in in order
    Log,

    /// Compute net results and transfers
    Settle {
        /// Final chip value, as PLAYER=VALUE (repeatable; missing players count as 0)
        #[arg(short, long = "cashout", value_parser = parse_cashout)]
        cashouts: Vec<(String, i64)>,
    },

    /// Clear all players and buy-ins
    Reset,
}

/// Execute a command; returns true when the session needs saving
pub fn run(session: &mut Session, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::AddPlayer { name } => {
            let player = session.add_player(&name)?;
            println!("Added {} ({})", player.name(), player.id());
            Ok(true)
        }
        Command::RemovePlayer { player } => {
            let id = resolve(session, &player)?.id().to_string();
            let removed = session.remove_player(&id)?;
            println!("Removed {}", removed.name());
            Ok(true)
        }
        Command::Buyin { player, amount } => {
            let id = resolve(session, &player)?.id().to_string();
            let event = session.record_buyin(&id, amount)?;
            println!("Buy-in {} recorded ({})", event.amount(), event.id());
            Ok(true)
        }
        Command::Undo { event_id } => {
            let event_id = match event_id {
                Some(id) => id,
                None => session
                    .last_event()
                    .map(|e| e.id().to_string())
                    .ok_or_else(|| anyhow!("nothing to undo"))?,
            };
            let event = session.remove_event(&event_id)?;
            println!(
                "Undid buy-in {} by {}",
                event.amount(),
                display_name(session, event.player_id())
            );
            Ok(true)
        }
        Command::Players => {
            print_players(session);
            Ok(false)
        }
        Command::Log => {
            print_log(session);
            Ok(false)
        }
        Command::Settle { cashouts } => {
            let inputs = cashouts
                .into_iter()
                .map(|(player, value)| {
                    let id = resolve(session, &player)?.id().to_string();
                    Ok(CashoutInput::new(id, value))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let settlement = session.settle(&inputs).context("cannot settle session")?;
            info!(
                transfers = settlement.transfers().len(),
                volume = settlement.total_volume(),
                "session settled"
            );
            print_settlement(session, &settlement);
            Ok(false)
        }
        Command::Reset => {
            session.clear();
            println!("Session cleared");
            Ok(true)
        }
    }
}

/// Parse `PLAYER=VALUE`
fn parse_cashout(raw: &str) -> Result<(String, i64), String> {
    let (player, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PLAYER=VALUE, got '{}'", raw))?;
    let player = player.trim();
    if player.is_empty() {
        return Err(format!("missing player in '{}'", raw));
    }
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value in '{}': {}", raw, e))?;
    Ok((player.to_string(), value))
}

fn resolve<'a>(session: &'a Session, id_or_name: &str) -> anyhow::Result<&'a Player> {
    match session.find_player(id_or_name) {
        Some(player) => Ok(player),
        None => bail!("unknown player '{}'", id_or_name),
    }
}

fn display_name<'a>(session: &'a Session, player_id: &'a str) -> &'a str {
    session
        .get_player(player_id)
        .map(|p| p.name())
        .unwrap_or(player_id)
}

fn print_players(session: &Session) {
    if session.num_players() == 0 {
        println!("No players yet");
        return;
    }
    for (player_id, total) in session.buyin_totals() {
        println!("{:<20} {:>10}", display_name(session, &player_id), total);
    }
    println!("{:<20} {:>10}", "Total", session.total_buyin());
}

fn print_log(session: &Session) {
    if session.events().is_empty() {
        println!("No buy-ins yet");
        return;
    }
    for event in session.events() {
        println!(
            "{}  {:<20} {:>10}  {}",
            event.created_at(),
            display_name(session, event.player_id()),
            event.amount(),
            event.id()
        );
    }
}

/// Winners get an explicit `+`; zero and losses print as-is
fn format_net(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", amount)
    } else {
        amount.to_string()
    }
}

fn print_settlement(session: &Session, settlement: &Settlement) {
    println!("Net results");
    for position in settlement.net() {
        println!(
            "  {:<20} {:>10}",
            display_name(session, &position.player_id),
            format_net(position.amount)
        );
    }

    println!("Transfers");
    if settlement.is_even() {
        println!("  Everyone is even, no transfers needed.");
        return;
    }
    for transfer in settlement.transfers() {
        println!(
            "  {} -> {}  {}",
            display_name(session, &transfer.payer_id),
            display_name(session, &transfer.payee_id),
            transfer.amount
        );
    }
}
