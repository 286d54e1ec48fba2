//! Plain-text views of the score sheet and the archive.

use std::fmt::Write;

use scorecard_core::{display_name, ActiveGame, GameHistory, Medal, PlayerScore, TOTAL_ROUNDS};

fn rank_cell(player: &PlayerScore) -> String {
    match (player.rank(), Medal::for_rank(player.rank())) {
        (Some(rank), Some(medal)) => format!("{rank} ({medal})"),
        (Some(rank), None) => rank.to_string(),
        (None, _) => "-".to_string(),
    }
}

/// Score table ordered by rank, last round marked as double.
pub fn score_table(game: &ActiveGame, standings: &[(usize, &PlayerScore)]) -> String {
    let names: Vec<String> = standings
        .iter()
        .map(|(idx, p)| format!("#{} {}", idx + 1, display_name(p, *idx)))
        .collect();
    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = write!(out, "{:<name_width$}", "Name");
    for round in 1..=TOTAL_ROUNDS {
        let label = if round == TOTAL_ROUNDS {
            format!("R{round}(x2)")
        } else {
            format!("R{round}")
        };
        let _ = write!(out, " {label:>7}");
    }
    let _ = writeln!(out, " {:>7} {:>12}", "Total", "Rank");

    for ((_, player), name) in standings.iter().zip(&names) {
        let _ = write!(out, "{name:<name_width$}");
        for score in player.rounds() {
            let _ = write!(out, " {score:>7}");
        }
        let _ = writeln!(out, " {:>7} {:>12}", player.total(), rank_cell(player));
    }
    let _ = write!(out, "Round {} of {}", game.current_round(), TOTAL_ROUNDS);
    out
}

/// Every archived game, newest first, players in finishing order.
pub fn history_list(history: &GameHistory) -> String {
    if history.is_empty() {
        return "No past games recorded.".to_string();
    }

    let mut out = String::new();
    for record in history.records() {
        let _ = write!(out, "{} (id {})", record.date, record.id);
        match record.winner() {
            Some((idx, player)) => {
                let _ = writeln!(out, ", won by {}", display_name(player, idx));
            }
            None => {
                let _ = writeln!(out);
            }
        }
        for (idx, player) in record.standings() {
            let _ = writeln!(
                out,
                "  {:>12}  {:<20} {:>6}",
                rank_cell(player),
                display_name(player, idx),
                player.total()
            );
        }
    }
    out.trim_end().to_string()
}
