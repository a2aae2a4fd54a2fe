//! Replay of a saved session.
//!
//! Works from markers, moves and snapshots only; no participant or
//! strategy needs to exist to replay a log.

use std::fmt::Write;

use crate::rules::GameRules;

use super::log::SessionSummary;

/// Human-readable replay of every match in `summary`.
///
/// `rules` only renders snapshots; its state is never consulted.
pub fn render_replay<G: GameRules>(rules: &G, summary: &SessionSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Replay of {} ({} matches)", summary.game, summary.total_matches);
    for p in &summary.participants {
        let _ = writeln!(out, "  {} '{}' ({}, {})", p.name, p.marker, p.kind, p.strategy);
    }
    let _ = writeln!(out, "Initial state:");
    let _ = writeln!(out, "{}", rules.display_snapshot(&summary.initial_snapshot));

    for record in &summary.matches {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "=== Match #{} ({} starts) ===",
            record.match_number + 1,
            record.starting_marker
        );
        for event in &record.events {
            let timing = event
                .duration_ms
                .map(|ms| format!(" in {ms} ms"))
                .unwrap_or_default();
            let _ = writeln!(out, "{} plays {}{timing}", event.marker, event.action);
            let _ = writeln!(out, "{}", rules.display_snapshot(&event.snapshot));
        }
        match record.winner {
            Some(winner) => {
                let _ = writeln!(out, "Winner: {winner}");
            }
            None => {
                let _ = writeln!(out, "Draw");
            }
        }
        let _ = writeln!(out, "Scores: {}", record.scores);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Final scores: {}", summary.scores);
    let _ = write!(out, "{}", summary.final_winners);
    out
}
