//! Single-match driver.
//!
//! A [`Match`] owns the current state and walks it through
//! `NotStarted -> InProgress -> Terminal`. Each turn asks the participant
//! to move, validates the move against `possible_moves`, applies it and
//! advances the turn order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::core::{Marker, TurnOrder};
use crate::error::{Error, Result};
use crate::players::{MoveRequest, Participant, ParticipantKind};
use crate::rules::{GameRules, Outcome};
use crate::search::SearchConfig;

use super::scores::ScoreTable;

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    NotStarted,
    InProgress,
    Terminal,
}

/// One applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub marker: Marker,
    /// Move as rendered by its `Display` impl.
    pub action: String,
    /// State snapshot after the move.
    pub snapshot: String,
    /// Time the strategy took; `None` for humans.
    pub duration_ms: Option<u64>,
}

/// Finished match as handed to loggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Zero-based position in the session.
    pub match_number: usize,
    pub starting_marker: Marker,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Applied moves, empty when event recording is off.
    pub events: Vec<MoveEvent>,
    pub winner: Option<Marker>,
    /// Session scores right after this match was counted.
    pub scores: ScoreTable,
}

impl MatchRecord {
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// One playthrough from the initial state to a terminal state.
pub struct Match<G: GameRules> {
    number: usize,
    state: G::State,
    phase: MatchPhase,
    starting: Marker,
    current: Marker,
    record_events: bool,
    events: Vec<MoveEvent>,
    moves_played: usize,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    clock: Option<Instant>,
    duration_ms: u64,
    outcome: Option<Outcome>,
}

impl<G: GameRules> Match<G> {
    /// New match on `initial`, `starting` to move first.
    pub fn new(number: usize, initial: G::State, starting: Marker, record_events: bool) -> Self {
        Self {
            number,
            state: initial,
            phase: MatchPhase::NotStarted,
            starting,
            current: starting,
            record_events,
            events: Vec::new(),
            moves_played: 0,
            started_at: None,
            ended_at: None,
            clock: None,
            duration_ms: 0,
            outcome: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// Participant to move.
    #[must_use]
    pub fn current(&self) -> Marker {
        self.current
    }

    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    #[must_use]
    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Outcome, once terminal.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn events(&self) -> &[MoveEvent] {
        &self.events
    }

    /// Start the clock. A terminal initial state ends the match at once.
    pub fn start(&mut self, rules: &G) -> Result<()> {
        if self.phase != MatchPhase::NotStarted {
            return Err(Error::MatchNotInProgress);
        }
        self.started_at = Some(Utc::now());
        self.clock = Some(Instant::now());
        self.phase = MatchPhase::InProgress;
        self.check_terminal(rules);
        Ok(())
    }

    /// Play one turn for `participant`, who must hold the current marker.
    ///
    /// Returns the event describing the applied move, recorded or not.
    pub fn play_turn(
        &mut self,
        rules: &G,
        order: &TurnOrder,
        participant: &mut Participant,
        reference: Option<Marker>,
        search: SearchConfig,
    ) -> Result<MoveEvent> {
        if self.phase != MatchPhase::InProgress {
            return Err(Error::MatchNotInProgress);
        }
        let marker = self.current;
        if participant.marker != marker {
            return Err(Error::invalid_move("(out of turn)", participant.marker));
        }

        let request = MoveRequest {
            rules,
            order,
            state: &self.state,
            reference,
            search,
        };
        let started = Instant::now();
        let mv = participant.choose_move(&request)?;
        let elapsed = started.elapsed().as_millis() as u64;

        if !rules.is_legal(&self.state, &mv) {
            return Err(Error::invalid_move(&mv, marker));
        }
        self.state = rules.apply_move(&self.state, &mv, marker)?;
        self.moves_played += 1;

        let event = MoveEvent {
            marker,
            action: mv.to_string(),
            snapshot: rules.snapshot(&self.state),
            duration_ms: match participant.kind() {
                ParticipantKind::Human => None,
                ParticipantKind::Bot => Some(elapsed),
            },
        };
        debug!(
            match_number = self.number,
            %marker,
            action = %event.action,
            snapshot = %event.snapshot,
            "move applied"
        );
        if self.record_events {
            self.events.push(event.clone());
        }

        self.check_terminal(rules);
        if self.phase == MatchPhase::InProgress {
            self.current = rules.next_marker(order, marker);
        }
        Ok(event)
    }

    /// Final record of a terminal match, with the updated session scores.
    pub fn into_record(self, scores: ScoreTable) -> Result<MatchRecord> {
        let outcome = self.outcome.ok_or(Error::MatchNotInProgress)?;
        let (Some(started_at), Some(ended_at)) = (self.started_at, self.ended_at) else {
            return Err(Error::MatchNotInProgress);
        };
        Ok(MatchRecord {
            match_number: self.number,
            starting_marker: self.starting,
            started_at,
            ended_at,
            duration_ms: self.duration_ms,
            events: self.events,
            winner: outcome.winner(),
            scores,
        })
    }

    fn check_terminal(&mut self, rules: &G) {
        if let Some(outcome) = rules.outcome(&self.state) {
            self.outcome = Some(outcome);
            self.phase = MatchPhase::Terminal;
            self.ended_at = Some(Utc::now());
            self.duration_ms = self
                .clock
                .map_or(0, |clock| clock.elapsed().as_millis() as u64);
        }
    }
}
