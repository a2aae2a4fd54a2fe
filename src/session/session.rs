//! Repeated matches over one roster.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::core::{Marker, NameSequence, TurnOrder};
use crate::error::{ConfigurationError, Error, Result};
use crate::players::{Participant, ParticipantKind, ParticipantSpec};
use crate::rules::GameRules;
use crate::search::SearchMode;

use super::config::SessionConfig;
use super::driver::{Match, MatchPhase, MatchRecord, MoveEvent};
use super::log::{SessionLogger, SessionSummary};
use super::scores::{ScoreTable, Standings};

/// Builder validating a roster before a session starts.
pub struct SessionBuilder<G: GameRules> {
    rules: G,
    initial: G::State,
    config: SessionConfig,
    specs: Vec<ParticipantSpec>,
    names: NameSequence,
    logger: Option<Box<dyn SessionLogger>>,
}

impl<G: GameRules> SessionBuilder<G> {
    /// Builder with default config, no participants and no logger.
    pub fn new(rules: G, initial: G::State) -> Self {
        Self {
            rules,
            initial,
            config: SessionConfig::default(),
            specs: Vec::new(),
            names: NameSequence::new(),
            logger: None,
        }
    }

    /// Replace the session config.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a participant; ring order is insertion order.
    pub fn participant(mut self, spec: ParticipantSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Append several participants in order.
    pub fn participants(mut self, specs: impl IntoIterator<Item = ParticipantSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Source of default names and markers.
    pub fn names(mut self, names: NameSequence) -> Self {
        self.names = names;
        self
    }

    /// Logger that receives the summary when the session finishes.
    pub fn logger(mut self, logger: impl SessionLogger + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Validate the roster and create the session.
    ///
    /// Markers come from the spec, else the game's defaults for that
    /// slot, else the default name sequence.
    pub fn build(self) -> Result<Session<G>> {
        let SessionBuilder {
            rules,
            initial,
            config,
            specs,
            mut names,
            logger,
        } = self;

        let range = rules.player_range();
        if !range.contains(&specs.len()) {
            return Err(ConfigurationError::PlayerCount {
                game: rules.name().to_string(),
                min: *range.start(),
                max: *range.end(),
                got: specs.len(),
            }
            .into());
        }

        let game_markers = rules.default_markers();
        let mut seen = FxHashSet::default();
        let mut participants = Vec::with_capacity(specs.len());

        for (slot, spec) in specs.into_iter().enumerate() {
            let (default_name, sequence_marker) = match spec.kind() {
                Some(ParticipantKind::Human) => names.next_human(),
                _ => names.next_bot(),
            };
            let default_marker = game_markers.get(slot).copied().unwrap_or(sequence_marker);
            let participant = spec.build(default_name, default_marker)?;

            if !seen.insert(participant.marker) {
                return Err(ConfigurationError::DuplicateMarker {
                    marker: participant.marker,
                }
                .into());
            }
            participants.push(participant);
        }

        let order = TurnOrder::new(participants.iter().map(|p| p.marker))?;
        if let Some(reference) = config.reference {
            if !seen.contains(&reference) {
                return Err(ConfigurationError::UnknownMarker { marker: reference }.into());
            }
        }

        let starting = order.first_active().ok_or(ConfigurationError::NoActiveParticipants)?;
        let scores = ScoreTable::new(order.markers());

        info!(
            game = rules.name(),
            participants = participants.len(),
            mode = %config.search.mode,
            max_depth = ?config.search.max_depth,
            "session configured"
        );
        for p in &participants {
            debug!(participant = %p, "roster entry");
        }

        Ok(Session {
            rules,
            initial,
            participants,
            order,
            config,
            scores,
            records: Vec::new(),
            starting,
            logger,
            started_at: Utc::now(),
            clock: Instant::now(),
        })
    }
}

/// A roster playing repeated matches with cumulative scores.
pub struct Session<G: GameRules> {
    rules: G,
    initial: G::State,
    participants: Vec<Participant>,
    order: TurnOrder,
    config: SessionConfig,
    scores: ScoreTable,
    records: Vec<MatchRecord>,
    starting: Marker,
    logger: Option<Box<dyn SessionLogger>>,
    started_at: DateTime<Utc>,
    clock: Instant,
}

impl<G: GameRules> Session<G> {
    /// Start configuring a session over `rules`, every match starting
    /// from a clone of `initial`.
    pub fn builder(rules: G, initial: G::State) -> SessionBuilder<G> {
        SessionBuilder::new(rules, initial)
    }

    /// Rules of the game being played.
    pub fn rules(&self) -> &G {
        &self.rules
    }

    /// Config the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Turn order, including deactivated markers.
    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    /// Participants in ring order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Participant playing `marker`, if any.
    pub fn participant(&self, marker: Marker) -> Option<&Participant> {
        self.participants.iter().find(|p| p.marker == marker)
    }

    /// Wins per participant and draws, across all matches so far.
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// Records of the matches played so far.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Participant who starts the next match.
    #[must_use]
    pub fn next_starting(&self) -> Marker {
        self.starting_marker()
    }

    #[must_use]
    pub fn standings(&self) -> Standings {
        self.scores.standings()
    }

    /// Take `marker` out of the rotation. Its score entry is kept.
    pub fn deactivate(&mut self, marker: Marker) -> Result<()> {
        self.order.deactivate(marker)?;
        self.set_active(marker, false);
        info!(%marker, active = self.order.active_count(), "participant deactivated");
        Ok(())
    }

    /// Return `marker` to the rotation at its original slot.
    pub fn activate(&mut self, marker: Marker) -> Result<()> {
        self.order.activate(marker)?;
        self.set_active(marker, true);
        info!(%marker, active = self.order.active_count(), "participant activated");
        Ok(())
    }

    /// Play one full match.
    pub fn play_match(&mut self) -> Result<MatchRecord> {
        self.play_match_with(|_, _, _| {})
    }

    /// Play one full match, calling `observer` after every move with the
    /// rules, the applied move and the new state.
    #[instrument(skip(self, observer), fields(game = self.rules.name(), match_number = self.records.len()))]
    pub fn play_match_with<F>(&mut self, mut observer: F) -> Result<MatchRecord>
    where
        F: FnMut(&G, &MoveEvent, &G::State),
    {
        let starting = self.starting_marker();
        let number = self.records.len();
        let mut game: Match<G> = Match::new(
            number,
            self.initial.clone(),
            starting,
            self.config.record_events,
        );
        game.start(&self.rules)?;
        debug!(%starting, "match started");

        while game.phase() == MatchPhase::InProgress {
            let current = game.current();
            let reference = self.reference_for(current);
            let participant = self
                .participants
                .iter_mut()
                .find(|p| p.marker == current)
                .ok_or(ConfigurationError::UnknownMarker { marker: current })?;

            let event = game.play_turn(
                &self.rules,
                &self.order,
                participant,
                reference,
                self.config.search,
            )?;
            observer(&self.rules, &event, game.state());
        }

        let outcome = game.outcome().ok_or(Error::MatchNotInProgress)?;
        self.scores.record(outcome);
        let moves = game.moves_played();
        let record = game.into_record(self.scores.clone())?;

        info!(
            winner = ?record.winner,
            moves,
            duration_ms = record.duration_ms,
            scores = %self.scores,
            "match finished"
        );

        if let Some(logger) = self.logger.as_mut() {
            if let Err(e) = logger.record_match(&record) {
                warn!(error = %e, "session logger failed to record match");
            }
        }

        self.records.push(record.clone());
        if self.config.rotate_start {
            self.starting = self.rules.next_marker(&self.order, starting);
        }
        Ok(record)
    }

    /// Play `count` matches back to back.
    pub fn play(&mut self, count: usize) -> Result<Vec<MatchRecord>> {
        (0..count).map(|_| self.play_match()).collect()
    }

    /// Summarize the session and hand the summary to the logger.
    #[instrument(skip(self), fields(game = self.rules.name()))]
    pub fn finish(&mut self) -> SessionSummary {
        let summary = SessionSummary {
            game: self.rules.name().to_string(),
            mode: self.config.search.mode,
            max_depth: self.config.search.max_depth,
            reference: self.config.reference,
            initial_snapshot: self.rules.snapshot(&self.initial),
            participants: self.participants.iter().map(Participant::info).collect(),
            total_matches: self.records.len(),
            scores: self.scores.clone(),
            final_winners: self.scores.standings(),
            started_at: self.started_at,
            ended_at: Utc::now(),
            total_duration_ms: self.clock.elapsed().as_millis() as u64,
            matches: self.records.clone(),
        };

        info!(
            matches = summary.total_matches,
            scores = %summary.scores,
            standings = %summary.final_winners,
            "session finished"
        );

        if let Some(logger) = self.logger.as_mut() {
            if let Err(e) = logger.record_summary(&summary) {
                warn!(error = %e, "session logger failed to record summary");
            }
        }
        summary
    }

    /// Starting marker, moved past participants deactivated since.
    fn starting_marker(&self) -> Marker {
        if self.order.is_active(self.starting) {
            self.starting
        } else {
            self.rules.next_marker(&self.order, self.starting)
        }
    }

    /// Reference handed to search for `acting`'s turn.
    fn reference_for(&self, acting: Marker) -> Option<Marker> {
        match self.config.search.mode {
            SearchMode::Selfish => None,
            SearchMode::Adversarial => Some(
                self.config
                    .reference
                    .filter(|r| self.order.is_active(*r))
                    .unwrap_or(acting),
            ),
        }
    }

    fn set_active(&mut self, marker: Marker, active: bool) {
        if let Some(p) = self.participants.iter_mut().find(|p| p.marker == marker) {
            p.set_active(active);
        }
    }
}
