//! Participants and their move strategies.
//!
//! Every participant binds exactly one [`Strategy`]. The driver invokes
//! all of them through [`Participant::choose_move`], whatever their kind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::core::{GameRng, Marker, TurnOrder};
use crate::error::{ConfigurationError, Error, Result};
use crate::rules::GameRules;
use crate::search::{Minimax, SearchConfig, SearchMode};

use super::input::MoveInput;

/// Whether a participant is driven by a person or by the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Human,
    Bot,
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantKind::Human => write!(f, "Human"),
            ParticipantKind::Bot => write!(f, "Bot"),
        }
    }
}

/// How a participant picks its moves.
pub enum Strategy {
    /// Entries typed by a person.
    Human(Box<dyn MoveInput>),
    /// Uniformly random legal move.
    Random(GameRng),
    /// Minimax best move.
    Search,
}

impl Strategy {
    /// Human strategy over any input source.
    pub fn human(input: impl MoveInput + 'static) -> Self {
        Strategy::Human(Box::new(input))
    }

    #[must_use]
    pub fn kind(&self) -> ParticipantKind {
        match self {
            Strategy::Human(_) => ParticipantKind::Human,
            Strategy::Random(_) | Strategy::Search => ParticipantKind::Bot,
        }
    }

    /// Short label for logs and summaries.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Human(_) => "human",
            Strategy::Random(_) => "random",
            Strategy::Search => "minimax",
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Human(_) => f.write_str("Human"),
            Strategy::Random(rng) => f.debug_tuple("Random").field(&rng.seed()).finish(),
            Strategy::Search => f.write_str("Search"),
        }
    }
}

/// Everything a strategy may consult to pick a move.
pub struct MoveRequest<'a, G: GameRules> {
    pub rules: &'a G,
    pub order: &'a TurnOrder,
    pub state: &'a G::State,
    /// Participant the adversarial search maximizes; `None` in selfish mode.
    pub reference: Option<Marker>,
    pub search: SearchConfig,
}

/// A named participant with its marker and strategy.
#[derive(Debug)]
pub struct Participant {
    pub name: String,
    pub marker: Marker,
    /// Display color for renderers; carried, never interpreted.
    pub color: Option<String>,
    pub stats: BTreeMap<String, String>,
    strategy: Strategy,
    active: bool,
}

impl Participant {
    pub fn new(name: impl Into<String>, marker: Marker, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            marker,
            color: None,
            stats: BTreeMap::new(),
            strategy,
            active: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ParticipantKind {
        self.strategy.kind()
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Still part of the turn rotation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Pick a move for the state in `request`.
    ///
    /// Human entries are re-requested until legal. Bot moves are returned
    /// as computed; the driver validates them.
    pub fn choose_move<G: GameRules>(&mut self, request: &MoveRequest<'_, G>) -> Result<G::Move> {
        let marker = self.marker;
        let mv = match &mut self.strategy {
            Strategy::Human(input) => ask_human(&self.name, marker, input.as_mut(), request)?,
            Strategy::Random(rng) => {
                let moves = request.rules.possible_moves(request.state);
                rng.choose(&moves).cloned().ok_or(Error::NoLegalMoves)?
            }
            Strategy::Search => Minimax::new(request.rules, request.order, request.search)
                .best_move(request.state, marker, request.reference)?,
        };
        debug!(name = %self.name, %marker, mv = %mv, strategy = self.strategy.label(), "move chosen");
        Ok(mv)
    }

    /// Serializable description for summaries.
    #[must_use]
    pub fn info(&self) -> ParticipantInfo {
        ParticipantInfo {
            name: self.name.clone(),
            marker: self.marker,
            kind: self.kind(),
            strategy: self.strategy.label().to_string(),
            color: self.color.clone(),
            stats: self.stats.clone(),
            active: self.active,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} {} | marker: '{}', strategy: {}",
            self.kind(),
            self.name,
            self.marker,
            self.strategy.label()
        )?;
        if let Some(color) = &self.color {
            write!(f, ", color: '{color}'")?;
        }
        if !self.stats.is_empty() {
            write!(f, ", stats: {:?}", self.stats)?;
        }
        write!(f, ">")
    }
}

/// Participant as recorded in a session summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub name: String,
    pub marker: Marker,
    pub kind: ParticipantKind,
    pub strategy: String,
    pub color: Option<String>,
    pub stats: BTreeMap<String, String>,
    pub active: bool,
}

/// Human turn: prompt until a legal move, help request or assist.
fn ask_human<G: GameRules>(
    name: &str,
    marker: Marker,
    input: &mut dyn MoveInput,
    request: &MoveRequest<'_, G>,
) -> Result<G::Move> {
    let rules = request.rules;
    let prompt = format!("{name} : {marker} - Your turn! Move or '?' for help > ");

    loop {
        let entry = input.request(&prompt)?.ok_or(Error::InputClosed)?;
        let entry = entry.trim();

        match entry {
            "?" | "help" => input.notify(&rules.help())?,
            "" => {
                // Assist always plays the classic game for the human.
                let config = request.search.with_mode(SearchMode::Adversarial);
                let result = Minimax::new(rules, request.order, config).search(
                    request.state,
                    marker,
                    Some(marker),
                )?;
                input.notify(&format!(
                    "AI played move {} in {} ms",
                    rules.describe_move(&result.best_move),
                    result.stats.millis()
                ))?;
                return Ok(result.best_move);
            }
            _ => match rules.parse_move(request.state, entry) {
                Some(mv) if rules.is_legal(request.state, &mv) => return Ok(mv),
                _ => {
                    debug!(%marker, entry, "rejected move entry");
                    let legal: Vec<String> = rules
                        .possible_moves(request.state)
                        .iter()
                        .map(|m| rules.describe_move(m))
                        .collect();
                    input.notify(&format!(
                        "'{entry}' is not a valid move! Choose among: {}",
                        legal.join(", ")
                    ))?;
                }
            },
        }
    }
}

/// Partial participant description, completed by the session builder.
#[derive(Debug, Default)]
pub struct ParticipantSpec {
    pub name: Option<String>,
    pub marker: Option<Marker>,
    pub strategy: Option<Strategy>,
    pub color: Option<String>,
    pub stats: BTreeMap<String, String>,
}

impl ParticipantSpec {
    /// Empty spec; a strategy must be bound before building.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn human(input: impl MoveInput + 'static) -> Self {
        Self::new().with_strategy(Strategy::human(input))
    }

    pub fn random(rng: GameRng) -> Self {
        Self::new().with_strategy(Strategy::Random(rng))
    }

    pub fn search() -> Self {
        Self::new().with_strategy(Strategy::Search)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.stats.insert(key.into(), value.into());
        self
    }

    /// Kind implied by the bound strategy, if any.
    #[must_use]
    pub fn kind(&self) -> Option<ParticipantKind> {
        self.strategy.as_ref().map(Strategy::kind)
    }

    /// Complete the spec with fallback name and marker.
    pub fn build(self, default_name: String, default_marker: Marker) -> Result<Participant> {
        let name = self.name.unwrap_or(default_name);
        let strategy = self
            .strategy
            .ok_or_else(|| ConfigurationError::MissingStrategy { name: name.clone() })?;
        let marker = self.marker.unwrap_or(default_marker);
        Marker::new(marker.0)?;

        let mut participant = Participant::new(name, marker, strategy);
        participant.color = self.color;
        participant.stats = self.stats;
        Ok(participant)
    }
}
