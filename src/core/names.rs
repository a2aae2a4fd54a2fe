//! Default participant naming.
//!
//! Humans are named `Player_1` .. `Player_9`, then `Player_A`, `Player_B`
//! and so on; bots are named `bot_a`, `bot_b`, ... Each default name comes
//! with a matching default marker (`1`, `2`, ... or `a`, `b`, ...).
//!
//! The sequence is an explicit value owned by whoever configures a
//! session, so two sessions never share counters.

use super::marker::Marker;

/// Generator for default participant names and markers.
#[derive(Clone, Debug, Default)]
pub struct NameSequence {
    humans: u32,
    bots: u32,
}

impl NameSequence {
    /// Create a fresh sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next default human name and marker.
    pub fn next_human(&mut self) -> (String, Marker) {
        self.humans += 1;
        let suffix = if self.humans < 10 {
            char::from_digit(self.humans, 10).unwrap_or('?')
        } else {
            char::from_u32(u32::from('A') + self.humans - 10).unwrap_or('?')
        };
        (format!("Player_{suffix}"), Marker(suffix))
    }

    /// Next default bot name and marker.
    pub fn next_bot(&mut self) -> (String, Marker) {
        self.bots += 1;
        let letter = char::from_u32(u32::from('a') + self.bots - 1).unwrap_or('?');
        (format!("bot_{letter}"), Marker(letter))
    }
}
