//! Participant handles and their player ids.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{BlottoError, PlayerId, Result};

/// Most participants a roster can hold; `PlayerId` is a `u8`.
pub const MAX_PARTICIPANTS: usize = 255;

/// Signed-up participants in join order.
///
/// A participant's `PlayerId` is their position in join order, so ids shift
/// when someone leaves during signup. Once the tournament starts the roster
/// is frozen and ids are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    handles: Vec<String>,
    index: FxHashMap<String, PlayerId>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant, returning their id.
    pub fn join(&mut self, handle: impl Into<String>) -> Result<PlayerId> {
        let handle = handle.into();
        if self.index.contains_key(&handle) {
            return Err(BlottoError::AlreadyJoined(handle));
        }
        if self.handles.len() >= MAX_PARTICIPANTS {
            return Err(BlottoError::RosterFull(self.handles.len()));
        }

        let player = PlayerId::new(self.handles.len() as u8);
        self.index.insert(handle.clone(), player);
        self.handles.push(handle);
        Ok(player)
    }

    /// Remove a participant. Later joiners move up one id.
    pub fn leave(&mut self, handle: &str) -> Result<()> {
        let player = self
            .index
            .remove(handle)
            .ok_or_else(|| BlottoError::NotJoined(handle.to_string()))?;
        self.handles.remove(player.index());
        self.reindex();
        Ok(())
    }

    #[must_use]
    pub fn player_id(&self, handle: &str) -> Option<PlayerId> {
        self.index.get(handle).copied()
    }

    #[must_use]
    pub fn handle(&self, player: PlayerId) -> Option<&str> {
        self.handles.get(player.index()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Check a roster built from raw handles: at most [`MAX_PARTICIPANTS`]
    /// entries and no handle twice.
    pub fn validate(&self) -> Result<()> {
        if self.handles.len() > MAX_PARTICIPANTS {
            return Err(BlottoError::RosterFull(self.handles.len()));
        }
        if self.index.len() != self.handles.len() {
            let duplicate = self
                .handles
                .iter()
                .enumerate()
                .find(|&(i, h)| self.index.get(h).map(|p| p.index()) != Some(i))
                .map(|(_, h)| h.clone())
                .unwrap_or_default();
            return Err(BlottoError::AlreadyJoined(duplicate));
        }
        Ok(())
    }

    /// `(id, handle)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> {
        self.handles
            .iter()
            .enumerate()
            .map(|(i, h)| (PlayerId::new(i as u8), h.as_str()))
    }

    fn reindex(&mut self) {
        self.index = self
            .handles
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), PlayerId::new(i as u8)))
            .collect();
    }
}

impl From<Vec<String>> for Roster {
    fn from(handles: Vec<String>) -> Self {
        let mut roster = Self {
            handles,
            index: FxHashMap::default(),
        };
        roster.reindex();
        roster
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.handles
    }
}
