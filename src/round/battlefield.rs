//! Battlefields: the contested slots of a round.

use serde::{Deserialize, Serialize};

/// Most battlefields a round can have: one per `BattlefieldId`.
pub const MAX_FIELDS: usize = u16::MAX as usize + 1;

/// Position of a battlefield within a round (0-based).
///
/// Displayed 1-based, the way players see it: `BattlefieldId(0)` is "Field 1".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BattlefieldId(pub u16);

impl BattlefieldId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for BattlefieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field {}", self.0 as u32 + 1)
    }
}

/// A contested slot with a prize value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Battlefield {
    pub id: BattlefieldId,

    /// Display name.
    pub label: String,

    /// Points awarded for winning this battlefield.
    pub value: u32,
}

impl Battlefield {
    /// Create a battlefield worth 1 point, labelled after its position.
    #[must_use]
    pub fn new(id: BattlefieldId) -> Self {
        Self {
            id,
            label: id.to_string(),
            value: 1,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }
}
