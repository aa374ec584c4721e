//! Allocations: one player's distribution of soldiers across battlefields.
//!
//! Commitments are stored as `u32`, so a constructed `Allocation` can never
//! hold a negative amount. Input from outside the engine (form fields, chat
//! text) goes through [`Allocation::from_signed`] or `str::parse`, which
//! reject negatives instead of clamping them.
//!
//! ```
//! use rust_blotto::round::Allocation;
//!
//! let allocation: Allocation = "10, 5 3".parse().unwrap();
//! assert_eq!(allocation.amounts(), &[10, 5, 3]);
//! assert_eq!(allocation.total(), 18);
//!
//! assert!("10 -5 3".parse::<Allocation>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use super::battlefield::{BattlefieldId, MAX_FIELDS};
use crate::core::AllocationViolation;

/// Per-battlefield soldier commitments, in battlefield order.
///
/// SmallVec keeps typical rounds (up to 8 fields) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allocation {
    amounts: SmallVec<[u32; 8]>,
}

impl Allocation {
    #[must_use]
    pub fn new(amounts: impl IntoIterator<Item = u32>) -> Self {
        Self {
            amounts: amounts.into_iter().collect(),
        }
    }

    /// All-zero allocation over `fields` battlefields.
    #[must_use]
    pub fn zeroed(fields: usize) -> Self {
        Self {
            amounts: SmallVec::from_elem(0, fields),
        }
    }

    /// Build from signed input, rejecting negative or oversized commitments
    /// and more than [`MAX_FIELDS`] fields.
    pub fn from_signed(amounts: &[i64]) -> Result<Self, AllocationViolation> {
        if amounts.len() > MAX_FIELDS {
            return Err(AllocationViolation::FieldCountMismatch {
                expected: MAX_FIELDS,
                actual: amounts.len(),
            });
        }
        let mut out = SmallVec::with_capacity(amounts.len());
        for (id, &amount) in (0..=u16::MAX).zip(amounts) {
            let field = BattlefieldId::new(id);
            if amount < 0 {
                return Err(AllocationViolation::NegativeCommitment { field, amount });
            }
            let amount = u32::try_from(amount)
                .map_err(|_| AllocationViolation::OutOfRange { field, amount })?;
            out.push(amount);
        }
        Ok(Self { amounts: out })
    }

    #[must_use]
    pub fn amounts(&self) -> &[u32] {
        &self.amounts
    }

    /// Commitment on a battlefield; 0 if the allocation does not cover it.
    #[must_use]
    pub fn get(&self, field: BattlefieldId) -> u32 {
        self.amounts.get(field.index()).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.amounts.len()
    }

    /// Sum of all commitments. Widened so the sum cannot overflow.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.amounts.iter().map(|&a| u64::from(a)).sum()
    }

    /// Check the allocation against a field count and budget.
    pub fn check(&self, fields: usize, budget: u32) -> Result<(), AllocationViolation> {
        if self.amounts.len() != fields {
            return Err(AllocationViolation::FieldCountMismatch {
                expected: fields,
                actual: self.amounts.len(),
            });
        }
        if fields > MAX_FIELDS {
            return Err(AllocationViolation::FieldCountMismatch {
                expected: MAX_FIELDS,
                actual: fields,
            });
        }
        let total = self.total();
        if total > u64::from(budget) {
            return Err(AllocationViolation::OverBudget { total, budget });
        }
        Ok(())
    }
}

impl FromStr for Allocation {
    type Err = AllocationViolation;

    /// Parse whitespace- or comma-separated integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let signed = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<i64>().map_err(|_| AllocationViolation::Unparseable {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_signed(&signed)
    }
}
