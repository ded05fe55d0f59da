//! Narrative collaborator contract.

use crate::types::Allocation;

/// Turns an allocation into descriptive text.
///
/// Implementations may be templated, rule-based or model-driven; the
/// allocator never depends on what they produce.
pub trait NarrativeGenerator: Send + Sync {
    fn generate(&self, allocation: &Allocation) -> String;
}
