//! Authorization seam
//!
//! Role and permission evaluation is owned by an external collaborator. The
//! ledger and engine never check permissions themselves; callers consult an
//! `ActionGate` before invoking any mutating operation.

/// Approves actor actions before they reach the ledger or engine
pub trait ActionGate {
    /// May `actor` record quotes and trigger cost propagation?
    fn can_edit_material_cost(&self, actor: &str) -> bool;
}

/// Allow-all gate used when no permission system is wired in
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl ActionGate for OpenGate {
    fn can_edit_material_cost(&self, _actor: &str) -> bool {
        true
    }
}
