//! The trigger kind under which a VM execution runs, pushed as an integer
//! by `System.Runtime.GetTrigger` and consulted by storage mutation gates.

/// Mirrors the real protocol's trigger byte values so `GetTrigger`'s
/// pushed integer matches consensus-visible behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TriggerType {
    OnPersist = 0x01,
    PostPersist = 0x02,
    Verification = 0x20,
    Application = 0x40,
}

impl TriggerType {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether storage mutation is permitted under this trigger, per
    /// spec.md §4.3 ("Application or ApplicationR variants").
    pub fn allows_state_mutation(self) -> bool {
        matches!(
            self,
            TriggerType::Application | TriggerType::OnPersist | TriggerType::PostPersist
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_application_triggers_allow_mutation() {
        assert!(TriggerType::Application.allows_state_mutation());
        assert!(!TriggerType::Verification.allows_state_mutation());
    }
}
