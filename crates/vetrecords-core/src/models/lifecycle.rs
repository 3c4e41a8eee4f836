//! Soft-delete lifecycle shared by every record.
//!
//! A record starts [`RecordState::Active`] and can move to
//! [`RecordState::Inactive`] exactly once. There is no transition back.

use serde::{Deserialize, Serialize};

/// Two-state soft-delete lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    Active,
    Inactive,
}

impl RecordState {
    /// State for a stored flag value.
    pub fn from_flag(active: bool) -> Self {
        if active {
            RecordState::Active
        } else {
            RecordState::Inactive
        }
    }

    /// The only transition. Retiring an inactive record leaves it inactive.
    pub fn retire(self) -> Self {
        RecordState::Inactive
    }

    pub fn is_active(self) -> bool {
        self == RecordState::Active
    }
}

/// Records that are retired by flipping a flag instead of being removed.
pub trait SoftDelete {
    /// Current lifecycle state.
    fn state(&self) -> RecordState;

    /// Move the in-memory record to [`RecordState::Inactive`].
    fn retire(&mut self);

    fn is_active(&self) -> bool {
        self.state().is_active()
    }
}

/// Implement [`SoftDelete`] over a boolean flag field.
macro_rules! soft_delete_flag {
    ($ty:ty, $field:ident) => {
        impl $crate::models::SoftDelete for $ty {
            fn state(&self) -> $crate::models::RecordState {
                $crate::models::RecordState::from_flag(self.$field)
            }

            fn retire(&mut self) {
                self.$field = $crate::models::SoftDelete::state(self).retire().is_active();
            }
        }
    };
}

pub(crate) use soft_delete_flag;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retire_is_terminal() {
        assert_eq!(RecordState::Active.retire(), RecordState::Inactive);
        assert_eq!(RecordState::Inactive.retire(), RecordState::Inactive);
    }

    #[test]
    fn test_from_flag() {
        assert!(RecordState::from_flag(true).is_active());
        assert!(!RecordState::from_flag(false).is_active());
    }
}
