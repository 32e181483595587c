//! Appointment status state machine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of an appointment.
///
/// Wire values keep the Portuguese vocabulary of the public API. A new
/// appointment is always `Pending` regardless of what the caller sent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum AppointmentStatus {
    #[serde(rename = "pendente")]
    #[strum(serialize = "pendente")]
    Pending,
    #[serde(rename = "confirmado")]
    #[strum(serialize = "confirmado")]
    Confirmed,
    #[serde(rename = "cancelado")]
    #[strum(serialize = "cancelado")]
    Cancelled,
    #[serde(rename = "concluido")]
    #[strum(serialize = "concluido")]
    Concluded,
}

impl AppointmentStatus {
    /// Terminal states admit no further lifecycle activity.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Concluded
        )
    }

    /// Whether a status-only update from `self` to `next` is legal.
    ///
    /// Terminal states only accept a no-op transition to themselves. From
    /// `Pending` or `Confirmed` every target is accepted, including
    /// reversions such as confirmed back to pending; that looseness is a
    /// documented property of the API, not an oversight.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        match self {
            AppointmentStatus::Cancelled => next == AppointmentStatus::Cancelled,
            AppointmentStatus::Concluded => next == AppointmentStatus::Concluded,
            AppointmentStatus::Pending | AppointmentStatus::Confirmed => true,
        }
    }
}
