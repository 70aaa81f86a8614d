//! Booking domain entity and status state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::availability::StayInterval;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// Accepted but not yet confirmed; does not block the room
    Pending,
    /// Confirmed stay; blocks the room for its interval
    Confirmed,
    /// Guest is in the room
    CheckedIn,
    /// Stay completed (terminal)
    CheckedOut,
    /// Booking cancelled (terminal)
    Cancelled,
}

/// Statuses that block room availability.
pub const OCCUPYING_STATUSES: &[BookingStatus] =
    &[BookingStatus::Confirmed, BookingStatus::CheckedIn];

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked-in",
            Self::CheckedOut => "Checked-out",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "Checked-in" => Some(Self::CheckedIn),
            "Checked-out" => Some(Self::CheckedOut),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether a booking in this status blocks its room's availability.
    pub fn is_occupying(&self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Legal status transitions. Creation (no prior status) is handled
    /// separately by the admission path.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (CheckedIn, CheckedOut)
                | (CheckedIn, Cancelled)
        )
    }

    /// Whether moving to `next` brings the booking into the occupying
    /// set, which requires re-running the availability check (another
    /// booking may have been confirmed in the interim).
    pub fn transition_needs_admission(&self, next: BookingStatus) -> bool {
        !self.is_occupying() && next.is_occupying()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A room booking over a half-open `[check_in, check_out)` stay.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    pub room_id: i32,
    pub customer_id: i32,
    pub interval: StayInterval,
    /// Number of guests staying
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    /// Room charge plus accumulated service lines
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Booking fields known before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: i32,
    pub customer_id: i32,
    pub interval: StayInterval,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub total_amount: Decimal,
}

impl Booking {
    /// Whether this booking currently blocks its room for its interval.
    pub fn is_occupying(&self) -> bool {
        self.status.is_occupying()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::BookingStatus::*;
    use super::*;

    #[test]
    fn occupying_set_is_confirmed_and_checked_in() {
        assert!(Confirmed.is_occupying());
        assert!(CheckedIn.is_occupying());
        assert!(!Pending.is_occupying());
        assert!(!CheckedOut.is_occupying());
        assert!(!Cancelled.is_occupying());
        assert_eq!(OCCUPYING_STATUSES, &[Confirmed, CheckedIn]);
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        for next in [Pending, Confirmed, CheckedIn, CheckedOut, Cancelled] {
            assert!(!CheckedOut.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(CheckedOut.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn legal_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(CheckedIn.can_transition_to(CheckedOut));
        assert!(CheckedIn.can_transition_to(Cancelled));
    }

    #[test]
    fn illegal_transitions() {
        assert!(!Pending.can_transition_to(CheckedIn));
        assert!(!Pending.can_transition_to(CheckedOut));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(CheckedOut));
        assert!(!CheckedIn.can_transition_to(Confirmed));
        // No self-transitions
        for s in [Pending, Confirmed, CheckedIn, CheckedOut, Cancelled] {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn confirming_a_pending_booking_needs_admission() {
        assert!(Pending.transition_needs_admission(Confirmed));
        // Already occupying; no re-check
        assert!(!Confirmed.transition_needs_admission(CheckedIn));
        // Leaving the occupying set never needs one
        assert!(!CheckedIn.transition_needs_admission(CheckedOut));
        assert!(!Pending.transition_needs_admission(Cancelled));
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [Pending, Confirmed, CheckedIn, CheckedOut, Cancelled] {
            assert_eq!(BookingStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::from_str("Unknown"), None);
    }
}
