//! Room domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
    Family,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Suite => "Suite",
            Self::Deluxe => "Deluxe",
            Self::Family => "Family",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Single" => Some(Self::Single),
            "Double" => Some(Self::Double),
            "Suite" => Some(Self::Suite),
            "Deluxe" => Some(Self::Deluxe),
            "Family" => Some(Self::Family),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room display status.
///
/// A denormalized projection of booking state plus housekeeping flags.
/// Availability decisions never read it, with one exception: a room in
/// `Maintenance` is withheld from availability listings unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
    Cleaning,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Reserved => "Reserved",
            Self::Maintenance => "Maintenance",
            Self::Cleaning => "Cleaning",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Occupied" => Some(Self::Occupied),
            "Reserved" => Some(Self::Reserved),
            "Maintenance" => Some(Self::Maintenance),
            "Cleaning" => Some(Self::Cleaning),
            _ => None,
        }
    }

    /// Housekeeping statuses are set by staff, not derived from
    /// bookings, and survive status recomputation.
    pub fn is_operational_hold(&self) -> bool {
        matches!(self, Self::Maintenance | Self::Cleaning)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A hotel room
#[derive(Debug, Clone)]
pub struct Room {
    pub id: i32,
    /// Human-facing room number, unique per hotel
    pub room_number: String,
    pub room_type: RoomType,
    pub price_per_night: Decimal,
    pub max_occupancy: i32,
    pub floor: Option<i32>,
    pub description: Option<String>,
    /// Comma-separated amenity list as entered by staff
    pub amenities: Option<String>,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_type_roundtrip() {
        for rt in [
            RoomType::Single,
            RoomType::Double,
            RoomType::Suite,
            RoomType::Deluxe,
            RoomType::Family,
        ] {
            assert_eq!(RoomType::from_str(rt.as_str()), Some(rt));
        }
        assert_eq!(RoomType::from_str("Penthouse"), None);
    }

    #[test]
    fn status_roundtrip() {
        for st in [
            RoomStatus::Available,
            RoomStatus::Occupied,
            RoomStatus::Reserved,
            RoomStatus::Maintenance,
            RoomStatus::Cleaning,
        ] {
            assert_eq!(RoomStatus::from_str(st.as_str()), Some(st));
        }
    }

    #[test]
    fn operational_holds() {
        assert!(RoomStatus::Maintenance.is_operational_hold());
        assert!(RoomStatus::Cleaning.is_operational_hold());
        assert!(!RoomStatus::Available.is_operational_hold());
        assert!(!RoomStatus::Occupied.is_operational_hold());
    }
}
