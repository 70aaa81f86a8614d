//! Staff domain entity, roles and capabilities

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Closed set of staff roles.
///
/// Authorization checks go through [`StaffRole::capabilities`] rather
/// than string comparison, so a role's permissions live in exactly one
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffRole {
    Admin,
    Manager,
    Receptionist,
    Housekeeping,
}

/// What a staff member is allowed to do through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageStaff,
    ManageRooms,
    ManageCustomers,
    ManageBookings,
    ManagePayments,
    ManageServices,
    ViewAnalytics,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Receptionist => "receptionist",
            Self::Housekeeping => "housekeeping",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "receptionist" => Some(Self::Receptionist),
            "housekeeping" => Some(Self::Housekeeping),
            _ => None,
        }
    }

    /// The fixed capability set for this role.
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Admin => &[
                ManageStaff,
                ManageRooms,
                ManageCustomers,
                ManageBookings,
                ManagePayments,
                ManageServices,
                ViewAnalytics,
            ],
            Self::Manager => &[
                ManageRooms,
                ManageCustomers,
                ManageBookings,
                ManagePayments,
                ManageServices,
                ViewAnalytics,
            ],
            Self::Receptionist => &[ManageCustomers, ManageBookings, ManagePayments],
            Self::Housekeeping => &[ManageRooms],
        }
    }

    pub fn has_capability(&self, cap: Capability) -> bool {
        self.capabilities().contains(&cap)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffStatus {
    Active,
    Inactive,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// A staff member; also the authentication principal for the API.
#[derive(Debug, Clone)]
pub struct Staff {
    pub id: i32,
    pub username: String,
    /// bcrypt hash; the clear-text password never leaves the login path
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: StaffRole,
    pub salary: Option<Decimal>,
    pub hire_date: NaiveDate,
    pub status: StaffStatus,
    pub created_at: DateTime<Utc>,
}

impl Staff {
    pub fn is_active(&self) -> bool {
        self.status == StaffStatus::Active
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_has_every_capability() {
        use Capability::*;
        for cap in [
            ManageStaff,
            ManageRooms,
            ManageCustomers,
            ManageBookings,
            ManagePayments,
            ManageServices,
            ViewAnalytics,
        ] {
            assert!(StaffRole::Admin.has_capability(cap));
        }
    }

    #[test]
    fn only_admin_manages_staff() {
        assert!(StaffRole::Admin.has_capability(Capability::ManageStaff));
        assert!(!StaffRole::Manager.has_capability(Capability::ManageStaff));
        assert!(!StaffRole::Receptionist.has_capability(Capability::ManageStaff));
        assert!(!StaffRole::Housekeeping.has_capability(Capability::ManageStaff));
    }

    #[test]
    fn receptionist_handles_front_desk_only() {
        let r = StaffRole::Receptionist;
        assert!(r.has_capability(Capability::ManageBookings));
        assert!(r.has_capability(Capability::ManageCustomers));
        assert!(r.has_capability(Capability::ManagePayments));
        assert!(!r.has_capability(Capability::ManageRooms));
        assert!(!r.has_capability(Capability::ViewAnalytics));
    }

    #[test]
    fn role_string_roundtrip() {
        for role in [
            StaffRole::Admin,
            StaffRole::Manager,
            StaffRole::Receptionist,
            StaffRole::Housekeeping,
        ] {
            assert_eq!(StaffRole::from_str(role.as_str()), Some(role));
        }
        assert_eq!(StaffRole::from_str("superuser"), None);
    }
}
