//! Role identifiers, bilingual role labels, and post-login routing.
//!
//! The backend identifies members by a small closed set of numeric role
//! ids. Routing currently collapses every recognized role onto the shared
//! dashboard (product decision, not a bug); `destination_for` is the single
//! place to extend if per-role dashboards land later.

use l10n::Locale;
use serde::{Deserialize, Serialize};

/// A recognized member role.
///
/// The numeric values match the backend's `role_id` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i64)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    Member = 1,
    Farmer = 2,
    Investor = 3,
    ServiceProvider = 4,
    BranchSecretary = 5,
    UnionSecretary = 6,
    DistrictSecretary = 7,
    ZonalSecretary = 8,
    GeneralSecretary = 9,
    StateLeader = 10,
}

impl RoleId {
    /// All recognized roles, in backend id order.
    pub const ALL: [RoleId; 10] = [
        RoleId::Member,
        RoleId::Farmer,
        RoleId::Investor,
        RoleId::ServiceProvider,
        RoleId::BranchSecretary,
        RoleId::UnionSecretary,
        RoleId::DistrictSecretary,
        RoleId::ZonalSecretary,
        RoleId::GeneralSecretary,
        RoleId::StateLeader,
    ];

    /// Map a backend `role_id` to a role. Unknown ids are `None`.
    pub fn from_id(id: i64) -> Option<RoleId> {
        RoleId::ALL.iter().copied().find(|role| role.id() == id)
    }

    /// The backend's numeric id for this role.
    pub fn id(&self) -> i64 {
        *self as i64
    }
}

/// A navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Shared dashboard every authenticated role lands on.
    FarmerDashboard,
    /// Login screen (no usable session).
    Login,
}

/// Destination for an authenticated role.
///
/// Every recognized role currently routes to the shared dashboard.
/// Extend the match here when role-specific dashboards are added.
pub fn destination_for(role: RoleId) -> Route {
    match role {
        RoleId::Member
        | RoleId::Farmer
        | RoleId::Investor
        | RoleId::ServiceProvider
        | RoleId::BranchSecretary
        | RoleId::UnionSecretary
        | RoleId::DistrictSecretary
        | RoleId::ZonalSecretary
        | RoleId::GeneralSecretary
        | RoleId::StateLeader => Route::FarmerDashboard,
    }
}

/// Bilingual display label for a role.
pub fn label_for(role: RoleId, locale: Locale) -> &'static str {
    match (role, locale) {
        (RoleId::Member, Locale::En) => "Member",
        (RoleId::Member, Locale::Ta) => "உறுப்பினர்",
        (RoleId::Farmer, Locale::En) => "Farmer",
        (RoleId::Farmer, Locale::Ta) => "விவசாயி",
        (RoleId::Investor, Locale::En) => "Investor",
        (RoleId::Investor, Locale::Ta) => "முதலீட்டாளர்",
        (RoleId::ServiceProvider, Locale::En) => "Service Provider",
        (RoleId::ServiceProvider, Locale::Ta) => "சேவை வழங்குநர்",
        (RoleId::BranchSecretary, Locale::En) => "Branch Secretary",
        (RoleId::BranchSecretary, Locale::Ta) => "கிளை செயலாளர்",
        (RoleId::UnionSecretary, Locale::En) => "Union Secretary",
        (RoleId::UnionSecretary, Locale::Ta) => "ஒன்றிய செயலாளர்",
        (RoleId::DistrictSecretary, Locale::En) => "District Secretary",
        (RoleId::DistrictSecretary, Locale::Ta) => "மாவட்ட செயலாளர்",
        (RoleId::ZonalSecretary, Locale::En) => "Zonal Secretary",
        (RoleId::ZonalSecretary, Locale::Ta) => "மண்டல செயலாளர்",
        (RoleId::GeneralSecretary, Locale::En) => "General Secretary",
        (RoleId::GeneralSecretary, Locale::Ta) => "பொதுச் செயலாளர்",
        (RoleId::StateLeader, Locale::En) => "State Leader",
        (RoleId::StateLeader, Locale::Ta) => "மாநில தலைவர்",
    }
}

/// Label for a raw backend id. Unmapped ids yield the empty string.
pub fn label_for_id(id: i64, locale: Locale) -> &'static str {
    match RoleId::from_id(id) {
        Some(role) => label_for(role, locale),
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_known_roles() {
        assert_eq!(RoleId::from_id(2), Some(RoleId::Farmer));
        assert_eq!(RoleId::from_id(1), Some(RoleId::Member));
        assert_eq!(RoleId::from_id(10), Some(RoleId::StateLeader));
    }

    #[test]
    fn test_from_id_unknown() {
        assert_eq!(RoleId::from_id(0), None);
        assert_eq!(RoleId::from_id(11), None);
        assert_eq!(RoleId::from_id(-3), None);
    }

    #[test]
    fn test_id_roundtrip() {
        for role in RoleId::ALL {
            assert_eq!(RoleId::from_id(role.id()), Some(role));
        }
    }

    #[test]
    fn test_every_role_routes_to_dashboard() {
        for role in RoleId::ALL {
            assert_eq!(destination_for(role), Route::FarmerDashboard);
        }
    }

    #[test]
    fn test_every_role_has_both_labels() {
        for role in RoleId::ALL {
            assert!(!label_for(role, Locale::En).is_empty());
            assert!(!label_for(role, Locale::Ta).is_empty());
        }
    }

    #[test]
    fn test_label_for_id_unmapped_is_empty() {
        assert_eq!(label_for_id(99, Locale::En), "");
        assert_eq!(label_for_id(99, Locale::Ta), "");
    }

    #[test]
    fn test_label_for_id_mapped() {
        assert_eq!(label_for_id(2, Locale::En), "Farmer");
        assert_eq!(label_for_id(2, Locale::Ta), "விவசாயி");
    }
}
