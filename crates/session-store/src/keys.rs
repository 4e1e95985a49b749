//! Storage key constants.
//!
//! Key names match what the mobile apps already persist, so an upgraded
//! client picks up an existing session without re-login.

/// Storage keys used by the client
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer auth token
    pub const AUTH_TOKEN: &'static str = "authToken";

    /// User id (string numeral)
    pub const USER_ID: &'static str = "userId";

    /// User role id (string numeral)
    pub const USER_ROLE: &'static str = "userRole";

    /// User profile (JSON)
    pub const USER_DATA: &'static str = "userData";

    /// Profile image URLs (JSON array)
    pub const PROFILE_IMAGES: &'static str = "profile_images";
}
