pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;
pub const DEFAULT_QUERY_LIMIT: u64 = 1000;

pub const OTP_LENGTH: u32 = 6;
pub const OTP_RESEND_COOLDOWN_SECS: u64 = 60;
pub const MAX_OTP_ATTEMPTS: u32 = 5;

// Guest phone verification stays valid for 24 hours
pub const GUEST_VERIFICATION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

pub const MIN_GUEST_COUNT: u32 = 1;
pub const MAX_GUEST_COUNT: u32 = 12;
pub const DEFAULT_GUEST_COUNT: u32 = 2;

pub const PHONE_COUNTRY_PREFIX: &str = "+91";

pub const SECURETOKEN_JWKS_URI: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

pub const DB_NAME: &str = "dinetime";

pub const COLL_RESTAURANTS: &str = "restaurants";
pub const COLL_BOOKINGS: &str = "bookings";
pub const COLL_USERS: &str = "users";

// Local storage keys, names kept stable across app versions
pub const KEY_USER_EMAIL: &str = "userEmail";
pub const KEY_USER_NAME: &str = "userName";
pub const KEY_IS_GUEST: &str = "isguest";
pub const KEY_GUEST_VERIFIED_PHONE: &str = "guestVerifiedPhone";
pub const KEY_GUEST_VERIFIED_AT: &str = "guestVerifiedAt";
pub const KEY_NOTIFICATION_PREFS: &str = "notificationPrefs";

pub const DEFAULT_STORAGE_FILE: &str = ".dinetime/storage.json";
