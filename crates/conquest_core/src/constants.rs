pub mod headers {
    /// Names the server-side connection every request is scoped to.
    pub const CONNECTION_NAME: &str = "X-ConnectionName";
}

pub mod grants {
    pub const PASSWORD: &str = "password";
    pub const REFRESH_TOKEN: &str = "refresh_token";
}

pub mod routes {
    pub const TOKEN: &str = "/api/token";

    pub const ENTITY_BY_ID: &str = "/api/{resource}/{id}";
    pub const ENTITY_BASIC_BY_ID: &str = "/api/{resource}/basic/{id}";
    pub const ENTITY_FIND_BY_FIELD: &str = "/api/{resource}/find_by_field";

    pub const IMPORT_ADD: &str = "/api/import/add/{import_type}";
    pub const IMPORT_STATE: &str = "/api/import/state/{batch}";
    pub const IMPORT_ERROR_CSV: &str = "/api/import/error_csv/{batch}";

    pub const SYSTEM_CONNECTIONS: &str = "/api/system/connections";
    pub const SYSTEM_VERSION: &str = "/api/system/version";
    pub const SYSTEM_WHOAMI: &str = "/api/system/whoami";
}

/// Seconds before expiry at which an access token is renewed.
pub const TOKEN_RENEWAL_MARGIN_SECS: i64 = 180;

/// Marker in a failed batch's error text indicating a CSV report can be fetched.
pub const OUTPUT_TO_CSV: &str = "Output to CSV";

/// Multipart field name the import endpoint reads the file from.
pub const IMPORT_FILE_FIELD: &str = "files";
