use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// "healthy" when the database answers, "degraded" otherwise
    pub status: String,

    /// Result of pinging the inventory database
    pub database: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}
