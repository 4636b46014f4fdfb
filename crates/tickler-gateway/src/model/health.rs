use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const HEALTHY: Self = Self { status: "healthy" };
    pub const UNHEALTHY: Self = Self {
        status: "unhealthy",
    };
}
