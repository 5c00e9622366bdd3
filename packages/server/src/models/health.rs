use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
}

/// Result of probing the relational store.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DatabaseHealth {
    /// `ok`, `unconfigured` or `error`.
    #[schema(example = "ok")]
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Whether a setting has a value. Values themselves are never reported.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EnvSetting {
    #[schema(example = "CMS__DATABASE__URL")]
    pub name: &'static str,
    pub set: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EnvReport {
    pub settings: Vec<EnvSetting>,
}
