use calendar_domain::ClientConfig;

/// Defaults plus any overrides baked in at build time
pub fn load_config() -> ClientConfig {
    ClientConfig::default().with_overrides(
        option_env!("CALENDAR_API_BASE_URL"),
        option_env!("CALENDAR_GRAPHQL_URL"),
        option_env!("CALENDAR_OFFLINE"),
    )
}
