//! Application configuration for the reporting API.
//!
//! Built once at process startup and passed by reference into every report
//! function. Business logic never reads ambient environment state; the
//! only place `std::env` is consulted is [`AppConfig::from_env`].
//!
//! Identifier safety is *not* enforced here: the report layer validates
//! every table/column name at query-build time so a bad override fails the
//! request with a descriptive error instead of being silently dropped.
//! The raw WHERE fragments are trusted deployment configuration and are
//! appended verbatim.

use std::time::Duration;

/// Primary dimension table: table/column names, optional raw WHERE
/// fragment, and row limit.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub table: String,
    pub name_field: String,
    pub zone_field: String,
    pub district_field: String,
    pub lat_field: String,
    pub lng_field: String,
    pub value_field: String,
    /// Trusted raw WHERE fragment appended to every dimension query.
    pub where_clause: Option<String>,
    /// Row cap for the main dimension query.
    pub limit: i64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            table: "dimensiones".to_string(),
            name_field: "nombre".to_string(),
            zone_field: "zona".to_string(),
            district_field: "distrito".to_string(),
            lat_field: "latitud".to_string(),
            lng_field: "longitud".to_string(),
            value_field: "valor".to_string(),
            where_clause: None,
            limit: 500,
        }
    }
}

/// District boundary table: table/column names and optional raw WHERE.
#[derive(Debug, Clone)]
pub struct DistrictConfig {
    pub table: String,
    pub id_field: String,
    pub code_field: String,
    pub name_field: String,
    pub geojson_field: String,
    pub where_clause: Option<String>,
}

impl Default for DistrictConfig {
    fn default() -> Self {
        Self {
            table: "dimdistrito".to_string(),
            id_field: "distritoid".to_string(),
            code_field: "codigodistrito".to_string(),
            name_field: "nombredistrito".to_string(),
            geojson_field: "geojson".to_string(),
            where_clause: None,
        }
    }
}

/// Column names behind the nine recognized filter keys.
#[derive(Debug, Clone)]
pub struct FilterFieldMap {
    pub timestamp: String,
    pub moment_id: String,
    pub altitude_level_id: String,
    pub signal_level_id: String,
    pub speed_level_id: String,
    pub operator_id: String,
    pub network_id: String,
    pub district_id: String,
    pub device_id: String,
}

impl Default for FilterFieldMap {
    fn default() -> Self {
        Self {
            timestamp: "timestamp".to_string(),
            moment_id: "momento_id".to_string(),
            altitude_level_id: "nivel_altitud_id".to_string(),
            signal_level_id: "nivel_senal_id".to_string(),
            speed_level_id: "nivel_velocidad_id".to_string(),
            operator_id: "operador_id".to_string(),
            network_id: "red_id".to_string(),
            district_id: "distrito_id".to_string(),
            device_id: "dispositivo_id".to_string(),
        }
    }
}

/// Immutable application configuration assembled at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub map: MapConfig,
    pub district: DistrictConfig,
    pub filter_fields: FilterFieldMap,
    /// Optional environment-wide cap on heatmap rows, independent of the
    /// dimension limit. `None` means no cap.
    pub heat_limit: Option<i64>,
    /// Heat clustering delta in degrees (~90 m at the default). Carried
    /// from the configuration surface but not applied to heatmap output;
    /// no server-side binning is performed.
    pub heat_delta: f64,
    /// Postgres connection string.
    pub database_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            district: DistrictConfig::default(),
            filter_fields: FilterFieldMap::default(),
            heat_limit: None,
            heat_delta: 0.0008,
            database_url: "postgres://localhost/geodash".to_string(),
        }
    }
}

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not an integer")]
    InvalidLimit { var: &'static str, value: String },
}

impl AppConfig {
    /// Loads defaults and applies environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] when `MAP_LIMIT` is set but
    /// not an integer. A non-numeric `MAP_HEAT_LIMIT` is ignored with a
    /// warning instead: the heat cap is best-effort by design.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults and applies overrides from an arbitrary lookup.
    ///
    /// Split out from [`Self::from_env`] so tests can inject variables
    /// without touching process-global environment state.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::from_env`].
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let set = |target: &mut String, key: &str| {
            if let Some(value) = get(key) {
                *target = value;
            }
        };

        set(&mut config.map.table, "MAP_TABLE");
        set(&mut config.map.name_field, "MAP_NAME_FIELD");
        set(&mut config.map.zone_field, "MAP_ZONE_FIELD");
        set(&mut config.map.district_field, "MAP_DISTRICT_FIELD");
        set(&mut config.map.lat_field, "MAP_LAT_FIELD");
        set(&mut config.map.lng_field, "MAP_LNG_FIELD");
        set(&mut config.map.value_field, "MAP_VALUE_FIELD");
        if let Some(clause) = get("MAP_WHERE_CLAUSE") {
            config.map.where_clause = Some(clause);
        }

        set(&mut config.district.table, "DISTRICT_TABLE");
        set(&mut config.district.id_field, "DISTRICT_ID_FIELD");
        set(&mut config.district.code_field, "DISTRICT_CODE_FIELD");
        set(&mut config.district.name_field, "DISTRICT_NAME_FIELD");
        set(&mut config.district.geojson_field, "DISTRICT_GEOJSON_FIELD");
        if let Some(clause) = get("DISTRICT_WHERE_CLAUSE") {
            config.district.where_clause = Some(clause);
        }

        set(&mut config.filter_fields.timestamp, "MAP_TIMESTAMP_FIELD");
        set(&mut config.filter_fields.moment_id, "MAP_MOMENT_FIELD");
        set(
            &mut config.filter_fields.altitude_level_id,
            "MAP_ALTITUDE_LEVEL_FIELD",
        );
        set(
            &mut config.filter_fields.signal_level_id,
            "MAP_SIGNAL_LEVEL_FIELD",
        );
        set(
            &mut config.filter_fields.speed_level_id,
            "MAP_SPEED_LEVEL_FIELD",
        );
        set(&mut config.filter_fields.operator_id, "MAP_OPERATOR_FIELD");
        set(&mut config.filter_fields.network_id, "MAP_NETWORK_FIELD");
        set(
            &mut config.filter_fields.district_id,
            "MAP_DISTRICT_ID_FIELD",
        );
        set(&mut config.filter_fields.device_id, "MAP_DEVICE_FIELD");

        if let Some(value) = get("MAP_LIMIT") {
            config.map.limit = value.parse().map_err(|_| ConfigError::InvalidLimit {
                var: "MAP_LIMIT",
                value,
            })?;
        }

        if let Some(value) = get("MAP_HEAT_LIMIT") {
            match value.parse() {
                Ok(limit) => config.heat_limit = Some(limit),
                Err(_) => {
                    tracing::warn!(value, "ignoring non-numeric MAP_HEAT_LIMIT");
                }
            }
        }

        if let Some(value) = get("MAP_HEAT_DELTA") {
            match value.parse() {
                Ok(delta) => config.heat_delta = delta,
                Err(_) => {
                    tracing::warn!(value, "ignoring non-numeric MAP_HEAT_DELTA");
                }
            }
        }

        set(&mut config.database_url, "DATABASE_URL");

        Ok(config)
    }
}

/// HTTP listener configuration, separate from report configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Allowed CORS origins. `"*"` allows any origin.
    pub cors_origins: Vec<String>,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl NetworkConfig {
    /// Loads defaults and applies `HOST`/`PORT` overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lookup-injected variant of [`Self::from_env`] for tests.
    #[must_use]
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT").and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins.split(',').map(str::to_string).collect();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.map.table, "dimensiones");
        assert_eq!(config.map.limit, 500);
        assert_eq!(config.district.table, "dimdistrito");
        assert_eq!(config.filter_fields.device_id, "dispositivo_id");
        assert!(config.heat_limit.is_none());
        assert!((config.heat_delta - 0.0008).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_apply() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MAP_TABLE", "readings"),
            ("MAP_ZONE_FIELD", "sector"),
            ("MAP_WHERE_CLAUSE", "activo = true"),
            ("MAP_LIMIT", "100"),
            ("DISTRICT_TABLE", "boundaries"),
            ("MAP_DEVICE_FIELD", "device"),
            ("MAP_HEAT_LIMIT", "2000"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.map.table, "readings");
        assert_eq!(config.map.zone_field, "sector");
        assert_eq!(config.map.where_clause.as_deref(), Some("activo = true"));
        assert_eq!(config.map.limit, 100);
        assert_eq!(config.district.table, "boundaries");
        assert_eq!(config.filter_fields.device_id, "device");
        assert_eq!(config.heat_limit, Some(2000));
    }

    #[test]
    fn invalid_map_limit_is_an_error() {
        let result = AppConfig::from_lookup(lookup(&[("MAP_LIMIT", "lots")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLimit {
                var: "MAP_LIMIT",
                ..
            })
        ));
    }

    #[test]
    fn invalid_heat_limit_is_ignored() {
        let config =
            AppConfig::from_lookup(lookup(&[("MAP_HEAT_LIMIT", "lots")])).expect("not fatal");
        assert!(config.heat_limit.is_none());
    }

    #[test]
    fn network_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 0);
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn network_overrides() {
        let config = NetworkConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://a.example,https://b.example"),
        ]));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
    }
}
