//! URL scheme to database engine lookup.

pub const POSTGRESQL: &str = "django.db.backends.postgresql";
pub const POSTGIS: &str = "django.contrib.gis.db.backends.postgis";
pub const MYSQL: &str = "django.db.backends.mysql";
pub const MYSQL_GIS: &str = "django.contrib.gis.db.backends.mysql";
pub const MYSQL_CONNECTOR: &str = "mysql.connector.django";
pub const MSSQL: &str = "sql_server.pyodbc";
pub const MSSQL_MS: &str = "mssql";
pub const SPATIALITE: &str = "django.contrib.gis.db.backends.spatialite";
pub const SQLITE: &str = "django.db.backends.sqlite3";
pub const ORACLE: &str = "django.db.backends.oracle";
pub const ORACLE_GIS: &str = "django.contrib.gis.db.backends.oracle";
pub const REDSHIFT: &str = "django_redshift_backend";
pub const COCKROACH: &str = "django_cockroachdb";
pub const TIMESCALE: &str = "timescale.db.backends.postgresql";
pub const TIMESCALE_GIS: &str = "timescale.db.backends.postgis";

const SCHEMES: &[(&str, &str)] = &[
    ("postgres", POSTGRESQL),
    ("postgresql", POSTGRESQL),
    ("pgsql", POSTGRESQL),
    ("postgis", POSTGIS),
    ("mysql", MYSQL),
    ("mysql2", MYSQL),
    ("mysqlgis", MYSQL_GIS),
    ("mysql-connector", MYSQL_CONNECTOR),
    ("mssql", MSSQL),
    ("mssqlms", MSSQL_MS),
    ("spatialite", SPATIALITE),
    ("sqlite", SQLITE),
    ("oracle", ORACLE),
    ("oraclegis", ORACLE_GIS),
    ("redshift", REDSHIFT),
    ("cockroach", COCKROACH),
    ("timescale", TIMESCALE),
    ("timescalegis", TIMESCALE_GIS),
];

/// Returns the engine registered for `scheme`, if any.
pub fn for_scheme(scheme: &str) -> Option<&'static str> {
    SCHEMES
        .iter()
        .find(|(s, _)| *s == scheme)
        .map(|(_, engine)| *engine)
}

/// All supported schemes, in lookup order.
pub fn schemes() -> impl Iterator<Item = &'static str> {
    SCHEMES.iter().map(|(s, _)| *s)
}

/// Engines whose port must be passed as a string.
pub(crate) fn wants_string_port(engine: &str) -> bool {
    engine == ORACLE || engine == MSSQL
}

/// Engines that understand the `currentSchema` search path shortcut.
pub(crate) fn supports_search_path(engine: &str) -> bool {
    matches!(
        engine,
        POSTGRESQL | POSTGIS | TIMESCALE | TIMESCALE_GIS | REDSHIFT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_aliases() {
        for scheme in ["postgres", "postgresql", "pgsql"] {
            assert_eq!(for_scheme(scheme), Some(POSTGRESQL));
        }
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(for_scheme("mongodb"), None);
        assert_eq!(for_scheme("POSTGRES"), None);
    }

    #[test]
    fn test_every_scheme_resolves() {
        assert!(schemes().all(|s| for_scheme(s).is_some()));
    }
}
