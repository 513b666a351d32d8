use std::path::PathBuf;

/// Database file used when `DB_URI` is unset.
pub const DEFAULT_DB_FILE: &str = "app.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5555;

/// Turn a `DB_URI` value into a filesystem path.
///
/// Accepts a plain path or a SQLAlchemy-style `sqlite:///relative/or/abs` URI.
/// Returns `DEFAULT_DB_FILE` when no value is given.
pub fn resolve_db_path(uri: Option<&str>) -> Result<PathBuf, String> {
    let Some(uri) = uri.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(PathBuf::from(DEFAULT_DB_FILE));
    };

    let path = match uri.split_once("://") {
        Some(("sqlite", rest)) => rest.strip_prefix('/').unwrap_or(rest),
        Some((scheme, _)) => return Err(format!("unsupported database scheme: {scheme}")),
        None => uri,
    };

    if path.is_empty() || path == ":memory:" {
        return Err(format!("database URI has no file path: {uri}"));
    }
    Ok(PathBuf::from(path))
}
