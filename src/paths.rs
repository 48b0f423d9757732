use std::path::PathBuf;

/// Returns the user's home directory using common environment variables.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("MIDNIGHT_LINE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(PathBuf::from)
        })
}

/// Returns the data directory holding the catalog override and log files.
pub fn data_dir() -> PathBuf {
    if let Some(mut dir) = home_dir() {
        dir.push(".midnight-line");
        dir
    } else {
        PathBuf::from(".midnight-line")
    }
}

pub fn default_catalog_path() -> PathBuf {
    data_dir().join("zones.yaml")
}

pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}
