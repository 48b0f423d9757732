use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The zone identifier is not known to the timezone database.
    InvalidZone(String),
    /// No instant in the zone maps to local midnight on January 1 of the year.
    UnresolvableLocalTime { zone: String, year: i32 },
    /// A catalog or configuration value is invalid.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidZone(zone) => write!(f, "Invalid zone: '{zone}' is not a known IANA time zone"),
            Error::UnresolvableLocalTime { zone, year } => {
                write!(f, "Unable to resolve {year}-01-01 00:00 in zone {zone}")
            }
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
