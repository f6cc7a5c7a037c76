//! Build information module
//!
//! Values stamped in by `build.rs`, with fallbacks for builds that skip it.

use serde::Serialize;

/// Running build number
pub const BUILD_NUMBER: u64 = match option_env!("TRIFIT_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// UTC build time, RFC 3339
pub const BUILD_TIMESTAMP: &str = env_or_unknown(option_env!("TRIFIT_BUILD_TIMESTAMP"));

/// Cargo profile, `debug` or `release`
pub const BUILD_PROFILE: &str = env_or_unknown(option_env!("TRIFIT_BUILD_PROFILE"));

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const fn env_or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(s) => s,
        None => "unknown",
    }
}

/// Decimal digits only; `None` on anything else or on overflow
const fn parse_u64(s: &str) -> Option<u64> {
    let digits = s.as_bytes();
    if digits.is_empty() {
        return None;
    }
    let mut acc: u64 = 0;
    let mut i = 0;
    while i < digits.len() {
        let d = digits[i];
        if !d.is_ascii_digit() {
            return None;
        }
        acc = match acc.checked_mul(10) {
            Some(v) => match v.checked_add((d - b'0') as u64) {
                Some(v) => v,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(acc)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            profile: BUILD_PROFILE,
            description: DESCRIPTION,
        }
    }

    /// `trifit 1.0.0 (build 12, release)`
    pub fn summary(&self) -> String {
        format!(
            "{} {} (build {}, {})",
            self.name, self.version, self.build_number, self.profile
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("-----------------------------------------------");
    eprintln!(" TriFit: nutrition, fasting, workouts");
    eprintln!(" {}", info.summary());
    eprintln!(" compiled {}", info.build_timestamp);
    eprintln!("-----------------------------------------------");
}
