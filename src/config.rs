//! Harness configuration from the environment (and an optional `.env`).
//!
//! | variable             | meaning                                   |
//! |----------------------|-------------------------------------------|
//! | `REFPROP_PATH`       | directory holding the REFPROP library     |
//! | `REFPROP_CONVENTION` | `legacy` (default) or `modern`            |

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Once;

use serde::Serialize;
use tracing::debug;

use crate::error::*;

/// Which REFPROP calling convention a harness evaluates through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// SETUPdll, SATTdll, TPFLSHdll … in K, kPa and molar units.
    #[default]
    Legacy,
    /// `REFPROPdll` in English units.
    Modern,
}

impl FromStr for Convention {
    type Err = RefpropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "modern" => Ok(Self::Modern),
            other => Err(RefpropError::InvalidInput(format!(
                "unknown calling convention \"{other}\" (expected legacy or modern)"
            ))),
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Modern => write!(f, "modern"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub convention: Convention,
    pub refprop_path: PathBuf,
}

impl HarnessConfig {
    pub fn new(convention: Convention, refprop_path: impl Into<PathBuf>) -> Self {
        Self { convention, refprop_path: refprop_path.into() }
    }

    /// Read `REFPROP_CONVENTION` and locate REFPROP.
    pub fn from_env() -> Result<Self> {
        let convention = convention_from_env()?;
        let refprop_path = find_refprop_path()?;
        debug!(%convention, path = %refprop_path.display(), "harness configuration");
        Ok(Self { convention, refprop_path })
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_refprop_path(mut self, refprop_path: impl Into<PathBuf>) -> Self {
        self.refprop_path = refprop_path.into();
        self
    }
}

/// Load `.env` once: working directory, then the crate root, then next
/// to the executable. Already-set variables are never overridden.
pub fn load_dotenv() {
    static DOTENV_INIT: Once = Once::new();
    DOTENV_INIT.call_once(|| {
        if dotenvy::dotenv().is_ok() {
            return;
        }
        if let Ok(dir) = env::var("CARGO_MANIFEST_DIR") {
            let p = PathBuf::from(dir).join(".env");
            if p.exists() {
                let _ = dotenvy::from_path(&p);
                return;
            }
        }
        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                let p = dir.join(".env");
                if p.exists() {
                    let _ = dotenvy::from_path(&p);
                }
            }
        }
    });
}

/// `REFPROP_CONVENTION`, or the default when unset or blank.
pub fn convention_from_env() -> Result<Convention> {
    load_dotenv();
    match env::var("REFPROP_CONVENTION") {
        Ok(value) if !value.trim().is_empty() => value.parse(),
        _ => Ok(Convention::default()),
    }
}

/// `REFPROP_PATH` if it exists, else the first standard install
/// location that does.
pub fn find_refprop_path() -> Result<PathBuf> {
    load_dotenv();
    let mut tried = Vec::<String>::new();

    if let Ok(path) = env::var("REFPROP_PATH") {
        if Path::new(&path).exists() {
            return Ok(PathBuf::from(path));
        }
        tried.push(format!("REFPROP_PATH={path} (directory does not exist)"));
    }

    for path in standard_paths() {
        if Path::new(path).exists() {
            return Ok(PathBuf::from(path));
        }
        tried.push(format!("{path} (not found)"));
    }

    Err(RefpropError::EngineUnavailable(format!(
        "REFPROP directory not found. Tried:\n  - {}\n\
         Set REFPROP_PATH to the directory containing the REFPROP library and the fluids/ folder.",
        tried.join("\n  - ")
    )))
}

fn standard_paths() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[r"C:\Program Files (x86)\REFPROP", r"C:\Program Files\REFPROP"]
    } else if cfg!(target_os = "macos") {
        &["/Applications/REFPROP", "/opt/refprop"]
    } else {
        &["/opt/refprop", "/usr/local/lib/refprop"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convention_parsing() {
        assert_eq!("legacy".parse::<Convention>().unwrap(), Convention::Legacy);
        assert_eq!(" Modern ".parse::<Convention>().unwrap(), Convention::Modern);
        assert!(matches!(
            "refprop9".parse::<Convention>(),
            Err(RefpropError::InvalidInput(_))
        ));
        assert_eq!(Convention::default(), Convention::Legacy);
    }

    #[test]
    fn builders() {
        let config = HarnessConfig::new(Convention::Legacy, "/opt/refprop")
            .with_convention(Convention::Modern)
            .with_refprop_path("/tmp/rp");
        assert_eq!(config.convention, Convention::Modern);
        assert_eq!(config.refprop_path, PathBuf::from("/tmp/rp"));
    }
}
