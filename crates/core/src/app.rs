// Supported host applications and their script conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::broadcast::Dialect;

/// Host application a generated script is destined for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppName {
    Animate,
    Photoshop,
    Illustrator,
    InDesign,
}

impl AppName {
    pub const ALL: [AppName; 4] =
        [AppName::Animate, AppName::Photoshop, AppName::Illustrator, AppName::InDesign];

    /// Directory name used for this app under the built-in scripts path.
    pub fn as_str(self) -> &'static str {
        match self {
            AppName::Animate => "animate",
            AppName::Photoshop => "photoshop",
            AppName::Illustrator => "illustrator",
            AppName::InDesign => "indesign",
        }
    }

    pub fn script_file_type(self) -> ScriptFileType {
        match self {
            AppName::Animate => ScriptFileType::Jsfl,
            AppName::Photoshop | AppName::Illustrator | AppName::InDesign => ScriptFileType::Jsx,
        }
    }

    pub fn dialect(self) -> Dialect {
        Dialect::for_app(self)
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported application `{0}` (expected one of: animate, photoshop, illustrator, indesign)")]
pub struct UnknownAppError(pub String);

impl FromStr for AppName {
    type Err = UnknownAppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        AppName::ALL
            .into_iter()
            .find(|app| app.as_str() == lower)
            .ok_or_else(|| UnknownAppError(s.to_string()))
    }
}

/// Script file flavour persisted for a host application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFileType {
    /// Animate's Flash JavaScript.
    Jsfl,
    /// ExtendScript, shared by the other apps.
    Jsx,
}

impl ScriptFileType {
    pub fn extension(self) -> &'static str {
        match self {
            ScriptFileType::Jsfl => "jsfl",
            ScriptFileType::Jsx => "jsx",
        }
    }
}
