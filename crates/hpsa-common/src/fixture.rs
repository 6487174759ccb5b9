//! Fixture tables mapping symbolic element names to selectors.
//!
//! Three JSON files drive a run:
//! - `hpsa.json`: onboarding ("welcome") elements
//! - `dashboard.json`: dashboard elements
//! - `profile.json`: sign-in accounts
//!
//! Keys are accepted in lower or capitalised case (`welcome`/`Welcome`,
//! `name`/`Name`, `nth`/`NTH`) so existing fixture files load unchanged.

use crate::error::FixtureError;
use crate::selector::{ElementDescriptor, Selector};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub const WELCOME_FILE: &str = "hpsa.json";
pub const DASHBOARD_FILE: &str = "dashboard.json";
pub const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, Deserialize)]
struct ElementRecord {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Class")]
    class: String,
    #[serde(default, alias = "NTH", alias = "Nth")]
    nth: usize,
}

/// Top-level object of a table file, keyed by table label.
type TableFile = HashMap<String, Vec<ElementRecord>>;

/// Records under `label`, matched without regard to case. Another table's
/// key is not accepted.
fn take_table(
    mut file: TableFile,
    label: &str,
    path: &Path,
) -> Result<Vec<ElementRecord>, FixtureError> {
    let key = file
        .keys()
        .find(|key| key.eq_ignore_ascii_case(label))
        .cloned()
        .ok_or_else(|| FixtureError::MissingTable {
            path: path.to_path_buf(),
            table: label.to_string(),
        })?;
    Ok(file.remove(&key).unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(alias = "Profile")]
    profile: Vec<Profile>,
}

/// Read-only lookup table of element descriptors.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    label: String,
    entries: HashMap<String, ElementDescriptor>,
}

impl ElementTable {
    pub fn load(label: &str, path: &Path) -> Result<Self, FixtureError> {
        let file: TableFile = read_json(path)?;
        let records = take_table(file, label, path)?;
        Ok(Self::from_records(label, records))
    }

    pub fn from_json(label: &str, json: &str) -> Result<Self, FixtureError> {
        let file: TableFile = serde_json::from_str(json).map_err(|source| FixtureError::Parse {
            path: label.into(),
            source,
        })?;
        let records = take_table(file, label, Path::new(label))?;
        Ok(Self::from_records(label, records))
    }

    fn from_records(label: &str, records: Vec<ElementRecord>) -> Self {
        let mut entries = HashMap::with_capacity(records.len());
        for record in records {
            // First definition wins when a name repeats.
            entries.entry(record.name.clone()).or_insert_with(|| {
                ElementDescriptor::new(record.name, Selector::class(record.class), record.nth)
            });
        }
        Self {
            label: label.to_string(),
            entries,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a descriptor by symbolic name. Absent names and blank selectors
    /// are configuration errors.
    pub fn get(&self, name: &str) -> Result<&ElementDescriptor, FixtureError> {
        let descriptor = self
            .entries
            .get(name)
            .ok_or_else(|| FixtureError::MissingElement {
                table: self.label.clone(),
                name: name.to_string(),
            })?;
        if descriptor.selector.is_empty() {
            return Err(FixtureError::EmptySelector {
                table: self.label.clone(),
                name: name.to_string(),
            });
        }
        Ok(descriptor)
    }
}

/// Account used by the sign-in flows.
#[derive(Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    profiles: Vec<Profile>,
}

impl ProfileTable {
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let file: ProfileFile = read_json(path)?;
        Ok(Self {
            profiles: file.profile,
        })
    }

    pub fn get(&self, id: &str) -> Result<&Profile, FixtureError> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| FixtureError::MissingProfile(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// All fixture tables for one run.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub welcome: ElementTable,
    pub dashboard: ElementTable,
    pub profiles: ProfileTable,
}

impl Fixtures {
    /// Load `hpsa.json`, `dashboard.json` and, when present, `profile.json`
    /// from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, FixtureError> {
        let welcome = ElementTable::load("welcome", &dir.join(WELCOME_FILE))?;
        let dashboard = ElementTable::load("dashboard", &dir.join(DASHBOARD_FILE))?;
        let profile_path = dir.join(PROFILE_FILE);
        let profiles = if profile_path.exists() {
            ProfileTable::load(&profile_path)?
        } else {
            ProfileTable::default()
        };
        Ok(Self {
            welcome,
            dashboard,
            profiles,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
