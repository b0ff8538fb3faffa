//! # Project Data Structures
//!
//! The `EngineProject` struct is the root container for a design session:
//! the engines and ducts being compared, plus metadata and shared defaults.
//! It lives in memory and serializes to JSON for whatever transport the
//! consumer uses; the core itself never touches disk.
//!
//! ## Structure
//!
//! ```text
//! EngineProject
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (duct temperatures, efficiency defaults)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use crank_core::project::EngineProject;
//!
//! let project = EngineProject::new("Jane Engineer", "26-042", "Works Team");
//!
//! // Serialize to JSON for transmission
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::CalculationItem;

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map so a comparison screen can hold
/// any number of engines side by side without ordering constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineProject {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (duct temperatures, efficiency defaults)
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl EngineProject {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use crank_core::project::EngineProject;
    ///
    /// let project = EngineProject::new("John Doe", "26-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        EngineProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project. Returns the UUID assigned to
    /// the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Get a calculation item by ID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Remove a calculation item. Returns the item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let removed = self.items.remove(id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Items of a given calculation type, for comparison views.
    pub fn items_of_type(&self, calc_type: &str) -> Vec<(&Uuid, &CalculationItem)> {
        self.items
            .iter()
            .filter(|(_, item)| item.calc_type() == calc_type)
            .collect()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Project identification and audit metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of this project
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number (e.g., "26-001")
    pub job_id: String,

    /// Client or team name
    pub client: String,

    /// Creation timestamp (UTC)
    pub created: DateTime<Utc>,

    /// Last modification timestamp (UTC)
    pub modified: DateTime<Utc>,
}

/// Shared defaults applied to new calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Default intake charge temperature in °C
    pub intake_temperature_c: f64,

    /// Default exhaust gas temperature in °C
    pub exhaust_temperature_c: f64,

    /// Default volumetric efficiency ratio
    pub volumetric_efficiency: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            intake_temperature_c: 50.0,
            exhaust_temperature_c: 900.0,
            volumetric_efficiency: 0.95,
        }
    }
}
