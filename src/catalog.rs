//! Static department and service directory

use crate::config::CatalogConfig;
use crate::error::{AppError, Result};
use crate::models::{ActionRef, DepartmentRecord, ServiceRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Departments and services searched alongside live complaints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub departments: Vec<DepartmentRecord>,

    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}

impl Catalog {
    pub fn new(departments: Vec<DepartmentRecord>, services: Vec<ServiceRecord>) -> Self {
        Self {
            departments,
            services,
        }
    }

    /// Directory shipped with the portal
    pub fn builtin() -> Self {
        let departments = vec![
            DepartmentRecord::new(
                "dept-public-works",
                "Public Works",
                "Roads, street lights, drains and public buildings",
                "1800-425-1000",
            )
            .with_services(vec!["Road repair", "Street light maintenance", "Drain cleaning"]),
            DepartmentRecord::new(
                "dept-water-supply",
                "Water Supply",
                "Drinking water distribution, pipelines and tanker requests",
                "1916",
            )
            .with_services(vec!["New water connection", "Pipeline leakage", "Water tanker"]),
            DepartmentRecord::new(
                "dept-electricity",
                "Electricity",
                "Power supply, meters and billing",
                "1912",
            )
            .with_services(vec!["New connection", "Meter replacement", "Bill correction"]),
            DepartmentRecord::new(
                "dept-health",
                "Health",
                "Government hospitals, primary health centres and vaccination",
                "104",
            )
            .with_services(vec!["Hospital services", "Vaccination camps"]),
            DepartmentRecord::new(
                "dept-education",
                "Education",
                "Government schools, scholarships and mid-day meals",
                "1800-180-5000",
            )
            .with_services(vec!["Scholarship status", "School admission"]),
            DepartmentRecord::new(
                "dept-police",
                "Police",
                "Law and order, traffic and cyber crime",
                "100",
            )
            .with_services(vec!["FIR registration", "Traffic complaints", "Cyber crime"]),
            DepartmentRecord::new(
                "dept-sanitation",
                "Municipal Sanitation",
                "Garbage collection, public toilets and cleanliness drives",
                "1800-121-2020",
            )
            .with_services(vec!["Garbage pickup", "Public toilet maintenance"]),
            DepartmentRecord::new(
                "dept-revenue",
                "Revenue",
                "Land records, certificates and property tax",
                "1800-425-3333",
            )
            .with_services(vec!["Income certificate", "Land records", "Property tax"]),
        ];

        let services = vec![
            ServiceRecord::new(
                "svc-cm-helpline",
                "CM Helpline",
                "Register complaints directly with the Chief Minister's office",
                "Helpline",
                ActionRef::tel("1076"),
            ),
            ServiceRecord::new(
                "svc-ambulance",
                "Ambulance",
                "Emergency medical transport",
                "Emergency",
                ActionRef::tel("108"),
            ),
            ServiceRecord::new(
                "svc-police",
                "Police Emergency",
                "Immediate police assistance",
                "Emergency",
                ActionRef::tel("100"),
            ),
            ServiceRecord::new(
                "svc-fire",
                "Fire Services",
                "Fire and rescue emergencies",
                "Emergency",
                ActionRef::tel("101"),
            ),
            ServiceRecord::new(
                "svc-women-helpline",
                "Women Helpline",
                "Support for women in distress",
                "Helpline",
                ActionRef::tel("1091"),
            ),
            ServiceRecord::new(
                "svc-child-helpline",
                "Child Helpline",
                "Help for children in need of care and protection",
                "Helpline",
                ActionRef::tel("1098"),
            ),
            ServiceRecord::new(
                "svc-electricity-complaints",
                "Electricity Complaints",
                "Report power cuts, faulty meters and billing issues",
                "Utilities",
                ActionRef::tel("1912"),
            ),
            ServiceRecord::new(
                "svc-water-complaints",
                "Water Supply Complaints",
                "Report leakages, contamination and supply interruptions",
                "Utilities",
                ActionRef::tel("1916"),
            ),
        ];

        Self::new(departments, services)
    }

    /// Parse a catalog from TOML (`[[departments]]` / `[[services]]` tables)
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON
    pub fn from_json_str(s: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let catalog = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => {
                return Err(AppError::Configuration(format!(
                    "Unsupported catalog format: {}",
                    path.display()
                )))
            }
        };

        info!(
            path = %path.display(),
            departments = catalog.departments.len(),
            services = catalog.services.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Catalog named by configuration, or the built-in one
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::load(path),
            None => {
                debug!("Using built-in catalog");
                Ok(Self::builtin())
            }
        }
    }

    /// Reject empty or duplicate IDs within each list
    pub fn validate(&self) -> Result<()> {
        check_ids("department", self.departments.iter().map(|d| d.id.as_str()))?;
        check_ids("service", self.services.iter().map(|s| s.id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.departments.len() + self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty() && self.services.is_empty()
    }
}

fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(AppError::Validation(format!("{} with empty id", kind)));
        }
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("duplicate {} id: {}", kind, id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.departments.len(), 8);
        assert_eq!(catalog.services.len(), 8);
        assert!(catalog.validate().is_ok());

        let cm = catalog
            .services
            .iter()
            .find(|s| s.name == "CM Helpline")
            .unwrap();
        assert_eq!(cm.action.dial_number(), Some("1076"));
    }

    #[test]
    fn test_from_toml_str() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[departments]]
            id = "pwd"
            name = "Public Works"
            description = "roads, lights"
            contact = "1800-425-1000"

            [[services]]
            id = "cm"
            name = "CM Helpline"
            category = "Helpline"
            action = "tel:1076"
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.departments[0].services.is_empty());
        assert!(catalog.services[0].action.is_dial());
    }

    #[test]
    fn test_from_json_str_rejects_duplicate_ids() {
        let err = Catalog::from_json_str(
            r#"{"departments": [
                {"id": "pwd", "name": "Public Works"},
                {"id": "pwd", "name": "Roads"}
            ]}"#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_from_config_defaults_to_builtin() {
        let catalog = Catalog::from_config(&CatalogConfig::default()).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, "departments: []").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
