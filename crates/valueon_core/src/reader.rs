//! Loading input snapshots from JSON or YAML documents.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::model::AnalysisInputs;

/// Document formats an input snapshot can be read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            other => Err(CoreError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Reader for input documents.
pub struct InputReader;

impl InputReader {
    pub fn from_str(content: &str, format: DocumentFormat) -> CoreResult<AnalysisInputs> {
        let inputs = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(inputs)
    }

    /// Read a snapshot from a `.json`, `.yaml` or `.yml` file.
    pub fn read_file(path: impl AsRef<Path>) -> CoreResult<AnalysisInputs> {
        let path = path.as_ref();
        debug!("Reading inputs from {:?}", path);

        let format = DocumentFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        Self::from_str(&content, format)
    }

    /// Serialize a snapshot in the given format.
    pub fn to_string(inputs: &AnalysisInputs, format: DocumentFormat) -> CoreResult<String> {
        let content = match format {
            DocumentFormat::Json => serde_json::to_string_pretty(inputs)?,
            DocumentFormat::Yaml => serde_yaml::to_string(inputs)?,
        };
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CalculationBasis, MemberTier, SiteArea};

    #[test]
    fn test_read_yaml_document() {
        let content = r#"
projectTarget:
  totalLandArea: 10
  totalFloorArea: "40"
advancedCategories:
  - id: land
    title: Land
    items:
      - id: l1
        name: Purchase
        amount: 1억
        calculationBasis: per_site_pyung
unitTypes:
  - id: u1
    name: 59 Type
    supplyArea: 25
unitAllocations:
  - id: a1
    unitTypeId: u1
    tier: 1st
    count: 3
"#;
        let inputs = InputReader::from_str(content, DocumentFormat::Yaml).unwrap();
        assert_eq!(inputs.project_target.total_floor_area, 40.0);
        let item = &inputs.advanced_categories[0].items[0];
        assert_eq!(item.amount, 100_000_000.0);
        assert_eq!(item.basis, CalculationBasis::PerSiteArea(SiteArea::Total));
        assert_eq!(inputs.unit_allocations[0].tier, MemberTier::First);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")).unwrap(), DocumentFormat::Yaml);
        assert!(DocumentFormat::from_path(Path::new("a.txt")).is_err());
    }
}
