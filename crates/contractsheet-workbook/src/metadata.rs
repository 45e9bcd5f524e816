use serde::Serialize;

/// Shape of a template, as reported by the template-info endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkbookMetadata {
    pub sheets: Vec<SheetMetadata>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetMetadata {
    pub name: String,
    pub max_row: u32,
    pub max_column: u32,
    /// A1 strings such as `"C3:D3"`.
    pub merged_ranges: Vec<String>,
}

impl WorkbookMetadata {
    pub fn sheet(&self, name: &str) -> Option<&SheetMetadata> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
