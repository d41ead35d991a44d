use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CategoryProfile, CategoryTable, CategoryTableError};

/// On-disk layout for a custom category table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTableFile {
    #[serde(default = "default_category_name")]
    pub default_category: String,
    pub categories: Vec<CategoryProfile>,
}

fn default_category_name() -> String {
    CategoryTable::DEFAULT_CATEGORY.to_string()
}

impl CategoryTableFile {
    pub fn into_table(self) -> Result<CategoryTable, CategoryTableError> {
        CategoryTable::new(self.categories, &self.default_category)
    }
}

impl CategoryTable {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CategoryTableError> {
        let file: CategoryTableFile = serde_json::from_reader(reader)?;
        file.into_table()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CategoryTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}
