use serde::{Deserialize, Serialize};

/// One parsed hero descriptor. Every field is optional: a field the parser
/// could not find stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub schema_header: Option<String>,
    pub primary_name: Option<String>,
    pub display_name: Option<String>,
    pub skills_block: Option<String>,
}

impl Hero {
    /// Number of fields the parser managed to extract.
    pub fn field_count(&self) -> usize {
        [
            &self.schema_header,
            &self.primary_name,
            &self.display_name,
            &self.skills_block,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count()
    }
}

/// Generated descriptor for one combination of heroes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedDescriptor {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CombineResult {
    pub hero_count: usize,
    pub descriptors: Vec<SynthesizedDescriptor>,
}
