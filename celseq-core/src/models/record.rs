use std::collections::HashMap;

use crate::models::GenomicInterval;

///
/// One feature line of an annotation (GTF/GFF) file: the feature type
/// (third column), its interval and the attribute column parsed into a map.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub feature_type: String,
    pub interval: GenomicInterval,
    pub attributes: HashMap<String, String>,
}

impl AnnotationRecord {
    pub fn new(
        feature_type: impl Into<String>,
        interval: GenomicInterval,
        attributes: HashMap<String, String>,
    ) -> Self {
        AnnotationRecord {
            feature_type: feature_type.into(),
            interval,
            attributes,
        }
    }

    ///
    /// Look up an attribute value by name.
    ///
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
