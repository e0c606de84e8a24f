use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque, comparable bag of defining attributes. Two entities with the
/// same name but different bags are reconciled by replacement.
pub type AttributeBag = BTreeMap<String, String>;

/// One entity that should exist downstream, as observed by the driver.
///
/// The name is the identity key and must be stable across observation
/// cycles; the caller supplies the complete desired set on every cycle,
/// never a delta.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DesiredEntity {
    pub name: String,
    #[serde(default, skip_serializing_if = "AttributeBag::is_empty")]
    pub attributes: AttributeBag,
}

impl DesiredEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeBag::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
