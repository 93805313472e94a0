//! Resource tags applied to everything the run creates

/// Value of the `ManagedBy` tag
pub const MANAGED_BY: &str = "ebdeploy";

/// Tag set derived from a fixed naming prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTags {
    prefix: String,
}

impl ResourceTags {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `Name` tag value for a resource, e.g. `shop-public-1`
    pub fn name_for(&self, resource: &str) -> String {
        format!("{}-{}", self.prefix, resource)
    }

    /// Full key/value tag list for a resource
    pub fn for_resource(&self, resource: &str) -> Vec<(String, String)> {
        vec![
            ("Name".to_string(), self.name_for(resource)),
            ("ManagedBy".to_string(), MANAGED_BY.to_string()),
        ]
    }
}
