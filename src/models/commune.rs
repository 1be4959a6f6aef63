use serde::{Deserialize, Serialize};

/// Commune candidate returned by the geocoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commune {
    /// INSEE code
    pub code: String,
    #[serde(default)]
    pub nom: Option<String>,
}
