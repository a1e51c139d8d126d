use serde::{Deserialize, Serialize};

/// Category used to classify and filter posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}
