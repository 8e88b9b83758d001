use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub fruit: String,
    pub color: String,
}

impl Fruit {
    pub fn new(fruit: &str, color: &str) -> Self {
        Self {
            fruit: fruit.into(),
            color: color.into(),
        }
    }
}
