use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of authentication failures: `{"reasons": [...]}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReasonsBody {
    pub reasons: Vec<String>,
}

impl ReasonsBody {
    pub fn single(reason: impl Into<String>) -> Self {
        Self { reasons: vec![reason.into()] }
    }
}

/// Body of every other failure: `{"message": "..."}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
