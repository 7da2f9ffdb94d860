use serde::{Deserialize, Serialize};

/// Podium highlight for the top three ranks.
///
/// | Rank | Medal  |
/// |------|--------|
/// | 1    | gold   |
/// | 2    | silver |
/// | 3    | bronze |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

pub fn medal(rank: usize) -> Option<Medal> {
    match rank {
        1 => Some(Medal::Gold),
        2 => Some(Medal::Silver),
        3 => Some(Medal::Bronze),
        _ => None,
    }
}

impl Medal {
    pub fn as_str(self) -> &'static str {
        match self {
            Medal::Gold => "gold",
            Medal::Silver => "silver",
            Medal::Bronze => "bronze",
        }
    }
}
