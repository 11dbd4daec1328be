use std::fmt;
use std::str::FromStr;

/// Status of an issue document in the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingStatus {
    Open,
    Exempted,
    Closed,
}

impl FindingStatus {
    /// Statuses that are fetched when scoring an asset
    pub const ACTIONABLE: [FindingStatus; 2] = [FindingStatus::Open, FindingStatus::Exempted];

    pub fn as_str(self) -> &'static str {
        match self {
            FindingStatus::Open => "open",
            FindingStatus::Exempted => "exempted",
            FindingStatus::Closed => "closed",
        }
    }
}

impl FromStr for FindingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(FindingStatus::Open),
            "exempted" => Ok(FindingStatus::Exempted),
            "closed" => Ok(FindingStatus::Closed),
            _ => Err(format!("Invalid finding status: {}", s)),
        }
    }
}

impl fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current finding for one policy on one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub policy_id: String,
    pub status: FindingStatus,
    pub issue_id: String,
}

impl Finding {
    pub fn new(policy_id: impl Into<String>, status: FindingStatus, issue_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            status,
            issue_id: issue_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_names() {
        for status in [FindingStatus::Open, FindingStatus::Exempted, FindingStatus::Closed] {
            assert_eq!(status.as_str().parse::<FindingStatus>().unwrap(), status);
        }
        assert!("fixed".parse::<FindingStatus>().is_err());
    }
}
