//! Privacy dashboard toggles and the derived score.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight toggles, in score order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivacySetting {
    ProfileVisibility,
    ActivityStatus,
    ReadReceipts,
    DataCollection,
    Personalization,
    LocationSharing,
    ContactSync,
    AnalyticsSharing,
}

impl PrivacySetting {
    pub const ALL: [Self; 8] = [
        Self::ProfileVisibility,
        Self::ActivityStatus,
        Self::ReadReceipts,
        Self::DataCollection,
        Self::Personalization,
        Self::LocationSharing,
        Self::ContactSync,
        Self::AnalyticsSharing,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::ProfileVisibility => "profileVisibility",
            Self::ActivityStatus => "activityStatus",
            Self::ReadReceipts => "readReceipts",
            Self::DataCollection => "dataCollection",
            Self::Personalization => "personalization",
            Self::LocationSharing => "locationSharing",
            Self::ContactSync => "contactSync",
            Self::AnalyticsSharing => "analyticsSharing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ProfileVisibility => "Public Profile",
            Self::ActivityStatus => "Activity Status",
            Self::ReadReceipts => "Read Receipts",
            Self::DataCollection => "Additional Data Collection",
            Self::Personalization => "Content Personalization",
            Self::LocationSharing => "Location Sharing",
            Self::ContactSync => "Contact Sync",
            Self::AnalyticsSharing => "Anonymous Analytics",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ProfileVisibility => "Allow others to find and view your profile",
            Self::ActivityStatus => "Show when you're online or active",
            Self::ReadReceipts => "Let others know when you've read their messages",
            Self::DataCollection => "Allow collection beyond essential functionality",
            Self::Personalization => "Use your activity to suggest relevant content",
            Self::LocationSharing => "Share your location with posts and profile",
            Self::ContactSync => "Find friends by syncing your contacts",
            Self::AnalyticsSharing => "Share anonymous usage data to improve the platform",
        }
    }

    pub fn recommended(self) -> bool {
        matches!(
            self,
            Self::ProfileVisibility | Self::ReadReceipts | Self::Personalization
        )
    }
}

impl fmt::Display for PrivacySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PrivacySetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], "");
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown privacy setting '{s}'"))
    }
}

/// A titled group of toggles on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacySection {
    pub title: &'static str,
    pub description: &'static str,
    pub settings: &'static [PrivacySetting],
}

pub const SECTIONS: [PrivacySection; 4] = [
    PrivacySection {
        title: "Profile & Visibility",
        description: "Control who can see your profile and activity",
        settings: &[PrivacySetting::ProfileVisibility, PrivacySetting::ActivityStatus],
    },
    PrivacySection {
        title: "Communication",
        description: "Manage how you communicate with others",
        settings: &[PrivacySetting::ReadReceipts],
    },
    PrivacySection {
        title: "Data & Privacy",
        description: "Control what data we collect and how it's used",
        settings: &[
            PrivacySetting::DataCollection,
            PrivacySetting::Personalization,
            PrivacySetting::AnalyticsSharing,
        ],
    },
    PrivacySection {
        title: "Location & Contacts",
        description: "Manage access to your location and contacts",
        settings: &[PrivacySetting::LocationSharing, PrivacySetting::ContactSync],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivacyRating {
    Excellent,
    Good,
    NeedsReview,
}

impl PrivacyRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else {
            Self::NeedsReview
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsReview => "Needs review",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! Your privacy settings are highly secure.",
            Self::Good => "Good! Consider reviewing some settings for better privacy.",
            Self::NeedsReview => "Review your settings to improve your privacy protection.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    values: [bool; 8],
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            values: [true, false, true, false, true, false, false, false],
        }
    }
}

impl PrivacySettings {
    pub fn from_values(values: [bool; 8]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> [bool; 8] {
        self.values
    }

    pub fn get(&self, setting: PrivacySetting) -> bool {
        self.values[setting.index()]
    }

    pub fn set(&mut self, setting: PrivacySetting, on: bool) {
        self.values[setting.index()] = on;
    }

    pub fn toggle(&mut self, setting: PrivacySetting) {
        let i = setting.index();
        self.values[i] = !self.values[i];
    }

    /// 12.5 points for every even position switched off and every odd
    /// position switched on.
    pub fn score(&self) -> f64 {
        let satisfied = self
            .values
            .iter()
            .enumerate()
            .filter(|(i, on)| if i % 2 == 0 { !**on } else { **on })
            .count();
        satisfied as f64 * 12.5
    }

    /// Score as shown on the dashboard ring.
    pub fn percentage(&self) -> u32 {
        self.score().round() as u32
    }

    pub fn rating(&self) -> PrivacyRating {
        PrivacyRating::from_score(self.score())
    }
}
