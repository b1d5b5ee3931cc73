use serde::{Deserialize, Serialize};

/// Rationale prefix marking a resurfaced past partner.
pub const RECONNECT_MARKER: &str = "[RECONNECT]";

/// Outreach strategy category assigned to every discovered employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutreachSegment {
    #[serde(rename = "Strategic Partner")]
    StrategicPartner,
    #[serde(rename = "High-Volume Hirer")]
    HighVolumeHirer,
    #[serde(rename = "Emerging Growth")]
    EmergingGrowth,
    #[serde(rename = "Community Anchor")]
    CommunityAnchor,
}

impl OutreachSegment {
    pub const ALL: [OutreachSegment; 4] = [
        OutreachSegment::StrategicPartner,
        OutreachSegment::HighVolumeHirer,
        OutreachSegment::EmergingGrowth,
        OutreachSegment::CommunityAnchor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutreachSegment::StrategicPartner => "Strategic Partner",
            OutreachSegment::HighVolumeHirer => "High-Volume Hirer",
            OutreachSegment::EmergingGrowth => "Emerging Growth",
            OutreachSegment::CommunityAnchor => "Community Anchor",
        }
    }

    /// Comma-joined list for prompt interpolation.
    pub fn prompt_list() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One discovered candidate employer. `name` is the unique key within a
/// discovery batch and the join key into the outreach cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerMatch {
    pub name: String,
    /// Composite 0-100 alignment score.
    pub score: f64,
    pub rationale: String,
    pub segment: OutreachSegment,
    pub industry_alignment: f64,
    pub job_title_overlap: f64,
    pub skill_overlap: f64,
    pub geographic_proximity: f64,
    pub hiring_signals: f64,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub employee_count: Option<String>,
}

impl EmployerMatch {
    /// True when this match is a past partner resurfaced for reconnection.
    pub fn is_reconnect(&self) -> bool {
        self.rationale.starts_with(RECONNECT_MARKER)
    }

    /// The rationale as shown to the user, with the reconnect marker removed.
    pub fn display_rationale(&self) -> &str {
        self.rationale
            .strip_prefix(RECONNECT_MARKER)
            .map(str::trim_start)
            .unwrap_or(&self.rationale)
    }
}
