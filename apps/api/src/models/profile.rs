use serde::{Deserialize, Serialize};

/// Contact details for the program's primary point of contact.
/// All fields optional — the enhancement call may or may not find them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSet {
    pub hard: Vec<String>,
    pub soft: Vec<String>,
}

/// The single workforce program profile driving the whole engine.
///
/// Produced by the profile-enhancement call; the partner lists are never
/// sent to the model and are merged in locally from the intake form.
/// Exactly one profile exists at a time; replaced wholesale on
/// re-submission and cleared by the reset engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceProfile {
    pub title: String,
    pub region: String,
    pub industries: Vec<String>,
    pub elevator_pitch: String,
    /// Economic and labor market overview of the region.
    pub geo_analytics: String,
    /// Annual salary range plus the hourly equivalent.
    pub wage_range: String,
    #[serde(default)]
    pub primary_contact_info: Option<ContactInfo>,
    /// Summary of the program URL content, when one was provided.
    #[serde(default)]
    pub site_summary: Option<String>,
    pub safety_assessment: String,
    pub skills: SkillSet,
    #[serde(default)]
    pub credentials: Vec<String>,
    pub target_job_titles: Vec<String>,
    pub start_date: String,
    #[serde(default)]
    pub cta_link: Option<String>,
    pub suggestions: Vec<String>,
    /// Active partners — excluded from discovery entirely.
    #[serde(default)]
    pub current_partners: Vec<String>,
    /// Lapsed partners — eligible for discovery with a reconnect tag.
    #[serde(default)]
    pub past_partners: Vec<String>,
}

impl WorkforceProfile {
    pub fn cta_or_default(&self) -> &str {
        self.cta_link
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Visit our official website")
    }
}
