use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::models::employer::EmployerMatch;
use crate::models::linkedin::LinkedInPost;
use crate::models::outreach::OutreachAssets;
use crate::models::profile::WorkforceProfile;
use crate::narration::NarrationController;
use crate::sessions::{ConversationSession, SessionKind};
use crate::workflow::{can_enter, Step};

/// The whole engine state behind one lock: single profile, the discovery
/// batch, per-entity caches and the three chat sessions. Handlers replace
/// whole values; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub step: Step,
    pub profile: Option<WorkforceProfile>,
    pub matches: Vec<EmployerMatch>,
    /// Employer names marked selected; empty means "show all".
    pub selected: BTreeSet<String>,
    /// Outreach packages keyed by employer name. Regeneration overwrites.
    pub outreach: HashMap<String, OutreachAssets>,
    pub posts: Vec<LinkedInPost>,
    /// Post indices with a graphic generation in flight.
    pub generating_images: HashSet<usize>,
    pub market: ConversationSession,
    pub support: ConversationSession,
    pub assistant: ConversationSession,
    pub narration: NarrationController,
    /// Bumped by every reset; in-flight handlers compare against their
    /// captured value and discard late gateway results.
    pub epoch: u64,
}

impl Default for EngineState {
    fn default() -> Self {
        EngineState {
            step: Step::Landing,
            profile: None,
            matches: Vec::new(),
            selected: BTreeSet::new(),
            outreach: HashMap::new(),
            posts: Vec::new(),
            generating_images: HashSet::new(),
            market: ConversationSession::new(),
            support: ConversationSession::new(),
            assistant: ConversationSession::with_greeting(),
            narration: NarrationController::default(),
            epoch: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_matches: usize,
    /// Matches scoring 85 or above.
    pub high_alignment: usize,
    pub campaigns_built: usize,
    pub avg_score: i64,
    pub social_ready: usize,
    pub segments: BTreeMap<String, usize>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarded navigation. Every successful transition stops narration;
    /// guarded steps are rejected until a profile exists.
    pub fn navigate(&mut self, target: Step) -> bool {
        if !can_enter(target, self.profile.is_some()) {
            return false;
        }
        self.narration.stop();
        self.step = target;
        true
    }

    /// The atomic reset engine: clears every slice unconditionally, stops
    /// narration and lands on the caller-supplied target step.
    pub fn perform_reset(&mut self, target: Step) {
        self.profile = None;
        self.matches.clear();
        self.selected.clear();
        self.outreach.clear();
        self.posts.clear();
        self.generating_images.clear();
        self.market.clear();
        self.support.clear();
        self.assistant.clear();
        self.narration.stop();
        self.epoch += 1;
        self.step = target;
    }

    pub fn session_mut(&mut self, kind: SessionKind) -> &mut ConversationSession {
        match kind {
            SessionKind::Market => &mut self.market,
            SessionKind::Support => &mut self.support,
            SessionKind::Assistant => &mut self.assistant,
        }
    }

    pub fn session(&self, kind: SessionKind) -> &ConversationSession {
        match kind {
            SessionKind::Market => &self.market,
            SessionKind::Support => &self.support,
            SessionKind::Assistant => &self.assistant,
        }
    }

    pub fn toggle_selection(&mut self, name: &str) {
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
    }

    /// Outreach view filter: empty selection shows everything, otherwise
    /// only the selected matches, in batch order.
    pub fn filtered_matches(&self) -> Vec<&EmployerMatch> {
        if self.selected.is_empty() {
            self.matches.iter().collect()
        } else {
            self.matches
                .iter()
                .filter(|m| self.selected.contains(&m.name))
                .collect()
        }
    }

    pub fn find_match(&self, name: &str) -> Option<&EmployerMatch> {
        self.matches.iter().find(|m| m.name == name)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        let total_matches = self.matches.len();
        let high_alignment = self.matches.iter().filter(|m| m.score >= 85.0).count();
        let avg_score = if total_matches > 0 {
            (self.matches.iter().map(|m| m.score).sum::<f64>() / total_matches as f64).round()
                as i64
        } else {
            0
        };
        let mut segments = BTreeMap::new();
        for m in &self.matches {
            *segments.entry(m.segment.as_str().to_string()).or_insert(0) += 1;
        }
        DashboardStats {
            total_matches,
            high_alignment,
            campaigns_built: self.outreach.len(),
            avg_score,
            social_ready: self.posts.len(),
            segments,
        }
    }

    /// Suggested hashtags: a fixed base set plus the profile industries
    /// with whitespace removed, de-duplicated in order.
    pub fn hashtag_bank(&self) -> Vec<String> {
        let base = [
            "Workforce",
            "WorkforceDevelopment",
            "LocalHiring",
            "FutureOfWork",
            "SkillsGap",
            "CommunityImpact",
            "TalentPipeline",
        ];
        let mut seen = HashSet::new();
        let mut bank: Vec<String> = Vec::new();
        for tag in base {
            if seen.insert(tag.to_string()) {
                bank.push(tag.to_string());
            }
        }
        if let Some(profile) = &self.profile {
            for industry in &profile.industries {
                let tag: String = industry.split_whitespace().collect();
                if !tag.is_empty() && seen.insert(tag.clone()) {
                    bank.push(tag);
                }
            }
        }
        bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employer::OutreachSegment;
    use crate::models::profile::SkillSet;

    pub(crate) fn sample_profile() -> WorkforceProfile {
        WorkforceProfile {
            title: "Welding Tech".to_string(),
            region: "Tulsa".to_string(),
            industries: vec!["Manufacturing".to_string(), "Oil & Gas".to_string()],
            elevator_pitch: "Pipeline of certified welders.".to_string(),
            geo_analytics: "Strong regional demand.".to_string(),
            wage_range: "$55,000 - $75,000/yr | $26.44 - $36.05/hr".to_string(),
            primary_contact_info: None,
            site_summary: None,
            safety_assessment: "OSHA-10 required.".to_string(),
            skills: SkillSet {
                hard: vec!["MIG welding".to_string()],
                soft: vec!["Teamwork".to_string()],
            },
            credentials: vec![],
            target_job_titles: vec!["Welder".to_string()],
            start_date: "2026-09-01".to_string(),
            cta_link: Some("https://example.org/welding".to_string()),
            suggestions: vec![],
            current_partners: vec!["Acme Corp".to_string()],
            past_partners: vec!["Tulsa Steel".to_string()],
        }
    }

    fn sample_match(name: &str, score: f64, segment: OutreachSegment) -> EmployerMatch {
        EmployerMatch {
            name: name.to_string(),
            score,
            rationale: "Strong fit".to_string(),
            segment,
            industry_alignment: 25.0,
            job_title_overlap: 20.0,
            skill_overlap: 20.0,
            geographic_proximity: 10.0,
            hiring_signals: 10.0,
            website: None,
            phone: None,
            contact_email: None,
            employee_count: None,
        }
    }

    fn populated_state() -> EngineState {
        let mut state = EngineState::new();
        state.profile = Some(sample_profile());
        state.step = Step::Report;
        state.matches = vec![
            sample_match("Alpha Fab", 91.0, OutreachSegment::StrategicPartner),
            sample_match("Beta Mills", 72.0, OutreachSegment::EmergingGrowth),
            sample_match("Gamma Works", 86.0, OutreachSegment::StrategicPartner),
        ];
        state.selected.insert("Beta Mills".to_string());
        state.outreach.insert(
            "Alpha Fab".to_string(),
            OutreachAssets {
                primary_email: "email".to_string(),
                follow_ups: vec!["f1".to_string(), "f2".to_string(), "f3".to_string()],
                call_script: vec!["open".to_string()],
                subject_lines: vec!["s1".to_string(), "s2".to_string(), "s3".to_string()],
                linked_in_message: "dm".to_string(),
            },
        );
        state.generating_images.insert(3);
        state.market.push_user("leads?");
        state.support.push_user("help");
        state.assistant.push_user("hi");
        state
    }

    #[test]
    fn reset_clears_every_slice_and_lands_on_target() {
        let mut state = populated_state();
        let epoch_before = state.epoch;
        state.perform_reset(Step::Intake);

        assert!(state.profile.is_none());
        assert!(state.matches.is_empty());
        assert!(state.selected.is_empty());
        assert!(state.outreach.is_empty());
        assert!(state.posts.is_empty());
        assert!(state.generating_images.is_empty());
        assert!(state.market.messages.is_empty());
        assert!(state.support.messages.is_empty());
        assert!(state.assistant.is_empty());
        assert!(state.narration.speaking_text().is_none());
        assert_eq!(state.step, Step::Intake);
        assert_eq!(state.epoch, epoch_before + 1);
    }

    #[test]
    fn reset_is_total_from_any_starting_point() {
        let mut state = EngineState::new();
        state.perform_reset(Step::Landing);
        assert_eq!(state.step, Step::Landing);
        assert!(state.matches.is_empty());
    }

    #[test]
    fn navigation_guard_blocks_without_profile() {
        let mut state = EngineState::new();
        assert!(!state.navigate(Step::Report));
        assert_eq!(state.step, Step::Landing);

        state.profile = Some(sample_profile());
        assert!(state.navigate(Step::Report));
        assert_eq!(state.step, Step::Report);
    }

    #[test]
    fn navigation_stops_narration() {
        let mut state = EngineState::new();
        state.profile = Some(sample_profile());
        state.narration.begin("read me");
        assert!(state.navigate(Step::Outreach));
        assert!(state.narration.speaking_text().is_none());
        assert!(!state.narration.loading);
    }

    #[test]
    fn empty_selection_shows_all_matches_in_order() {
        let mut state = populated_state();
        state.selected.clear();
        let names: Vec<&str> = state.filtered_matches().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Fab", "Beta Mills", "Gamma Works"]);
    }

    #[test]
    fn selection_filters_without_deleting_matches() {
        let mut state = populated_state();
        let names: Vec<&str> = state.filtered_matches().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Beta Mills"]);

        state.toggle_selection("Beta Mills");
        assert!(state.selected.is_empty());
        assert_eq!(state.matches.len(), 3);
        assert_eq!(state.filtered_matches().len(), 3);
    }

    #[test]
    fn selection_toggle_round_trips() {
        let mut state = populated_state();
        state.toggle_selection("Alpha Fab");
        assert!(state.selected.contains("Alpha Fab"));
        state.toggle_selection("Alpha Fab");
        assert!(!state.selected.contains("Alpha Fab"));
    }

    #[test]
    fn outreach_regeneration_keeps_one_entry_per_employer() {
        let mut state = populated_state();
        let replacement = OutreachAssets {
            primary_email: "newer email".to_string(),
            follow_ups: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            call_script: vec!["hi".to_string()],
            subject_lines: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            linked_in_message: "new dm".to_string(),
        };
        state.outreach.insert("Alpha Fab".to_string(), replacement);
        assert_eq!(state.outreach.len(), 1);
        assert_eq!(state.outreach["Alpha Fab"].primary_email, "newer email");
    }

    #[test]
    fn dashboard_stats_aggregate_correctly() {
        let state = populated_state();
        let stats = state.dashboard_stats();
        assert_eq!(stats.total_matches, 3);
        assert_eq!(stats.high_alignment, 2);
        assert_eq!(stats.campaigns_built, 1);
        assert_eq!(stats.avg_score, 83);
        assert_eq!(stats.segments["Strategic Partner"], 2);
        assert_eq!(stats.segments["Emerging Growth"], 1);
    }

    #[test]
    fn hashtag_bank_merges_industries_without_duplicates() {
        let state = populated_state();
        let bank = state.hashtag_bank();
        assert!(bank.contains(&"Workforce".to_string()));
        assert!(bank.contains(&"Manufacturing".to_string()));
        assert!(bank.contains(&"Oil&Gas".to_string()));
        let unique: std::collections::HashSet<_> = bank.iter().collect();
        assert_eq!(unique.len(), bank.len());
    }
}
