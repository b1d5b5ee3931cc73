use serde::{Deserialize, Serialize};

/// Every navigable view in the engine. The six linear steps drive the
/// progress indicator; chat, support, docs and terms sit outside the
/// canonical path and are reachable from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Landing,
    Intake,
    Discovery,
    Report,
    Outreach,
    Linkedin,
    Dashboard,
    Chat,
    Support,
    Docs,
    Terms,
}

pub const LINEAR_PATH: [Step; 6] = [
    Step::Intake,
    Step::Discovery,
    Step::Report,
    Step::Outreach,
    Step::Linkedin,
    Step::Dashboard,
];

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Landing => "landing",
            Step::Intake => "intake",
            Step::Discovery => "discovery",
            Step::Report => "report",
            Step::Outreach => "outreach",
            Step::Linkedin => "linkedin",
            Step::Dashboard => "dashboard",
            Step::Chat => "chat",
            Step::Support => "support",
            Step::Docs => "docs",
            Step::Terms => "terms",
        }
    }

    /// Steps past intake are meaningless without a profile.
    pub fn requires_profile(self) -> bool {
        matches!(
            self,
            Step::Discovery | Step::Report | Step::Outreach | Step::Linkedin | Step::Dashboard
        )
    }

    /// Progress percentage for the linear workflow indicator.
    pub fn progress(self) -> f64 {
        if self == Step::Landing {
            return 0.0;
        }
        match LINEAR_PATH.iter().position(|s| *s == self) {
            Some(index) => ((index + 1) as f64 / LINEAR_PATH.len() as f64) * 100.0,
            None => 100.0,
        }
    }
}

/// Transition guard: guarded steps are unreachable until a profile exists.
pub fn can_enter(step: Step, has_profile: bool) -> bool {
    has_profile || !step.requires_profile()
}
