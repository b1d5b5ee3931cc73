use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::profile::ContactInfo;

/// Raw intake form as submitted. List-valued fields arrive as
/// comma-separated text and are split locally; the partner lists never
/// reach the AI gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeForm {
    pub title: String,
    pub region: String,
    pub industries: String,
    pub wage_range: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub program_link: String,
    pub current_partners: String,
    pub past_partners: String,
    pub terms_accepted: bool,
}

impl IntakeForm {
    /// Field-level validation. An empty map means the form is acceptable;
    /// no gateway call is made while any error remains.
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if self.title.trim().is_empty() {
            errors.insert("title".to_string(), "Title is required".to_string());
        }
        if self.region.trim().is_empty() {
            errors.insert("region".to_string(), "Region is required".to_string());
        }
        if self.industries.trim().is_empty() {
            errors.insert(
                "industries".to_string(),
                "Industries are required".to_string(),
            );
        }
        if !self.terms_accepted {
            errors.insert(
                "termsAccepted".to_string(),
                "You must accept the terms".to_string(),
            );
        }
        errors
    }

    pub fn industries_list(&self) -> Vec<String> {
        split_list(&self.industries)
    }

    pub fn current_partners_list(&self) -> Vec<String> {
        split_list(&self.current_partners)
    }

    pub fn past_partners_list(&self) -> Vec<String> {
        split_list(&self.past_partners)
    }

    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            name: non_empty(&self.contact_name),
            email: non_empty(&self.contact_email),
            phone: non_empty(&self.contact_phone),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
