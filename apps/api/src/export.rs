use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;
use url::Url;

use crate::models::employer::EmployerMatch;
use crate::models::linkedin::LinkedInPost;
use crate::models::outreach::OutreachAssets;

/// Renders the match report as CSV for CRM import. Quoting and embedded
/// double-quote escaping are handled by the writer.
pub fn match_report_csv(matches: &[EmployerMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Employer",
        "Size",
        "Score",
        "Segment",
        "Website",
        "Phone",
        "Email",
        "Rationale",
    ])?;
    for m in matches {
        writer.write_record([
            m.name.as_str(),
            m.employee_count.as_deref().unwrap_or("N/A"),
            &m.score.to_string(),
            m.segment.as_str(),
            m.website.as_deref().unwrap_or(""),
            m.phone.as_deref().unwrap_or(""),
            m.contact_email.as_deref().unwrap_or(""),
            m.display_rationale(),
        ])?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Download file name derived from the profile title, sanitized to
/// lowercase alphanumerics and underscores.
pub fn report_file_name(profile_title: Option<&str>) -> String {
    let slug = profile_title
        .map(|title| {
            title
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
                .collect::<String>()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "export".to_string());
    format!("E3_Match_Report_{slug}.csv")
}

/// Copy-all payload for the outreach view: every built package among the
/// given matches, in display order. None when nothing has been built yet.
pub fn outreach_bundle(
    matches: &[&EmployerMatch],
    outreach: &HashMap<String, OutreachAssets>,
) -> Option<String> {
    let sections: Vec<String> = matches
        .iter()
        .filter_map(|m| outreach.get(&m.name).map(|assets| (m, assets)))
        .map(|(m, assets)| {
            format!(
                "EMPLOYER: {}\nSEGMENT: {}\n\nPRIMARY EMAIL:\n{}\n\nFOLLOW UPS:\n{}\n\nCALL SCRIPT:\n{}\n\nLINKEDIN MESSAGE:\n{}",
                m.name,
                m.segment.as_str(),
                assets.primary_email,
                assets.follow_ups.join("\n\n"),
                assets.call_script.join("\n"),
                assets.linked_in_message,
            )
        })
        .collect();

    if sections.is_empty() {
        None
    } else {
        Some(sections.join(&format!("\n\n{}\n\n", "=".repeat(30))))
    }
}

/// Copy-all payload for the LinkedIn calendar.
pub fn linkedin_bundle(posts: &[LinkedInPost]) -> Option<String> {
    if posts.is_empty() {
        return None;
    }
    Some(
        posts
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let tags: Vec<String> = p.hashtags.iter().map(|h| format!("#{h}")).collect();
                format!("[POST {} - {}]\n{}\n{}", i + 1, p.pillar, p.content, tags.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n"),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Default,
    Gmail,
    Outlook,
    Yahoo,
}

/// Builds a webmail compose URL (or mailto link) with the recipient,
/// subject and body percent-encoded. No mail is sent by this service.
pub fn compose_url(
    provider: EmailProvider,
    recipient: &str,
    subject: &str,
    body: &str,
) -> Result<Url, url::ParseError> {
    match provider {
        EmailProvider::Gmail => Url::parse_with_params(
            "https://mail.google.com/mail/",
            &[
                ("view", "cm"),
                ("fs", "1"),
                ("to", recipient),
                ("su", subject),
                ("body", body),
            ],
        ),
        EmailProvider::Outlook => Url::parse_with_params(
            "https://outlook.office.com/mail/deeplink/compose",
            &[("to", recipient), ("subject", subject), ("body", body)],
        ),
        EmailProvider::Yahoo => Url::parse_with_params(
            "https://compose.mail.yahoo.com/",
            &[("to", recipient), ("subj", subject), ("body", body)],
        ),
        EmailProvider::Default => {
            let mut url = Url::parse(&format!("mailto:{recipient}"))?;
            url.query_pairs_mut()
                .append_pair("subject", subject)
                .append_pair("body", body);
            Ok(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employer::OutreachSegment;

    fn sample_match(name: &str, rationale: &str) -> EmployerMatch {
        EmployerMatch {
            name: name.to_string(),
            score: 88.0,
            rationale: rationale.to_string(),
            segment: OutreachSegment::CommunityAnchor,
            industry_alignment: 25.0,
            job_title_overlap: 20.0,
            skill_overlap: 20.0,
            geographic_proximity: 13.0,
            hiring_signals: 10.0,
            website: Some("https://acme.example".to_string()),
            phone: None,
            contact_email: None,
            employee_count: Some("500+".to_string()),
        }
    }

    #[test]
    fn csv_escapes_embedded_quotes() {
        let m = sample_match("Acme \"Quality\" Corp", "They said \"yes\" before");
        let csv = match_report_csv(&[m]).unwrap();
        assert!(csv.contains("\"Acme \"\"Quality\"\" Corp\""));
        assert!(csv.contains("\"\"yes\"\""));
    }

    #[test]
    fn csv_strips_reconnect_marker_from_rationale() {
        let m = sample_match("Tulsa Steel", "[RECONNECT] Lapsed apprenticeship host");
        let csv = match_report_csv(&[m]).unwrap();
        assert!(csv.contains("Lapsed apprenticeship host"));
        assert!(!csv.contains("[RECONNECT]"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_match() {
        let rows = [sample_match("A", "r"), sample_match("B", "r")];
        let csv = match_report_csv(&rows).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("Employer,Size,Score,Segment"));
    }

    #[test]
    fn report_file_name_sanitizes_title() {
        assert_eq!(
            report_file_name(Some("Welding Tech 2026!")),
            "E3_Match_Report_welding_tech_2026_.csv"
        );
        assert_eq!(report_file_name(None), "E3_Match_Report_export.csv");
    }

    #[test]
    fn outreach_bundle_skips_unbuilt_employers() {
        let a = sample_match("A", "r");
        let b = sample_match("B", "r");
        let mut outreach = HashMap::new();
        outreach.insert(
            "B".to_string(),
            OutreachAssets {
                primary_email: "hello B".to_string(),
                follow_ups: vec!["f".to_string()],
                call_script: vec!["c".to_string()],
                subject_lines: vec!["s".to_string()],
                linked_in_message: "dm".to_string(),
            },
        );
        let bundle = outreach_bundle(&[&a, &b], &outreach).unwrap();
        assert!(bundle.contains("EMPLOYER: B"));
        assert!(!bundle.contains("EMPLOYER: A"));
    }

    #[test]
    fn outreach_bundle_empty_when_nothing_built() {
        let a = sample_match("A", "r");
        assert!(outreach_bundle(&[&a], &HashMap::new()).is_none());
    }

    #[test]
    fn linkedin_bundle_formats_hashtags() {
        let posts = vec![LinkedInPost {
            day: 1,
            pillar: "Community Impact".to_string(),
            content: "Local growth".to_string(),
            hashtags: vec!["Workforce".to_string(), "Tulsa".to_string()],
            image_url: None,
        }];
        let bundle = linkedin_bundle(&posts).unwrap();
        assert!(bundle.contains("[POST 1 - Community Impact]"));
        assert!(bundle.contains("#Workforce #Tulsa"));
        assert!(linkedin_bundle(&[]).is_none());
    }

    #[test]
    fn gmail_compose_url_encodes_fields() {
        let url = compose_url(
            EmailProvider::Gmail,
            "hr@acme.example",
            "Partnership idea",
            "Hello & welcome",
        )
        .unwrap();
        let s = url.as_str();
        assert!(s.starts_with("https://mail.google.com/mail/?"));
        assert!(s.contains("to=hr%40acme.example"));
        assert!(s.contains("su=Partnership+idea"));
        assert!(s.contains("Hello+%26+welcome"));
    }

    #[test]
    fn mailto_url_keeps_recipient_in_path() {
        let url = compose_url(EmailProvider::Default, "hr@acme.example", "Hi", "Body").unwrap();
        assert_eq!(url.scheme(), "mailto");
        assert_eq!(url.path(), "hr@acme.example");
        assert!(url.query().unwrap().contains("subject=Hi"));
    }
}
