//! All prompt text and response schemas for the engine's Gemini calls.
//! Schemas use the generateContent structured-output vocabulary
//! (OBJECT / ARRAY / STRING / NUMBER).

use serde_json::{json, Value};

use crate::models::employer::{EmployerMatch, OutreachSegment};
use crate::models::intake::IntakeForm;
use crate::models::linkedin::LinkedInPost;
use crate::models::profile::WorkforceProfile;

/// System instruction for the support expert bot, including the feature
/// map it answers questions about.
pub const SUPPORT_SYSTEM: &str = "You are the E^3 System Assistant Bot. You are a world-class \
expert on the Employer Engagement Engine (E^3).
Your mission is to help workforce development professionals use the app effectively to scale \
employer partnerships.

APPLICATION FEATURES:
- Step 1 (Intake): Enter program details and manage current/past partners.
- Step 2 (Discovery): View AI-enhanced regional economic analytics and elevator pitches.
- Step 3 (Match Report): Review 100 ranked local employers with matching scores.
- Step 4 (Campaign Builder): Access tailored email sequences, call scripts, and LinkedIn DMs.
- Step 5 (LinkedIn Engine): Generate social media strategies with AI-designed graphics.
- E^3 Search: Grounded market lead discovery using Google Search.

INTERACTIVE NAVIGATION:
You can move the user between app sections. If they want to \"start\", \"see my matches\", \
\"find jobs\", or \"view my LinkedIn plan\", use the 'navigateApp' tool.

TONE: Professional, encouraging, and technically precise. Use Markdown formatting.
If a user is stuck, explain the 5-step lifecycle and guide them.";

/// Declaration for the support bot's navigation tool.
pub fn navigate_app_declaration() -> Value {
    json!({
        "name": "navigateApp",
        "parameters": {
            "type": "OBJECT",
            "description": "Navigate the user to a specific section of the Employer Engagement Engine application.",
            "properties": {
                "step": {
                    "type": "STRING",
                    "description": "The target view ID to switch to.",
                    "enum": ["landing", "intake", "discovery", "report", "outreach", "linkedin", "chat", "support", "docs"]
                },
                "reason": {
                    "type": "STRING",
                    "description": "Brief explanation of why the user is being moved to this step."
                }
            },
            "required": ["step"]
        }
    })
}

pub fn enhance_prompt(form: &IntakeForm) -> String {
    let contact = form.contact_info();
    format!(
        "Enhance this workforce information for employer matching and strategic planning.\n\
         \n\
         Program Title: {title}\n\
         Region: {region}\n\
         Industries: {industries}\n\
         URL: {url}\n\
         \n\
         PROVIDED CONTACT DETAILS (Preserve these unless you find more accurate ones on the URL):\n\
         - Name: {name}\n\
         - Email: {email}\n\
         - Phone: {phone}\n\
         \n\
         TASKS:\n\
         1. Create a compelling 2-sentence Elevator Pitch.\n\
         2. Provide geographic/economic analytics for the {region} area (labor market trends, key employers, growth rate).\n\
         3. Determine a realistic pay/wage range based on current market data for this region and industry. \
         CRITICAL: You MUST include BOTH the estimated annual salary range AND the equivalent hourly wage range \
         (e.g., \"$55,000 - $75,000/yr | $26.44 - $36.05/hr\").\n\
         4. If a URL is provided, search for and extract the Primary Contact (Name, Email, Phone). \
         If not found, use the PROVIDED CONTACT DETAILS above.\n\
         5. Summarize the program page content (if URL provided) into a concise one-page style summary.\n\
         6. Assess if safety training/compliance (OSHA, etc.) is likely involved.\n\
         7. Generate Target Job Titles, Hard Skills, and Soft Skills.\n\
         8. Provide 3 Strategic Suggestions.",
        title = form.title,
        region = form.region,
        industries = form.industries,
        url = if form.program_link.trim().is_empty() {
            "None provided"
        } else {
            form.program_link.trim()
        },
        name = contact.name.as_deref().unwrap_or("Not provided"),
        email = contact.email.as_deref().unwrap_or("Not provided"),
        phone = contact.phone.as_deref().unwrap_or("Not provided"),
    )
}

pub fn enhance_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {"type": "STRING"},
            "region": {"type": "STRING"},
            "industries": {"type": "ARRAY", "items": {"type": "STRING"}},
            "elevatorPitch": {"type": "STRING"},
            "geoAnalytics": {"type": "STRING", "description": "Economic and labor market overview of the region"},
            "wageRange": {"type": "STRING", "description": "Estimated pay range including both annual salary and hourly wage equivalents"},
            "primaryContactInfo": {
                "type": "OBJECT",
                "properties": {
                    "name": {"type": "STRING"},
                    "email": {"type": "STRING"},
                    "phone": {"type": "STRING"}
                }
            },
            "siteSummary": {"type": "STRING", "description": "Brief summary of the provided URL content"},
            "safetyAssessment": {"type": "STRING", "description": "Evaluation of safety training requirements"},
            "skills": {
                "type": "OBJECT",
                "properties": {
                    "hard": {"type": "ARRAY", "items": {"type": "STRING"}},
                    "soft": {"type": "ARRAY", "items": {"type": "STRING"}}
                },
                "required": ["hard", "soft"]
            },
            "credentials": {"type": "ARRAY", "items": {"type": "STRING"}},
            "targetJobTitles": {"type": "ARRAY", "items": {"type": "STRING"}},
            "startDate": {"type": "STRING"},
            "ctaLink": {"type": "STRING"},
            "suggestions": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["title", "region", "industries", "elevatorPitch", "geoAnalytics", "wageRange",
                     "safetyAssessment", "skills", "targetJobTitles", "startDate", "suggestions"]
    })
}

pub fn discovery_prompt(profile: &WorkforceProfile, batch_size: usize) -> String {
    let exclusions = if profile.current_partners.is_empty() {
        "None".to_string()
    } else {
        profile.current_partners.join(", ")
    };
    let past_partners = if profile.past_partners.is_empty() {
        "None".to_string()
    } else {
        profile.past_partners.join(", ")
    };

    format!(
        "Based on this workforce profile:\n\
         - Title: {title}\n\
         - Industries: {industries}\n\
         - Region: {region}\n\
         - Target Job Titles: {titles}\n\
         \n\
         CONTEXT - EXCLUSIONS (Current Partners):\n\
         The following employers are already working with the program. Do NOT include them in the results:\n\
         {exclusions}\n\
         \n\
         CONTEXT - RECONNECTIONS (Past Partners):\n\
         The following employers are past partners. If they are still good matches, you SHOULD include them \
         to facilitate reconnection.\n\
         IMPORTANT: If you include a past partner, you MUST start their 'rationale' field with the tag \"[RECONNECT]\".\n\
         Past Partners List: {past_partners}\n\
         \n\
         Propose EXACTLY {batch_size} real or highly representative potential employer targets in this region.\n\
         For each, score them based on:\n\
         Industry alignment (30%), Job title overlap (25%), Skill overlap (25%), Geographic proximity (10%), Hiring signals (10%).\n\
         Assign them an outreach segment from: {segments}.\n\
         Include basic contact info: website, phone, and a generic contact email if possible.\n\
         Also estimate the employee count (e.g., '10-50', '500+').",
        title = profile.title,
        industries = profile.industries.join(", "),
        region = profile.region,
        titles = profile.target_job_titles.join(", "),
        segments = OutreachSegment::prompt_list(),
    )
}

pub fn discovery_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "score": {"type": "NUMBER"},
                "rationale": {"type": "STRING"},
                "segment": {"type": "STRING", "enum": ["Strategic Partner", "High-Volume Hirer", "Emerging Growth", "Community Anchor"]},
                "industryAlignment": {"type": "NUMBER"},
                "jobTitleOverlap": {"type": "NUMBER"},
                "skillOverlap": {"type": "NUMBER"},
                "geographicProximity": {"type": "NUMBER"},
                "hiringSignals": {"type": "NUMBER"},
                "website": {"type": "STRING"},
                "phone": {"type": "STRING"},
                "contactEmail": {"type": "STRING"},
                "employeeCount": {"type": "STRING", "description": "Estimated employee count range (e.g. '50-100')"}
            },
            "required": ["name", "score", "rationale", "segment", "industryAlignment", "jobTitleOverlap",
                         "skillOverlap", "geographicProximity", "hiringSignals", "employeeCount"]
        }
    })
}

pub fn outreach_prompt(profile: &WorkforceProfile, employer: &EmployerMatch) -> String {
    format!(
        "Generate a tailored outreach package for {name} for the {title} workforce program.\n\
         Segment focus: {segment}.\n\
         Region: {region}.\n\
         CTA: {cta}.\n\
         Include 1 primary email, 3 follow-ups, a phone call script, and a specific LinkedIn message (DM/InMail style).\n\
         Always include the mandatory disclaimer: \"Participation does not guarantee hiring outcomes; \
         program availability subject to enrollment and eligibility.\"",
        name = employer.name,
        title = profile.title,
        segment = employer.segment.as_str(),
        region = profile.region,
        cta = profile.cta_or_default(),
    )
}

pub fn outreach_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "primaryEmail": {"type": "STRING", "description": "140-180 words primary email"},
            "followUps": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "3 follow-up emails, 80-120 words each"},
            "callScript": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "Bullet points for a call script"},
            "subjectLines": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "3 subject line options"},
            "linkedInMessage": {"type": "STRING", "description": "A tailored, personal LinkedIn outreach message"}
        },
        "required": ["primaryEmail", "followUps", "callScript", "subjectLines", "linkedInMessage"]
    })
}

pub fn calendar_prompt(profile: &WorkforceProfile, uniqueness_seed: i64) -> String {
    format!(
        "Generate exactly 10 FRESH and UNIQUE LinkedIn posts specifically written for AN EMPLOYER AUDIENCE \
         to recruit them for the {title} workforce program.\n\
         Current timestamp to ensure uniqueness: {seed}.\n\
         Focus on ROI, filling skills gaps, and simplifying their hiring pipeline.\n\
         Avoid repetition from previous runs. Use a professional partnership-oriented tone.\n\
         \n\
         IMPORTANT: You MUST include the following link naturally within the content of every post: {cta}.\n\
         \n\
         Pillars to rotate across the 10 posts:\n\
         1. Employer ROI/Value (Cost savings, retention)\n\
         2. Talent Pipeline (Developing local skills)\n\
         3. Program Spotlight (Ease of participation, credentials)\n\
         4. Industry Insight (Future-proofing the workforce)\n\
         5. Community Impact (Local economic growth)\n\
         6. Diversity & Inclusion (Broadening the talent pool)\n\
         \n\
         For each post, provide 3-5 relevant and trending hashtags.",
        title = profile.title,
        seed = uniqueness_seed,
        cta = profile.cta_or_default(),
    )
}

pub fn calendar_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": {"type": "NUMBER"},
                "pillar": {"type": "STRING"},
                "content": {"type": "STRING"},
                "hashtags": {"type": "ARRAY", "items": {"type": "STRING"}, "description": "3-5 relevant hashtags"}
            },
            "required": ["day", "pillar", "content", "hashtags"]
        }
    })
}

pub fn graphic_prompt(post: &LinkedInPost, profile: &WorkforceProfile) -> String {
    let context: String = post.content.chars().take(300).collect();
    format!(
        "A professional, clean, and high-impact LinkedIn post graphic representing the theme: \"{pillar}\".\n\
         Specific context: \"{context}\".\n\
         Recruiting employers for a \"{title}\" workforce program in the \"{industries}\" industries.\n\
         Visual Style: Modern corporate photography or high-end professional digital illustration.\n\
         Themes: Collaboration, technical excellence, future workforce, and economic growth.\n\
         Crucial: Do not include any text in the image. High-quality lighting and professional business aesthetic. \
         1K resolution.",
        pillar = post.pillar,
        context = context,
        title = profile.title,
        industries = profile.industries.join(", "),
    )
}

pub fn speech_prompt(text: &str) -> String {
    format!("Read the following outreach content professionally and clearly: {text}")
}

pub fn market_search_prompt(user_message: &str) -> String {
    format!(
        "You are the E^3 Strategy Assistant, acting as a high-end Talent Scout and Strategic Partnership Manager.\n\
         \n\
         Current User Query: \"{user_message}\"\n\
         \n\
         Instructions:\n\
         1. Use Google Search to find REAL, ACTIVE job listings or workforce programs related to the query.\n\
         2. LEAD INTELLIGENCE: For every lead found, attempt to identify a **Warm Lead Entry Point**. \
         Search specifically for Recruitment Managers, Talent Acquisition Leads, or Department Directors \
         at that company in that region.\n\
         3. Structure your response with Bold Headers (###) for each employer.\n\
         4. Use Bullet Points (* ) for:\n\
            - **Active Program/Role:** Details about the current hiring or workforce initiative.\n\
            - **Strategic Opportunity:** Why this is a valuable lead for a workforce development partner.\n\
            - **Warm Lead Entry Point:** List a specific name and title found via search.\n\
              * *Fallback Logic:* If no name is found, provide the precise LinkedIn search query for the \
         most likely decision-maker (e.g., \"Search for: 'Director of HR at [Company Name]'\").\n\
         5. AFTER providing results, act as a strategist. Ask a single leading question to move them toward \
         Step 1 (Intake) or Step 4 (Campaign).\n\
         \n\
         Keep your tone professional, encouraging, and highly conversational. Format your response as a JSON \
         object with a single \"reply\" field containing markdown-formatted text."
    )
}

pub fn market_search_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "reply": {"type": "STRING"}
        },
        "required": ["reply"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employer::RECONNECT_MARKER;

    fn profile() -> WorkforceProfile {
        serde_json::from_value(json!({
            "title": "Welding Tech",
            "region": "Tulsa",
            "industries": ["Manufacturing"],
            "elevatorPitch": "p",
            "geoAnalytics": "g",
            "wageRange": "w",
            "safetyAssessment": "s",
            "skills": {"hard": [], "soft": []},
            "targetJobTitles": ["Welder"],
            "startDate": "2026-09-01",
            "suggestions": [],
            "currentPartners": ["Acme Corp"],
            "pastPartners": ["Tulsa Steel"]
        }))
        .unwrap()
    }

    #[test]
    fn discovery_prompt_carries_partner_context() {
        let prompt = discovery_prompt(&profile(), 100);
        assert!(prompt.contains("Do NOT include them"));
        assert!(prompt.contains("Acme Corp"));
        assert!(prompt.contains("Tulsa Steel"));
        assert!(prompt.contains(RECONNECT_MARKER));
        assert!(prompt.contains("EXACTLY 100"));
    }

    #[test]
    fn discovery_prompt_handles_empty_partner_lists() {
        let mut p = profile();
        p.current_partners.clear();
        p.past_partners.clear();
        let prompt = discovery_prompt(&p, 100);
        assert!(prompt.contains("results:\n None") || prompt.contains("None"));
    }

    #[test]
    fn enhance_prompt_defaults_missing_fields() {
        let form = IntakeForm {
            title: "Welding Tech".to_string(),
            region: "Tulsa".to_string(),
            industries: "Manufacturing".to_string(),
            terms_accepted: true,
            ..Default::default()
        };
        let prompt = enhance_prompt(&form);
        assert!(prompt.contains("URL: None provided"));
        assert!(prompt.contains("- Name: Not provided"));
    }

    #[test]
    fn calendar_prompt_embeds_seed_and_cta() {
        let prompt = calendar_prompt(&profile(), 1_725_000_000_000);
        assert!(prompt.contains("1725000000000"));
        assert!(prompt.contains("https://example") || prompt.contains("Visit our official website"));
    }

    #[test]
    fn graphic_prompt_truncates_long_content() {
        let mut post = LinkedInPost {
            day: 1,
            pillar: "Employer ROI".to_string(),
            content: "x".repeat(500),
            hashtags: vec![],
            image_url: None,
        };
        post.content.push('y');
        let prompt = graphic_prompt(&post, &profile());
        assert!(!prompt.contains(&"x".repeat(301)));
    }

    #[test]
    fn schemas_declare_required_fields() {
        assert_eq!(
            enhance_schema()["required"].as_array().unwrap().len(),
            11
        );
        let items = &discovery_schema()["items"];
        assert!(items["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "rationale"));
        assert!(outreach_schema()["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "linkedInMessage"));
    }
}
