//! The AI gateway: one function per engine capability. Every function
//! builds a prompt plus a strict output contract, invokes the model, and
//! validates the parsed payload before anything touches the engine store.

pub mod client;
pub mod prompts;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;

pub use client::{GatewayError, GeminiClient};
use client::{
    Content, GenerateRequest, GenerationConfig, Tool, FLASH_MODEL, IMAGE_MODEL, PRO_MODEL,
    TTS_MODEL,
};

use crate::models::chat::{GroundingSource, Role};
use crate::models::employer::EmployerMatch;
use crate::models::intake::IntakeForm;
use crate::models::linkedin::LinkedInPost;
use crate::models::outreach::OutreachAssets;
use crate::models::profile::WorkforceProfile;
use crate::workflow::Step;

/// Discovery always produces a full batch of this size.
pub const DISCOVERY_BATCH_SIZE: usize = 100;
/// The content calendar is always exactly ten posts.
pub const CALENDAR_SIZE: usize = 10;
/// TTS voice for read-aloud narration.
const TTS_VOICE: &str = "Kore";

/// Enhances the raw intake form into a full profile. Web search is enabled
/// so the model can mine the program URL; the partner lists never appear in
/// the request and are merged in by the caller.
pub async fn enhance_profile(
    client: &GeminiClient,
    form: &IntakeForm,
) -> Result<WorkforceProfile, GatewayError> {
    let mut request = GenerateRequest::user(prompts::enhance_prompt(form));
    request.tools = Some(vec![Tool::google_search()]);

    let (profile, _sources) = client
        .generate_json::<WorkforceProfile>(PRO_MODEL, request, prompts::enhance_schema())
        .await?;
    Ok(profile)
}

/// Runs a discovery batch and enforces its contract: current partners are
/// stripped defensively, and the surviving batch must hold exactly
/// [`DISCOVERY_BATCH_SIZE`] entries with unique names.
pub async fn discover_employers(
    client: &GeminiClient,
    profile: &WorkforceProfile,
) -> Result<Vec<EmployerMatch>, GatewayError> {
    let request = GenerateRequest::user(prompts::discovery_prompt(profile, DISCOVERY_BATCH_SIZE));
    let (batch, _sources) = client
        .generate_json::<Vec<EmployerMatch>>(FLASH_MODEL, request, prompts::discovery_schema())
        .await?;
    validate_discovery_batch(batch, &profile.current_partners)
}

/// Contract check shared with tests. Applied before any state is written,
/// so a non-conforming batch leaves the prior match set intact.
pub(crate) fn validate_discovery_batch(
    batch: Vec<EmployerMatch>,
    current_partners: &[String],
) -> Result<Vec<EmployerMatch>, GatewayError> {
    let excluded: Vec<String> = current_partners
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    let filtered: Vec<EmployerMatch> = batch
        .into_iter()
        .filter(|m| !excluded.contains(&m.name.trim().to_lowercase()))
        .collect();

    if filtered.len() != DISCOVERY_BATCH_SIZE {
        return Err(GatewayError::Contract(format!(
            "expected {} matches after exclusions, got {}",
            DISCOVERY_BATCH_SIZE,
            filtered.len()
        )));
    }

    let mut seen = std::collections::HashSet::new();
    for m in &filtered {
        if !seen.insert(m.name.to_lowercase()) {
            return Err(GatewayError::Contract(format!(
                "duplicate employer name in batch: {}",
                m.name
            )));
        }
    }

    Ok(filtered)
}

pub async fn generate_outreach(
    client: &GeminiClient,
    profile: &WorkforceProfile,
    employer: &EmployerMatch,
) -> Result<OutreachAssets, GatewayError> {
    let request = GenerateRequest::user(prompts::outreach_prompt(profile, employer));
    let (assets, _sources) = client
        .generate_json::<OutreachAssets>(FLASH_MODEL, request, prompts::outreach_schema())
        .await?;
    Ok(assets)
}

/// Generates the ten-post calendar. A wall-clock uniqueness seed keeps
/// repeated runs from converging on the same output.
pub async fn generate_calendar(
    client: &GeminiClient,
    profile: &WorkforceProfile,
) -> Result<Vec<LinkedInPost>, GatewayError> {
    let seed = chrono::Utc::now().timestamp_millis();
    let request = GenerateRequest::user(prompts::calendar_prompt(profile, seed));
    let (posts, _sources) = client
        .generate_json::<Vec<LinkedInPost>>(FLASH_MODEL, request, prompts::calendar_schema())
        .await?;
    validate_calendar(posts)
}

pub(crate) fn validate_calendar(
    posts: Vec<LinkedInPost>,
) -> Result<Vec<LinkedInPost>, GatewayError> {
    if posts.len() != CALENDAR_SIZE {
        return Err(GatewayError::Contract(format!(
            "expected {} posts, got {}",
            CALENDAR_SIZE,
            posts.len()
        )));
    }
    Ok(posts)
}

/// Generates a 1:1 post graphic and returns it as a displayable data URL.
pub async fn generate_post_graphic(
    client: &GeminiClient,
    post: &LinkedInPost,
    profile: &WorkforceProfile,
) -> Result<String, GatewayError> {
    let mut request = GenerateRequest::user(prompts::graphic_prompt(post, profile));
    request.generation_config = Some(GenerationConfig {
        image_config: Some(json!({"aspectRatio": "1:1"})),
        ..Default::default()
    });

    let response = client.generate(IMAGE_MODEL, &request).await?;
    let inline = response.inline_data().ok_or(GatewayError::EmptyContent)?;
    // Validate the payload decodes before handing it to the client.
    BASE64.decode(&inline.data)?;
    Ok(format!("data:{};base64,{}", inline.mime_type, inline.data))
}

/// Synthesizes narration audio. Returns raw 24 kHz mono s16le PCM; the
/// narration controller wraps it in a WAV container for playback.
pub async fn generate_speech(
    client: &GeminiClient,
    text: &str,
) -> Result<Vec<u8>, GatewayError> {
    let mut request = GenerateRequest::user(prompts::speech_prompt(text));
    request.generation_config = Some(GenerationConfig {
        response_modalities: Some(vec!["AUDIO".to_string()]),
        speech_config: Some(json!({
            "voiceConfig": {
                "prebuiltVoiceConfig": {"voiceName": TTS_VOICE}
            }
        })),
        ..Default::default()
    });

    let response = client.generate(TTS_MODEL, &request).await?;
    let inline = response.inline_data().ok_or(GatewayError::EmptyContent)?;
    Ok(BASE64.decode(&inline.data)?)
}

/// Reply from the support expert, optionally carrying a navigation
/// directive for the workflow state machine.
#[derive(Debug, Clone)]
pub struct SupportReply {
    pub text: String,
    pub navigate_to: Option<Step>,
}

#[derive(Debug, Deserialize)]
struct NavigateArgs {
    step: Step,
}

/// One support/assistant turn: prior history plus the new user message,
/// with the navigateApp tool available.
pub async fn support_reply(
    client: &GeminiClient,
    user_message: &str,
    history: &[(Role, String)],
) -> Result<SupportReply, GatewayError> {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|(role, text)| match role {
            Role::User => Content::user(text.clone()),
            Role::Model => Content::model(text.clone()),
        })
        .collect();
    contents.push(Content::user(user_message));

    let request = GenerateRequest {
        contents,
        system_instruction: Some(Content::system(prompts::SUPPORT_SYSTEM)),
        tools: Some(vec![Tool::functions(vec![
            prompts::navigate_app_declaration(),
        ])]),
        generation_config: None,
    };

    let response = client.generate(FLASH_MODEL, &request).await?;
    let text = response
        .text()
        .unwrap_or("I'm looking into that for you.")
        .to_string();

    let navigate_to = response
        .function_call()
        .filter(|fc| fc.name == "navigateApp")
        .and_then(|fc| serde_json::from_value::<NavigateArgs>(fc.args.clone()).ok())
        .map(|args| args.step);

    Ok(SupportReply { text, navigate_to })
}

#[derive(Debug, Deserialize)]
struct MarketReply {
    reply: String,
}

/// Grounded market lead search. Returns the markdown reply plus web
/// citations de-duplicated by URI.
pub async fn market_search(
    client: &GeminiClient,
    user_message: &str,
) -> Result<(String, Vec<GroundingSource>), GatewayError> {
    let mut request = GenerateRequest::user(prompts::market_search_prompt(user_message));
    request.tools = Some(vec![Tool::google_search()]);

    let (parsed, sources) = client
        .generate_json::<MarketReply>(PRO_MODEL, request, prompts::market_search_schema())
        .await?;
    Ok((parsed.reply, sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employer::OutreachSegment;

    fn named_match(name: &str) -> EmployerMatch {
        EmployerMatch {
            name: name.to_string(),
            score: 80.0,
            rationale: "fit".to_string(),
            segment: OutreachSegment::EmergingGrowth,
            industry_alignment: 25.0,
            job_title_overlap: 20.0,
            skill_overlap: 20.0,
            geographic_proximity: 8.0,
            hiring_signals: 7.0,
            website: None,
            phone: None,
            contact_email: None,
            employee_count: None,
        }
    }

    fn full_batch() -> Vec<EmployerMatch> {
        (0..DISCOVERY_BATCH_SIZE)
            .map(|i| named_match(&format!("Employer {i}")))
            .collect()
    }

    #[test]
    fn conforming_batch_passes() {
        let batch = validate_discovery_batch(full_batch(), &[]).unwrap();
        assert_eq!(batch.len(), DISCOVERY_BATCH_SIZE);
    }

    #[test]
    fn short_batch_is_a_contract_violation() {
        let mut batch = full_batch();
        batch.truncate(99);
        let err = validate_discovery_batch(batch, &[]).unwrap_err();
        assert!(matches!(err, GatewayError::Contract(_)));
    }

    #[test]
    fn current_partner_in_batch_fails_after_stripping() {
        let mut batch = full_batch();
        batch[5].name = "Acme Corp".to_string();
        let err =
            validate_discovery_batch(batch, &["acme corp".to_string()]).unwrap_err();
        // Stripping the partner leaves 99 entries, which breaks the contract.
        assert!(matches!(err, GatewayError::Contract(_)));
    }

    #[test]
    fn stripping_is_case_insensitive_and_count_preserving() {
        let mut batch = full_batch();
        batch.push(named_match("ACME corp"));
        let cleaned =
            validate_discovery_batch(batch, &["Acme Corp".to_string()]).unwrap();
        assert_eq!(cleaned.len(), DISCOVERY_BATCH_SIZE);
        assert!(cleaned.iter().all(|m| m.name.to_lowercase() != "acme corp"));
    }

    #[test]
    fn duplicate_names_violate_the_contract() {
        let mut batch = full_batch();
        batch[7].name = "Employer 3".to_string();
        let err = validate_discovery_batch(batch, &[]).unwrap_err();
        assert!(matches!(err, GatewayError::Contract(_)));
    }

    #[test]
    fn calendar_must_hold_exactly_ten_posts() {
        let posts: Vec<LinkedInPost> = (0..CALENDAR_SIZE)
            .map(|i| LinkedInPost {
                day: i as u32 + 1,
                pillar: "Talent Pipeline".to_string(),
                content: "post".to_string(),
                hashtags: vec![],
                image_url: None,
            })
            .collect();
        assert!(validate_calendar(posts.clone()).is_ok());

        let short = posts[..9].to_vec();
        assert!(matches!(
            validate_calendar(short),
            Err(GatewayError::Contract(_))
        ));
    }

    #[test]
    fn navigate_args_parse_step_slug() {
        let args: NavigateArgs =
            serde_json::from_value(serde_json::json!({"step": "report", "reason": "requested"}))
                .unwrap();
        assert_eq!(args.step, Step::Report);
    }
}
