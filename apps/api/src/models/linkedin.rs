use serde::{Deserialize, Serialize};

/// One of the ten calendar posts. The batch is replaced atomically by
/// calendar generation; content and hashtags are user-editable afterwards,
/// and each post acquires its graphic independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInPost {
    pub day: u32,
    /// Content pillar label (Employer ROI, Talent Pipeline, ...).
    pub pillar: String,
    pub content: String,
    pub hashtags: Vec<String>,
    /// Data URL of the generated graphic, once one exists.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update applied to a single post in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostEdit {
    pub content: Option<String>,
    pub hashtags: Option<Vec<String>>,
}

impl LinkedInPost {
    pub fn apply(&mut self, edit: PostEdit) {
        if let Some(content) = edit.content {
            self.content = content;
        }
        if let Some(hashtags) = edit.hashtags {
            self.hashtags = hashtags;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_applies_only_provided_fields() {
        let mut post = LinkedInPost {
            day: 1,
            pillar: "Employer ROI".to_string(),
            content: "original".to_string(),
            hashtags: vec!["Workforce".to_string()],
            image_url: Some("data:image/png;base64,abc".to_string()),
        };
        post.apply(PostEdit {
            content: Some("rewritten".to_string()),
            hashtags: None,
        });
        assert_eq!(post.content, "rewritten");
        assert_eq!(post.hashtags, vec!["Workforce".to_string()]);
        assert!(post.image_url.is_some());
    }
}
