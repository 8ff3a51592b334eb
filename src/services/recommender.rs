use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::RecommenderSettings;
use crate::core::{
    build_call_followup, build_email, build_voice_script, generate_content, prepare_for_speech,
    MatchResult, Matcher, ReplyDraft, ReplyWizard, WizardError, WizardEvent,
};
use crate::models::{
    CallReplyResponse, ExtractedInfo, RecommendRequest, RecommendResponse, ReplyResponse,
    StudentProfile, SummaryResponse, VoiceNoteRequest,
};
use crate::services::catalog::PropertyCatalog;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Reply wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// Turns student requests into ranked matches and generated copy
pub struct RecommendationService {
    catalog: Arc<dyn PropertyCatalog>,
    matcher: Matcher,
    latency: Duration,
    reply_max_results: usize,
    summary_max_results: usize,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn PropertyCatalog>, matcher: Matcher, settings: &RecommenderSettings) -> Self {
        Self {
            catalog,
            matcher,
            latency: Duration::from_millis(settings.simulated_latency_ms),
            reply_max_results: settings.reply_max_results,
            summary_max_results: settings.summary_max_results,
        }
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    /// Score the catalog for one request
    ///
    /// `default_limit` applies when the request does not set `maxResults`.
    async fn rank(&self, req: &RecommendRequest, default_limit: usize) -> MatchResult {
        let matcher = match req.area_matching {
            Some(mode) => self.matcher.with_area_matching(mode),
            None => self.matcher,
        };
        let limit = req.max_results.unwrap_or(default_limit);

        self.rank_profile(&req.to_profile(), matcher, limit).await
    }

    async fn rank_profile(&self, profile: &StudentProfile, matcher: Matcher, limit: usize) -> MatchResult {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = matcher.find_matches(profile, self.catalog.properties(), limit);

        tracing::info!(
            "Ranked {} of {} properties for {} (areas={:?}, budget=£{}-£{})",
            result.matches.len(),
            result.total_candidates,
            profile.display_name(),
            profile.preferred_areas,
            profile.budget_min,
            profile.budget_max
        );

        result
    }

    pub async fn recommend(&self, req: &RecommendRequest) -> RecommendResponse {
        let result = self.rank(req, self.summary_max_results).await;

        RecommendResponse {
            request_id: uuid::Uuid::new_v4().to_string(),
            matches: result.matches,
            total_candidates: result.total_candidates,
            generated_at: chrono::Utc::now(),
        }
    }

    /// Reply-engine draft, driven through the wizard stages
    pub async fn draft_reply(&self, req: &RecommendRequest) -> Result<ReplyResponse, RecommendError> {
        let profile = req.to_profile();
        let mut wizard = ReplyWizard::new();
        wizard.handle(WizardEvent::Submit(profile.clone()))?;

        let result = self.rank(req, self.reply_max_results).await;
        let content = generate_content(&profile, &result.matches, req.tone, req.platform);

        let stage = wizard.handle(WizardEvent::Scored(ReplyDraft {
            matches: result.matches,
            content,
        }))?;

        let draft = wizard.into_draft().ok_or(WizardError::InvalidTransition {
            stage,
            event: "scored",
        })?;

        Ok(ReplyResponse {
            request_id: uuid::Uuid::new_v4().to_string(),
            stage,
            content: draft.content,
            matches: draft.matches,
            generated_at: chrono::Utc::now(),
        })
    }

    /// Summary email and voice script for a student
    pub async fn summary(&self, req: &RecommendRequest) -> SummaryResponse {
        let profile = req.to_profile();
        let result = self.rank(req, self.summary_max_results).await;

        SummaryResponse {
            request_id: uuid::Uuid::new_v4().to_string(),
            email: build_email(&profile, &result.matches),
            voice_script: build_voice_script(&profile, &result.matches),
            match_count: result.matches.len(),
            matches: result.matches,
            generated_at: chrono::Utc::now(),
        }
    }

    /// Follow-up email and voice note after a transcribed call
    pub async fn call_followup(&self, info: &ExtractedInfo) -> CallReplyResponse {
        let profile = info.to_profile();
        let result = self
            .rank_profile(&profile, self.matcher, self.reply_max_results)
            .await;
        let followup = build_call_followup(info, &result.matches);

        CallReplyResponse {
            request_id: uuid::Uuid::new_v4().to_string(),
            email: followup.email,
            voice_note_text: followup.voice_note_text,
            properties: result.matches,
            generated_at: chrono::Utc::now(),
        }
    }

    /// Text to synthesize for a voice note
    ///
    /// Uses the caller's text when given, otherwise a fresh voice script.
    pub async fn voice_note_text(&self, req: &VoiceNoteRequest) -> String {
        match req.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => prepare_for_speech(text),
            None => {
                let profile = req.profile.to_profile();
                let result = self.rank(&req.profile, self.summary_max_results).await;
                prepare_for_speech(&build_voice_script(&profile, &result.matches))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WizardStage;
    use crate::models::{Platform, Tone};
    use crate::services::catalog::StaticCatalog;

    fn service() -> RecommendationService {
        RecommendationService::new(
            Arc::new(StaticCatalog::builtin()),
            Matcher::default(),
            &RecommenderSettings::default(),
        )
    }

    fn request() -> RecommendRequest {
        serde_json::from_value(serde_json::json!({
            "firstName": "Aisha",
            "budgetMin": 170,
            "budgetMax": 200,
            "preferredAreas": "Fallowfield, City Centre",
            "vibeKeywords": ["social", "quiet"],
            "moveInDate": "September"
        }))
        .unwrap()
    }

    #[test]
    fn test_recommend_uses_summary_limit() {
        let response = tokio_test::block_on(service().recommend(&request()));

        assert_eq!(response.total_candidates, 4);
        let codes: Vec<&str> = response.matches.iter().map(|m| m.property.code.as_str()).collect();
        assert_eq!(codes, vec!["HSR-101", "HSR-204", "HSR-309"]);
    }

    #[tokio::test]
    async fn test_draft_reply_reaches_review() {
        let mut req = request();
        req.tone = Tone::Hype;
        req.platform = Platform::WhatsApp;

        let reply = service().draft_reply(&req).await.unwrap();

        assert_eq!(reply.stage, WizardStage::Reviewing);
        assert_eq!(reply.matches.len(), 2);
        assert!(reply.content.starts_with("Hey Aisha! 👋"));
    }

    #[tokio::test]
    async fn test_summary_lists_three() {
        let summary = service().summary(&request()).await;

        assert_eq!(summary.match_count, 3);
        assert!(summary.email.contains("1) Bright Ensuite in Social Flatshare"));
        assert!(summary.email.contains("3) Modern Ensuite in Premium Building"));
        assert!(!summary.voice_script.is_empty());
    }

    #[tokio::test]
    async fn test_max_results_override() {
        let mut req = request();
        req.max_results = Some(1);

        let response = service().recommend(&req).await;
        assert_eq!(response.matches.len(), 1);
        assert_eq!(response.matches[0].property.code, "HSR-101");
    }

    #[tokio::test]
    async fn test_voice_note_prefers_given_text() {
        let req: VoiceNoteRequest = serde_json::from_value(serde_json::json!({
            "firstName": "Aisha",
            "budgetMin": 170,
            "text": "Subject: Hello\n**Great** news, see https://housr.co/p/101"
        }))
        .unwrap();

        let text = service().voice_note_text(&req).await;
        assert!(!text.contains("Subject"));
        assert!(!text.contains("https://"));
        assert!(text.contains("check the link"));
    }

    #[tokio::test]
    async fn test_call_followup_ranks_nearest_rents() {
        let info = ExtractedInfo {
            budget: "£160/week".to_string(),
            location: "Manchester area".to_string(),
            move_in_date: "September".to_string(),
            key_concerns: vec!["Bills included".to_string()],
        };

        let reply = service().call_followup(&info).await;

        assert_eq!(reply.properties.len(), 2);
        assert!(reply.properties[0].property.weekly_rent <= reply.properties[1].property.weekly_rent);
        assert_eq!(reply.email.subject, "Perfect rooms near Manchester area - £160/week range");
        assert!(reply.email.body.contains(&reply.properties[0].property.title));
    }
}
