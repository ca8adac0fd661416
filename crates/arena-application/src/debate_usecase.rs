//! Debate use case implementation.
//!
//! This module provides the `DebateUseCase` which orchestrates the
//! transcript-to-artifact pipeline: prompt composition, the outbound
//! generation call, sanitization, structural validation, provenance
//! checking, and record persistence. Per-kind failure policy lives here:
//! a malformed report fails the whole request, a malformed diagram
//! degrades to a diagnostic while the report is still returned, and an
//! empty generation degrades to a placeholder reply.

use arena_core::debate::{DebateRecord, DebateRecordRepository, DebateSession, Locale};
use arena_core::error::{ArenaError, Result};
use arena_core::level::{self, QuizAssessment, SkillLevel};
use arena_core::profile;
use arena_core::provenance;
use arena_core::report::{DiagramArtifact, Profile, Report};
use arena_core::sanitize::{PayloadKind, sanitize};
use arena_core::validate;
use arena_interaction::generation::GenerativeAgent;
use arena_interaction::prompts::{PromptComposer, PromptContext, PromptKind};
use arena_interaction::schemas;
use std::sync::Arc;
use std::time::Duration;

/// Pause between the report and diagram calls of one finalization, to
/// respect upstream rate limits. A serialization choice, not a correctness
/// requirement.
const DEFAULT_INTER_CALL_PAUSE: Duration = Duration::from_millis(500);

/// What became of the diagram half of a finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramOutcome {
    /// The diagram validated and was persisted with the record.
    Rendered(DiagramArtifact),
    /// The diagram failed structural validation; the raw candidate is kept
    /// so a diagnostic view can be shown instead of a crash.
    Diagnostic { candidate: String, reason: String },
}

/// The artifacts produced by finalizing one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Id of the persisted record.
    pub record_id: String,
    /// The validated, provenance-checked report.
    pub report: Report,
    /// The diagram, rendered or degraded.
    pub diagram: DiagramOutcome,
}

/// Use case orchestrating the debate pipeline.
///
/// Each operation is a single sequential chain of stage calls; independent
/// sessions can run their own chains fully in parallel since the composer,
/// sanitizer and validators are pure functions over their inputs.
pub struct DebateUseCase {
    /// The generative text backend.
    agent: Arc<dyn GenerativeAgent>,
    /// Locale/kind prompt template table.
    composer: PromptComposer,
    /// Repository for completed debate records.
    records: Arc<dyn DebateRecordRepository>,
    /// Pause between the two upstream calls of a finalization.
    inter_call_pause: Duration,
}

impl DebateUseCase {
    /// Creates a new `DebateUseCase` instance.
    ///
    /// # Arguments
    ///
    /// * `agent` - The generative text backend
    /// * `records` - Repository for completed debate records
    pub fn new(agent: Arc<dyn GenerativeAgent>, records: Arc<dyn DebateRecordRepository>) -> Self {
        Self {
            agent,
            composer: PromptComposer::new(),
            records,
            inter_call_pause: DEFAULT_INTER_CALL_PAUSE,
        }
    }

    /// Overrides the pause between the report and diagram calls.
    pub fn with_inter_call_pause(mut self, pause: Duration) -> Self {
        self.inter_call_pause = pause;
        self
    }

    /// Produces the opponent's next reply for an ongoing session.
    ///
    /// An empty generation is a soft failure: the caller gets the locale's
    /// fixed placeholder reply instead of an error. State mutation (the
    /// message append) is the caller's job and happens before this call, so
    /// an abandoned call leaves no partial state behind.
    pub async fn run_turn(&self, session: &DebateSession) -> Result<String> {
        let ctx = PromptContext::from_session(session);
        let prompt = self.composer.compose(PromptKind::Turn, session.locale, &ctx)?;

        tracing::info!(
            "[DebateUseCase] running turn for topic '{}' ({} messages)",
            session.topic,
            session.messages.len()
        );

        match self.agent.generate(&prompt, None).await {
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(err) if err.is_soft() => {
                tracing::warn!("[DebateUseCase] empty generation, serving placeholder reply");
                Ok(placeholder_reply(session.locale).to_string())
            }
            Err(err) => Err(err),
        }
    }

    /// Converts a finished session into its persisted artifacts.
    ///
    /// The report pipeline is fatal on rejection; the diagram pipeline
    /// degrades to [`DiagramOutcome::Diagnostic`]. The record is appended
    /// only after the report has fully validated, so a failed pipeline
    /// leaves no partial artifact.
    pub async fn finalize_session(
        &self,
        session: &DebateSession,
        owner_id: &str,
    ) -> Result<SessionOutcome> {
        let report = self.generate_report(session).await?;

        // One fixed pause between the two upstream calls of this request.
        tokio::time::sleep(self.inter_call_pause).await;

        let diagram = self.generate_diagram(session).await?;

        let persisted = match &diagram {
            DiagramOutcome::Rendered(artifact) => artifact.clone(),
            DiagramOutcome::Diagnostic { .. } => DiagramArtifact::empty(),
        };

        let record = DebateRecord::new(owner_id, session.topic.clone(), report.clone(), persisted);
        let record_id = self.records.append(&record).await?;

        tracing::info!(
            "[DebateUseCase] finalized session for owner {} as record {}",
            owner_id,
            record_id
        );

        Ok(SessionOutcome {
            record_id,
            report,
            diagram,
        })
    }

    /// Synthesizes a longitudinal skill profile from an owner's history.
    ///
    /// # Errors
    ///
    /// `ArenaError::InsufficientHistory` when fewer than three records
    /// exist; this is a user-actionable precondition, not a system fault.
    pub async fn build_profile(&self, owner_id: &str, locale: Locale) -> Result<Profile> {
        let history = self.records.list_by_owner(owner_id).await?;
        let input = profile::aggregate(&history)?;

        tracing::info!(
            "[DebateUseCase] building profile for owner {} from {} records",
            owner_id,
            history.len()
        );

        let ctx = PromptContext::for_profile(input.summary_data.clone());
        let prompt = self.composer.compose(PromptKind::Profile, locale, &ctx)?;

        let schema = schemas::profile_schema();
        let raw = self.agent.generate(&prompt, Some(&schema)).await?;
        let candidate = sanitize(&raw, PayloadKind::Json);
        let mut synthesized = validate::validate_profile(&candidate)?;

        // The dominant fallacy is derived deterministically from the
        // frequency table, not trusted to the generation.
        if let Some(dominant) = input.dominant_fallacy() {
            synthesized.dominant_fallacy = dominant.to_string();
        }

        Ok(synthesized)
    }

    /// Maps a quiz score to a proficiency level.
    pub fn classify_quiz(&self, score: u32) -> SkillLevel {
        level::classify(score)
    }

    /// Builds a quiz assessment with its derived level.
    pub fn assess_quiz(&self, topic_id: &str, score: u32) -> QuizAssessment {
        QuizAssessment::new(topic_id, score)
    }

    async fn generate_report(&self, session: &DebateSession) -> Result<Report> {
        let ctx = PromptContext::from_session(session);
        let prompt = self
            .composer
            .compose(PromptKind::Report, session.locale, &ctx)?;

        let schema = schemas::report_schema();
        let raw = self.agent.generate(&prompt, Some(&schema)).await?;
        let candidate = sanitize(&raw, PayloadKind::Json);
        let report = validate::validate_report(&candidate)?;

        let user_sentences = session.user_sentences();
        Ok(provenance::check_report(report, &user_sentences))
    }

    async fn generate_diagram(&self, session: &DebateSession) -> Result<DiagramOutcome> {
        let ctx = PromptContext::from_session(session);
        let prompt = self
            .composer
            .compose(PromptKind::Diagram, session.locale, &ctx)?;

        let raw = match self.agent.generate(&prompt, None).await {
            Ok(raw) => raw,
            Err(err) if err.is_soft() => {
                return Ok(DiagramOutcome::Diagnostic {
                    candidate: String::new(),
                    reason: "upstream returned no diagram content".to_string(),
                });
            }
            Err(err) => return Err(err),
        };
        let candidate = sanitize(&raw, PayloadKind::Diagram);

        match validate::validate_diagram(&candidate) {
            Ok(artifact) => Ok(DiagramOutcome::Rendered(artifact)),
            Err(ArenaError::Rejection { reason, candidate }) => {
                tracing::warn!(
                    "[DebateUseCase] diagram rejected ({}), degrading to diagnostic",
                    reason
                );
                Ok(DiagramOutcome::Diagnostic { candidate, reason })
            }
            Err(other) => Err(other),
        }
    }
}

/// The fixed reply served when the upstream generation was empty.
pub fn placeholder_reply(locale: Locale) -> &'static str {
    match locale {
        Locale::Tr => "Buna şu anda bir cevap üretemedim. Lütfen argümanını biraz açarak tekrar dener misin?",
        Locale::En => "I could not come up with a reply to that just now. Could you expand your argument and try again?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::debate::{Message, Stance};
    use arena_core::provenance::UNVERIFIED_QUOTE_PLACEHOLDER;
    use arena_infrastructure::InMemoryDebateRecordRepository;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock agent replaying a scripted response sequence.
    struct ScriptedAgent {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<(String, bool)>>,
    }

    impl ScriptedAgent {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, bool)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerativeAgent for ScriptedAgent {
        async fn generate(&self, prompt: &str, output_schema: Option<&Value>) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), output_schema.is_some()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ArenaError::internal("script exhausted")))
        }
    }

    fn session() -> DebateSession {
        let mut session = DebateSession::new("lowering taxes", Stance::For, Locale::En);
        session.append(Message::user("I think taxes should be lower"));
        session.append(Message::opponent("Public services need funding"));
        session
    }

    fn usecase(
        responses: Vec<Result<String>>,
    ) -> (DebateUseCase, Arc<ScriptedAgent>, Arc<InMemoryDebateRecordRepository>) {
        let agent = Arc::new(ScriptedAgent::new(responses));
        let records = Arc::new(InMemoryDebateRecordRepository::new());
        let usecase = DebateUseCase::new(agent.clone(), records.clone())
            .with_inter_call_pause(Duration::ZERO);
        (usecase, agent, records)
    }

    const FENCED_REPORT: &str = "```json\n{\"strongestArgument\": \"Lower taxes spur growth\", \"weakPoint\": {\"fallacyType\": \"Hasty Generalization\", \"quotedSentence\": \"taxes should be lower\"}, \"persuasivenessScore\": 7}\n```";

    #[tokio::test]
    async fn test_run_turn_returns_trimmed_reply() {
        let (usecase, agent, _) = usecase(vec![Ok("  A fine counterpoint.  ".to_string())]);
        let reply = usecase.run_turn(&session()).await.unwrap();
        assert_eq!(reply, "A fine counterpoint.");

        // Turn prompts never carry a schema hint.
        let calls = agent.calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].1);
        assert!(calls[0].0.contains("lowering taxes"));
    }

    #[tokio::test]
    async fn test_run_turn_degrades_empty_response_to_placeholder() {
        let (usecase, _, _) = usecase(vec![Err(ArenaError::EmptyResponse)]);
        let reply = usecase.run_turn(&session()).await.unwrap();
        assert_eq!(reply, placeholder_reply(Locale::En));
    }

    #[tokio::test]
    async fn test_run_turn_propagates_upstream_failure() {
        let (usecase, _, _) = usecase(vec![Err(ArenaError::upstream(Some(500), "boom"))]);
        assert!(usecase.run_turn(&session()).await.unwrap_err().is_upstream());
    }

    #[tokio::test]
    async fn test_finalize_session_end_to_end() {
        let (usecase, agent, records) = usecase(vec![
            Ok(FENCED_REPORT.to_string()),
            Ok("```mermaid\ngraph TD;\nA[\"Taxes\"]-->B[\"Growth\"]\n```".to_string()),
        ]);

        let outcome = usecase.finalize_session(&session(), "owner-1").await.unwrap();

        assert_eq!(outcome.report.persuasiveness_score, 7);
        assert!(!outcome.report.strongest_argument.contains("```"));
        assert_eq!(
            outcome.report.weak_point.quoted_sentence,
            "taxes should be lower"
        );
        match &outcome.diagram {
            DiagramOutcome::Rendered(artifact) => {
                assert!(artifact.source_text.starts_with("graph TD"));
            }
            other => panic!("expected rendered diagram, got {other:?}"),
        }

        // Report call is schema-hinted, diagram call is not.
        let calls = agent.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].1);
        assert!(!calls[1].1);

        let history = records.list_by_owner("owner-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, outcome.record_id);
        assert_eq!(history[0].topic, "lowering taxes");
    }

    #[tokio::test]
    async fn test_finalize_rewrites_fabricated_quote() {
        let fabricated = FENCED_REPORT.replace("taxes should be lower", "the sky is green");
        let (usecase, _, _) = usecase(vec![
            Ok(fabricated),
            Ok("graph TD;\nA-->B".to_string()),
        ]);

        let outcome = usecase.finalize_session(&session(), "owner-1").await.unwrap();
        assert_eq!(
            outcome.report.weak_point.quoted_sentence,
            UNVERIFIED_QUOTE_PLACEHOLDER
        );
    }

    #[tokio::test]
    async fn test_malformed_report_fails_whole_request_without_persisting() {
        let (usecase, _, records) = usecase(vec![Ok("no json here".to_string())]);

        let err = usecase
            .finalize_session(&session(), "owner-1")
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        assert!(records.list_by_owner("owner-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_diagram_degrades_but_keeps_report() {
        let (usecase, _, records) = usecase(vec![
            Ok(FENCED_REPORT.to_string()),
            Ok("graph TD;\nA[\"Open".to_string()),
        ]);

        let outcome = usecase.finalize_session(&session(), "owner-1").await.unwrap();
        assert_eq!(outcome.report.persuasiveness_score, 7);
        match &outcome.diagram {
            DiagramOutcome::Diagnostic { candidate, .. } => {
                assert!(candidate.contains("A[\"Open"));
            }
            other => panic!("expected diagnostic, got {other:?}"),
        }

        // The record is still persisted, with an empty diagram artifact.
        let history = records.list_by_owner("owner-1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].diagram.is_empty());
    }

    #[tokio::test]
    async fn test_build_profile_requires_three_records() {
        let (usecase, _, _) = usecase(vec![]);
        let err = usecase
            .build_profile("owner-1", Locale::En)
            .await
            .unwrap_err();
        assert!(err.is_insufficient_history());
    }

    #[tokio::test]
    async fn test_build_profile_synthesizes_from_history() {
        let report_for = |fallacy: &str| FENCED_REPORT.replace("Hasty Generalization", fallacy);
        let diagram = "graph TD;\nA-->B".to_string();
        let (usecase, agent, _) = usecase(vec![
            Ok(report_for("Straw Man")),
            Ok(diagram.clone()),
            Ok(report_for("Straw Man")),
            Ok(diagram.clone()),
            Ok(report_for("Ad Hominem")),
            Ok(diagram),
            Ok(r#"{"dominantFallacy": "whatever the model said", "adviceForFallacy": "Attack arguments, not people", "style": "assertive", "strength": "clarity", "growthArea": "evidence"}"#.to_string()),
        ]);

        for _ in 0..3 {
            usecase.finalize_session(&session(), "owner-1").await.unwrap();
        }

        let profile = usecase.build_profile("owner-1", Locale::En).await.unwrap();
        // The dominant fallacy comes from the frequency table, not the model.
        assert_eq!(profile.dominant_fallacy, "Straw Man");
        assert_eq!(profile.style, "assertive");

        // The profile prompt embeds the aggregated summary and is
        // schema-hinted.
        let calls = agent.calls();
        let (profile_prompt, hinted) = calls.last().unwrap();
        assert!(hinted);
        assert!(profile_prompt.contains("Straw Man x2"));
        assert!(profile_prompt.contains("scores: [7, 7, 7]"));
    }

    #[test]
    fn test_quiz_classification_delegates() {
        let (usecase, _, _) = usecase(vec![]);
        assert_eq!(usecase.classify_quiz(9), SkillLevel::Master);
        let assessment = usecase.assess_quiz("logic-101", 4);
        assert_eq!(assessment.level, SkillLevel::Entry);
        assert_eq!(assessment.topic_id, "logic-101");
    }
}
