//! Visa analysis pipeline: profile → prompt → one LLM call → normalized JSON.

use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::normalizer::{normalize_response, strip_code_fences};
use crate::analysis::profile::{build_prompt, Profile};
use crate::analysis::schema::{validate_analysis, Eligibility};
use crate::errors::AppError;
use crate::llm_client::{CompletionRequest, TextGenerator};

/// Per-process switches for the analysis pipeline. Read-only after startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Reject replies that parse as JSON but do not match `AnalysisResult`.
    pub schema_validation: bool,
}

/// Runs one analysis. Returns the parsed analysis exactly as the model sent it,
/// or the first failure: upstream call, JSON parse, or (when enabled) shape.
pub async fn analyze_profile(
    profile: &Profile,
    llm: &dyn TextGenerator,
    options: AnalysisOptions,
) -> Result<Value, AppError> {
    let analysis_id = Uuid::new_v4();
    let prompt = build_prompt(profile);
    info!(%analysis_id, prompt_chars = prompt.len(), "Requesting visa analysis");

    let request = CompletionRequest::new(prompt);
    let reply = llm.generate(&request).await?;

    let analysis = normalize_response(&reply).map_err(|failure| {
        warn!(%analysis_id, "AI response was not valid JSON: {}", failure.message);
        AppError::Parse(failure)
    })?;

    if options.schema_validation {
        let typed = validate_analysis(&analysis).map_err(|source| AppError::Schema {
            source,
            raw_response: strip_code_fences(&reply).to_string(),
        })?;
        info!(
            %analysis_id,
            recommended_path = %typed.recommended_path,
            eligible = typed
                .visas
                .values()
                .filter(|v| v.eligible == Eligibility::Yes)
                .count(),
            risk_factors = typed.risk_factors.len(),
            "Analysis matches schema"
        );
    }

    info!(%analysis_id, reply_chars = reply.len(), "Visa analysis complete");
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::schema::tests::full_analysis;
    use crate::llm_client::fake::FakeGenerator;
    use crate::llm_client::{LlmError, MAX_TOKENS, MODEL};

    const STRICT: AnalysisOptions = AnalysisOptions {
        schema_validation: true,
    };

    #[tokio::test]
    async fn test_valid_reply_is_returned_unchanged() {
        let expected = full_analysis();
        let llm = FakeGenerator::replying(expected.to_string());

        let analysis = analyze_profile(&Profile::default(), &llm, AnalysisOptions::default())
            .await
            .unwrap();

        assert_eq!(analysis, expected);
    }

    #[tokio::test]
    async fn test_request_carries_model_limits_and_prompt() {
        let llm = FakeGenerator::replying("{}");
        let profile = Profile {
            country: Some("India".to_string()),
            ..Profile::default()
        };

        analyze_profile(&profile, &llm, AnalysisOptions::default())
            .await
            .unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, MODEL);
        assert_eq!(requests[0].max_tokens, MAX_TOKENS);
        assert!(requests[0].prompt.contains("- Country of Origin: India"));
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let expected = full_analysis();
        let llm = FakeGenerator::replying(format!("```json\n{expected}\n```"));

        let analysis = analyze_profile(&Profile::default(), &llm, STRICT)
            .await
            .unwrap();

        assert_eq!(analysis, expected);
    }

    #[tokio::test]
    async fn test_prose_reply_is_parse_failure() {
        let raw = "Sure! Here's the analysis: {\"visas\": {}}";
        let llm = FakeGenerator::replying(raw);

        let err = analyze_profile(&Profile::default(), &llm, AnalysisOptions::default())
            .await
            .unwrap_err();

        match err {
            AppError::Parse(failure) => assert_eq!(failure.raw_response, raw),
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_a_parse_failure() {
        let llm = FakeGenerator::failing(401, "invalid x-api-key");

        let err = analyze_profile(&Profile::default(), &llm, AnalysisOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Upstream(LlmError::Api { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_shape_mismatch_passes_without_validation() {
        let llm = FakeGenerator::replying(r#"{"visas": {"H1B": {}}}"#);

        let analysis = analyze_profile(&Profile::default(), &llm, AnalysisOptions::default())
            .await
            .unwrap();

        assert!(analysis["visas"]["H1B"].is_object());
    }

    #[tokio::test]
    async fn test_shape_mismatch_fails_with_validation() {
        let llm = FakeGenerator::replying("```\n{\"visas\": {\"H1B\": {}}}\n```");

        let err = analyze_profile(&Profile::default(), &llm, STRICT)
            .await
            .unwrap_err();

        match err {
            AppError::Schema { raw_response, .. } => {
                assert_eq!(raw_response, r#"{"visas": {"H1B": {}}}"#)
            }
            other => panic!("expected schema failure, got {other:?}"),
        }
    }
}
