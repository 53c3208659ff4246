mod common;

use crate::common::{Platform, TOKEN, serve};
use kaizen::error::Error;
use kaizen::{Config, PlatformClient, PublicClient};
use kaizen_config::assistant::DeliveryMode;
use kaizen_config::quiz::PassThreshold;
use kaizen_core::assistant::FAILURE_MESSAGE;
use kaizen_core::assistant::context::AssistantContext;
use kaizen_core::assistant::error::AssistantError;
use kaizen_core::assistant::session::AssistantSession;
use kaizen_core::backend::ProgressBackend;
use kaizen_core::progress::ProgressTracker;
use kaizen_core::quiz::error::QuizError;
use kaizen_core::quiz::history::load_history;
use kaizen_core::quiz::session::{QuizSession, QuizState, Unavailable};
use kaizen_model::module::ModuleRef;
use kaizen_model::status::ComponentState;
use serde_json::json;
use std::sync::Arc;
use test_log::test;

async fn client() -> (PlatformClient, Arc<Platform>) {
    let platform = Arc::new(Platform::default());
    let url = serve(Arc::clone(&platform)).await;
    let client = PlatformClient::new(Config::new(url).with_token(TOKEN)).unwrap();
    (client, platform)
}

fn module(module: &str) -> ModuleRef {
    ModuleRef::new("quality-basics", module)
}

#[test(tokio::test)]
async fn test_status_sends_token() {
    let (client, platform) = client().await;

    let status = client.get_status().await.unwrap();
    assert!(status.is_ok());
    assert_eq!(status.component_state("llm"), Some(ComponentState::Ok));
    assert_eq!(
        platform.authorization.lock().unwrap().as_slice(),
        [Some(format!("Bearer {TOKEN}"))]
    );
}

#[test(tokio::test)]
async fn test_quiz_attempt_against_platform() {
    let (client, platform) = client().await;
    let mut session = QuizSession::new(module("spc"), client, PassThreshold::new(70).unwrap());

    assert_eq!(session.open().await.unwrap(), &QuizState::Presenting { index: 0 });
    session.select("q1", "a").unwrap();
    session.select("q2", "a").unwrap();
    session.select("q3", "b").unwrap();

    let outcome = session.submit().await.unwrap();
    assert_eq!((outcome.correct, outcome.total), (2, 3));
    assert_eq!(outcome.score, 67);
    assert!(!outcome.passed);
    assert_eq!(outcome.incorrect(), vec!["q3"]);

    let submissions = platform.submissions.lock().unwrap().clone();
    assert_eq!(
        submissions,
        vec![json!({"answers": [
            {"question_id": "q1", "option_id": "a"},
            {"question_id": "q2", "option_id": "a"},
            {"question_id": "q3", "option_id": "b"},
        ]})]
    );
}

#[test(tokio::test)]
async fn test_missing_or_empty_quiz_is_unavailable() {
    let (client, _platform) = client().await;

    for name in ["intro", "empty"] {
        let mut session = QuizSession::new(module(name), client.clone(), PassThreshold::default());
        assert_eq!(
            session.open().await.unwrap(),
            &QuizState::Unavailable(Unavailable::NoQuestions),
            "module {name}"
        );
    }
}

#[test(tokio::test)]
async fn test_rejected_submission_keeps_answers() {
    let (client, _platform) = client().await;
    let mut session = QuizSession::new(module("flaky"), client, PassThreshold::default());
    session.open().await.unwrap();
    for question in ["q1", "q2", "q3"] {
        session.select(question, "a").unwrap();
    }

    let error = session.submit().await.unwrap_err();
    assert!(matches!(error, QuizError::Submission(_)));
    assert!(session.last_error().unwrap().contains("503"));
    assert!(session.can_submit());
}

#[test(tokio::test)]
async fn test_history_and_missing_history() {
    let (client, _platform) = client().await;

    let history = load_history(&client, &module("spc")).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.latest().unwrap().score, 100);
    assert_eq!(history.attempts()[1].feedback.get("q3"), Some(&false));

    assert!(load_history(&client, &module("intro")).await.unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_module_ids_with_reserved_characters_reach_platform_intact() {
    let (client, platform) = client().await;
    let odd = module("5s#intro?part=2/3");

    let progress = client.update_progress(&odd, 40).await.unwrap();
    assert_eq!(progress.module.module_id, "5s#intro?part=2/3");
    assert_eq!(platform.progress.lock().unwrap().get("5s#intro?part=2/3"), Some(&40));
    assert_eq!(client.fetch_progress(&odd).await.unwrap().percentage, 40);
}

#[test(tokio::test)]
async fn test_progress_round_trip() {
    let (client, platform) = client().await;

    let unseen = client.fetch_progress(&module("spc")).await.unwrap();
    assert_eq!(unseen.percentage, 0);

    let tracker = ProgressTracker::new(client);
    assert_eq!(tracker.record(&module("spc"), 60).await.unwrap().percentage, 60);
    // The platform keeps the highest value it has seen.
    assert_eq!(tracker.record(&module("spc"), 30).await.unwrap().percentage, 60);
    assert!(tracker.complete(&module("spc")).await.unwrap().completed());
    assert_eq!(platform.progress.lock().unwrap().get("spc"), Some(&100));
}

#[test(tokio::test)]
async fn test_streamed_answer_from_platform() {
    let (client, _platform) = client().await;
    let mut session = AssistantSession::new(DeliveryMode::Streaming, 4000);
    let context = AssistantContext::for_course("quality-basics");

    let answer = session.ask(&client, "What does SPC stand for?", &context).await.unwrap();
    assert_eq!(answer.content, "Statistical Process Control");
    assert!(!answer.is_streaming());
}

#[test(tokio::test)]
async fn test_cut_stream_from_platform() {
    let (client, _platform) = client().await;
    let mut session = AssistantSession::new(DeliveryMode::Streaming, 4000);
    let context = AssistantContext::for_course("quality-basics");

    let result = session.ask(&client, "Please cut this short", &context).await;
    assert!(matches!(result, Err(AssistantError::IncompleteStream)));
    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].content, FAILURE_MESSAGE);
}

#[test(tokio::test)]
async fn test_complete_answer_from_platform() {
    let (client, _platform) = client().await;
    let mut session = AssistantSession::new(DeliveryMode::Complete, 4000);
    let context = AssistantContext::for_course("quality-basics").with_module("spc", None);

    let answer = session.ask(&client, "control limits", &context).await.unwrap();
    assert_eq!(answer.content, "You asked about control limits");
}

#[test(tokio::test)]
async fn test_unreachable_platform() {
    let client = PlatformClient::new(Config::new("http://127.0.0.1:9/".parse().unwrap())).unwrap();
    let error = client.get_status().await.unwrap_err();
    assert!(matches!(error, Error::Http(_)));
    assert!(!error.is_not_found());
}
