use crate::cli::prompt::SimplePrompt;
use crate::opt::Ask;
use anyhow::Error;
use kaizen::PlatformClient;
use kaizen_config::ClientConfig;
use kaizen_config::assistant::AssistantProvider;
use kaizen_core::assistant::LlmProvider;
use kaizen_core::assistant::context::AssistantContext;
use kaizen_core::assistant::error::AssistantError;
use kaizen_core::assistant::session::AssistantSession;
use kaizen_core::assistant::shared::SharedAssistantSession;
use kaizen_core::openai::OpenAiProvider;
use kaizen_model::chat::{ChatMessage, Role};
use reedline::{Reedline, Signal};
use std::io::Write;
use std::time::Duration;

const LLM_TIMEOUT: Duration = Duration::from_secs(120);
const REFRESH: Duration = Duration::from_millis(50);

fn provider(config: &ClientConfig) -> Result<Box<dyn LlmProvider>, Error> {
    Ok(match config.assistant.provider {
        AssistantProvider::Backend => Box::new(PlatformClient::from_api_config(&config.api)?),
        AssistantProvider::OpenAi => Box::new(OpenAiProvider::new(
            &config.assistant,
            config.api.timeout().unwrap_or(LLM_TIMEOUT),
        )?),
    })
}

fn flush() {
    // A failed flush only delays output.
    let _ = std::io::stdout().flush();
}

/// Asks one question and prints the answer, following a streamed answer as it grows.
async fn answer(
    session: &SharedAssistantSession,
    provider: &dyn LlmProvider,
    question: &str,
    context: &AssistantContext,
) -> Result<(), AssistantError> {
    let ask = session.ask(provider, question, context);
    tokio::pin!(ask);

    let mut printed = 0;
    let mut ticker = tokio::time::interval(REFRESH);
    let result = loop {
        tokio::select! {
            result = &mut ask => break result,
            _ = ticker.tick() => {
                if let Some(pending) = session.transcript().iter().rev().find(|message| message.is_streaming()) {
                    print!("{}", &pending.content[printed..]);
                    printed = pending.content.len();
                    flush();
                }
            }
        }
    };

    match result {
        Ok(message) => {
            println!("{}", message.content.get(printed..).unwrap_or_default());
            Ok(())
        }
        Err(error @ (AssistantError::Busy | AssistantError::EmptyQuestion)) => Err(error),
        Err(error) => {
            if printed > 0 {
                println!();
            }
            if let Some(message) = session.transcript().last().filter(|message| message.is_error()) {
                println!("{}", message.content);
            }
            Err(error)
        }
    }
}

fn print_transcript(transcript: &[ChatMessage]) {
    for message in transcript {
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant if message.is_error() => "error",
            Role::Assistant => "assistant",
        };
        println!("[{}] {speaker}: {}", message.created_at.format("%H:%M:%S"), message.content);
    }
}

pub(crate) async fn ask(opt: Ask, config: &ClientConfig) -> Result<(), Error> {
    let provider = provider(config)?;

    let mut context = AssistantContext::for_course(opt.course);
    if let Some(module) = opt.module {
        context = context.with_module(module, opt.module_name);
    }
    if let Some(path) = opt.excerpt {
        context = context.with_excerpt(tokio::fs::read_to_string(&path).await?);
    }

    let session = SharedAssistantSession::new(AssistantSession::from_config(&config.assistant));

    if let Some(question) = opt.question {
        answer(&session, &*provider, &question, &context).await?;
        return Ok(());
    }

    println!("Ask anything about the course. Commands: /clear /history /exit.");
    let mut line_editor = Reedline::create();
    let prompt = SimplePrompt::new(context.course_id.clone());

    loop {
        let sig = line_editor.read_line(&prompt)?;
        let input = match sig {
            Signal::Success(input) => input,
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nAborted!");
                break;
            }
        };

        match input.trim() {
            "" => {}
            "/exit" | "/quit" => break,
            "/clear" => session.clear()?,
            "/history" => print_transcript(&session.transcript()),
            question => {
                if let Err(error) = answer(&session, &*provider, question, &context).await {
                    tracing::warn!(error = &error as &dyn std::error::Error, "question failed");
                }
            }
        }
    }

    session.close();
    Ok(())
}
