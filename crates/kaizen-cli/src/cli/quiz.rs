use crate::cli::prompt::SimplePrompt;
use crate::opt::QuizRun;
use anyhow::{Error, anyhow};
use kaizen::PlatformClient;
use kaizen_config::ClientConfig;
use kaizen_core::invalidation::InvalidationBus;
use kaizen_core::progress::ProgressTracker;
use kaizen_core::quiz::error::QuizError;
use kaizen_core::quiz::history::load_history;
use kaizen_core::quiz::session::{QuizOutcome, QuizSession, QuizState, Unavailable};
use kaizen_model::module::ModuleRef;
use regex::Regex;
use reedline::{Reedline, Signal};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Exit,
    Next,
    Previous,
    GoTo(usize),
    Submit,
    Show,
    Select(String),
    Unknown(String),
}

fn parse_command(command_regex: &Regex, input: &str) -> Command {
    let Some(captures) = command_regex.captures(input) else {
        return Command::Select(input.to_owned());
    };
    let command = captures.get(1).map_or("", |m| m.as_str());
    let arg = captures.get(2).map(|m| m.as_str().trim());
    match (command, arg) {
        ("exit" | "quit", _) => Command::Exit,
        ("next" | "n", _) => Command::Next,
        ("prev" | "p", _) => Command::Previous,
        ("goto" | "g", Some(arg)) => arg
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .map_or_else(|| Command::Unknown(input.to_owned()), Command::GoTo),
        ("submit", _) => Command::Submit,
        ("show" | "status", _) => Command::Show,
        _ => Command::Unknown(input.to_owned()),
    }
}

/// Accepts an option id or its 1-based position.
fn resolve_option(session: &QuizSession<PlatformClient>, input: &str) -> String {
    let Some(question) = session.current_question() else {
        return input.to_owned();
    };
    if question.has_option(input) {
        return input.to_owned();
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| question.options.get(index))
        .map_or_else(|| input.to_owned(), |option| option.option_id.clone())
}

fn print_question(session: &QuizSession<PlatformClient>) {
    let (Some(index), Some(question)) = (session.current_index(), session.current_question()) else {
        return;
    };
    println!("\nQuestion {}/{}: {}", index + 1, session.questions().len(), question.question);
    let selected = session.selected(&question.id);
    for (position, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(option.option_id.as_str()) { "*" } else { " " };
        println!("{marker} {}. [{}] {}", position + 1, option.option_id, option.option_text);
    }
}

fn print_outcome(outcome: &QuizOutcome) {
    println!(
        "\n{} of {} correct, score {}%: {}",
        outcome.correct,
        outcome.total,
        outcome.score,
        if outcome.passed { "passed" } else { "not passed" }
    );
    let incorrect = outcome.incorrect();
    if !incorrect.is_empty() {
        println!("Incorrect: {}", incorrect.join(", "));
    }
}

fn prompt_for(session: &QuizSession<PlatformClient>) -> SimplePrompt {
    match session.current_index() {
        Some(index) => SimplePrompt::new(format!("{} {}/{}", session.module(), index + 1, session.questions().len())),
        None => SimplePrompt::new(session.module().to_string()),
    }
}

async fn history(client: &PlatformClient, module: &ModuleRef) -> Result<(), Error> {
    let history = load_history(client, module).await?;
    if history.is_empty() {
        println!("No attempts yet.");
        return Ok(());
    }
    for attempt in history.attempts() {
        println!(
            "{}  {:>3}%  {}",
            attempt.completed_at.format("%Y-%m-%d %H:%M"),
            attempt.score,
            if attempt.passed { "passed" } else { "not passed" }
        );
    }
    if let Some(best) = history.best() {
        println!("Best score: {}%", best.score);
    }
    Ok(())
}

pub(crate) async fn quiz(opt: QuizRun, config: &ClientConfig) -> Result<(), Error> {
    let client = PlatformClient::from_api_config(&config.api)?;
    let module = ModuleRef::new(opt.course, opt.module);

    if opt.history {
        return history(&client, &module).await;
    }

    let bus = InvalidationBus::default();
    let mut invalidations = bus.subscribe();
    let tracker = ProgressTracker::new(client.clone()).with_invalidation(bus.clone());
    let mut session =
        QuizSession::new(module.clone(), client, config.quiz.pass_threshold).with_invalidation(bus);

    match session.open().await? {
        QuizState::Unavailable(Unavailable::NoQuestions) => {
            println!("This module has no quiz.");
            return Ok(());
        }
        QuizState::Unavailable(Unavailable::LoadFailed(reason)) => {
            return Err(anyhow!("Could not load the quiz: {reason}"));
        }
        _ => {}
    }

    println!(
        "Answer with an option id or number. Commands: /next /prev /goto <n> /show /submit /exit. \
         Passing needs {}%.",
        session.threshold().percent()
    );
    print_question(&session);

    let mut line_editor = Reedline::create();
    let command_regex = Regex::new(r"^/(\w+)(?:\s+(.*))?$")?;

    loop {
        let sig = line_editor.read_line(&prompt_for(&session))?;
        let input = match sig {
            Signal::Success(input) => input,
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nAborted!");
                break;
            }
        };
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let result: Result<(), QuizError> = match parse_command(&command_regex, input) {
            Command::Exit => break,
            Command::Next => session.next().map(|_| print_question(&session)),
            Command::Previous => session.previous().map(|_| print_question(&session)),
            Command::GoTo(index) => session.go_to(index).map(|_| print_question(&session)),
            Command::Show => {
                print_question(&session);
                let unanswered = session.unanswered();
                if !unanswered.is_empty() {
                    println!("Unanswered: {}", unanswered.join(", "));
                }
                Ok(())
            }
            Command::Select(option) => {
                let option = resolve_option(&session, &option);
                session.select_current(&option).map(|()| {
                    if session.can_advance() {
                        // Move on automatically; going back stays possible.
                        if session.next().is_ok() {
                            print_question(&session);
                        }
                    } else if session.can_submit() {
                        println!("All questions answered, /submit when ready.");
                    }
                })
            }
            Command::Submit => match session.submit().await {
                Ok(outcome) => {
                    print_outcome(&outcome);
                    if outcome.passed {
                        let progress = tracker.complete(&module).await?;
                        println!("Module progress: {}%", progress.percentage);
                    }
                    break;
                }
                Err(error) => Err(error),
            },
            Command::Unknown(input) => {
                eprintln!("Unknown command {input}");
                Ok(())
            }
        };

        if let Err(error) = result {
            eprintln!("{error}");
        }
    }

    while let Some(invalidation) = invalidations.try_next() {
        tracing::debug!(resources = ?invalidation.resources, "stale after quiz");
    }
    session.close();
    Ok(())
}
