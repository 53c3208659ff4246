use crate::opt::Validate;
use anyhow::{Error, anyhow};

pub(crate) async fn validate(opt: Validate) -> Result<(), Error> {
    let mut failed = Vec::new();
    for path in &opt.paths {
        match kaizen_config::load(path).await {
            Ok(config) => println!(
                "{}: ok (api {}, pass threshold {}%, assistant {} via {})",
                path.display(),
                config.api.base_url,
                config.quiz.pass_threshold.percent(),
                config.assistant.provider,
                config.assistant.model(),
            ),
            Err(error) => {
                eprintln!("{}: {error}", path.display());
                failed.push(path.display().to_string());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Invalid configuration files: {}", failed.join(", ")))
    }
}
