use clap::Args;
use kaizen_config::quiz::{PassThreshold, QuizConfig};

#[derive(Debug, Clone, Args)]
pub struct Quiz {
    /// Percentage of correct answers needed to pass
    #[arg(long, required = false, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub pass_threshold: Option<u8>,
}

impl Quiz {
    pub fn apply(self, config: &mut QuizConfig) -> Result<(), kaizen_config::error::ThresholdError> {
        if let Some(percent) = self.pass_threshold {
            config.pass_threshold = PassThreshold::new(percent)?;
        }
        Ok(())
    }
}
