use anyhow::Result;
use clap::Args;
use colored::Colorize;

use rep_coach::config::Config;
use rep_coach::services::dietician::build_prompt;
use rep_coach::services::storage::ProfileStore;

use crate::api::GeminiClient;

#[derive(Args)]
pub struct AskCommand {
    /// Your question, e.g. "what should I eat after leg day?"
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
}

impl AskCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let Some(api_key) = config.api_key() else {
            println!(
                "{} API key is missing. Set REP_COACH_API_KEY or write the key to ~/.rep-coach/api_key.",
                "⚠".yellow()
            );
            return Ok(());
        };

        let question = self.question.join(" ");

        // The chatbot works without a profile, so storage trouble only costs personalization
        let profile = match super::open_storage(config).and_then(|s| s.load_profile()) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Could not load profile, using defaults: {:#}", e);
                None
            }
        };

        let prompt = build_prompt(profile.as_ref(), &question);
        let client = GeminiClient::new(&config.dietician, api_key)?;

        match client.generate(&prompt).await {
            Ok(answer) => println!("{}", answer.trim()),
            Err(e) => eprintln!("{} AI error: {:#}", "⚠".yellow(), e),
        }

        Ok(())
    }
}
