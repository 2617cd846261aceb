use app_config::{AppConfig, ClapArgs};
use phone_number_sanitizer::errors::AppError;
use phone_number_sanitizer::logging::setup_logging_config;
use phone_number_sanitizer::phone_number_updater::UpdateSummary;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
  let args = ClapArgs::new();
  let pause_on_exit = args.pause_on_exit;

  let exit_code = match args.into_credentials() {
    None => {
      println!("{}", ClapArgs::usage_text());

      ExitCode::SUCCESS
    }
    Some(credentials) => match run(credentials).await {
      Ok(summary) => {
        println!(
          "Finished. {} of {} users were updated, {} were already sanitized.",
          summary.users_updated, summary.users_checked, summary.users_unchanged
        );

        ExitCode::SUCCESS
      }
      Err(error) => {
        println!("{}", error_report(&error));

        ExitCode::FAILURE
      }
    },
  };

  if pause_on_exit {
    wait_for_enter().await;
  }

  exit_code
}

async fn run(credentials: app_config::Credentials) -> Result<UpdateSummary, AppError> {
  let config = AppConfig::load().map_err(AppError::ConfigError)?;

  setup_logging_config(&config)?;

  phone_number_sanitizer::run_phone_number_update(credentials, &config).await
}

fn error_report(error: &AppError) -> String {
  format!("ERROR: {error}")
}

async fn wait_for_enter() {
  use tokio::io::AsyncBufReadExt;

  println!();
  println!("Press enter to quit...");

  let mut line = String::new();
  let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());

  if let Err(error) = stdin.read_line(&mut line).await {
    tracing::warn!("Failed to read from stdin. Reason: {error}");
  }
}
