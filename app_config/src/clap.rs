use clap::{CommandFactory, Parser};
use secrecy::SecretString;

const USAGE_NOTES: &str = "\
SERVICE_URL should be in the format https://yoursite.zendesk.com/api/v2
User name and password are for a user that has rights to update users in Zendesk.
To authenticate with an API token, pass `email/token` as USERNAME and the token as CREDENTIAL.";

#[derive(Parser)]
#[command(
  name = "phone_number_sanitizer",
  about = "Strips every non-digit character from the phone numbers of all Zendesk users."
)]
pub struct ClapArgs {
  /// Base url of the Zendesk API.
  #[arg(value_name = "SERVICE_URL")]
  pub service_url: Option<String>,

  #[arg(value_name = "USERNAME")]
  pub username: Option<String>,

  /// Password or API token for the user.
  #[arg(value_name = "CREDENTIAL")]
  pub credential: Option<String>,

  /// Waits for enter to be pressed before exiting.
  #[arg(short = 'p', long)]
  pub pause_on_exit: bool,
}

/// Everything needed to open a session with the user directory.
pub struct Credentials {
  pub service_url: String,
  pub username: String,
  pub password: SecretString,
}

impl ClapArgs {
  pub fn new() -> Self {
    ClapArgs::parse()
  }

  /// Returns None if any of the three positional arguments is missing.
  pub fn into_credentials(self) -> Option<Credentials> {
    let (Some(service_url), Some(username), Some(credential)) =
      (self.service_url, self.username, self.credential)
    else {
      return None;
    };

    Some(Credentials {
      service_url,
      username,
      password: SecretString::from(credential),
    })
  }

  pub fn usage_text() -> String {
    let help = Self::command().render_help();

    format!("{help}\n{USAGE_NOTES}\n")
  }
}

impl Default for ClapArgs {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    formatter
      .debug_struct("Credentials")
      .field("service_url", &self.service_url)
      .field("username", &self.username)
      .field("password", &"...")
      .finish()
  }
}
