use crate::UserDirectory;
use crate::errors::DirectoryError;
use crate::user::User;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

const CURRENT_USER_PATH: &str = "users/me.json";
const USER_LIST_PATH: &str = "users.json";
const USER_UPDATE_PATH: &str = "users/{id}.json";
const PAGE_SIZE_PARAMETER: &str = "page[size]";
const USERS_PER_PAGE: &str = "100";

/// An authenticated session with a Zendesk API.
pub struct ZendeskDirectory {
  reqwest_client: reqwest::Client,
  base_url: Url,
  username: String,
  password: SecretString,
}

/// A page of the cursor paginated user list.
#[derive(Debug, serde::Deserialize)]
struct UserListPage {
  users: Vec<User>,
  #[serde(default)]
  meta: PageMeta,
  #[serde(default)]
  links: PageLinks,
}

#[derive(Debug, Default, serde::Deserialize)]
struct PageMeta {
  has_more: bool,
}

#[derive(Debug, Default, serde::Deserialize)]
struct PageLinks {
  next: Option<String>,
}

impl UserListPage {
  fn next_page_url(&self) -> Result<Option<Url>, DirectoryError> {
    if !self.meta.has_more {
      return Ok(None);
    }

    self
      .links
      .next
      .as_deref()
      .map(Url::parse)
      .transpose()
      .map_err(Into::into)
  }
}

#[derive(Debug, serde::Deserialize)]
struct CurrentUserResponse {
  user: CurrentUser,
}

/// Zendesk answers unauthenticated requests to `users/me` with an anonymous user that has no id.
#[derive(Debug, serde::Deserialize)]
struct CurrentUser {
  id: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
struct UserUpdateRequest<'a> {
  user: &'a User,
}

impl ZendeskDirectory {
  /// Opens a session and checks the credentials against the current user endpoint.
  ///
  /// # Errors
  /// - The url isn't an http(s) url.
  /// - The host couldn't be reached.
  /// - The credentials were rejected.
  pub async fn connect(
    base_url: &str,
    username: &str,
    password: SecretString,
    request_timeout: Duration,
  ) -> Result<Self, DirectoryError> {
    let base_url = parse_base_url(base_url)?;
    let reqwest_client = reqwest::Client::builder()
      .timeout(request_timeout)
      .build()?;
    let directory = Self {
      reqwest_client,
      base_url,
      username: username.to_owned(),
      password,
    };

    directory.verify_credentials().await?;

    Ok(directory)
  }

  async fn verify_credentials(&self) -> Result<(), DirectoryError> {
    let url = self.base_url.join(CURRENT_USER_PATH)?;
    let response = self.authorize(self.reqwest_client.get(url)).send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
      return Err(self.invalid_credentials());
    }

    let response_body = check_status(response, "verify credentials")?
      .text()
      .await?;
    let CurrentUserResponse { user } = serde_json::from_str(&response_body)?;

    let Some(user_id) = user.id else {
      return Err(self.invalid_credentials());
    };

    tracing::info!(
      "Connected to {} as `{}` (user id {user_id}).",
      self.base_url,
      self.username
    );

    Ok(())
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    request.basic_auth(&self.username, Some(self.password.expose_secret()))
  }

  fn invalid_credentials(&self) -> DirectoryError {
    DirectoryError::InvalidCredentials {
      username: self.username.clone(),
      url: self.base_url.to_string(),
    }
  }

  fn user_list_url(&self) -> Result<Url, DirectoryError> {
    let mut user_list_url = self.base_url.join(USER_LIST_PATH)?;

    user_list_url
      .query_pairs_mut()
      .append_pair(PAGE_SIZE_PARAMETER, USERS_PER_PAGE);

    Ok(user_list_url)
  }

  fn user_update_url(&self, user_id: u64) -> Result<Url, DirectoryError> {
    self
      .base_url
      .join(&USER_UPDATE_PATH.replace("{id}", &user_id.to_string()))
      .map_err(Into::into)
  }
}

impl UserDirectory for ZendeskDirectory {
  async fn fetch_all_users(&self) -> Result<Vec<User>, DirectoryError> {
    let mut all_users = vec![];
    let mut next_page = Some(self.user_list_url()?);

    while let Some(page_url) = next_page.take() {
      tracing::debug!("Fetching users from {page_url}");

      let response = self
        .authorize(self.reqwest_client.get(page_url))
        .send()
        .await?;
      let response_body = check_status(response, "fetch all users")?.text().await?;
      let page: UserListPage = serde_json::from_str(&response_body)?;

      next_page = page.next_page_url()?;
      all_users.extend(page.users);
    }

    tracing::info!("Fetched {} users.", all_users.len());

    Ok(all_users)
  }

  async fn update_user(&self, user: &User) -> Result<(), DirectoryError> {
    let url = self.user_update_url(user.id)?;
    let response = self
      .authorize(self.reqwest_client.put(url))
      .json(&UserUpdateRequest { user })
      .send()
      .await?;

    check_status(response, "update user")?;

    tracing::debug!("Updated user {}.", user.id);

    Ok(())
  }
}

/// Parses the service url, making sure relative paths are joined under it rather than replacing its last segment.
fn parse_base_url(base_url: &str) -> Result<Url, DirectoryError> {
  let mut url = Url::parse(base_url.trim())?;

  if !matches!(url.scheme(), "http" | "https") {
    return Err(DirectoryError::UnsupportedBaseUrl(base_url.to_owned()));
  }

  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());

    url.set_path(&path);
  }

  Ok(url)
}

fn check_status(response: Response, location: &'static str) -> Result<Response, DirectoryError> {
  let status = response.status();

  if !status.is_success() {
    tracing::warn!("{location} failed with status {status}.");

    return Err(DirectoryError::FailedResponse {
      location,
      code: status.as_u16(),
    });
  }

  Ok(response)
}
