/// A user record as returned by the directory. Only the fields this tool reads or writes are kept.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
  pub id: u64,
  pub name: String,
  pub phone: Option<String>,
}

impl User {
  pub fn new<S: Into<String>>(id: u64, name: S, phone: Option<&str>) -> Self {
    Self {
      id,
      name: name.into(),
      phone: phone.map(str::to_owned),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializing_ignores_unused_fields() {
    let user_json = r#"{
      "id": 35436,
      "name": "Johnny Agent",
      "email": "johnny@example.com",
      "phone": "+1 (555) 123-4567",
      "role": "agent",
      "shared_phone_number": false
    }"#;

    let user: User = serde_json::from_str(user_json).unwrap();

    assert_eq!(user, User::new(35436, "Johnny Agent", Some("+1 (555) 123-4567")));
  }

  #[test]
  fn null_phone_deserializes_to_none() {
    let user: User = serde_json::from_str(r#"{"id": 1, "name": "No Phone", "phone": null}"#).unwrap();

    assert_eq!(user.phone, None);
  }
}
