use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
  static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
}

/// Removes every character that isn't a decimal digit from a phone number, keeping the digits in order.
///
/// Absent and empty numbers are returned as they are.
pub fn sanitize_phone_number(phone_number: Option<&str>) -> Option<String> {
  let phone_number = phone_number?;

  if phone_number.is_empty() {
    return Some(String::new());
  }

  Some(NON_DIGIT.replace_all(phone_number, "").into_owned())
}
