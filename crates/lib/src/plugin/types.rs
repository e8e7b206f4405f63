use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a plugin, e.g. `org.sample.greeting`.
///
/// Two ids are equal only when their strings are identical. Validation happens
/// in [`PluginId::parse`]; once constructed an id is treated as an opaque value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginId(String);

/// Errors produced when a plugin id does not follow the id syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginIdError {
  #[error("plugin id cannot be empty")]
  Empty,

  #[error("plugin id '{id}' contains invalid character '{ch}' (only ASCII letters, digits, '.', '_' and '-' are allowed)")]
  InvalidCharacter { id: String, ch: char },

  #[error("plugin id '{id}' cannot start or end with '.'")]
  BoundaryDot { id: String },

  #[error("plugin id '{id}' cannot contain '..'")]
  DoubleDot { id: String },
}

impl PluginId {
  /// Parse and validate a plugin id.
  pub fn parse(value: &str) -> Result<Self, PluginIdError> {
    if value.is_empty() {
      return Err(PluginIdError::Empty);
    }

    if let Some(ch) = value
      .chars()
      .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
      return Err(PluginIdError::InvalidCharacter {
        id: value.to_string(),
        ch,
      });
    }

    if value.starts_with('.') || value.ends_with('.') {
      return Err(PluginIdError::BoundaryDot { id: value.to_string() });
    }

    if value.contains("..") {
      return Err(PluginIdError::DoubleDot { id: value.to_string() });
    }

    Ok(Self(value.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Everything before the last `.`, if the id is qualified.
  pub fn namespace(&self) -> Option<&str> {
    self.0.rsplit_once('.').map(|(ns, _)| ns)
  }

  /// The last `.`-separated segment of the id.
  pub fn name(&self) -> &str {
    self.0.rsplit_once('.').map(|(_, name)| name).unwrap_or(&self.0)
  }
}

impl fmt::Display for PluginId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for PluginId {
  type Err = PluginIdError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl TryFrom<String> for PluginId {
  type Error = PluginIdError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<PluginId> for String {
  fn from(id: PluginId) -> Self {
    id.0
  }
}

/// A request to apply a plugin, as issued by a build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRequest {
  pub id: PluginId,
}

impl PluginRequest {
  pub fn new(id: PluginId) -> Self {
    Self { id }
  }

  /// Build a request from a raw id string, rejecting ids with invalid syntax.
  pub fn parse(id: &str) -> Result<Self, PluginIdError> {
    PluginId::parse(id).map(Self::new)
  }
}

impl fmt::Display for PluginRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[id: '{}']", self.id)
  }
}
