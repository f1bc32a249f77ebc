//! System settings — a singleton record of display and organization
//! configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  #[default]
  Ar,
  En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
  /// Always [`SystemSettings::ID`]; kept on the record so it round-trips
  /// through the document backend like any other entity.
  pub id:                String,
  pub organization_name: String,
  pub logo_path:         Option<String>,
  pub theme:             Theme,
  pub language:          Language,
  pub date_format:       String,
  pub currency:          String,
}

impl SystemSettings {
  /// The fixed document id of the singleton.
  pub const ID: &'static str = "system";
}

impl Default for SystemSettings {
  fn default() -> Self {
    Self {
      id:                Self::ID.to_owned(),
      organization_name: "General Authority for Irrigation".to_owned(),
      logo_path:         None,
      theme:             Theme::default(),
      language:          Language::default(),
      date_format:       "YYYY-MM-DD".to_owned(),
      currency:          "EGP".to_owned(),
    }
  }
}

/// Shallow-merge patch for [`SystemSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub organization_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub logo_path:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub theme:             Option<Theme>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub language:          Option<Language>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_format:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub currency:          Option<String>,
}
