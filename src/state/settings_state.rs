//! Settings form state.

use super::SettingField;
use crate::config::{AuthScheme, Config, PAGE_SIZE_RANGE, TIMEOUT_RANGE};
use crate::error::{Error, Result};

/// Editable copy of the configuration.
///
/// Numeric fields are held as text while editing and only checked when
/// the form is turned back into a [`Config`].
#[derive(Debug, Clone)]
pub struct SettingsForm {
    pub api_base: String,
    pub api_key: String,
    pub auth_scheme: AuthScheme,
    pub auth_header: String,
    pub timeout: String,
    pub page_size: String,
    /// Selected field index into [`SettingField::ALL`].
    pub selected: usize,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SettingsForm {
    /// Populate the form from a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            auth_scheme: config.auth_scheme,
            auth_header: config.auth_header.clone(),
            timeout: config.timeout.to_string(),
            page_size: config.page_size.to_string(),
            selected: 0,
        }
    }

    /// The currently selected field.
    pub fn selected_field(&self) -> SettingField {
        SettingField::ALL[self.selected.min(SettingField::ALL.len() - 1)]
    }

    /// Move the selection by `delta`, staying within the form.
    pub fn move_selection(&mut self, delta: i32) {
        let max = SettingField::ALL.len() as i32 - 1;
        self.selected = (self.selected as i32 + delta).clamp(0, max) as usize;
    }

    /// Display text of a field.
    pub fn value(&self, field: SettingField) -> String {
        match field {
            SettingField::ApiBase => self.api_base.clone(),
            SettingField::ApiKey => self.api_key.clone(),
            SettingField::AuthScheme => self.auth_scheme.to_string(),
            SettingField::AuthHeader => self.auth_header.clone(),
            SettingField::Timeout => self.timeout.clone(),
            SettingField::PageSize => self.page_size.clone(),
        }
    }

    /// Replace a text field's value. The auth scheme is cycled, not typed.
    pub fn set_value(&mut self, field: SettingField, value: String) {
        let value = value.trim().to_string();
        match field {
            SettingField::ApiBase => self.api_base = value,
            SettingField::ApiKey => self.api_key = value,
            SettingField::AuthScheme => {}
            SettingField::AuthHeader => self.auth_header = value,
            SettingField::Timeout => self.timeout = value,
            SettingField::PageSize => self.page_size = value,
        }
    }

    /// Advance the auth scheme.
    pub fn cycle_auth_scheme(&mut self) {
        self.auth_scheme = self.auth_scheme.next();
    }

    /// Build a configuration from the form.
    ///
    /// Numbers must parse; values outside the allowed ranges are clamped.
    pub fn to_config(&self) -> Result<Config> {
        let timeout = self.timeout.parse::<u64>().map_err(|_| {
            Error::invalid_input(format!(
                "timeout must be a number of seconds ({}-{})",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end()
            ))
        })?;
        let page_size = self.page_size.parse::<u32>().map_err(|_| {
            Error::invalid_input(format!(
                "page size must be a number ({}-{})",
                PAGE_SIZE_RANGE.start(),
                PAGE_SIZE_RANGE.end()
            ))
        })?;

        Ok(Config {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            auth_scheme: self.auth_scheme,
            auth_header: self.auth_header.clone(),
            timeout,
            page_size,
        }
        .clamped())
    }
}
