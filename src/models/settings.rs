//! Widget defaults loaded from configuration files.

use serde::Deserialize;
use validator::Validate;

use crate::errors::DataViewResult;
use crate::html::Attributes;
use crate::i18n::DEFAULT_LOCALE;
use crate::reader::DEFAULT_PAGE_SIZE;
use crate::views::{DEFAULT_EMPTY_TEXT, DEFAULT_LAYOUT};
use crate::widgets::pager::DEFAULT_MAX_BUTTON_COUNT;
use crate::widgets::{PageLabel, PagerConfig};

/// Defaults applied to the list, grid and pager widgets.
///
/// Every field is optional in configuration files; missing ones keep the
/// widget defaults.
#[derive(Clone, Debug, PartialEq, Deserialize, Validate)]
#[serde(default)]
pub struct WidgetSettings {
    #[validate(range(min = 1))]
    pub page_size: usize,
    #[validate(range(min = 1))]
    pub max_button_count: usize,
    pub hide_on_single_page: bool,
    pub first_page_label: PageLabel,
    pub prev_page_label: PageLabel,
    pub next_page_label: PageLabel,
    pub last_page_label: PageLabel,
    pub pager_options: Attributes,
    pub link_container_options: Attributes,
    pub link_options: Attributes,
    #[validate(length(min = 1))]
    pub layout: String,
    pub empty_text: String,
    #[validate(length(min = 2))]
    pub locale: String,
    pub table_options: Attributes,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        let pager = PagerConfig::default();
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_button_count: DEFAULT_MAX_BUTTON_COUNT,
            hide_on_single_page: pager.hide_on_single_page,
            first_page_label: pager.first_page_label,
            prev_page_label: pager.prev_page_label,
            next_page_label: pager.next_page_label,
            last_page_label: pager.last_page_label,
            pager_options: pager.options,
            link_container_options: pager.link_container_options,
            link_options: pager.link_options,
            layout: DEFAULT_LAYOUT.to_string(),
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            table_options: Attributes::new().with_class("table table-striped table-bordered"),
        }
    }
}

impl WidgetSettings {
    /// Returns the settings if they pass validation.
    pub fn validated(self) -> DataViewResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Pager configuration described by these settings.
    pub fn pager_config(&self) -> PagerConfig {
        PagerConfig::default()
            .options(self.pager_options.clone())
            .link_container_options(self.link_container_options.clone())
            .link_options(self.link_options.clone())
            .max_button_count(self.max_button_count)
            .hide_on_single_page(self.hide_on_single_page)
            .first_page_label(self.first_page_label.clone())
            .prev_page_label(self.prev_page_label.clone())
            .next_page_label(self.next_page_label.clone())
            .last_page_label(self.last_page_label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DataViewError;

    #[test]
    fn defaults_are_valid() {
        let settings = WidgetSettings::default();

        assert_eq!(settings.clone().validated(), Ok(settings));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let settings = WidgetSettings {
            page_size: 0,
            ..WidgetSettings::default()
        };

        assert!(matches!(
            settings.validated(),
            Err(DataViewError::InvalidConfig(_))
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: WidgetSettings =
            serde_json::from_str(r#"{"page_size": 5, "first_page_label": true}"#)
                .expect("valid settings");

        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.first_page_label, PageLabel::Number);
        assert_eq!(settings.max_button_count, DEFAULT_MAX_BUTTON_COUNT);
        assert_eq!(settings.pager_config().first_page_label, PageLabel::Number);
    }
}
