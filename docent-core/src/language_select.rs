//! Language selection for routes that arrive without a language suffix
//!
//! A selector is created fresh every time the screen is entered, so no
//! pending state survives a back-navigation. Choosing a language produces a
//! full navigation to the qualified route; the player must remount rather
//! than reuse the controller of the unqualified route.

use serde::Serialize;

use crate::catalog::{ExhibitId, LanguageTag, MediaDescriptor};
use crate::resolver::Resolution;

/// Presentation state of one language button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionState {
    Idle,
    /// Chosen, navigation in flight
    Pending,
    /// Another language is pending
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageOption {
    pub tag: LanguageTag,
    pub label: &'static str,
    pub rtl: bool,
    /// Whether the exhibit has narration recorded in this language. Options
    /// without it still play the default media.
    pub dedicated_media: bool,
    pub state: OptionState,
}

/// Navigation requested by a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Full page load of `location`, never a client-side transition.
    Full { location: String },
}

impl Navigation {
    pub fn location(&self) -> &str {
        match self {
            Navigation::Full { location } => location,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Language {pending} is already being loaded")]
    AlreadyPending { pending: LanguageTag },
}

/// State of one visit to the language selection screen.
#[derive(Debug, Clone)]
pub struct LanguageSelector {
    exhibit_id: ExhibitId,
    descriptor: MediaDescriptor,
    pending: Option<LanguageTag>,
}

impl LanguageSelector {
    /// Enters the screen with no selection pending.
    pub fn enter(exhibit_id: &ExhibitId, descriptor: &MediaDescriptor) -> Self {
        Self {
            exhibit_id: exhibit_id.clone(),
            descriptor: descriptor.clone(),
            pending: None,
        }
    }

    /// Enters the screen for a resolution that still lacks a language.
    pub fn for_resolution(resolution: &Resolution) -> Option<Self> {
        resolution
            .needs_language_selection()
            .then(|| Self::enter(&resolution.exhibit_id, &resolution.descriptor))
    }

    pub fn exhibit_id(&self) -> &ExhibitId {
        &self.exhibit_id
    }

    pub fn title(&self) -> &str {
        self.descriptor
            .title
            .as_deref()
            .unwrap_or(self.exhibit_id.as_str())
    }

    pub fn description(&self) -> Option<&str> {
        self.descriptor.description.as_deref()
    }

    pub fn pending(&self) -> Option<LanguageTag> {
        self.pending
    }

    /// Every supported language with its current button state.
    pub fn options(&self) -> Vec<LanguageOption> {
        LanguageTag::ALL
            .into_iter()
            .map(|tag| LanguageOption {
                tag,
                label: tag.native_name(),
                rtl: tag.is_rtl(),
                dedicated_media: self.descriptor.language_media(tag).is_some(),
                state: match self.pending {
                    None => OptionState::Idle,
                    Some(pending) if pending == tag => OptionState::Pending,
                    Some(_) => OptionState::Disabled,
                },
            })
            .collect()
    }

    /// Qualified route for `tag`, e.g. `/v/exhibit01-fr`.
    pub fn location_for(&self, tag: LanguageTag) -> String {
        format!("/v/{}-{}", self.exhibit_id, tag.code())
    }

    /// Chooses `tag` and returns the navigation to perform.
    ///
    /// # Errors
    /// - `SelectionError::AlreadyPending` - A selection is already in flight
    pub fn select(&mut self, tag: LanguageTag) -> Result<Navigation, SelectionError> {
        if let Some(pending) = self.pending {
            return Err(SelectionError::AlreadyPending { pending });
        }

        self.pending = Some(tag);
        tracing::debug!(exhibit = %self.exhibit_id, language = %tag, "Language selected");
        Ok(Navigation::Full {
            location: self.location_for(tag),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::resolver::resolve;

    fn selector() -> LanguageSelector {
        let catalog = Catalog::builtin();
        let (id, descriptor) = catalog.get("exhibit01").unwrap();
        LanguageSelector::enter(id, descriptor)
    }

    #[test]
    fn test_enter_has_no_pending_selection() {
        let selector = selector();

        assert_eq!(selector.pending(), None);
        assert!(
            selector
                .options()
                .iter()
                .all(|option| option.state == OptionState::Idle)
        );
    }

    #[test]
    fn test_options_mark_dedicated_media() {
        let options = selector().options();

        let tags: Vec<LanguageTag> = options.iter().map(|o| o.tag).collect();
        assert_eq!(tags, LanguageTag::ALL);
        assert!(options[0].dedicated_media);
        assert!(options[1].dedicated_media);
        assert!(!options[2].dedicated_media);
        assert!(options[2].rtl);
    }

    #[test]
    fn test_select_navigates_to_qualified_route() {
        let mut selector = selector();
        let navigation = selector.select(LanguageTag::Fr).unwrap();

        assert_eq!(
            navigation,
            Navigation::Full {
                location: "/v/exhibit01-fr".to_string()
            }
        );

        let states: Vec<OptionState> = selector.options().iter().map(|o| o.state).collect();
        assert_eq!(
            states,
            vec![
                OptionState::Disabled,
                OptionState::Pending,
                OptionState::Disabled
            ]
        );
    }

    #[test]
    fn test_second_selection_rejected_while_pending() {
        let mut selector = selector();
        selector.select(LanguageTag::Ar).unwrap();

        assert_eq!(
            selector.select(LanguageTag::En),
            Err(SelectionError::AlreadyPending {
                pending: LanguageTag::Ar
            })
        );
    }

    #[test]
    fn test_reentering_resets_pending_state() {
        let catalog = Catalog::builtin();
        let (id, descriptor) = catalog.get("exhibit01").unwrap();

        let mut first_visit = LanguageSelector::enter(id, descriptor);
        first_visit.select(LanguageTag::Fr).unwrap();

        let second_visit = LanguageSelector::enter(id, descriptor);
        assert_eq!(second_visit.pending(), None);
    }

    #[test]
    fn test_selector_only_for_unqualified_routes() {
        let catalog = Catalog::builtin();

        let bare = resolve("garden", &catalog).unwrap();
        let selector = LanguageSelector::for_resolution(&bare).unwrap();
        assert_eq!(selector.title(), "The Palace Gardens");

        let qualified = resolve("garden-en", &catalog).unwrap();
        assert!(LanguageSelector::for_resolution(&qualified).is_none());

        let unknown_suffix = resolve("garden-de", &catalog).unwrap();
        assert!(LanguageSelector::for_resolution(&unknown_suffix).is_none());
    }
}
