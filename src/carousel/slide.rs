//! Slide - One promotional entry shown by the carousel

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Callback run when the slide's action button is pressed.
pub type SlideAction = Rc<dyn Fn()>;

/// Immutable promotional slide.
#[derive(Clone)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Image reference (URL or asset path), resolved by the renderer
    pub image: String,
    pub action_label: Option<String>,
    action: Option<SlideAction>,
}

impl Slide {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            image: image.into(),
            action_label: None,
            action: None,
        }
    }

    /// Attach an action button.
    pub fn with_action(mut self, label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        self.action_label = Some(label.into());
        self.action = Some(Rc::new(action));
        self
    }

    /// Label-only button (rendered, but pressing it does nothing).
    pub fn with_action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Whether a button should be rendered for this slide.
    pub fn has_action(&self) -> bool {
        self.action_label.is_some()
    }

    /// Run the action callback. Returns false if there is none.
    pub fn activate(&self) -> bool {
        match &self.action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

/// Ids that appear more than once, in order of their second appearance.
pub fn duplicate_ids(slides: &[Slide]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for slide in slides {
        let id = slide.id.as_str();
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}

impl fmt::Debug for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slide")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("image", &self.image)
            .field("action_label", &self.action_label)
            .field("has_callback", &self.action.is_some())
            .finish()
    }
}
