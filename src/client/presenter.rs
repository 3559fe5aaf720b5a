use std::fmt;
use std::sync::Arc;

use super::dom::{Document, RESULT_ID};

const FADE_TRANSITION: &str = "opacity 0.5s ease-in-out";

/// Presentation class of a status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageCategory {
    Success,
    Warning,
    Error,
    Loading,
    /// Any other category name. Rendered without touching the colours.
    Other(String),
}

/// Foreground and background colour of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub color: &'static str,
    pub background_color: &'static str,
}

impl MessageCategory {
    pub fn palette(&self) -> Option<Palette> {
        let (color, background_color) = match self {
            MessageCategory::Success => ("green", "#e8f5e9"),
            MessageCategory::Warning => ("orange", "#fff3e0"),
            MessageCategory::Error => ("red", "#ffebee"),
            MessageCategory::Loading => ("blue", "#e3f2fd"),
            MessageCategory::Other(_) => return None,
        };
        Some(Palette { color, background_color })
    }
}

impl From<&str> for MessageCategory {
    fn from(name: &str) -> Self {
        match name {
            "success" => MessageCategory::Success,
            "warning" => MessageCategory::Warning,
            "error" => MessageCategory::Error,
            "loading" => MessageCategory::Loading,
            other => MessageCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageCategory::Success => write!(f, "success"),
            MessageCategory::Warning => write!(f, "warning"),
            MessageCategory::Error => write!(f, "error"),
            MessageCategory::Loading => write!(f, "loading"),
            MessageCategory::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Renders status messages into the page's result region.
#[derive(Clone)]
pub struct MessagePresenter {
    document: Arc<dyn Document>,
}

impl MessagePresenter {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self { document }
    }

    /// Replaces the result region's content with `message`, styled after `category`.
    /// A page without a result region only gets a diagnostic.
    pub fn display(&self, message: &str, category: &MessageCategory) {
        let Some(region) = self.document.output_region(RESULT_ID) else {
            log::error!("L'élément #{} n'existe pas dans le DOM.", RESULT_ID);
            return;
        };

        region.clear();
        region.set_display("block");

        match category.palette() {
            Some(palette) => region.set_colors(palette.color, palette.background_color),
            None => {}
        }

        region.set_text_content(message);
        region.set_transition(FADE_TRANSITION);
    }
}
