//! The page structure the submission flow works against.
//!
//! Elements are handed out as shared handles, the way a browser hands out DOM
//! nodes: mutating a handle mutates the page. Every method takes `&self`, so
//! implementations keep their state behind interior mutability.

use std::sync::Arc;

/// Id of the simulator form.
pub const FORM_ID: &str = "simulateur-form";
/// Id of the region where status messages are rendered.
pub const RESULT_ID: &str = "result";
/// Class of the submit button inside the form.
pub const SUBMIT_BUTTON_CLASS: &str = "btn-submit";

/// Where status and result text is rendered.
pub trait OutputRegion: Send + Sync {
    /// Removes any previously rendered content.
    fn clear(&self);
    fn set_display(&self, display: &str);
    fn set_colors(&self, color: &str, background_color: &str);
    /// Sets plain text. The value is never interpreted as markup.
    fn set_text_content(&self, text: &str);
    fn set_transition(&self, transition: &str);
}

pub trait SubmitControl: Send + Sync {
    fn set_disabled(&self, disabled: bool);
    fn is_disabled(&self) -> bool;
}

pub trait FormElement: Send + Sync {
    /// Current `(name, value)` pairs of the form fields, in form order.
    fn entries(&self) -> Vec<(String, String)>;

    /// The first submit control inside this form carrying `class_name`.
    fn submit_control(&self, class_name: &str) -> Option<Arc<dyn SubmitControl>>;
}

pub trait Document: Send + Sync {
    fn output_region(&self, id: &str) -> Option<Arc<dyn OutputRegion>>;
    fn form(&self, id: &str) -> Option<Arc<dyn FormElement>>;
}
