//! In-memory page: the simulator form, its submit button and the result region.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::dom::{
    Document, FormElement, OutputRegion, SubmitControl, FORM_ID, RESULT_ID, SUBMIT_BUTTON_CLASS,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What the result region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSnapshot {
    pub text: String,
    pub display: Option<String>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub transition: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryRegion {
    state: Mutex<RegionSnapshot>,
    /// Every text set on the region, oldest first.
    history: Mutex<Vec<String>>,
}

impl MemoryRegion {
    pub fn snapshot(&self) -> RegionSnapshot {
        lock(&self.state).clone()
    }

    pub fn history(&self) -> Vec<String> {
        lock(&self.history).clone()
    }
}

impl OutputRegion for MemoryRegion {
    fn clear(&self) {
        lock(&self.state).text.clear();
    }

    fn set_display(&self, display: &str) {
        lock(&self.state).display = Some(display.to_string());
    }

    fn set_colors(&self, color: &str, background_color: &str) {
        let mut state = lock(&self.state);
        state.color = Some(color.to_string());
        state.background_color = Some(background_color.to_string());
    }

    fn set_text_content(&self, text: &str) {
        lock(&self.state).text = text.to_string();
        lock(&self.history).push(text.to_string());
    }

    fn set_transition(&self, transition: &str) {
        lock(&self.state).transition = Some(transition.to_string());
    }
}

#[derive(Debug, Default)]
pub struct MemoryButton {
    disabled: AtomicBool,
    toggles: Mutex<Vec<bool>>,
}

impl MemoryButton {
    /// Values passed to `set_disabled`, oldest first.
    pub fn toggles(&self) -> Vec<bool> {
        lock(&self.toggles).clone()
    }
}

impl SubmitControl for MemoryButton {
    fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
        lock(&self.toggles).push(disabled);
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MemoryForm {
    fields: Mutex<Vec<(String, String)>>,
    button: Option<Arc<MemoryButton>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self {
            fields: Mutex::new(Vec::new()),
            button: Some(Arc::new(MemoryButton::default())),
        }
    }

    pub fn without_submit_control() -> Self {
        Self {
            fields: Mutex::new(Vec::new()),
            button: None,
        }
    }

    /// Sets the value of a field, adding the field if the form has none by that name.
    pub fn set_field(&self, name: &str, value: &str) {
        let mut fields = lock(&self.fields);
        match fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn button(&self) -> Option<Arc<MemoryButton>> {
        self.button.clone()
    }
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormElement for MemoryForm {
    fn entries(&self) -> Vec<(String, String)> {
        lock(&self.fields).clone()
    }

    fn submit_control(&self, class_name: &str) -> Option<Arc<dyn SubmitControl>> {
        if class_name != SUBMIT_BUTTON_CLASS {
            return None;
        }
        self.button
            .clone()
            .map(|button| button as Arc<dyn SubmitControl>)
    }
}

/// A page holding at most one simulator form and one result region.
#[derive(Debug)]
pub struct MemoryDocument {
    form: Option<Arc<MemoryForm>>,
    region: Option<Arc<MemoryRegion>>,
}

impl MemoryDocument {
    /// The complete simulator page.
    pub fn new() -> Self {
        Self::from_parts(Some(MemoryForm::new()), Some(MemoryRegion::default()))
    }

    pub fn from_parts(form: Option<MemoryForm>, region: Option<MemoryRegion>) -> Self {
        Self {
            form: form.map(Arc::new),
            region: region.map(Arc::new),
        }
    }

    /// The simulator page with its form already filled in.
    pub fn with_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let document = Self::new();
        for (name, value) in fields {
            document.set_field(name, value);
        }
        document
    }

    pub fn set_field(&self, name: &str, value: &str) {
        if let Some(form) = &self.form {
            form.set_field(name, value);
        }
    }

    pub fn region(&self) -> Option<Arc<MemoryRegion>> {
        self.region.clone()
    }

    pub fn button(&self) -> Option<Arc<MemoryButton>> {
        self.form.as_ref().and_then(|form| form.button())
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn output_region(&self, id: &str) -> Option<Arc<dyn OutputRegion>> {
        if id != RESULT_ID {
            return None;
        }
        self.region
            .clone()
            .map(|region| region as Arc<dyn OutputRegion>)
    }

    fn form(&self, id: &str) -> Option<Arc<dyn FormElement>> {
        if id != FORM_ID {
            return None;
        }
        self.form.clone().map(|form| form as Arc<dyn FormElement>)
    }
}
