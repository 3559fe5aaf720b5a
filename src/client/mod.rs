//! Browser-side flow of the simulator: validate the form, post it, render the answer.

pub mod controller;
pub mod dom;
pub mod memory;
pub mod presenter;
pub mod transport;
pub mod validator;

pub use controller::{Page, PageEvent, SubmissionController, SubmissionOutcome, SubmitEvent};
pub use dom::{Document, FormElement, OutputRegion, SubmitControl};
pub use memory::MemoryDocument;
pub use presenter::{MessageCategory, MessagePresenter};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use validator::{validate, ValidationOutcome};
