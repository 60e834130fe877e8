//! Consultation service client: submit a complaint (keluhan), receive a suggestion (saran)

mod attachments;
mod client;
mod traits;

pub use attachments::{load_attachments, AttachmentError};
pub use client::{
    ConsultationClient, ConsultationError, ConsultationRequest, ConsultationResponse, Endpoint,
    ENDPOINT_ENV,
};
pub use traits::ConsultationApi;

#[cfg(test)]
pub use traits::MockConsultationApi;
