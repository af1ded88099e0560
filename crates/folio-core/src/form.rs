//! # Contact Form
//!
//! Field state, synchronous validation and the simulated submission.
//!
//! A valid submission is handed to a `FormBackend`; the acknowledgment arrives once the
//! backend's fixed delay has elapsed in ticked time. There is no failure path after a
//! submission has been accepted.

use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::errors::FormError;

pub const ACKNOWLEDGMENT: &str = "Thank you for your message! I will get back to you soon.";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub message: String,
}

/// Where accepted messages go.
pub trait FormBackend: Send + Sync {
    /// Time between acceptance and acknowledgment.
    fn delay(&self) -> Duration;

    fn acknowledge(&self, message: &ContactMessage) -> Acknowledgment;
}

/// Accepts everything after a fixed delay. Nothing leaves the process.
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    pub delay: Duration,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
        }
    }
}

impl FormBackend for SimulatedBackend {
    fn delay(&self) -> Duration {
        self.delay
    }

    fn acknowledge(&self, message: &ContactMessage) -> Acknowledgment {
        info!(
            name = %message.name,
            email = %message.email,
            "Form submitted"
        );
        Acknowledgment {
            message: ACKNOWLEDGMENT.to_string(),
        }
    }
}

#[derive(Debug)]
struct Pending {
    message: ContactMessage,
    remaining: Duration,
}

/// The contact form's local state.
pub struct ContactForm {
    fields: ContactMessage,
    pending: Option<Pending>,
    backend: Box<dyn FormBackend>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(Box::new(SimulatedBackend::default()))
    }
}

impl ContactForm {
    pub fn new(backend: Box<dyn FormBackend>) -> Self {
        Self {
            fields: ContactMessage::default(),
            pending: None,
            backend,
        }
    }

    pub fn fields(&self) -> &ContactMessage {
        &self.fields
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Checks the fields the way required text and email inputs are checked.
    pub fn validate(&self) -> Result<(), FormError> {
        for field in Field::ALL {
            if self.fields.get(field).is_empty() {
                return Err(FormError::MissingField(field.name()));
            }
        }
        if !is_email(&self.fields.email) {
            return Err(FormError::InvalidEmail(self.fields.email.clone()));
        }
        Ok(())
    }

    /// Accepts the current fields for submission. Rejections leave the state untouched.
    pub fn submit(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::AlreadySubmitting);
        }
        self.validate()?;
        info!("Contact form accepted, acknowledging in {:?}", self.backend.delay());
        self.pending = Some(Pending {
            message: self.fields.clone(),
            remaining: self.backend.delay(),
        });
        Ok(())
    }

    /// Advances the pending submission by `dt`; returns the acknowledgment when it lands.
    pub fn advance(&mut self, dt: Duration) -> Option<Acknowledgment> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(dt);
        if !pending.remaining.is_zero() {
            return None;
        }

        let pending = self.pending.take()?;
        self.fields = ContactMessage::default();
        Some(self.backend.acknowledge(&pending.message))
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}
