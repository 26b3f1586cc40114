use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeadField {
    Name,
    Email,
    Company,
    Position,
    TeamSize,
    Language,
}

impl LeadField {
    pub const REQUIRED: [LeadField; 3] = [LeadField::Name, LeadField::Email, LeadField::Company];

    /// DOM id of the matching form control.
    pub fn id(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Company => "company",
            LeadField::Position => "position",
            LeadField::TeamSize => "team-size",
            LeadField::Language => "language",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    InvalidEmail,
}

impl FieldProblem {
    pub fn message(self) -> &'static str {
        match self {
            FieldProblem::Missing => "Пожалуйста, заполните это поле",
            FieldProblem::InvalidEmail => "Пожалуйста, введите корректный email адрес",
        }
    }
}

pub type FieldErrors = BTreeMap<LeadField, FieldProblem>;

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub team_size: String,
    pub language: String,
}

impl LeadDraft {
    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Company => &self.company,
            LeadField::Position => &self.position,
            LeadField::TeamSize => &self.team_size,
            LeadField::Language => &self.language,
        }
    }

    pub fn with(&self, field: LeadField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            LeadField::Name => next.name = value,
            LeadField::Email => next.email = value,
            LeadField::Company => next.company = value,
            LeadField::Position => next.position = value,
            LeadField::TeamSize => next.team_size = value,
            LeadField::Language => next.language = value,
        }
        next
    }
}

/// Body of `POST /api/v1/leads`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LeadRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    pub position: Option<String>,
    pub team_size: Option<String>,
    pub language: Option<String>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks every field at once so the form can mark all problems together.
pub fn validate(draft: &LeadDraft) -> Result<LeadRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in LeadField::REQUIRED {
        if draft.get(field).trim().is_empty() {
            errors.insert(field, FieldProblem::Missing);
        }
    }

    let email = draft.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(LeadField::Email, FieldProblem::InvalidEmail);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(LeadRequest {
        name: draft.name.trim().to_string(),
        email: email.to_string(),
        company: draft.company.trim().to_string(),
        position: optional(&draft.position),
        team_size: optional(&draft.team_size),
        language: optional(&draft.language),
    })
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
