//! Candidate profile extracted from the intake conversation.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Structured profile record produced by the extraction capability.
///
/// Every field is always present. A field the model could not recover is an
/// empty string or an empty list, which is what re-prompting keys off. Absent
/// keys and explicit `null` both deserialize to the empty sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub years_of_experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub desired_positions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tech_stack: Vec<String>,
}

impl CandidateProfile {
    /// Sentinel used when extraction fails; every field counts as missing.
    pub fn unparsed() -> Self {
        Self::default()
    }

    /// Returns the fields that are blank, in schema order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }

    /// Returns true when all seven fields carry a value.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Returns true if the given field is blank.
    pub fn is_missing(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::Name => is_blank(&self.name),
            ProfileField::Phone => is_blank(&self.phone),
            ProfileField::Email => is_blank(&self.email),
            ProfileField::YearsOfExperience => is_blank(&self.years_of_experience),
            ProfileField::DesiredPositions => is_blank_list(&self.desired_positions),
            ProfileField::CurrentLocation => is_blank(&self.current_location),
            ProfileField::TechStack => is_blank_list(&self.tech_stack),
        }
    }

    /// Trims list items and drops the blank ones.
    pub fn without_blank_items(mut self) -> Self {
        self.desired_positions = non_blank_items(self.desired_positions);
        self.tech_stack = non_blank_items(self.tech_stack);
        self
    }

    /// Tech stack joined the way the question generator expects it.
    pub fn tech_stack_csv(&self) -> String {
        self.tech_stack.join(",")
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_blank_list(values: &[String]) -> bool {
    values.iter().all(|v| is_blank(v))
}

fn non_blank_items(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The seven profile fields the intake must collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Phone,
    Email,
    YearsOfExperience,
    DesiredPositions,
    CurrentLocation,
    TechStack,
}

impl ProfileField {
    /// All fields in schema order.
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Phone,
        ProfileField::Email,
        ProfileField::YearsOfExperience,
        ProfileField::DesiredPositions,
        ProfileField::CurrentLocation,
        ProfileField::TechStack,
    ];

    /// The JSON key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::YearsOfExperience => "years_of_experience",
            Self::DesiredPositions => "desired_positions",
            Self::CurrentLocation => "current_location",
            Self::TechStack => "tech_stack",
        }
    }

    /// Returns true for list-valued fields.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::DesiredPositions | Self::TechStack)
    }

    /// Extraction instruction handed to the model for this field.
    pub fn extraction_instruction(&self) -> &'static str {
        match self {
            Self::Name => "Name of the candidate, blank if not present. Example: 'mahesh singh', 'john wick'.",
            Self::Phone => "Phone number of the candidate, blank if not present. Example: '9828722323', '9212321332'.",
            Self::Email => "Email of the candidate, blank if not present. Example: 'yoha@yahoo.com', 'some@gmail.com'.",
            Self::YearsOfExperience => "Years of experience of the candidate, blank if not present. Example: '0', '2'.",
            Self::DesiredPositions => "Desired positions of the candidate, empty list [] if not present. Example: 'software engineer', 'SDE', 'Backend engineer'.",
            Self::CurrentLocation => "Current location of the candidate, blank if not present. Example: 'kolkata', 'jaipur'.",
            Self::TechStack => "Technical skills or technologies of the candidate, empty list [] if not present. Example: 'AI/ML', 'python', 'MERN', 'web development'.",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Joins field names for the re-prompt message.
pub fn join_fields(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
