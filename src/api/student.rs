use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::database::models::student::{NewStudent, Student};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Body of POST /students/. All fields must be present and pass their rules
/// before any persistence operation is attempted; photo_url may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreate {
    pub name: String,
    pub age: i32,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl StudentCreate {
    /// Field-level rule check; collects every failing field rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        if let Some(msg) = name_error(&self.name) {
            errors.insert("name".to_string(), msg);
        }
        if let Some(msg) = age_error(self.age) {
            errors.insert("age".to_string(), msg);
        }
        if let Some(msg) = email_error(&self.email) {
            errors.insert("email".to_string(), msg);
        }
        if let Some(msg) = phone_error(&self.phone) {
            errors.insert("phone".to_string(), msg);
        }
        if let Some(url) = &self.photo_url {
            if let Some(msg) = photo_url_error(url) {
                errors.insert("photo_url".to_string(), msg);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<StudentCreate> for NewStudent {
    fn from(create: StudentCreate) -> Self {
        NewStudent {
            name: create.name,
            age: create.age,
            email: create.email,
            phone: create.phone,
            photo_url: create.photo_url,
        }
    }
}

/// Body of PUT /students/{id}. Every field is optional; the double Option
/// keeps "field omitted" (outer None, leave untouched) apart from "field set
/// to null" (inner None). Explicit null is only legal for photo_url.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo_url: Option<Option<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl StudentUpdate {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        match &self.name {
            Some(Some(name)) => {
                if let Some(msg) = name_error(name) {
                    errors.insert("name".to_string(), msg);
                }
            }
            Some(None) => {
                errors.insert("name".to_string(), "may not be null".to_string());
            }
            None => {}
        }
        match self.age {
            Some(Some(age)) => {
                if let Some(msg) = age_error(age) {
                    errors.insert("age".to_string(), msg);
                }
            }
            Some(None) => {
                errors.insert("age".to_string(), "may not be null".to_string());
            }
            None => {}
        }
        match &self.email {
            Some(Some(email)) => {
                if let Some(msg) = email_error(email) {
                    errors.insert("email".to_string(), msg);
                }
            }
            Some(None) => {
                errors.insert("email".to_string(), "may not be null".to_string());
            }
            None => {}
        }
        match &self.phone {
            Some(Some(phone)) => {
                if let Some(msg) = phone_error(phone) {
                    errors.insert("phone".to_string(), msg);
                }
            }
            Some(None) => {
                errors.insert("phone".to_string(), "may not be null".to_string());
            }
            None => {}
        }
        // photo_url is nullable; explicit null clears it
        if let Some(Some(url)) = &self.photo_url {
            if let Some(msg) = photo_url_error(url) {
                errors.insert("photo_url".to_string(), msg);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overwrite only the fields present in the request body.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(Some(name)) = &self.name {
            student.name = name.clone();
        }
        if let Some(Some(age)) = self.age {
            student.age = age;
        }
        if let Some(Some(email)) = &self.email {
            student.email = email.clone();
        }
        if let Some(Some(phone)) = &self.phone {
            student.phone = phone.clone();
        }
        if let Some(photo_url) = &self.photo_url {
            student.photo_url = photo_url.clone();
        }
    }
}

fn name_error(name: &str) -> Option<String> {
    if name.is_empty() {
        Some("must not be empty".to_string())
    } else {
        None
    }
}

fn age_error(age: i32) -> Option<String> {
    if age <= 0 {
        Some("must be greater than 0".to_string())
    } else {
        None
    }
}

fn email_error(email: &str) -> Option<String> {
    if EMAIL_RE.is_match(email) {
        None
    } else {
        Some("must be a valid email address".to_string())
    }
}

fn phone_error(phone: &str) -> Option<String> {
    if (7..=15).contains(&phone.len()) {
        None
    } else {
        Some("must be between 7 and 15 characters".to_string())
    }
}

fn photo_url_error(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(_) => None,
        Err(_) => Some("must be a valid URL".to_string()),
    }
}
