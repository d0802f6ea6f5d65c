use std::{error::Error, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::M => write!(f, "M"),
            Gender::F => write!(f, "F"),
        }
    }
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Gender::M),
            "F" | "f" => Ok(Gender::F),
            _ => Err(ProfileError::InvalidGender),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    MissingInput,
    InvalidNumber(&'static str),
    InvalidGender,
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::MissingInput => write!(f, "Please fill in every profile field."),
            ProfileError::InvalidNumber(field) => write!(f, "{field} must be a positive number."),
            ProfileError::InvalidGender => write!(f, "Gender must be M or F."),
        }
    }
}

impl Error for ProfileError {}

/// Profile form fields before validation.
#[derive(Debug, Clone, Default)]
pub struct RawProfile {
    pub name: String,
    pub registration_id: String,
    pub age: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub registration_id: String,
    pub age: u32,
    pub gender: Gender,
    /// Centimeters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub bmi: f64,
    /// Basal metabolic rate in kcal/day.
    pub bmr: f64,
}

impl UserProfile {
    pub fn parse(raw: &RawProfile) -> Result<Self, ProfileError> {
        let fields = [
            &raw.name,
            &raw.registration_id,
            &raw.age,
            &raw.gender,
            &raw.height,
            &raw.weight,
        ];
        if fields.iter().any(|v| v.trim().is_empty()) {
            return Err(ProfileError::MissingInput);
        }

        let age = raw
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| ProfileError::InvalidNumber("Age"))?;
        let gender = raw.gender.parse::<Gender>()?;
        let height = parse_positive(&raw.height, "Height")?;
        let weight = parse_positive(&raw.weight, "Weight")?;

        Ok(UserProfile {
            name: raw.name.trim().to_string(),
            registration_id: raw.registration_id.trim().to_string(),
            age,
            gender,
            height,
            weight,
            bmi: body_mass_index(height, weight),
            bmr: basal_metabolic_rate(age, gender, height, weight),
        })
    }
}

fn parse_positive(value: &str, field: &'static str) -> Result<f64, ProfileError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0. => Ok(v),
        _ => Err(ProfileError::InvalidNumber(field)),
    }
}

/// BMI rounded to one decimal.
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.;
    (weight_kg / (height_m * height_m) * 10.).round() / 10.
}

/// Mifflin-St Jeor equation.
pub fn basal_metabolic_rate(age: u32, gender: Gender, height_cm: f64, weight_kg: f64) -> f64 {
    let base = 10. * weight_kg + 6.25 * height_cm - 5. * age as f64;
    match gender {
        Gender::M => base + 5.,
        Gender::F => base - 161.,
    }
}
