use std::f64::consts::PI;

use crate::error::ValidationError;

/// Raw text of the four search fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub capacity: String,
    pub model: String,
    pub diameter: String,
    pub height: String,
}

/// A validated search: a category plus at least one non-blank field.
///
/// Values are trimmed but otherwise sent verbatim; the service owns numeric
/// validation and answers with an error message for bad numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub category: String,
    pub capacity: Option<String>,
    pub model: Option<String>,
    pub diameter: Option<String>,
    pub height: Option<String>,
}

fn filled(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl SearchRequest {
    /// Validate the form. The category check comes first.
    pub fn build(category: Option<&str>, form: &SearchForm) -> Result<Self, ValidationError> {
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::NoCategory)?;

        let request = Self {
            category: category.to_string(),
            capacity: filled(&form.capacity),
            model: filled(&form.model),
            diameter: filled(&form.diameter),
            height: filled(&form.height),
        };

        if request.fields().next().is_none() {
            return Err(ValidationError::NoSearchField);
        }
        Ok(request)
    }

    /// Present fields in wire order; blank ones are skipped entirely.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("capacity", &self.capacity),
            ("model", &self.model),
            ("diameter", &self.diameter),
            ("height", &self.height),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }

    pub fn to_query_string(&self) -> String {
        let mut query = format!("tank_type={}", urlencoding::encode(&self.category));
        for (key, value) in self.fields() {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(&urlencoding::encode(value));
        }
        query
    }
}

/// Cylinder volume computed locally from the entered dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePreview {
    pub diameter: f64,
    pub height: f64,
    /// Cubic meters, which equals kiloliters.
    pub volume: f64,
}

fn parse_positive(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

impl VolumePreview {
    /// Only available when both diameter and height are positive numbers.
    pub fn from_form(form: &SearchForm) -> Option<Self> {
        let diameter = parse_positive(&form.diameter)?;
        let height = parse_positive(&form.height)?;
        let radius = diameter / 2.0;
        Some(Self {
            diameter,
            height,
            volume: PI * radius * radius * height,
        })
    }

    pub fn rounded(&self) -> f64 {
        (self.volume * 100.0).round() / 100.0
    }

    pub fn summary(&self) -> String {
        format!("{:.2} m³ (KL)", self.volume)
    }

    pub fn basis(&self) -> String {
        format!(
            "based on {}m diameter × {}m height",
            self.diameter, self.height
        )
    }
}
