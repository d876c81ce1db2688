//! Counselor directory entities

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    /// 1..=5
    pub rating: u8,
    pub comment: String,
}

/// A counselor listed in the directory (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counselor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub focus: String,
    pub expertise: Vec<String>,
    pub years: u32,
    pub location: String,
    pub formats: Vec<String>,
    pub languages: Vec<String>,
    pub response_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub career: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub testimonials: Vec<Testimonial>,
}

impl Counselor {
    /// Mean testimonial rating, `None` without testimonials
    pub fn average_rating(&self) -> Option<f64> {
        if self.testimonials.is_empty() {
            return None;
        }
        let total: u32 = self.testimonials.iter().map(|t| u32::from(t.rating)).sum();
        Some(f64::from(total) / self.testimonials.len() as f64)
    }

    pub fn has_expertise(&self, specialty: &str) -> bool {
        self.expertise.iter().any(|e| e == specialty)
    }

    /// Lowercased text that keyword search matches against
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.title,
            self.expertise.join(" "),
            self.focus
        )
        .to_lowercase()
    }

    /// Default inquiry topic
    pub fn primary_expertise(&self) -> Option<&str> {
        self.expertise.first().map(String::as_str)
    }
}

/// A request sent to a counselor from the inquiry form (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub counselor_id: String,
    pub topic: String,
    pub message: String,
}
