//! Counselor directory use case
//!
//! Browsing, filtering and the inquiry form over a fixed list of counselors.

use rapport_domain::{ALL_SPECIALTIES, Counselor, Inquiry, builtin_counselors};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InquiryError {
    #[error("Counselor not found: {0}")]
    UnknownCounselor(String),

    #[error("{counselor} does not list '{topic}' as an area of expertise")]
    UnknownTopic { counselor: String, topic: String },

    #[error("Inquiry message is empty")]
    EmptyMessage,
}

pub struct CounselorDirectory {
    counselors: Vec<Counselor>,
}

impl Default for CounselorDirectory {
    fn default() -> Self {
        Self::new(builtin_counselors())
    }
}

impl CounselorDirectory {
    pub fn new(counselors: Vec<Counselor>) -> Self {
        Self { counselors }
    }

    pub fn all(&self) -> &[Counselor] {
        &self.counselors
    }

    pub fn find(&self, id: &str) -> Option<&Counselor> {
        self.counselors.iter().find(|c| c.id == id)
    }

    /// `"전체"` followed by every expertise tag in first-seen order
    pub fn specialties(&self) -> Vec<&str> {
        let mut out = vec![ALL_SPECIALTIES];
        for tag in self.counselors.iter().flat_map(|c| c.expertise.iter()) {
            if !out.contains(&tag.as_str()) {
                out.push(tag);
            }
        }
        out
    }

    /// Counselors matching the specialty and the keyword
    ///
    /// `None` or `"전체"` keeps every specialty. The keyword is trimmed and
    /// matched case-insensitively; a blank keyword keeps everything.
    pub fn filter(&self, specialty: Option<&str>, keyword: Option<&str>) -> Vec<&Counselor> {
        let specialty = specialty.filter(|s| *s != ALL_SPECIALTIES);
        let keyword = keyword
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty());

        let matched: Vec<&Counselor> = self
            .counselors
            .iter()
            .filter(|c| specialty.is_none_or(|s| c.has_expertise(s)))
            .filter(|c| {
                keyword
                    .as_deref()
                    .is_none_or(|k| c.search_haystack().contains(k))
            })
            .collect();

        debug!(
            "Directory filter {:?}/{:?} matched {} counselor(s)",
            specialty,
            keyword,
            matched.len()
        );
        matched
    }

    /// Build a validated inquiry; the topic defaults to the first expertise
    pub fn inquiry(
        &self,
        counselor_id: &str,
        topic: Option<&str>,
        message: &str,
    ) -> Result<Inquiry, InquiryError> {
        let counselor = self
            .find(counselor_id)
            .ok_or_else(|| InquiryError::UnknownCounselor(counselor_id.to_string()))?;

        let topic = match topic {
            Some(t) if counselor.has_expertise(t) => t.to_string(),
            Some(t) => {
                return Err(InquiryError::UnknownTopic {
                    counselor: counselor.name.clone(),
                    topic: t.to_string(),
                });
            }
            None => counselor.primary_expertise().unwrap_or_default().to_string(),
        };

        if message.trim().is_empty() {
            return Err(InquiryError::EmptyMessage);
        }

        Ok(Inquiry {
            counselor_id: counselor.id.clone(),
            topic,
            message: message.to_string(),
        })
    }
}
