//! Consent form value objects
//!
//! The option sets and their Korean wire values match what the screening
//! backend expects in the `/session` request body.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifies one field of the consent form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsentField {
    Gender,
    AgeGroup,
    Occupation,
    Region,
}

impl ConsentField {
    /// Form label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            ConsentField::Gender => "성별",
            ConsentField::AgeGroup => "연령대",
            ConsentField::Occupation => "직업",
            ConsentField::Region => "지역",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, ConsentField::Region)
    }
}

impl std::fmt::Display for ConsentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A closed set of options for one consent field.
///
/// `as_str` is the value sent to the backend; `label` is what the form
/// displays (they differ for a couple of options).
pub trait Choice: Sized + Copy + 'static {
    const FIELD: ConsentField;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn parse_choice(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::InvalidChoice {
                field: Self::FIELD,
                value: s.to_string(),
            })
    }
}

/// Gender options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남성")]
    Male,
    #[serde(rename = "여성")]
    Female,
    #[serde(rename = "기타")]
    Other,
    #[serde(rename = "선택안함")]
    Undisclosed,
}

impl Choice for Gender {
    const FIELD: ConsentField = ConsentField::Gender;
    const ALL: &'static [Self] = &[
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::Undisclosed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
            Gender::Other => "기타",
            Gender::Undisclosed => "선택안함",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Gender::Undisclosed => "선택하지 않음",
            other => other.as_str(),
        }
    }
}

/// Age group options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "10대")]
    Teens,
    #[serde(rename = "20대")]
    Twenties,
    #[serde(rename = "30대")]
    Thirties,
    #[serde(rename = "40대")]
    Forties,
    #[serde(rename = "50대")]
    Fifties,
    #[serde(rename = "60대 이상")]
    SixtiesAndOver,
}

impl Choice for AgeGroup {
    const FIELD: ConsentField = ConsentField::AgeGroup;
    const ALL: &'static [Self] = &[
        AgeGroup::Teens,
        AgeGroup::Twenties,
        AgeGroup::Thirties,
        AgeGroup::Forties,
        AgeGroup::Fifties,
        AgeGroup::SixtiesAndOver,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Teens => "10대",
            AgeGroup::Twenties => "20대",
            AgeGroup::Thirties => "30대",
            AgeGroup::Forties => "40대",
            AgeGroup::Fifties => "50대",
            AgeGroup::SixtiesAndOver => "60대 이상",
        }
    }
}

/// Occupation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupation {
    #[serde(rename = "학생")]
    Student,
    #[serde(rename = "직장인")]
    OfficeWorker,
    #[serde(rename = "자영업")]
    SelfEmployed,
    #[serde(rename = "전문직")]
    Professional,
    #[serde(rename = "공무원")]
    PublicServant,
    #[serde(rename = "프리랜서")]
    Freelancer,
    #[serde(rename = "주부")]
    Homemaker,
    #[serde(rename = "무직")]
    Unemployed,
    #[serde(rename = "기타")]
    Other,
}

impl Choice for Occupation {
    const FIELD: ConsentField = ConsentField::Occupation;
    const ALL: &'static [Self] = &[
        Occupation::Student,
        Occupation::OfficeWorker,
        Occupation::SelfEmployed,
        Occupation::Professional,
        Occupation::PublicServant,
        Occupation::Freelancer,
        Occupation::Homemaker,
        Occupation::Unemployed,
        Occupation::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Occupation::Student => "학생",
            Occupation::OfficeWorker => "직장인",
            Occupation::SelfEmployed => "자영업",
            Occupation::Professional => "전문직",
            Occupation::PublicServant => "공무원",
            Occupation::Freelancer => "프리랜서",
            Occupation::Homemaker => "주부",
            Occupation::Unemployed => "무직",
            Occupation::Other => "기타",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Occupation::Professional => "전문직 (의사, 변호사, 교수 등)",
            other => other.as_str(),
        }
    }
}

macro_rules! impl_choice_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }

            impl std::str::FromStr for $ty {
                type Err = DomainError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Choice>::parse_choice(s)
                }
            }
        )*
    };
}

impl_choice_str!(Gender, AgeGroup, Occupation);

/// Demographic fields collected before a screening session starts (Value Object)
///
/// Mandatory fields stay `None` until the user picks an option; a session can
/// only be created from a draft that passes [`ConsentInput::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentInput {
    pub gender: Option<Gender>,
    pub age_group: Option<AgeGroup>,
    pub occupation: Option<Occupation>,
    /// Free text, e.g. "서울 강남구"
    pub region: String,
}

impl ConsentInput {
    pub fn new(gender: Gender, age_group: AgeGroup, occupation: Occupation) -> Self {
        Self {
            gender: Some(gender),
            age_group: Some(age_group),
            occupation: Some(occupation),
            region: String::new(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Required fields that are still unset, in form order
    pub fn missing_fields(&self) -> Vec<ConsentField> {
        let mut missing = Vec::new();
        if self.gender.is_none() {
            missing.push(ConsentField::Gender);
        }
        if self.age_group.is_none() {
            missing.push(ConsentField::AgeGroup);
        }
        if self.occupation.is_none() {
            missing.push(ConsentField::Occupation);
        }
        missing
    }

    /// Whether the "agree and start" action may be enabled
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Validate the draft, reporting the first missing required field
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.missing_fields().first() {
            Some(field) => Err(DomainError::MissingConsentField(*field)),
            None => Ok(()),
        }
    }

    /// Region with surrounding whitespace removed; `None` when blank
    pub fn region(&self) -> Option<&str> {
        let region = self.region.trim();
        (!region.is_empty()).then_some(region)
    }
}
