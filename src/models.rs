// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::SubmissionError;

/// Fields the simulator form must carry, non-empty, before it is sent.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "nom",
    "prenom",
    "email",
    "age",
    "anciennete_permis",
    "puissance",
];

/// Field values collected from the simulator form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission(BTreeMap<String, String>);

impl FormSubmission {
    /// Builds a submission from form entries. A repeated name keeps its last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        entries.into_iter().collect()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSubmission {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The premium as sent back by the server: a JSON number or a preformatted string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PremiumValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PremiumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PremiumValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    write!(f, "{}", i)
                } else if let Some(u) = n.as_u64() {
                    write!(f, "{}", u)
                } else {
                    // f64 Display drops a zero fractional part, like a browser does
                    write!(f, "{}", n.as_f64().unwrap_or(f64::NAN))
                }
            }
            PremiumValue::Text(s) => f.write_str(s),
        }
    }
}

/// Body of a `/calcul_prime` answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerResult {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub prime: Option<PremiumValue>,
}

impl ServerResult {
    /// A non-empty `error` wins over `prime`; an answer with neither is malformed.
    pub fn into_premium(self) -> Result<PremiumValue, SubmissionError> {
        match (self.error, self.prime) {
            (Some(error), _) if !error.is_empty() => Err(SubmissionError::Application(error)),
            (_, Some(prime)) => Ok(prime),
            _ => Err(SubmissionError::Parse(
                "La réponse du serveur ne contient pas de prime.".to_string(),
            )),
        }
    }
}

/// What `/calcul_prime` accepts, as JSON or as an urlencoded form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PremiumRequest {
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: Option<String>,
    #[serde(default)]
    pub anciennete_permis: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub puissance: Option<String>,
    #[serde(default)]
    pub usage_type: Option<String>,
}

/// A JSON scalar sent where a form would send text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

/// Accepts `"30"` as well as `30`, keeping the value as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Number(n) => n.to_string(),
    }))
}

/// Driving licence seniority buckets offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseSeniority {
    LessThanFive,
    FiveToTwenty,
    MoreThanTwenty,
}

impl LicenseSeniority {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "moins_5" => Some(LicenseSeniority::LessThanFive),
            "5_20" => Some(LicenseSeniority::FiveToTwenty),
            "plus_20" => Some(LicenseSeniority::MoreThanTwenty),
            _ => None,
        }
    }

    /// Years of licence the bucket stands for in the premium formula.
    pub fn years(self) -> i64 {
        match self {
            LicenseSeniority::LessThanFive => 5,
            LicenseSeniority::FiveToTwenty => 10,
            LicenseSeniority::MoreThanTwenty => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageType {
    Personal,
    Professional,
    Other,
}

impl UsageType {
    /// Absent means personal use; unknown values are priced in between.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            None | Some("personal") => UsageType::Personal,
            Some("professional") => UsageType::Professional,
            Some(_) => UsageType::Other,
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageType::Personal => write!(f, "personal"),
            UsageType::Professional => write!(f, "professional"),
            UsageType::Other => write!(f, "other"),
        }
    }
}
