use serde::{Deserialize, Serialize};

// ============ Client Database Models ============

/// Marital status as recorded in the client database.
///
/// The prediction model only cares about `Married`, but the CSV carries the
/// full domain; unseen values are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum MaritalStatus {
    Married,
    SingleNotMarried,
    CivilMarriage,
    Widow,
    Separated,
    /// Any value outside the known domain, kept verbatim.
    Other(String),
}

impl From<String> for MaritalStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Married" => MaritalStatus::Married,
            "Single / not married" => MaritalStatus::SingleNotMarried,
            "Civil marriage" => MaritalStatus::CivilMarriage,
            "Widow" => MaritalStatus::Widow,
            "Separated" => MaritalStatus::Separated,
            _ => MaritalStatus::Other(value),
        }
    }
}

impl MaritalStatus {
    /// Binary encoding used by the model: 1 for `Married`, 0 for everything
    /// else, including unseen values.
    pub fn married_flag(&self) -> u8 {
        match self {
            MaritalStatus::Married => 1,
            _ => 0,
        }
    }
}

/// Gender code as recorded in the client database.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum Gender {
    Female,
    Male,
    /// Any value outside the known domain (the dataset contains "XNA").
    Other(String),
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "F" => Gender::Female,
            "M" => Gender::Male,
            _ => Gender::Other(value),
        }
    }
}

impl Gender {
    /// Binary encoding used by the model: 1 for `F`, 0 for everything else.
    pub fn female_flag(&self) -> u8 {
        match self {
            Gender::Female => 1,
            _ => 0,
        }
    }

    /// The raw code as it appears in the database.
    pub fn code(&self) -> &str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
            Gender::Other(code) => code,
        }
    }
}

/// One row of the client sample database.
///
/// Loaded once at startup and read-only thereafter. The `TARGET` label column
/// present in the CSV is dropped on load and never modeled here.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "SK_ID_CURR")]
    pub sk_id_curr: u64,
    #[serde(rename = "EXT_SOURCE_1")]
    pub ext_source_1: Option<f64>,
    #[serde(rename = "EXT_SOURCE_2")]
    pub ext_source_2: Option<f64>,
    #[serde(rename = "EXT_SOURCE_3")]
    pub ext_source_3: Option<f64>,
    #[serde(rename = "AMT_ANNUITY")]
    pub amt_annuity: Option<f64>,
    #[serde(rename = "AMT_CREDIT")]
    pub amt_credit: Option<f64>,
    #[serde(rename = "NAME_FAMILY_STATUS")]
    pub name_family_status: MaritalStatus,
    #[serde(rename = "CODE_GENDER")]
    pub code_gender: Gender,
}

impl ClientRecord {
    /// Value of one display feature as carried by the database row itself.
    ///
    /// Returns `None` for features the database does not store (derived or
    /// enrichment-only features), which the dashboard shows as "not provided".
    pub fn display_feature(&self, name: &str) -> Option<String> {
        let fmt = |v: Option<f64>| v.map(|v| format!("{}", v));
        match name {
            "EXT_SOURCE_1" => fmt(self.ext_source_1),
            "EXT_SOURCE_2" => fmt(self.ext_source_2),
            "EXT_SOURCE_3" => fmt(self.ext_source_3),
            "AMT_ANNUITY" => fmt(self.amt_annuity),
            "AMT_CREDIT" => fmt(self.amt_credit),
            "CODE_GENDER" => Some(self.code_gender.code().to_string()),
            _ => None,
        }
    }
}

// ============ Prediction API Models ============

/// Fixed-order feature vector sent to the prediction service.
///
/// Field names match the model's training columns exactly; the JSON body is
/// `{"inputs": [ <this struct> ]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "EXT_SOURCE_3")]
    pub ext_source_3: f64,
    #[serde(rename = "EXT_SOURCE_2")]
    pub ext_source_2: f64,
    #[serde(rename = "EXT_SOURCE_1")]
    pub ext_source_1: f64,
    #[serde(rename = "AMT_ANNUITY")]
    pub amt_annuity: f64,
    /// AMT_ANNUITY / AMT_CREDIT, derived at build time.
    #[serde(rename = "PAYMENT_RATE")]
    pub payment_rate: f64,
    #[serde(rename = "NAME_FAMILY_STATUS_Married")]
    pub name_family_status_married: u8,
    #[serde(rename = "CODE_GENDER_F")]
    pub code_gender_f: u8,
    /// Not present in the sample database; always sent as 0.0 until the
    /// enrichment pipeline provides it.
    #[serde(rename = "APPROVED_CNT_PAYMENT_MEAN")]
    pub approved_cnt_payment_mean: f64,
}

impl FeatureVector {
    /// The continuous fields, as (name, mutable value) pairs.
    ///
    /// Used by the sanitization pass; the binary encodings cannot be
    /// non-finite and are excluded.
    pub fn continuous_fields_mut(&mut self) -> [(&'static str, &mut f64); 5] {
        [
            ("EXT_SOURCE_3", &mut self.ext_source_3),
            ("EXT_SOURCE_2", &mut self.ext_source_2),
            ("EXT_SOURCE_1", &mut self.ext_source_1),
            ("AMT_ANNUITY", &mut self.amt_annuity),
            ("PAYMENT_RATE", &mut self.payment_rate),
        ]
    }
}

/// Decoded response from the prediction endpoint. Display only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionResult {
    /// Predicted class label.
    pub classe: String,
    /// Probability of repayment failure, in [0, 1].
    pub proba_echec: f64,
}

impl PredictionResult {
    /// Failure probability formatted for the operator, e.g. "12.00%".
    pub fn failure_probability_display(&self) -> String {
        format!("{:.2}%", self.proba_echec * 100.0)
    }
}

/// Fixed display order for the top features, shared by the client value table
/// and the waterfall chart.
///
/// Note the explanation file names the raw gender column (`CODE_GENDER`)
/// while the request payload carries the encoded `CODE_GENDER_F`.
pub const DISPLAY_FEATURES: [&str; 8] = [
    "EXT_SOURCE_1",
    "EXT_SOURCE_2",
    "EXT_SOURCE_3",
    "PAYMENT_RATE",
    "NAME_FAMILY_STATUS_Married",
    "CODE_GENDER",
    "AMT_ANNUITY",
    "APPROVED_CNT_PAYMENT_MEAN",
];
