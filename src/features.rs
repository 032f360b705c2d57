use crate::errors::AppError;
use crate::models::{ClientRecord, FeatureVector};

/// A built feature vector plus the names of any fields whose value had to be
/// replaced during sanitization.
///
/// The substitution must be visible to the caller, not silent; the dashboard
/// surfaces one warning per listed field.
#[derive(Debug, Clone)]
pub struct SanitizedVector {
    pub vector: FeatureVector,
    pub sanitized_fields: Vec<&'static str>,
}

/// Builds the model input vector for one client record.
///
/// `PAYMENT_RATE` is derived as AMT_ANNUITY / AMT_CREDIT. A zero or missing
/// credit amount makes the ratio meaningless, so the record is rejected
/// instead of producing a vector. Missing continuous features flow in as NaN
/// and are caught by the sanitization pass below.
pub fn build_feature_vector(record: &ClientRecord) -> Result<SanitizedVector, AppError> {
    let credit = match record.amt_credit {
        Some(credit) if credit != 0.0 => credit,
        Some(_) => {
            return Err(AppError::BadRequest(format!(
                "client {} has AMT_CREDIT = 0, payment rate is undefined",
                record.sk_id_curr
            )))
        }
        None => {
            return Err(AppError::BadRequest(format!(
                "client {} has no AMT_CREDIT, payment rate is undefined",
                record.sk_id_curr
            )))
        }
    };

    let annuity = record.amt_annuity.unwrap_or(f64::NAN);

    let mut vector = FeatureVector {
        ext_source_3: record.ext_source_3.unwrap_or(f64::NAN),
        ext_source_2: record.ext_source_2.unwrap_or(f64::NAN),
        ext_source_1: record.ext_source_1.unwrap_or(f64::NAN),
        amt_annuity: annuity,
        payment_rate: annuity / credit,
        name_family_status_married: record.name_family_status.married_flag(),
        code_gender_f: record.code_gender.female_flag(),
        // No source data for this feature yet; the model expects the column.
        approved_cnt_payment_mean: 0.0,
    };

    let sanitized_fields = sanitize(&mut vector);
    Ok(SanitizedVector {
        vector,
        sanitized_fields,
    })
}

/// Replaces every NaN or infinite value with 0.0 and returns the affected
/// field names. Nothing non-finite may ever reach the wire.
pub fn sanitize(vector: &mut FeatureVector) -> Vec<&'static str> {
    let mut sanitized = Vec::new();
    for (name, value) in vector.continuous_fields_mut() {
        if !value.is_finite() {
            tracing::warn!(
                "Invalid value detected for {}, replaced with 0.0 before sending",
                name
            );
            *value = 0.0;
            sanitized.push(name);
        }
    }
    sanitized
}
