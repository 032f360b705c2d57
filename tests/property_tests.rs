/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use proptest::prelude::*;
use rust_credit_demo::explanations::Explanation;
use rust_credit_demo::features::build_feature_vector;
use rust_credit_demo::models::{ClientRecord, Gender, MaritalStatus};
use rust_credit_demo::waterfall::WaterfallChart;

/// Any f64, including NaN and the infinities.
fn any_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn arb_record() -> impl Strategy<Value = ClientRecord> {
    (
        any::<u64>(),
        proptest::option::of(any_float()),
        proptest::option::of(any_float()),
        proptest::option::of(any_float()),
        proptest::option::of(any_float()),
        proptest::option::of(any_float()),
        "[a-zA-Z /]{0,20}",
        "[A-Z]{0,3}",
    )
        .prop_map(
            |(id, e1, e2, e3, annuity, credit, status, gender)| ClientRecord {
                sk_id_curr: id,
                ext_source_1: e1,
                ext_source_2: e2,
                ext_source_3: e3,
                amt_annuity: annuity,
                amt_credit: credit,
                name_family_status: MaritalStatus::from(status),
                code_gender: Gender::from(gender),
            },
        )
}

proptest! {
    // Property: the builder never panics, whatever the record holds
    #[test]
    fn builder_never_panics(record in arb_record()) {
        let _ = build_feature_vector(&record);
    }

    // Property: a built vector is always fully finite
    #[test]
    fn built_vectors_are_always_finite(record in arb_record()) {
        if let Ok(built) = build_feature_vector(&record) {
            let v = &built.vector;
            prop_assert!(v.ext_source_1.is_finite());
            prop_assert!(v.ext_source_2.is_finite());
            prop_assert!(v.ext_source_3.is_finite());
            prop_assert!(v.amt_annuity.is_finite());
            prop_assert!(v.payment_rate.is_finite());
            prop_assert_eq!(v.approved_cnt_payment_mean, 0.0);
        }
    }

    // Property: a sanitized field is exactly one that became 0.0, and every
    // substitution is reported
    #[test]
    fn sanitization_is_reported(record in arb_record()) {
        if let Ok(built) = build_feature_vector(&record) {
            for field in &built.sanitized_fields {
                let value = match *field {
                    "EXT_SOURCE_1" => built.vector.ext_source_1,
                    "EXT_SOURCE_2" => built.vector.ext_source_2,
                    "EXT_SOURCE_3" => built.vector.ext_source_3,
                    "AMT_ANNUITY" => built.vector.amt_annuity,
                    "PAYMENT_RATE" => built.vector.payment_rate,
                    other => {
                        prop_assert!(false, "unknown sanitized field {}", other);
                        unreachable!()
                    }
                };
                prop_assert_eq!(value, 0.0);
            }
        }
    }

    // Property: payment rate equals annuity/credit whenever both are finite
    #[test]
    fn payment_rate_matches_ratio(
        annuity in 1.0f64..1e7,
        credit in 1.0f64..1e7,
    ) {
        let record = ClientRecord {
            sk_id_curr: 1,
            ext_source_1: Some(0.5),
            ext_source_2: Some(0.5),
            ext_source_3: Some(0.5),
            amt_annuity: Some(annuity),
            amt_credit: Some(credit),
            name_family_status: MaritalStatus::Married,
            code_gender: Gender::Female,
        };
        let built = build_feature_vector(&record).unwrap();
        prop_assert!((built.vector.payment_rate - annuity / credit).abs() < 1e-12);
        prop_assert!(built.sanitized_fields.is_empty());
    }

    // Property: binary encodings are 0 or 1 and match the domain
    #[test]
    fn binary_encodings_are_binary(status in "\\PC{0,30}", gender in "\\PC{0,5}") {
        let married = MaritalStatus::from(status.clone()).married_flag();
        let female = Gender::from(gender.clone()).female_flag();
        prop_assert!(married == 0 || married == 1);
        prop_assert!(female == 0 || female == 1);
        prop_assert_eq!(married == 1, status == "Married");
        prop_assert_eq!(female == 1, gender == "F");
    }

    // Property: waterfall segments chain from the baseline to the final value
    #[test]
    fn waterfall_segments_are_cumulative(
        base in -10.0f64..10.0,
        values in proptest::collection::vec(-5.0f64..5.0, 0..16),
    ) {
        let n = values.len();
        let explanation = Explanation {
            values: values.clone(),
            base_value: base,
            data: vec![0.0; n],
            feature_names: (0..n).map(|i| format!("F{}", i)).collect(),
        };
        let chart = WaterfallChart::from_explanation(&explanation);

        let mut expected = base;
        for (segment, value) in chart.segments.iter().zip(values.iter()) {
            prop_assert!((segment.start - expected).abs() < 1e-9);
            expected += value;
            prop_assert!((segment.end - expected).abs() < 1e-9);
        }
        prop_assert!((chart.final_value - expected).abs() < 1e-9);

        let sum: f64 = values.iter().sum();
        prop_assert!((chart.final_value - (base + sum)).abs() < 1e-6);
    }

    // Property: reordering keeps values and data aligned with their names
    #[test]
    fn reorder_preserves_alignment(
        values in proptest::collection::vec(-5.0f64..5.0, 3..8),
    ) {
        let n = values.len();
        let explanation = Explanation {
            values: values.clone(),
            base_value: 0.0,
            data: (0..n).map(|i| i as f64 * 10.0).collect(),
            feature_names: (0..n).map(|i| format!("F{}", i)).collect(),
        };

        // Ask for the features in reverse, plus one that does not exist.
        let mut order: Vec<String> = (0..n).rev().map(|i| format!("F{}", i)).collect();
        order.push("MISSING".to_string());
        let order_refs: Vec<&str> = order.iter().map(String::as_str).collect();

        let reordered = explanation.reordered(&order_refs);
        prop_assert_eq!(reordered.feature_names.len(), n);
        for (i, name) in reordered.feature_names.iter().enumerate() {
            let original: usize = name[1..].parse().unwrap();
            prop_assert_eq!(reordered.values[i], values[original]);
            prop_assert_eq!(reordered.data[i], original as f64 * 10.0);
        }
    }
}
