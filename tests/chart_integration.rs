//! Integration tests for the chart collaborator
//!
//! Charts are produced through the `ChartGenerator` trait only.

use liuyao::config::ReferenceData;
use liuyao::core::{Chart, ChartError, ChartGenerator, ChartSubject};
use liuyao::types::CastResult;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

/// A generator standing in for an external interpretation backend
struct FailingGenerator;

impl ChartGenerator for FailingGenerator {
    fn generate(&self, subject: ChartSubject<'_>) -> Result<Chart, ChartError> {
        match subject {
            ChartSubject::Cast(_) => Err(ChartError::GeneratorFailed {
                generator: "failing".into(),
                reason: "casts not supported".into(),
            }),
            ChartSubject::BirthTime(_) => Err(ChartError::UncorrectedBirthTime),
        }
    }
}

fn generate_all(generator: &dyn ChartGenerator, casts: &[CastResult]) -> Vec<Result<Chart, ChartError>> {
    casts.iter().map(|c| generator.generate(ChartSubject::Cast(c))).collect()
}

#[test]
fn test_summary_through_trait_object() {
    let data = ReferenceData::bundled().unwrap();
    let builder = data.builder();
    let casts = vec![
        builder.from_values([0, 1, 2, 3, 1, 2]).unwrap(),
        builder.from_values([3, 3, 3, 3, 3, 3]).unwrap(),
    ];
    let summary = data.summary_chart();
    let charts = generate_all(&summary, &casts);

    let names: Vec<(String, Option<String>)> = charts
        .into_iter()
        .map(|c| match c.unwrap() {
            Chart::Cast(s) => (s.primary.name, s.transformed.map(|t| t.name)),
            Chart::BirthTime(_) => panic!("expected cast chart"),
        })
        .collect();
    assert_eq!(
        names,
        vec![
            ("困".to_string(), Some("節".to_string())),
            ("乾".to_string(), Some("坤".to_string())),
        ]
    );
}

#[test]
fn test_external_generator_errors_surface() {
    let data = ReferenceData::bundled().unwrap();
    let cast = data.builder().from_values([1; 6]).unwrap();
    let err = FailingGenerator.generate(ChartSubject::Cast(&cast)).unwrap_err();
    assert_eq!(err.code(), "C402_GENERATOR_FAILED");
    assert!(err.to_string().contains("casts not supported"));
}

#[test]
fn test_corrected_birth_time_summary() {
    let data = ReferenceData::bundled().unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap().and_hms_opt(12, 55, 0).unwrap();
    let result = data.corrector().correct(date, "臺北市");
    let chart = data.summary_chart().generate(ChartSubject::BirthTime(&result)).unwrap();
    let Chart::BirthTime(s) = chart else {
        panic!("expected birth time chart");
    };
    assert_eq!(s.branch, "未");
    assert_eq!(s.shichen.index(), 7);
    assert!(s.location_found);
    assert!(s.note.is_some());
}
