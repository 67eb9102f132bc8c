/// Integration tests for the full prediction pipeline against a small XGBoost model
use std::collections::HashSet;
use std::path::PathBuf;

use flat_prices::{
    catalog::{City, CityCatalog},
    error::AppError,
    features::{self, FeatureInput, SliderValues},
    model::{load_model, ModelError, PriceModel, XgbRegressor},
    predictor::BatchPredictor,
    presentation::{chart::render_chart, Presentation},
    ranking::rank,
    service::PriceService,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/price_model.json")
}

fn load_fixture() -> XgbRegressor {
    load_model(&fixture_path(), true).expect("fixture model should load")
}

fn service() -> PriceService {
    PriceService::new(load_fixture(), CityCatalog::default(), Presentation::default())
}

#[test]
fn test_fixture_model_summary() {
    let model = load_fixture();
    let info = model.info();

    assert_eq!(info.xgboost_version, "2.1.1");
    assert_eq!(info.booster, "gbtree");
    assert_eq!(info.objective, "reg:squarederror");
    assert_eq!(info.num_trees, 3);
    assert_eq!(info.num_features, 9);
    assert_eq!(info.feature_names, FeatureInput::FEATURE_NAMES);
}

#[test]
fn test_single_prediction() {
    let model = load_fixture();
    let catalog = CityCatalog::default();

    // base 500000 + small-flat/southern city 50000 + near university 10000 + elevator 15000
    let krakow = features::build(&SliderValues::default(), 6, &catalog).unwrap();
    assert_eq!(model.predict(&krakow).unwrap(), 575_000.0);

    // Warszawa gets the capital premium
    let warszawa = features::build(&SliderValues::default(), 13, &catalog).unwrap();
    assert_eq!(model.predict(&warszawa).unwrap(), 655_000.0);
}

#[test]
fn test_predict_all_covers_every_city_once() {
    let model = load_fixture();
    let catalog = CityCatalog::default();
    let results = BatchPredictor::new(&model, &catalog)
        .predict_all(&SliderValues::default())
        .unwrap();

    assert_eq!(results.len(), 15);
    let names: HashSet<&str> = results.iter().map(|r| r.city_name.as_str()).collect();
    let expected: HashSet<&str> = catalog.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_defaults_scenario() {
    let ranked = service().evaluate(&SliderValues::default()).unwrap();

    assert_eq!(ranked.len(), 15);
    let prices: Vec<f64> = ranked.iter().map(|r| r.predicted_price).collect();
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    assert!(prices[0] >= prices[14]);

    // Ties keep catalog order: Warszawa before Wrocław, then codes 0..=6, then 7..=12
    let codes: Vec<u32> = ranked.iter().map(|r| r.city_code).collect();
    assert_eq!(codes, vec![13, 14, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

    let highlighted: Vec<_> = ranked.iter().filter(|r| r.is_highlighted).collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].city_name, "Kraków");
}

#[test]
fn test_area_boundaries_give_finite_non_negative_prices() {
    let service = service();

    for area in [20.0, 150.0] {
        let values = SliderValues {
            area,
            university_distance: 20.0,
            has_elevator: false,
            ..SliderValues::default()
        };
        let ranked = service.evaluate(&values).unwrap();

        assert_eq!(ranked.len(), 15);
        for result in ranked.iter() {
            assert!(result.predicted_price.is_finite(), "{:?}", result);
            assert!(result.predicted_price >= 0.0, "{:?}", result);
        }
    }
}

#[test]
fn test_large_flat_is_more_expensive() {
    let service = service();
    let small = service.evaluate(&SliderValues::default()).unwrap();
    let large = service
        .evaluate(&SliderValues {
            area: 150.0,
            ..SliderValues::default()
        })
        .unwrap();

    assert_eq!(large.max_price(), Some(885_000.0));
    assert!(large.max_price() > small.max_price());
}

#[test]
fn test_evaluation_is_idempotent() {
    let service = service();
    let values = SliderValues {
        area: 64.0,
        room_count: 3,
        center_distance: 1.0,
        ..SliderValues::default()
    };

    assert_eq!(
        service.evaluate(&values).unwrap(),
        service.evaluate(&values).unwrap()
    );
}

#[test]
fn test_catalog_without_krakow_highlights_nothing() {
    let catalog = CityCatalog::new(vec![City::new(13, "Warszawa"), City::new(3, "Gdańsk")]).unwrap();
    let service = PriceService::new(load_fixture(), catalog, Presentation::default());

    let ranked = service.evaluate(&SliderValues::default()).unwrap();
    assert_eq!(ranked.len(), 2);
    assert!(ranked.highlighted().is_none());
}

#[test]
fn test_schema_mismatch_is_startup_failure() {
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    let renamed = raw.replace("\"collegeDistance\"", "\"universityDistance\"");
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), renamed).unwrap();

    let err = load_model(file.path(), true).unwrap_err();
    match err {
        AppError::StartupFailure { source, .. } => match source {
            ModelError::FeatureName {
                position,
                expected,
                found,
            } => {
                assert_eq!(position, 2);
                assert_eq!(expected, "collegeDistance");
                assert_eq!(found, "universityDistance");
            }
            other => panic!("Expected FeatureName, got {:?}", other),
        },
        other => panic!("Expected StartupFailure, got {:?}", other),
    }

    // Name checks can be switched off
    assert!(load_model(file.path(), false).is_ok());
}

#[test]
fn test_chart_from_fixture() {
    let ranked = rank(
        BatchPredictor::new(&load_fixture(), &CityCatalog::default())
            .predict_all(&SliderValues::default())
            .unwrap(),
        Some("Kraków"),
    );

    let chart = render_chart(&ranked, &Presentation::default(), 20, false);
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines.len(), 15);
    assert!(lines[0].contains("Warszawa"));
    assert!(lines[0].contains("655,000.00 PLN"));
    assert!(lines[8].contains("Kraków"));
    assert!(lines[8].ends_with("575,000.00 PLN *"));
}
