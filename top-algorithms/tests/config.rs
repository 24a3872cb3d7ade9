use serde_json::json;
use top_algorithms::Params;
use top_challenges::TopError;

#[test]
fn test_defaults() {
    let params = Params::initialize(&None).unwrap();
    assert_eq!(params, Params::default());
    assert_eq!(params.pop_size, 300);
    assert_eq!(params.tour_tries_max, 30);
    assert_eq!(params.p_crossover, 0.75);
    assert_eq!(params.p_mutate, 0.25);
    assert_eq!(params.tpg_percent, 0.03);
    assert_eq!(params.max_generations, 200);
    assert_eq!(params.stagnation_limit(), 50);
    assert_eq!(params.elite_count(), 9);
}

#[test]
fn test_overrides_merge_over_defaults() {
    let map = json!({"pop_size": 40, "p_mutate": 0.5, "unknown_key": "ignored"})
        .as_object()
        .cloned();
    let params = Params::initialize(&map).unwrap();
    assert_eq!(params.pop_size, 40);
    assert_eq!(params.p_mutate, 0.5);
    assert_eq!(params.max_generations, 200);
    assert_eq!(params.elite_count(), 1);
}

#[test]
fn test_wrong_types_are_rejected() {
    let map = json!({"pop_size": "lots"}).as_object().cloned();
    assert!(matches!(
        Params::initialize(&map),
        Err(TopError::InvalidParams(_))
    ));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    for bad in [
        json!({"pop_size": 0}),
        json!({"p_crossover": 1.5}),
        json!({"tpg_percent": -0.1}),
    ] {
        let map = bad.as_object().cloned();
        assert!(matches!(
            Params::initialize(&map),
            Err(TopError::InvalidParams(_))
        ));
    }
}

#[test]
fn test_stagnation_limit_rounds() {
    let params = Params {
        max_generations: 10,
        ..Params::default()
    };
    assert_eq!(params.stagnation_limit(), 3);
    let params = Params {
        max_generations: 2,
        ..Params::default()
    };
    assert_eq!(params.stagnation_limit(), 1);
}
