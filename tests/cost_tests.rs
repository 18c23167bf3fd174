use rcleanops::core::cost::{
    CostDeriver, CostOrigin, ObjectArea, PricingSource, ServicePricing, parse_explicit_cost,
};
use rcleanops::errors::{AppError, AppResult};
use std::collections::HashMap;

/// Catalog kept in memory; ids not inserted do not resolve.
#[derive(Default)]
struct FakeCatalog {
    services: HashMap<i64, ServicePricing>,
    objects: HashMap<i64, ObjectArea>,
}

impl FakeCatalog {
    fn service(mut self, id: i64, price: Option<f64>, unit: Option<&str>) -> Self {
        self.services.insert(
            id,
            ServicePricing {
                price_per_unit: price,
                unit: unit.map(str::to_string),
            },
        );
        self
    }

    fn object(mut self, id: i64, area: Option<f64>) -> Self {
        self.objects.insert(id, ObjectArea { area });
        self
    }
}

impl PricingSource for FakeCatalog {
    fn service_pricing(&self, service_id: i64) -> AppResult<Option<ServicePricing>> {
        Ok(self.services.get(&service_id).cloned())
    }

    fn object_area(&self, object_id: i64) -> AppResult<Option<ObjectArea>> {
        Ok(self.objects.get(&object_id).cloned())
    }
}

fn deriver() -> CostDeriver {
    CostDeriver::new("sq.m")
}

#[test]
fn area_priced_service_scales_with_object_area() {
    let catalog = FakeCatalog::default()
        .service(1, Some(10.0), Some("sq.m"))
        .object(1, Some(25.0));

    let q = deriver().quote(&catalog, 1, 1, None).unwrap();
    assert_eq!(q.cost, Some(250.0));
    assert_eq!(q.origin, CostOrigin::AreaScaled);
}

#[test]
fn other_units_charge_the_flat_price() {
    let catalog = FakeCatalog::default()
        .service(1, Some(50.0), Some("each"))
        .object(1, Some(25.0));

    let q = deriver().quote(&catalog, 1, 1, None).unwrap();
    assert_eq!(q.cost, Some(50.0));
    assert_eq!(q.origin, CostOrigin::Flat);
}

#[test]
fn missing_area_falls_back_to_unit_price() {
    let catalog = FakeCatalog::default()
        .service(1, Some(10.0), Some("sq.m"))
        .object(1, None);

    let q = deriver().quote(&catalog, 1, 1, None).unwrap();
    assert_eq!(q.cost, Some(10.0));
    assert_eq!(q.origin, CostOrigin::AreaFallback);
}

#[test]
fn zero_area_and_unknown_object_also_fall_back() {
    let catalog = FakeCatalog::default()
        .service(1, Some(10.0), Some("sq.m"))
        .object(1, Some(0.0));

    let d = deriver();
    assert_eq!(d.derive(&catalog, 1, 1, None).unwrap(), Some(10.0));
    assert_eq!(d.derive(&catalog, 99, 1, None).unwrap(), Some(10.0));
}

#[test]
fn explicit_cost_overrides_the_catalog() {
    let catalog = FakeCatalog::default()
        .service(1, Some(10.0), Some("sq.m"))
        .object(1, Some(25.0));

    let q = deriver().quote(&catalog, 1, 1, Some("75.5")).unwrap();
    assert_eq!(q.cost, Some(75.5));
    assert_eq!(q.origin, CostOrigin::Explicit);

    // no rounding on the explicit branch
    let q = deriver().quote(&catalog, 1, 1, Some("0.125")).unwrap();
    assert_eq!(q.cost, Some(0.125));
}

#[test]
fn explicit_cost_wins_even_without_a_service() {
    let catalog = FakeCatalog::default();
    let q = deriver().quote(&catalog, 1, 42, Some("100")).unwrap();
    assert_eq!(q.cost, Some(100.0));
    assert_eq!(q.origin, CostOrigin::Explicit);
}

#[test]
fn unknown_service_is_unresolvable() {
    let catalog = FakeCatalog::default().object(1, Some(25.0));

    let q = deriver().quote(&catalog, 1, 404, None).unwrap();
    assert_eq!(q.cost, None);
    assert_eq!(q.origin, CostOrigin::Unresolvable);
}

#[test]
fn service_without_price_is_unresolvable() {
    let catalog = FakeCatalog::default()
        .service(1, None, Some("sq.m"))
        .object(1, Some(25.0));

    assert_eq!(deriver().derive(&catalog, 1, 1, None).unwrap(), None);
}

#[test]
fn malformed_explicit_cost_falls_through_to_catalog() {
    let catalog = FakeCatalog::default()
        .service(1, Some(10.0), Some("sq.m"))
        .object(1, Some(25.0));

    for raw in ["abc", "-5", "", "   ", "NaN", "inf"] {
        let q = deriver().quote(&catalog, 1, 1, Some(raw)).unwrap();
        assert_eq!(q.cost, Some(250.0), "explicit cost {raw:?}");
        assert_eq!(q.origin, CostOrigin::AreaScaled);
    }
}

#[test]
fn area_unit_match_is_exact() {
    let catalog = FakeCatalog::default()
        .service(1, Some(10.0), Some("SQ.M"))
        .service(2, Some(10.0), None)
        .object(1, Some(25.0));

    let d = deriver();
    assert_eq!(d.quote(&catalog, 1, 1, None).unwrap().origin, CostOrigin::Flat);
    assert_eq!(d.quote(&catalog, 1, 2, None).unwrap().origin, CostOrigin::Flat);

    // a different configured label changes which services scale
    let custom = CostDeriver::new("SQ.M");
    assert_eq!(custom.derive(&catalog, 1, 1, None).unwrap(), Some(250.0));
}

#[test]
fn derived_costs_are_rounded_to_cents() {
    let catalog = FakeCatalog::default()
        .service(1, Some(3.333), Some("sq.m"))
        .service(2, Some(19.999), Some("visit"))
        .object(1, Some(3.0));

    let d = deriver();
    assert_eq!(d.derive(&catalog, 1, 1, None).unwrap(), Some(10.0));
    assert_eq!(d.derive(&catalog, 1, 2, None).unwrap(), Some(20.0));
}

#[test]
fn derivation_is_repeatable() {
    let catalog = FakeCatalog::default()
        .service(1, Some(12.5), Some("sq.m"))
        .object(1, Some(17.3));

    let d = deriver();
    let first = d.quote(&catalog, 1, 1, None).unwrap();
    let second = d.quote(&catalog, 1, 1, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parse_explicit_cost_accepts_only_finite_non_negative_numbers() {
    assert_eq!(parse_explicit_cost(Some("0")), Some(0.0));
    assert_eq!(parse_explicit_cost(Some(" 12.5 ")), Some(12.5));
    assert_eq!(parse_explicit_cost(Some("-0.01")), None);
    assert_eq!(parse_explicit_cost(Some("1e400")), None);
    assert_eq!(parse_explicit_cost(Some("twelve")), None);
    assert_eq!(parse_explicit_cost(None), None);
}

#[test]
fn negative_zero_cost_reads_as_zero() {
    let cost = parse_explicit_cost(Some("-0")).unwrap();
    assert_eq!(cost, 0.0);
    assert!(cost.is_sign_positive());
}

#[test]
fn area_product_overflow_is_an_error() {
    let catalog = FakeCatalog::default()
        .service(1, Some(1e200), Some("sq.m"))
        .object(1, Some(1e200));

    assert!(matches!(
        deriver().quote(&catalog, 1, 1, None).unwrap_err(),
        AppError::InvalidNumeric { field: "cost", .. }
    ));
}
