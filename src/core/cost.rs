//! Work-order cost derivation.
//!
//! An explicit cost always wins. Without one, the price comes from the service
//! catalog: services billed per area unit are scaled by the object's area, every
//! other unit is charged as a flat price.

use crate::db::queries::{objects, services};
use crate::errors::{AppError, AppResult};
use crate::utils::numeric::round2;
use rusqlite::Connection;
use std::fmt;

/// Pricing fields of a catalog service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicePricing {
    pub price_per_unit: Option<f64>,
    pub unit: Option<String>,
}

/// Area of a serviced object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectArea {
    pub area: Option<f64>,
}

/// Read-only lookups the deriver needs.
///
/// Implemented for `rusqlite::Connection`, so an open transaction can be passed
/// directly and the lookups see the same snapshot as the write.
pub trait PricingSource {
    fn service_pricing(&self, service_id: i64) -> AppResult<Option<ServicePricing>>;
    fn object_area(&self, object_id: i64) -> AppResult<Option<ObjectArea>>;
}

impl PricingSource for Connection {
    fn service_pricing(&self, service_id: i64) -> AppResult<Option<ServicePricing>> {
        Ok(services::get_service_pricing(self, service_id)?)
    }

    fn object_area(&self, object_id: i64) -> AppResult<Option<ObjectArea>> {
        Ok(objects::get_object_area(self, object_id)?)
    }
}

/// Which rule produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostOrigin {
    /// Caller-supplied amount.
    Explicit,
    /// price × area for an area-priced service.
    AreaScaled,
    /// Unit price of a service not billed by area.
    Flat,
    /// Area-priced service on an object with no usable area.
    AreaFallback,
    /// Service missing or without a price.
    Unresolvable,
}

impl CostOrigin {
    pub fn label(&self) -> &'static str {
        match self {
            CostOrigin::Explicit => "explicit",
            CostOrigin::AreaScaled => "area-scaled",
            CostOrigin::Flat => "flat",
            CostOrigin::AreaFallback => "area-fallback",
            CostOrigin::Unresolvable => "unresolvable",
        }
    }
}

impl fmt::Display for CostOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostQuote {
    pub cost: Option<f64>,
    pub origin: CostOrigin,
}

impl CostQuote {
    fn new(cost: Option<f64>, origin: CostOrigin) -> Self {
        Self { cost, origin }
    }
}

/// Parse a caller-supplied cost. Anything that is not a finite, non-negative
/// number (blank, garbage, `-5`, `NaN`, `inf`) counts as "no explicit cost".
/// `-0` is read as `0`.
pub fn parse_explicit_cost(raw: Option<&str>) -> Option<f64> {
    let v: f64 = raw?.trim().parse().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v + 0.0)
}

pub struct CostDeriver {
    area_unit: String,
}

impl CostDeriver {
    /// `area_unit` is matched exactly (case-sensitive) against the service unit.
    pub fn new(area_unit: impl Into<String>) -> Self {
        Self {
            area_unit: area_unit.into(),
        }
    }

    pub fn area_unit(&self) -> &str {
        &self.area_unit
    }

    /// Full derivation, reporting which branch answered.
    pub fn quote<S: PricingSource + ?Sized>(
        &self,
        source: &S,
        object_id: i64,
        service_id: i64,
        explicit_cost: Option<&str>,
    ) -> AppResult<CostQuote> {
        if let Some(cost) = parse_explicit_cost(explicit_cost) {
            return Ok(CostQuote::new(Some(cost), CostOrigin::Explicit));
        }

        let Some(pricing) = source.service_pricing(service_id)? else {
            return Ok(CostQuote::new(None, CostOrigin::Unresolvable));
        };
        let Some(price) = pricing.price_per_unit else {
            return Ok(CostQuote::new(None, CostOrigin::Unresolvable));
        };

        if pricing.unit.as_deref() != Some(self.area_unit.as_str()) {
            return Ok(CostQuote::new(Some(round2(price)), CostOrigin::Flat));
        }

        let area = source
            .object_area(object_id)?
            .and_then(|o| o.area)
            .filter(|a| *a != 0.0);

        Ok(match area {
            Some(a) => {
                let total = price * a;
                if !total.is_finite() {
                    return Err(AppError::InvalidNumeric {
                        field: "cost",
                        value: format!("{price} x {a}"),
                    });
                }
                CostQuote::new(Some(round2(total)), CostOrigin::AreaScaled)
            }
            None => CostQuote::new(Some(round2(price)), CostOrigin::AreaFallback),
        })
    }

    /// The cost alone; `None` means the work order is stored without one.
    pub fn derive<S: PricingSource + ?Sized>(
        &self,
        source: &S,
        object_id: i64,
        service_id: i64,
        explicit_cost: Option<&str>,
    ) -> AppResult<Option<f64>> {
        Ok(self
            .quote(source, object_id, service_id, explicit_cost)?
            .cost)
    }
}
