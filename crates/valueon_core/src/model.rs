//! Data models for the feasibility inputs.
//!
//! Field names serialize in camelCase so saved snapshots keep the same shape
//! as the browser client that produces them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::lenient;

/// Physical targets of the project the cost rates are multiplied against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTarget {
    /// Site area (pyung)
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_land_area: f64,
    /// Gross floor area (pyung)
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_floor_area: f64,
    /// Household count
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_households: f64,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub private_land_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub public_land_area: Option<f64>,
}

/// Which part of the site a per-site-area rate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteArea {
    Total,
    Private,
    Public,
}

/// What a cost item's amount is multiplied against.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CalculationBasis {
    /// The amount is already a total.
    #[default]
    Fixed,
    /// Amount per household.
    PerUnit,
    /// Amount per pyung of (part of) the site.
    PerSiteArea(SiteArea),
    /// Amount per pyung of floor area.
    PerFloorArea,
    /// Amount per pyung of a manually entered area.
    ManualArea(f64),
    /// Per-unit rates keyed by allocation id; the amount itself is unused.
    MixLinked(BTreeMap<String, f64>),
}

/// Wire tag of a [`CalculationBasis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisTag {
    Fixed,
    PerUnit,
    PerSitePyung,
    PerSitePrivate,
    PerSitePublic,
    PerFloorPyung,
    ManualPyeong,
    MixLinked,
}

impl BasisTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BasisTag::Fixed => "fixed",
            BasisTag::PerUnit => "per_unit",
            BasisTag::PerSitePyung => "per_site_pyung",
            BasisTag::PerSitePrivate => "per_site_private",
            BasisTag::PerSitePublic => "per_site_public",
            BasisTag::PerFloorPyung => "per_floor_pyung",
            BasisTag::ManualPyeong => "manual_pyeong",
            BasisTag::MixLinked => "mix_linked",
        }
    }

    /// Korean label shown next to an item's amount.
    pub fn label(&self) -> &'static str {
        match self {
            BasisTag::PerSitePyung => "대지평당",
            BasisTag::PerSitePrivate => "사유지평당",
            BasisTag::PerSitePublic => "국공유지평당",
            BasisTag::PerFloorPyung => "연면적평당",
            BasisTag::PerUnit => "세대당",
            BasisTag::ManualPyeong => "직접입력평당",
            BasisTag::MixLinked => "평형연동",
            BasisTag::Fixed => "고정",
        }
    }

    /// Suggest a basis for a new cost item from its name and category.
    ///
    /// Land wording points at site area, construction and design work at floor
    /// area, and sales or operating costs at households. Anything else is fixed.
    pub fn recommend(item_name: &str, category_id: Option<&str>) -> Self {
        const SITE: [&str; 4] = ["토지", "매입", "국유지", "지주"];
        const FLOOR: [&str; 7] = ["공사", "건축", "설계", "감리", "철거", "토목", "인입"];
        const UNIT: [&str; 7] = ["분양", "m/h", "모델하우스", "광고", "입주", "운영", "운영비"];

        let name = item_name.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| name.contains(w));

        if mentions(&SITE[..]) || category_id == Some("land") {
            BasisTag::PerSitePyung
        } else if mentions(&FLOOR[..]) || category_id == Some("construction") {
            BasisTag::PerFloorPyung
        } else if mentions(&UNIT[..]) || category_id == Some("sales") {
            BasisTag::PerUnit
        } else {
            BasisTag::Fixed
        }
    }
}

impl fmt::Display for BasisTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasisTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(BasisTag::Fixed),
            "per_unit" => Ok(BasisTag::PerUnit),
            "per_site_pyung" => Ok(BasisTag::PerSitePyung),
            "per_site_private" => Ok(BasisTag::PerSitePrivate),
            "per_site_public" => Ok(BasisTag::PerSitePublic),
            "per_floor_pyung" => Ok(BasisTag::PerFloorPyung),
            "manual_pyeong" => Ok(BasisTag::ManualPyeong),
            "mix_linked" => Ok(BasisTag::MixLinked),
            other => Err(format!("unknown calculation basis: {}", other)),
        }
    }
}

impl CalculationBasis {
    pub fn tag(&self) -> BasisTag {
        match self {
            CalculationBasis::Fixed => BasisTag::Fixed,
            CalculationBasis::PerUnit => BasisTag::PerUnit,
            CalculationBasis::PerSiteArea(SiteArea::Total) => BasisTag::PerSitePyung,
            CalculationBasis::PerSiteArea(SiteArea::Private) => BasisTag::PerSitePrivate,
            CalculationBasis::PerSiteArea(SiteArea::Public) => BasisTag::PerSitePublic,
            CalculationBasis::PerFloorArea => BasisTag::PerFloorPyung,
            CalculationBasis::ManualArea(_) => BasisTag::ManualPyeong,
            CalculationBasis::MixLinked(_) => BasisTag::MixLinked,
        }
    }

    /// Build a basis from its wire tag and the side fields that parameterize it.
    pub fn from_parts(
        tag: BasisTag,
        manual_area: Option<f64>,
        mix_conditions: Option<BTreeMap<String, f64>>,
    ) -> Self {
        match tag {
            BasisTag::Fixed => CalculationBasis::Fixed,
            BasisTag::PerUnit => CalculationBasis::PerUnit,
            BasisTag::PerSitePyung => CalculationBasis::PerSiteArea(SiteArea::Total),
            BasisTag::PerSitePrivate => CalculationBasis::PerSiteArea(SiteArea::Private),
            BasisTag::PerSitePublic => CalculationBasis::PerSiteArea(SiteArea::Public),
            BasisTag::PerFloorPyung => CalculationBasis::PerFloorArea,
            BasisTag::ManualPyeong => {
                CalculationBasis::ManualArea(lenient::finite(manual_area.unwrap_or(0.0)))
            }
            BasisTag::MixLinked => CalculationBasis::MixLinked(mix_conditions.unwrap_or_default()),
        }
    }
}

/// A resolved line inside a cost item. Owned by exactly one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A cost line item.
///
/// When `sub_items` is non-empty, `amount` mirrors their sum and `basis` is
/// [`CalculationBasis::Fixed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CostItemRecord", into = "CostItemRecord")]
pub struct CostItem {
    pub id: String,
    pub name: String,
    /// Unit rate or fixed total, depending on `basis`
    pub amount: f64,
    pub basis: CalculationBasis,
    /// Percentage applied to the computed amount; `None` means 100
    pub application_rate: Option<f64>,
    pub sub_items: Vec<SubItem>,
    pub note: Option<String>,
}

impl CostItem {
    /// Create a fixed-amount item.
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            basis: CalculationBasis::Fixed,
            application_rate: None,
            sub_items: Vec::new(),
            note: None,
        }
    }

    pub fn with_basis(mut self, basis: CalculationBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.application_rate = Some(rate);
        self
    }

    /// Attach a sub-item, keeping the derived amount and fixed basis in sync.
    pub fn with_sub_item(mut self, sub_item: SubItem) -> Self {
        self.sub_items.push(sub_item);
        self.sync_sub_items();
        self
    }

    /// Recompute `amount` from the sub-items and force the fixed basis.
    ///
    /// With no sub-items left the amount falls to their (empty) sum and the
    /// basis is left as it was.
    pub fn sync_sub_items(&mut self) {
        self.amount = self.sub_items.iter().map(|s| lenient::finite(s.amount)).sum();
        if !self.sub_items.is_empty() {
            self.basis = CalculationBasis::Fixed;
        }
    }

    pub fn rate_percent(&self) -> f64 {
        self.application_rate.map(lenient::finite).unwrap_or(100.0)
    }
}

/// Flat wire shape of [`CostItem`]: the basis travels as a string tag with
/// its parameters in sibling fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItemRecord {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calculation_basis: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    manual_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number_map", skip_serializing_if = "Option::is_none")]
    mix_conditions: Option<BTreeMap<String, f64>>,
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    application_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sub_items: Vec<SubItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl From<CostItemRecord> for CostItem {
    fn from(record: CostItemRecord) -> Self {
        let tag = match record.calculation_basis.as_deref() {
            None => BasisTag::Fixed,
            // Deprecated flat per-pyung rate; older snapshots treat it as a total.
            Some("per_pyung") => BasisTag::Fixed,
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Cost item {}: {}, treating as fixed", record.id, e);
                BasisTag::Fixed
            }),
        };

        let mut item = CostItem {
            id: record.id,
            name: record.name,
            amount: record.amount,
            basis: CalculationBasis::from_parts(tag, record.manual_area, record.mix_conditions),
            application_rate: record.application_rate,
            sub_items: record.sub_items,
            note: record.note,
        };
        if !item.sub_items.is_empty() {
            item.sync_sub_items();
        }
        item
    }
}

impl From<CostItem> for CostItemRecord {
    fn from(item: CostItem) -> Self {
        let tag = item.basis.tag();
        let (manual_area, mix_conditions) = match item.basis {
            CalculationBasis::ManualArea(area) => (Some(area), None),
            CalculationBasis::MixLinked(conditions) => (None, Some(conditions)),
            _ => (None, None),
        };
        Self {
            id: item.id,
            name: item.name,
            amount: item.amount,
            calculation_basis: Some(tag.as_str().to_string()),
            manual_area,
            mix_conditions,
            application_rate: item.application_rate,
            sub_items: item.sub_items,
            note: item.note,
        }
    }
}

/// A user-defined group of cost items. Order is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCategory {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<CostItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CostCategory {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items: Vec::new(),
            note: None,
        }
    }

    pub fn with_item(mut self, item: CostItem) -> Self {
        self.items.push(item);
        self
    }
}

/// Kind of unit a type describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitCategory {
    #[default]
    Apartment,
    Rental,
    Retail,
}

/// A unit floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitType {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Supply area (pyung)
    #[serde(default, deserialize_with = "lenient::number")]
    pub supply_area: f64,
    /// Exclusive area (m²)
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub exclusive_area_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<UnitCategory>,
    /// Units of this type across all tiers; enables count linking
    #[serde(default, deserialize_with = "lenient::opt_count", skip_serializing_if = "Option::is_none")]
    pub total_units: Option<u32>,
}

impl UnitType {
    pub fn new(id: impl Into<String>, name: impl Into<String>, supply_area: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supply_area,
            exclusive_area_m2: None,
            category: None,
            total_units: None,
        }
    }

    pub fn with_category(mut self, category: UnitCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_total_units(mut self, total: u32) -> Self {
        self.total_units = Some(total);
        self
    }

    pub fn is_rental(&self) -> bool {
        self.category == Some(UnitCategory::Rental)
    }
}

/// Buyer class of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberTier {
    /// Original members
    #[serde(rename = "1st")]
    First,
    /// Later members paying a premium over the base price
    #[serde(rename = "2nd")]
    Second,
    /// Open-market buyers
    #[serde(rename = "General")]
    General,
}

impl MemberTier {
    pub const ALL: [MemberTier; 3] = [MemberTier::First, MemberTier::Second, MemberTier::General];

    /// Whether the solver prices this tier.
    pub fn is_member(&self) -> bool {
        matches!(self, MemberTier::First | MemberTier::Second)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTier::First => "1st",
            MemberTier::Second => "2nd",
            MemberTier::General => "General",
        }
    }
}

impl fmt::Display for MemberTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units of one type assigned to one tier, with the tier's pricing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitAllocation {
    pub id: String,
    pub unit_type_id: String,
    pub tier: MemberTier,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u32,
    /// General and rental rate basis (won per pyung)
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub target_price_per_pyung: Option<f64>,
    /// 2nd-tier add-on over the solved price
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,
    /// Manual per-unit price that replaces whatever the solver computes
    #[serde(default, deserialize_with = "lenient::opt_number", skip_serializing_if = "Option::is_none")]
    pub fixed_total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl UnitAllocation {
    pub fn new(
        id: impl Into<String>,
        unit_type_id: impl Into<String>,
        tier: MemberTier,
        count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            unit_type_id: unit_type_id.into(),
            tier,
            count,
            target_price_per_pyung: None,
            premium: None,
            fixed_total_price: None,
            note: None,
        }
    }

    pub fn with_target_price(mut self, price_per_pyung: f64) -> Self {
        self.target_price_per_pyung = Some(price_per_pyung);
        self
    }

    pub fn with_premium(mut self, premium: f64) -> Self {
        self.premium = Some(premium);
        self
    }

    pub fn with_fixed_price(mut self, price: f64) -> Self {
        self.fixed_total_price = Some(price);
        self
    }

    /// The manual price override, if one is in effect.
    ///
    /// Zero counts as "not set": a cleared input field must fall back to the
    /// computed price.
    pub fn fixed_override(&self) -> Option<f64> {
        self.fixed_total_price
            .map(lenient::finite)
            .filter(|price| *price != 0.0)
    }
}

/// Flat add-on costs used by the simple-mode form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedCosts {
    #[serde(default, deserialize_with = "lenient::number")]
    pub operation_fee_per_unit: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub pm_service_fee_total: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub sunk_cost: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub contingency_rate: f64,
}

/// Rate assumptions used by the simple-mode form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCosts {
    #[serde(default, deserialize_with = "lenient::number")]
    pub land_price_per_pyung: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub const_cost_per_pyung: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub interest_rate_bridge: f64,
    #[serde(rename = "interestRatePF", default, deserialize_with = "lenient::number")]
    pub interest_rate_pf: f64,
}

/// The complete input snapshot. Replaced wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInputs {
    #[serde(default)]
    pub project_target: ProjectTarget,
    #[serde(default)]
    pub added_costs: AddedCosts,
    #[serde(default)]
    pub variable_costs: VariableCosts,
    #[serde(default)]
    pub is_advanced_mode: bool,
    #[serde(default)]
    pub advanced_categories: Vec<CostCategory>,
    #[serde(default)]
    pub unit_types: Vec<UnitType>,
    #[serde(default)]
    pub unit_allocations: Vec<UnitAllocation>,
    /// Initial payment already made by 1st-tier members (won per unit)
    #[serde(default, deserialize_with = "lenient::number")]
    pub initial_payment: f64,
}

impl AnalysisInputs {
    pub fn unit_type(&self, id: &str) -> Option<&UnitType> {
        self.unit_types.iter().find(|u| u.id == id)
    }

    pub fn allocation(&self, id: &str) -> Option<&UnitAllocation> {
        self.unit_allocations.iter().find(|a| a.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&CostCategory> {
        self.advanced_categories.iter().find(|c| c.id == id)
    }

    /// Strict lookups for callers that must report a bad id instead of
    /// silently ignoring it.
    pub fn require_unit_type(&self, id: &str) -> CoreResult<&UnitType> {
        self.unit_type(id)
            .ok_or_else(|| CoreError::UnitTypeNotFound(id.to_string()))
    }

    pub fn require_allocation(&self, id: &str) -> CoreResult<&UnitAllocation> {
        self.allocation(id)
            .ok_or_else(|| CoreError::AllocationNotFound(id.to_string()))
    }

    pub fn require_item(&self, category_id: &str, item_id: &str) -> CoreResult<&CostItem> {
        let category = self
            .category(category_id)
            .ok_or_else(|| CoreError::CategoryNotFound(category_id.to_string()))?;
        category
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound {
                category: category_id.to_string(),
                item: item_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cost_item_wire_shape() {
        let item = CostItem::new("l1", "Land", 100.0)
            .with_basis(CalculationBasis::ManualArea(12.5))
            .with_rate(80.0);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["calculationBasis"], "manual_pyeong");
        assert_eq!(value["manualArea"], 12.5);
        assert_eq!(value["applicationRate"], 80.0);
        assert!(value.get("mixConditions").is_none());

        let back: CostItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_unknown_and_legacy_basis_load_as_fixed() {
        let legacy: CostItem =
            serde_json::from_value(json!({"id": "a", "name": "x", "amount": 5, "calculationBasis": "per_pyung"}))
                .unwrap();
        assert_eq!(legacy.basis, CalculationBasis::Fixed);

        let unknown: CostItem =
            serde_json::from_value(json!({"id": "b", "calculationBasis": "per_parsec"})).unwrap();
        assert_eq!(unknown.basis, CalculationBasis::Fixed);
        assert_eq!(unknown.amount, 0.0);
    }

    #[test]
    fn test_sub_items_force_fixed_on_load() {
        let item: CostItem = serde_json::from_value(json!({
            "id": "c",
            "name": "Construction",
            "amount": 1,
            "calculationBasis": "per_floor_pyung",
            "subItems": [
                {"id": "s1", "name": "a", "amount": 10},
                {"id": "s2", "name": "b", "amount": "20"}
            ]
        }))
        .unwrap();
        assert_eq!(item.amount, 30.0);
        assert_eq!(item.basis, CalculationBasis::Fixed);
    }

    #[test]
    fn test_tier_and_category_names() {
        let alloc = UnitAllocation::new("a1", "u1", MemberTier::Second, 3);
        let value = serde_json::to_value(&alloc).unwrap();
        assert_eq!(value["tier"], "2nd");
        assert_eq!(value["unitTypeId"], "u1");

        let unit = UnitType::new("u9", "Rental 39", 15.0).with_category(UnitCategory::Rental);
        let value = serde_json::to_value(&unit).unwrap();
        assert_eq!(value["category"], "RENTAL");
        assert!(unit.is_rental());
    }

    #[test]
    fn test_fixed_override_ignores_zero() {
        let alloc = UnitAllocation::new("a", "u", MemberTier::First, 1).with_fixed_price(0.0);
        assert_eq!(alloc.fixed_override(), None);
        let alloc = alloc.with_fixed_price(5.0);
        assert_eq!(alloc.fixed_override(), Some(5.0));
    }

    #[test]
    fn test_strict_lookups_report_missing_ids() {
        let inputs = AnalysisInputs {
            advanced_categories: vec![CostCategory::new("land", "Land").with_item(CostItem::new("l1", "Buy", 1.0))],
            ..Default::default()
        };
        assert!(inputs.require_item("land", "l1").is_ok());
        assert!(matches!(
            inputs.require_item("land", "l9"),
            Err(CoreError::ItemNotFound { .. })
        ));
        assert!(matches!(inputs.require_item("x", "l1"), Err(CoreError::CategoryNotFound(_))));
        assert!(matches!(inputs.require_allocation("a1"), Err(CoreError::AllocationNotFound(_))));
        assert!(matches!(inputs.require_unit_type("u1"), Err(CoreError::UnitTypeNotFound(_))));
    }

    #[test]
    fn test_mix_conditions_decode_leniently() {
        let item: CostItem = serde_json::from_value(json!({
            "id": "m1",
            "name": "입주관리비",
            "calculationBasis": "mix_linked",
            "mixConditions": {"a1": null, "a2": "1000"}
        }))
        .unwrap();
        match item.basis {
            CalculationBasis::MixLinked(conditions) => {
                assert_eq!(conditions.get("a1"), Some(&0.0));
                assert_eq!(conditions.get("a2"), Some(&1_000.0));
            }
            other => panic!("unexpected basis {:?}", other),
        }
    }

    #[test]
    fn test_recommend_basis() {
        assert_eq!(BasisTag::recommend("토지매입비", None), BasisTag::PerSitePyung);
        assert_eq!(BasisTag::recommend("Misc", Some("land")), BasisTag::PerSitePyung);
        assert_eq!(BasisTag::recommend("설계비", Some("general")), BasisTag::PerFloorPyung);
        assert_eq!(BasisTag::recommend("Misc", Some("construction")), BasisTag::PerFloorPyung);
        assert_eq!(BasisTag::recommend("M/H 임차료", None), BasisTag::PerUnit);
        assert_eq!(BasisTag::recommend("Misc", Some("sales")), BasisTag::PerUnit);
        assert_eq!(BasisTag::recommend("법무사비용", Some("general")), BasisTag::Fixed);
        // land wording wins over a construction category
        assert_eq!(BasisTag::recommend("토지 정리", Some("construction")), BasisTag::PerSitePyung);
    }

    #[test]
    fn test_basis_labels() {
        assert_eq!(BasisTag::PerSitePyung.label(), "대지평당");
        assert_eq!(BasisTag::PerFloorPyung.label(), "연면적평당");
        assert_eq!(BasisTag::PerUnit.label(), "세대당");
        assert_eq!(BasisTag::MixLinked.label(), "평형연동");
        assert_eq!(BasisTag::Fixed.label(), "고정");
    }
}
