//! # valueon_core
//!
//! Feasibility engine for housing redevelopment projects.
//!
//! This crate turns an input snapshot (cost categories, unit types and their
//! tier allocations) into total project cost, per-unit prices and revenue.
//!
//! # Architecture
//!
//! - **Aggregator**: Resolves each cost item against its calculation basis and sums categories
//! - **Solver**: Finds the member base price per pyung that balances revenue with cost
//! - **Redistribute**: Keeps tier counts consistent with a unit type's total
//! - **State**: Pure snapshot updates driven by [`InputAction`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use valueon_core::{analyze, apply, default_inputs, InputAction};
//!
//! let inputs = apply(
//!     &default_inputs(),
//!     InputAction::SetAllocationCount { allocation_id: "a1".into(), count: 60 },
//! );
//! let result = analyze(&inputs);
//! println!("base price: {}", result.base_price_per_pyung);
//! ```

pub mod aggregator;
pub mod analysis;
pub mod currency;
pub mod defaults;
pub mod error;
pub mod lenient;
pub mod model;
pub mod reader;
pub mod redistribute;
pub mod solver;
pub mod state;
pub mod stats;
pub mod validator;

// Re-export main types for convenience
pub use aggregator::{aggregate, resolve_item_amount, CategoryTotal, CostSummary};
pub use analysis::{analyze, AnalysisResult, EstimatedPrices};
pub use currency::{format_korean_currency, parse_korean_money};
pub use defaults::{default_inputs, DEFAULT_INITIAL_PAYMENT};
pub use error::{CoreError, CoreResult};
pub use model::{
    AddedCosts, AnalysisInputs, BasisTag, CalculationBasis, CostCategory, CostItem, MemberTier,
    ProjectTarget, SiteArea, SubItem, UnitAllocation, UnitCategory, UnitType, VariableCosts,
};
pub use reader::{DocumentFormat, InputReader};
pub use redistribute::{link_count, redistribute_proportionally, rescale_allocations};
pub use solver::{solve, PricingOutcome, PricingResult};
pub use state::{apply, AllocationField, InputAction, SubItemField, TargetField};
pub use stats::{additional_contribution, tier_stats, RevenueGroup, TierStat};
pub use validator::{InputValidator, ValidationReport};
