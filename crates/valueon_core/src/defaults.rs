//! The reference project every fresh session starts from.

use crate::model::{
    AddedCosts, AnalysisInputs, CostCategory, CostItem, MemberTier, ProjectTarget, UnitAllocation,
    UnitType, VariableCosts,
};

/// Initial payment already made by each 1st-tier member.
pub const DEFAULT_INITIAL_PAYMENT: f64 = 450_000_000.0;

fn category(id: &str, title: &str, items: &[(&str, &str, f64)]) -> CostCategory {
    items.iter().fold(CostCategory::new(id, title), |cat, (item_id, name, amount)| {
        cat.with_item(CostItem::new(*item_id, *name, *amount))
    })
}

/// Cost categories of the reference project (amounts in won, all fixed).
pub fn default_categories() -> Vec<CostCategory> {
    vec![
        category(
            "land",
            "토지비",
            &[
                ("l1", "토지매입비", 104_490_000_000.0),
                ("l2", "국유지 매입비", 4_716_000_000.0),
                ("l3", "취등록세 등", 5_023_476_000.0),
                ("l4", "법무사비용", 218_412_000.0),
                ("l5", "지주작업비", 1_638_090_000.0),
            ],
        ),
        category(
            "construction",
            "공사비",
            &[
                ("c1", "직접공사비", 80_556_000_000.0),
                ("c2", "철거/토목공사비", 4_000_000_000.0),
                ("c3", "인입공사비", 335_650_000.0),
                ("c4", "미술장식품", 277_835_000.0),
            ],
        ),
        category(
            "license",
            "인허가비",
            &[
                ("i1", "설계비", 1_074_080_000.0),
                ("i2", "감리비", 1_074_080_000.0),
                ("i3", "기타 용역비", 500_000_000.0),
                ("i4", "허가조건 이행공사비", 500_000_000.0),
            ],
        ),
        category(
            "contribution",
            "부담금",
            &[
                ("d1", "광역교통시설부담금", 2_424_453_000.0),
                ("d2", "학교용지분담금", 1_720_920_000.0),
                ("d3", "상하수도 분담금", 508_000_000.0),
            ],
        ),
        category(
            "sales",
            "판매비(분양)",
            &[
                ("s1", "M/H 임차료", 240_000_000.0),
                ("s2", "M/H 건립비", 900_000_000.0),
                ("s3", "운영관비", 240_000_000.0),
                ("s4", "광고선전비", 1_075_575_000.0),
                ("s5", "분양수수료", 3_810_000_000.0),
            ],
        ),
        category(
            "general",
            "일반관리비",
            &[
                ("g1", "신탁수수료", 1_075_575_000.0),
                ("g2", "조합/대행사 운영비", 900_000_000.0),
                ("g3", "시행사 운영비", 1_400_000_000.0),
                ("g4", "예비비", 1_075_575_000.0),
                ("g5", "입주관리비", 76_200_000.0),
            ],
        ),
        category(
            "finance",
            "금융비용",
            &[
                ("f1", "PF 수수료", 1_290_690_000.0),
                ("f2", "PF 이자", 12_338_892_000.0),
            ],
        ),
        category(
            "etc",
            "기타",
            &[
                ("e1", "민원처리비", 215_115_000.0),
                ("e2", "근저당설정비", 926_185_000.0),
            ],
        ),
    ]
}

pub fn default_unit_types() -> Vec<UnitType> {
    vec![
        UnitType::new("u1", "59 Type", 25.0),
        UnitType::new("u2", "84 Type", 34.0),
    ]
}

pub fn default_allocations() -> Vec<UnitAllocation> {
    vec![
        UnitAllocation::new("a1", "u1", MemberTier::First, 50),
        UnitAllocation::new("a2", "u2", MemberTier::First, 80),
        UnitAllocation::new("a3", "u1", MemberTier::Second, 30).with_premium(30_000_000.0),
        UnitAllocation::new("a4", "u2", MemberTier::Second, 44).with_premium(30_000_000.0),
        UnitAllocation::new("a5", "u1", MemberTier::General, 20).with_target_price(35_000_000.0),
        UnitAllocation::new("a6", "u2", MemberTier::General, 30).with_target_price(35_000_000.0),
    ]
}

/// The full default snapshot.
pub fn default_inputs() -> AnalysisInputs {
    AnalysisInputs {
        project_target: ProjectTarget {
            total_land_area: 3_876.0,
            total_floor_area: 13_426.0,
            total_households: 254.0,
            private_land_area: None,
            public_land_area: None,
        },
        added_costs: AddedCosts {
            operation_fee_per_unit: 15_000_000.0,
            pm_service_fee_total: 3_810_000_000.0,
            sunk_cost: 0.0,
            contingency_rate: 1.0,
        },
        variable_costs: VariableCosts {
            land_price_per_pyung: 30_000_000.0,
            const_cost_per_pyung: 6_000_000.0,
            interest_rate_bridge: 6.0,
            interest_rate_pf: 6.0,
        },
        is_advanced_mode: false,
        advanced_categories: default_categories(),
        unit_types: default_unit_types(),
        unit_allocations: default_allocations(),
        initial_payment: DEFAULT_INITIAL_PAYMENT,
    }
}
