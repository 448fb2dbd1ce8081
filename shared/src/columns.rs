//! Line-item catalogue for the statement input table.
//!
//! Every input column has a canonical snake_case name. The workbook the data
//! usually comes from is laid out with Japanese captions, so each canonical
//! name also carries the caption accepted as a header alias.

/// A named list of line items that are summed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGroup {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const YEAR: &str = "year";

// Standalone line items read directly by the stages.
pub const REVENUE: &str = "revenue";
pub const HEADCOUNT: &str = "headcount";
pub const CASH_AND_DEPOSITS: &str = "cash_and_deposits";
pub const RECEIVABLES: &str = "notes_and_accounts_receivable";
pub const INVENTORY: &str = "inventory";
pub const PAYABLES: &str = "notes_and_accounts_payable";
pub const VALUE_ADDED: &str = "value_added";
pub const PERSONNEL_COST: &str = "personnel_cost";
pub const PROCESSING_VALUE: &str = "processing_value";
pub const DEPRECIATION: &str = "depreciation";
pub const DEPRECIATION_SGA: &str = "depreciation_sga";

// Offsets subtracted from a group total; treated as zero when absent.
pub const DEPRECIATION_OFFSET: &str = "accumulated_depreciation";
pub const TREASURY_OFFSET: &str = "treasury_stock";

pub const CURRENT_ASSETS: ColumnGroup = ColumnGroup {
    name: "current_assets",
    columns: &[CASH_AND_DEPOSITS, RECEIVABLES, INVENTORY, "other_current_assets"],
};

pub const FIXED_ASSETS: ColumnGroup = ColumnGroup {
    name: "fixed_assets",
    columns: &[
        "buildings",
        "machinery_and_equipment",
        "land",
        "intangible_assets",
        "investments_and_other_assets",
    ],
};

pub const CURRENT_LIABILITIES: ColumnGroup = ColumnGroup {
    name: "current_liabilities",
    columns: &[PAYABLES, "short_term_borrowings", "other_current_liabilities"],
};

pub const FIXED_LIABILITIES: ColumnGroup = ColumnGroup {
    name: "fixed_liabilities",
    columns: &["long_term_borrowings", "bonds_payable", "other_fixed_liabilities"],
};

pub const EQUITY: ColumnGroup = ColumnGroup {
    name: "equity",
    columns: &["capital_stock", "capital_surplus", "retained_earnings"],
};

pub const COGS: ColumnGroup = ColumnGroup {
    name: "cogs",
    columns: &[
        "material_cost",
        "manufacturing_labor_cost",
        "manufacturing_overhead",
        DEPRECIATION,
    ],
};

pub const SGA: ColumnGroup = ColumnGroup {
    name: "sga",
    columns: &[
        "sales_personnel_cost",
        "advertising",
        "rent",
        DEPRECIATION_SGA,
        "other_sga",
    ],
};

pub const BORROWINGS: ColumnGroup = ColumnGroup {
    name: "borrowings",
    columns: &["short_term_borrowings", "long_term_borrowings", "bonds_payable"],
};

pub const GROUPS: &[ColumnGroup] = &[
    CURRENT_ASSETS,
    FIXED_ASSETS,
    CURRENT_LIABILITIES,
    FIXED_LIABILITIES,
    EQUITY,
    COGS,
    SGA,
    BORROWINGS,
];

const STANDALONE: &[&str] = &[
    DEPRECIATION_OFFSET,
    TREASURY_OFFSET,
    REVENUE,
    HEADCOUNT,
    VALUE_ADDED,
    PERSONNEL_COST,
    PROCESSING_VALUE,
];

// (canonical name, workbook caption)
const CAPTIONS: &[(&str, &str)] = &[
    (YEAR, "年度"),
    (CASH_AND_DEPOSITS, "現金・預金"),
    (RECEIVABLES, "受取手形・売掛金"),
    (INVENTORY, "棚卸資産"),
    ("other_current_assets", "その他流動資産"),
    ("buildings", "建物"),
    ("machinery_and_equipment", "機械装置"),
    ("land", "土地"),
    ("intangible_assets", "無形固定資産"),
    ("investments_and_other_assets", "投資その他の資産"),
    (DEPRECIATION_OFFSET, "減価償却累計額"),
    (PAYABLES, "支払手形・買掛金"),
    ("short_term_borrowings", "短期借入金"),
    ("other_current_liabilities", "その他流動負債"),
    ("long_term_borrowings", "長期借入金"),
    ("bonds_payable", "社債"),
    ("other_fixed_liabilities", "その他固定負債"),
    ("capital_stock", "資本金"),
    ("capital_surplus", "資本剰余金"),
    ("retained_earnings", "利益剰余金"),
    (TREASURY_OFFSET, "自己株式"),
    ("material_cost", "材料費"),
    ("manufacturing_labor_cost", "労務費"),
    ("manufacturing_overhead", "製造経費"),
    (DEPRECIATION, "減価償却費"),
    ("sales_personnel_cost", "販売員給与"),
    ("advertising", "広告宣伝費"),
    ("rent", "地代家賃"),
    (DEPRECIATION_SGA, "減価償却費_販管"),
    ("other_sga", "その他販管費"),
    (REVENUE, "売上高"),
    (HEADCOUNT, "従業員数"),
    (VALUE_ADDED, "付加価値"),
    (PERSONNEL_COST, "人件費"),
    (PROCESSING_VALUE, "加工高"),
];

/// Every line item the input table must carry, in catalogue order and
/// without duplicates (borrowings overlap the liability groups).
pub fn all_required_columns() -> Vec<&'static str> {
    let mut required: Vec<&'static str> = Vec::new();
    let grouped = GROUPS.iter().flat_map(|g| g.columns.iter().copied());
    for name in grouped.chain(STANDALONE.iter().copied()) {
        if !required.contains(&name) {
            required.push(name);
        }
    }
    required
}

/// Maps a header cell to its canonical column name. Accepts either the
/// canonical name itself or the workbook caption; surrounding whitespace is
/// ignored. Unknown headers yield `None`.
pub fn canonical_name(header: &str) -> Option<&'static str> {
    let header = header.trim();
    CAPTIONS
        .iter()
        .find(|(canonical, caption)| *canonical == header || *caption == header)
        .map(|(canonical, _)| *canonical)
}

/// Workbook caption for a canonical column name.
pub fn caption(name: &str) -> Option<&'static str> {
    CAPTIONS
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(_, caption)| *caption)
}
