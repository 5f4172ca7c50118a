use geo_prejoin::columns::{
    ColumnRename, RENAME_RULES, RenameRule, apply_fuzzy_renames, label_index_column,
};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn equivalent_spellings_rename_to_average_price() {
    for spelling in ["Average Price", "AveragePrice", "average_price", "AVERAGE-PRICE"] {
        let mut cols = headers(&["District", spelling, "Months of Inventory"]);
        let applied = apply_fuzzy_renames(&mut cols, RENAME_RULES);
        assert_eq!(
            applied,
            vec![ColumnRename {
                from: spelling.to_string(),
                to: "TRREB Average Price".to_string(),
            }],
            "spelling {spelling:?}"
        );
        assert_eq!(
            cols,
            headers(&["District", "TRREB Average Price", "Months of Inventory"])
        );
    }
}

#[test]
fn first_candidate_in_rule_wins() {
    let mut cols = headers(&["District", "Total Dollar Volume", "Dollar Volume"]);
    let applied = apply_fuzzy_renames(&mut cols, RENAME_RULES);
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].from, "Dollar Volume");
    assert_eq!(
        cols,
        headers(&["District", "Total Dollar Volume", "TRREB Dollar Volume"])
    );
}

#[test]
fn all_rules_apply_in_one_pass() {
    let mut cols = headers(&["Area", "sales", "Avg. Price", "$ Volume", "New Listings"]);
    let applied = apply_fuzzy_renames(&mut cols, RENAME_RULES);
    assert_eq!(applied.len(), 3);
    assert_eq!(
        cols,
        headers(&[
            "Area",
            "TRREB Sales",
            "TRREB Average Price",
            "TRREB Dollar Volume",
            "New Listings",
        ])
    );
}

#[test]
fn rules_without_matches_are_skipped() {
    let mut cols = headers(&["District", "SNLR", "Active Listings"]);
    let applied = apply_fuzzy_renames(&mut cols, RENAME_RULES);
    assert!(applied.is_empty());
    assert_eq!(cols, headers(&["District", "SNLR", "Active Listings"]));
}

#[test]
fn custom_rules_are_honoured() {
    const RULES: &[RenameRule] = &[RenameRule {
        candidates: &["Median Price"],
        canonical: "Median",
    }];
    let mut cols = headers(&["median-price"]);
    apply_fuzzy_renames(&mut cols, RULES);
    assert_eq!(cols, headers(&["Median"]));
}

#[test]
fn blank_first_header_becomes_district_before_renames() {
    let mut cols = headers(&["  ", "Sales"]);
    let labelled = label_index_column(&mut cols).expect("labelled");
    assert_eq!(labelled.to, "District");
    apply_fuzzy_renames(&mut cols, RENAME_RULES);
    assert_eq!(cols, headers(&["District", "TRREB Sales"]));
}

#[test]
fn only_the_first_header_is_labelled() {
    let mut cols = headers(&["District", ""]);
    assert!(label_index_column(&mut cols).is_none());
    assert_eq!(cols, headers(&["District", ""]));
}
