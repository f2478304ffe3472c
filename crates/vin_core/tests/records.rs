use vin_core::{build_url, ExtractionResult, Query, Vin, VinError};

fn vin(raw: &str) -> Vin {
    Vin::parse(raw).unwrap()
}

#[test]
fn vin_parse_accepts_the_vin_alphabet() {
    let parsed = vin("1FA6P8CF5N5100001");
    assert_eq!(parsed.as_str(), "1FA6P8CF5N5100001");
    assert_eq!(parsed.to_string(), "1FA6P8CF5N5100001");
}

#[test]
fn vin_parse_rejects_wrong_length_and_characters() {
    assert_eq!(Vin::parse("1FA6P8CF5N510000"), Err(VinError::Length(16)));
    assert_eq!(Vin::parse("1FA6P8CF5N51000011"), Err(VinError::Length(18)));
    assert!(matches!(
        Vin::parse("1fa6p8cf5n5100001"),
        Err(VinError::Character { ch: 'f', position: 1 })
    ));
    assert!(matches!(
        Vin::parse("IFA6P8CF5N5100001"),
        Err(VinError::Character { ch: 'I', position: 0 })
    ));
}

#[test]
fn push_query_keeps_query_order_and_allows_cross_query_duplicates() {
    let mustang = Query::new("Mustang", "GT");
    let bronco = Query::new("Bronco", "Badlands");
    let mustang_url = build_url(&mustang.model, &mustang.trim);
    let bronco_url = build_url(&bronco.model, &bronco.trim);

    let mut result = ExtractionResult::new();
    assert!(result.is_empty());
    let added = result.push_query(
        &mustang,
        &mustang_url,
        &[vin("1FA6P8CF5N5100001"), vin("1FA6P8CF5N5100002")],
    );
    assert_eq!(added, 2);
    result.push_query(&bronco, &bronco_url, &[vin("1FA6P8CF5N5100001")]);
    result.push_query(&Query::new("Ranger", "XL"), &build_url("Ranger", "XL"), &[]);

    assert_eq!(result.len(), 3);
    let vins: Vec<_> = result.iter().map(|r| r.vin.as_str()).collect();
    assert_eq!(
        vins,
        vec!["1FA6P8CF5N5100001", "1FA6P8CF5N5100002", "1FA6P8CF5N5100001"]
    );
    assert_eq!(result.rows_for(&mustang).count(), 2);
    assert!(result
        .rows_for(&bronco)
        .all(|r| r.search_url == bronco_url));
}
