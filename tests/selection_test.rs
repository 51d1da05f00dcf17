//! Tests for printer selection

use rstest::{fixture, rstest};

use bambusy::domain::{DomainError, Fleet, PrinterProfile, Selector};

fn profile(id: u32) -> PrinterProfile {
    PrinterProfile {
        id,
        name: format!("p{}", id),
        host: format!("10.0.0.{}", id),
        serial: format!("SER{}", id),
        access_code: "code".into(),
        port: 8883,
    }
}

#[fixture]
fn fleet() -> Fleet {
    Fleet::new(vec![profile(1), profile(2), profile(3)]).unwrap()
}

#[rstest]
#[case("all", vec![1, 2, 3])]
#[case("  ALL ", vec![1, 2, 3])]
#[case("3,1", vec![3, 1])]
#[case("2", vec![2])]
#[case("3,1,3,1", vec![3, 1])]
#[case(" 1 , 2 ", vec![1, 2])]
#[case("1,,2,", vec![1, 2])]
fn given_expression_when_resolving_then_selects_in_order(
    fleet: Fleet,
    #[case] expr: &str,
    #[case] expected: Vec<u32>,
) {
    let selection = Selector::parse(expr).unwrap().resolve(&fleet).unwrap();

    assert_eq!(selection.ids(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case(",,")]
fn given_empty_expression_when_parsing_then_empty_selection(#[case] expr: &str) {
    assert_eq!(Selector::parse(expr), Err(DomainError::EmptySelection));
}

#[rstest]
#[case("1,x", "x")]
#[case("-1", "-1")]
#[case("1;2", "1;2")]
fn given_garbage_when_parsing_then_invalid_id(#[case] expr: &str, #[case] bad: &str) {
    assert_eq!(
        Selector::parse(expr),
        Err(DomainError::InvalidPrinterId(bad.to_string()))
    );
}

#[rstest]
fn given_unknown_id_when_resolving_then_selection_error(fleet: Fleet) {
    let err = Selector::parse("99").unwrap().resolve(&fleet).unwrap_err();

    assert_eq!(err, DomainError::UnknownPrinters(vec![99]));
    assert!(err.is_selection());
}

#[rstest]
fn given_several_unknown_ids_when_resolving_then_reports_all_once(fleet: Fleet) {
    let err = Selector::parse("5,1,4,5").unwrap().resolve(&fleet).unwrap_err();

    assert_eq!(err, DomainError::UnknownPrinters(vec![5, 4]));
    assert_eq!(err.to_string(), "unknown printer id(s): 5, 4");
}

#[test]
fn given_empty_fleet_when_selecting_all_then_empty_selection() {
    let fleet = Fleet::new(vec![]).unwrap();

    let err = Selector::All.resolve(&fleet).unwrap_err();

    assert_eq!(err, DomainError::EmptySelection);
}

#[test]
fn given_duplicate_ids_when_building_fleet_then_rejects() {
    let err = Fleet::new(vec![profile(1), profile(2), profile(1)]).unwrap_err();

    assert_eq!(err, DomainError::DuplicatePrinterId(1));
}

#[test]
fn given_profile_then_request_topic_uses_serial() {
    assert_eq!(profile(4).request_topic(), "device/SER4/request");
}
