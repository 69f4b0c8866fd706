use chrono::NaiveDate;
use openstates_api::types::{Bill, Committee, Legislator, State};
use openstates_api::{Entity, Error, Record};
use serde_json::Value;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn load_record(name: &str) -> Record {
    match serde_json::from_str::<Value>(&load_fixture(name)).unwrap() {
        Value::Object(map) => map,
        _ => panic!("{} is not an object", name),
    }
}

#[tokio::test]
async fn hydrate_bill_fixture() {
    let bill = Bill::from_payload(load_record("bill.json"));

    assert_eq!(bill.state().await.unwrap().as_deref(), Some("ca"));
    assert_eq!(bill.session().await.unwrap().as_deref(), Some("20092010"));
    assert_eq!(bill.subjects().await.unwrap(), vec!["Education"]);
    assert!(bill.alternate_titles().await.unwrap().is_empty());
    assert_eq!(
        bill.created_at().await.unwrap(),
        NaiveDate::from_ymd_opt(2010, 7, 9)
            .unwrap()
            .and_hms_opt(21, 9, 33)
    );

    let sources = bill.sources().await.unwrap();
    assert_eq!(sources.len(), 1);
    assert!(sources[0].retrieved().await.unwrap().is_some());

    let votes = bill.votes().await.unwrap();
    assert_eq!(votes[0].yes_count().await.unwrap(), Some(2));
    assert_eq!(votes[0].no_count().await.unwrap(), Some(1));
    assert!(votes[0].other_votes().await.unwrap().is_empty());
    assert!(votes[0].sources().await.unwrap().is_empty());
    assert!(bill.validate().await.is_ok());
}

#[tokio::test]
async fn bill_summaries() {
    let bill = Bill::from_payload(load_record("bill.json"));
    assert_eq!(
        bill.summary().await.unwrap(),
        "AB 667: An act to amend Section 1 of the Education Code, relating to schools."
    );
    let actions = bill.actions().await.unwrap();
    assert_eq!(actions[0].summary().await.unwrap(), "lower: Read first time. To print.");
    let votes = bill.votes().await.unwrap();
    assert_eq!(
        votes[0].summary().await.unwrap(),
        "Vote on 'Do pass and be re-referred to Com. on APPR.'"
    );
    let yes = votes[0].yes_votes().await.unwrap();
    assert_eq!(yes[0].summary().await.unwrap(), "Block <CAL000104>");
    let sponsors = bill.sponsors().await.unwrap();
    assert_eq!(sponsors[1].summary().await.unwrap(), "Lowenthal");
}

#[tokio::test]
async fn hydrate_legislator_fixture() {
    let legislator = Legislator::from_payload(load_record("legislator.json"));
    assert_eq!(legislator.suffix().await.unwrap().as_deref(), Some("Jr."));
    assert_eq!(legislator.suffixes().await.unwrap(), None);
    assert_eq!(legislator.summary().await.unwrap(), "Eddie Lucio, Jr.");

    let roles = legislator.roles().await.unwrap();
    assert_eq!(roles[0].role().await.unwrap().as_deref(), Some("member"));
    assert_eq!(roles[1].role().await.unwrap().as_deref(), Some("vice chair"));
    assert_eq!(roles[1].kind().await.unwrap().as_deref(), Some("committee member"));
    assert_eq!(roles[0].summary().await.unwrap(), "tx upper 81 district 27");
    assert!(legislator.validate().await.is_ok());
}

#[tokio::test]
async fn bad_contact_info_fails_validation() {
    let mut record = load_record("legislator.json");
    record.insert(
        "roles".to_string(),
        serde_json::json!([{"contact_info": [{"phone": ["555-0100"]}]}]),
    );
    let legislator = Legislator::from_payload(record);
    assert!(matches!(
        legislator.validate().await,
        Err(Error::Format { field: "contact_info", .. })
    ));
}

#[tokio::test]
async fn hydrate_state_fixture() {
    let state = State::from_payload(load_record("state.json"));
    assert_eq!(state.upper_chamber_term().await.unwrap(), Some(serde_json::json!(4)));
    assert_eq!(state.lower_chamber_title().await.unwrap().as_deref(), Some("Assemblymember"));
    assert_eq!(state.terms().await.unwrap()[1].end_year().await.unwrap(), Some(2012));
    assert!(state.validate().await.is_ok());
    assert_eq!(state.summary().await.unwrap(), "California");
    assert_eq!(state.terms().await.unwrap()[0].summary().await.unwrap(), "20092010");
}

#[tokio::test]
async fn hydrate_committee_fixture() {
    let committee = Committee::from_payload(load_record("committee.json"));
    let members = committee.members().await.unwrap();
    assert_eq!(members[1].name().await.unwrap().as_deref(), Some("Walters"));
    assert_eq!(members[1].leg_id().await.unwrap(), None);
    assert_eq!(committee.parent_id().await.unwrap(), None);
}

#[tokio::test]
async fn missing_fields_are_unset() {
    let legislator = Legislator::from_payload(Record::new());
    assert_eq!(legislator.full_name().await.unwrap(), None);
    assert_eq!(legislator.created_at().await.unwrap(), None);
    assert!(legislator.roles().await.unwrap().is_empty());
    assert!(legislator.validate().await.is_ok());
}

#[tokio::test]
async fn wrong_scalar_type_fails_only_that_field() {
    let mut record = load_record("committee.json");
    record.insert("chamber".to_string(), serde_json::json!(["upper"]));
    let committee = Committee::from_payload(record);

    assert!(matches!(
        committee.chamber().await,
        Err(Error::Format { field: "chamber", .. })
    ));
    assert_eq!(committee.id().await.unwrap().as_deref(), Some("CAC000005"));
}
