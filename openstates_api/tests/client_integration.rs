use std::time::Duration;

use chrono::NaiveDate;
use openstates_api::types::{Bill, Committee, Event, Legislator, State};
use openstates_api::{
    BillQuery, Client, CommitteeQuery, Entity, Error, EventQuery, FetchStatus, LegislatorQuery,
    Searchable,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn client(server: &MockServer) -> Client {
    Client::with_base_url(&format!("{}/api/v1/", server.uri()))
        .unwrap()
        .with_api_key("KEY")
}

#[tokio::test]
async fn get_bill_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/bills/ca/20092010/lower/AB667/"))
        .and(query_param("format", "json"))
        .and(query_param("apikey", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("bill.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let bill = Bill::get(&client, "ca", "20092010", "lower", "AB667").unwrap();
    assert_eq!(bill.fetch_status(), FetchStatus::Unfetched);

    assert_eq!(bill.bill_id().await.unwrap().as_deref(), Some("AB 667"));
    assert_eq!(bill.kind().await.unwrap(), vec!["bill"]);
    assert_eq!(
        bill.updated_at().await.unwrap(),
        NaiveDate::from_ymd_opt(2011, 3, 10)
            .unwrap()
            .and_hms_opt(10, 23, 34)
    );

    let sponsors = bill.sponsors().await.unwrap();
    assert_eq!(sponsors.len(), 2);
    assert_eq!(sponsors[0].name().await.unwrap().as_deref(), Some("Block"));
    assert_eq!(sponsors[1].name().await.unwrap().as_deref(), Some("Lowenthal"));
    assert_eq!(sponsors[1].kind().await.unwrap().as_deref(), Some("cosponsor"));
    assert_eq!(sponsors[0].fetch_status(), FetchStatus::Fetched);

    let actions = bill.actions().await.unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].kind().await.unwrap(), vec!["bill:introduced"]);

    let votes = bill.votes().await.unwrap();
    assert_eq!(votes[0].passed().await.unwrap(), Some(true));
    assert_eq!(votes[0].committee().await.unwrap(), None);
    assert_eq!(votes[0].yes_votes().await.unwrap().len(), 2);
    assert_eq!(votes[0].no_votes().await.unwrap()[0].leg_id().await.unwrap(), None);

    assert!(bill.documents().await.unwrap().is_empty());
    assert_eq!(bill.versions().await.unwrap()[0].name().await.unwrap().as_deref(), Some("AB667: Introduced"));
    assert!(bill.validate().await.is_ok());
}

#[tokio::test]
async fn get_state_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/metadata/ca/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("state.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let state = State::get(&client, "ca").unwrap();
    assert_eq!(state.name().await.unwrap().as_deref(), Some("California"));

    let terms = state.terms().await.unwrap();
    assert_eq!(terms.len(), 2);
    assert_eq!(terms[0].start_year().await.unwrap(), Some(2009));
    assert_eq!(
        terms[0].sessions().await.unwrap(),
        vec!["20092010", "20092010 Special Session 1"]
    );
}

#[tokio::test]
async fn legislator_search_issues_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/legislators/"))
        .and(query_param("last_name", "Alesi"))
        .and(query_param("apikey", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("legislators.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let query = LegislatorQuery::default().with_last_name("Alesi");
    let legislators = Legislator::search(&client, &query).await.unwrap();
    assert_eq!(legislators.len(), 1);

    let alesi = &legislators[0];
    assert_eq!(alesi.fetch_status(), FetchStatus::Fetched);
    assert!(alesi.source_url().is_none());
    assert_eq!(alesi.full_name().await.unwrap().as_deref(), Some("James S. Alesi"));
    assert_eq!(alesi.active().await.unwrap(), Some(true));

    let roles = alesi.roles().await.unwrap();
    assert_eq!(roles[0].kind().await.unwrap().as_deref(), Some("member"));
    assert_eq!(roles[0].start_date().await.unwrap(), None);
    let contact = roles[0].contact_info().await.unwrap();
    assert_eq!(contact[0]["phone"], "518-455-2015");
}

#[tokio::test]
async fn legislator_geo_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/legislators/geo/"))
        .and(query_param("lat", "35.79"))
        .and(query_param("long", "-78.78"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("geo.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let legislators = Legislator::geo(&client, 35.79, -78.78).await.unwrap();
    assert_eq!(legislators.len(), 2);
    assert_eq!(legislators[1].full_name().await.unwrap().as_deref(), Some("Deborah Ross"));
    assert_eq!(legislators[1].district().await.unwrap(), Some(serde_json::json!(38)));
}

#[tokio::test]
async fn bill_search_sends_repeated_states() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/bills/"))
        .and(query_param("q", "agriculture"))
        .and(query_param("state", "ca"))
        .and(query_param("state", "ny"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("bills.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let query = BillQuery::default()
        .with_query("agriculture")
        .with_states(&["ca", "ny"]);
    let bills = Bill::search(&client, &query).await.unwrap();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[1].state().await.unwrap().as_deref(), Some("ny"));
}

#[tokio::test]
async fn committee_get_reads_renamed_member_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/committees/CAC000005/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("committee.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let committee = Committee::get(&client, "CAC000005").unwrap();
    assert_eq!(committee.subcommittee().await.unwrap(), None);

    let members = committee.members().await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name().await.unwrap().as_deref(), Some("Kehoe"));
    assert_eq!(members[0].role().await.unwrap().as_deref(), Some("chair"));
}

#[tokio::test]
async fn committee_search_by_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/committees/"))
        .and(query_param("state", "ca"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("committees.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let committees = Committee::search(&client, &CommitteeQuery::default().with_state("ca"))
        .await
        .unwrap();
    assert_eq!(committees.len(), 2);
    assert_eq!(committees[0].committee().await.unwrap().as_deref(), Some("Agriculture"));
}

#[tokio::test]
async fn events_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/events/"))
        .and(query_param("state", "tx"))
        .and(query_param("type", "committee:meeting"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("events.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let query = EventQuery::default()
        .with_state("tx")
        .with_event_type("committee:meeting");
    let events = Event::search(&client, &query).await.unwrap();
    assert_eq!(events.len(), 1);

    let event = &events[0];
    assert_eq!(
        event.when().await.unwrap(),
        NaiveDate::from_ymd_opt(2011, 3, 14)
            .unwrap()
            .and_hms_opt(8, 0, 0)
    );
    assert_eq!(event.end().await.unwrap(), None);
    let participants = event.participants().await.unwrap();
    assert_eq!(participants[0].kind().await.unwrap().as_deref(), Some("host"));
}

#[tokio::test]
async fn server_error_is_sticky() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/legislators/TXL000139/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let legislator = Legislator::get(&client, "TXL000139").unwrap();

    let expected = Error::HttpStatus {
        status: 500,
        body: "Internal Server Error".to_string(),
    };
    assert_eq!(legislator.full_name().await.unwrap_err(), expected);
    assert_eq!(legislator.roles().await.unwrap_err(), expected);
    assert_eq!(legislator.fetch_status(), FetchStatus::Failed);
}

#[tokio::test]
async fn get_bill_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/bills/ca/20092010/lower/AB667/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let bill = Bill::get(&client, "ca", "20092010", "lower", "AB667").unwrap();
    assert!(matches!(bill.title().await, Err(Error::Parse(_))));
}

#[tokio::test]
async fn search_returning_object_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/committees/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("committee.json")))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let result = Committee::search(&client, &CommitteeQuery::default()).await;
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[tokio::test]
async fn empty_segment_never_reaches_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    assert!(matches!(
        Bill::get(&client, "ca", "", "lower", "AB667"),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(Legislator::get(&client, " "), Err(Error::Configuration(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_access_shares_one_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/committees/CAC000005/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("committee.json"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let committee = Committee::get(&client, "CAC000005").unwrap();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let committee = committee.clone();
        tasks.push(tokio::spawn(async move { committee.committee().await }));
    }
    for task in tasks {
        assert_eq!(
            task.await.unwrap().unwrap().as_deref(),
            Some("Appropriations")
        );
    }
}
