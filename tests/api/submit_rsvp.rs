use reqwest::StatusCode;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{email_body, Rsvp, TestApp, ADMIN_EMAIL, SPREADSHEET_ID};

async fn mount_email_ok(app: &TestApp) {
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;
}

async fn mount_sheets_ok(app: &TestApp) {
    Mock::given(path(format!(
        "/v4/spreadsheets/{}/values/A1:append",
        SPREADSHEET_ID
    )))
    .and(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .mount(&app.sheets_server)
    .await;
}

#[tokio::test]
async fn submit_returns_success_for_attending_guest() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    let res = app
        .submit_rsvp(&Rsvp::attending("Jane Doe", "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert_eq!("RSVP received successfully!", body["message"]);
}

#[tokio::test]
async fn submit_sends_guest_confirmation_and_admin_notice() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    app.submit_rsvp(&Rsvp::attending("Jane Doe", "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    let requests = TestApp::wait_for_requests(&app.email_server, 2).await;
    assert_eq!(2, requests.len());

    let mut recipients: Vec<String> = requests
        .iter()
        .map(|req| email_body(req)["To"].as_str().unwrap().to_string())
        .collect();
    recipients.sort();

    assert_eq!(vec!["jane@example.com".to_string(), ADMIN_EMAIL.to_string()], recipients);

    let mut tags: Vec<String> = requests
        .iter()
        .map(|req| email_body(req)["Tag"].as_str().unwrap().to_string())
        .collect();
    tags.sort();

    assert_eq!(vec!["rsvp-admin-notice", "rsvp-confirmation"], tags);
}

#[tokio::test]
async fn guest_confirmation_links_to_the_map() {
    let app = TestApp::spawn_without_sheets().await;
    mount_email_ok(&app).await;

    app.submit_rsvp(&Rsvp::attending("Jane Doe", "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    let requests = TestApp::wait_for_requests(&app.email_server, 2).await;
    let confirmation = requests
        .iter()
        .map(email_body)
        .find(|body| body["To"] == "jane@example.com")
        .expect("No guest confirmation was sent");

    let text = confirmation["TextBody"].as_str().unwrap();
    assert_eq!(app.event.map_link, extract_link(text));
}

#[tokio::test]
async fn attire_follows_gender() {
    let test_cases = vec![
        ("male", "Test Suit"),
        ("female", "Test Gown"),
        ("other", "Test Gown"),
    ];

    for (gender, attire) in test_cases {
        let app = TestApp::spawn_without_sheets().await;
        mount_email_ok(&app).await;

        app.submit_rsvp(&Rsvp::attending("Sam Doe", "sam@example.com", gender))
            .await
            .expect("Failed to execute request");

        let requests = TestApp::wait_for_requests(&app.email_server, 2).await;
        assert_eq!(2, requests.len());
        for request in &requests {
            let text = email_body(request)["TextBody"].as_str().unwrap().to_string();
            assert!(
                text.contains(attire),
                "Expected {} attire for gender {}",
                attire,
                gender
            );
        }
    }
}

#[tokio::test]
async fn submit_records_attending_guest_in_spreadsheet() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    app.submit_rsvp(&Rsvp::attending("Jane Doe", "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    let requests = TestApp::wait_for_requests(&app.sheets_server, 1).await;
    assert_eq!(1, requests.len());

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let row = body["values"][0].as_array().unwrap();
    assert_eq!("Jane Doe", row[0]);
    assert_eq!("jane@example.com", row[1]);
    assert_eq!("female", row[2]);
}

#[tokio::test]
async fn declined_rsvp_sends_nothing() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    let res = app
        .submit_rsvp(&Rsvp::declined())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(true, body["success"]);
    assert_eq!("RSVP received. Thank you for your response!", body["message"]);

    assert!(TestApp::settle(&app.email_server).await.is_empty());
    assert!(TestApp::settle(&app.sheets_server).await.is_empty());
}

#[tokio::test]
async fn submit_returns_bad_request_for_missing_data() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    let test_cases = vec![
        (
            "attending",
            Rsvp {
                full_name: Some("Jane Doe".into()),
                email: Some("jane@example.com".into()),
                gender: Some("female".into()),
                ..Default::default()
            },
        ),
        (
            "fullName",
            Rsvp {
                full_name: None,
                ..Rsvp::attending("", "jane@example.com", "female")
            },
        ),
        ("fullName", Rsvp::attending("", "jane@example.com", "female")),
        (
            "email",
            Rsvp {
                email: None,
                ..Rsvp::attending("Jane Doe", "", "female")
            },
        ),
        ("email", Rsvp::attending("Jane Doe", "", "female")),
        (
            "gender",
            Rsvp {
                gender: None,
                ..Rsvp::attending("Jane Doe", "jane@example.com", "")
            },
        ),
        ("gender", Rsvp::attending("Jane Doe", "jane@example.com", "")),
    ];

    for (field, rsvp) in test_cases {
        let res = app
            .submit_rsvp(&rsvp)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when {} was missing",
            field
        );

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(
            format!("Missing required field: {}", field),
            body["error"].as_str().unwrap()
        );
    }

    assert!(TestApp::settle(&app.email_server).await.is_empty());
    assert!(TestApp::settle(&app.sheets_server).await.is_empty());
}

#[tokio::test]
async fn submit_returns_bad_request_for_invalid_email() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;

    let res = app
        .submit_rsvp(&Rsvp::attending("Jane Doe", "not-an-email", "female"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("Invalid format for field: email", body["error"]);

    assert!(TestApp::settle(&app.email_server).await.is_empty());
}

#[tokio::test]
async fn submit_returns_bad_request_for_malformed_json() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;

    for raw in ["{\"attending\": \"yes\",", "", "not json", "[\"yes\"]"] {
        let res = app
            .submit_raw(raw)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail for body {:?}",
            raw
        );

        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!("Invalid request format", body["error"]);
    }

    assert!(TestApp::settle(&app.email_server).await.is_empty());
}

#[tokio::test]
async fn submit_returns_bad_request_for_wrong_content_type() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    let body = r#"{"attending":"yes","fullName":"Jane Doe","email":"jane@example.com","gender":"female"}"#;
    let res = app
        .submit_with_content_type("text/plain", body)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!("Invalid request format", body["error"]);

    assert!(TestApp::settle(&app.email_server).await.is_empty());
    assert!(TestApp::settle(&app.sheets_server).await.is_empty());
}

#[tokio::test]
async fn names_with_punctuation_are_accepted() {
    let app = TestApp::spawn_without_sheets().await;
    mount_email_ok(&app).await;

    let name = "Jane \"JJ\" Doe (Plus One)";
    let res = app
        .submit_rsvp(&Rsvp::attending(name, "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let requests = TestApp::wait_for_requests(&app.email_server, 2).await;
    assert_eq!(2, requests.len());

    let confirmation = requests
        .iter()
        .map(email_body)
        .find(|body| body["To"] == "jane@example.com")
        .expect("No guest confirmation was sent");
    assert!(confirmation["TextBody"].as_str().unwrap().contains(name));
}

#[tokio::test]
async fn submit_succeeds_even_if_every_side_effect_fails() {
    let app = TestApp::spawn().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.sheets_server)
        .await;

    let res = app
        .submit_rsvp(&Rsvp::attending("Jane Doe", "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    // Both sends are still attempted
    assert_eq!(2, TestApp::wait_for_requests(&app.email_server, 2).await.len());
}

#[tokio::test]
async fn submit_responds_before_slow_notifications_finish() {
    let app = TestApp::spawn_without_sheets().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(1)))
        .mount(&app.email_server)
        .await;

    let started = std::time::Instant::now();
    let res = app
        .submit_rsvp(&Rsvp::attending("Jane Doe", "jane@example.com", "female"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
}

#[tokio::test]
async fn repeated_submissions_are_not_deduplicated() {
    let app = TestApp::spawn().await;
    mount_email_ok(&app).await;
    mount_sheets_ok(&app).await;

    let rsvp = Rsvp::attending("Jane Doe", "jane@example.com", "female");
    for _ in 0..2 {
        let res = app
            .submit_rsvp(&rsvp)
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::OK, res.status());
    }

    assert_eq!(4, TestApp::wait_for_requests(&app.email_server, 4).await.len());
    assert_eq!(2, TestApp::wait_for_requests(&app.sheets_server, 2).await.len());
}

fn extract_link(body: &str) -> String {
    let links: Vec<_> = linkify::LinkFinder::new()
        .links(body)
        .filter(|l| *l.kind() == linkify::LinkKind::Url)
        .collect();
    assert_eq!(1, links.len());
    links[0].as_str().to_string()
}
