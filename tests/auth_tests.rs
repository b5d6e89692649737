mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, TEST_PHONE};

#[tokio::test]
async fn otp_login_flow_issues_a_working_token() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post(&format!("/api/auth/send-otp?phone={}", TEST_PHONE), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let otp = body["otp"].as_str().expect("otp in response").to_string();
    assert_eq!(otp.len(), 4);

    let (status, body) = app
        .post(
            &format!("/api/auth/verify-otp?phone={}&otp={}", TEST_PHONE, otp),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let token = body["token"].as_str().expect("token in response");

    let (status, _) = app
        .request(Method::GET, "/api/sales", None, Some(token))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn otp_is_consumed_on_successful_verification() {
    let app = TestApp::spawn().await;

    let (_, body) = app
        .post(&format!("/api/auth/send-otp?phone={}", TEST_PHONE), json!({}))
        .await;
    let otp = body["otp"].as_str().expect("otp").to_string();

    let (status, _) = app
        .post(
            &format!("/api/auth/verify-otp?phone={}&otp={}", TEST_PHONE, otp),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Replaying the same code must fail
    let (status, body) = app
        .post(
            &format!("/api/auth/verify-otp?phone={}&otp={}", TEST_PHONE, otp),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication error: Invalid OTP");
}

#[tokio::test]
async fn disallowed_phone_cannot_request_an_otp() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post("/api/auth/send-otp?phone=1112223333", json!({}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized: Phone number not allowed");
}

#[tokio::test]
async fn wrong_otp_is_rejected() {
    let app = TestApp::spawn().await;

    let (_, body) = app
        .post(&format!("/api/auth/send-otp?phone={}", TEST_PHONE), json!({}))
        .await;
    let otp = body["otp"].as_str().expect("otp");
    // Any 4-digit value other than the issued one
    let wrong = if otp == "1234" { "4321" } else { "1234" };

    let (status, body) = app
        .post(
            &format!("/api/auth/verify-otp?phone={}&otp={}", TEST_PHONE, wrong),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication error: Invalid OTP");
}

#[tokio::test]
async fn requesting_a_new_otp_invalidates_the_previous_one() {
    let app = TestApp::spawn().await;

    let (_, first) = app
        .post(&format!("/api/auth/send-otp?phone={}", TEST_PHONE), json!({}))
        .await;
    let first_otp = first["otp"].as_str().expect("otp").to_string();

    let (_, second) = app
        .post(&format!("/api/auth/send-otp?phone={}", TEST_PHONE), json!({}))
        .await;
    let second_otp = second["otp"].as_str().expect("otp").to_string();

    if first_otp != second_otp {
        let (status, _) = app
            .post(
                &format!("/api/auth/verify-otp?phone={}&otp={}", TEST_PHONE, first_otp),
                json!({}),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, _) = app
        .post(
            &format!(
                "/api/auth/verify-otp?phone={}&otp={}",
                TEST_PHONE, second_otp
            ),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
