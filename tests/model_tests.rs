//! Serde-shape tests for the request payloads the frontend sends.

use renu_internship_server::docgen::{CandidateDetails, CertificateDetails};
use renu_internship_server::task::models::CreateTaskRequest;
use renu_internship_server::user::models::RegisterRequest;
use renu_internship_server::ErrorResponse;

#[test]
fn candidate_details_deserialize_from_frontend_payload() {
    let candidate: CandidateDetails = serde_json::from_str(
        r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "departmentName": "Web Development",
            "startDate": "2026-01-05",
            "endDate": "2026-04-05",
            "tenure": 3
        }"#,
    )
    .unwrap();

    assert_eq!(candidate.department_name, "Web Development");
    assert_eq!(candidate.tenure_months, 3);
}

#[test]
fn candidate_tenure_defaults_to_one_month() {
    let candidate: CandidateDetails = serde_json::from_str(
        r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "departmentName": "Web Development",
            "startDate": "2026-01-05",
            "endDate": "2026-04-05"
        }"#,
    )
    .unwrap();

    assert_eq!(candidate.tenure_months, 1);
}

#[test]
fn certificate_details_accept_both_department_spellings() {
    let short: CertificateDetails = serde_json::from_str(
        r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "department": "Web Development",
            "startDate": "2026-01-05",
            "endDate": "2026-04-05"
        }"#,
    )
    .unwrap();
    assert_eq!(short.department_name, "Web Development");

    let long: CertificateDetails = serde_json::from_str(
        r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "departmentName": "Design",
            "startDate": "2026-01-05",
            "endDate": "2026-04-05"
        }"#,
    )
    .unwrap();
    assert_eq!(long.department_name, "Design");
}

#[test]
fn register_request_uses_camel_case_field_names() {
    let request: RegisterRequest = serde_json::from_str(
        r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "password": "secret",
            "phoneNumber": "9876543210",
            "college": "Example College",
            "city": "Gurugram",
            "state": "Haryana",
            "departmentName": "Web Development",
            "startDate": "2026-01-05",
            "endDate": "2026-04-05"
        }"#,
    )
    .unwrap();

    assert_eq!(request.phone_number, "9876543210");
    assert_eq!(request.department_name, "Web Development");
}

#[test]
fn task_plans_deserialize_with_nested_items() {
    let request: CreateTaskRequest = serde_json::from_str(
        r#"{
            "mainTitle": "Web Development",
            "overview": "Frontend track",
            "departmentName": "Web Development",
            "weeklyPlans": [
                {
                    "weekNumber": 1,
                    "weekTitle": "HTML and CSS",
                    "taskList": [
                        {
                            "taskTitle": "Build a landing page",
                            "attributes": [{"label": "difficulty", "taskDescription": "easy"}]
                        }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(request.weekly_plans.len(), 1);
    assert_eq!(request.weekly_plans[0].week_number, 1);
    assert_eq!(request.weekly_plans[0].task_list[0].attributes.len(), 1);
}

#[test]
fn error_response_carries_kind_message_and_timestamp() {
    let response = ErrorResponse::not_found("Submission not found.");
    assert_eq!(response.error, "NotFound");
    assert_eq!(response.message, "Submission not found.");
    assert!(!response.timestamp.is_empty());

    let bad = ErrorResponse::bad_request("week number must be at least 1");
    assert_eq!(bad.error, "BadRequest");
}
