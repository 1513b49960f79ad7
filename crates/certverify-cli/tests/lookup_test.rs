//! Exit codes and export side effects of `certverify lookup`, against a
//! wiremock verification service.

use certverify_cli::api::ApiArgs;
use certverify_cli::lookup::{run_lookup, LookupArgs};
use certverify_cli::EXIT_LOOKUP_FAILED;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn args(server: &MockServer, cert: &str, export: Option<&std::path::Path>) -> LookupArgs {
    LookupArgs {
        certificate_number: cert.into(),
        api: ApiArgs {
            api_url: Some(server.uri()),
        },
        export: export.map(|p| p.to_path_buf()),
        prefix: "VLGE".into(),
    }
}

async fn mount_kumar(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/verify/VLG2024001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "certificateNumber": "VLG2024001",
            "studentName": "A. Kumar",
            "registrationNumber": "REG-2024-17",
            "college": "Government Arts College",
            "dateOfJoining": "01-06-2024",
            "dateOfIssue": "31-07-2024",
            "domain": "Full Stack Development",
            "status": "Verified",
            "grade": "A+"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn found_exits_zero_and_exports() {
    let server = MockServer::start().await;
    mount_kumar(&server).await;
    let dir = tempfile::tempdir().unwrap();

    let code = run_lookup(&args(&server, "vlg2024001", Some(dir.path())))
        .await
        .unwrap();
    assert_eq!(code, 0);

    let report = dir.path().join("VLGE_VLG2024001_Verification_Report.pdf");
    let bytes = std::fs::read(report).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn not_found_exits_two_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/verify/VLG2024999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let code = run_lookup(&args(&server, "VLG2024999", Some(dir.path())))
        .await
        .unwrap();
    assert_eq!(code, EXIT_LOOKUP_FAILED);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn server_error_also_exits_two() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let code = run_lookup(&args(&server, "VLG2024001", None)).await.unwrap();
    assert_eq!(code, EXIT_LOOKUP_FAILED);
}

#[tokio::test]
async fn blank_input_is_an_error_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run_lookup(&args(&server, "   ", None)).await.unwrap_err();
    assert_eq!(err.to_string(), "Please enter a certificate number");
}
