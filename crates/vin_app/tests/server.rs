use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;
use vin_app::server::{router, AppState};
use vin_app::settings::Settings;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUNDARY: &str = "vin-harvester-test-boundary";

fn app(settings: &Settings) -> Router {
    vin_logging::initialize_for_tests();
    router(AppState::new(settings).expect("state builds"))
}

fn upload(csv: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"models.csv\"\r\n\
Content-Type: text/csv\r\n\r\n\
{csv}\r\n\
--{BOUNDARY}--\r\n"
    );
    Request::post("/extract")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn listing_page(vins: &[String]) -> String {
    let listings: Vec<String> = vins
        .iter()
        .map(|vin| format!(r#"{{"vin":"{vin}"}}"#))
        .collect();
    format!(
        r#"<html><body><script type="application/json">{{"listings":[{}]}}</script></body></html>"#,
        listings.join(",")
    )
}

#[tokio::test]
async fn index_shows_the_upload_form() {
    let response = app(&Settings::default()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"action="/extract""#));
    assert!(page.contains("30 VINs per model"));
}

#[tokio::test]
async fn download_before_any_run_is_not_found() {
    let response = app(&Settings::default())
        .oneshot(get("/download"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_without_required_columns_is_rejected() {
    let response = app(&Settings::default())
        .oneshot(upload("Model,Year\nMustang,2024\n"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = body_text(response).await;
    assert!(page.contains("CSV must contain &#39;Model&#39; and &#39;Trim&#39; columns"));
}

#[tokio::test]
async fn extraction_results_can_be_downloaded() {
    let server = MockServer::start().await;
    let listed: Vec<String> = (0..5).map(|i| format!("1FA6P8CF{i:09}")).collect();
    Mock::given(method("GET"))
        .and(path("/new-cars-for-sale/listings/ford/mustang/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(listing_page(&listed), "text/html"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new-cars-for-sale/listings/ford/mustang/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(listing_page(&[]), "text/html"))
        .mount(&server)
        .await;

    let settings = Settings {
        base_url: format!("{}/new-cars-for-sale/listings/ford", server.uri()),
        retry_delay_ms: 10,
        ..Settings::default()
    };
    let app = app(&settings);

    let response = app
        .clone()
        .oneshot(upload("Model,Trim\nMustang,GT"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("1 rows processed, 5 VINs extracted"));
    assert!(page.contains(&listed[0]));

    let response = app.oneshot(get("/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"extracted_vins.csv\""
    );
    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Model,Trim,VIN,TrueCar URL"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 5);
    assert!(rows[0].starts_with(&format!("Mustang,GT,{},", listed[0])));
}
