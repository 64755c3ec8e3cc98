//! Tests for the built-in tools against mock backends.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nauvoo::tools::builtin::{image_tool, validate_user_tool, weather_tool};
use nauvoo::tools::{ToolArguments, ToolContext};

#[tokio::test]
async fn weather_tool_returns_body_json_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("q", "Houston TX"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": { "name": "Houston" },
            "current": { "temp_c": 31.0 }
        })))
        .mount(&server)
        .await;

    let tool = weather_tool(server.uri(), "test-key");
    let args = ToolArguments::new(json!({"location": "Houston TX"}));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    let text = result.as_str().unwrap();
    assert!(text.contains("Houston"));
    assert!(text.contains("temp_c"));
}

#[tokio::test]
async fn weather_tool_soft_fails_on_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let tool = weather_tool(server.uri(), "bad-key");
    let args = ToolArguments::new(json!({"location": "Houston TX"}));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    assert!(result.as_str().unwrap().contains("status 403"));
}

#[tokio::test]
async fn weather_tool_asks_for_a_location_when_empty() {
    let tool = weather_tool("http://unused.invalid", "key");
    let args = ToolArguments::new(json!({"location": ""}));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    assert!(result.as_str().unwrap().contains("provide a location"));
}

#[tokio::test]
async fn image_tool_downloads_generated_image_to_disk() {
    let server = MockServer::start().await;
    let image_bytes: &[u8] = &[0x89, b'P', b'N', b'G'];

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": format!("{}/generated.png", server.uri()) }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/generated.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = image_tool(server.uri(), dir.path().to_path_buf());
    let args = ToolArguments::new(json!({"image_description": "a lighthouse at dusk"}));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    let saved_path = result.as_str().unwrap();
    assert!(saved_path.ends_with(".png"));
    let saved = std::fs::read(saved_path).unwrap();
    assert_eq!(saved, image_bytes);
}

#[tokio::test]
async fn image_tool_reports_missing_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = image_tool(server.uri(), dir.path().to_path_buf());
    let args = ToolArguments::new(json!({"image_description": "anything"}));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    assert_eq!(result.as_str().unwrap(), "No image URL returned from API.");
}

#[tokio::test]
async fn image_tool_reports_failed_download() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "url": format!("{}/gone.png", server.uri()) }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = image_tool(server.uri(), dir.path().to_path_buf());
    let args = ToolArguments::new(json!({"image_description": "anything"}));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    assert_eq!(
        result.as_str().unwrap(),
        "Could not download image from URL."
    );
}

#[tokio::test]
async fn validate_user_returns_fixed_result() {
    let tool = validate_user_tool();
    let args = ToolArguments::new(json!({
        "user_id": 123,
        "addresses": ["123 Fake St, Boston MA", "234 Pretend Boulevard, Houston TX"],
    }));
    let result = tool.execute(&args, &ToolContext::default()).await.unwrap();

    assert_eq!(result["valid"], true);
}

#[tokio::test]
async fn validate_user_rejects_missing_arguments() {
    let tool = validate_user_tool();
    let args = ToolArguments::new(json!({"user_id": 123}));

    assert!(tool.execute(&args, &ToolContext::default()).await.is_err());
}
