//! Built-in tools: weather lookup, image generation, user validation.
//!
//! Backend failures (unreachable host, non-success status, missing URL) are
//! reported as descriptive result text so the model can read the failure and
//! decide how to respond; only argument access faults surface as errors.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::provider::http::shared_client;
use crate::tools::registry::ToolRegistry;
use crate::tools::tool::{FunctionTool, Tool, ToolContext};
use crate::tools::types::ToolParameters;

/// Registry with all built-in tools, wired from config.
pub fn default_registry(config: &Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(weather_tool(
        &config.weather_endpoint,
        config.weather_api_key.clone().unwrap_or_default(),
    ));
    if let Some(ref endpoint) = config.image_endpoint {
        registry.register(image_tool(endpoint, config.image_output_dir.clone()));
    }
    registry.register(validate_user_tool());
    registry
}

/// Create the `get_weather` tool — current conditions for a location.
///
/// Issues a GET against `<endpoint>/current.json` with the configured API
/// key and returns the raw JSON body as a string.
pub fn weather_tool(endpoint: impl Into<String>, api_key: impl Into<String>) -> Arc<dyn Tool> {
    let endpoint = endpoint.into();
    let api_key = api_key.into();
    Arc::new(FunctionTool::new(
        "get_weather",
        "Get the current weather for a specified location",
        ToolParameters::object()
            .string(
                "location",
                "Must be a valid location in city format.",
                true,
            )
            .build(),
        move |args, _ctx: ToolContext| {
            let endpoint = endpoint.clone();
            let api_key = api_key.clone();
            async move {
                let location = args.get_str("location")?;
                if location.is_empty() {
                    return Ok(serde_json::json!(
                        "Please provide a location and call get_weather again."
                    ));
                }

                debug!(location, "weather lookup");

                let url = format!("{}/current.json", endpoint.trim_end_matches('/'));
                let response = shared_client()
                    .get(&url)
                    .query(&[
                        ("key", api_key.as_str()),
                        ("q", location),
                        ("aqi", "no"),
                        ("alerts", "no"),
                    ])
                    .send()
                    .await;

                let response = match response {
                    Ok(r) => r,
                    Err(e) => {
                        return Ok(serde_json::json!(format!(
                            "Weather lookup failed: {e}"
                        )))
                    }
                };

                let status = response.status().as_u16();
                if status != 200 {
                    return Ok(serde_json::json!(format!(
                        "Weather lookup failed with status {status}."
                    )));
                }

                match response.json::<serde_json::Value>().await {
                    Ok(body) => Ok(serde_json::json!(body.to_string())),
                    Err(e) => Ok(serde_json::json!(format!(
                        "Weather lookup returned unreadable data: {e}"
                    ))),
                }
            }
        },
    ))
}

/// Create the `generate_image` tool — generate an image and save it locally.
///
/// Posts the description to an images endpoint, downloads the returned URL,
/// and writes the bytes to `<output_dir>/<uuid>.png`, returning the path.
pub fn image_tool(endpoint: impl Into<String>, output_dir: PathBuf) -> Arc<dyn Tool> {
    let endpoint = endpoint.into();
    Arc::new(FunctionTool::new(
        "generate_image",
        "Generate an image based on a detailed description",
        ToolParameters::object()
            .string(
                "image_description",
                "A detailed description of the desired image.",
                true,
            )
            .build(),
        move |args, _ctx: ToolContext| {
            let endpoint = endpoint.clone();
            let output_dir = output_dir.clone();
            async move {
                let description = args.get_str("image_description")?;

                debug!(description, "image generation");

                let body = serde_json::json!({
                    "prompt": description,
                    "size": "1024x1024",
                    "n": 1,
                });
                let url = format!("{}/images/generations", endpoint.trim_end_matches('/'));
                let response = match shared_client().post(&url).json(&body).send().await {
                    Ok(r) => r,
                    Err(e) => {
                        return Ok(serde_json::json!(format!(
                            "Image generation failed: {e}"
                        )))
                    }
                };

                let status = response.status().as_u16();
                if status != 200 {
                    return Ok(serde_json::json!(format!(
                        "Image generation failed with status {status}."
                    )));
                }

                let data: serde_json::Value = match response.json().await {
                    Ok(v) => v,
                    Err(e) => {
                        return Ok(serde_json::json!(format!(
                            "Image generation returned unreadable data: {e}"
                        )))
                    }
                };
                let image_url = data
                    .get("data")
                    .and_then(|d| d.get(0))
                    .and_then(|entry| entry.get("url"))
                    .and_then(|u| u.as_str());

                Ok(serde_json::json!(
                    download_image(image_url, &output_dir).await
                ))
            }
        },
    ))
}

/// Download a generated image to disk, returning the saved path or a
/// descriptive failure message.
async fn download_image(image_url: Option<&str>, output_dir: &PathBuf) -> String {
    let Some(image_url) = image_url else {
        return "No image URL returned from API.".to_string();
    };

    let response = match shared_client().get(image_url).send().await {
        Ok(r) => r,
        Err(_) => return "Could not download image from URL.".to_string(),
    };
    if response.status().as_u16() != 200 {
        return "Could not download image from URL.".to_string();
    }
    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(_) => return "Could not download image from URL.".to_string(),
    };

    let path = output_dir.join(format!("{}.png", Uuid::new_v4()));
    if tokio::fs::create_dir_all(output_dir).await.is_err() {
        return "Could not create the image output directory.".to_string();
    }
    match tokio::fs::write(&path, &bytes).await {
        Ok(()) => path.display().to_string(),
        Err(_) => "Could not write the downloaded image to disk.".to_string(),
    }
}

/// Create the `validate_user` tool — validation stub returning a fixed
/// result once the arguments parse.
pub fn validate_user_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "validate_user",
        "Validate a user using historical addresses",
        ToolParameters::object()
            .number("user_id", "The user ID.", true)
            .array(
                "addresses",
                "Previous addresses as a list of strings.",
                "string",
                true,
            )
            .build(),
        |args, _ctx: ToolContext| async move {
            let user_id = args.get_i64("user_id")?;
            let addresses = args.get_array("addresses")?;

            debug!(user_id, addresses = addresses.len(), "validate user");

            Ok(serde_json::json!({ "valid": true }))
        },
    ))
}
