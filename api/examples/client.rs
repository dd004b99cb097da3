use reqwest::multipart::{Form, Part};
use reqwest::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: cargo run --example client -- <paper.pdf> [base_url]")?;
    let base_url = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
    let client = Client::new();

    println!("Journal Scout client");

    println!("\nHealth Check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;

    println!("Status: {}", health_response.status());
    let health_json: serde_json::Value = health_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&health_json)?);

    println!("\nUploading {}:", path);
    let bytes = tokio::fs::read(&path).await?;
    let filename = std::path::Path::new(&path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "paper.pdf".to_string());
    let form = Form::new().part(
        "file",
        Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/pdf")?,
    );

    let predict_response = client
        .post(format!("{}/predict", base_url))
        .multipart(form)
        .send()
        .await?;

    println!("Status: {}", predict_response.status());
    let predict_json: serde_json::Value = predict_response.json().await?;
    match predict_json.get("suggestions").and_then(|s| s.as_str()) {
        Some(suggestions) => println!("\n{}", suggestions),
        None => println!("Response: {}", serde_json::to_string_pretty(&predict_json)?),
    }

    Ok(())
}
