use docmill_http::{DocMillClient, DocumentBuilder, FormField, Image, Paragraph, RetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_url = std::env::var("DOCMILL_API_URL")?;
    let token = std::env::var("DOCMILL_TOKEN")?;

    let docmill = DocMillClient::new_bearer(api_url, token)
        .with_retry(RetryConfig::default().with_max_retries(5));

    let logo = std::fs::read("logo.png")?;
    let asset = docmill.upload_asset("logo.png", logo).await?;
    println!(
        "uploaded {} as {} ({} bytes)",
        asset.name, asset.id, asset.byte_size
    );

    let signup = DocumentBuilder::new("Signup form")
        .part(Image::new(&asset.id, 120.0, 40.0))
        .part(Paragraph::new("Please sign below to complete your signup."))
        .part(FormField::signature("applicant"));

    let info = docmill.build(signup).await?;
    println!("built {}: {} page(s)", info.id, info.page_count);

    let stored = docmill.document(&info.id).await?;
    println!("server reports {} bytes", stored.byte_size);

    docmill.delete_document(&info.id).await?;
    println!("deleted {}", info.id);

    Ok(())
}
