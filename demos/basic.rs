use docmill_http::{DocMillClient, DocumentBuilder, Paragraph};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_url = std::env::var("DOCMILL_API_URL")?;
    let token = std::env::var("DOCMILL_TOKEN")?;

    let docmill = DocMillClient::new_bearer(api_url, token);

    let info = docmill
        .build(
            DocumentBuilder::new("Hello")
                .part(Paragraph::new("Hello from docmill-http.").font_size(14.0)),
        )
        .await?;
    println!(
        "built {}: {} page(s), {} bytes",
        info.id, info.page_count, info.byte_size
    );

    let pdf = docmill.download(&info.id).await?;
    std::fs::write("hello.pdf", &pdf)?;
    println!("saved hello.pdf ({} bytes)", pdf.len());

    Ok(())
}
