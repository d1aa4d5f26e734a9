use anyhow::{Context, bail};
use bytes::Bytes;
use image_store::{ImageStore, config::Config};
use std::path::Path;

const USAGE: &str = "usage:
  image-store upload <path> <content-type>
  image-store update <key> <path> <content-type>
  image-store delete <key-or-url>
  image-store sign <key> [expiry-secs]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,image_store=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let config = Config::from_env()?;
    let store = ImageStore::from_config(&config);

    match args.as_slice() {
        ["upload", path, content_type] => {
            let (payload, filename) = read_payload(path).await?;
            let uploaded = store.upload_image(payload, &filename, content_type).await?;
            println!("{}", serde_json::to_string_pretty(&uploaded)?);
        }
        ["update", key, path, content_type] => {
            let (payload, filename) = read_payload(path).await?;
            let updated = store
                .update_image(key, payload, &filename, content_type)
                .await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        ["delete", key_or_url] => {
            store.delete_image(key_or_url).await?;
        }
        ["sign", key] => {
            println!("{}", store.signed_url_default(key).await?);
        }
        ["sign", key, expiry] => {
            let expiry_secs: u64 = expiry
                .parse()
                .with_context(|| format!("invalid expiry seconds: {}", expiry))?;
            println!("{}", store.signed_url(key, expiry_secs).await?);
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

async fn read_payload(path: &str) -> anyhow::Result<(Bytes, String)> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path))?;
    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string();
    Ok((Bytes::from(data), filename))
}
