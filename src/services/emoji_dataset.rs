use gloo_net::http::Request;

use crate::error::PickerError;
use crate::stores::emoji_store::EmojiDataset;

/// Fetch and parse the emoji dataset. One request, no retry.
pub async fn fetch_dataset(url: &str) -> Result<EmojiDataset, PickerError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| PickerError::Network(format!("{}: {}", url, e)))?;

    if !response.ok() {
        return Err(PickerError::Network(format!(
            "{} returned {} {}",
            url,
            response.status(),
            response.status_text()
        )));
    }

    let body = response.text().await?;
    let dataset = EmojiDataset::from_json(&body)?;
    log::info!(
        "Loaded {} emojis in {} categories",
        dataset.entry_count(),
        dataset.categories().len()
    );
    Ok(dataset)
}
