use futures::StreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde::de::DeserializeOwned;

/// Fetch records ordered by creation time descending, optionally paginated.
/// Without a limit the whole collection is returned, which is what the
/// public listing wants.
pub async fn find_by_creation<T>(
    collection: &Collection<T>,
    filter: Document,
    limit: Option<i64>,
    page: Option<i64>,
) -> mongodb::error::Result<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut find = collection
        .find(filter)
        .sort(doc! { "created_at": -1 });

    if let Some(limit) = limit {
        find = find.limit(limit);

        if let Some(page) = page {
            let skip = limit * (page - 1).max(0);
            find = find.skip(skip as u64);
        }
    }

    let mut cursor = find.await?;
    let mut records = Vec::new();

    while let Some(result) = cursor.next().await {
        records.push(result?);
    }

    Ok(records)
}
