//! Store-backed article repository
//!
//! Articles live in the `articles` table keyed by id, with `authorId` and
//! `category` lookups.

use std::sync::Arc;

use uuid::Uuid;

use super::article::{Article, Category};
use crate::store::{decode, encode, Store, StoreResult, Table};

/// Filter for public article listings
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub category: Option<Category>,
    pub author_id: Option<Uuid>,
    pub limit: Option<usize>,
}

#[derive(Clone)]
pub struct ArticleRepository {
    store: Arc<dyn Store>,
}

impl ArticleRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn find(&self, id: Uuid) -> StoreResult<Option<Article>> {
        let key = id.to_string();
        match self.store.get(Table::Articles, &key).await? {
            Some(doc) => decode(Table::Articles, &key, doc).map(Some),
            None => Ok(None),
        }
    }

    pub async fn save(&self, article: &Article) -> StoreResult<()> {
        let key = article.id.to_string();
        let doc = encode(Table::Articles, &key, article)?;
        self.store.put(Table::Articles, &key, doc).await
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        self.store.delete(Table::Articles, &id.to_string()).await
    }

    /// Every article, newest first
    pub async fn list_all(&self) -> StoreResult<Vec<Article>> {
        let docs = self.store.scan(Table::Articles).await?;
        Ok(newest_first(decode_all(docs)?))
    }

    /// Every article by one author, newest first
    pub async fn by_author(&self, author_id: Uuid) -> StoreResult<Vec<Article>> {
        let docs = self
            .store
            .query_index(Table::Articles, "authorId", &author_id.to_string())
            .await?;
        Ok(newest_first(decode_all(docs)?))
    }

    /// Published, visible articles matching the filter, newest first
    pub async fn list_public(&self, filter: &ArticleFilter) -> StoreResult<Vec<Article>> {
        let docs = match (filter.category, filter.author_id) {
            (Some(category), _) => {
                self.store
                    .query_index(Table::Articles, "category", category.as_str())
                    .await?
            }
            (None, Some(author_id)) => {
                self.store
                    .query_index(Table::Articles, "authorId", &author_id.to_string())
                    .await?
            }
            (None, None) => self.store.scan(Table::Articles).await?,
        };

        let mut articles: Vec<_> = decode_all(docs)?
            .into_iter()
            .filter(|a| a.is_public())
            .filter(|a| filter.author_id.map_or(true, |id| a.author_id == id))
            .collect();
        articles = newest_first(articles);

        if let Some(limit) = filter.limit {
            articles.truncate(limit);
        }
        Ok(articles)
    }

    /// Delete every article by one author, returning how many were removed
    pub async fn delete_by_author(&self, author_id: Uuid) -> StoreResult<usize> {
        let mut removed = 0;
        for article in self.by_author(author_id).await? {
            if self.delete(article.id).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn decode_all(docs: Vec<serde_json::Value>) -> StoreResult<Vec<Article>> {
    docs.into_iter()
        .map(|doc| {
            let key = doc
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or("?")
                .to_string();
            decode(Table::Articles, &key, doc)
        })
        .collect()
}

fn newest_first(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    articles
}
