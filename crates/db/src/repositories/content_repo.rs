//! Repository for the `contents` table.

use glocal_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::content::{
    ContentFilter, ContentItem, ContentPage, ContentQuery, CreateContent, UpdateContent,
};

/// Column list shared across queries to avoid repetition. Content columns
/// come from `c`, the author summary from the joined `users u`.
const COLUMNS: &str = "c.id, c.title, c.description, c.body, c.status, c.content_type, \
                       c.language, c.locale, c.tags, c.author_id, c.metadata, c.version, \
                       c.published_at, c.created_at, c.updated_at, \
                       u.first_name AS author_first_name, u.last_name AS author_last_name, \
                       u.email AS author_email";

/// Join from a `contents` relation aliased `c` to its author.
const JOIN_AUTHOR: &str = "JOIN users u ON u.id = c.author_id";

/// Provides CRUD and listing operations for content items.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new content item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateContent) -> Result<ContentItem, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO contents
                    (title, description, body, status, content_type, language, locale,
                     tags, author_id, metadata, published_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
             )
             SELECT {COLUMNS} FROM c {JOIN_AUTHOR}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.body)
            .bind(input.status.as_str())
            .bind(input.content_type.as_str())
            .bind(&input.language)
            .bind(&input.locale)
            .bind(&input.tags)
            .bind(input.author_id)
            .bind(&input.metadata)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }

    /// Find a content item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contents c {JOIN_AUTHOR} WHERE c.id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Filtered, sorted, paginated listing.
    ///
    /// `total` counts every row matching the filter, independent of the
    /// requested page, so a page past the end yields no items but the
    /// correct total.
    pub async fn list(pool: &PgPool, query: &ContentQuery) -> Result<ContentPage, sqlx::Error> {
        let mut count = count_builder(&query.filter);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        let mut select = list_builder(query);
        let items = select
            .build_query_as::<ContentItem>()
            .fetch_all(pool)
            .await?;

        Ok(ContentPage { items, total })
    }

    /// Update a content item. Only non-`None` fields in `input` are applied;
    /// `description: Some(None)` writes `NULL`.
    ///
    /// The write only happens when the stored `version` still equals
    /// `expected_version`; the version is then incremented. Returns `None`
    /// when no row matched (absent, or modified concurrently).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        input: &UpdateContent,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                UPDATE contents SET
                    title = COALESCE($3, title),
                    description = CASE WHEN $4 THEN $5 ELSE description END,
                    body = COALESCE($6, body),
                    status = COALESCE($7, status),
                    content_type = COALESCE($8, content_type),
                    language = COALESCE($9, language),
                    locale = COALESCE($10, locale),
                    tags = COALESCE($11, tags),
                    metadata = COALESCE($12, metadata),
                    published_at = COALESCE($13, published_at),
                    version = version + 1
                WHERE id = $1 AND version = $2
                RETURNING *
             )
             SELECT {COLUMNS} FROM c {JOIN_AUTHOR}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(&input.body)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.content_type.map(|t| t.as_str()))
            .bind(&input.language)
            .bind(&input.locale)
            .bind(&input.tags)
            .bind(&input.metadata)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a content item. Its translations are removed by
    /// the `ON DELETE CASCADE` foreign key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a content item exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM contents WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}

/// Append the conjunctive `WHERE` clause for `filter`.
fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &ContentFilter) {
    qb.push(" WHERE TRUE");

    if let Some(status) = filter.status {
        qb.push(" AND c.status = ").push_bind(status.as_str());
    }
    if let Some(content_type) = filter.content_type {
        qb.push(" AND c.content_type = ").push_bind(content_type.as_str());
    }
    if let Some(language) = &filter.language {
        qb.push(" AND c.language = ").push_bind(language.clone());
    }
    if let Some(locale) = &filter.locale {
        qb.push(" AND c.locale = ").push_bind(locale.clone());
    }
    if let Some(author_id) = filter.author_id {
        qb.push(" AND c.author_id = ").push_bind(author_id);
    }
    if !filter.tags.is_empty() {
        // Set containment: every requested tag must be present.
        qb.push(" AND c.tags @> ").push_bind(filter.tags.clone());
    }
    if let Some(pattern) = &filter.search_pattern {
        qb.push(" AND (c.title ILIKE ").push_bind(pattern.clone());
        if filter.search_description {
            qb.push(" OR c.description ILIKE ").push_bind(pattern.clone());
        }
        qb.push(")");
    }
}

fn count_builder(filter: &ContentFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM contents c");
    push_filter(&mut qb, filter);
    qb
}

fn list_builder(query: &ContentQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM contents c {JOIN_AUTHOR}"));
    push_filter(&mut qb, &query.filter);

    let direction = query.order.as_sql();
    qb.push(format!(
        " ORDER BY c.{} {direction} NULLS LAST, c.id {direction}",
        query.sort.column()
    ));
    qb.push(" LIMIT ")
        .push_bind(query.page.limit)
        .push(" OFFSET ")
        .push_bind(query.page.offset());
    qb
}

#[cfg(test)]
mod tests {
    use glocal_core::content::{ContentStatus, ContentType};
    use glocal_core::listing::{PageRequest, SortField, SortOrder};

    use super::*;

    #[test]
    fn empty_filter_has_no_constraints() {
        let qb = count_builder(&ContentFilter::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM contents c WHERE TRUE");
    }

    #[test]
    fn filters_are_joined_with_and() {
        let filter = ContentFilter {
            status: Some(ContentStatus::Published),
            content_type: Some(ContentType::Page),
            language: Some("en".into()),
            tags: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        let qb = count_builder(&filter);
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM contents c WHERE TRUE AND c.status = $1 \
             AND c.content_type = $2 AND c.language = $3 AND c.tags @> $4"
        );
    }

    #[test]
    fn search_optionally_covers_description() {
        let mut filter = ContentFilter {
            search_pattern: Some("%hello%".into()),
            ..Default::default()
        };
        assert!(count_builder(&filter).sql().ends_with("AND (c.title ILIKE $1)"));

        filter.search_description = true;
        assert!(count_builder(&filter)
            .sql()
            .ends_with("AND (c.title ILIKE $1 OR c.description ILIKE $2)"));
    }

    #[test]
    fn list_applies_sort_and_page_after_filter() {
        let query = ContentQuery {
            filter: ContentFilter {
                author_id: Some(4),
                ..Default::default()
            },
            sort: SortField::Title,
            order: SortOrder::Asc,
            page: PageRequest::new(Some(3), Some(10)),
        };
        let qb = list_builder(&query);
        assert!(qb.sql().ends_with(
            "WHERE TRUE AND c.author_id = $1 ORDER BY c.title ASC NULLS LAST, c.id ASC \
             LIMIT $2 OFFSET $3"
        ));
    }

    #[test]
    fn default_listing_is_most_recently_updated_first() {
        let qb = list_builder(&ContentQuery::default());
        assert!(qb
            .sql()
            .contains("ORDER BY c.updated_at DESC NULLS LAST, c.id DESC"));
        assert!(qb.sql().contains("FROM contents c JOIN users u ON u.id = c.author_id"));
    }
}
