//! Query-string parsing for the content listing.
//!
//! `tag` may repeat (`?tag=a&tag=b`), which the default `Query` deserializer
//! cannot express, so the handler extracts raw key/value pairs and
//! [`ContentListParams::from_pairs`] folds them.

use glocal_core::content::{ContentStatus, ContentType};
use glocal_core::error::CoreError;
use glocal_core::listing::{collect_tags, like_pattern, PageRequest, SortField, SortOrder};
use glocal_core::locale::{validate_language_code, validate_locale_code};
use glocal_core::types::DbId;
use glocal_db::models::content::{ContentFilter, ContentQuery};

/// Raw listing parameters, as received.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ContentListParams {
    pub status: Option<String>,
    pub content_type: Option<String>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub author: Option<String>,
    pub tag: Vec<String>,
    pub tags: Option<String>,
    pub search: Option<String>,
    pub search_description: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ContentListParams {
    /// Fold decoded query pairs. Unknown keys are ignored; blank values are
    /// treated as absent.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "status" => params.status = Some(value),
                "type" => params.content_type = Some(value),
                "language" => params.language = Some(value),
                "locale" => params.locale = Some(value),
                "author" | "author_id" => params.author = Some(value),
                "tag" => params.tag.push(value),
                "tags" => params.tags = Some(value),
                "search" => params.search = Some(value),
                "search_description" => params.search_description = Some(value),
                "page" => params.page = Some(value),
                "limit" => params.limit = Some(value),
                "sort" => params.sort = Some(value),
                "order" => params.order = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Validate and resolve into a repository query.
    pub fn into_query(self) -> Result<ContentQuery, CoreError> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<ContentStatus>)
            .transpose()?;
        let content_type = self
            .content_type
            .as_deref()
            .map(str::parse::<ContentType>)
            .transpose()?;

        if let Some(language) = &self.language {
            validate_language_code(language)?;
        }
        if let Some(locale) = &self.locale {
            validate_locale_code(locale)?;
        }

        let author_id = self
            .author
            .as_deref()
            .map(|a| parse_int::<DbId>("author", a))
            .transpose()?;

        let page = self
            .page
            .as_deref()
            .map(|p| parse_int::<i64>("page", p))
            .transpose()?;
        let limit = self
            .limit
            .as_deref()
            .map(|l| parse_int::<i64>("limit", l))
            .transpose()?;

        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortField>)
            .transpose()?
            .unwrap_or_default();
        let order = self
            .order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let search_description = match self.search_description.as_deref() {
            None => false,
            Some(v) => parse_flag("search_description", v)?,
        };

        Ok(ContentQuery {
            filter: ContentFilter {
                status,
                content_type,
                language: self.language,
                locale: self.locale,
                author_id,
                tags: collect_tags(&self.tag, self.tags.as_deref()),
                search_pattern: self.search.as_deref().and_then(like_pattern),
                search_description,
            },
            sort,
            order,
            page: PageRequest::new(page, limit),
        })
    }
}

fn parse_int<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, CoreError> {
    value
        .parse()
        .map_err(|_| CoreError::Validation(format!("{name} must be an integer, got '{value}'")))
}

fn parse_flag(name: &str, value: &str) -> Result<bool, CoreError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CoreError::Validation(format!(
            "{name} must be true or false, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_query_uses_defaults() {
        let query = ContentListParams::from_pairs(Vec::new()).into_query().unwrap();
        assert_eq!(query.page, PageRequest::default());
        assert_eq!(query.sort, SortField::UpdatedAt);
        assert_eq!(query.order, SortOrder::Desc);
        assert!(query.filter.tags.is_empty());
        assert!(query.filter.search_pattern.is_none());
    }

    #[test]
    fn repeated_tag_and_tags_list_merge() {
        let params =
            ContentListParams::from_pairs(pairs(&[("tag", "b"), ("tag", "a"), ("tags", "c,a")]));
        assert_eq!(params.tag, vec!["b", "a"]);
        let query = params.into_query().unwrap();
        assert_eq!(query.filter.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn filters_parse_into_typed_values() {
        let query = ContentListParams::from_pairs(pairs(&[
            ("status", "published"),
            ("type", "BLOG_POST"),
            ("language", "en"),
            ("author", "7"),
            ("search", "launch"),
            ("search_description", "true"),
            ("page", "2"),
            ("limit", "500"),
            ("sort", "title"),
            ("order", "asc"),
        ]))
        .into_query()
        .unwrap();

        assert_eq!(query.filter.status, Some(ContentStatus::Published));
        assert_eq!(query.filter.content_type, Some(ContentType::BlogPost));
        assert_eq!(query.filter.author_id, Some(7));
        assert_eq!(query.filter.search_pattern.as_deref(), Some("%launch%"));
        assert!(query.filter.search_description);
        assert_eq!(query.page, PageRequest { page: 2, limit: 100 });
        assert_eq!(query.sort, SortField::Title);
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        for raw in [
            ("status", "LIVE"),
            ("type", "VIDEO"),
            ("language", "english"),
            ("locale", "en_us"),
            ("author", "bob"),
            ("page", "two"),
            ("sort", "author"),
            ("order", "up"),
            ("search_description", "maybe"),
        ] {
            let result = ContentListParams::from_pairs(pairs(&[raw])).into_query();
            assert_matches!(result, Err(CoreError::Validation(_)), "{raw:?}");
        }
    }

    #[test]
    fn blank_values_are_ignored() {
        let query = ContentListParams::from_pairs(pairs(&[("status", " "), ("search", "")]))
            .into_query()
            .unwrap();
        assert!(query.filter.status.is_none());
        assert!(query.filter.search_pattern.is_none());
    }
}
