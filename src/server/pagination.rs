use axum::extract::{rejection::QueryRejection, Query};
use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// `?page=N`. Anything that is not an integer falls back to the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    /// A query string that does not even deserialize (e.g. a repeated `page`)
    /// is treated like a missing one.
    pub fn or_default(query: Result<Query<PageQuery>, QueryRejection>) -> Self {
        match query {
            Ok(Query(query)) => query,
            Err(rejection) => {
                tracing::debug!("Ignoring query string: {}", rejection.body_text());
                PageQuery::default()
            }
        }
    }

    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Returns the 1-indexed `page` of `items`. Pages before the first or past
/// the end are empty.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
        .unwrap_or(usize::MAX);
    items
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_owned),
        }
    }

    #[test]
    fn page_size_law() {
        for total in [0usize, 1, 9, 10, 11, 25, 40] {
            for page in 1..=6i64 {
                let items: Vec<usize> = (0..total).collect();
                let expected = total
                    .saturating_sub(QUESTIONS_PER_PAGE * (page as usize - 1))
                    .min(QUESTIONS_PER_PAGE);
                assert_eq!(
                    paginate(items, page).len(),
                    expected,
                    "total={total} page={page}"
                );
            }
        }
    }

    #[test]
    fn second_page_starts_at_offset_ten() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(items, 2), (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn non_positive_pages_are_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(items.clone(), 0).is_empty());
        assert!(paginate(items, -3).is_empty());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(items, i64::MAX).is_empty());
    }

    #[test]
    fn page_query_defaults_silently() {
        assert_eq!(query(None).page(), 1);
        assert_eq!(query(Some("abc")).page(), 1);
        assert_eq!(query(Some("")).page(), 1);
        assert_eq!(query(Some("3")).page(), 3);
        assert_eq!(query(Some("0")).page(), 0);
    }

    #[test]
    fn rejected_query_string_means_first_page() {
        let uri: axum::http::Uri = "/questions?page=1&page=2".parse().unwrap();
        let rejected = Query::<PageQuery>::try_from_uri(&uri);
        assert!(rejected.is_err());
        assert_eq!(PageQuery::or_default(rejected).page(), 1);

        let uri: axum::http::Uri = "/questions?page=4".parse().unwrap();
        assert_eq!(PageQuery::or_default(Query::try_from_uri(&uri)).page(), 4);
    }
}
