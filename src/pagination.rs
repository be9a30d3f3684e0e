// Pagination navigation links

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::PageError;
use crate::link::{rel, Link};
use crate::template::encoding::encode_query;

// Query parameter names owned by the deriver; any of these already
// present on the base href are replaced by the canonical suffix.
const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";
const SORT_PARAM: &str = "sort";

/// Position of one page inside a paged result set.
///
/// `number` is the zero-based index of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: usize,
    pub number: usize,
}

impl PageInfo {
    pub fn new(size: usize, total_elements: u64, total_pages: usize, number: usize) -> Self {
        Self {
            size,
            total_elements,
            total_pages,
            number,
        }
    }

    /// Derives `total_pages` from the element count by ceiling division.
    pub fn from_totals(size: usize, total_elements: u64, number: usize) -> Self {
        let per_page = size.max(1) as u64;
        let total_pages = if total_elements == 0 {
            0
        } else {
            total_elements.div_ceil(per_page) as usize
        };
        Self {
            size,
            total_elements,
            total_pages,
            number,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    /// The page number fits inside the total page count. An empty result
    /// set (`total_pages == 0`) only admits page 0.
    fn is_consistent(&self) -> bool {
        if self.total_pages == 0 {
            self.number == 0
        } else {
            self.number < self.total_pages
        }
    }
}

/// Direction of one sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The abbreviated form used inside `sort=` query values.
    pub fn abbrev(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// One property/direction pair. Criteria render in input order, one
/// `sort=property,direction` assignment each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    pub property: String,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    pub fn ascending(property: impl Into<String>) -> Self {
        Self::new(property, SortDirection::Ascending)
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Self::new(property, SortDirection::Descending)
    }
}

/// Derives the `self`/`first`/`prev`/`next`/`last` navigation links for a
/// paged collection.
///
/// Any `page`, `size` or `sort` parameters on the base href are stripped;
/// every other query parameter is preserved on each emitted link. `self`
/// is always present; `first` and `prev` appear only when a previous page
/// exists, `next` and `last` only when a later one does, so a result of
/// at most one page yields just `self`. Emitted links carry the relation
/// and href only.
pub fn navigation_links(
    base: &Link,
    page: &PageInfo,
    sort: &[SortCriterion],
) -> Result<Vec<Link>, PageError> {
    if !page.is_consistent() {
        return Err(PageError::PageNumberOutOfRange {
            number: page.number,
            total_pages: page.total_pages,
        });
    }

    let stripped = strip_reserved_params(&base.href);
    tracing::debug!(base = %stripped, page = page.number, "deriving pagination navigation links");

    let target =
        |number: usize, relation: &str| Link::new(page_href(&stripped, number, page.size, sort)).with_rel(relation);

    let last_index = page.total_pages.saturating_sub(1);
    let mut links = vec![target(page.number, rel::SELF)];
    if page.number > 0 {
        links.push(target(0, rel::FIRST));
        links.push(target(page.number - 1, rel::PREV));
    }
    if page.number < last_index {
        links.push(target(page.number + 1, rel::NEXT));
        links.push(target(last_index, rel::LAST));
    }

    Ok(links)
}

/// Removes the reserved parameters from the href's query string, leaving
/// every other pair in place.
fn strip_reserved_params(href: &str) -> String {
    let Some((path, query)) = href.split_once('?') else {
        return href.to_string();
    };

    let mut retained = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key != PAGE_PARAM && key != SIZE_PARAM && key != SORT_PARAM {
            retained.append_pair(&key, &value);
            any = true;
        }
    }

    if any {
        format!("{}?{}", path, retained.finish())
    } else {
        path.to_string()
    }
}

/// Appends the canonical query suffix for one target page number.
fn page_href(base: &str, number: usize, size: usize, sort: &[SortCriterion]) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut href = format!("{}{}page={}&size={}", base, separator, number, size);
    for criterion in sort {
        href.push_str(&format!(
            "&sort={},{}",
            encode_query(&criterion.property),
            criterion.direction.abbrev()
        ));
    }
    href
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relations(links: &[Link]) -> Vec<&str> {
        links.iter().filter_map(|l| l.rel.as_deref()).collect()
    }

    #[test]
    fn test_empty_result_yields_only_self() {
        let links =
            navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 0, 0, 0), &[]).unwrap();
        assert_eq!(relations(&links), vec!["self"]);
        assert_eq!(links[0].href, "http://x/r?page=0&size=10");
    }

    #[test]
    fn test_single_page_yields_only_self() {
        let links =
            navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 5, 1, 0), &[]).unwrap();
        assert_eq!(relations(&links), vec!["self"]);
    }

    #[test]
    fn test_first_page_of_many() {
        let links =
            navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 50, 5, 0), &[]).unwrap();
        assert_eq!(relations(&links), vec!["self", "next", "last"]);
        assert_eq!(links[1].href, "http://x/r?page=1&size=10");
        assert_eq!(links[2].href, "http://x/r?page=4&size=10");
    }

    #[test]
    fn test_last_page_of_many() {
        let links =
            navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 50, 5, 4), &[]).unwrap();
        assert_eq!(relations(&links), vec!["self", "first", "prev"]);
        assert_eq!(links[1].href, "http://x/r?page=0&size=10");
        assert_eq!(links[2].href, "http://x/r?page=3&size=10");
    }

    #[test]
    fn test_middle_page_yields_all_five() {
        let links =
            navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 50, 5, 2), &[]).unwrap();
        assert_eq!(relations(&links), vec!["self", "first", "prev", "next", "last"]);
    }

    #[test]
    fn test_self_href_with_sort() {
        let links = navigation_links(
            &Link::new("http://x/r"),
            &PageInfo::new(10, 50, 5, 2),
            &[SortCriterion::ascending("name")],
        )
        .unwrap();
        assert_eq!(links[0].href, "http://x/r?page=2&size=10&sort=name,asc");
    }

    #[test]
    fn test_multiple_sort_criteria_render_in_input_order() {
        let links = navigation_links(
            &Link::new("http://x/r"),
            &PageInfo::new(10, 50, 5, 0),
            &[
                SortCriterion::descending("created"),
                SortCriterion::ascending("name"),
            ],
        )
        .unwrap();
        assert_eq!(
            links[0].href,
            "http://x/r?page=0&size=10&sort=created,desc&sort=name,asc"
        );
    }

    #[test]
    fn test_existing_reserved_params_are_replaced() {
        let base = Link::new("http://x/r?page=9&size=99&sort=old,desc");
        let links = navigation_links(&base, &PageInfo::new(10, 50, 5, 2), &[]).unwrap();
        assert_eq!(links[0].href, "http://x/r?page=2&size=10");
    }

    #[test]
    fn test_foreign_query_params_are_preserved() {
        let base = Link::new("http://x/r?filter=active&page=9");
        let links = navigation_links(&base, &PageInfo::new(10, 50, 5, 2), &[]).unwrap();
        assert_eq!(links[0].href, "http://x/r?filter=active&page=2&size=10");
    }

    #[test]
    fn test_out_of_range_page_number_rejected() {
        let err = navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 50, 5, 5), &[])
            .unwrap_err();
        assert_eq!(
            err,
            PageError::PageNumberOutOfRange {
                number: 5,
                total_pages: 5
            }
        );
    }

    #[test]
    fn test_nonzero_page_rejected_for_empty_result() {
        let err = navigation_links(&Link::new("http://x/r"), &PageInfo::new(10, 0, 0, 1), &[])
            .unwrap_err();
        assert!(matches!(err, PageError::PageNumberOutOfRange { .. }));
    }

    #[test]
    fn test_emitted_links_carry_relation_and_href_only() {
        let base = Link::new("http://x/r").with_title("People").with_name("people");
        let links = navigation_links(&base, &PageInfo::new(10, 50, 5, 2), &[]).unwrap();
        assert!(links.iter().all(|l| l.title.is_none() && l.name.is_none()));
    }

    #[test]
    fn test_from_totals_ceiling_division() {
        assert_eq!(PageInfo::from_totals(20, 145, 0).total_pages, 8);
        assert_eq!(PageInfo::from_totals(10, 50, 0).total_pages, 5);
        assert_eq!(PageInfo::from_totals(10, 0, 0).total_pages, 0);
        assert_eq!(PageInfo::from_totals(10, 1, 0).total_pages, 1);
    }

    #[test]
    fn test_has_previous_and_has_next() {
        let page = PageInfo::new(10, 50, 5, 0);
        assert!(!page.has_previous());
        assert!(page.has_next());

        let page = PageInfo::new(10, 50, 5, 4);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }
}
