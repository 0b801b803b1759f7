//! Page slicing for materialized result lists
//!
//! Feeds are mixed in memory before paging, so pagination works on a `Vec`
//! rather than in SQL.

use serde::Serialize;

/// Where an unusable page number lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfRange {
    /// Feed pages: a number past the end (or below 1) shows the last page
    LastPage,
    /// Admin API pages: any unusable number shows the first page
    FirstPage,
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub per_page: usize,
    pub num_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            num_pages: self.num_pages,
            total_items: self.total_items,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Slice `items` into the requested page.
///
/// `requested` is the raw query value; missing or non-numeric values mean
/// page 1. An integer too large to parse counts as out of range. An empty list still has one (empty) page. `per_page` of zero is
/// treated as one.
pub fn paginate<T>(
    items: Vec<T>,
    requested: Option<&str>,
    per_page: usize,
    out_of_range: OutOfRange,
) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let num_pages = total_items.div_ceil(per_page).max(1);

    let landing = match out_of_range {
        OutOfRange::LastPage => num_pages,
        OutOfRange::FirstPage => 1,
    };
    let number = match requested.map(str::trim) {
        None => 1,
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if n >= 1 && (n as usize) <= num_pages => n as usize,
            Ok(_) => landing,
            Err(_) if is_integer(raw) => landing,
            Err(_) => 1,
        },
    };

    let start = (number - 1) * per_page;
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        number,
        per_page,
        num_pages,
        total_items,
        has_next: number < num_pages,
        has_previous: number > 1,
    }
}

/// Optional sign followed by at least one ASCII digit
fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
