use crate::domain::model::PageRequest;
use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Page-number pagination over a listing of `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl Paginator {
    /// Missing `page` means the first page; anything but a positive integer is invalid.
    pub fn from_query(query: &PageQuery, page_size: usize) -> Result<Self> {
        let page = match query.page.as_deref() {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or(ServiceError::InvalidPage)?,
        };
        Ok(Self { page, page_size })
    }

    /// Fails with `InvalidPage` when the offset does not fit the store's integer range.
    pub fn request(&self) -> Result<PageRequest> {
        let offset = (self.page - 1)
            .checked_mul(self.page_size)
            .and_then(|offset| i64::try_from(offset).ok())
            .ok_or(ServiceError::InvalidPage)?;
        let limit = i64::try_from(self.page_size).map_err(|_| ServiceError::InvalidPage)?;
        Ok(PageRequest { offset, limit })
    }

    fn num_pages(&self, total: i64) -> usize {
        let total = total.max(0) as usize;
        total.div_ceil(self.page_size).max(1)
    }

    /// Fails with `InvalidPage` past the last page. An empty first page is allowed.
    pub fn paginate<T>(&self, total: i64, results: Vec<T>, base_url: &str) -> Result<Paginated<T>> {
        let num_pages = self.num_pages(total);
        if self.page > num_pages {
            return Err(ServiceError::InvalidPage);
        }

        let next = (self.page < num_pages).then(|| format!("{}?page={}", base_url, self.page + 1));
        let previous = match self.page {
            1 => None,
            2 => Some(base_url.to_string()),
            page => Some(format!("{}?page={}", base_url, page - 1)),
        };

        Ok(Paginated {
            count: total,
            next,
            previous,
            results,
        })
    }

    /// Paginates a listing that is already fully in memory.
    pub fn paginate_all<T>(&self, items: Vec<T>, base_url: &str) -> Result<Paginated<T>> {
        let total = items.len() as i64;
        let request = self.request()?;
        let window: Vec<T> = items
            .into_iter()
            .skip(usize::try_from(request.offset).map_err(|_| ServiceError::InvalidPage)?)
            .take(self.page_size)
            .collect();
        self.paginate(total, window, base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://testserver/cars/";

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_from_query() {
        assert_eq!(Paginator::from_query(&query(None), 10).unwrap().page, 1);
        assert_eq!(Paginator::from_query(&query(Some("3")), 10).unwrap().page, 3);
        assert!(Paginator::from_query(&query(Some("0")), 10).is_err());
        assert!(Paginator::from_query(&query(Some("abc")), 10).is_err());
    }

    #[test]
    fn test_request_window() {
        let paginator = Paginator {
            page: 3,
            page_size: 10,
        };
        assert_eq!(
            paginator.request().unwrap(),
            PageRequest {
                offset: 20,
                limit: 10
            }
        );
    }

    #[test]
    fn test_huge_page_is_invalid() {
        let paginator = Paginator::from_query(&query(Some("18446744073709551615")), 10).unwrap();
        assert!(matches!(paginator.request(), Err(ServiceError::InvalidPage)));
        assert!(matches!(
            paginator.paginate_all(vec![1, 2, 3], BASE),
            Err(ServiceError::InvalidPage)
        ));

        // fits usize but not i64
        let paginator = Paginator {
            page: (i64::MAX as usize) + 2,
            page_size: 1,
        };
        assert!(matches!(paginator.request(), Err(ServiceError::InvalidPage)));
    }

    #[test]
    fn test_links() {
        let first = Paginator {
            page: 1,
            page_size: 1,
        }
        .paginate(3, vec![1], BASE)
        .unwrap();
        assert_eq!(first.next.as_deref(), Some("http://testserver/cars/?page=2"));
        assert_eq!(first.previous, None);

        let second = Paginator {
            page: 2,
            page_size: 1,
        }
        .paginate(3, vec![2], BASE)
        .unwrap();
        assert_eq!(second.previous.as_deref(), Some(BASE));

        let third = Paginator {
            page: 3,
            page_size: 1,
        }
        .paginate(3, vec![3], BASE)
        .unwrap();
        assert_eq!(third.next, None);
        assert_eq!(third.previous.as_deref(), Some("http://testserver/cars/?page=2"));
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let paginator = Paginator {
            page: 1,
            page_size: 10,
        };
        let page = paginator.paginate::<i64>(0, vec![], BASE).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.next.is_none());

        let past_end = Paginator {
            page: 2,
            page_size: 10,
        };
        assert!(matches!(
            past_end.paginate::<i64>(0, vec![], BASE),
            Err(ServiceError::InvalidPage)
        ));
    }

    #[test]
    fn test_paginate_all() {
        let paginator = Paginator {
            page: 2,
            page_size: 2,
        };
        let page = paginator.paginate_all(vec![1, 2, 3], BASE).unwrap();
        assert_eq!(page.results, vec![3]);
        assert_eq!(page.count, 3);
    }
}
