use std::{cell::RefCell, rc::Rc};

use waylog_boundary::TravelRecord;

use crate::{
    gateways::{GatewayError, RecordsGateway},
    util::sort::{SortKey, SortOrder},
    Subscribers,
};

pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Current page of a record listing plus its window and ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub items: Vec<TravelRecord>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub order: SortOrder,
    pub loading: bool,
    pub last_error: Option<GatewayError>,
}

impl ListState {
    fn new(limit: u64) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit,
            offset: 0,
            order: SortOrder::default(),
            loading: false,
            last_error: None,
        }
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.offset + self.limit < self.total
    }

    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.offset > 0
    }
}

/// Paginated, sortable list state shared by the entries page and the
/// insights records table. Every sort or window change re-issues the
/// fetch and replaces the page contents in place.
pub struct RecordList<R> {
    records: Rc<R>,
    state: Rc<RefCell<ListState>>,
    subscribers: Rc<Subscribers>,
}

impl<R> Clone for RecordList<R> {
    fn clone(&self) -> Self {
        Self {
            records: Rc::clone(&self.records),
            state: Rc::clone(&self.state),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<R> RecordList<R>
where
    R: RecordsGateway,
{
    pub fn new(records: Rc<R>, limit: u64) -> Self {
        Self {
            records,
            state: Rc::new(RefCell::new(ListState::new(limit))),
            subscribers: Rc::default(),
        }
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.subscribers.subscribe(callback);
    }

    #[must_use]
    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    fn update<T>(&self, mutate: impl FnOnce(&mut ListState) -> T) -> T {
        let value = mutate(&mut self.state.borrow_mut());
        self.subscribers.notify();
        value
    }

    /// Re-issues the fetch with the current window and ordering.
    pub async fn refresh(&self) {
        let (limit, offset, order) = self.update(|st| {
            st.loading = true;
            (st.limit, st.offset, st.order)
        });
        match self.records.list(limit, offset, order).await {
            Ok(page) => self.update(|st| {
                st.items = page.items;
                st.total = page.total;
                st.loading = false;
                st.last_error = None;
            }),
            Err(err) => {
                log::warn!("Unable to fetch records: {err}");
                self.update(|st| {
                    st.loading = false;
                    st.last_error = Some(err);
                });
            }
        }
    }

    /// Re-selecting the active key flips the direction, a new key starts
    /// descending; either way the page is re-fetched.
    pub async fn set_sort(&self, key: SortKey) {
        self.update(|st| st.order = st.order.select(key));
        self.refresh().await;
    }

    pub async fn set_offset(&self, offset: u64) {
        self.update(|st| st.offset = offset);
        self.refresh().await;
    }

    pub async fn next_page(&self) {
        let offset = {
            let st = self.state.borrow();
            if !st.has_next_page() {
                return;
            }
            st.offset + st.limit
        };
        self.set_offset(offset).await;
    }

    pub async fn previous_page(&self) {
        let offset = {
            let st = self.state.borrow();
            if !st.has_previous_page() {
                return;
            }
            st.offset.saturating_sub(st.limit)
        };
        self.set_offset(offset).await;
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use crate::{
        testing::{record, FakeRecords},
        util::sort::SortDirection,
    };

    use super::*;

    fn seeded() -> Rc<FakeRecords> {
        Rc::new(FakeRecords::with_records(vec![
            record(1, "Alps hike", "CH", 46.6, 8.0),
            record(2, "Berlin weekend", "DE", 52.5, 13.4),
            record(3, "Crete beaches", "GR", 35.2, 24.9),
        ]))
    }

    #[test]
    fn refresh_replaces_the_page_in_place() {
        let records = seeded();
        let list = RecordList::new(Rc::clone(&records), 10);

        block_on(list.refresh());
        assert_eq!(list.snapshot().items.len(), 3);
        assert_eq!(list.snapshot().total, 3);

        records.store.borrow_mut().remove(&2);
        block_on(list.refresh());

        let st = list.snapshot();
        assert_eq!(st.items.len(), 2);
        assert_eq!(st.total, 2);
        assert!(!st.loading);
    }

    #[test]
    fn reselecting_rating_toggles_between_directions() {
        let records = seeded();
        let list = RecordList::new(Rc::clone(&records), 10);

        block_on(list.set_sort(SortKey::Rating));
        let st = list.snapshot();
        assert_eq!(st.order.key, SortKey::Rating);
        assert_eq!(st.order.direction, SortDirection::Descending);

        block_on(list.set_sort(SortKey::Rating));
        assert_eq!(list.snapshot().order.direction, SortDirection::Ascending);

        let (_, _, order) = records.last_query.borrow().clone().unwrap();
        assert_eq!(order.to_string(), "rating:asc");
    }

    #[test]
    fn a_new_sort_key_starts_descending() {
        let records = seeded();
        let list = RecordList::new(Rc::clone(&records), 10);
        assert_eq!(list.snapshot().order.to_string(), "visited_at:desc");

        block_on(list.set_sort(SortKey::Title));

        let st = list.snapshot();
        assert_eq!(st.order.key, SortKey::Title);
        assert_eq!(st.order.direction, SortDirection::Descending);
        // Descending by title: Crete, Berlin, Alps.
        assert_eq!(st.items[0].id, 3);
        assert_eq!(st.items[2].id, 1);
    }

    #[test]
    fn paging_moves_the_window() {
        let records = seeded();
        let list = RecordList::new(Rc::clone(&records), 2);

        block_on(list.refresh());
        let st = list.snapshot();
        assert_eq!(st.items.len(), 2);
        assert!(st.has_next_page());
        assert!(!st.has_previous_page());

        block_on(list.next_page());
        let st = list.snapshot();
        assert_eq!(st.offset, 2);
        assert_eq!(st.items.len(), 1);
        assert!(!st.has_next_page());

        // Already on the last page, the window stays put.
        block_on(list.next_page());
        assert_eq!(list.snapshot().offset, 2);

        block_on(list.previous_page());
        assert_eq!(list.snapshot().offset, 0);
    }

    #[test]
    fn fetch_failures_are_surfaced_and_clear_the_spinner() {
        let records = seeded();
        let list = RecordList::new(Rc::clone(&records), 10);
        block_on(list.refresh());

        *records.fail_next.borrow_mut() =
            Some(GatewayError::Transport("connection reset".into()));
        block_on(list.refresh());

        let st = list.snapshot();
        assert!(!st.loading);
        assert_eq!(
            st.last_error,
            Some(GatewayError::Transport("connection reset".into()))
        );
        // The previously fetched page is kept on screen.
        assert_eq!(st.items.len(), 3);
    }
}
