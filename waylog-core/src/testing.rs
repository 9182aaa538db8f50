//! In-memory gateway fakes for the controller tests.

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, VecDeque},
};

use async_trait::async_trait;
use futures::channel::oneshot;
use time::{macros::datetime, OffsetDateTime};

use waylog_boundary::{
    DestinationType, NewTravelRecord, Photo, PlaceDetails, PlaceSuggestion, RecordsPage,
    TravelRecord,
};

use crate::{
    gateways::{GatewayError, PlacesGateway, RecordsGateway, Result},
    util::sort::{SortDirection, SortKey, SortOrder},
};

pub(crate) fn record(id: i64, title: &str, country: &str, lat: f64, lng: f64) -> TravelRecord {
    TravelRecord {
        id,
        user_id: 1,
        title: title.to_string(),
        notes: None,
        country_code: country.to_string(),
        region: None,
        city: None,
        latitude: lat,
        longitude: lng,
        destination_type: DestinationType::Other,
        rating: 4,
        visited_at: datetime!(2023-11-20 08:30 UTC),
        place_external_id: None,
        created_at: datetime!(2023-11-21 12:00 UTC),
        updated_at: None,
        weather_summary: None,
        photo: None,
    }
}

pub(crate) fn suggestion(place_id: &str) -> PlaceSuggestion {
    PlaceSuggestion {
        place_id: place_id.to_string(),
        description: format!("suggestion {place_id}"),
    }
}

pub(crate) fn details(
    title: &str,
    country: Option<&str>,
    city: Option<&str>,
) -> PlaceDetails {
    PlaceDetails {
        place_external_id: "abc".to_string(),
        title: title.to_string(),
        country_code: country.map(ToString::to_string),
        city: city.map(ToString::to_string),
        latitude: 48.86,
        longitude: 2.33,
    }
}

/// Acts as an in-memory server: assigns identities, stamps `created_at`,
/// sorts and slices listings. Counters record the calls received; a
/// scripted failure or a gate (a oneshot the test releases) can be
/// installed for the next mutating call.
#[derive(Default)]
pub(crate) struct FakeRecords {
    pub store: RefCell<BTreeMap<i64, TravelRecord>>,
    pub creates: Cell<usize>,
    pub updates: Cell<usize>,
    pub removes: Cell<usize>,
    pub lists: Cell<usize>,
    pub last_query: RefCell<Option<(u64, u64, SortOrder)>>,
    pub fail_next: RefCell<Option<GatewayError>>,
    pub gate: RefCell<Option<oneshot::Receiver<()>>>,
    next_id: Cell<i64>,
}

impl FakeRecords {
    pub fn with_records(records: Vec<TravelRecord>) -> Self {
        let this = Self::default();
        for record in records {
            this.next_id.set(this.next_id.get().max(record.id));
            this.store.borrow_mut().insert(record.id, record);
        }
        this
    }

    fn take_failure(&self) -> Result<()> {
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    fn materialize(&self, id: i64, payload: &NewTravelRecord) -> TravelRecord {
        TravelRecord {
            id,
            user_id: 1,
            title: payload.title.clone(),
            notes: payload.notes.clone(),
            country_code: payload.country_code.clone(),
            region: payload.region.clone(),
            city: payload.city.clone(),
            latitude: payload.latitude,
            longitude: payload.longitude,
            destination_type: payload.destination_type,
            rating: payload.rating,
            visited_at: payload.visited_at,
            place_external_id: payload.place_external_id.clone(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
            weather_summary: None,
            photo: None,
        }
    }
}

#[async_trait(?Send)]
impl RecordsGateway for FakeRecords {
    type PhotoSource = String;

    async fn list(&self, limit: u64, offset: u64, order: SortOrder) -> Result<RecordsPage> {
        self.lists.set(self.lists.get() + 1);
        *self.last_query.borrow_mut() = Some((limit, offset, order));
        self.take_failure()?;
        let mut items: Vec<_> = self.store.borrow().values().cloned().collect();
        match order.key {
            SortKey::Title => items.sort_by(|a, b| a.title.cmp(&b.title)),
            SortKey::Rating => items.sort_by_key(|r| r.rating),
            SortKey::VisitedAt => items.sort_by_key(|r| r.visited_at),
        }
        if order.direction == SortDirection::Descending {
            items.reverse();
        }
        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(RecordsPage {
            items,
            total,
            limit,
            offset,
        })
    }

    async fn get(&self, id: i64) -> Result<TravelRecord> {
        self.store
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn create(&self, record: &NewTravelRecord) -> Result<TravelRecord> {
        self.creates.set(self.creates.get() + 1);
        self.take_failure()?;
        self.wait_for_gate().await;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let record = self.materialize(id, record);
        self.store.borrow_mut().insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, record: &NewTravelRecord) -> Result<TravelRecord> {
        self.updates.set(self.updates.get() + 1);
        self.take_failure()?;
        self.wait_for_gate().await;
        let mut store = self.store.borrow_mut();
        let existing = store.get_mut(&id).ok_or(GatewayError::NotFound)?;
        let mut updated = self.materialize(id, record);
        updated.created_at = existing.created_at;
        updated.photo = existing.photo.clone();
        updated.updated_at = Some(OffsetDateTime::now_utc());
        *existing = updated.clone();
        Ok(updated)
    }

    async fn remove(&self, id: i64) -> Result<()> {
        self.removes.set(self.removes.get() + 1);
        self.take_failure()?;
        self.store
            .borrow_mut()
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::NotFound)
    }

    async fn upload_photo(&self, id: i64, file: &String) -> Result<Photo> {
        self.take_failure()?;
        let mut store = self.store.borrow_mut();
        let record = store.get_mut(&id).ok_or(GatewayError::NotFound)?;
        let photo = Photo {
            id: id * 100,
            file_path: format!("/uploads/{id}/{file}"),
            content_type: "image/jpeg".to_string(),
            size_bytes: 1024,
        };
        record.photo = Some(photo.clone());
        Ok(photo)
    }

    async fn list_photos(&self, id: i64) -> Result<Vec<Photo>> {
        let store = self.store.borrow();
        let record = store.get(&id).ok_or(GatewayError::NotFound)?;
        Ok(record.photo.clone().into_iter().collect())
    }

    async fn delete_photo(&self, id: i64, photo_id: i64) -> Result<()> {
        let mut store = self.store.borrow_mut();
        let record = store.get_mut(&id).ok_or(GatewayError::NotFound)?;
        if record.photo.as_ref().map(|p| p.id) != Some(photo_id) {
            return Err(GatewayError::NotFound);
        }
        record.photo = None;
        Ok(())
    }
}

/// Immediate suggestions by default; queued oneshot receivers let a test
/// control the order in which in-flight responses resolve.
#[derive(Default)]
pub(crate) struct FakePlaces {
    pub suggestions: RefCell<Vec<PlaceSuggestion>>,
    pub scripted: RefCell<VecDeque<oneshot::Receiver<Vec<PlaceSuggestion>>>>,
    pub details: RefCell<Option<PlaceDetails>>,
    pub autocomplete_calls: Cell<usize>,
    pub details_calls: Cell<usize>,
}

#[async_trait(?Send)]
impl PlacesGateway for FakePlaces {
    async fn autocomplete(
        &self,
        _query: &str,
        _session_token: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>> {
        self.autocomplete_calls.set(self.autocomplete_calls.get() + 1);
        let scripted = self.scripted.borrow_mut().pop_front();
        match scripted {
            Some(response) => Ok(response.await.unwrap_or_default()),
            None => Ok(self.suggestions.borrow().clone()),
        }
    }

    async fn details(&self, _place_id: &str) -> Result<PlaceDetails> {
        self.details_calls.set(self.details_calls.get() + 1);
        self.details.borrow().clone().ok_or(GatewayError::NotFound)
    }
}
