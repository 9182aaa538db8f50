use std::{cell::RefCell, rc::Rc};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use waylog_boundary::{
    DestinationType, MapPoint, NewTravelRecord, PlaceDetails, PlaceSuggestion, TravelRecord,
};

use crate::{
    gateways::{GatewayError, PlacesGateway, RecordsGateway},
    util::validate::{DraftInvalidation, Validate},
    Subscribers,
};

pub const DEFAULT_COUNTRY_CODE: &str = "US";
pub const DEFAULT_RATING: u8 = 5;

/// Queries shorter than this never hit the autocomplete gateway.
const MIN_QUERY_LEN: usize = 2;

/// The entry form as the user sees it. Not persisted; numeric fields are
/// already typed (the view layer parses its inputs), the visit date stays
/// a raw string until save normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorDraft {
    /// `None` = create mode, `Some` = update mode.
    pub editing_id: Option<i64>,
    pub title: String,
    pub notes: String,
    pub country_code: String,
    pub region: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub destination_type: DestinationType,
    pub rating: u8,
    pub visited_at: String,
    pub place_external_id: String,
}

impl EditorDraft {
    /// Create-mode defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            editing_id: None,
            title: String::new(),
            notes: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            region: String::new(),
            city: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            destination_type: DestinationType::default(),
            rating: DEFAULT_RATING,
            visited_at: now_rfc3339(),
            place_external_id: String::new(),
        }
    }

    /// Copies the writable fields of an existing record into the form.
    /// Out-of-range values are taken over as-is; the derived validation
    /// flags them and blocks re-saving until corrected.
    #[must_use]
    pub fn from_record(record: &TravelRecord) -> Self {
        Self {
            editing_id: Some(record.id),
            title: record.title.clone(),
            notes: record.notes.clone().unwrap_or_default(),
            country_code: record.country_code.clone(),
            region: record.region.clone().unwrap_or_default(),
            city: record.city.clone().unwrap_or_default(),
            latitude: record.latitude,
            longitude: record.longitude,
            destination_type: record.destination_type,
            rating: record.rating,
            visited_at: record
                .visited_at
                .format(&Rfc3339)
                .unwrap_or_default(),
            place_external_id: record.place_external_id.clone().unwrap_or_default(),
        }
    }

    /// Normalized wire payload: country code uppercased (defaulting to
    /// [`DEFAULT_COUNTRY_CODE`] when empty), empty optionals dropped, the
    /// visit date parsed to UTC (falling back to now when unparseable).
    #[must_use]
    pub fn to_payload(&self) -> NewTravelRecord {
        let country = self.country_code.trim();
        let country_code = if country.is_empty() {
            DEFAULT_COUNTRY_CODE.to_string()
        } else {
            country.to_ascii_uppercase()
        };
        let visited_at = OffsetDateTime::parse(self.visited_at.trim(), &Rfc3339)
            .map_or_else(|_| OffsetDateTime::now_utc(), |ts| ts.to_offset(time::UtcOffset::UTC));
        NewTravelRecord {
            title: self.title.trim().to_string(),
            notes: none_if_empty(&self.notes),
            country_code,
            region: none_if_empty(&self.region),
            city: none_if_empty(&self.city),
            latitude: self.latitude,
            longitude: self.longitude,
            destination_type: self.destination_type,
            rating: self.rating,
            visited_at,
            place_external_id: none_if_empty(&self.place_external_id),
        }
    }
}

impl Default for EditorDraft {
    fn default() -> Self {
        Self::new()
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    /// No draft open.
    #[default]
    Idle,
    Creating,
    Editing,
    /// A create or update request is in flight.
    Saving,
}

/// Everything the entry view renders. [`EntryEditor::snapshot`] hands out
/// clones; mutation goes through the controller operations only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub phase: EditorPhase,
    pub draft: EditorDraft,
    pub map_center: MapPoint,
    pub query: String,
    pub suggestions: Vec<PlaceSuggestion>,
    pub suggestions_visible: bool,
    pub last_error: Option<GatewayError>,
    query_seq: u64,
}

impl EditorState {
    /// Field-level violation that currently blocks saving, if any.
    #[must_use]
    pub fn validation(&self) -> Option<DraftInvalidation> {
        self.draft.validate().err()
    }

    fn reset_for_create(&mut self) {
        self.draft = EditorDraft::new();
        self.map_center = MapPoint::default();
        self.suggestions.clear();
        self.suggestions_visible = false;
        self.last_error = None;
    }

    fn load_record(&mut self, record: &TravelRecord) {
        self.draft = EditorDraft::from_record(record);
        self.map_center = MapPoint {
            lat: record.latitude,
            lng: record.longitude,
        };
        self.suggestions.clear();
        self.suggestions_visible = false;
        self.last_error = None;
    }

    /// Draft coordinates and map center move in lock-step.
    fn set_coordinates(&mut self, lat: f64, lng: f64) {
        self.draft.latitude = lat;
        self.draft.longitude = lng;
        self.map_center = MapPoint { lat, lng };
    }

    fn apply_place_details(&mut self, details: &PlaceDetails) {
        if !details.title.is_empty() {
            self.draft.title = details.title.clone();
        }
        self.draft.country_code = details
            .country_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_COUNTRY_CODE)
            .to_ascii_uppercase();
        self.draft.city = details.city.clone().unwrap_or_default();
        self.draft.place_external_id = details.place_external_id.clone();
        self.set_coordinates(details.latitude, details.longitude);
    }

    /// Registers the query text and stamps a new sequence number.
    /// Returns `None` when the input is too short to query; the stamp
    /// still advances so that earlier in-flight responses cannot reopen
    /// the panel after the user has shortened the input.
    fn begin_query(&mut self, text: &str) -> Option<u64> {
        self.query = text.to_string();
        self.query_seq += 1;
        if text.chars().count() < MIN_QUERY_LEN {
            self.suggestions.clear();
            self.suggestions_visible = false;
            return None;
        }
        Some(self.query_seq)
    }

    /// Last-query-wins: results of anything but the most recently issued
    /// query are discarded on arrival.
    fn apply_suggestions(&mut self, seq: u64, items: Vec<PlaceSuggestion>) -> bool {
        if seq != self.query_seq {
            return false;
        }
        self.suggestions = items;
        self.suggestions_visible = true;
        true
    }
}

/// Orchestrates the entry form, the selected suggestion and the map
/// marker, and owns the create/edit/delete lifecycle.
///
/// A cheap clonable handle over shared state; gateway calls are the only
/// suspension points and no borrow is held across them.
pub struct EntryEditor<R, P> {
    records: Rc<R>,
    places: Rc<P>,
    state: Rc<RefCell<EditorState>>,
    subscribers: Rc<Subscribers>,
    mutation_listeners: Rc<Subscribers>,
}

impl<R, P> Clone for EntryEditor<R, P> {
    fn clone(&self) -> Self {
        Self {
            records: Rc::clone(&self.records),
            places: Rc::clone(&self.places),
            state: Rc::clone(&self.state),
            subscribers: Rc::clone(&self.subscribers),
            mutation_listeners: Rc::clone(&self.mutation_listeners),
        }
    }
}

impl<R, P> EntryEditor<R, P>
where
    R: RecordsGateway,
    P: PlacesGateway,
{
    pub fn new(records: Rc<R>, places: Rc<P>) -> Self {
        Self {
            records,
            places,
            state: Rc::default(),
            subscribers: Rc::default(),
            mutation_listeners: Rc::default(),
        }
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) {
        self.subscribers.subscribe(callback);
    }

    /// Fires after every successful create, update, delete or photo
    /// upload; the list controller hooks its refresh in here.
    pub fn on_records_mutated(&self, callback: impl Fn() + 'static) {
        self.mutation_listeners.subscribe(callback);
    }

    #[must_use]
    pub fn snapshot(&self) -> EditorState {
        self.state.borrow().clone()
    }

    fn update<T>(&self, mutate: impl FnOnce(&mut EditorState) -> T) -> T {
        let value = mutate(&mut self.state.borrow_mut());
        self.subscribers.notify();
        value
    }

    pub fn start_create(&self) {
        self.update(|st| {
            st.reset_for_create();
            st.phase = EditorPhase::Creating;
        });
    }

    pub fn start_edit(&self, record: &TravelRecord) {
        self.update(|st| {
            st.load_record(record);
            st.phase = EditorPhase::Editing;
        });
    }

    /// Discards the draft.
    pub fn cancel(&self) {
        self.update(|st| {
            st.reset_for_create();
            st.phase = EditorPhase::Idle;
        });
    }

    /// The map is the source of truth for coordinates whenever the user
    /// interacts with it directly.
    pub fn on_map_move(&self, lat: f64, lng: f64) {
        self.update(|st| st.set_coordinates(lat, lng));
    }

    /// Form field mutation from the view layer.
    pub fn update_draft(&self, mutate: impl FnOnce(&mut EditorDraft)) {
        self.update(|st| mutate(&mut st.draft));
    }

    pub async fn search(&self, text: &str) {
        let Some(seq) = self.update(|st| st.begin_query(text)) else {
            return;
        };
        match self.places.autocomplete(text, None).await {
            Ok(items) => {
                let applied = self.update(|st| st.apply_suggestions(seq, items));
                if !applied {
                    log::debug!("Discarding stale suggestions for {text:?}");
                }
            }
            Err(err) => {
                log::warn!("Unable to fetch place suggestions: {err}");
            }
        }
    }

    pub async fn pick_suggestion(&self, suggestion: &PlaceSuggestion) {
        self.update(|st| {
            st.suggestions_visible = false;
            st.query = suggestion.description.clone();
        });
        match self.places.details(&suggestion.place_id).await {
            Ok(details) => {
                self.update(|st| st.apply_place_details(&details));
            }
            Err(err) => {
                log::warn!("Unable to resolve place {}: {err}", suggestion.place_id);
                self.update(|st| st.last_error = Some(err));
            }
        }
    }

    /// No-op while no draft is open, while another save is in flight, or
    /// while the draft fails validation. Otherwise issues a create or an
    /// update depending on the mode the draft was opened in.
    pub async fn save(&self) {
        let pending = self.update(|st| {
            if !matches!(st.phase, EditorPhase::Creating | EditorPhase::Editing) {
                return None;
            }
            if let Some(violation) = st.validation() {
                log::debug!("Draft not saved: {violation}");
                return None;
            }
            st.phase = EditorPhase::Saving;
            st.last_error = None;
            Some((st.draft.editing_id, st.draft.to_payload()))
        });
        let Some((editing_id, payload)) = pending else {
            return;
        };
        let result = match editing_id {
            Some(id) => self.records.update(id, &payload).await,
            None => self.records.create(&payload).await,
        };
        match result {
            Ok(record) => {
                log::debug!("Saved record {}", record.id);
                self.update(|st| {
                    st.reset_for_create();
                    st.phase = EditorPhase::Idle;
                });
                self.mutation_listeners.notify();
            }
            Err(err) => {
                log::warn!("Unable to save record: {err}");
                self.update(|st| {
                    st.phase = if editing_id.is_some() {
                        EditorPhase::Editing
                    } else {
                        EditorPhase::Creating
                    };
                    st.last_error = Some(err);
                });
            }
        }
    }

    /// Deleting is irreversible: without the caller-supplied confirmation
    /// no request is issued.
    pub async fn remove(&self, id: i64, confirmed: bool) {
        if !confirmed {
            log::debug!("Deletion of record {id} not confirmed");
            return;
        }
        match self.records.remove(id).await {
            Ok(()) => {
                self.mutation_listeners.notify();
            }
            Err(err) => {
                log::warn!("Unable to delete record {id}: {err}");
                self.update(|st| st.last_error = Some(err));
            }
        }
    }

    pub async fn upload_photo(&self, id: i64, file: &R::PhotoSource) {
        match self.records.upload_photo(id, file).await {
            Ok(photo) => {
                log::debug!("Attached photo {} to record {id}", photo.id);
                self.mutation_listeners.notify();
            }
            Err(err) => {
                log::warn!("Unable to upload photo for record {id}: {err}");
                self.update(|st| st.last_error = Some(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::{
        channel::oneshot,
        executor::{block_on, LocalPool},
        task::LocalSpawnExt,
    };

    use crate::{
        gateways::RecordsGateway as _,
        testing::{details, record, suggestion, FakePlaces, FakeRecords},
    };

    use super::*;

    fn editor(
        records: Rc<FakeRecords>,
        places: Rc<FakePlaces>,
    ) -> EntryEditor<FakeRecords, FakePlaces> {
        EntryEditor::new(records, places)
    }

    fn filled_draft(editor: &EntryEditor<FakeRecords, FakePlaces>) {
        editor.update_draft(|d| {
            d.title = "Louvre".into();
            d.country_code = "FR".into();
            d.city = "Paris".into();
            d.latitude = 48.86;
            d.longitude = 2.33;
            d.visited_at = "2024-05-01T10:00:00Z".into();
        });
    }

    #[test]
    fn start_create_resets_draft_and_map() {
        let ed = editor(Rc::default(), Rc::default());
        ed.on_map_move(12.0, 34.0);
        ed.start_create();

        let st = ed.snapshot();
        assert_eq!(st.phase, EditorPhase::Creating);
        assert_eq!(st.draft.editing_id, None);
        assert_eq!(st.draft.rating, DEFAULT_RATING);
        assert_eq!(st.draft.destination_type, DestinationType::City);
        assert_eq!((st.draft.latitude, st.draft.longitude), (0.0, 0.0));
        assert_eq!(st.map_center, MapPoint::default());
        assert!(!st.draft.visited_at.is_empty());
    }

    #[test]
    fn start_edit_loads_record_and_centers_map() {
        let existing = record(7, "Sahara trip", "MA", 31.1, -4.0);
        let ed = editor(Rc::default(), Rc::default());
        ed.start_edit(&existing);

        let st = ed.snapshot();
        assert_eq!(st.phase, EditorPhase::Editing);
        assert_eq!(st.draft.editing_id, Some(7));
        assert_eq!(st.draft.title, "Sahara trip");
        assert_eq!(st.map_center, MapPoint { lat: 31.1, lng: -4.0 });
        assert_eq!(st.draft.visited_at, "2023-11-20T08:30:00Z");
    }

    #[test]
    fn bad_stored_data_is_loaded_but_blocks_resaving() {
        let mut existing = record(7, "Sahara trip", "MA", 31.1, -4.0);
        existing.rating = 0;
        let records = Rc::new(FakeRecords::with_records(vec![existing.clone()]));
        let ed = editor(Rc::clone(&records), Rc::default());
        ed.start_edit(&existing);

        assert_eq!(ed.snapshot().validation(), Some(DraftInvalidation::Rating));
        block_on(ed.save());
        assert_eq!(records.updates.get(), 0);
        assert_eq!(ed.snapshot().phase, EditorPhase::Editing);

        ed.update_draft(|d| d.rating = 4);
        block_on(ed.save());
        assert_eq!(records.updates.get(), 1);
    }

    #[test]
    fn short_query_clears_suggestions_without_a_request() {
        let places = Rc::new(FakePlaces::default());
        places.suggestions.borrow_mut().push(suggestion("x"));
        let ed = editor(Rc::default(), Rc::clone(&places));
        ed.start_create();

        block_on(ed.search("pa"));
        assert!(ed.snapshot().suggestions_visible);

        block_on(ed.search("p"));
        let st = ed.snapshot();
        assert!(st.suggestions.is_empty());
        assert!(!st.suggestions_visible);
        assert_eq!(places.autocomplete_calls.get(), 1);
    }

    #[test]
    fn stale_autocomplete_response_is_discarded() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let (older_tx, older_rx) = oneshot::channel();
        let (newer_tx, newer_rx) = oneshot::channel();
        let places = Rc::new(FakePlaces::default());
        places.scripted.borrow_mut().push_back(older_rx);
        places.scripted.borrow_mut().push_back(newer_rx);

        let ed = editor(Rc::default(), places);
        ed.start_create();

        let first = ed.clone();
        spawner
            .spawn_local(async move { first.search("par").await })
            .unwrap();
        let second = ed.clone();
        spawner
            .spawn_local(async move { second.search("pari").await })
            .unwrap();
        pool.run_until_stalled();

        // The newer query resolves first, the older one afterwards.
        newer_tx.send(vec![suggestion("pari-1")]).unwrap();
        pool.run_until_stalled();
        older_tx.send(vec![suggestion("par-1")]).unwrap();
        pool.run_until_stalled();

        let st = ed.snapshot();
        assert!(st.suggestions_visible);
        assert_eq!(st.suggestions, vec![suggestion("pari-1")]);
    }

    #[test]
    fn pick_suggestion_patches_draft_and_map_atomically() {
        let places = Rc::new(FakePlaces::default());
        *places.details.borrow_mut() = Some(details("Louvre", Some("fr"), Some("Paris")));
        let ed = editor(Rc::default(), places);
        ed.start_create();

        block_on(ed.pick_suggestion(&suggestion("abc")));

        let st = ed.snapshot();
        assert!(!st.suggestions_visible);
        assert_eq!(st.query, "suggestion abc");
        assert_eq!(st.draft.title, "Louvre");
        assert_eq!(st.draft.country_code, "FR");
        assert_eq!(st.draft.city, "Paris");
        assert_eq!((st.draft.latitude, st.draft.longitude), (48.86, 2.33));
        assert_eq!(st.map_center, MapPoint { lat: 48.86, lng: 2.33 });
        assert_eq!(st.draft.place_external_id, "abc");
    }

    #[test]
    fn place_details_without_title_keep_the_drafted_one() {
        let places = Rc::new(FakePlaces::default());
        *places.details.borrow_mut() = Some(details("", None, None));
        let ed = editor(Rc::default(), places);
        ed.start_create();
        ed.update_draft(|d| d.title = "My trip".into());

        block_on(ed.pick_suggestion(&suggestion("abc")));

        let st = ed.snapshot();
        assert_eq!(st.draft.title, "My trip");
        assert_eq!(st.draft.country_code, DEFAULT_COUNTRY_CODE);
    }

    #[test]
    fn save_normalizes_the_country_code() {
        let records = Rc::new(FakeRecords::default());
        let ed = editor(Rc::clone(&records), Rc::default());
        ed.start_create();
        filled_draft(&ed);
        ed.update_draft(|d| d.country_code = "us".into());

        block_on(ed.save());

        assert_eq!(records.creates.get(), 1);
        let stored = records.store.borrow().values().next().unwrap().clone();
        assert_eq!(stored.country_code, "US");
    }

    #[test]
    fn malformed_country_codes_never_reach_the_gateway() {
        let records = Rc::new(FakeRecords::default());
        let ed = editor(Rc::clone(&records), Rc::default());
        ed.start_create();
        for code in ["usa", "u5", ""] {
            filled_draft(&ed);
            ed.update_draft(|d| d.country_code = code.into());
            block_on(ed.save());
        }
        assert_eq!(records.creates.get(), 0);
    }

    #[test]
    fn successful_create_resets_and_notifies_once() {
        let records = Rc::new(FakeRecords::default());
        let ed = editor(Rc::clone(&records), Rc::default());
        let refreshes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&refreshes);
        ed.on_records_mutated(move || counter.set(counter.get() + 1));

        ed.start_create();
        filled_draft(&ed);
        block_on(ed.save());

        let st = ed.snapshot();
        assert_eq!(st.phase, EditorPhase::Idle);
        assert_eq!(st.draft.rating, DEFAULT_RATING);
        assert_eq!((st.draft.latitude, st.draft.longitude), (0.0, 0.0));
        assert_eq!(st.map_center, MapPoint::default());
        assert_eq!(refreshes.get(), 1);
    }

    #[test]
    fn failed_save_preserves_the_draft_and_surfaces_the_error() {
        let records = Rc::new(FakeRecords::default());
        *records.fail_next.borrow_mut() =
            Some(GatewayError::Transport("connection reset".into()));
        let ed = editor(Rc::clone(&records), Rc::default());
        let refreshes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&refreshes);
        ed.on_records_mutated(move || counter.set(counter.get() + 1));

        ed.start_create();
        filled_draft(&ed);
        block_on(ed.save());

        let st = ed.snapshot();
        assert_eq!(st.phase, EditorPhase::Creating);
        assert_eq!(st.draft.title, "Louvre");
        assert_eq!(
            st.last_error,
            Some(GatewayError::Transport("connection reset".into()))
        );
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn no_second_save_while_one_is_in_flight() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let (release, gate) = oneshot::channel();
        let records = Rc::new(FakeRecords::default());
        *records.gate.borrow_mut() = Some(gate);

        let ed = editor(Rc::clone(&records), Rc::default());
        ed.start_create();
        filled_draft(&ed);

        let first = ed.clone();
        spawner
            .spawn_local(async move { first.save().await })
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(ed.snapshot().phase, EditorPhase::Saving);

        let second = ed.clone();
        spawner
            .spawn_local(async move { second.save().await })
            .unwrap();
        pool.run_until_stalled();

        release.send(()).unwrap();
        pool.run_until_stalled();

        assert_eq!(records.creates.get(), 1);
        assert_eq!(ed.snapshot().phase, EditorPhase::Idle);
    }

    #[test]
    fn remove_requires_confirmation() {
        let records = Rc::new(FakeRecords::with_records(vec![record(
            7,
            "Sahara trip",
            "MA",
            31.1,
            -4.0,
        )]));
        let ed = editor(Rc::clone(&records), Rc::default());
        let refreshes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&refreshes);
        ed.on_records_mutated(move || counter.set(counter.get() + 1));

        block_on(ed.remove(7, false));
        assert_eq!(records.removes.get(), 0);
        assert_eq!(refreshes.get(), 0);

        block_on(ed.remove(7, true));
        assert_eq!(records.removes.get(), 1);
        assert_eq!(refreshes.get(), 1);
        assert!(records.store.borrow().is_empty());
    }

    #[test]
    fn deleting_a_missing_record_surfaces_not_found() {
        let records = Rc::new(FakeRecords::default());
        let ed = editor(Rc::clone(&records), Rc::default());
        block_on(ed.remove(99, true));
        assert_eq!(ed.snapshot().last_error, Some(GatewayError::NotFound));
    }

    #[test]
    fn photo_upload_triggers_a_refresh() {
        let records = Rc::new(FakeRecords::with_records(vec![record(
            7,
            "Sahara trip",
            "MA",
            31.1,
            -4.0,
        )]));
        let ed = editor(Rc::clone(&records), Rc::default());
        let refreshes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&refreshes);
        ed.on_records_mutated(move || counter.set(counter.get() + 1));

        block_on(ed.upload_photo(7, &"camel.jpg".to_string()));

        assert_eq!(refreshes.get(), 1);
        let stored = records.store.borrow()[&7].clone();
        assert_eq!(stored.photo.unwrap().file_path, "/uploads/7/camel.jpg");
    }

    #[test]
    fn map_move_updates_draft_and_map_in_lock_step() {
        let ed = editor(Rc::default(), Rc::default());
        ed.start_create();
        ed.on_map_move(48.86, 2.33);

        let st = ed.snapshot();
        assert_eq!((st.draft.latitude, st.draft.longitude), (48.86, 2.33));
        assert_eq!(st.map_center, MapPoint { lat: 48.86, lng: 2.33 });
    }

    #[test]
    fn created_record_can_be_fetched_back_unchanged() {
        let records = Rc::new(FakeRecords::default());
        let ed = editor(Rc::clone(&records), Rc::default());
        ed.start_create();
        filled_draft(&ed);
        ed.update_draft(|d| {
            d.notes = "crowded but worth it".into();
            d.destination_type = DestinationType::Museum;
            d.rating = 4;
        });
        let payload = ed.snapshot().draft.to_payload();

        block_on(ed.save());

        let fetched = block_on(records.get(1)).unwrap();
        assert_eq!(fetched.id, 1);
        assert_eq!(fetched.title, payload.title);
        assert_eq!(fetched.notes, payload.notes);
        assert_eq!(fetched.country_code, payload.country_code);
        assert_eq!(fetched.city, payload.city);
        assert_eq!(fetched.latitude, payload.latitude);
        assert_eq!(fetched.longitude, payload.longitude);
        assert_eq!(fetched.destination_type, payload.destination_type);
        assert_eq!(fetched.rating, payload.rating);
        assert_eq!(fetched.visited_at, payload.visited_at);
    }
}
