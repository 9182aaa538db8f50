use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use leaflet::{LatLng, MapOptions, Marker, MouseEvent, TileLayer};
use leptos::{html::Div, *};
use wasm_bindgen::{prelude::Closure, JsCast};

use waylog_boundary::MapPoint;

const TILE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_ZOOM: f64 = 12.0;

/// One leaflet map with a single marker. Coordinates are owned by the
/// caller: clicks are emitted upward, external changes come in through
/// [`Self::on_state_change`].
pub struct MapWidget {
    map: leaflet::Map,
    marker: Marker,
    _on_click: Closure<dyn FnMut(MouseEvent)>,
    _on_resize: EventListener,
}

impl MapWidget {
    pub fn init(
        container: &web_sys::HtmlElement,
        center: MapPoint,
        on_picked: impl Fn(MapPoint) + 'static,
    ) -> Self {
        let map = leaflet::Map::new_with_element(container, &MapOptions::default());
        map.set_view(&LatLng::new(center.lat, center.lng), DEFAULT_ZOOM);
        TileLayer::new(TILE_LAYER_URL).add_to(&map);

        let marker = Marker::new(&LatLng::new(center.lat, center.lng));
        marker.add_to(&map);

        let on_click = Closure::<dyn FnMut(MouseEvent)>::new({
            let marker = marker.clone();
            move |ev: MouseEvent| {
                let latlng = ev.lat_lng();
                marker.set_lat_lng(&latlng);
                on_picked(MapPoint {
                    lat: latlng.lat(),
                    lng: latlng.lng(),
                });
            }
        });
        map.on("click", on_click.as_ref().unchecked_ref());

        // The container may mount before the surrounding layout has been
        // flushed; without a recalculation the map renders at zero size.
        // Both triggers are idempotent.
        let mounted = map.clone();
        Timeout::new(0, move || mounted.invalidate_size(true)).forget();
        let resized = map.clone();
        let on_resize = EventListener::new(&window(), "resize", move |_| {
            resized.invalidate_size(true);
        });

        Self {
            map,
            marker,
            _on_click: on_click,
            _on_resize: on_resize,
        }
    }

    /// Re-centers the view and repositions the marker without recreating
    /// the map instance.
    pub fn on_state_change(&self, center: MapPoint) {
        let latlng = LatLng::new(center.lat, center.lng);
        self.map.set_view(&latlng, self.map.get_zoom());
        self.marker.set_lat_lng(&latlng);
    }

    /// Releases the map instance; the click closure and the resize
    /// listener go down with the widget.
    pub fn dispose(self) {
        self.map.remove();
    }
}

#[component]
pub fn Map(center: Signal<MapPoint>, on_coords_picked: Callback<MapPoint>) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let widget = Rc::new(RefCell::new(None::<MapWidget>));

    {
        let widget = Rc::clone(&widget);
        Effect::new(move |_| {
            let Some(el) = node.get() else {
                return;
            };
            if widget.borrow().is_some() {
                return;
            }
            log::debug!("Mounting the leaflet map");
            let mounted = MapWidget::init(&el, center.get_untracked(), move |point| {
                on_coords_picked.call(point);
            });
            *widget.borrow_mut() = Some(mounted);
        });
    }
    {
        let widget = Rc::clone(&widget);
        Effect::new(move |_| {
            let center = center.get();
            if let Some(widget) = widget.borrow().as_ref() {
                widget.on_state_change(center);
            }
        });
    }
    {
        let widget = Rc::clone(&widget);
        on_cleanup(move || {
            if let Some(widget) = widget.borrow_mut().take() {
                log::debug!("Disposing the leaflet map");
                widget.dispose();
            }
        });
    }

    view! {
      <div node_ref=node class="h-72 w-full rounded-lg border border-gray-200"></div>
    }
}
