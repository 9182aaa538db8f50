use std::rc::Rc;

use leptos::{ev, *};
use web_sys::File;

use waylog_boundary::{DestinationType, MapPoint, PlaceSuggestion, TravelRecord};
use waylog_core::{
    editor::{EditorPhase, EntryEditor},
    list::{ListState, RecordList, DEFAULT_PAGE_SIZE},
    util::sort::SortKey,
};
use waylog_frontend_api::UserApi;

use crate::{api::Gateway, components::*};

const INPUT_CLASS: &str = "block w-full px-3 py-1.5 text-base font-normal text-gray-700 \
     bg-white border border-solid border-gray-300 rounded focus:outline-none";
const ROW_BUTTON_CLASS: &str = "rounded bg-white px-2.5 py-1 text-sm font-semibold \
     text-gray-900 shadow-sm ring-1 ring-inset ring-gray-300 hover:bg-gray-50";

#[component]
pub fn Entries(user_api: Signal<Option<UserApi>>) -> impl IntoView {
    move || match user_api.get() {
        Some(api) => view! { <EntriesView user_api = api /> }.into_view(),
        None => view! {
          <p class="p-6 text-gray-500">"Please log in to manage your entries."</p>
        }
        .into_view(),
    }
}

#[component]
fn EntriesView(user_api: UserApi) -> impl IntoView {
    // -- controllers -- //

    let gateway = Rc::new(Gateway::new(user_api));
    let editor = EntryEditor::new(Rc::clone(&gateway), Rc::clone(&gateway));
    let list = RecordList::new(gateway, DEFAULT_PAGE_SIZE);

    // -- signals -- //

    let editor_state = RwSignal::new(editor.snapshot());
    {
        let mirror = editor.clone();
        editor.subscribe(move || editor_state.set(mirror.snapshot()));
    }
    let list_state = RwSignal::new(list.snapshot());
    {
        let mirror = list.clone();
        list.subscribe(move || list_state.set(mirror.snapshot()));
    }

    // Every successful mutation re-fetches the current page.
    {
        let list = list.clone();
        editor.on_records_mutated(move || {
            let list = list.clone();
            spawn_local(async move { list.refresh().await });
        });
    }

    // -- actions -- //

    let search_action = {
        let editor = editor.clone();
        Action::new(move |text: &String| {
            let editor = editor.clone();
            let text = text.clone();
            async move { editor.search(&text).await }
        })
    };

    let pick_action = {
        let editor = editor.clone();
        Action::new(move |suggestion: &PlaceSuggestion| {
            let editor = editor.clone();
            let suggestion = suggestion.clone();
            async move { editor.pick_suggestion(&suggestion).await }
        })
    };

    let save_action = {
        let editor = editor.clone();
        Action::new(move |(): &()| {
            let editor = editor.clone();
            async move { editor.save().await }
        })
    };

    let remove_action = {
        let editor = editor.clone();
        Action::new(move |id: &i64| {
            let editor = editor.clone();
            let id = *id;
            // Irreversible, so ask before any request is issued.
            let confirmed = window()
                .confirm_with_message("Delete this entry?")
                .unwrap_or(false);
            async move { editor.remove(id, confirmed).await }
        })
    };

    let upload_action = {
        let editor = editor.clone();
        Action::new(move |(id, file): &(i64, File)| {
            let editor = editor.clone();
            let id = *id;
            let file = file.clone();
            async move { editor.upload_photo(id, &file).await }
        })
    };

    let sort_action = {
        let list = list.clone();
        Action::new(move |key: &SortKey| {
            let list = list.clone();
            let key = *key;
            async move { list.set_sort(key).await }
        })
    };

    let page_action = {
        let list = list.clone();
        Action::new(move |forward: &bool| {
            let list = list.clone();
            let forward = *forward;
            async move {
                if forward {
                    list.next_page().await;
                } else {
                    list.previous_page().await;
                }
            }
        })
    };

    // -- callbacks -- //

    let on_edit = {
        let editor = editor.clone();
        Callback::new(move |record: TravelRecord| editor.start_edit(&record))
    };
    let on_delete = Callback::new(move |id: i64| {
        remove_action.dispatch(id);
    });
    let on_upload = Callback::new(move |(id, file): (i64, File)| {
        upload_action.dispatch((id, file));
    });
    let on_coords_picked = {
        let editor = editor.clone();
        Callback::new(move |point: MapPoint| editor.on_map_move(point.lat, point.lng))
    };
    let on_new_entry = {
        let editor = editor.clone();
        move |_: ev::MouseEvent| editor.start_create()
    };
    let on_cancel = {
        let editor = editor.clone();
        move |_: ev::MouseEvent| editor.cancel()
    };

    // -- derived -- //

    let map_center = Signal::derive(move || editor_state.with(|st| st.map_center));
    let draft_open =
        Signal::derive(move || editor_state.with(|st| st.phase != EditorPhase::Idle));
    let save_disabled = Signal::derive(move || {
        editor_state.with(|st| st.phase == EditorPhase::Saving || st.validation().is_some())
    });

    // -- init -- //

    editor.start_create();
    {
        let list = list.clone();
        spawn_local(async move { list.refresh().await });
    }

    let ed = editor.clone();

    view! {
      <section class="container mx-auto max-w-5xl p-6">

        <Show
          when = move || draft_open.get()
          fallback = move || view! {
            <button
              class="mb-6 rounded bg-gray-900 px-4 py-2 text-sm font-medium text-white"
              on:click=on_new_entry.clone()
            >
              "New entry"
            </button>
          }
        >
          <div class="mb-8 rounded-lg bg-white p-6 shadow">
            <div class="mb-4 flex items-center justify-between">
              <h3 class="text-base font-semibold text-gray-900">
                {move || match editor_state.with(|st| st.draft.editing_id) {
                    Some(id) => format!("Edit entry #{id}"),
                    None => "New entry".to_string(),
                }}
              </h3>
              <button class="text-sm text-gray-500 hover:text-gray-700" on:click=on_cancel.clone()>
                "cancel"
              </button>
            </div>

            // Location search with autocomplete
            <div class="relative mb-4">
              <input
                type = "search"
                placeholder = "Search for a place"
                class = INPUT_CLASS
                prop:value = move || editor_state.with(|st| st.query.clone())
                on:input = move |ev| {
                  search_action.dispatch(event_target_value(&ev));
                }
              />
              <Show when = move || editor_state.with(|st| st.suggestions_visible)>
                <ul class="absolute z-10 w-full rounded border border-gray-200 bg-white shadow">
                  <For
                    each = move || editor_state.with(|st| st.suggestions.clone())
                    key = |suggestion| suggestion.place_id.clone()
                    children = move |suggestion: PlaceSuggestion| {
                        let description = suggestion.description.clone();
                        view! {
                          <li
                            class="cursor-pointer px-3 py-2 hover:bg-gray-50"
                            on:click = move |_| pick_action.dispatch(suggestion.clone())
                          >
                            { description }
                          </li>
                        }
                    }
                  />
                </ul>
              </Show>
            </div>

            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
              <label class="block">
                <span class="text-sm text-gray-600">"Title"</span>
                <input
                  type = "text"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.title.clone())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      ed.update_draft(|d| d.title = value);
                    }
                  }
                />
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Country code"</span>
                <input
                  type = "text"
                  maxlength = "2"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.country_code.clone())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      ed.update_draft(|d| d.country_code = value);
                    }
                  }
                />
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"City"</span>
                <input
                  type = "text"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.city.clone())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      ed.update_draft(|d| d.city = value);
                    }
                  }
                />
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Region"</span>
                <input
                  type = "text"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.region.clone())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      ed.update_draft(|d| d.region = value);
                    }
                  }
                />
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Type"</span>
                <select
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.destination_type.label())
                  on:change = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      let Some(dest_type) = DestinationType::ALL
                          .into_iter()
                          .find(|d| d.label() == value)
                      else {
                          return;
                      };
                      ed.update_draft(|d| d.destination_type = dest_type);
                    }
                  }
                >
                  { DestinationType::ALL
                      .iter()
                      .map(|d| view! { <option value = d.label()>{ d.label() }</option> })
                      .collect_view()
                  }
                </select>
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Rating"</span>
                <select
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.rating.to_string())
                  on:change = {
                    let ed = ed.clone();
                    move |ev| {
                      let Ok(rating) = event_target_value(&ev).parse() else {
                          return;
                      };
                      ed.update_draft(|d| d.rating = rating);
                    }
                  }
                >
                  { (1..=5u8)
                      .map(|r| view! { <option value = r.to_string()>{ r.to_string() }</option> })
                      .collect_view()
                  }
                </select>
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Latitude"</span>
                <input
                  type = "number"
                  step = "any"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.latitude.to_string())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let Ok(lat) = event_target_value(&ev).parse() else {
                          return;
                      };
                      ed.update_draft(|d| d.latitude = lat);
                    }
                  }
                />
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Longitude"</span>
                <input
                  type = "number"
                  step = "any"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.longitude.to_string())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let Ok(lng) = event_target_value(&ev).parse() else {
                          return;
                      };
                      ed.update_draft(|d| d.longitude = lng);
                    }
                  }
                />
              </label>
              <label class="block">
                <span class="text-sm text-gray-600">"Visited at"</span>
                <input
                  type = "datetime-local"
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| {
                      st.draft.visited_at.get(..16).map(str::to_string).unwrap_or_default()
                  })
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      // `datetime-local` values carry no seconds or zone.
                      let value = if value.len() == 16 {
                          format!("{value}:00Z")
                      } else {
                          value
                      };
                      ed.update_draft(|d| d.visited_at = value);
                    }
                  }
                />
              </label>
              <label class="block sm:col-span-2">
                <span class="text-sm text-gray-600">"Notes"</span>
                <textarea
                  class = INPUT_CLASS
                  prop:value = move || editor_state.with(|st| st.draft.notes.clone())
                  on:input = {
                    let ed = ed.clone();
                    move |ev| {
                      let value = event_target_value(&ev);
                      ed.update_draft(|d| d.notes = value);
                    }
                  }
                ></textarea>
              </label>
            </div>

            <div class="mt-4">
              <Map center = map_center on_coords_picked />
            </div>

            <div class="mt-4 flex items-center justify-between">
              <div class="text-sm">
                {move || editor_state.with(|st| st.validation().map(|violation| view! {
                  <p class="text-gray-500">{ violation.to_string() }</p>
                }))}
                {move || editor_state.with(|st| st.last_error.clone().map(|err| view! {
                  <p class="text-red-700">{ err.to_string() }</p>
                }))}
              </div>
              <button
                class="rounded bg-gray-900 px-4 py-2 text-sm font-medium text-white disabled:bg-gray-400"
                prop:disabled = move || save_disabled.get()
                on:click = move |_| save_action.dispatch(())
              >
                {move || if editor_state.with(|st| st.phase == EditorPhase::Saving) {
                    "Saving..."
                } else {
                    "Save"
                }}
              </button>
            </div>
          </div>
        </Show>

        <div class="overflow-hidden rounded-lg bg-white shadow">
          <table class="w-full text-sm">
            <thead class="border-b border-gray-200 bg-gray-50 text-gray-600">
              <tr>
                <SortHeader label = "Title" key = SortKey::Title sort_action />
                <th class="px-3 py-2 text-left">"Country"</th>
                <th class="px-3 py-2 text-left">"City"</th>
                <SortHeader label = "Rating" key = SortKey::Rating sort_action />
                <SortHeader label = "Visited" key = SortKey::VisitedAt sort_action />
                <th class="px-3 py-2 text-left">"Photo"</th>
                <th class="px-3 py-2"></th>
              </tr>
            </thead>
            <tbody>
              <For
                each = move || list_state.with(|st| st.items.clone())
                key = |record| (record.id, record.updated_at)
                children = move |record: TravelRecord| view! {
                  <EntryRow record on_edit on_delete on_upload />
                }
              />
            </tbody>
          </table>
          <Show when = move || list_state.with(|st| st.loading)>
            <p class="p-3 text-gray-500">"Loading..."</p>
          </Show>
          {move || list_state.with(|st| st.last_error.clone().map(|err| view! {
            <p class="p-3 text-red-700">{ err.to_string() }</p>
          }))}
          <div class="flex items-center justify-between border-t border-gray-100 p-3">
            <button
              class = ROW_BUTTON_CLASS
              prop:disabled = move || !list_state.with(ListState::has_previous_page)
              on:click = move |_| { page_action.dispatch(false); }
            >
              "previous"
            </button>
            <p class="text-sm text-gray-500">
              {move || list_state.with(|st| format!("{} entries", st.total))}
            </p>
            <button
              class = ROW_BUTTON_CLASS
              prop:disabled = move || !list_state.with(ListState::has_next_page)
              on:click = move |_| { page_action.dispatch(true); }
            >
              "next"
            </button>
          </div>
        </div>
      </section>
    }
}

#[component]
fn SortHeader(
    label: &'static str,
    key: SortKey,
    sort_action: Action<SortKey, ()>,
) -> impl IntoView {
    view! {
      <th class="px-3 py-2 text-left">
        <button
          class="font-semibold hover:text-gray-900"
          on:click = move |_| { sort_action.dispatch(key); }
        >
          { label }
        </button>
      </th>
    }
}

#[component]
fn EntryRow(
    record: TravelRecord,
    on_edit: Callback<TravelRecord>,
    on_delete: Callback<i64>,
    on_upload: Callback<(i64, File)>,
) -> impl IntoView {
    let id = record.id;
    let visited = record.visited_at.date().to_string();
    let has_photo = record.photo.is_some();
    let for_edit = record.clone();

    view! {
      <tr class="border-b border-gray-100">
        <td class="px-3 py-2 font-medium text-gray-900">{ record.title.clone() }</td>
        <td class="px-3 py-2">{ record.country_code.clone() }</td>
        <td class="px-3 py-2">{ record.city.clone().unwrap_or_default() }</td>
        <td class="px-3 py-2">{ format!("{}/5", record.rating) }</td>
        <td class="px-3 py-2">{ visited }</td>
        <td class="px-3 py-2">{ if has_photo { "yes" } else { "" } }</td>
        <td class="space-x-2 px-3 py-2 text-right">
          <button class = ROW_BUTTON_CLASS on:click = move |_| on_edit.call(for_edit.clone())>
            "edit"
          </button>
          <button class = ROW_BUTTON_CLASS on:click = move |_| on_delete.call(id)>
            "delete"
          </button>
          <label class = ROW_BUTTON_CLASS>
            "photo"
            <input
              type = "file"
              accept = "image/*"
              class = "hidden"
              on:change = move |ev| {
                let input = event_target::<web_sys::HtmlInputElement>(&ev);
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                on_upload.call((id, file));
              }
            />
          </label>
        </td>
      </tr>
    }
}
