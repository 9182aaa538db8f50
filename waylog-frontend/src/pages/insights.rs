use std::rc::Rc;

use leptos::*;

use waylog_boundary::{AvgRatingByCountry, TopDestinationPerMonth, TravelRecord};
use waylog_core::{list::RecordList, util::sort::SortKey};
use waylog_frontend_api::UserApi;

use crate::api::Gateway;

const INSIGHTS_PAGE_SIZE: u64 = 100;

#[component]
pub fn Insights(user_api: Signal<Option<UserApi>>) -> impl IntoView {
    move || match user_api.get() {
        Some(api) => view! { <InsightsView user_api = api /> }.into_view(),
        None => view! {
          <p class="p-6 text-gray-500">"Please log in to browse your insights."</p>
        }
        .into_view(),
    }
}

#[component]
fn InsightsView(user_api: UserApi) -> impl IntoView {
    // -- signals -- //

    let avg = create_rw_signal(None::<Vec<AvgRatingByCountry>>);
    let top = create_rw_signal(None::<Vec<TopDestinationPerMonth>>);

    // -- controllers -- //

    let gateway = Rc::new(Gateway::new(user_api.clone()));
    let list = RecordList::new(gateway, INSIGHTS_PAGE_SIZE);
    let list_state = RwSignal::new(list.snapshot());
    {
        let mirror = list.clone();
        list.subscribe(move || list_state.set(mirror.snapshot()));
    }

    // -- actions -- //

    let fetch_avg = {
        let api = user_api.clone();
        create_action(move |(): &()| {
            let api = api.clone();
            async move {
                match api.avg_rating_by_country().await {
                    Ok(rows) => avg.update(|v| *v = Some(rows)),
                    Err(err) => log::warn!("Unable to fetch rating averages: {err}"),
                }
            }
        })
    };

    let fetch_top = {
        let api = user_api;
        create_action(move |(): &()| {
            let api = api.clone();
            async move {
                match api.top_destination_per_month().await {
                    Ok(rows) => top.update(|v| *v = Some(rows)),
                    Err(err) => log::warn!("Unable to fetch top destinations: {err}"),
                }
            }
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

    // -- init -- //

    fetch_avg.dispatch(());
    fetch_top.dispatch(());
    {
        let list = list.clone();
        spawn_local(async move { list.refresh().await });
    }

    // -- memos -- //

    let memorized_avg = create_memo(move |_| avg.get());
    let memorized_top = create_memo(move |_| top.get());

    view! {
      <section class="container mx-auto max-w-5xl p-6">
        <div class="grid grid-cols-1 gap-6 lg:grid-cols-2">

          <div class="overflow-hidden rounded-lg bg-white shadow">
            <div class="border-b border-gray-200 px-4 py-3">
              <h3 class="text-base font-semibold text-gray-900">"Average rating per country"</h3>
            </div>
            {move || match memorized_avg.get() {
                Some(rows) => view! {
                  <table class="w-full text-sm">
                    <thead class="bg-gray-50 text-gray-600">
                      <tr>
                        <th class="px-3 py-2 text-left">"Country"</th>
                        <th class="px-3 py-2 text-left">"Average"</th>
                        <th class="px-3 py-2 text-left">"Entries"</th>
                      </tr>
                    </thead>
                    <tbody>
                      <For
                        each = move || rows.clone()
                        key = |row| row.key.clone()
                        let:row
                      >
                        <tr class="border-t border-gray-100">
                          <td class="px-3 py-2 font-medium">{ row.key.clone() }</td>
                          <td class="px-3 py-2">{ format!("{:.1}", row.avg_rating) }</td>
                          <td class="px-3 py-2">{ row.count }</td>
                        </tr>
                      </For>
                    </tbody>
                  </table>
                }.into_view(),
                None => view! {
                  <p class="p-4 text-gray-500">"No data yet."</p>
                }.into_view(),
              }
            }
          </div>

          <div class="overflow-hidden rounded-lg bg-white shadow">
            <div class="border-b border-gray-200 px-4 py-3">
              <h3 class="text-base font-semibold text-gray-900">"Top destination per month"</h3>
            </div>
            {move || match memorized_top.get() {
                Some(rows) => view! {
                  <table class="w-full text-sm">
                    <thead class="bg-gray-50 text-gray-600">
                      <tr>
                        <th class="px-3 py-2 text-left">"Month"</th>
                        <th class="px-3 py-2 text-left">"Destination"</th>
                        <th class="px-3 py-2 text-left">"Rating"</th>
                      </tr>
                    </thead>
                    <tbody>
                      <For
                        each = move || rows.clone()
                        key = |row| row.month.clone()
                        let:row
                      >
                        <tr class="border-t border-gray-100">
                          <td class="px-3 py-2">{ row.month.clone() }</td>
                          <td class="px-3 py-2 font-medium">
                            { row.title.clone() }
                            <span class="text-gray-500">
                              { format!(
                                  " ({}{})",
                                  row.city.clone().map(|c| format!("{c}, ")).unwrap_or_default(),
                                  row.country_code,
                              )}
                            </span>
                          </td>
                          <td class="px-3 py-2">{ format!("{}/5", row.rating) }</td>
                        </tr>
                      </For>
                    </tbody>
                  </table>
                }.into_view(),
                None => view! {
                  <p class="p-4 text-gray-500">"No data yet."</p>
                }.into_view(),
              }
            }
          </div>
        </div>

        <div class="mt-6 overflow-hidden rounded-lg bg-white shadow">
          <div class="border-b border-gray-200 px-4 py-3">
            <h3 class="text-base font-semibold text-gray-900">"All records"</h3>
          </div>
          <table class="w-full text-sm">
            <thead class="bg-gray-50 text-gray-600">
              <tr>
                <th class="px-3 py-2 text-left">
                  <button
                    class="font-semibold hover:text-gray-900"
                    on:click = move |_| { sort_action.dispatch(SortKey::Title); }
                  >
                    "Title"
                  </button>
                </th>
                <th class="px-3 py-2 text-left">"Country"</th>
                <th class="px-3 py-2 text-left">
                  <button
                    class="font-semibold hover:text-gray-900"
                    on:click = move |_| { sort_action.dispatch(SortKey::Rating); }
                  >
                    "Rating"
                  </button>
                </th>
                <th class="px-3 py-2 text-left">
                  <button
                    class="font-semibold hover:text-gray-900"
                    on:click = move |_| { sort_action.dispatch(SortKey::VisitedAt); }
                  >
                    "Visited"
                  </button>
                </th>
              </tr>
            </thead>
            <tbody>
              <For
                each = move || list_state.with(|st| st.items.clone())
                key = |record| record.id
                children = move |record: TravelRecord| view! {
                  <tr class="border-t border-gray-100">
                    <td class="px-3 py-2 font-medium">{ record.title.clone() }</td>
                    <td class="px-3 py-2">{ record.country_code.clone() }</td>
                    <td class="px-3 py-2">{ format!("{}/5", record.rating) }</td>
                    <td class="px-3 py-2">{ record.visited_at.date().to_string() }</td>
                  </tr>
                }
              />
            </tbody>
          </table>
        </div>
      </section>
    }
}
