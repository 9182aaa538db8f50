use leptos::*;
use leptos_router::*;

use crate::Page;

#[component]
pub fn NavBar<F>(logged_in: Signal<bool>, on_logout: F) -> impl IntoView
where
    F: Fn() + 'static + Copy,
{
    view! {
      <nav class="container mx-auto flex items-center justify-between p-6">
        <div class="pt-2 font-bold">
          <A href = Page::Entries.path()>"Waylog"</A>
        </div>
        <div class="space-x-6">
          <MenuItem page = Page::Entries label = "Entries" />
          <MenuItem page = Page::Insights label = "Insights" />
          {move || if logged_in.get() {
              view! {
                <a href="#" class="hover:text-gray-600" on:click = move |_| on_logout()>
                  "Logout"
                </a>
              }.into_view()
          } else {
              view! { <MenuItem page = Page::Login label = "Login" /> }.into_view()
          }}
        </div>
      </nav>
    }
}

#[component]
fn MenuItem(page: Page, label: &'static str) -> impl IntoView {
    view! {
      <A href=page.path() class="hover:text-gray-600".to_string()>{ label }</A>
    }
}
