use leptos::prelude::*;
use leptos_leaflet::prelude::*;
use shared_types::Issue;

use crate::views::map::campus_map::Viewer;
use crate::views::map::marker::project_marker;

/// One issue rendered as a map marker with its popup. Activation, routing
/// and deletion are delegated up to the session controller. Clicking the
/// marker opens the popup (Leaflet's own behavior); `on_activate` fires
/// from the popup's Details action, which is the explicit activation
/// point rather than the mere opening of the popup.
#[component]
pub fn IssueMarker(
    issue: Issue,
    viewer: Viewer,
    on_activate: Callback<Issue>,
    on_navigate: Callback<Issue>,
    on_delete: Callback<Issue>,
) -> impl IntoView {
    let Some(visual) = project_marker(&issue) else {
        // No recorded location; nothing to draw.
        return ().into_any();
    };

    let title = issue.title.clone();
    let description = issue.description.clone();
    let status = issue.status;
    let reporter = issue.reporter_name.clone().unwrap_or_else(|| "Unknown".to_string());
    let stored = StoredValue::new(issue);

    view! {
        <Marker
            position=Position::new(visual.position.lat, visual.position.lng)
            draggable=false
            icon_url=Some(visual.icon_url)
            icon_size=Some(visual.icon_size)
            icon_anchor=Some(visual.icon_anchor)
        >
            <Popup>
                <div class="issue-popup">
                    <h3 class="issue-popup-title">{title}</h3>
                    <p class="issue-popup-description">{description}</p>
                    <p class="issue-popup-meta">
                        {format!("Status: {} · Reported by: {}", status.as_str(), reporter)}
                    </p>
                    <div class="issue-popup-actions">
                        <button
                            class="popup-btn popup-btn-primary"
                            on:click=move |_| on_navigate.run(stored.get_value())
                        >
                            "Navigate Here"
                        </button>
                        <button
                            class="popup-btn"
                            on:click=move |_| on_activate.run(stored.get_value())
                        >
                            "Details"
                        </button>
                        {viewer.is_admin.then(|| view! {
                            <button
                                class="popup-btn popup-btn-danger"
                                on:click=move |_| on_delete.run(stored.get_value())
                            >
                                "Delete"
                            </button>
                        })}
                    </div>
                </div>
            </Popup>
        </Marker>
    }
    .into_any()
}
