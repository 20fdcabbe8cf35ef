use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Combobox, ComboboxOption, Flex, FlexAlign, Input, Label,
    MessageBar, MessageBarIntent, Textarea,
};

use shared_types::{Coordinate, IssuePriority, NewIssue};

use crate::server::create_issue;
use crate::views::map::{CampusMap, Viewer};

/// The campus map with the issue-reporting flow wrapped around it. Report
/// mode puts the map into location-select mode; the chosen point and its
/// label land in the form below.
#[component]
pub fn HomePage() -> impl IntoView {
    let query = use_query_map();
    let viewer = Viewer {
        name: query.with_untracked(|q| q.get("reporter")),
        is_admin: query.with_untracked(|q| q.get("admin").as_deref() == Some("1")),
    };

    let report_mode = RwSignal::new(false);
    let selected: RwSignal<Option<(Coordinate, String)>> = RwSignal::new(None);

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let issue_type = RwSignal::new(String::new());
    let priority: RwSignal<Option<String>> = RwSignal::new(Some("medium".to_string()));
    let reporter_name = RwSignal::new(viewer.name.clone().unwrap_or_default());

    let submitting = RwSignal::new(false);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let confirmation: RwSignal<Option<String>> = RwSignal::new(None);

    let on_location_selected = Callback::new(move |(coord, label): (Coordinate, String)| {
        selected.set(Some((coord, label)));
    });

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        if title.with_untracked(|t| t.trim().is_empty()) {
            form_error.set(Some("Give the issue a short title.".to_string()));
            return;
        }
        let Some((coord, label)) = selected.get_untracked() else {
            form_error.set(Some(
                "Pick a location on the map first (long-press or double-click).".to_string(),
            ));
            return;
        };

        let new_issue = NewIssue {
            title: title.get_untracked(),
            description: description.get_untracked(),
            category_id: None,
            issue_type: {
                let t = issue_type.get_untracked();
                (!t.trim().is_empty()).then_some(t)
            },
            priority: priority
                .get_untracked()
                .and_then(|p| IssuePriority::parse(&p))
                .unwrap_or(IssuePriority::Medium),
            location: Some(coord),
            location_name: Some(label),
            image_url: None,
            reporter_name: {
                let n = reporter_name.get_untracked();
                (!n.trim().is_empty()).then_some(n)
            },
            reporter_contact: None,
        };

        submitting.set(true);
        form_error.set(None);
        spawn_local(async move {
            match create_issue(new_issue).await {
                Ok(issue) => {
                    confirmation.set(Some(format!(
                        "Reported \"{}\". It will appear on the map shortly.",
                        issue.title
                    )));
                    title.set(String::new());
                    description.set(String::new());
                    issue_type.set(String::new());
                    selected.set(None);
                    report_mode.set(false);
                }
                Err(err) => {
                    leptos::logging::error!("issue submission failed: {err}");
                    form_error.set(Some("Could not submit the report. Please try again.".to_string()));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="home-page">
            <header class="home-header">
                <h1 class="home-title">"CampusWatch"</h1>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| {
                        report_mode.update(|m| *m = !*m);
                        form_error.set(None);
                    }
                >
                    {move || if report_mode.get() { "Cancel Report" } else { "Report an Issue" }}
                </Button>
            </header>

            {move || confirmation.get().map(|message| view! {
                <MessageBar intent=MessageBarIntent::Success>
                    {message}
                    <Button size=ButtonSize::Small on_click=move |_| confirmation.set(None)>
                        "Dismiss"
                    </Button>
                </MessageBar>
            })}

            <div class="home-body">
                <CampusMap
                    select_mode=report_mode
                    on_location_selected=on_location_selected
                    viewer=viewer
                />

                {move || report_mode.get().then(|| view! {
                    <div class="report-panel">
                        <h3 class="report-panel-title">"Report an Issue"</h3>

                        {move || match selected.get() {
                            Some((_, label)) => view! {
                                <p class="selected-location">{label}</p>
                            }.into_any(),
                            None => view! {
                                <p class="selected-location muted">
                                    "Long-press or double-click the map to set the location."
                                </p>
                            }.into_any(),
                        }}

                        <Flex vertical=true align=FlexAlign::Start>
                            <Label>"Title"</Label>
                            <Input value=title placeholder="Broken streetlight near hostel" />

                            <Label>"Description"</Label>
                            <Textarea value=description placeholder="What is the problem?" />

                            <Label>"Type"</Label>
                            <Input value=issue_type placeholder="e.g. broken, noise, safety" />

                            <Label>"Priority"</Label>
                            <Combobox selected_options=priority placeholder="Priority">
                                <ComboboxOption value="low" text="Low" />
                                <ComboboxOption value="medium" text="Medium" />
                                <ComboboxOption value="high" text="High" />
                                <ComboboxOption value="critical" text="Critical" />
                            </Combobox>

                            <Label>"Your name (optional)"</Label>
                            <Input value=reporter_name placeholder="Anonymous" />
                        </Flex>

                        {move || form_error.get().map(|message| view! {
                            <MessageBar intent=MessageBarIntent::Error>{message}</MessageBar>
                        })}

                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=submitting
                            on_click=submit
                        >
                            "Submit Report"
                        </Button>
                    </div>
                })}
            </div>
        </div>
    }
}
