use leptos::prelude::*;
use shared_types::Coordinate;
use thaw::{Button, ButtonAppearance, ButtonSize, Combobox, ComboboxOption, Flex, FlexAlign, Label};

use crate::components::error::ErrorView;
use crate::views::map::landmarks::{resolve_route_endpoints, CAMPUS_LANDMARKS};

/// Campus place-to-place navigation picker. Validates the pair locally and
/// only hands valid endpoints up; no routing request leaves this panel for
/// a missing or identical selection.
#[component]
pub fn CampusNavigationPanel(
    on_navigate: Callback<(Coordinate, Coordinate)>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let from_id: RwSignal<Option<String>> = RwSignal::new(None);
    let to_id: RwSignal<Option<String>> = RwSignal::new(None);
    let validation_error: RwSignal<Option<String>> = RwSignal::new(None);

    let show_route = move |_| {
        let from = from_id.get().unwrap_or_default();
        let to = to_id.get().unwrap_or_default();
        match resolve_route_endpoints(&from, &to) {
            Ok((start, end)) => {
                validation_error.set(None);
                on_navigate.run((start, end));
            }
            Err(err) => validation_error.set(Some(err.to_string())),
        }
    };

    let clear = move |_| {
        from_id.set(None);
        to_id.set(None);
        validation_error.set(None);
        on_clear.run(());
    };

    view! {
        <div class="nav-panel">
            <h3 class="nav-panel-title">"Campus Navigation"</h3>

            <Flex vertical=true align=FlexAlign::Start>
                <Label>"From"</Label>
                <Combobox selected_options=from_id placeholder="From location">
                    {CAMPUS_LANDMARKS.iter().map(|landmark| {
                        view! {
                            <ComboboxOption value=landmark.id.clone() text=landmark.name.clone() />
                        }
                    }).collect_view()}
                </Combobox>

                <Label>"To"</Label>
                <Combobox selected_options=to_id placeholder="To location">
                    {CAMPUS_LANDMARKS.iter().map(|landmark| {
                        view! {
                            <ComboboxOption value=landmark.id.clone() text=landmark.name.clone() />
                        }
                    }).collect_view()}
                </Combobox>
            </Flex>

            {move || validation_error.get().map(|message| view! {
                <ErrorView message=Some(message) />
            })}

            <div class="nav-panel-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    on_click=show_route
                >
                    "Show Route"
                </Button>
                <Button size=ButtonSize::Small on_click=clear>
                    "Clear"
                </Button>
            </div>
        </div>
    }
}
