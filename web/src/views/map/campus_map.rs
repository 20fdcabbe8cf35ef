use std::time::Duration;

use leptos::leptos_dom::helpers::{set_interval_with_handle, set_timeout_with_handle, TimeoutHandle};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_leaflet::leaflet::{LatLng, LatLngBounds, Map, Point};
use leptos_leaflet::prelude::*;
use thaw::{Button, ButtonSize, MessageBar, MessageBarIntent};
use wasm_bindgen::JsCast;

use shared_types::{Coordinate, Issue, RouteOutcome, RoutePath, CAMPUS_CENTER, DEFAULT_ZOOM};

use crate::components::loading::LoadingView;
use crate::server::{delete_issue, fetch_walking_route, list_issues_with_location};
use crate::views::map::feed::{IssueEvent, IssueFeed};
use crate::views::map::geolocate::{locate_or, DevicePosition};
use crate::views::map::gesture::{GestureDetector, LONG_PRESS_MS};
use crate::views::map::issue_marker::IssueMarker;
use crate::views::map::listeners::ListenerGuard;
use crate::views::map::marker::pending_marker_icon;
use crate::views::map::navigation_panel::CampusNavigationPanel;
use crate::views::map::route_session::RouteSession;

const FEED_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Who is looking at the map. Passed in explicitly by the page; the map
/// never reads an ambient current-user singleton.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer {
    pub name: Option<String>,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BaseLayer {
    Street,
    Satellite,
}

/// The interactive map session. Exclusively owns the Leaflet map handle:
/// viewport moves, overlay lifecycle and base-layer switches all happen
/// here and nowhere else.
#[component]
pub fn CampusMap(
    /// When true, location-selecting gestures feed `on_location_selected`
    /// instead of being plain map interaction (used while filing a report).
    #[prop(into)]
    select_mode: Signal<bool>,
    #[prop(optional, into)] on_location_selected: Option<Callback<(Coordinate, String)>>,
    #[prop(optional, into)] on_issue_activated: Option<Callback<Issue>>,
    #[prop(optional)] viewer: Viewer,
) -> impl IntoView {
    let issues: RwSignal<Vec<Issue>> = RwSignal::new(Vec::new());
    let feed = StoredValue::new(IssueFeed::default());
    let pending_location: RwSignal<Option<Coordinate>> = RwSignal::new(None);
    let selected_issue: RwSignal<Option<Issue>> = RwSignal::new(None);
    let route: RwSignal<RouteSession> = RwSignal::new(RouteSession::default());
    let status_message: RwSignal<Option<String>> = RwSignal::new(None);
    let base_layer = RwSignal::new(BaseLayer::Street);

    let map_handle = JsRwSignal::new_local(None::<Map>);
    let map_ready = RwSignal::new(false);
    let wrapper_ref = NodeRef::<leptos::html::Div>::new();

    // Delay map creation until after hydration, as leaflet needs the DOM.
    Effect::new(move |_| {
        let window = web_sys::window().expect("no global `window` exists");
        let _ = window.request_animation_frame(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                map_ready.set(true);
            })
            .as_ref()
            .unchecked_ref(),
        );
    });

    // ---- live issue feed -------------------------------------------------

    let refresh_issues = move || {
        spawn_local(async move {
            match list_issues_with_location().await {
                Ok(fresh) => {
                    feed.update_value(|cache| {
                        for event in cache.diff_snapshot(&fresh) {
                            cache.apply(event);
                        }
                    });
                    issues.set(feed.with_value(|cache| cache.visible()));
                }
                Err(err) => {
                    // Keep the last-known-good set on the map.
                    leptos::logging::error!("issue feed refresh failed: {err}");
                }
            }
        });
    };

    Effect::new(move |_| {
        refresh_issues();
        if let Ok(handle) = set_interval_with_handle(refresh_issues, FEED_POLL_INTERVAL) {
            on_cleanup(move || handle.clear());
        }
    });

    // ---- gestures --------------------------------------------------------

    let select_location = move |coord: Coordinate| {
        pending_location.set(Some(coord));
        if let Some(callback) = on_location_selected {
            callback.run((coord, coord.label()));
        }
    };

    let detector = StoredValue::new_local(GestureDetector::new(select_mode.get_untracked()));
    let press_timer = StoredValue::new_local(None::<TimeoutHandle>);
    let listener_guards = StoredValue::new_local(Vec::<ListenerGuard>::new());

    Effect::new(move |_| {
        let on = select_mode.get();
        detector.update_value(|d| d.set_select_mode(on));
    });

    let cancel_press_timer = move || {
        press_timer.update_value(|timer| {
            if let Some(handle) = timer.take() {
                handle.clear();
            }
        });
    };

    let now_ms = || web_sys::js_sys::Date::now();

    let begin_press = move |at: Coordinate| {
        let Some(token) = detector.try_update_value(|d| d.pointer_down(at, now_ms())) else {
            return;
        };
        cancel_press_timer();
        let fire = move || {
            let fired = detector
                .try_update_value(|d| d.long_press_elapsed(token, now_ms()))
                .flatten();
            if let Some(coord) = fired {
                select_location(coord);
            }
        };
        if let Ok(handle) = set_timeout_with_handle(fire, Duration::from_millis(LONG_PRESS_MS as u64))
        {
            press_timer.set_value(Some(handle));
        }
    };

    let end_press = move || {
        cancel_press_timer();
        detector.update_value(|d| d.pointer_up());
    };

    Effect::new(move |_| {
        let Some(map) = map_handle.read_only().get() else {
            return;
        };

        // Double-click is a location-select gesture here, not a zoom.
        // The leaflet bindings don't expose the `doubleClickZoom` handler
        // property, so reach it through Reflect.
        if let Ok(handler) = web_sys::js_sys::Reflect::get(&map, &wasm_bindgen::JsValue::from_str("doubleClickZoom")) {
            handler.unchecked_into::<leptos_leaflet::leaflet::Handler>().disable();
        }

        // Leaflet's Evented aliases addEventListener/removeEventListener,
        // so the map handle doubles as an event target for the guards.
        let map_target: web_sys::EventTarget = map.clone().unchecked_into();
        let mut guards = Vec::new();

        let event_coordinate = |event: web_sys::Event| -> Coordinate {
            let event: leptos_leaflet::leaflet::MouseEvent = event.unchecked_into();
            let latlng = event.lat_lng();
            Coordinate::new(latlng.lat(), latlng.lng())
        };

        guards.extend(ListenerGuard::attach(&map_target, "mousedown", move |event| {
            begin_press(event_coordinate(event));
        }));
        guards.extend(ListenerGuard::attach(&map_target, "mouseup", move |_| {
            end_press();
        }));
        guards.extend(ListenerGuard::attach(&map_target, "movestart", move |_| {
            cancel_press_timer();
            detector.update_value(|d| d.drag());
        }));
        guards.extend(ListenerGuard::attach(&map_target, "click", move |event| {
            let picked = detector.with_value(|d| d.click(event_coordinate(event)));
            if let Some(coord) = picked {
                select_location(coord);
            }
        }));
        guards.extend(ListenerGuard::attach(&map_target, "dblclick", move |event| {
            // Double-click always wins, even over a pending long-press.
            cancel_press_timer();
            let at = event_coordinate(event);
            let coord = detector.try_update_value(|d| d.double_click(at)).unwrap_or(at);
            select_location(coord);
        }));

        // Touch follows the same press rules through the shared detector.
        if let Some(wrapper) = wrapper_ref.get_untracked() {
            let touch_target: &web_sys::EventTarget = wrapper.unchecked_ref();
            let touch_coordinate = move |event: &web_sys::Event| -> Option<Coordinate> {
                let event: &web_sys::TouchEvent = event.unchecked_ref();
                let touch = event.touches().item(0)?;
                let map = map_handle.read_only().get_untracked()?;
                let wrapper = wrapper_ref.get_untracked()?;
                let rect = wrapper.get_bounding_client_rect();
                let point = Point::new(
                    touch.client_x() as f64 - rect.left(),
                    touch.client_y() as f64 - rect.top(),
                );
                let latlng = map.container_point_to_lat_lng(&point);
                Some(Coordinate::new(latlng.lat(), latlng.lng()))
            };

            guards.extend(ListenerGuard::attach(touch_target, "touchstart", move |event| {
                if let Some(at) = touch_coordinate(&event) {
                    begin_press(at);
                }
            }));
            guards.extend(ListenerGuard::attach(touch_target, "touchend", move |_| {
                end_press();
            }));
            guards.extend(ListenerGuard::attach(touch_target, "touchcancel", move |_| {
                end_press();
            }));
        }

        // Replacing the set drops (and detaches) any previous listeners.
        listener_guards.set_value(guards);
    });

    on_cleanup(move || {
        cancel_press_timer();
        listener_guards.set_value(Vec::new());
    });

    // ---- routing ---------------------------------------------------------

    let fit_route = move |path: &RoutePath| {
        let Some(map) = map_handle.read_only().get_untracked() else {
            return;
        };
        if let Some(bounds) = path.bounds() {
            let south_west = LatLng::new(bounds.south_west.lat, bounds.south_west.lng);
            let north_east = LatLng::new(bounds.north_east.lat, bounds.north_east.lng);
            map.fit_bounds(&LatLngBounds::new(&south_west, &north_east));
        }
    };

    let request_route = move |start: Coordinate, end: Coordinate| {
        let Some(token) = route.try_update(|session| session.begin()) else {
            return;
        };
        spawn_local(async move {
            match fetch_walking_route(start, end).await {
                Ok(RouteOutcome::Found(path)) => {
                    let accepted = route
                        .try_update(|session| session.complete(token, path.clone()))
                        .unwrap_or(false);
                    if accepted {
                        fit_route(&path);
                    }
                }
                Ok(RouteOutcome::NoRoute) => {
                    if route.try_update(|session| session.reject(token)).unwrap_or(false) {
                        status_message
                            .set(Some("No walking route found between these points.".to_string()));
                    }
                }
                Err(err) => {
                    leptos::logging::error!("routing request failed: {err}");
                    if route.try_update(|session| session.reject(token)).unwrap_or(false) {
                        status_message
                            .set(Some("Could not calculate a route. Please try again.".to_string()));
                    }
                }
            }
        });
    };

    let navigate_to_issue = move |issue: Issue| {
        let Some(end) = issue.location else {
            status_message.set(Some("This issue has no recorded location.".to_string()));
            return;
        };
        // Start from the device position, or campus center when denied.
        locate_or(
            CAMPUS_CENTER,
            Callback::new(move |position: DevicePosition| {
                request_route(position.coordinate(), end)
            }),
        );
    };

    let clear_route = move || {
        route.update(|session| session.clear());
        if let Some(map) = map_handle.read_only().get_untracked() {
            map.set_view(&LatLng::new(CAMPUS_CENTER.lat, CAMPUS_CENTER.lng), DEFAULT_ZOOM);
        }
    };

    // ---- issue activation / deletion ------------------------------------

    let activate_issue = Callback::new(move |issue: Issue| {
        selected_issue.set(Some(issue.clone()));
        if let Some(callback) = on_issue_activated {
            callback.run(issue);
        }
    });

    let handle_delete = Callback::new(move |issue: Issue| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Delete this issue?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match delete_issue(issue.id.clone()).await {
                Ok(()) => {
                    feed.update_value(|cache| cache.apply(IssueEvent::Deleted(issue.id.clone())));
                    issues.set(feed.with_value(|cache| cache.visible()));
                    selected_issue.set(None);
                }
                Err(err) => {
                    leptos::logging::error!("delete failed for issue {}: {err}", issue.id);
                    status_message.set(Some("Could not delete the issue.".to_string()));
                }
            }
        });
    });

    let navigate_callback = Callback::new(navigate_to_issue);

    let my_location = move |_| {
        locate_or(
            CAMPUS_CENTER,
            Callback::new(move |position: DevicePosition| match position {
                DevicePosition::Device(coord) => {
                    if let Some(map) = map_handle.read_only().get_untracked() {
                        map.set_view(&LatLng::new(coord.lat, coord.lng), map.get_zoom());
                    }
                }
                // Recentering here would pass the fallback off as the
                // device position; report the denial instead.
                DevicePosition::Fallback(_) => {
                    status_message.set(Some("Could not get your location.".to_string()));
                }
            }),
        );
    };

    // ---- view ------------------------------------------------------------

    view! {
        <div class="campus-map-container" node_ref=wrapper_ref>
            {move || {
                if map_ready.get() {
                    let viewer = viewer.clone();
                    view! {
                        <MapContainer
                            class="campus-map"
                            center=Position::new(CAMPUS_CENTER.lat, CAMPUS_CENTER.lng)
                            zoom=DEFAULT_ZOOM
                            set_view=true
                            map=map_handle.write_only()
                        >
                            {move || match base_layer.get() {
                                BaseLayer::Street => view! {
                                    <TileLayer
                                        url="https://tile.openstreetmap.org/{z}/{x}/{y}.png"
                                        attribution="&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                                    />
                                }.into_any(),
                                BaseLayer::Satellite => view! {
                                    <TileLayer
                                        url="https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
                                        attribution="Tiles &copy; Esri"
                                    />
                                }.into_any(),
                            }}

                            {move || {
                                let viewer = viewer.clone();
                                issues.get().into_iter().map(|issue| {
                                    view! {
                                        <IssueMarker
                                            issue=issue
                                            viewer=viewer.clone()
                                            on_activate=activate_issue
                                            on_navigate=navigate_callback
                                            on_delete=handle_delete
                                        />
                                    }
                                }).collect_view()
                            }}

                            {move || pending_location.get().map(|coord| view! {
                                <Marker
                                    position=Position::new(coord.lat, coord.lng)
                                    draggable=false
                                    icon_url=Some(pending_marker_icon())
                                    icon_size=Some((32.0, 32.0))
                                    icon_anchor=Some((16.0, 28.0))
                                >
                                    <Popup>
                                        <div class="pending-popup">
                                            <p>{coord.label()}</p>
                                            <button
                                                class="popup-btn"
                                                on:click=move |_| pending_location.set(None)
                                            >
                                                "Clear selection"
                                            </button>
                                        </div>
                                    </Popup>
                                </Marker>
                            })}

                            {move || route.get().active().map(|path| {
                                let positions = path
                                    .points
                                    .iter()
                                    .map(|c| Position::new(c.lat, c.lng))
                                    .collect::<Vec<_>>();
                                view! {
                                    <Polyline positions=positions color="#2563EB" weight=5.0 />
                                }
                            })}
                        </MapContainer>
                    }.into_any()
                } else {
                    view! {
                        <div class="campus-map-loading">
                            <LoadingView message=Some("Initializing map...".to_string()) />
                        </div>
                    }.into_any()
                }
            }}

            <CampusNavigationPanel
                on_navigate=Callback::new(move |(start, end)| request_route(start, end))
                on_clear=Callback::new(move |_| clear_route())
            />

            <div class="map-controls">
                <Button size=ButtonSize::Small on_click=my_location>"My Location"</Button>
                <Button
                    size=ButtonSize::Small
                    on_click=move |_| base_layer.set(BaseLayer::Street)
                >
                    "Map"
                </Button>
                <Button
                    size=ButtonSize::Small
                    on_click=move |_| base_layer.set(BaseLayer::Satellite)
                >
                    "Satellite"
                </Button>
                {move || {
                    let session = route.get();
                    (session.active().is_some() || session.is_pending()).then(|| view! {
                        <Button size=ButtonSize::Small on_click=move |_| clear_route()>
                            "Clear Route"
                        </Button>
                    })
                }}
            </div>

            {move || route.get().active().map(|path| view! {
                <div class="route-summary">{path.summary()}</div>
            })}

            {move || selected_issue.get().map(|issue| view! {
                <div class="issue-detail-card">
                    <h4>{issue.title.clone()}</h4>
                    <p>{issue.description.clone()}</p>
                    <Button size=ButtonSize::Small on_click=move |_| selected_issue.set(None)>
                        "Close"
                    </Button>
                </div>
            })}

            {move || status_message.get().map(|message| view! {
                <div class="map-status">
                    <MessageBar intent=MessageBarIntent::Warning>
                        {message}
                        <Button
                            size=ButtonSize::Small
                            on_click=move |_| status_message.set(None)
                        >
                            "Dismiss"
                        </Button>
                    </MessageBar>
                </div>
            })}
        </div>
    }
}
